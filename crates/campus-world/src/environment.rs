//! Grounds between the buildings: paths, lamps, shrubs, and grass patches.
//!
//! Props are rejection sampled with no retry, so the emitted counts can fall
//! short of the requested ones.

use crate::building::{Building, WALL_OFFSET};
use crate::material::MaterialKey;
use crate::render::{RenderPart, Shape};
use crate::seq::sample;
use campus_geom::{Aabb, Vec3};

pub const ENVIRONMENT_SEED: i64 = 42;
pub const PATH_WIDTH: f32 = 2.0;
/// Exclusion margin around a path's footprint.
pub const PATH_MARGIN: f32 = 1.0;
pub const LAMP_SPACING: f32 = 10.0;
pub const LAMP_OFFSET: f32 = 1.5;
pub const LAMP_HEIGHT: f32 = 4.0;
pub const SHRUB_COUNT: usize = 50;
pub const GRASS_COUNT: usize = 30;
/// Props are sampled over `[-PROP_EXTENT, PROP_EXTENT)` on x and z.
pub const PROP_EXTENT: f32 = 100.0;

const PATH_Y: f32 = 0.01 + WALL_OFFSET;
const GRASS_Y: f32 = 0.01 + WALL_OFFSET * 2.0;
const GRASS_SIZE: f32 = 3.0;
const SHRUB_HEIGHT: f32 = 1.5;
const SHRUB_RADIUS: f32 = 0.8;
const LAMP_POLE_RADIUS: f32 = 0.1;
const LAMP_LIGHT_RADIUS: f32 = 0.3;

/// Straight path between two consecutive entrances.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PathSegment {
    pub start: Vec3,
    pub end: Vec3,
    pub width: f32,
}

impl PathSegment {
    pub fn length(&self) -> f32 {
        (self.end - self.start).with_y(0.0).length()
    }

    pub fn direction(&self) -> Vec3 {
        (self.end - self.start).with_y(0.0).normalized()
    }

    pub fn midpoint(&self) -> Vec3 {
        self.start.lerp(self.end, 0.5)
    }

    /// World-space box around the path rectangle at ground level.
    pub fn footprint(&self) -> Aabb {
        let dir = self.direction();
        let half_len = self.length() / 2.0;
        let half_w = self.width / 2.0;
        // Rectangle corners project onto x/z through the direction and its perpendicular
        let ex = dir.x.abs() * half_len + dir.z.abs() * half_w;
        let ez = dir.z.abs() * half_len + dir.x.abs() * half_w;
        let mid = self.midpoint().with_y(PATH_Y);
        Aabb::new(mid - Vec3::new(ex, 0.0, ez), mid + Vec3::new(ex, 0.0, ez))
    }

    /// Footprint grown by the exclusion margin on every side.
    pub fn exclusion_zone(&self) -> Aabb {
        self.footprint().expand_by_scalar(PATH_MARGIN)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Lamp {
    /// Ground point under the pole.
    pub base: Vec3,
    pub path: usize,
}

impl Lamp {
    pub fn pole_center(&self) -> Vec3 {
        self.base.with_y(LAMP_HEIGHT / 2.0)
    }

    pub fn light_center(&self) -> Vec3 {
        self.base.with_y(LAMP_HEIGHT)
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_center_size(
            self.pole_center(),
            Vec3::new(LAMP_POLE_RADIUS * 2.0, LAMP_HEIGHT, LAMP_POLE_RADIUS * 2.0),
        )
    }
}

#[derive(Clone, Debug, Default)]
pub struct Environment {
    pub paths: Vec<PathSegment>,
    pub lamps: Vec<Lamp>,
    /// Ground positions of accepted shrubs.
    pub shrubs: Vec<Vec3>,
    /// Ground positions of accepted grass patches.
    pub grass: Vec<Vec3>,
    pub parts: Vec<RenderPart>,
}

impl Environment {
    /// Solid props the chase camera should not pass through.
    pub fn solid_bounds(&self) -> Vec<Aabb> {
        let shrubs = self.shrubs.iter().map(|&p| shrub_bounds(p));
        self.lamps.iter().map(Lamp::bounds).chain(shrubs).collect()
    }
}

fn shrub_bounds(p: Vec3) -> Aabb {
    Aabb::from_center_size(
        p.with_y(SHRUB_HEIGHT / 2.0),
        Vec3::new(SHRUB_RADIUS * 2.0, SHRUB_HEIGHT, SHRUB_RADIUS * 2.0),
    )
}

/// Lays out paths, lamps, and props around `buildings` (in the given order).
pub fn generate(buildings: &[Building]) -> Environment {
    let mut env = Environment::default();

    let entrances: Vec<Vec3> = buildings.iter().map(|b| b.entrance().with_y(0.0)).collect();
    let mut paths = Vec::with_capacity(entrances.len().saturating_sub(1));
    for pair in entrances.windows(2) {
        let seg = PathSegment {
            start: pair[0],
            end: pair[1],
            width: PATH_WIDTH,
        };
        let d = seg.end - seg.start;
        env.parts.push(RenderPart::plane(
            seg.midpoint().with_y(PATH_Y),
            seg.length(),
            seg.width,
            Vec3::new(-std::f32::consts::FRAC_PI_2, d.x.atan2(d.z), 0.0),
            MaterialKey::Path,
        ));
        paths.push(seg);
    }

    for (index, seg) in paths.iter().enumerate() {
        place_lamps(&mut env, index, seg);
    }

    let exclusions: Vec<Aabb> = paths.iter().map(PathSegment::exclusion_zone).collect();
    env.paths = paths;

    // Two draws per prop; grass starts past the last shrub draw so streams never overlap
    for i in 0..SHRUB_COUNT {
        let s = ENVIRONMENT_SEED + 2 * i as i64;
        if let Some(p) = sample_position(s, buildings, &exclusions) {
            env.parts.push(RenderPart::solid(
                Shape::Cylinder {
                    radius_top: 0.5,
                    radius_bottom: SHRUB_RADIUS,
                    height: SHRUB_HEIGHT,
                    segments: 8,
                },
                p.with_y(SHRUB_HEIGHT / 2.0),
                MaterialKey::Shrub,
            ));
            env.shrubs.push(p);
        }
    }
    let grass_base = ENVIRONMENT_SEED + 2 * SHRUB_COUNT as i64;
    for i in 0..GRASS_COUNT {
        let s = grass_base + 2 * i as i64;
        if let Some(p) = sample_position(s, buildings, &exclusions) {
            env.parts.push(RenderPart::ground_plane(
                p.with_y(GRASS_Y),
                GRASS_SIZE,
                GRASS_SIZE,
                MaterialKey::Grass,
            ));
            env.grass.push(p);
        }
    }

    if env.shrubs.len() < SHRUB_COUNT || env.grass.len() < GRASS_COUNT {
        log::debug!(
            "rejection sampling kept {}/{} shrubs, {}/{} grass patches",
            env.shrubs.len(),
            SHRUB_COUNT,
            env.grass.len(),
            GRASS_COUNT
        );
    }
    env
}

fn place_lamps(env: &mut Environment, index: usize, seg: &PathSegment) {
    let lamp_count = (seg.length() / LAMP_SPACING).floor() as usize;
    let side_axis = seg.direction().cross(Vec3::UP);
    for i in 0..lamp_count {
        let t = (i + 1) as f32 / (lamp_count + 1) as f32;
        let side = if sample(ENVIRONMENT_SEED + (i + index) as i64) > 0.5 { 1.0 } else { -1.0 };
        let base = seg.start.lerp(seg.end, t).with_y(0.0) + side_axis * (side * LAMP_OFFSET);
        let lamp = Lamp { base, path: index };
        env.parts.push(RenderPart::solid(
            Shape::Cylinder {
                radius_top: LAMP_POLE_RADIUS,
                radius_bottom: LAMP_POLE_RADIUS,
                height: LAMP_HEIGHT,
                segments: 8,
            },
            lamp.pole_center(),
            MaterialKey::LampPole,
        ));
        env.parts.push(RenderPart::solid(
            Shape::Sphere {
                radius: LAMP_LIGHT_RADIUS,
                segments: 8,
            },
            lamp.light_center(),
            MaterialKey::LampLight,
        ));
        env.lamps.push(lamp);
    }
}

/// One candidate from draws `seed` and `seed + 1`; `None` when excluded.
fn sample_position(seed: i64, buildings: &[Building], exclusions: &[Aabb]) -> Option<Vec3> {
    let span = PROP_EXTENT * 2.0;
    let x = (sample(seed) * span as f64) as f32 - PROP_EXTENT;
    let z = (sample(seed + 1) * span as f64) as f32 - PROP_EXTENT;
    let p = Vec3::new(x, 0.0, z);
    let blocked = buildings.iter().any(|b| b.contains(p))
        || exclusions.iter().any(|zone| zone.contains_point(p));
    (!blocked).then_some(p)
}
