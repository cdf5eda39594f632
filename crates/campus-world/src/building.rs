//! Building layout generator.
//!
//! A building is a pure function of `(archetype, origin)`: the seed is derived
//! from the origin, floors add their index, and layout rules add small offsets
//! on top. Collision volumes live in one flat arena per building, sliced per
//! floor by index ranges, so per-tick lookups are plain slice borrows.

use std::ops::Range;

use crate::layout::{self, FloorLayout};
use crate::material::MaterialKey;
use crate::render::RenderPart;
use crate::seq;
use campus_geom::{Aabb, Vec3};
use serde::{Deserialize, Serialize};

pub const FLOOR_HEIGHT: f32 = 3.0;
pub const WALL_THICKNESS: f32 = 0.2;
/// Outward nudge that keeps coplanar surfaces from z-fighting.
pub const WALL_OFFSET: f32 = 0.01;
pub const DOOR_WIDTH: f32 = 8.0;

pub const RAMP_WIDTH: f32 = 2.0;
pub const RAMP_RUN: f32 = 4.0;
/// Ramp z-centre relative to the building origin.
const RAMP_Z_OFFSET: f32 = -10.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Archetype {
    #[serde(alias = "dorm")]
    Dormitory,
    Classroom,
    #[serde(alias = "misc")]
    Miscellaneous,
    /// Any unrecognised name: a plain one-floor shell with no interior.
    #[serde(other)]
    Unknown,
}

impl Archetype {
    pub fn floors(self) -> usize {
        match self {
            Archetype::Dormitory => 4,
            Archetype::Classroom => 3,
            Archetype::Miscellaneous | Archetype::Unknown => 1,
        }
    }

    /// Footprint `(width, depth)`.
    pub fn footprint(self) -> (f32, f32) {
        match self {
            Archetype::Dormitory => (20.0, 20.0),
            Archetype::Classroom => (25.0, 25.0),
            Archetype::Miscellaneous | Archetype::Unknown => (15.0, 15.0),
        }
    }

    /// Lateral x offset of the ramp column, for archetypes that get ramps.
    pub fn ramp_x_offset(self) -> Option<f32> {
        match self {
            Archetype::Dormitory => Some(8.0),
            Archetype::Classroom => Some(10.0),
            Archetype::Miscellaneous | Archetype::Unknown => None,
        }
    }
}

/// Where and what to build; the config layer lists these.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BuildingSpec {
    pub archetype: Archetype,
    pub position: [f32; 3],
}

impl BuildingSpec {
    pub fn new(archetype: Archetype, position: Vec3) -> Self {
        Self {
            archetype,
            position: [position.x, position.y, position.z],
        }
    }

    pub fn origin(&self) -> Vec3 {
        Vec3::from(self.position)
    }
}

/// Slope between floor `floor` and `floor + 1`, running along +z.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Ramp {
    pub floor: usize,
    pub x: f32,
    pub start_z: f32,
    pub end_z: f32,
    pub start_y: f32,
    pub end_y: f32,
}

impl Ramp {
    /// Whether `p` stands on the ramp column: within `tolerance` of its x and inside its z-range.
    #[inline]
    pub fn covers(&self, p: Vec3, tolerance: f32) -> bool {
        (p.x - self.x).abs() < tolerance && p.z >= self.start_z && p.z <= self.end_z
    }

    /// Surface height at `z`, clamped to the ramp's extent.
    pub fn height_at(&self, z: f32) -> f32 {
        let t = ((z - self.start_z) / (self.end_z - self.start_z)).clamp(0.0, 1.0);
        self.start_y + t * (self.end_y - self.start_y)
    }
}

#[derive(Clone, Debug)]
pub struct Building {
    pub archetype: Archetype,
    pub origin: Vec3,
    pub seed: i64,
    pub floor_count: usize,
    pub floor_height: f32,
    pub width: f32,
    pub depth: f32,
    pub bounding_volume: Aabb,
    volumes: Vec<Aabb>,
    outer: Vec<Range<usize>>,
    inner: Vec<Range<usize>>,
    ramps: Vec<Ramp>,
    pub layouts: Vec<FloorLayout>,
    pub parts: Vec<RenderPart>,
}

impl Building {
    /// Builds with the seed derived from `origin`.
    pub fn new(archetype: Archetype, origin: Vec3) -> Self {
        Self::generate(archetype, origin, seq::building_seed(origin))
    }

    pub fn from_spec(spec: &BuildingSpec) -> Self {
        Self::new(spec.archetype, spec.origin())
    }

    pub fn generate(archetype: Archetype, origin: Vec3, seed: i64) -> Self {
        if archetype == Archetype::Unknown {
            log::warn!(
                "unknown archetype at ({}, {}, {}); generating an empty shell",
                origin.x,
                origin.y,
                origin.z
            );
        }
        let floors = archetype.floors();
        let (width, depth) = archetype.footprint();
        let mut b = Building {
            archetype,
            origin,
            seed,
            floor_count: floors,
            floor_height: FLOOR_HEIGHT,
            width,
            depth,
            bounding_volume: bounding_volume(origin, width, depth, floors as f32 * FLOOR_HEIGHT),
            volumes: Vec::new(),
            outer: Vec::with_capacity(floors),
            inner: Vec::with_capacity(floors),
            ramps: Vec::new(),
            layouts: Vec::with_capacity(floors),
            parts: Vec::new(),
        };

        for f in 0..floors {
            let start = b.volumes.len();
            b.exterior_walls(f);
            b.outer.push(start..b.volumes.len());

            let slab_y = f as f32 * FLOOR_HEIGHT + WALL_OFFSET;
            b.parts.push(RenderPart::ground_plane(
                origin + Vec3::new(0.0, slab_y, 0.0),
                width,
                depth,
                MaterialKey::Floor,
            ));

            let plan = layout::generate_floor(archetype, width, depth, f, seed);
            let start = b.volumes.len();
            for p in &plan.partitions {
                b.wall(p.center, p.size, MaterialKey::InnerWall);
            }
            b.inner.push(start..b.volumes.len());
            b.layouts.push(plan.layout);
        }

        if let Some(x_offset) = archetype.ramp_x_offset() {
            for f in 0..floors.saturating_sub(1) {
                b.push_ramp(f, x_offset);
            }
        }

        log::debug!(
            "generated {:?} at ({}, {}, {}) seed={} volumes={} ramps={}",
            archetype,
            origin.x,
            origin.y,
            origin.z,
            seed,
            b.volumes.len(),
            b.ramps.len()
        );
        b
    }

    /// Pushes a wall given relative to the origin; returns its world box.
    fn wall(&mut self, rel_center: Vec3, size: Vec3, material: MaterialKey) -> Aabb {
        let center = self.origin + rel_center;
        let aabb = Aabb::from_center_size(center, size);
        self.volumes.push(aabb);
        self.parts.push(RenderPart::cuboid(center, size, material));
        aabb
    }

    fn exterior_walls(&mut self, f: usize) {
        let (w, d) = (self.width, self.depth);
        let y = f as f32 * FLOOR_HEIGHT + FLOOR_HEIGHT / 2.0;
        let front_z = -d / 2.0 - WALL_OFFSET;
        let along_x = |len: f32| Vec3::new(len, FLOOR_HEIGHT, WALL_THICKNESS);
        let along_z = Vec3::new(WALL_THICKNESS, FLOOR_HEIGHT, d);

        if f == 0 {
            // Two segments meeting the corners, leaving the door centred on x
            let segment = (w - DOOR_WIDTH) / 2.0;
            let cx = (w + DOOR_WIDTH) / 4.0;
            self.wall(Vec3::new(-cx, y, front_z), along_x(segment), MaterialKey::OuterWall);
            self.wall(Vec3::new(cx, y, front_z), along_x(segment), MaterialKey::OuterWall);
        } else {
            self.wall(Vec3::new(0.0, y, front_z), along_x(w), MaterialKey::OuterWall);
        }
        self.wall(Vec3::new(0.0, y, d / 2.0 + WALL_OFFSET), along_x(w), MaterialKey::OuterWall);
        self.wall(Vec3::new(-w / 2.0 - WALL_OFFSET, y, 0.0), along_z, MaterialKey::OuterWall);
        self.wall(Vec3::new(w / 2.0 + WALL_OFFSET, y, 0.0), along_z, MaterialKey::OuterWall);
    }

    fn push_ramp(&mut self, f: usize, x_offset: f32) {
        let rise = FLOOR_HEIGHT;
        let x = self.origin.x + x_offset;
        let z = self.origin.z + RAMP_Z_OFFSET;
        let base_y = self.origin.y + f as f32 * FLOOR_HEIGHT;
        let slope_len = (RAMP_RUN * RAMP_RUN + rise * rise).sqrt();
        let tilt = rise.atan2(RAMP_RUN);
        self.parts.push(RenderPart::plane(
            Vec3::new(x, base_y + rise / 2.0 + WALL_OFFSET, z),
            RAMP_WIDTH,
            slope_len,
            Vec3::new(-tilt, 0.0, 0.0),
            MaterialKey::Ramp,
        ));
        self.ramps.push(Ramp {
            floor: f,
            x,
            start_z: z - RAMP_RUN / 2.0,
            end_z: z + RAMP_RUN / 2.0,
            start_y: base_y,
            end_y: base_y + rise,
        });
    }

    /// Exterior walls of `floor` (empty slice past the top floor).
    pub fn outer_volumes(&self, floor: usize) -> &[Aabb] {
        self.outer
            .get(floor)
            .map_or(&[][..], |r| &self.volumes[r.clone()])
    }

    pub fn inner_volumes(&self, floor: usize) -> &[Aabb] {
        self.inner
            .get(floor)
            .map_or(&[][..], |r| &self.volumes[r.clone()])
    }

    /// Outer then inner walls of one floor, in generation order.
    pub fn floor_volumes(&self, floor: usize) -> impl Iterator<Item = &Aabb> {
        self.outer_volumes(floor)
            .iter()
            .chain(self.inner_volumes(floor).iter())
    }

    /// Every exterior wall on every floor.
    pub fn exterior_volumes(&self) -> impl Iterator<Item = &Aabb> {
        self.outer.iter().flat_map(|r| self.volumes[r.clone()].iter())
    }

    /// Every collision volume the building owns.
    pub fn all_volumes(&self) -> &[Aabb] {
        &self.volumes
    }

    pub fn ramps(&self) -> &[Ramp] {
        &self.ramps
    }

    /// Ramp leaving `floor` upward, if any.
    pub fn ramp(&self, floor: usize) -> Option<&Ramp> {
        self.ramps.iter().find(|r| r.floor == floor)
    }

    #[inline]
    pub fn contains(&self, p: Vec3) -> bool {
        self.bounding_volume.contains_point(p)
    }

    /// Floor index for an actor whose centre is `half_height` above its feet.
    pub fn localize_floor(&self, y: f32, half_height: f32) -> usize {
        let f = ((y - self.origin.y - half_height) / self.floor_height).round();
        f.clamp(0.0, (self.floor_count - 1) as f32) as usize
    }

    /// Height of the walkable surface of `floor`.
    #[inline]
    pub fn floor_base_y(&self, floor: usize) -> f32 {
        self.origin.y + floor as f32 * self.floor_height
    }

    /// Origin projected onto the front (door) edge of the footprint.
    pub fn entrance(&self) -> Vec3 {
        Vec3::new(self.origin.x, self.origin.y, self.origin.z - self.depth / 2.0)
    }
}

/// Footprint grown by the wall offset and a full wall thickness, spanning all floors.
fn bounding_volume(origin: Vec3, width: f32, depth: f32, height: f32) -> Aabb {
    let margin = WALL_OFFSET + WALL_THICKNESS;
    Aabb::new(
        Vec3::new(origin.x - width / 2.0 - margin, origin.y, origin.z - depth / 2.0 - margin),
        Vec3::new(origin.x + width / 2.0 + margin, origin.y + height, origin.z + depth / 2.0 + margin),
    )
}
