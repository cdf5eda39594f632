//! Discrete AABB movement resolution.
//!
//! One candidate box per tick, tested against the volumes relevant to where
//! the actor currently stands. The first intersecting volume in generation
//! order decides the contact (not the nearest one), and a contact either
//! slides at a fixed fraction of the intended speed or stops the actor for
//! the tick. Movement feel depends on both rules; keep them.

use campus_geom::{Aabb, Vec3};
use campus_world::Building;
use serde::{Deserialize, Serialize};

/// Actor collision box dimensions.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActorShape {
    pub radius: f32,
    pub height: f32,
}

impl Default for ActorShape {
    fn default() -> Self {
        Self {
            radius: 0.5,
            height: 1.0,
        }
    }
}

impl ActorShape {
    #[inline]
    pub fn half_height(&self) -> f32 {
        self.height / 2.0
    }

    /// Box centred on `center`.
    #[inline]
    pub fn box_at(&self, center: Vec3) -> Aabb {
        Aabb::from_center_size(
            center,
            Vec3::new(self.radius * 2.0, self.height, self.radius * 2.0),
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// Where an actor is, as far as collision scoping goes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Scope {
    Indoor { building: usize, floor: usize },
    Outdoor,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Contact {
    pub volume: Aabb,
    pub axis: Axis,
    /// Unit axis pointing from the actor toward the struck volume (zero when centred).
    pub normal: Vec3,
    pub penetration: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MoveOutcome {
    pub position: Vec3,
    /// Movement actually applied this tick.
    pub committed: Vec3,
    pub contact: Option<Contact>,
    pub slid: bool,
    pub on_ramp: bool,
    /// Whether `position` lies in any building; drives the camera distance.
    pub inside_building: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementResolver {
    pub shape: ActorShape,
    /// Ground level outside buildings (feet height).
    pub ground_y: f32,
    /// Lateral distance from a ramp's centre line that still counts as on it.
    pub ramp_tolerance: f32,
    /// Slide speed as a fraction of the intended speed.
    pub slide_factor: f32,
    /// Hits closer to head-on than this (radians) stop the actor.
    pub slide_min_angle: f32,
}

impl Default for MovementResolver {
    fn default() -> Self {
        Self {
            shape: ActorShape::default(),
            ground_y: 0.0,
            ramp_tolerance: 1.0,
            slide_factor: 0.8,
            slide_min_angle: std::f32::consts::FRAC_PI_4,
        }
    }
}

/// `MovementResolver::default().resolve(..)`.
pub fn resolve(buildings: &[Building], position: Vec3, delta: Vec3) -> MoveOutcome {
    MovementResolver::default().resolve(buildings, position, delta)
}

#[inline]
fn sign(v: f32) -> f32 {
    if v > 0.0 {
        1.0
    } else if v < 0.0 {
        -1.0
    } else {
        0.0
    }
}

impl MovementResolver {
    /// First building containing `p` and the floor the actor stands on there.
    pub fn localize(&self, buildings: &[Building], p: Vec3) -> Scope {
        buildings
            .iter()
            .position(|b| b.contains(p))
            .map_or(Scope::Outdoor, |i| Scope::Indoor {
                building: i,
                floor: buildings[i].localize_floor(p.y, self.shape.half_height()),
            })
    }

    /// Volumes to test for an actor in `scope`, in generation order.
    ///
    /// Indoors only the localized floor counts; outdoors every exterior wall of
    /// every building does.
    pub fn relevant_volumes<'b>(&self, buildings: &'b [Building], scope: Scope) -> Vec<&'b Aabb> {
        match scope {
            Scope::Indoor { building, floor } => buildings[building].floor_volumes(floor).collect(),
            Scope::Outdoor => buildings.iter().flat_map(|b| b.exterior_volumes()).collect(),
        }
    }

    /// First volume (in order) the actor box at `center` touches.
    pub fn first_contact(&self, center: Vec3, volumes: &[&Aabb]) -> Option<Contact> {
        let actor = self.shape.box_at(center);
        let hit = volumes.iter().find(|v| actor.intersects(v))?;
        let size = hit.size();
        let to_box = hit.center() - center;
        let gap = to_box.abs();
        let ox = (self.shape.radius + size.x / 2.0) - gap.x;
        let oy = (self.shape.half_height() + size.y / 2.0) - gap.y;
        let oz = (self.shape.radius + size.z / 2.0) - gap.z;

        let (axis, normal, penetration) = if ox < oy && ox < oz {
            (Axis::X, Vec3::new(sign(to_box.x), 0.0, 0.0), ox)
        } else if oy < oz {
            (Axis::Y, Vec3::new(0.0, sign(to_box.y), 0.0), oy)
        } else {
            (Axis::Z, Vec3::new(0.0, 0.0, sign(to_box.z)), oz)
        };
        Some(Contact {
            volume: **hit,
            axis,
            normal,
            penetration,
        })
    }

    /// Moves an actor centred at `position` by `delta` for one tick.
    pub fn resolve(&self, buildings: &[Building], position: Vec3, delta: Vec3) -> MoveOutcome {
        let scope = self.localize(buildings, position);
        let volumes = self.relevant_volumes(buildings, scope);
        let target = position + delta;

        let (final_pos, contact, slid, on_ramp) = match self.first_contact(target, &volumes) {
            Some(contact) => {
                let slide = self.slide(position, delta, &contact, &volumes);
                let committed = slide.unwrap_or(Vec3::ZERO);
                log::trace!(
                    "contact {:?} normal=({}, {}, {}) slid={}",
                    contact.axis,
                    contact.normal.x,
                    contact.normal.y,
                    contact.normal.z,
                    slide.is_some()
                );
                (position + committed, Some(contact), slide.is_some(), false)
            }
            None => {
                let (y, on_ramp) = self.surface_height(buildings, target);
                (target.with_y(y), None, false, on_ramp)
            }
        };

        MoveOutcome {
            position: final_pos,
            committed: final_pos - position,
            contact,
            slid,
            on_ramp,
            inside_building: buildings.iter().any(|b| b.contains(final_pos)),
        }
    }

    /// Slide offset along the struck wall, or `None` when the actor should stop.
    fn slide(&self, position: Vec3, delta: Vec3, contact: &Contact, volumes: &[&Aabb]) -> Option<Vec3> {
        let speed = delta.length();
        if speed == 0.0 {
            return None;
        }
        let cos = (delta / speed).dot(contact.normal).clamp(-1.0, 1.0);
        if cos.acos() <= self.slide_min_angle {
            return None;
        }
        let along_wall = delta - contact.normal * delta.dot(contact.normal);
        if along_wall.length_squared() <= 1e-4 {
            return None;
        }
        let slide = along_wall.normalized() * (speed * self.slide_factor);
        let blocked = {
            let candidate = self.shape.box_at(position + slide);
            volumes.iter().any(|v| candidate.intersects(v))
        };
        (!blocked).then_some(slide)
    }

    /// Centre height for a collision-free destination, and whether a ramp set it.
    pub fn surface_height(&self, buildings: &[Building], dest: Vec3) -> (f32, bool) {
        let half = self.shape.half_height();
        let Some(b) = buildings.iter().find(|b| b.contains(dest)) else {
            return (self.ground_y + half, false);
        };
        // Stacked ramps share a column; take the one nearest the actor's feet
        let feet = dest.y - half;
        let ramp = b
            .ramps()
            .iter()
            .filter(|r| r.covers(dest, self.ramp_tolerance))
            .min_by(|x, y| {
                let dx = (x.height_at(dest.z) - feet).abs();
                let dy = (y.height_at(dest.z) - feet).abs();
                dx.total_cmp(&dy)
            });
        if let Some(r) = ramp {
            return (r.height_at(dest.z) + half, true);
        }
        let floor = b.localize_floor(dest.y, half);
        (b.floor_base_y(floor) + half, false)
    }
}
