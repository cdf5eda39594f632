//! Third-person chase camera that keeps the actor in view.
//!
//! Reads the static obstacle set only. Each frame the orbit distance eases
//! toward an inside/outside target, then a ray from the actor toward the ideal
//! camera spot pulls the camera in front of the first obstruction.

use std::f32::consts::{FRAC_PI_3, FRAC_PI_6, PI};

use campus_geom::{Aabb, Vec3};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraParams {
    pub distance_outside: f32,
    pub distance_inside: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub yaw: f32,
    pub pitch: f32,
    pub pitch_min: f32,
    pub pitch_max: f32,
    /// Fraction of the remaining distance covered per frame.
    pub smoothing: f32,
    /// Gap kept between the camera and an obstruction.
    pub clearance: f32,
    /// How far below the target the camera may sink.
    pub floor_margin: f32,
}

impl Default for CameraParams {
    fn default() -> Self {
        Self {
            distance_outside: 10.0,
            distance_inside: 6.0,
            min_distance: 2.0,
            max_distance: 15.0,
            yaw: PI,
            pitch: FRAC_PI_6,
            pitch_min: 0.0,
            pitch_max: FRAC_PI_3,
            smoothing: 0.1,
            clearance: 0.5,
            floor_margin: 0.5,
        }
    }
}

#[derive(Clone, Debug)]
pub struct ChaseCamera {
    pub params: CameraParams,
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
    pub target_distance: f32,
    pub position: Vec3,
}

impl ChaseCamera {
    pub fn new(params: CameraParams) -> Self {
        Self {
            yaw: params.yaw,
            pitch: params.pitch.clamp(params.pitch_min, params.pitch_max),
            distance: params.distance_outside,
            target_distance: params.distance_outside,
            position: Vec3::ZERO,
            params,
        }
    }

    /// Applies a mouse delta; pitch stays within its limits.
    pub fn rotate(&mut self, dx: f32, dy: f32, sensitivity: f32) {
        self.yaw -= dx * sensitivity;
        self.pitch = (self.pitch - dy * sensitivity).clamp(self.params.pitch_min, self.params.pitch_max);
    }

    pub fn set_environment(&mut self, inside_building: bool) {
        self.target_distance = if inside_building {
            self.params.distance_inside
        } else {
            self.params.distance_outside
        };
    }

    /// Horizontal `(forward, right)` basis of the view, for movement input.
    pub fn basis(&self) -> (Vec3, Vec3) {
        let (s, c) = self.yaw.sin_cos();
        (Vec3::new(-s, 0.0, -c), Vec3::new(c, 0.0, -s))
    }

    /// Offset from target to camera at the current distance and angles.
    pub fn orbit_offset(&self) -> Vec3 {
        let d = self.distance;
        let (sy, cy) = self.yaw.sin_cos();
        let (sp, cp) = self.pitch.sin_cos();
        Vec3::new(d * sy * cp, d * sp, d * cy * cp)
    }

    /// Advances one frame and returns the new camera position.
    pub fn update(&mut self, target: Vec3, obstacles: &[Aabb]) -> Vec3 {
        let p = &self.params;
        self.distance += (self.target_distance - self.distance) * p.smoothing;
        self.distance = self.distance.clamp(p.min_distance, p.max_distance);

        let offset = self.orbit_offset();
        let dir = offset.normalized();
        let mut pos = target + offset;
        if let Some(hit) = first_obstruction(target, dir, obstacles) {
            if hit < self.distance {
                pos = target + dir * (hit - p.clearance).max(p.min_distance);
            }
        }
        pos.y = pos.y.max(target.y - p.floor_margin);
        self.position = pos;
        pos
    }
}

/// Nearest entry distance along `dir` among `obstacles`.
pub fn first_obstruction(origin: Vec3, dir: Vec3, obstacles: &[Aabb]) -> Option<f32> {
    obstacles
        .iter()
        .filter_map(|b| b.ray_entry(origin, dir))
        .min_by(|a, b| a.total_cmp(b))
}
