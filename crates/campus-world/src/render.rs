//! Render-only descriptors. Nothing in the resolver reads these.

use crate::material::{MaterialKey, uv_repeat};
use campus_geom::Vec3;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Cuboid { size: Vec3 },
    /// Lies in its local XY plane before rotation, like a quad facing +Z.
    Plane { width: f32, depth: f32 },
    Cylinder { radius_top: f32, radius_bottom: f32, height: f32, segments: u32 },
    Sphere { radius: f32, segments: u32 },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RenderPart {
    pub shape: Shape,
    pub center: Vec3,
    /// Euler angles in radians, applied X then Y then Z.
    pub rotation: Vec3,
    pub material: MaterialKey,
    pub uv_repeat: [f32; 2],
}

impl RenderPart {
    pub fn cuboid(center: Vec3, size: Vec3, material: MaterialKey) -> Self {
        Self {
            shape: Shape::Cuboid { size },
            center,
            rotation: Vec3::ZERO,
            material,
            uv_repeat: uv_repeat(size.x.max(size.z), size.y),
        }
    }

    pub fn plane(center: Vec3, width: f32, depth: f32, rotation: Vec3, material: MaterialKey) -> Self {
        Self {
            shape: Shape::Plane { width, depth },
            center,
            rotation,
            material,
            uv_repeat: uv_repeat(width, depth),
        }
    }

    /// Flat on the ground (rotated -90 degrees about X so the face points up).
    pub fn ground_plane(center: Vec3, width: f32, depth: f32, material: MaterialKey) -> Self {
        Self::plane(
            center,
            width,
            depth,
            Vec3::new(-std::f32::consts::FRAC_PI_2, 0.0, 0.0),
            material,
        )
    }

    pub fn with_uv_repeat(mut self, repeat: [f32; 2]) -> Self {
        self.uv_repeat = repeat;
        self
    }

    pub fn solid(shape: Shape, center: Vec3, material: MaterialKey) -> Self {
        Self {
            shape,
            center,
            rotation: Vec3::ZERO,
            material,
            uv_repeat: [1.0, 1.0],
        }
    }
}
