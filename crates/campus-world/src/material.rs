//! Logical material names handed to the renderer.
//!
//! The core never loads textures itself; it only tags render parts with a key.
//! The binary's asset layer maps keys to texture files (or a placeholder).

use serde::{Deserialize, Serialize};

/// World units covered by one texture tile.
pub const TEXTURE_TILE: f32 = 4.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MaterialKey {
    OuterWall,
    InnerWall,
    Floor,
    Ramp,
    Path,
    Ground,
    Shrub,
    LampPole,
    LampLight,
    Grass,
}

impl MaterialKey {
    pub const ALL: [MaterialKey; 10] = [
        MaterialKey::OuterWall,
        MaterialKey::InnerWall,
        MaterialKey::Floor,
        MaterialKey::Ramp,
        MaterialKey::Path,
        MaterialKey::Ground,
        MaterialKey::Shrub,
        MaterialKey::LampPole,
        MaterialKey::LampLight,
        MaterialKey::Grass,
    ];

    pub fn name(self) -> &'static str {
        match self {
            MaterialKey::OuterWall => "outerWall",
            MaterialKey::InnerWall => "innerWall",
            MaterialKey::Floor => "floor",
            MaterialKey::Ramp => "ramp",
            MaterialKey::Path => "path",
            MaterialKey::Ground => "ground",
            MaterialKey::Shrub => "shrub",
            MaterialKey::LampPole => "lampPole",
            MaterialKey::LampLight => "lampLight",
            MaterialKey::Grass => "grass",
        }
    }

    /// Texture file (relative to the textures dir) for textured materials.
    /// The ground reuses the grass texture; props are flat colored.
    pub fn texture_file(self) -> Option<&'static str> {
        match self {
            MaterialKey::OuterWall => Some("outer_wall.png"),
            MaterialKey::InnerWall => Some("inner_wall.png"),
            MaterialKey::Floor => Some("floor.png"),
            MaterialKey::Ramp => Some("ramp.png"),
            MaterialKey::Path => Some("path.png"),
            MaterialKey::Ground => Some("grass.png"),
            _ => None,
        }
    }

    /// Flat RGB color for untextured materials.
    pub fn base_color(self) -> Option<u32> {
        match self {
            MaterialKey::Shrub => Some(0x228B22),
            MaterialKey::LampPole => Some(0x333333),
            MaterialKey::LampLight => Some(0xFFFF99),
            MaterialKey::Grass => Some(0x32CD32),
            _ => None,
        }
    }

    /// Inner walls sit a hair in front of outer walls; the renderer should bias depth.
    pub fn polygon_offset(self) -> bool {
        matches!(self, MaterialKey::InnerWall)
    }
}

/// Texture repeat for a `u_dim` x `v_dim` face, keeping texels square.
///
/// The longer side decides the repeat count for both axes.
pub fn uv_repeat(u_dim: f32, v_dim: f32) -> [f32; 2] {
    let mut u = u_dim / TEXTURE_TILE;
    let mut v = v_dim / TEXTURE_TILE;
    if v_dim > 0.0 && u_dim / v_dim > 1.0 {
        v = u;
    } else {
        u = v;
    }
    [u, v]
}
