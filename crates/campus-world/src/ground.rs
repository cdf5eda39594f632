//! Flat grass ground under the campus.

use crate::material::MaterialKey;
use crate::render::RenderPart;
use campus_geom::Vec3;

pub const TILE_SIZE: f32 = 10.0;
pub const GRID_SIZE: u32 = 20;

/// Side length of the square ground plane.
pub const fn ground_extent() -> f32 {
    TILE_SIZE * GRID_SIZE as f32
}

/// Single ground plane centred on the world origin, one texture repeat per tile.
pub fn generate() -> Vec<RenderPart> {
    let size = ground_extent();
    vec![
        RenderPart::ground_plane(Vec3::ZERO, size, size, MaterialKey::Ground)
            .with_uv_repeat([GRID_SIZE as f32, GRID_SIZE as f32]),
    ]
}
