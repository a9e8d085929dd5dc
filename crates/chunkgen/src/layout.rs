use glam::{IVec2, Vec3};
use rand::Rng;

use crate::types::ChunkConfig;

/// Placement plan for one chunk: everything position-related, computed
/// before any render resource exists.
#[derive(Clone, Debug)]
pub struct ChunkLayout {
    pub origin: Vec3,
    pub tree_positions: Vec<Vec3>,
}

/// World-space center of a chunk's ground plane. Any coordinate is
/// accepted, negative included; there is no grid bound to check.
pub fn chunk_origin(config: &ChunkConfig, coord: IVec2) -> Vec3 {
    Vec3::new(
        coord.x as f32 * config.chunk_size,
        0.0,
        coord.y as f32 * config.chunk_size,
    )
}

/// Plans terrain and tree placement for one chunk.
///
/// Tree X and Z each come from a fresh uniform draw on `[0, 1)`, mapped
/// to `[-size/2, +size/2)` around the chunk origin. Draws are never
/// shared between axes or between trees. Tree Y is half the trunk
/// height so the trunk base rests on the ground plane.
pub fn plan_chunk(config: &ChunkConfig, coord: IVec2, rng: &mut impl Rng) -> ChunkLayout {
    let origin = chunk_origin(config, coord);

    let mut tree_positions = Vec::with_capacity(config.tree_count);
    for _ in 0..config.tree_count {
        let u1: f32 = rng.random();
        let u2: f32 = rng.random();
        tree_positions.push(Vec3::new(
            origin.x + (u1 - 0.5) * config.chunk_size,
            config.trunk_height * 0.5,
            origin.z + (u2 - 0.5) * config.chunk_size,
        ));
    }

    ChunkLayout {
        origin,
        tree_positions,
    }
}
