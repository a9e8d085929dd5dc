use bevy::prelude::*;
use glam::IVec2;
use serde::Deserialize;
use std::collections::{HashMap, VecDeque};

// --- Config ---

#[derive(Resource, Clone, Debug)]
pub struct ChunkConfig {
    /// Side length of a chunk in world units. Trees scatter across the
    /// same span, so terrain extent and scatter range never disagree.
    pub chunk_size: f32,
    pub tree_count: usize,
    pub trunk_radius: f32,
    pub trunk_height: f32,
    /// Radial segments of the trunk cylinder.
    pub trunk_resolution: u32,
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self {
            chunk_size: 20.0,
            tree_count: 5,
            trunk_radius: 0.2,
            trunk_height: 2.0,
            trunk_resolution: 8,
        }
    }
}

// --- Palette ---

#[derive(Clone, Debug, Deserialize)]
pub struct ChunkPaletteFile {
    pub ground_srgb: (f32, f32, f32),
    pub trunk_srgb: (f32, f32, f32),
}

#[derive(Clone, Debug)]
pub struct ChunkPalette {
    pub ground_srgb: (f32, f32, f32),
    pub trunk_srgb: (f32, f32, f32),
}

impl ChunkPalette {
    pub fn validate(&self) -> Result<(), String> {
        validate_color("ground", self.ground_srgb)?;
        validate_color("trunk", self.trunk_srgb)?;
        Ok(())
    }
}

fn validate_color(name: &str, (r, g, b): (f32, f32, f32)) -> Result<(), String> {
    for channel in [r, g, b] {
        if !channel.is_finite() {
            return Err(format!("palette color '{name}' has a non-finite channel"));
        }
        if !(0.0..=1.0).contains(&channel) {
            return Err(format!(
                "palette color '{name}' has channel {channel} outside 0..=1"
            ));
        }
    }
    Ok(())
}

// --- Components ---

/// Marks the group entity of one generated chunk.
#[derive(Component, Clone, Copy, Debug)]
pub struct Chunk(pub IVec2);

// --- Resources ---

#[derive(Resource)]
pub struct ChunkMaterials {
    pub ground: Handle<StandardMaterial>,
    pub trunk: Handle<StandardMaterial>,
}

/// Chunk coordinates the caller wants generated. Drained once the
/// palette materials are ready.
#[derive(Resource, Default)]
pub struct PendingChunks {
    pub coords: VecDeque<IVec2>,
}

/// Group entities handed back to the caller, by chunk coordinate.
/// Bookkeeping only; this crate never despawns a chunk.
#[derive(Resource, Default)]
pub struct SpawnedChunks {
    pub entities: HashMap<IVec2, Entity>,
}
