pub mod assets;
pub mod layout;
pub mod render;
pub mod types;

pub use layout::*;
pub use types::*;

use bevy::prelude::*;

pub struct ChunkGenPlugin {
    pub config: types::ChunkConfig,
}

impl Plugin for ChunkGenPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(self.config.clone())
            .init_resource::<types::PendingChunks>()
            .init_resource::<types::SpawnedChunks>()
            .init_asset::<assets::ChunkPaletteAsset>()
            .init_asset_loader::<assets::ChunkPaletteAssetLoader>()
            .add_systems(Startup, render::setup_chunk_renderer)
            .add_systems(
                Update,
                (render::finish_palette_load, render::spawn_pending_chunks),
            );
    }
}
