use bevy::asset::io::Reader;
use bevy::asset::{AssetLoader, LoadContext};
use bevy::prelude::*;
use bevy::reflect::TypePath;

use crate::types::{ChunkPalette, ChunkPaletteFile};

#[derive(Asset, TypePath, Debug, Clone)]
pub struct ChunkPaletteAsset(pub ChunkPalette);

#[derive(Default)]
pub struct ChunkPaletteAssetLoader;

impl AssetLoader for ChunkPaletteAssetLoader {
    type Asset = ChunkPaletteAsset;
    type Settings = ();
    type Error = String;

    async fn load(
        &self,
        reader: &mut dyn Reader,
        _settings: &Self::Settings,
        _load_context: &mut LoadContext<'_>,
    ) -> Result<Self::Asset, Self::Error> {
        let mut bytes = Vec::new();
        reader
            .read_to_end(&mut bytes)
            .await
            .map_err(|e| format!("failed to read asset bytes: {e}"))?;

        let text = std::str::from_utf8(&bytes)
            .map_err(|e| format!("palette asset was not valid utf-8: {e}"))?;

        let parsed: ChunkPaletteFile =
            ron::from_str(text).map_err(|e| format!("failed to parse palette ron: {e}"))?;

        let palette = ChunkPalette {
            ground_srgb: parsed.ground_srgb,
            trunk_srgb: parsed.trunk_srgb,
        };
        palette.validate()?;

        Ok(ChunkPaletteAsset(palette))
    }

    fn extensions(&self) -> &[&str] {
        &["ron"]
    }
}
