use std::path::{Path, PathBuf};

use anyhow::Context;
use log::LevelFilter;
use serde::{Deserialize, Serialize};

use crate::gui::tile_dialog::DEFAULT_THUMB_SIZE;

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Edge length of tile thumbnails in the tile list
    pub thumb_size: f32,
    /// Tile size used when slicing bitmaps
    pub tile_size: [u32;2],
    pub log_level: LevelFilter,
    /// Start directory of the file pickers
    pub last_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            thumb_size: DEFAULT_THUMB_SIZE,
            tile_size: [16,16],
            log_level: LevelFilter::Info,
            last_dir: None,
        }
    }
}

impl Config {
    /// Defaults if the file doesn't exist
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.is_file() {
            return Ok(Self::default());
        }
        let data = std::fs::read(path)
            .with_context(|| format!("Failed to read config {}", path.display()) )?;
        let mut config = serde_json::from_slice::<Self>(&data)
            .with_context(|| format!("Failed to parse config {}", path.display()) )?;
        config.thumb_size = config.thumb_size.clamp(8., 128.);
        config.tile_size = config.tile_size.map(|v| v.max(1) );
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let ser = serde_json::to_vec_pretty(self)?;
        std::fs::write(path, ser)
            .with_context(|| format!("Failed to write config {}", path.display()) )?;
        Ok(())
    }
}
