//! Root ocean configuration, loaded from JSON.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{TileGridParams, WaveFieldParams};

pub const BUILTIN_OCEAN_CONFIG: &str = include_str!("../data/ocean_config.json");

/// Everything the ocean core needs to start: wave spectrum and tile layout.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OceanConfig {
    pub waves: WaveFieldParams,
    pub tiles: TileGridParams,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse ocean config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to read ocean config from {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl OceanConfig {
    /// Parse the configuration embedded in the crate.
    pub fn builtin() -> Result<Self, ConfigError> {
        Self::from_json_str(BUILTIN_OCEAN_CONFIG)
    }

    /// Read and parse a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&contents)?;
        log::info!("loaded ocean config from {}", path.display());
        Ok(config)
    }

    /// Parse from a JSON string. Values are normalized, never rejected.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config.normalized())
    }

    pub fn normalized(self) -> Self {
        Self {
            waves: self.waves.normalized(),
            tiles: self.tiles.normalized(),
        }
    }
}
