use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use ragchunk_core::ChunkingConfig;

use crate::cli::ChunkingOverrides;

/// CLI configuration loaded from TOML file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Chunking parameters; missing keys fall back to built-in defaults.
    #[serde(default)]
    pub chunking: ChunkingConfig,
}

impl CliConfig {
    /// Return the default config file path: ~/.config/ragchunk/config.toml
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("could not determine user config directory")?
            .join("ragchunk");
        Ok(config_dir.join("config.toml"))
    }

    /// Load config from the given path, or the default path.
    /// Returns default config if the file does not exist.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::default_config_path()?,
        };

        if !config_path.exists() {
            debug!(?config_path, "Config file not found, using defaults");
            return Ok(Self::default());
        }

        debug!(?config_path, "Loading config");
        let content = std::fs::read_to_string(&config_path)
            .with_context(|| format!("failed to read config: {}", config_path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("failed to parse config: {}", config_path.display()))
    }

    /// Resolve the effective chunking config.
    /// Priority: cli flag > env var > config file > built-in default.
    pub fn resolve_chunking(&self, overrides: &ChunkingOverrides) -> ChunkingConfig {
        let mut chunking = self.chunking.clone().with_env_overrides();
        apply_overrides(&mut chunking, overrides);
        chunking
    }
}

fn apply_overrides(chunking: &mut ChunkingConfig, overrides: &ChunkingOverrides) {
    if let Some(v) = overrides.target_size {
        chunking.target_size = v;
    }
    if let Some(v) = overrides.overlap {
        chunking.overlap = v;
    }
    if let Some(v) = overrides.max_chunk_chars {
        chunking.max_chunk_chars = v;
    }
    if let Some(v) = overrides.min_chunk_length {
        chunking.min_chunk_length = v;
    }
}
