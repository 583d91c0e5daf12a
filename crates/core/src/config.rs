use std::env;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Fixed overlap between hard-limit sub-chunks, independent of `overlap`.
pub const HARD_LIMIT_OVERLAP: usize = 50;

/// Separators tried in order: paragraph, line, sentence, word, character.
pub const DEFAULT_SEPARATORS: &[&str] = &["\n\n", "\n", ". ", " ", ""];

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

/// Read a profiled env var: tries {PROFILE}_{KEY} first, falls back to {KEY}.
fn profiled_env_opt(profile: &str, key: &str) -> Option<String> {
    if !profile.is_empty() {
        let prefixed = format!("{}_{}", profile, key);
        if let Some(v) = env_opt(&prefixed) {
            return Some(v);
        }
    }
    env_opt(key)
}

fn profiled_env_usize(profile: &str, key: &str) -> Option<usize> {
    let raw = profiled_env_opt(profile, key)?;
    match raw.trim().parse() {
        Ok(v) => Some(v),
        Err(_) => {
            tracing::warn!(key, value = %raw, "ignoring non-numeric env value");
            None
        }
    }
}

// ── Chunking ──────────────────────────────────────────────────

/// Everything the chunker needs, passed explicitly into every call.
///
/// All lengths are measured in characters (Unicode scalar values), used as a
/// cheap, model-agnostic proxy for tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkingConfig {
    /// Nominal chunk size the splitter aims for.
    pub target_size: usize,
    /// Characters of trailing context repeated at the start of the next chunk.
    pub overlap: usize,
    /// Natural split points in priority order. `""` splits per character.
    pub separators: Vec<String>,
    /// Absolute ceiling on emitted chunk length.
    pub max_chunk_chars: usize,
    /// Callers drop chunks shorter than this; the chunker itself ignores it.
    pub min_chunk_length: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            target_size: 1000,
            overlap: 200,
            separators: DEFAULT_SEPARATORS.iter().map(|s| s.to_string()).collect(),
            // 512-token embedding models at roughly 2-3 chars per token.
            max_chunk_chars: 450,
            min_chunk_length: 0,
        }
    }
}

impl ChunkingConfig {
    /// Reject configurations the pipeline cannot honour.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.target_size == 0 {
            return Err(ConfigError::ZeroTargetSize);
        }
        if self.overlap >= self.target_size {
            return Err(ConfigError::OverlapTooLarge {
                overlap: self.overlap,
                target_size: self.target_size,
            });
        }
        if self.max_chunk_chars <= HARD_LIMIT_OVERLAP {
            return Err(ConfigError::MaxChunkTooSmall {
                max_chunk_chars: self.max_chunk_chars,
                minimum: HARD_LIMIT_OVERLAP + 1,
            });
        }
        if self.separators.is_empty() {
            return Err(ConfigError::NoSeparators);
        }
        Ok(())
    }

    /// Overlay environment overrides onto `self` (call `load_dotenv()` first).
    ///
    /// Profile is read from `RAGCHUNK_PROFILE`. When set (e.g. `PROD`), every
    /// key is first looked up as `{PROFILE}_{KEY}`, falling back to `{KEY}`.
    pub fn with_env_overrides(self) -> Self {
        let profile = env_or("RAGCHUNK_PROFILE", "").to_uppercase();
        self.with_profile_overrides(&profile)
    }

    /// Overlay environment overrides for a specific named profile.
    pub fn with_profile_overrides(mut self, profile: &str) -> Self {
        let p = profile.to_uppercase();
        let p = p.as_str();
        if let Some(v) = profiled_env_usize(p, "CHUNK_SIZE") {
            self.target_size = v;
        }
        if let Some(v) = profiled_env_usize(p, "CHUNK_OVERLAP") {
            self.overlap = v;
        }
        if let Some(v) = profiled_env_usize(p, "MAX_CHUNK_CHARS") {
            self.max_chunk_chars = v;
        }
        if let Some(v) = profiled_env_usize(p, "MIN_CHUNK_LENGTH") {
            self.min_chunk_length = v;
        }
        self
    }

    /// Print a summary for startup logs.
    pub fn log_summary(&self) {
        tracing::info!("Chunking config:");
        tracing::info!("  target_size:      {} chars", self.target_size);
        tracing::info!("  overlap:          {} chars", self.overlap);
        tracing::info!("  max_chunk_chars:  {} (hard limit)", self.max_chunk_chars);
        tracing::info!("  min_chunk_length: {}", self.min_chunk_length);
        tracing::info!("  separators:       {:?}", self.separators);
    }
}
