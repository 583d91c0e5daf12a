use thiserror::Error;

/// Configuration problems, reported before any text is chunked.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("target_size must be greater than zero")]
    ZeroTargetSize,

    #[error("overlap ({overlap}) must be smaller than target_size ({target_size})")]
    OverlapTooLarge { overlap: usize, target_size: usize },

    #[error("max_chunk_chars ({max_chunk_chars}) must be at least {minimum}")]
    MaxChunkTooSmall {
        max_chunk_chars: usize,
        minimum: usize,
    },

    #[error("separators must contain at least one entry")]
    NoSeparators,
}
