//! Caller-side policies applied to finished chunks before submission.
//!
//! None of this changes chunk metadata: indices and totals assigned by the
//! chunker are final even when short chunks are filtered out here.

use serde::Serialize;
use thiserror::Error;

use ragchunk_core::Chunk;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BatchError {
    #[error("batch size must be greater than zero")]
    ZeroBatchSize,
}

/// Drop chunks whose trimmed content is shorter than `min_length` characters.
pub fn retain_min_length(chunks: Vec<Chunk>, min_length: usize) -> Vec<Chunk> {
    if min_length == 0 {
        return chunks;
    }
    chunks
        .into_iter()
        .filter(|c| c.content.trim().chars().count() >= min_length)
        .collect()
}

/// Group chunks into consecutive batches of at most `size`, one insert call each.
pub fn batches(chunks: &[Chunk], size: usize) -> Result<std::slice::Chunks<'_, Chunk>, BatchError> {
    if size == 0 {
        return Err(BatchError::ZeroBatchSize);
    }
    Ok(chunks.chunks(size))
}

/// Content-length summary over a set of chunks, in characters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChunkStats {
    pub count: usize,
    pub average: usize,
    pub min: usize,
    pub max: usize,
}

impl ChunkStats {
    pub fn from_chunks<'a>(chunks: impl IntoIterator<Item = &'a Chunk>) -> Self {
        let sizes: Vec<usize> = chunks.into_iter().map(Chunk::char_len).collect();
        if sizes.is_empty() {
            return Self::default();
        }
        Self {
            count: sizes.len(),
            average: sizes.iter().sum::<usize>() / sizes.len(),
            min: sizes.iter().copied().min().unwrap_or(0),
            max: sizes.iter().copied().max().unwrap_or(0),
        }
    }
}
