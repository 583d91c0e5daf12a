//! Intermediate and batch output types.

use serde::{Deserialize, Serialize};

use ragchunk_core::Chunk;

// ── Fragment ────────────────────────────────────────────────────────────────

/// A chunk's text after the hard limit, before identity metadata is attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub text: String,
    /// Set when the text is one slice of an oversized natural chunk.
    pub is_subchunk: bool,
}

impl Fragment {
    pub fn natural(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_subchunk: false,
        }
    }

    pub fn subchunk(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_subchunk: true,
        }
    }
}

// ── Batch output ────────────────────────────────────────────────────────────

/// All chunks produced for one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentChunks {
    pub document_id: String,
    pub chunks: Vec<Chunk>,
}
