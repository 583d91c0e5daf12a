//! Character-based chunking engine.
//!
//! Turns raw document text into overlapping, metadata-tagged chunks suitable
//! for embedding. The pipeline is split, merge, enforce the hard limit, then
//! assemble; each stage is a pure function of its inputs.

mod assembler;
mod limit;
mod merger;
mod pipeline;
mod splitter;
mod types;

pub use assembler::assemble;
pub use limit::enforce_limit;
pub use merger::merge;
pub use pipeline::{chunk, chunk_document, chunk_documents};
pub use splitter::split;
pub use types::{DocumentChunks, Fragment};

/// Length of `text` in characters, the unit every size in the config uses.
pub(crate) fn char_len(text: &str) -> usize {
    text.chars().count()
}
