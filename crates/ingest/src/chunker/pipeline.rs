//! Pipeline wiring: validate, split, merge, enforce the hard limit, assemble.

use rayon::prelude::*;
use tracing::debug;

use ragchunk_core::{Chunk, ChunkingConfig, ConfigError, Document, Metadata};

use super::assembler::assemble;
use super::limit::enforce_limit;
use super::merger::merge;
use super::splitter::split;
use super::types::DocumentChunks;

/// Chunk one document's text.
///
/// The config is validated before any work is done, so an invalid config
/// never produces partial output. Blank content yields an empty list.
pub fn chunk_document(
    content: &str,
    document_id: &str,
    config: &ChunkingConfig,
    metadata: &Metadata,
) -> Result<Vec<Chunk>, ConfigError> {
    config.validate()?;
    Ok(run(content, document_id, config, metadata))
}

/// Chunk a loaded [`Document`].
pub fn chunk(document: &Document, config: &ChunkingConfig) -> Result<Vec<Chunk>, ConfigError> {
    chunk_document(&document.content, &document.id, config, &document.metadata)
}

/// Chunk many documents in parallel, preserving input order.
///
/// Documents share nothing but the immutable config, so each one runs on its
/// own rayon task without locking.
pub fn chunk_documents(
    documents: &[Document],
    config: &ChunkingConfig,
) -> Result<Vec<DocumentChunks>, ConfigError> {
    config.validate()?;
    Ok(documents
        .par_iter()
        .map(|doc| DocumentChunks {
            document_id: doc.id.clone(),
            chunks: run(&doc.content, &doc.id, config, &doc.metadata),
        })
        .collect())
}

/// The pipeline proper. Assumes a validated config.
fn run(content: &str, document_id: &str, config: &ChunkingConfig, metadata: &Metadata) -> Vec<Chunk> {
    let natural = merge(split(content, config), config);
    let natural_count = natural.len();

    let fragments: Vec<_> = natural
        .iter()
        .flat_map(|text| enforce_limit(text, config.max_chunk_chars))
        .collect();

    let chunks = assemble(document_id, fragments, metadata);
    debug!(
        document_id,
        natural = natural_count,
        chunks = chunks.len(),
        "chunked document"
    );
    chunks
}
