//! Document ingestion: loading, chunking and batching ahead of a vector-store insert.

pub mod batch;
pub mod chunker;
pub mod document;

pub use batch::{batches, retain_min_length, BatchError, ChunkStats};
pub use chunker::{chunk, chunk_document, chunk_documents, DocumentChunks};
pub use document::{load_directory, load_json, LoadError, DEFAULT_EXTENSIONS};
