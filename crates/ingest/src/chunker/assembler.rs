//! Identity and positional metadata for finished fragments.

use ragchunk_core::document::{KEY_CHUNK_INDEX, KEY_IS_SUBCHUNK, KEY_SOURCE, KEY_TOTAL_CHUNKS};
use ragchunk_core::{Chunk, Metadata, MetadataValue};

use super::types::Fragment;

/// Build the final chunk records for one document.
///
/// Caller metadata is copied into every chunk, then overlaid with the
/// reserved keys, which always win. `total_chunks` is written in a second
/// pass once the full count is known.
pub fn assemble(document_id: &str, fragments: Vec<Fragment>, base_metadata: &Metadata) -> Vec<Chunk> {
    let mut chunks: Vec<Chunk> = fragments
        .into_iter()
        .enumerate()
        .map(|(index, fragment)| {
            let mut metadata = base_metadata.clone();
            // Caller-supplied reserved keys must not leak through.
            metadata.remove(KEY_IS_SUBCHUNK);
            metadata.remove(KEY_TOTAL_CHUNKS);
            metadata.insert(KEY_SOURCE.to_string(), MetadataValue::from(document_id));
            metadata.insert(KEY_CHUNK_INDEX.to_string(), MetadataValue::from(index));
            if fragment.is_subchunk {
                metadata.insert(KEY_IS_SUBCHUNK.to_string(), MetadataValue::Boolean(true));
            }
            Chunk {
                chunk_id: format!("{document_id}_chunk_{index}"),
                content: fragment.text,
                metadata,
            }
        })
        .collect();

    let total = MetadataValue::from(chunks.len());
    for chunk in &mut chunks {
        chunk
            .metadata
            .insert(KEY_TOTAL_CHUNKS.to_string(), total.clone());
    }
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_chunks_and_sets_totals() {
        let fragments = vec![
            Fragment::natural("first"),
            Fragment::subchunk("second"),
            Fragment::subchunk("third"),
        ];
        let chunks = assemble("guide.md", fragments, &Metadata::new());

        assert_eq!(chunks.len(), 3);
        for (i, chunk) in chunks.iter().enumerate() {
            assert_eq!(chunk.chunk_id, format!("guide.md_chunk_{i}"));
            assert_eq!(chunk.chunk_index(), Some(i));
            assert_eq!(chunk.total_chunks(), Some(3));
            assert_eq!(chunk.source(), Some("guide.md"));
        }
        assert!(!chunks[0].is_subchunk());
        assert!(!chunks[0].metadata.contains_key(KEY_IS_SUBCHUNK));
        assert!(chunks[1].is_subchunk());
        assert!(chunks[2].is_subchunk());
    }

    #[test]
    fn reserved_keys_override_caller_metadata() {
        let mut base = Metadata::new();
        base.insert("source".into(), "spoofed".into());
        base.insert("chunk_index".into(), 99_i64.into());
        base.insert("total_chunks".into(), 99_i64.into());
        base.insert("is_subchunk".into(), true.into());
        base.insert("lang".into(), "en".into());

        let chunks = assemble("doc", vec![Fragment::natural("text")], &base);
        let chunk = &chunks[0];
        assert_eq!(chunk.source(), Some("doc"));
        assert_eq!(chunk.chunk_index(), Some(0));
        assert_eq!(chunk.total_chunks(), Some(1));
        assert!(!chunk.is_subchunk());
        assert_eq!(chunk.metadata["lang"], MetadataValue::from("en"));
    }

    #[test]
    fn no_fragments_no_chunks() {
        assert!(assemble("doc", Vec::new(), &Metadata::new()).is_empty());
    }
}
