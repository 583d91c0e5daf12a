use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Caller-supplied and chunker-assigned metadata, ordered for stable output.
pub type Metadata = BTreeMap<String, MetadataValue>;

/// Metadata keys owned by the chunker. They always win over caller metadata.
pub const KEY_SOURCE: &str = "source";
pub const KEY_CHUNK_INDEX: &str = "chunk_index";
pub const KEY_TOTAL_CHUNKS: &str = "total_chunks";
pub const KEY_IS_SUBCHUNK: &str = "is_subchunk";

pub const RESERVED_KEYS: &[&str] = &[KEY_SOURCE, KEY_CHUNK_INDEX, KEY_TOTAL_CHUNKS, KEY_IS_SUBCHUNK];

/// A document loaded in full before chunking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Unique within a batch; becomes the `source` of every chunk.
    pub id: String,
    pub content: String,
    #[serde(default)]
    pub metadata: Metadata,
}

impl Document {
    pub fn new(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            metadata: Metadata::new(),
        }
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<MetadataValue>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

/// Typed metadata values. Serialized untagged so JSON carries plain values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetadataValue {
    Boolean(bool),
    Integer(i64),
    Text(String),
}

impl MetadataValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            MetadataValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            MetadataValue::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            MetadataValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }
}

impl fmt::Display for MetadataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetadataValue::Boolean(b) => write!(f, "{b}"),
            MetadataValue::Integer(n) => write!(f, "{n}"),
            MetadataValue::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<&str> for MetadataValue {
    fn from(value: &str) -> Self {
        MetadataValue::Text(value.to_string())
    }
}

impl From<String> for MetadataValue {
    fn from(value: String) -> Self {
        MetadataValue::Text(value)
    }
}

impl From<i64> for MetadataValue {
    fn from(value: i64) -> Self {
        MetadataValue::Integer(value)
    }
}

impl From<usize> for MetadataValue {
    fn from(value: usize) -> Self {
        MetadataValue::Integer(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

impl From<bool> for MetadataValue {
    fn from(value: bool) -> Self {
        MetadataValue::Boolean(value)
    }
}

/// One embeddable fragment of a document, ready for a vector-store insert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    /// `{document_id}_chunk_{chunk_index}`.
    pub chunk_id: String,
    /// Trimmed, never empty, never longer than the configured hard limit.
    pub content: String,
    pub metadata: Metadata,
}

impl Chunk {
    pub fn source(&self) -> Option<&str> {
        self.metadata.get(KEY_SOURCE).and_then(MetadataValue::as_str)
    }

    pub fn chunk_index(&self) -> Option<usize> {
        self.metadata
            .get(KEY_CHUNK_INDEX)
            .and_then(MetadataValue::as_i64)
            .and_then(|n| usize::try_from(n).ok())
    }

    pub fn total_chunks(&self) -> Option<usize> {
        self.metadata
            .get(KEY_TOTAL_CHUNKS)
            .and_then(MetadataValue::as_i64)
            .and_then(|n| usize::try_from(n).ok())
    }

    /// True only for slices produced by the hard-limit sub-splitter.
    pub fn is_subchunk(&self) -> bool {
        self.metadata
            .get(KEY_IS_SUBCHUNK)
            .and_then(MetadataValue::as_bool)
            .unwrap_or(false)
    }

    /// Content length in characters.
    pub fn char_len(&self) -> usize {
        self.content.chars().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metadata_serializes_as_plain_json_values() {
        let doc = Document::new("a.md", "text")
            .with_metadata("filename", "a.md")
            .with_metadata("file_size", 42_i64)
            .with_metadata("draft", true);
        let json = serde_json::to_value(&doc.metadata).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "draft": true, "file_size": 42, "filename": "a.md" })
        );
    }

    #[test]
    fn metadata_deserializes_untagged() {
        let meta: Metadata =
            serde_json::from_str(r#"{ "lang": "es", "pages": 3, "public": false }"#).unwrap();
        assert_eq!(meta["lang"], MetadataValue::Text("es".into()));
        assert_eq!(meta["pages"], MetadataValue::Integer(3));
        assert_eq!(meta["public"], MetadataValue::Boolean(false));
    }

    #[test]
    fn chunk_accessors_read_reserved_keys() {
        let mut metadata = Metadata::new();
        metadata.insert(KEY_SOURCE.into(), "doc".into());
        metadata.insert(KEY_CHUNK_INDEX.into(), 2_usize.into());
        metadata.insert(KEY_TOTAL_CHUNKS.into(), 5_usize.into());
        let chunk = Chunk {
            chunk_id: "doc_chunk_2".into(),
            content: "héllo".into(),
            metadata,
        };
        assert_eq!(chunk.source(), Some("doc"));
        assert_eq!(chunk.chunk_index(), Some(2));
        assert_eq!(chunk.total_chunks(), Some(5));
        assert!(!chunk.is_subchunk());
        assert_eq!(chunk.char_len(), 5);
    }

    #[test]
    fn document_metadata_defaults_to_empty() {
        let doc: Document = serde_json::from_str(r#"{ "id": "x", "content": "y" }"#).unwrap();
        assert!(doc.metadata.is_empty());
    }
}
