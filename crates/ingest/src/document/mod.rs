//! Document loading: a directory of text files or a JSON document list.

mod text;

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{info, warn};

use ragchunk_core::{Document, Metadata, MetadataValue};

pub use text::{decode_text, markdown_title};

/// Extensions picked up by [`load_directory`] when the caller has no preference.
pub const DEFAULT_EXTENSIONS: &[&str] = &["md", "txt", "rst"];

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Directory does not exist: {0}")]
    MissingDirectory(PathBuf),
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Unsupported JSON format: {0}")]
    UnsupportedFormat(String),
    #[error("Document {document}: metadata key '{key}' must be a string, integer or boolean")]
    UnsupportedMetadata { document: String, key: String },
}

// ── Directory ───────────────────────────────────────────────────────────────

/// Load every file directly inside `dir` whose extension is in `extensions`.
///
/// Files are grouped by extension in the given order and sorted by path within
/// each group. The file name becomes the document id. Unreadable files are
/// logged and skipped.
pub fn load_directory(dir: &Path, extensions: &[&str]) -> Result<Vec<Document>, LoadError> {
    if !dir.is_dir() {
        return Err(LoadError::MissingDirectory(dir.to_path_buf()));
    }

    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .collect();
    files.sort();

    let mut documents = Vec::new();
    for ext in extensions {
        let ext = ext.trim_start_matches('.');
        for path in files.iter().filter(|p| has_extension(p, ext)) {
            match read_document(path, ext) {
                Ok(doc) => documents.push(doc),
                Err(e) => warn!(error = %e, "skipping unreadable file"),
            }
        }
    }

    info!(dir = %dir.display(), count = documents.len(), "loaded documents");
    Ok(documents)
}

fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case(ext))
        .unwrap_or(false)
}

fn read_document(path: &Path, ext: &str) -> Result<Document, LoadError> {
    let io_err = |source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    };
    let bytes = std::fs::read(path).map_err(io_err)?;
    let content = decode_text(&bytes);

    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut metadata = Metadata::new();
    metadata.insert("filename".into(), filename.clone().into());
    metadata.insert("file_path".into(), path.display().to_string().into());
    metadata.insert("file_size".into(), bytes.len().into());
    metadata.insert("extension".into(), ext.to_lowercase().into());
    if ext.eq_ignore_ascii_case("md") {
        if let Some(title) = markdown_title(&content) {
            metadata.insert("title".into(), title.into());
        }
    }

    Ok(Document {
        id: filename,
        content,
        metadata,
    })
}

// ── JSON ────────────────────────────────────────────────────────────────────

/// Load documents from a JSON file holding an array of objects.
pub fn load_json(path: &Path) -> Result<Vec<Document>, LoadError> {
    let raw = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let documents = parse_json_documents(&raw)?;
    info!(path = %path.display(), count = documents.len(), "loaded documents");
    Ok(documents)
}

/// Parse a JSON array of `{id|document_id, content|text, metadata}` objects.
///
/// A missing id becomes `doc_{position}`; missing content becomes empty text.
pub fn parse_json_documents(raw: &str) -> Result<Vec<Document>, LoadError> {
    let value: serde_json::Value = serde_json::from_str(raw)?;
    let items = match value {
        serde_json::Value::Array(items) => items,
        other => return Err(LoadError::UnsupportedFormat(json_kind(&other).to_string())),
    };

    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let obj = item.as_object().ok_or_else(|| {
                LoadError::UnsupportedFormat(format!("item {i} is {}", json_kind(item)))
            })?;

            let id = ["id", "document_id"]
                .iter()
                .find_map(|key| obj.get(*key).and_then(scalar_to_string))
                .unwrap_or_else(|| format!("doc_{i}"));

            let content = ["content", "text"]
                .iter()
                .find_map(|key| obj.get(*key).and_then(|v| v.as_str()))
                .unwrap_or_default()
                .to_string();

            let mut metadata = Metadata::new();
            if let Some(meta) = obj.get("metadata").and_then(|m| m.as_object()) {
                for (key, value) in meta {
                    let converted = to_metadata_value(value).ok_or_else(|| {
                        LoadError::UnsupportedMetadata {
                            document: id.clone(),
                            key: key.clone(),
                        }
                    })?;
                    metadata.insert(key.clone(), converted);
                }
            }

            Ok(Document {
                id,
                content,
                metadata,
            })
        })
        .collect()
}

fn scalar_to_string(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn to_metadata_value(value: &serde_json::Value) -> Option<MetadataValue> {
    match value {
        serde_json::Value::String(s) => Some(MetadataValue::Text(s.clone())),
        serde_json::Value::Bool(b) => Some(MetadataValue::Boolean(*b)),
        serde_json::Value::Number(n) => n.as_i64().map(MetadataValue::Integer),
        _ => None,
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_documents_with_fallback_keys() {
        let raw = r#"[
            { "id": "a", "content": "alpha", "metadata": { "lang": "en", "page": 2, "draft": true } },
            { "document_id": "b", "text": "beta" },
            { "content": "gamma" }
        ]"#;
        let docs = parse_json_documents(raw).unwrap();
        assert_eq!(docs.len(), 3);
        assert_eq!(docs[0].id, "a");
        assert_eq!(docs[0].metadata["page"], MetadataValue::Integer(2));
        assert_eq!(docs[0].metadata["draft"], MetadataValue::Boolean(true));
        assert_eq!(docs[1].id, "b");
        assert_eq!(docs[1].content, "beta");
        assert_eq!(docs[2].id, "doc_2");
        assert!(docs[2].metadata.is_empty());
    }

    #[test]
    fn missing_content_becomes_empty() {
        let docs = parse_json_documents(r#"[{ "id": 7 }]"#).unwrap();
        assert_eq!(docs[0].id, "7");
        assert_eq!(docs[0].content, "");
    }

    #[test]
    fn rejects_non_array_top_level() {
        let err = parse_json_documents(r#"{ "id": "a" }"#).unwrap_err();
        assert!(matches!(err, LoadError::UnsupportedFormat(ref k) if k == "an object"));
    }

    #[test]
    fn rejects_nested_metadata() {
        let err =
            parse_json_documents(r#"[{ "id": "a", "metadata": { "tags": ["x"] } }]"#).unwrap_err();
        assert!(matches!(
            err,
            LoadError::UnsupportedMetadata { ref document, ref key } if document == "a" && key == "tags"
        ));
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(
            parse_json_documents("[{"),
            Err(LoadError::Json(_))
        ));
    }
}
