//! Coalescing of undersized neighbours.

use ragchunk_core::ChunkingConfig;

use super::char_len;

/// Joiner placed between merged chunks.
const PARAGRAPH_BREAK: &str = "\n\n";

/// Merge adjacent chunks while their combined length stays within `target_size`.
///
/// The joiner is not counted against the budget and `overlap` plays no part,
/// so a merged chunk can run slightly past `target_size`.
pub fn merge(chunks: Vec<String>, config: &ChunkingConfig) -> Vec<String> {
    let mut merged = Vec::with_capacity(chunks.len());
    let mut current = String::new();
    let mut current_len = 0usize;

    for chunk in chunks {
        let chunk_len = char_len(&chunk);
        if current_len + chunk_len <= config.target_size {
            if current.is_empty() {
                current = chunk;
            } else {
                current = format!("{current}{PARAGRAPH_BREAK}{chunk}").trim().to_string();
            }
            current_len = char_len(&current);
        } else {
            if !current.is_empty() {
                merged.push(std::mem::take(&mut current));
            }
            current = chunk;
            current_len = chunk_len;
        }
    }

    if !current.is_empty() {
        merged.push(current);
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(target_size: usize) -> ChunkingConfig {
        ChunkingConfig {
            target_size,
            overlap: 0,
            ..Default::default()
        }
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn merges_small_neighbours() {
        let out = merge(strings(&["one", "two", "three"]), &config(100));
        assert_eq!(out, vec!["one\n\ntwo\n\nthree"]);
    }

    #[test]
    fn flushes_when_budget_exceeded() {
        let out = merge(strings(&["aaaa", "bbbb", "cc"]), &config(8));
        // "aaaa"+"bbbb" = 8 fits (joiner not counted); adding "cc" does not.
        assert_eq!(out, vec!["aaaa\n\nbbbb", "cc"]);
    }

    #[test]
    fn oversized_chunk_stands_alone() {
        let big = "x".repeat(20);
        let out = merge(strings(&["a", &big, "b"]), &config(10));
        assert_eq!(out, vec!["a".to_string(), big, "b".to_string()]);
    }

    #[test]
    fn empty_input_yields_nothing() {
        assert!(merge(Vec::new(), &config(10)).is_empty());
    }
}
