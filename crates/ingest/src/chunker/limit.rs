//! Hard ceiling on chunk length.

use ragchunk_core::config::HARD_LIMIT_OVERLAP;

use super::char_len;
use super::types::Fragment;

/// Slice `text` into windows of at most `max_chunk_chars` characters.
///
/// Text within the limit comes back unchanged as a single natural fragment.
/// Longer text is cut into windows whose starts advance by
/// `max_chunk_chars - HARD_LIMIT_OVERLAP`, so neighbours share 50 characters.
/// Windows that trim to nothing are dropped. Callers must pass a limit above
/// `HARD_LIMIT_OVERLAP`; `ChunkingConfig::validate` enforces this.
pub fn enforce_limit(text: &str, max_chunk_chars: usize) -> Vec<Fragment> {
    let total = char_len(text);
    if total <= max_chunk_chars {
        return vec![Fragment::natural(text)];
    }

    // Byte offset of every char, plus the end, so windows slice on boundaries.
    let mut offsets: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
    offsets.push(text.len());

    let stride = max_chunk_chars.saturating_sub(HARD_LIMIT_OVERLAP).max(1);
    (0..total)
        .step_by(stride)
        .filter_map(|start| {
            let end = (start + max_chunk_chars).min(total);
            let slice = text[offsets[start]..offsets[end]].trim();
            (!slice.is_empty()).then(|| Fragment::subchunk(slice))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_passes_through() {
        assert_eq!(enforce_limit("hello", 100), vec![Fragment::natural("hello")]);
    }

    #[test]
    fn text_at_limit_is_not_sliced() {
        let text = "a".repeat(100);
        let out = enforce_limit(&text, 100);
        assert_eq!(out.len(), 1);
        assert!(!out[0].is_subchunk);
    }

    #[test]
    fn slices_with_fixed_stride() {
        let text: String = (0..250).map(|i| char::from(b'a' + (i % 26) as u8)).collect();
        let out = enforce_limit(&text, 100);
        // Starts at 0, 50, 100, 150, 200.
        assert_eq!(out.len(), 5);
        assert!(out.iter().all(|f| f.is_subchunk));
        assert_eq!(out[0].text, &text[0..100]);
        assert_eq!(out[1].text, &text[50..150]);
        assert_eq!(out[4].text, &text[200..250]);
    }

    #[test]
    fn drops_blank_windows() {
        let text = format!("{}{}", "z".repeat(100), " ".repeat(60));
        let out = enforce_limit(&text, 100);
        // Window at 50 keeps "z" * 50; window at 100 is all spaces.
        assert_eq!(out.len(), 2);
        assert_eq!(out[1].text, "z".repeat(50));
    }

    #[test]
    fn counts_characters_not_bytes() {
        let text = "é".repeat(120);
        let out = enforce_limit(&text, 100);
        assert_eq!(out.len(), 3);
        assert!(out.iter().all(|f| f.text.chars().count() <= 100));
        assert_eq!(out[0].text.chars().count(), 100);
    }
}
