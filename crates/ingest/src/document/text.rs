//! Plain-text and markdown decoding.

/// Decode file bytes as UTF-8, falling back to lossy conversion.
pub fn decode_text(bytes: &[u8]) -> String {
    String::from_utf8(bytes.to_vec()).unwrap_or_else(|_| String::from_utf8_lossy(bytes).into_owned())
}

/// First markdown heading of any level, without its `#` markers.
pub fn markdown_title(text: &str) -> Option<String> {
    text.lines()
        .map(str::trim_start)
        .filter(|line| line.starts_with('#'))
        .map(|line| line.trim_start_matches('#').trim().to_string())
        .find(|title| !title.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_utf8_text() {
        assert_eq!(decode_text("Ünïcödé ✓".as_bytes()), "Ünïcödé ✓");
    }

    #[test]
    fn invalid_utf8_is_replaced() {
        let text = decode_text(&[b'o', b'k', 0xFF, b'!']);
        assert_eq!(text, "ok\u{FFFD}!");
    }

    #[test]
    fn empty_bytes_decode_to_empty_text() {
        assert_eq!(decode_text(b""), "");
    }

    #[test]
    fn finds_first_heading() {
        let text = "intro line\n\n## Setup\n\nbody\n\n# Later";
        assert_eq!(markdown_title(text).as_deref(), Some("Setup"));
    }

    #[test]
    fn skips_empty_headings() {
        assert_eq!(markdown_title("#\n### Real\n").as_deref(), Some("Real"));
        assert_eq!(markdown_title("no headings here"), None);
    }
}
