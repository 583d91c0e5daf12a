//! Separator-driven splitting with carried-over context.

use ragchunk_core::ChunkingConfig;

use super::char_len;

/// Split `text` into pieces of roughly `target_size` characters.
///
/// The first separator that occurs in the text (or the empty separator, which
/// always matches) decides where cuts may fall. Pieces are accumulated
/// greedily; each closed chunk hands its trailing pieces, up to `overlap`
/// characters, to the next one. A single piece longer than `target_size` is
/// emitted as-is: the hard limit is enforced later.
pub fn split(text: &str, config: &ChunkingConfig) -> Vec<String> {
    if text.trim().is_empty() {
        return Vec::new();
    }
    if char_len(text) <= config.target_size {
        return vec![text.trim().to_string()];
    }

    let separator = choose_separator(text, &config.separators);
    let sep_len = char_len(separator);

    let mut chunks = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut current_len = 0usize;

    for piece in split_pieces(text, separator) {
        let piece_len = char_len(piece) + sep_len;

        if current_len + piece_len > config.target_size && !current.is_empty() {
            push_joined(&mut chunks, &current, separator);

            let (keep_from, carried) = overlap_tail(&current, sep_len, config.overlap);
            current.drain(..keep_from);
            current_len = carried;
        }

        current.push(piece);
        current_len += piece_len;
    }

    if !current.is_empty() {
        push_joined(&mut chunks, &current, separator);
    }

    chunks
}

/// First separator that is empty or present in `text`; the last entry when
/// none match.
fn choose_separator<'a>(text: &str, separators: &'a [String]) -> &'a str {
    separators
        .iter()
        .find(|sep| sep.is_empty() || text.contains(sep.as_str()))
        .or_else(|| separators.last())
        .map(String::as_str)
        .unwrap_or("")
}

/// Split on `separator`, or into single characters when it is empty.
fn split_pieces<'t>(text: &'t str, separator: &str) -> Vec<&'t str> {
    if separator.is_empty() {
        text.char_indices()
            .map(|(i, c)| &text[i..i + c.len_utf8()])
            .collect()
    } else {
        text.split(separator).collect()
    }
}

fn push_joined(chunks: &mut Vec<String>, pieces: &[&str], separator: &str) {
    let joined = pieces.join(separator);
    let trimmed = joined.trim();
    if !trimmed.is_empty() {
        chunks.push(trimmed.to_string());
    }
}

/// Walk `pieces` backward and find where the carried tail starts.
///
/// Returns the index of the first carried piece and the accumulated length
/// (each carried piece counts its own length plus one separator). The joined
/// tail never exceeds `overlap` characters.
fn overlap_tail(pieces: &[&str], sep_len: usize, overlap: usize) -> (usize, usize) {
    let mut start = pieces.len();
    let mut carried = 0usize;
    for piece in pieces.iter().rev() {
        let len = char_len(piece);
        if carried + len > overlap {
            break;
        }
        carried += len + sep_len;
        start -= 1;
    }
    (start, carried)
}
