use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use ragchunk_core::Chunk;
use ragchunk_ingest::batches;

/// Open the output file, or stdout when no path is given.
pub fn open(path: Option<&Path>) -> Result<Box<dyn Write>> {
    match path {
        Some(p) => {
            let file = File::create(p)
                .with_context(|| format!("failed to create output: {}", p.display()))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(BufWriter::new(io::stdout().lock()))),
    }
}

/// Write one chunk per line, or one JSON array per batch when `batch_size` is set.
/// Returns the number of lines written.
pub fn write_jsonl(out: &mut dyn Write, chunks: &[Chunk], batch_size: Option<usize>) -> Result<usize> {
    let mut lines = 0;
    match batch_size {
        Some(size) => {
            for batch in batches(chunks, size)? {
                serde_json::to_writer(&mut *out, batch).context("failed to serialize batch")?;
                out.write_all(b"\n")?;
                lines += 1;
            }
        }
        None => {
            for chunk in chunks {
                serde_json::to_writer(&mut *out, chunk).context("failed to serialize chunk")?;
                out.write_all(b"\n")?;
                lines += 1;
            }
        }
    }
    out.flush().context("failed to flush output")?;
    Ok(lines)
}
