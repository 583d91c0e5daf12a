use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Local document chunker for vector-store ingestion.
///
/// Loads documents from a directory or a JSON file, splits them into
/// overlapping, size-bounded chunks and writes them as JSON Lines for a
/// separate upload step.
#[derive(Parser, Debug)]
#[command(name = "ragchunk", version, about)]
pub struct CliArgs {
    /// Path to config file (default: ~/.config/ragchunk/config.toml)
    #[arg(long, global = true, env = "RAGCHUNK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log progress at info level (RUST_LOG still wins when set)
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Chunk documents and write them as JSON Lines
    Chunk {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        overrides: ChunkingOverrides,

        /// Output file (default: stdout)
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Emit one JSON array of up to N chunks per line instead of one chunk per line
        #[arg(long)]
        batch_size: Option<usize>,
    },
    /// Print chunk statistics without writing chunks
    Stats {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        overrides: ChunkingOverrides,
    },
    /// Print the effective chunking config as TOML
    Config {
        #[command(flatten)]
        overrides: ChunkingOverrides,
    },
}

/// Where documents come from, plus loader options.
#[derive(Args, Debug)]
pub struct InputArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// File extensions to load from --dir (repeatable)
    #[arg(long = "ext", requires = "dir")]
    pub extensions: Vec<String>,
}

/// Exactly one document source is required.
#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
pub struct SourceArgs {
    /// Directory of .md/.txt/.rst files (not recursive)
    #[arg(long)]
    pub dir: Option<PathBuf>,

    /// JSON file holding an array of {id, content, metadata} objects
    #[arg(long)]
    pub json: Option<PathBuf>,
}

/// Per-run overrides; these beat environment and config file values.
#[derive(Args, Debug, Default, Clone)]
pub struct ChunkingOverrides {
    /// Target chunk size in characters
    #[arg(long)]
    pub target_size: Option<usize>,

    /// Characters of overlap between adjacent chunks
    #[arg(long)]
    pub overlap: Option<usize>,

    /// Hard ceiling on chunk length in characters
    #[arg(long)]
    pub max_chunk_chars: Option<usize>,

    /// Drop chunks shorter than this many characters
    #[arg(long)]
    pub min_chunk_length: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        CliArgs::command().debug_assert();
    }

    #[test]
    fn parses_chunk_command() {
        let args = CliArgs::try_parse_from([
            "ragchunk",
            "chunk",
            "--dir",
            "docs",
            "--ext",
            "md",
            "--target-size",
            "800",
            "--batch-size",
            "10",
        ])
        .unwrap();
        match args.command {
            Command::Chunk {
                input,
                overrides,
                batch_size,
                output,
            } => {
                assert_eq!(input.source.dir, Some(PathBuf::from("docs")));
                assert_eq!(input.extensions, vec!["md"]);
                assert_eq!(overrides.target_size, Some(800));
                assert_eq!(batch_size, Some(10));
                assert!(output.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn requires_exactly_one_source() {
        assert!(CliArgs::try_parse_from(["ragchunk", "stats"]).is_err());
        assert!(
            CliArgs::try_parse_from(["ragchunk", "stats", "--dir", "a", "--json", "b.json"]).is_err()
        );
    }
}
