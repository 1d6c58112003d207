//! CLI argument parsing using clap.

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pipezip")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "With no PATH arguments a ZIP archive is read from stdin and \
                        extracted. With one or more PATH arguments they are packed into \
                        a ZIP archive written to stdout.")]
pub struct Cli {
    /// Files or directories to pack (omit to unpack stdin)
    #[arg(value_name = "PATH")]
    pub paths: Vec<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Compression level (0 stores entries uncompressed)
    #[arg(
        short = 'l',
        long,
        default_value = "6",
        value_parser = clap::value_parser!(u8).range(0..=9)
    )]
    pub compression_level: u8,

    /// Extraction directory (default: current directory)
    #[arg(short = 'd', long, value_name = "DIR")]
    pub directory: Option<PathBuf>,

    /// Archive symbolic links as skipped entries instead of their targets
    #[arg(long)]
    pub no_follow_symlinks: bool,
}

impl Cli {
    /// Returns the pack inputs with surrounding whitespace removed.
    pub fn trimmed_paths(&self) -> Vec<PathBuf> {
        self.paths
            .iter()
            .map(|p| PathBuf::from(p.trim()))
            .collect()
    }

    /// Returns `true` when no inputs were given and stdin should be unpacked.
    pub fn is_unpack(&self) -> bool {
        self.paths.is_empty()
    }
}
