// CLI configuration
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Tonearm - music library manager
#[derive(Parser, Debug)]
#[command(name = "tonearm")]
#[command(about = "Manage a music library and read ID3 tags from MP3 files", long_about = None)]
#[command(version)]
pub struct Config {
    /// Output format
    #[arg(short, long, value_enum, default_value = "pretty")]
    pub format: OutputFormat,

    /// Quiet mode (suppress progress messages)
    #[arg(short, long)]
    pub quiet: bool,

    /// Subcommand
    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable field listing
    #[default]
    Pretty,
    /// Compact JSON (artwork bytes as base64)
    Json,
    /// key: value pairs
    KeyValue,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Read ID3 metadata from MP3 file(s)
    Read {
        /// Audio file path(s)
        #[arg(value_name = "FILE", required = true)]
        files: Vec<PathBuf>,

        /// Output to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Import MP3 files into a library
    Import {
        /// Library directory
        #[arg(short, long, value_name = "DIR")]
        library: PathBuf,

        /// Audio file path(s)
        #[arg(value_name = "FILE")]
        files: Vec<PathBuf>,

        /// Import matching files from a directory
        #[arg(short, long, value_name = "DIR")]
        directory: Option<PathBuf>,

        /// File pattern used with --directory (e.g. "*.mp3")
        #[arg(short, long, default_value = "*.mp3")]
        pattern: String,

        /// Seconds to wait for the duration probe per file
        #[arg(long, default_value_t = 10)]
        probe_timeout: u64,
    },

    /// Detect which tag format a file carries
    Detect {
        /// Audio file path(s)
        #[arg(value_name = "FILE", required = true)]
        files: Vec<PathBuf>,
    },

    /// Extract embedded album art to an image file
    ExportCover {
        /// Audio file path
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output directory for the cover image
        #[arg(short, long, default_value = ".")]
        output: PathBuf,
    },
}
