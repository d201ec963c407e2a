// Command-line interface for tonearm

pub mod commands;
pub mod config;
pub mod output;

pub use config::{Commands, Config, OutputFormat};
pub use output::OutputFormatter;
