// Output formatting for the CLI

use std::io::Write;

use anyhow::Result;

use crate::cli::config::OutputFormat;
use crate::metadata::TrackMetadata;

/// Formats parse results and status messages.
pub struct OutputFormatter {
    format: OutputFormat,
    quiet: bool,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat, quiet: bool) -> Self {
        Self { format, quiet }
    }

    /// Write one track's metadata in the configured format.
    pub fn write_metadata(
        &self,
        label: &str,
        metadata: &TrackMetadata,
        writer: &mut dyn Write,
    ) -> Result<()> {
        match self.format {
            OutputFormat::Pretty => self.write_pretty(label, metadata, writer)?,
            OutputFormat::Json => {
                writeln!(writer, "{}", serde_json::to_string(metadata)?)?;
            }
            OutputFormat::KeyValue => self.write_key_value(metadata, writer)?,
        }
        Ok(())
    }

    fn write_pretty(
        &self,
        label: &str,
        metadata: &TrackMetadata,
        writer: &mut dyn Write,
    ) -> Result<()> {
        writeln!(writer, "{}", label)?;
        writeln!(writer, "{}", "─".repeat(label.len().max(24)))?;
        writeln!(writer, "Title:    {}", display(&metadata.title))?;
        writeln!(writer, "Artist:   {}", display(&metadata.artist))?;
        writeln!(writer, "Album:    {}", display(&metadata.album))?;
        writeln!(writer, "Year:     {}", display(&metadata.year))?;
        writeln!(writer, "Track:    {}", display(&metadata.track))?;
        writeln!(writer, "Genre:    {}", display(&metadata.genre))?;
        writeln!(writer, "Duration: {}", format_duration(metadata.duration))?;
        match &metadata.artwork {
            Some(art) => writeln!(
                writer,
                "Artwork:  {} ({} bytes)",
                art.mime_type,
                art.data.len()
            )?,
            None => writeln!(writer, "Artwork:  (none)")?,
        }
        Ok(())
    }

    fn write_key_value(&self, metadata: &TrackMetadata, writer: &mut dyn Write) -> Result<()> {
        writeln!(writer, "title: {}", display(&metadata.title))?;
        writeln!(writer, "artist: {}", display(&metadata.artist))?;
        writeln!(writer, "album: {}", display(&metadata.album))?;
        writeln!(writer, "year: {}", display(&metadata.year))?;
        writeln!(writer, "track: {}", display(&metadata.track))?;
        writeln!(writer, "genre: {}", display(&metadata.genre))?;
        writeln!(writer, "duration: {}", metadata.duration)?;
        if let Some(art) = &metadata.artwork {
            writeln!(writer, "artwork: {} ({} bytes)", art.mime_type, art.data.len())?;
        }
        Ok(())
    }

    /// Print success message
    pub fn print_success(&self, message: &str) {
        if !self.quiet {
            println!("✓ {}", message);
        }
    }

    /// Print error message
    pub fn print_error(&self, message: &str) {
        eprintln!("✗ {}", message);
    }

    /// Print info message
    pub fn print_info(&self, message: &str) {
        if !self.quiet {
            println!("  {}", message);
        }
    }

    /// Print a batch progress line, overwriting the previous one.
    pub fn print_progress(&self, current: usize, total: usize, label: &str) {
        if self.quiet || total == 0 {
            return;
        }
        print!("\r[{}/{}] {} ", current, total, label);
        std::io::stdout().flush().ok();
        if current == total {
            println!();
        }
    }
}

fn display(field: &Option<String>) -> &str {
    field.as_deref().unwrap_or("(none)")
}

/// Seconds as m:ss, rounding down.
pub fn format_duration(seconds: f64) -> String {
    let whole = seconds.max(0.0) as u64;
    format!("{}:{:02}", whole / 60, whole % 60)
}
