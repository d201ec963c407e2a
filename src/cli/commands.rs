// CLI command implementations

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};

use crate::cli::output::OutputFormatter;
use crate::id3;
use crate::library::{import_files, Library};
use crate::metadata::read_track_metadata;
use crate::probe::{DurationProbe, SymphoniaProbe, TimeoutProbe};

/// Read and print metadata for each file.
pub fn command_read(
    files: &[PathBuf],
    output: Option<&Path>,
    formatter: &OutputFormatter,
) -> Result<()> {
    let mut writer: Box<dyn Write> = match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("creating {}", path.display()))?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(std::io::stdout()),
    };

    let probe = TimeoutProbe::new(SymphoniaProbe, Duration::from_secs(10));

    for path in files {
        let buf = match fs::read(path) {
            Ok(buf) => buf,
            Err(e) => {
                formatter.print_error(&format!("{}: {}", path.display(), e));
                continue;
            }
        };

        let metadata = read_track_metadata(&buf, path, &probe);
        formatter.write_metadata(&path.display().to_string(), &metadata, &mut writer)?;
        writeln!(writer)?;
    }

    Ok(())
}

/// Import files (and/or a globbed directory) into a library.
pub fn command_import(
    library_dir: &Path,
    files: &[PathBuf],
    directory: Option<&Path>,
    pattern: &str,
    probe_timeout: u64,
    formatter: &OutputFormatter,
) -> Result<()> {
    let mut paths: Vec<PathBuf> = files.to_vec();
    if let Some(dir) = directory {
        paths.extend(expand_directory(dir, pattern, formatter)?);
    }

    if paths.is_empty() {
        bail!("no files to import");
    }

    let mut library = Library::open(library_dir)?;
    let probe: Box<dyn DurationProbe> = Box::new(TimeoutProbe::new(
        SymphoniaProbe,
        Duration::from_secs(probe_timeout),
    ));

    formatter.print_info(&format!("Importing {} file(s)...", paths.len()));

    let total = paths.len();
    let report = import_files(&mut library, probe.as_ref(), &paths, |current, _, track| {
        formatter.print_progress(current, total, &track.title);
    });

    library.save()?;

    for failure in &report.failures {
        formatter.print_error(&format!("{}: {}", failure.path.display(), failure.reason));
    }
    formatter.print_success(&format!(
        "Imported {} track(s), {} failure(s)",
        report.imported.len(),
        report.failures.len()
    ));

    Ok(())
}

/// Report the tag format of each file.
pub fn command_detect(files: &[PathBuf], formatter: &OutputFormatter) -> Result<()> {
    for path in files {
        match fs::read(path) {
            Ok(buf) => {
                formatter.print_info(&format!("{}: {}", path.display(), id3::detect(&buf)));
            }
            Err(e) => {
                formatter.print_error(&format!("{}: {}", path.display(), e));
            }
        }
    }
    Ok(())
}

/// Extract embedded album art to `<output>/<stem>.<ext>`.
pub fn command_export_cover(
    file: &Path,
    output: &Path,
    formatter: &OutputFormatter,
) -> Result<()> {
    let buf = fs::read(file).with_context(|| format!("reading {}", file.display()))?;

    let artwork = id3::Id3v2Tag::parse(&buf).and_then(|tag| tag.artwork);
    let Some(artwork) = artwork else {
        bail!("{} has no embedded artwork", file.display());
    };

    let stem = file
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("cover");
    fs::create_dir_all(output)
        .with_context(|| format!("creating {}", output.display()))?;
    let target = output.join(format!("{}.{}", stem, artwork.extension()));
    artwork
        .save(&target)
        .with_context(|| format!("writing {}", target.display()))?;

    formatter.print_success(&format!(
        "Wrote {} ({}, {} bytes)",
        target.display(),
        artwork.mime_type,
        artwork.data.len()
    ));
    Ok(())
}

/// Expand a directory + pattern into matching file paths.
fn expand_directory(
    dir: &Path,
    pattern: &str,
    formatter: &OutputFormatter,
) -> Result<Vec<PathBuf>> {
    let glob_pattern = format!("{}/**/{}", dir.display(), pattern);
    let mut paths = Vec::new();

    for entry in glob::glob(&glob_pattern)
        .with_context(|| format!("invalid glob pattern {}", glob_pattern))?
    {
        match entry {
            Ok(path) if path.is_file() => paths.push(path),
            Ok(_) => {}
            Err(e) => formatter.print_error(&format!("error reading path: {}", e)),
        }
    }

    Ok(paths)
}
