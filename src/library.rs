// Track library: persistence and batch import

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::metadata::{read_track_metadata, Artwork, TrackMetadata};
use crate::probe::DurationProbe;

pub type TrackId = u64;

/// Opaque reference to stored artwork. For the directory-backed library
/// this is the path of the image file relative to the library root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArtworkRef(String);

impl ArtworkRef {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A stored track record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub id: TrackId,
    pub title: String,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub year: Option<String>,
    pub track: Option<String>,
    pub genre: Option<String>,
    /// Seconds; 0 when the duration probe failed
    pub duration: f64,
    pub filename: String,
    /// Where the audio lives; the library stores a reference, not a copy
    pub source: PathBuf,
    pub artwork: Option<ArtworkRef>,
    pub added_at: DateTime<Utc>,
}

/// Where parsed results end up. Artwork is stored before the track that
/// references it.
pub trait MediaStore {
    fn store_artwork(&mut self, artwork: &Artwork) -> Result<ArtworkRef>;

    fn store_track(
        &mut self,
        metadata: &TrackMetadata,
        source: &Path,
        artwork: Option<ArtworkRef>,
    ) -> Result<Track>;
}

/// A directory-backed library: track records in `library.json`, artwork
/// files under `artwork/`.
pub struct Library {
    root: PathBuf,
    tracks: Vec<Track>,
    next_track_id: TrackId,
    next_artwork_id: u64,
}

impl Library {
    const INDEX_FILE: &'static str = "library.json";
    const ARTWORK_DIR: &'static str = "artwork";

    /// Open a library directory, creating it if needed, and load the index.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)
            .with_context(|| format!("creating library directory {}", root.display()))?;

        let index = root.join(Self::INDEX_FILE);
        let tracks: Vec<Track> = if index.exists() {
            let raw = fs::read_to_string(&index)
                .with_context(|| format!("reading {}", index.display()))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("parsing {}", index.display()))?
        } else {
            Vec::new()
        };

        let next_track_id = tracks.iter().map(|t| t.id).max().unwrap_or(0) + 1;
        Ok(Library {
            root,
            next_track_id,
            next_artwork_id: next_track_id,
            tracks,
        })
    }

    /// Persist the track index.
    pub fn save(&self) -> Result<()> {
        let index = self.root.join(Self::INDEX_FILE);
        let raw = serde_json::to_string_pretty(&self.tracks)?;
        fs::write(&index, raw).with_context(|| format!("writing {}", index.display()))?;
        Ok(())
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn track(&self, id: TrackId) -> Option<&Track> {
        self.tracks.iter().find(|t| t.id == id)
    }

    /// Absolute path of a stored artwork file.
    pub fn artwork_path(&self, artwork: &ArtworkRef) -> PathBuf {
        self.root.join(artwork.as_str())
    }
}

impl MediaStore for Library {
    fn store_artwork(&mut self, artwork: &Artwork) -> Result<ArtworkRef> {
        let dir = self.root.join(Self::ARTWORK_DIR);
        fs::create_dir_all(&dir)
            .with_context(|| format!("creating {}", dir.display()))?;

        let id = self.next_artwork_id;
        self.next_artwork_id += 1;

        let relative = format!("{}/{}.{}", Self::ARTWORK_DIR, id, artwork.extension());
        artwork
            .save(&self.root.join(&relative))
            .with_context(|| format!("writing artwork {}", relative))?;

        Ok(ArtworkRef(relative))
    }

    fn store_track(
        &mut self,
        metadata: &TrackMetadata,
        source: &Path,
        artwork: Option<ArtworkRef>,
    ) -> Result<Track> {
        let filename = source
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown")
            .to_string();

        let track = Track {
            id: self.next_track_id,
            title: metadata
                .title
                .clone()
                .unwrap_or_else(|| filename.clone()),
            artist: metadata.artist.clone(),
            album: metadata.album.clone(),
            year: metadata.year.clone(),
            track: metadata.track.clone(),
            genre: metadata.genre.clone(),
            duration: metadata.duration,
            filename,
            source: source.to_path_buf(),
            artwork,
            added_at: Utc::now(),
        };
        self.next_track_id += 1;
        self.tracks.push(track.clone());
        Ok(track)
    }
}

/// One file that could not be imported.
#[derive(Debug)]
pub struct ImportFailure {
    pub path: PathBuf,
    pub reason: String,
}

/// Outcome of a batch import.
#[derive(Debug, Default)]
pub struct ImportReport {
    pub imported: Vec<Track>,
    pub failures: Vec<ImportFailure>,
}

/// Import a batch of files into a store.
///
/// Files without an `.mp3` extension are skipped outright. Each remaining
/// file is parsed and stored independently; a failure is recorded in the
/// report and the batch continues. `on_progress` runs after each stored
/// track with (current, total, track).
pub fn import_files<S, F>(
    store: &mut S,
    probe: &dyn DurationProbe,
    paths: &[PathBuf],
    mut on_progress: F,
) -> ImportReport
where
    S: MediaStore,
    F: FnMut(usize, usize, &Track),
{
    let mut report = ImportReport::default();
    let total = paths.len();

    for (index, path) in paths.iter().enumerate() {
        if !has_mp3_extension(path) {
            continue;
        }

        match import_one(store, probe, path) {
            Ok(track) => {
                on_progress(index + 1, total, &track);
                report.imported.push(track);
            }
            Err(err) => report.failures.push(ImportFailure {
                path: path.clone(),
                reason: format!("{:#}", err),
            }),
        }
    }

    report
}

fn import_one<S: MediaStore>(
    store: &mut S,
    probe: &dyn DurationProbe,
    path: &Path,
) -> Result<Track> {
    let buf = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let metadata = read_track_metadata(&buf, path, probe);

    let artwork = match &metadata.artwork {
        Some(art) => Some(store.store_artwork(art)?),
        None => None,
    };

    store.store_track(&metadata, path, artwork)
}

fn has_mp3_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("mp3"))
}
