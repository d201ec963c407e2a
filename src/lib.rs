//! Tonearm - a music library manager built around an ID3 tag parser.
//!
//! The core is a defensive byte-level decoder for ID3v1 and ID3v2.2/2.3/2.4
//! tags, including embedded album art. Around it sit a duration probe, a
//! directory-backed track library with batch import, and a playback queue
//! model.

pub mod cli;
pub mod id3;
pub mod library;
pub mod metadata;
pub mod player;
pub mod probe;
pub mod utils;

pub use id3::{detect, Id3v1Tag, Id3v2Header, Id3v2Tag, TagFormat};
pub use library::{import_files, ImportReport, Library, MediaStore, Track, TrackId};
pub use metadata::{read_track_metadata, Artwork, TrackMetadata};
pub use player::{Queue, RepeatMode};
pub use probe::{DurationProbe, SymphoniaProbe, TimeoutProbe};
