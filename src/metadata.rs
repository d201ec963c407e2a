// Track metadata assembly
//
// Pulls together ID3v2, the ID3v1 fallback, the duration probe, and the
// filename fallback into one record per file.

use std::io::Write;
use std::path::Path;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::{Serialize, Serializer};

use crate::id3::{Id3v1Tag, Id3v2Tag};
use crate::probe::DurationProbe;

/// Embedded album art pulled out of an APIC/PIC frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Artwork {
    pub mime_type: String,
    #[serde(serialize_with = "as_base64")]
    pub data: Vec<u8>,
}

impl Artwork {
    /// File extension matching the MIME type.
    pub fn extension(&self) -> &'static str {
        match self.mime_type.as_str() {
            "image/png" => "png",
            "image/gif" => "gif",
            "image/webp" => "webp",
            "image/bmp" => "bmp",
            _ => "jpg",
        }
    }

    /// Write the raw image bytes to `path`.
    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        let mut file = std::fs::File::create(path)?;
        file.write_all(&self.data)
    }
}

fn as_base64<S: Serializer>(data: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&BASE64.encode(data))
}

/// Everything known about one audio file after a parse.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct TrackMetadata {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub year: Option<String>,
    pub track: Option<String>,
    pub genre: Option<String>,
    /// Playable duration in seconds; 0 when the probe failed
    pub duration: f64,
    pub artwork: Option<Artwork>,
}

/// Assemble the metadata record for one file.
///
/// ID3v2 is read first and wins for every field it sets. ID3v1 is consulted
/// only when v2 produced no title, and then only fills fields v2 left
/// absent. Duration comes from the probe, 0 on failure. A file with no
/// usable tags still gets a title derived from its filename.
///
/// Malformed tag data never fails this call; every decoder degrades to
/// absent fields.
pub fn read_track_metadata(
    buf: &[u8],
    path: &Path,
    probe: &dyn DurationProbe,
) -> TrackMetadata {
    let mut meta = TrackMetadata::default();

    if let Some(v2) = Id3v2Tag::parse(buf) {
        meta.title = v2.title;
        meta.artist = v2.artist;
        meta.album = v2.album;
        meta.year = v2.year;
        meta.track = v2.track;
        meta.genre = v2.genre;
        meta.artwork = v2.artwork;
    }

    if meta.title.is_none() {
        if let Some(v1) = Id3v1Tag::parse(buf) {
            meta.title = v1.title;
            if meta.artist.is_none() {
                meta.artist = v1.artist;
            }
            if meta.album.is_none() {
                meta.album = v1.album;
            }
            if meta.year.is_none() {
                meta.year = v1.year;
            }
        }
    }

    meta.duration = probe.measure(path).unwrap_or(0.0);

    if meta.title.is_none() {
        meta.title = Some(title_from_filename(path));
    }

    meta
}

/// Fallback title: the filename with a case-insensitive `.mp3` suffix
/// stripped.
fn title_from_filename(path: &Path) -> String {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("Unknown");

    let cut = name.len().wrapping_sub(4);
    if name.len() >= 4
        && name.is_char_boundary(cut)
        && name[cut..].eq_ignore_ascii_case(".mp3")
    {
        name[..cut].to_string()
    } else {
        name.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    pub struct FixedProbe(pub f64);

    impl DurationProbe for FixedProbe {
        fn measure(&self, _path: &Path) -> anyhow::Result<f64> {
            Ok(self.0)
        }
    }

    struct FailingProbe;

    impl DurationProbe for FailingProbe {
        fn measure(&self, _path: &Path) -> anyhow::Result<f64> {
            Err(anyhow!("decoder exploded"))
        }
    }

    fn v23_tag(frames: &[(&[u8; 4], &str)]) -> Vec<u8> {
        let mut body = Vec::new();
        for (id, text) in frames {
            body.extend_from_slice(*id);
            body.extend_from_slice(&(text.len() as u32 + 1).to_be_bytes());
            body.extend_from_slice(&[0, 0]);
            body.push(0); // Latin-1
            body.extend_from_slice(text.as_bytes());
        }
        let size = body.len() as u32;
        let mut buf = Vec::from(&b"ID3\x03\x00\x00"[..]);
        buf.extend_from_slice(&[
            (size >> 21) as u8 & 0x7F,
            (size >> 14) as u8 & 0x7F,
            (size >> 7) as u8 & 0x7F,
            size as u8 & 0x7F,
        ]);
        buf.extend_from_slice(&body);
        buf.extend_from_slice(&[0xFF; 64]);
        buf
    }

    fn v1_trailer(title: &str, artist: &str, album: &str, year: &str) -> Vec<u8> {
        let mut tag = vec![0u8; 128];
        tag[0..3].copy_from_slice(b"TAG");
        tag[3..3 + title.len()].copy_from_slice(title.as_bytes());
        tag[33..33 + artist.len()].copy_from_slice(artist.as_bytes());
        tag[63..63 + album.len()].copy_from_slice(album.as_bytes());
        tag[93..93 + year.len()].copy_from_slice(year.as_bytes());
        tag
    }

    #[test]
    fn v2_fields_win_over_v1() {
        let mut buf = v23_tag(&[(b"TIT2", "V2 Title"), (b"TPE1", "V2 Artist")]);
        buf.extend(v1_trailer("V1 Title", "V1 Artist", "V1 Album", "1991"));

        let meta = read_track_metadata(&buf, Path::new("x.mp3"), &FixedProbe(10.0));
        assert_eq!(meta.title.as_deref(), Some("V2 Title"));
        assert_eq!(meta.artist.as_deref(), Some("V2 Artist"));
        // v2 set a title, so v1 is not consulted at all
        assert_eq!(meta.album, None);
        assert_eq!(meta.year, None);
    }

    #[test]
    fn v1_fills_fields_when_v2_has_no_title() {
        let mut buf = vec![0xFFu8; 300];
        buf.extend(v1_trailer("Trailer Title", "Trailer Artist", "Trailer Album", "1984"));

        let meta = read_track_metadata(&buf, Path::new("x.mp3"), &FixedProbe(0.0));
        assert_eq!(meta.title.as_deref(), Some("Trailer Title"));
        assert_eq!(meta.artist.as_deref(), Some("Trailer Artist"));
        assert_eq!(meta.album.as_deref(), Some("Trailer Album"));
        assert_eq!(meta.year.as_deref(), Some("1984"));
    }

    #[test]
    fn filename_fallback_strips_mp3_suffix() {
        let buf = vec![0u8; 64];
        let meta = read_track_metadata(&buf, Path::new("My Song.mp3"), &FixedProbe(0.0));
        assert_eq!(meta.title.as_deref(), Some("My Song"));

        let meta = read_track_metadata(&buf, Path::new("LOUD.MP3"), &FixedProbe(0.0));
        assert_eq!(meta.title.as_deref(), Some("LOUD"));

        let meta = read_track_metadata(&buf, Path::new("notes.txt"), &FixedProbe(0.0));
        assert_eq!(meta.title.as_deref(), Some("notes.txt"));
    }

    #[test]
    fn probe_duration_is_attached() {
        let buf = v23_tag(&[(b"TIT2", "Timed")]);
        let meta = read_track_metadata(&buf, Path::new("x.mp3"), &FixedProbe(245.7));
        assert!((meta.duration - 245.7).abs() < f64::EPSILON);
    }

    #[test]
    fn probe_failure_defaults_to_zero() {
        let buf = v23_tag(&[(b"TIT2", "Timed")]);
        let meta = read_track_metadata(&buf, Path::new("x.mp3"), &FailingProbe);
        assert_eq!(meta.duration, 0.0);
    }

    #[test]
    fn empty_buffer_still_yields_a_record() {
        let meta = read_track_metadata(&[], Path::new("empty.mp3"), &FailingProbe);
        assert_eq!(meta.title.as_deref(), Some("empty"));
        assert_eq!(meta.duration, 0.0);
        assert_eq!(meta.artwork, None);
    }

    #[test]
    fn artwork_serializes_as_base64() {
        let art = Artwork {
            mime_type: "image/png".to_string(),
            data: vec![1, 2, 3],
        };
        let json = serde_json::to_value(&art).unwrap();
        assert_eq!(json["mime_type"], "image/png");
        assert_eq!(json["data"], "AQID");
    }

    #[test]
    fn artwork_extension_follows_mime() {
        let png = Artwork {
            mime_type: "image/png".to_string(),
            data: vec![],
        };
        assert_eq!(png.extension(), "png");
        let jpeg = Artwork {
            mime_type: "image/jpeg".to_string(),
            data: vec![],
        };
        assert_eq!(jpeg.extension(), "jpg");
    }
}
