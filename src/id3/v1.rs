// ID3v1 tag implementation

use encoding_rs::WINDOWS_1252;

/// Fields decoded from an ID3v1 trailer.
///
/// Only the fields this library surfaces are extracted; the v1 comment,
/// track number and genre byte are left alone.
#[derive(Debug, Default, PartialEq)]
pub struct Id3v1Tag {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub year: Option<String>,
}

impl Id3v1Tag {
    pub const TAG_SIZE: usize = 128;
    const SIGNATURE: &'static [u8; 3] = b"TAG";

    /// Parse the ID3v1 tag from the trailing 128 bytes of `buf`, if present.
    pub fn parse(buf: &[u8]) -> Option<Self> {
        if buf.len() < Self::TAG_SIZE {
            return None;
        }

        let tag = &buf[buf.len() - Self::TAG_SIZE..];
        if &tag[0..3] != Self::SIGNATURE {
            return None;
        }

        Some(Id3v1Tag {
            title: Self::field(&tag[3..33]),
            artist: Self::field(&tag[33..63]),
            album: Self::field(&tag[63..93]),
            year: Self::field(&tag[93..97]),
        })
    }

    /// Decode a fixed-width Latin-1 field: stop at the first zero byte,
    /// trim, and report an empty result as absent.
    fn field(bytes: &[u8]) -> Option<String> {
        let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
        let text = WINDOWS_1252.decode(&bytes[..end]).0;
        let text = text.trim();
        if text.is_empty() {
            None
        } else {
            Some(text.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

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
    fn reads_fixed_offset_fields() {
        let mut buf = vec![0xAAu8; 400];
        buf.extend(v1_trailer("Song Title", "Some Artist", "Some Album", "1997"));

        let tag = Id3v1Tag::parse(&buf).unwrap();
        assert_eq!(tag.title.as_deref(), Some("Song Title"));
        assert_eq!(tag.artist.as_deref(), Some("Some Artist"));
        assert_eq!(tag.album.as_deref(), Some("Some Album"));
        assert_eq!(tag.year.as_deref(), Some("1997"));
    }

    #[test]
    fn empty_fields_are_absent() {
        let buf = v1_trailer("Only Title", "", "", "");
        let tag = Id3v1Tag::parse(&buf).unwrap();
        assert_eq!(tag.title.as_deref(), Some("Only Title"));
        assert_eq!(tag.artist, None);
        assert_eq!(tag.album, None);
        assert_eq!(tag.year, None);
    }

    #[test]
    fn missing_signature_yields_none() {
        let buf = vec![0u8; 200];
        assert_eq!(Id3v1Tag::parse(&buf), None);
    }

    #[test]
    fn short_buffer_yields_none() {
        assert_eq!(Id3v1Tag::parse(b"TAG"), None);
        assert_eq!(Id3v1Tag::parse(&[]), None);
    }
}
