// ID3v2 tag header and frame walker

use crate::id3::frames::{self, FrameField};
use crate::id3::picture::parse_picture_frame;
use crate::id3::synchsafe;
use crate::metadata::Artwork;
use crate::utils::encoding::decode_text_frame;

/// ID3v2 tag header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Id3v2Header {
    /// Major version: 2, 3 or 4
    pub version: u8,
    pub revision: u8,
    pub flags: u8,
    /// Declared tag size, excluding this 10-byte header
    pub size: u32,
}

impl Id3v2Header {
    pub const SIZE: usize = 10;
    const SIGNATURE: &'static [u8; 3] = b"ID3";
    const FLAG_EXTENDED_HEADER: u8 = 0x40;

    /// Parse the tag header from the start of `buf`, if present.
    pub fn parse(buf: &[u8]) -> Option<Self> {
        if buf.len() < Self::SIZE || &buf[0..3] != Self::SIGNATURE {
            return None;
        }

        Some(Id3v2Header {
            version: buf[3],
            revision: buf[4],
            flags: buf[5],
            size: synchsafe::decode([buf[6], buf[7], buf[8], buf[9]]),
        })
    }

    pub fn has_extended_header(&self) -> bool {
        self.flags & Self::FLAG_EXTENDED_HEADER != 0
    }
}

/// Fields collected from one ID3v2 tag.
///
/// Multiple frames for the same field are last-write-wins; an unreadable
/// frame can clear a field an earlier frame set, matching the walker's
/// unconditional assignment.
#[derive(Debug, Default, PartialEq)]
pub struct Id3v2Tag {
    pub header: Id3v2Header,
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub year: Option<String>,
    pub track: Option<String>,
    pub genre: Option<String>,
    pub artwork: Option<Artwork>,
}

impl Default for Id3v2Header {
    fn default() -> Self {
        Id3v2Header {
            version: 3,
            revision: 0,
            flags: 0,
            size: 0,
        }
    }
}

impl Id3v2Tag {
    /// Parse an ID3v2 tag from the start of `buf`.
    ///
    /// The walk is defensive throughout: padding, a zero-sized frame, or a
    /// declared size that would run past the buffer all end the walk rather
    /// than error. Tags written by sloppy encoders still yield whatever
    /// fields were readable up to that point.
    pub fn parse(buf: &[u8]) -> Option<Self> {
        let header = Id3v2Header::parse(buf)?;
        let mut tag = Id3v2Tag {
            header,
            ..Id3v2Tag::default()
        };

        let mut offset = Id3v2Header::SIZE;

        // The extended header is skipped wholesale, not parsed
        if header.has_extended_header() && header.version >= 3 {
            match read_u32_be(buf, offset) {
                Some(ext_size) => offset = offset.saturating_add(4 + ext_size as usize),
                None => return Some(tag),
            }
        }

        let tag_end = Id3v2Header::SIZE + header.size as usize;

        loop {
            if offset >= tag_end || offset + Id3v2Header::SIZE >= buf.len() {
                break;
            }
            // A zero byte where a frame ID should be marks the padding
            if buf[offset] == 0 {
                break;
            }

            let (id_len, header_len) = if header.version >= 3 { (4, 10) } else { (3, 6) };
            let frame_id = &buf[offset..offset + id_len];

            let frame_size = if header.version >= 4 {
                synchsafe::decode([
                    buf[offset + 4],
                    buf[offset + 5],
                    buf[offset + 6],
                    buf[offset + 7],
                ]) as usize
            } else if header.version == 3 {
                match read_u32_be(buf, offset + 4) {
                    Some(size) => size as usize,
                    None => break,
                }
            } else {
                (buf[offset + 3] as usize) << 16
                    | (buf[offset + 4] as usize) << 8
                    | buf[offset + 5] as usize
            };

            let content = offset + header_len;
            if frame_size == 0 || frame_size > buf.len() - content {
                break;
            }

            let data = &buf[content..content + frame_size];
            match frames::field_for(frame_id) {
                Some(FrameField::Title) => tag.title = decode_text_frame(data),
                Some(FrameField::Artist) => tag.artist = decode_text_frame(data),
                Some(FrameField::Album) => tag.album = decode_text_frame(data),
                Some(FrameField::Year) => tag.year = decode_text_frame(data),
                Some(FrameField::TrackNumber) => tag.track = decode_text_frame(data),
                Some(FrameField::Genre) => tag.genre = decode_text_frame(data),
                Some(FrameField::Artwork) => {
                    tag.artwork = parse_picture_frame(data, header.version)
                }
                None => {}
            }

            offset = content + frame_size;
        }

        Some(tag)
    }
}

fn read_u32_be(buf: &[u8], offset: usize) -> Option<u32> {
    let b = buf.get(offset..offset + 4)?;
    Some(u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
}
