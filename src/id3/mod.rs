// ID3 tag parsing module

pub mod frames;
pub mod picture;
pub mod synchsafe;
pub mod v1;
pub mod v2;

pub use v1::Id3v1Tag;
pub use v2::{Id3v2Header, Id3v2Tag};

/// Which tag format a buffer carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagFormat {
    Id3v2 { version: u8, revision: u8 },
    Id3v1,
    Unknown,
}

impl std::fmt::Display for TagFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TagFormat::Id3v2 { version, revision } => write!(f, "ID3v2.{}.{}", version, revision),
            TagFormat::Id3v1 => write!(f, "ID3v1"),
            TagFormat::Unknown => write!(f, "unknown"),
        }
    }
}

/// Detect the tag format of a buffer. A leading ID3v2 header wins over a
/// trailing ID3v1 tag when both are present.
pub fn detect(buf: &[u8]) -> TagFormat {
    if let Some(header) = Id3v2Header::parse(buf) {
        return TagFormat::Id3v2 {
            version: header.version,
            revision: header.revision,
        };
    }
    if Id3v1Tag::parse(buf).is_some() {
        return TagFormat::Id3v1;
    }
    TagFormat::Unknown
}
