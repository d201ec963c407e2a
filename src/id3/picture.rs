// APIC/PIC picture frame decoding

use encoding_rs::WINDOWS_1252;

use crate::metadata::Artwork;
use crate::utils::encoding::TextEncoding;

/// Minimum plausible picture frame: encoding byte, MIME, type byte,
/// description terminator and at least some image data.
const MIN_FRAME_LEN: usize = 10;

/// Decode an attached picture frame into its image bytes and MIME type.
///
/// `version` is the tag's major version: v2.2 (`PIC`) stores a 3-character
/// image format code where later versions store a null-terminated MIME
/// string. A malformed frame yields `None`; it never fails the parse.
pub fn parse_picture_frame(data: &[u8], version: u8) -> Option<Artwork> {
    if data.len() < MIN_FRAME_LEN {
        return None;
    }

    let encoding = TextEncoding::from_byte(data[0]);
    let mut offset;

    let mut mime_type = if version >= 3 {
        let end = data[1..]
            .iter()
            .position(|&b| b == 0)
            .map(|p| 1 + p)
            .unwrap_or(data.len());
        offset = end + 1;
        WINDOWS_1252.decode(&data[1..end]).0.to_string()
    } else {
        // v2.2: fixed 3-character image format code
        offset = 4;
        if &data[1..4] == b"PNG" {
            "image/png".to_string()
        } else {
            "image/jpeg".to_string()
        }
    };

    if mime_type == "image/jpg" {
        mime_type = "image/jpeg".to_string();
    }
    if !mime_type.starts_with("image/") {
        mime_type = "image/jpeg".to_string();
    }

    // Picture type classification byte, unused here
    offset += 1;

    // Skip the description; terminator width follows the text encoding
    if encoding.terminator_width() == 1 {
        while offset < data.len() && data[offset] != 0 {
            offset += 1;
        }
        offset += 1;
    } else {
        while offset + 1 < data.len() {
            let pair = (data[offset], data[offset + 1]);
            offset += 2;
            if pair == (0, 0) {
                break;
            }
        }
    }

    if offset >= data.len() {
        return None;
    }

    Some(Artwork {
        mime_type,
        data: data[offset..].to_vec(),
    })
}
