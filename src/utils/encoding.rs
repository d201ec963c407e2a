// Text encoding handling for ID3v2 text frames

use encoding_rs::{UTF_16BE, UTF_16LE, UTF_8, WINDOWS_1252};

/// Text encoding byte values used by ID3v2 frames
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    Latin1 = 0,
    Utf16 = 1,
    Utf16Be = 2,
    Utf8 = 3,
}

impl TextEncoding {
    pub fn from_byte(byte: u8) -> Self {
        match byte {
            1 => TextEncoding::Utf16,
            2 => TextEncoding::Utf16Be,
            3 => TextEncoding::Utf8,
            _ => TextEncoding::Latin1,
        }
    }

    /// Width of the null terminator for this encoding, in bytes.
    pub fn terminator_width(self) -> usize {
        match self {
            TextEncoding::Latin1 | TextEncoding::Utf8 => 1,
            TextEncoding::Utf16 | TextEncoding::Utf16Be => 2,
        }
    }
}

/// Decode a text frame: a leading encoding byte followed by encoded text.
///
/// The text ends at the encoding's null terminator or at the end of the
/// frame, whichever comes first. The result is trimmed; a frame that decodes
/// to nothing but whitespace is reported as absent rather than empty.
pub fn decode_text_frame(data: &[u8]) -> Option<String> {
    if data.len() < 2 {
        return None;
    }

    let body = &data[1..];
    let text = match TextEncoding::from_byte(data[0]) {
        TextEncoding::Latin1 => WINDOWS_1252.decode(until_nul(body)).0,
        TextEncoding::Utf16 => {
            if body.len() < 2 {
                return None;
            }
            // The two bytes after the encoding byte are consumed as a BOM:
            // FF FE selects little-endian, anything else is read big-endian.
            let rest = &body[2..];
            if &body[0..2] == [0xFF, 0xFE] {
                UTF_16LE.decode(until_nul_wide(rest)).0
            } else {
                UTF_16BE.decode(until_nul_wide(rest)).0
            }
        }
        TextEncoding::Utf16Be => UTF_16BE.decode(until_nul_wide(body)).0,
        TextEncoding::Utf8 => UTF_8.decode(until_nul(body)).0,
    };

    let text = text.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

/// Slice up to the first zero byte, or the whole input if none.
fn until_nul(data: &[u8]) -> &[u8] {
    let end = data.iter().position(|&b| b == 0).unwrap_or(data.len());
    &data[..end]
}

/// Slice up to the first aligned zero code unit. A trailing odd byte is
/// dropped so the result is always a whole number of 16-bit units.
fn until_nul_wide(data: &[u8]) -> &[u8] {
    let mut i = 0;
    while i + 1 < data.len() {
        if data[i] == 0 && data[i + 1] == 0 {
            return &data[..i];
        }
        i += 2;
    }
    &data[..i]
}
