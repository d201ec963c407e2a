// Synch-safe integer decoding
//
// ID3v2 sizes are stored as 4 bytes carrying 7 bits each, so the encoded
// value can never contain a byte that looks like an MPEG frame sync.

/// Decode a 4-byte synch-safe integer into its 28-bit value.
///
/// The high bit of each byte is discarded. Real-world tags sometimes set
/// those bits anyway; they are ignored rather than rejected.
pub fn decode(bytes: [u8; 4]) -> u32 {
    ((bytes[0] & 0x7F) as u32) << 21
        | ((bytes[1] & 0x7F) as u32) << 14
        | ((bytes[2] & 0x7F) as u32) << 7
        | (bytes[3] & 0x7F) as u32
}

/// Decode a synch-safe integer at `offset`, or `None` if the buffer is too short.
pub fn read_at(buf: &[u8], offset: usize) -> Option<u32> {
    let b = buf.get(offset..offset + 4)?;
    Some(decode([b[0], b[1], b[2], b[3]]))
}
