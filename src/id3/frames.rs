// Frame identifier mapping
//
// ID3v2.2 uses 3-character frame IDs, v2.3/v2.4 use 4 characters. Both
// spellings of each frame map to the same semantic field.

/// Semantic fields a recognized frame can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameField {
    Title,
    Artist,
    Album,
    Year,
    TrackNumber,
    Genre,
    Artwork,
}

/// Map a raw frame ID to its semantic field. Unrecognized IDs return `None`
/// and are skipped by the frame walker.
pub fn field_for(id: &[u8]) -> Option<FrameField> {
    match id {
        b"TIT2" | b"TT2" => Some(FrameField::Title),
        b"TPE1" | b"TP1" => Some(FrameField::Artist),
        b"TALB" | b"TAL" => Some(FrameField::Album),
        b"TYER" | b"TYE" | b"TDRC" => Some(FrameField::Year),
        b"TRCK" | b"TRK" => Some(FrameField::TrackNumber),
        b"TCON" | b"TCO" => Some(FrameField::Genre),
        b"APIC" | b"PIC" => Some(FrameField::Artwork),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_and_long_ids_map_to_the_same_field() {
        assert_eq!(field_for(b"TIT2"), Some(FrameField::Title));
        assert_eq!(field_for(b"TT2"), Some(FrameField::Title));
        assert_eq!(field_for(b"APIC"), Some(FrameField::Artwork));
        assert_eq!(field_for(b"PIC"), Some(FrameField::Artwork));
    }

    #[test]
    fn both_year_spellings_and_recording_time_map_to_year() {
        assert_eq!(field_for(b"TYER"), Some(FrameField::Year));
        assert_eq!(field_for(b"TDRC"), Some(FrameField::Year));
        assert_eq!(field_for(b"TYE"), Some(FrameField::Year));
    }

    #[test]
    fn unknown_ids_are_unmapped() {
        assert_eq!(field_for(b"COMM"), None);
        assert_eq!(field_for(b"XXXX"), None);
        assert_eq!(field_for(b""), None);
    }
}
