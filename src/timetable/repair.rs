use crate::types::RawScheduleEntry;

/// Split a combined `venue, lecturer` value the extractor sometimes emits.
///
/// Applies only when the lecturer is missing or empty and the venue holds a
/// comma; the text before the first comma stays as venue. Note this turns a
/// would-be mapping record into a class record, so it must run before
/// records are tagged.
pub fn split_venue_lecturer(mut entry: RawScheduleEntry) -> RawScheduleEntry {
    let lecturer_missing = entry.lecturer.as_deref().map_or(true, str::is_empty);
    if !lecturer_missing {
        return entry;
    }

    if let Some((venue, lecturer)) = entry
        .venue
        .as_deref()
        .and_then(|venue| venue.split_once(','))
    {
        let (venue, lecturer) = (venue.trim().to_string(), lecturer.trim().to_string());
        entry.venue = Some(venue);
        entry.lecturer = Some(lecturer);
    }
    entry
}

pub fn split_venue_lecturer_all(entries: Vec<RawScheduleEntry>) -> Vec<RawScheduleEntry> {
    entries.into_iter().map(split_venue_lecturer).collect()
}
