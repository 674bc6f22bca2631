use super::model::Track;

/// Tracks whose display name contains every word of `query`, ignoring case.
///
/// Words are plain substrings, not whole words: `"lo ve"` matches
/// `"Lovesong"`. An empty (or all-whitespace) query returns an empty list,
/// which callers read as "no restriction" rather than "nothing matched".
/// Input order is preserved.
pub fn matches(tracks: &[Track], query: &str) -> Vec<Track> {
    let query = query.to_lowercase();
    let words: Vec<&str> = query.split_whitespace().collect();
    if words.is_empty() {
        return Vec::new();
    }

    tracks
        .iter()
        .filter(|t| {
            let name = t.display_name.to_lowercase();
            words.iter().all(|w| name.contains(w))
        })
        .cloned()
        .collect()
}
