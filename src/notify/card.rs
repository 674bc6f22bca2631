use crate::library::{CoverArt, Track, TrackInfo};

/// A rich "now playing" style message for one track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackCard {
    pub heading: String,
    pub title: String,
    pub fields: Vec<(String, String)>,
    pub thumbnail: Option<CoverArt>,
}

impl TrackCard {
    /// Build a card from whatever metadata resolved; the display name
    /// stands in for a missing title.
    pub fn new(heading: impl Into<String>, track: &Track, info: TrackInfo) -> Self {
        let mut fields = Vec::new();
        if let Some(artist) = info.artist {
            fields.push(("Artist".to_string(), artist));
        }
        if let Some(album) = info.album {
            fields.push(("Album".to_string(), album));
        }
        fields.push(("File".to_string(), track.display_name.clone()));

        Self {
            heading: heading.into(),
            title: info.title.unwrap_or_else(|| track.display_name.clone()),
            fields,
            thumbnail: info.cover,
        }
    }

    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }
}
