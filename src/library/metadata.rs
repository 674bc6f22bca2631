use std::path::Path;

use lofty::prelude::*;
use log::debug;

use super::model::Track;

/// Embedded cover image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverArt {
    pub mime_type: Option<String>,
    pub data: Vec<u8>,
}

/// Tag metadata for a track. Every field may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackInfo {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub cover: Option<CoverArt>,
}

impl TrackInfo {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.artist.is_none() && self.album.is_none() && self.cover.is_none()
    }
}

/// Read tags from `track`. Never fails: unreadable files and missing tags
/// come back as an empty `TrackInfo`.
pub fn resolve(track: &Track) -> TrackInfo {
    match read_tags(&track.path) {
        Ok(info) => info,
        Err(err) => {
            debug!("no metadata for {}: {err}", track.path.display());
            TrackInfo::default()
        }
    }
}

fn non_blank(v: Option<std::borrow::Cow<'_, str>>) -> Option<String> {
    v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

fn read_tags(path: &Path) -> Result<TrackInfo, lofty::error::LoftyError> {
    let tagged = lofty::read_from_path(path)?;

    let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) else {
        return Ok(TrackInfo::default());
    };

    let cover = tag.pictures().first().map(|pic| CoverArt {
        mime_type: pic.mime_type().map(|m| m.as_str().to_string()),
        data: pic.data().to_vec(),
    });

    Ok(TrackInfo {
        title: non_blank(tag.title()),
        artist: non_blank(tag.artist()),
        album: non_blank(tag.album()),
        cover,
    })
}
