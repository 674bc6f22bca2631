use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::debug;
use thiserror::Error;
use walkdir::WalkDir;

use crate::config::LibrarySettings;

use super::model::Track;

#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog root is missing or cannot be listed.
    #[error("music folder {} is unavailable: {source}", root.display())]
    Unavailable {
        root: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// The set of playable files under a root directory.
///
/// Holds no state beyond its settings; every `enumerate` walks the
/// filesystem again so files added while running are picked up.
#[derive(Debug, Clone)]
pub struct Catalog {
    root: PathBuf,
    settings: LibrarySettings,
}

impl Catalog {
    pub fn new(root: impl Into<PathBuf>, settings: LibrarySettings) -> Self {
        Self {
            root: root.into(),
            settings,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Recursively list every file with a supported extension.
    ///
    /// An existing but empty folder yields `Ok(vec![])`.
    pub fn enumerate(&self) -> Result<Vec<Track>, CatalogError> {
        scan(&self.root, &self.settings)
    }

}

/// Configured extensions, lowercased and without a leading dot.
fn wanted_extensions(settings: &LibrarySettings) -> Vec<String> {
    settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect()
}

fn is_audio_file(path: &Path, extensions: &[String]) -> bool {
    let Some(ext) = path.extension().and_then(|s| s.to_str()) else {
        return false;
    };
    extensions.iter().any(|e| e.eq_ignore_ascii_case(ext))
}

fn is_dotfile(path: &Path) -> bool {
    path.file_name()
        .is_some_and(|name| name.as_encoded_bytes().starts_with(b"."))
}

pub(super) fn scan(dir: &Path, settings: &LibrarySettings) -> Result<Vec<Track>, CatalogError> {
    // WalkDir reports a missing root as just another entry error.
    fs::read_dir(dir).map_err(|source| CatalogError::Unavailable {
        root: dir.to_path_buf(),
        source,
    })?;

    let extensions = wanted_extensions(settings);
    let mut tracks: Vec<Track> = Vec::new();
    let walker = WalkDir::new(dir).follow_links(settings.follow_links);

    for entry in walker
        .into_iter()
        .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_dotfile(e.path()))
    {
        let entry = match entry {
            Ok(e) => e,
            Err(err) => {
                debug!("skipping unreadable catalog entry: {err}");
                continue;
            }
        };

        let path = entry.path();
        if path.is_file() && is_audio_file(path, &extensions) {
            tracks.push(Track::from_path(path));
        }
    }

    tracks.sort_by(|a, b| {
        a.display_name
            .to_lowercase()
            .cmp(&b.display_name.to_lowercase())
    });
    debug!("scanned {} tracks under {}", tracks.len(), dir.display());
    Ok(tracks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn is_audio_file_matches_default_extensions_case_insensitive() {
        let exts = wanted_extensions(&LibrarySettings::default());
        assert!(is_audio_file(Path::new("/tmp/a.mp3"), &exts));
        assert!(is_audio_file(Path::new("/tmp/a.MP3"), &exts));
        assert!(is_audio_file(Path::new("/tmp/a.flac"), &exts));
        assert!(is_audio_file(Path::new("/tmp/a.wav"), &exts));
        assert!(is_audio_file(Path::new("/tmp/a.M4A"), &exts));
        assert!(is_audio_file(Path::new("/tmp/a.aac"), &exts));
        assert!(!is_audio_file(Path::new("/tmp/a.ogg"), &exts));
        assert!(!is_audio_file(Path::new("/tmp/a.txt"), &exts));
        assert!(!is_audio_file(Path::new("/tmp/a"), &exts));
    }

    #[test]
    fn configured_extensions_are_normalised_once() {
        let settings = LibrarySettings {
            extensions: vec![" .OGG ".into(), String::new(), "Flac".into()],
            ..LibrarySettings::default()
        };
        let exts = wanted_extensions(&settings);
        assert_eq!(exts, vec!["ogg".to_string(), "flac".to_string()]);
        assert!(is_audio_file(Path::new("/tmp/a.Ogg"), &exts));
        assert!(!is_audio_file(Path::new("/tmp/a.mp3"), &exts));
    }

    #[test]
    fn dotfiles_are_detected_by_file_name() {
        assert!(is_dotfile(Path::new("/music/.cache")));
        assert!(is_dotfile(Path::new("/music/.hidden.mp3")));
        assert!(!is_dotfile(Path::new("/music/.dir/visible.mp3")));
        assert!(!is_dotfile(Path::new("/")));
    }

    #[test]
    fn is_audio_file_requires_a_real_extension() {
        // "song_m4a" has no dot; a bare suffix match would accept it.
        let exts = wanted_extensions(&LibrarySettings::default());
        assert!(!is_audio_file(Path::new("/tmp/song_m4a"), &exts));
    }

    #[test]
    fn scan_walks_subdirectories_and_sorts_by_name() {
        let dir = tempdir().unwrap();
        let sub = dir.path().join("nested").join("deeper");
        fs::create_dir_all(&sub).unwrap();

        fs::write(dir.path().join("b.MP3"), b"not a real mp3").unwrap();
        fs::write(sub.join("A.flac"), b"not a real flac").unwrap();
        fs::write(dir.path().join("c.txt"), b"ignore me").unwrap();

        let tracks = scan(dir.path(), &LibrarySettings::default()).unwrap();
        let names: Vec<&str> = tracks.iter().map(|t| t.display_name.as_str()).collect();
        assert_eq!(names, vec!["A", "b"]);
        assert_eq!(tracks[0].path, sub.join("A.flac"));
    }

    #[test]
    fn scan_missing_root_is_unavailable() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope");

        let err = scan(&missing, &LibrarySettings::default()).unwrap_err();
        let CatalogError::Unavailable { root, .. } = err;
        assert_eq!(root, missing);
    }

    #[test]
    fn scan_empty_root_is_not_an_error() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("notes.txt"), b"no music here").unwrap();

        let tracks = scan(dir.path(), &LibrarySettings::default()).unwrap();
        assert!(tracks.is_empty());
    }

    #[test]
    fn scan_respects_include_hidden_false() {
        let dir = tempdir().unwrap();
        let hidden_dir = dir.path().join(".cache");
        fs::create_dir_all(&hidden_dir).unwrap();
        fs::write(hidden_dir.join("inside.mp3"), b"not real").unwrap();
        fs::write(dir.path().join(".hidden.mp3"), b"not real").unwrap();
        fs::write(dir.path().join("visible.mp3"), b"not real").unwrap();

        let settings = LibrarySettings {
            include_hidden: false,
            ..LibrarySettings::default()
        };
        let tracks = scan(dir.path(), &settings).unwrap();

        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].display_name, "visible");
    }
}
