use std::path::{Path, PathBuf};

/// A playable file from the catalog.
///
/// `display_name` is the file stem and is derived from `path` once, at
/// enumeration time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub path: PathBuf,
    pub display_name: String,
}

impl Track {
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let display_name = display_name_of(&path);
        Self { path, display_name }
    }
}

fn display_name_of(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("UNKNOWN")
        .to_string()
}
