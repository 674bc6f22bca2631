use serde::{Deserialize, Serialize};

/// Top-level settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/tuneloop/config.toml` or `~/.config/tuneloop/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `TUNELOOP__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub library: LibrarySettings,
    pub playback: PlaybackSettings,
    pub audio: AudioSettings,
    pub pager: PagerSettings,
    pub console: ConsoleSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// Catalog root. A path given on the command line wins over this.
    pub root: String,
    /// File extensions to treat as audio (case-insensitive, without dot).
    pub extensions: Vec<String>,
    /// Whether to follow symlinks during scanning.
    pub follow_links: bool,
    /// Whether to include hidden files/directories (dotfiles).
    pub include_hidden: bool,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            root: "Music".to_string(),
            extensions: vec![
                "mp3".into(),
                "wav".into(),
                "flac".into(),
                "m4a".into(),
                "aac".into(),
            ],
            follow_links: true,
            include_hidden: true,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct PlaybackSettings {
    /// What `loop <query>` does when the query matches nothing.
    pub loop_no_match: NoMatchPolicy,
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum NoMatchPolicy {
    /// Tell the user nothing matched and leave playback alone.
    #[default]
    #[serde(alias = "strict")]
    Report,
    /// Loop over the whole catalog instead, like `play` does.
    #[serde(alias = "all", alias = "everything")]
    Fallback,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AudioSettings {
    /// How often the audio thread checks whether a track has run out (milliseconds).
    pub poll_interval_ms: u64,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            poll_interval_ms: 200,
        }
    }
}

/// Longest accepted listing timeout: one day.
pub const MAX_PAGER_TIMEOUT_SECS: u64 = 24 * 60 * 60;

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PagerSettings {
    /// Entries per page in `list` output.
    pub page_size: usize,
    /// Seconds without navigation before a listing stops listening.
    pub timeout_secs: u64,
}

impl Default for PagerSettings {
    fn default() -> Self {
        Self {
            page_size: 10,
            timeout_secs: 60,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ConsoleSettings {
    /// Prefix that marks a line as a command, e.g. `!play`.
    pub command_prefix: String,
    /// Channel addressed when a line has no `#<channel>` token.
    pub default_channel: u64,
    /// User issuing commands when a line has no `~<user>` token.
    pub default_user: u64,
}

impl Default for ConsoleSettings {
    fn default() -> Self {
        Self {
            command_prefix: "!".to_string(),
            default_channel: 1,
            default_user: 1,
        }
    }
}
