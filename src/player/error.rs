use thiserror::Error;

use crate::audio::TransportError;
use crate::library::CatalogError;

/// Failures of player operations. `Display` is the reply shown to the user.
#[derive(Debug, Error)]
pub enum PlayerError {
    #[error("I'm not in a voice channel here. Use join first.")]
    NoVoiceConnection,
    #[error("The music folder has no playable tracks.")]
    EmptyCatalog,
    #[error("No tracks match \"{0}\".")]
    NoMatches(String),
    #[error("Nothing is playing.")]
    NothingPlaying,
    #[error("{0}")]
    Catalog(#[from] CatalogError),
    #[error("Playback failed: {0}")]
    Transport(#[from] TransportError),
}

pub type Result<T> = std::result::Result<T, PlayerError>;
