//! The continuation controller: starting, continuing and stopping playback
//! per channel.

mod controller;
mod error;

pub use controller::{LoopOutcome, NowPlaying, Player};
pub use error::{PlayerError, Result};
