use std::fmt;
use std::sync::Arc;

use crate::library::Track;

/// An addressable playback destination.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChannelId(pub u64);

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Whoever issued a command.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct UserId(pub u64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "~{}", self.0)
    }
}

/// Where a channel's session currently stands.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// Nothing has been submitted yet.
    Idle,
    /// A single track is playing; its end is terminal.
    Playing,
    /// A track is playing and its end picks the next one from the pool.
    Looping,
    /// The last track was halted or finished; nothing is playing.
    Ended,
}

/// Playback state for one channel.
#[derive(Debug, Clone)]
pub struct PlaybackSession {
    pub channel_id: ChannelId,
    /// The track currently (or most recently) submitted.
    pub current_track: Option<Track>,
    pub is_looping: bool,
    /// Whether the transport is believed to be playing `current_track`.
    pub is_playing: bool,
    /// Tracks eligible for the next pick during this loop run.
    /// Fixed until the loop is restarted.
    pub candidate_pool: Arc<[Track]>,
    /// Bumped on every submission, halt and cancellation. Only the
    /// continuation armed with the current value may advance the session.
    pub generation: u64,
}

impl PlaybackSession {
    pub fn new(channel_id: ChannelId) -> Self {
        Self {
            channel_id,
            current_track: None,
            is_looping: false,
            is_playing: false,
            candidate_pool: Arc::from(Vec::new()),
            generation: 0,
        }
    }

    pub fn current_track_name(&self) -> Option<&str> {
        self.current_track.as_ref().map(|t| t.display_name.as_str())
    }

    pub fn state(&self) -> SessionState {
        match (&self.current_track, self.is_playing, self.is_looping) {
            (None, _, _) => SessionState::Idle,
            (Some(_), true, true) => SessionState::Looping,
            (Some(_), true, false) => SessionState::Playing,
            (Some(_), false, _) => SessionState::Ended,
        }
    }
}
