//! Messages delivered into the control loop's inbox.
//!
//! Everything that mutates playback sessions arrives here first: console
//! input from the reader thread and track-end notices from the audio
//! thread. The loop handles them one at a time, in arrival order.

use crate::session::ChannelId;

/// A submitted track finished on its own.
///
/// `generation` is the session generation the track was submitted under;
/// a notice carrying an older generation is stale and must be ignored.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct TrackEnded {
    pub channel: ChannelId,
    pub generation: u64,
}

#[derive(Debug)]
pub enum ControlEvent {
    /// One line typed at the console.
    Input(String),
    TrackEnded(TrackEnded),
    /// Input closed; stop the loop.
    Shutdown,
}
