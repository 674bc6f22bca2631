use crate::library::Track;
use crate::session::ChannelId;

use super::types::{TrackEndedFn, TransportError};

/// A voice connection per channel that can play one track at a time.
///
/// `submit` replaces any track already playing on the channel. The
/// `on_ended` callback is called exactly once if the track finishes on its
/// own, from whatever thread the transport runs on, and never if the track
/// is halted, replaced or the channel disconnects first.
pub trait Transport {
    fn connect(&self, channel: ChannelId) -> Result<(), TransportError>;

    fn disconnect(&self, channel: ChannelId) -> Result<(), TransportError>;

    fn is_connected(&self, channel: ChannelId) -> bool;

    fn submit(
        &self,
        channel: ChannelId,
        track: &Track,
        on_ended: TrackEndedFn,
    ) -> Result<(), TransportError>;

    fn halt(&self, channel: ChannelId) -> Result<(), TransportError>;
}
