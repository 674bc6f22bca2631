//! Audio transport: the voice-connection contract the player drives and a
//! `rodio` implementation that plays on the local output device.
//!
//! The audio thread owns every sink. It reports natural track ends by
//! calling the callback handed to `submit`; callers must not touch their
//! own state from that callback beyond forwarding a message.

mod output;
mod sink;
mod thread;
mod transport;
mod types;
mod voices;

pub use output::RodioTransport;
pub use transport::Transport;
pub use types::{TrackEndedFn, TransportError};

#[cfg(test)]
mod tests;
