//! Audio-related small types: transport errors, the end-of-track callback
//! and the commands sent to the audio thread.

use std::collections::HashSet;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use rodio::Decoder;
use rodio::decoder::DecoderError;
use thiserror::Error;

use crate::session::ChannelId;

/// Invoked exactly once when a submitted track finishes on its own.
/// Never invoked when the track is halted, replaced or disconnected.
pub type TrackEndedFn = Box<dyn FnOnce() + Send + 'static>;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("not connected to voice channel {0}")]
    NotConnected(ChannelId),
    #[error("cannot open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot decode {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: DecoderError,
    },
    #[error("audio output is no longer available")]
    Closed,
}

pub(super) type TrackSource = Decoder<BufReader<File>>;

pub(super) enum VoiceCmd {
    /// Start tracking a newly connected channel.
    Open(ChannelId),
    /// Stop and forget a channel.
    Close(ChannelId),
    /// Replace whatever the channel plays with `source`.
    Play {
        channel: ChannelId,
        source: TrackSource,
        on_ended: TrackEndedFn,
    },
    /// Stop the channel's track without reporting its end.
    Halt(ChannelId),
    Quit,
}

/// Channels with a live connection, shared between the transport handle
/// and the audio thread.
pub type ConnectedHandle = Arc<Mutex<HashSet<ChannelId>>>;
