//! Helpers for turning `Track` values into playing `rodio` sinks.
//!
//! Opening and decoding happen on the caller's thread so a bad file is
//! reported by `submit` itself; the audio thread only attaches the ready
//! source to a sink.

use std::fs::File;
use std::io::BufReader;

use rodio::{Decoder, OutputStream, Sink};

use crate::library::Track;

use super::types::{TrackSource, TransportError};

pub(super) fn open_source(track: &Track) -> Result<TrackSource, TransportError> {
    let file = File::open(&track.path).map_err(|source| TransportError::Open {
        path: track.path.clone(),
        source,
    })?;

    Decoder::new(BufReader::new(file)).map_err(|source| TransportError::Decode {
        path: track.path.clone(),
        source,
    })
}

/// Create a playing `Sink` on `stream` fed by `source`.
pub(super) fn create_sink(stream: &OutputStream, source: TrackSource) -> Sink {
    let sink = Sink::connect_new(stream.mixer());
    sink.set_volume(1.0);
    sink.append(source);
    sink.play();
    sink
}
