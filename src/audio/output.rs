use std::collections::HashSet;
use std::sync::mpsc::{self, Sender};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::JoinHandle;

use crate::config::AudioSettings;
use crate::library::Track;
use crate::session::ChannelId;

use super::sink::open_source;
use super::thread::spawn_audio_thread;
use super::transport::Transport;
use super::types::{ConnectedHandle, TrackEndedFn, TransportError, VoiceCmd};

/// Local speakers as a transport: every connected channel gets its own
/// sink on the default output device.
pub struct RodioTransport {
    tx: Sender<VoiceCmd>,
    connected: ConnectedHandle,
    join: Mutex<Option<JoinHandle<()>>>,
}

impl RodioTransport {
    pub fn new(audio_settings: AudioSettings) -> Self {
        let (tx, rx) = mpsc::channel::<VoiceCmd>();
        let connected: ConnectedHandle = Arc::new(Mutex::new(HashSet::new()));

        let audio_handle = spawn_audio_thread(rx, connected.clone(), audio_settings);

        Self {
            tx,
            connected,
            join: Mutex::new(Some(audio_handle)),
        }
    }

    fn connected(&self) -> MutexGuard<'_, HashSet<ChannelId>> {
        self.connected.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn send(&self, cmd: VoiceCmd) -> Result<(), TransportError> {
        self.tx.send(cmd).map_err(|_| TransportError::Closed)
    }

    /// Stop every voice and wait for the audio thread to exit.
    pub fn shutdown(&self) {
        let _ = self.send(VoiceCmd::Quit);
        self.connected().clear();

        if let Ok(mut j) = self.join.lock() {
            if let Some(h) = j.take() {
                let _ = h.join();
            }
        }
    }
}

impl Transport for RodioTransport {
    fn connect(&self, channel: ChannelId) -> Result<(), TransportError> {
        if !self.connected().insert(channel) {
            return Ok(());
        }
        self.send(VoiceCmd::Open(channel)).inspect_err(|_| {
            self.connected().remove(&channel);
        })
    }

    fn disconnect(&self, channel: ChannelId) -> Result<(), TransportError> {
        if !self.connected().remove(&channel) {
            return Err(TransportError::NotConnected(channel));
        }
        self.send(VoiceCmd::Close(channel))
    }

    fn is_connected(&self, channel: ChannelId) -> bool {
        self.connected().contains(&channel)
    }

    fn submit(
        &self,
        channel: ChannelId,
        track: &Track,
        on_ended: TrackEndedFn,
    ) -> Result<(), TransportError> {
        if !self.is_connected(channel) {
            return Err(TransportError::NotConnected(channel));
        }
        let source = open_source(track)?;
        self.send(VoiceCmd::Play {
            channel,
            source,
            on_ended,
        })
    }

    fn halt(&self, channel: ChannelId) -> Result<(), TransportError> {
        if !self.is_connected(channel) {
            return Err(TransportError::NotConnected(channel));
        }
        self.send(VoiceCmd::Halt(channel))
    }
}
