use std::sync::PoisonError;
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::thread;
use std::thread::JoinHandle;
use std::time::Duration;

use log::{debug, error, warn};
use rodio::{OutputStreamBuilder, Sink};

use crate::config::AudioSettings;

use super::sink::create_sink;
use super::types::{ConnectedHandle, VoiceCmd};
use super::voices::VoiceTable;

pub(super) fn spawn_audio_thread(
    rx: Receiver<VoiceCmd>,
    connected: ConnectedHandle,
    audio_settings: AudioSettings,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let mut stream = match OutputStreamBuilder::open_default_stream() {
            Ok(s) => s,
            Err(e) => {
                error!("no audio output device: {e}");
                // Nothing can play: every channel counts as disconnected.
                connected
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .clear();
                return;
            }
        };
        stream.log_on_drop(false);

        let poll = Duration::from_millis(audio_settings.poll_interval_ms.max(1));
        let mut voices: VoiceTable<Sink> = VoiceTable::new();

        loop {
            match rx.recv_timeout(poll) {
                Ok(VoiceCmd::Open(channel)) => {
                    debug!("voice {channel} opened");
                    voices.open(channel);
                }
                Ok(VoiceCmd::Close(channel)) => {
                    debug!("voice {channel} closed");
                    voices.close(channel);
                }
                Ok(VoiceCmd::Play {
                    channel,
                    source,
                    on_ended,
                }) => {
                    let sink = create_sink(&stream, source);
                    if !voices.play(channel, sink, on_ended) {
                        warn!("dropping track for {channel}: channel is not connected");
                    }
                }
                Ok(VoiceCmd::Halt(channel)) => {
                    voices.halt(channel);
                }
                Ok(VoiceCmd::Quit) | Err(RecvTimeoutError::Disconnected) => {
                    voices.close_all();
                    debug!("audio thread stopping");
                    break;
                }
                Err(RecvTimeoutError::Timeout) => {}
            }

            // After every wakeup, not just timeouts.
            for (channel, on_ended) in voices.take_finished() {
                debug!("track finished on {channel}");
                on_ended();
            }
        }
    })
}
