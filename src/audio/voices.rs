//! Per-channel bookkeeping for the audio thread.
//!
//! Each connected channel owns at most one output and at most one armed
//! end callback. Replacing, halting or closing drops the callback unfired;
//! only `take_finished` hands callbacks out, and only once each.

use std::collections::HashMap;

use rodio::Sink;

use crate::session::ChannelId;

use super::types::TrackEndedFn;

pub(super) trait Output {
    fn stop(&self);
    fn finished(&self) -> bool;
}

impl Output for Sink {
    fn stop(&self) {
        Sink::stop(self);
    }

    fn finished(&self) -> bool {
        self.empty()
    }
}

struct Voice<O> {
    output: Option<O>,
    on_ended: Option<TrackEndedFn>,
}

impl<O: Output> Voice<O> {
    fn silence(&mut self) {
        if let Some(o) = self.output.take() {
            o.stop();
        }
        self.on_ended = None;
    }
}

pub(super) struct VoiceTable<O> {
    voices: HashMap<ChannelId, Voice<O>>,
}

impl<O: Output> VoiceTable<O> {
    pub(super) fn new() -> Self {
        Self {
            voices: HashMap::new(),
        }
    }

    pub(super) fn open(&mut self, channel: ChannelId) {
        self.voices.entry(channel).or_insert(Voice {
            output: None,
            on_ended: None,
        });
    }

    pub(super) fn close(&mut self, channel: ChannelId) {
        if let Some(mut v) = self.voices.remove(&channel) {
            v.silence();
        }
    }

    /// Swap in `output` for the channel. Returns `false` when the channel
    /// is not open, in which case `output` is stopped and dropped.
    pub(super) fn play(&mut self, channel: ChannelId, output: O, on_ended: TrackEndedFn) -> bool {
        let Some(voice) = self.voices.get_mut(&channel) else {
            output.stop();
            return false;
        };
        voice.silence();
        voice.output = Some(output);
        voice.on_ended = Some(on_ended);
        true
    }

    pub(super) fn halt(&mut self, channel: ChannelId) {
        if let Some(v) = self.voices.get_mut(&channel) {
            v.silence();
        }
    }

    /// Callbacks of every voice whose output ran dry since the last call.
    pub(super) fn take_finished(&mut self) -> Vec<(ChannelId, TrackEndedFn)> {
        let mut done = Vec::new();
        for (channel, voice) in self.voices.iter_mut() {
            let finished = voice.output.as_ref().is_some_and(|o| o.finished());
            if finished {
                voice.output = None;
                if let Some(cb) = voice.on_ended.take() {
                    done.push((*channel, cb));
                }
            }
        }
        done
    }

    pub(super) fn close_all(&mut self) {
        for (_, mut v) in self.voices.drain() {
            v.silence();
        }
    }
}
