use super::voices::{Output, VoiceTable};
use crate::session::ChannelId;
use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Clone, Default)]
struct FakeOutput {
    finished: Rc<Cell<bool>>,
    stopped: Rc<Cell<bool>>,
}

impl Output for FakeOutput {
    fn stop(&self) {
        self.stopped.set(true);
    }

    fn finished(&self) -> bool {
        self.finished.get()
    }
}

fn counter() -> (Arc<AtomicUsize>, super::TrackEndedFn) {
    let hits = Arc::new(AtomicUsize::new(0));
    let h = hits.clone();
    (hits, Box::new(move || {
        h.fetch_add(1, Ordering::SeqCst);
    }))
}

fn fire_all(table: &mut VoiceTable<FakeOutput>) -> usize {
    let done = table.take_finished();
    let n = done.len();
    for (_, cb) in done {
        cb();
    }
    n
}

#[test]
fn natural_end_fires_exactly_once() {
    let ch = ChannelId(1);
    let mut table = VoiceTable::new();
    table.open(ch);

    let out = FakeOutput::default();
    let (hits, cb) = counter();
    assert!(table.play(ch, out.clone(), cb));

    assert_eq!(fire_all(&mut table), 0);
    out.finished.set(true);
    assert_eq!(fire_all(&mut table), 1);
    assert_eq!(fire_all(&mut table), 0);
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[test]
fn halt_stops_output_and_never_fires() {
    let ch = ChannelId(1);
    let mut table = VoiceTable::new();
    table.open(ch);

    let out = FakeOutput::default();
    let (hits, cb) = counter();
    table.play(ch, out.clone(), cb);
    table.halt(ch);

    assert!(out.stopped.get());
    out.finished.set(true);
    assert_eq!(fire_all(&mut table), 0);
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

#[test]
fn replacing_a_track_drops_the_old_callback() {
    let ch = ChannelId(1);
    let mut table = VoiceTable::new();
    table.open(ch);

    let first = FakeOutput::default();
    let (first_hits, cb1) = counter();
    table.play(ch, first.clone(), cb1);

    let second = FakeOutput::default();
    let (second_hits, cb2) = counter();
    table.play(ch, second.clone(), cb2);

    assert!(first.stopped.get());
    first.finished.set(true);
    second.finished.set(true);
    assert_eq!(fire_all(&mut table), 1);
    assert_eq!(first_hits.load(Ordering::SeqCst), 0);
    assert_eq!(second_hits.load(Ordering::SeqCst), 1);
}

#[test]
fn play_on_unopened_channel_is_refused() {
    let mut table = VoiceTable::new();
    let out = FakeOutput::default();
    let (hits, cb) = counter();

    assert!(!table.play(ChannelId(3), out.clone(), cb));
    assert!(out.stopped.get());
    assert_eq!(fire_all(&mut table), 0);
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

#[test]
fn close_silences_only_that_channel() {
    let (a, b) = (ChannelId(1), ChannelId(2));
    let mut table = VoiceTable::new();
    table.open(a);
    table.open(b);

    let out_a = FakeOutput::default();
    let out_b = FakeOutput::default();
    let (hits_a, cb_a) = counter();
    let (hits_b, cb_b) = counter();
    table.play(a, out_a.clone(), cb_a);
    table.play(b, out_b.clone(), cb_b);

    table.close(a);
    out_a.finished.set(true);
    out_b.finished.set(true);

    assert_eq!(fire_all(&mut table), 1);
    assert_eq!(hits_a.load(Ordering::SeqCst), 0);
    assert_eq!(hits_b.load(Ordering::SeqCst), 1);
}

#[test]
fn close_all_stops_playing_voices() {
    let ch = ChannelId(1);
    let mut table = VoiceTable::new();
    table.open(ch);

    let out = FakeOutput::default();
    let (hits, cb) = counter();
    table.play(ch, out.clone(), cb);

    table.close_all();
    assert!(out.stopped.get());
    assert_eq!(fire_all(&mut table), 0);
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}
