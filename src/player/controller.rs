use std::sync::Arc;
use std::sync::mpsc::Sender;

use log::{debug, info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;

use crate::audio::{TrackEndedFn, Transport};
use crate::config::{NoMatchPolicy, PlaybackSettings};
use crate::events::{ControlEvent, TrackEnded};
use crate::library::{Catalog, Track, matches};
use crate::session::{ChannelId, PlaybackSession, SessionState, SessionStore};

use super::error::{PlayerError, Result};

/// Result of a `loop` request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoopOutcome {
    /// A loop run began with `track`, picking from `pool_size` tracks.
    Started { track: Track, pool_size: usize },
    /// The running loop was switched off; `track` was halted.
    Stopped { track: Option<Track> },
}

/// What `now` reports for a channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NowPlaying {
    pub track: Track,
    pub state: SessionState,
}

/// What a track end leads to. `Finished` and `Disconnected` carry the name
/// of the track that ended.
enum Advance {
    Stale,
    Finished(Option<String>),
    Disconnected(Option<String>),
    Next(Track, u64),
}

/// Drives every channel's session: picks tracks, submits them and keeps
/// loops going when tracks end.
///
/// All methods run on the control loop. The transport reports track ends
/// from its own thread; the callback armed here only forwards a
/// `TrackEnded` into the loop's inbox, which then calls `on_track_ended`.
pub struct Player<T: Transport> {
    catalog: Catalog,
    transport: T,
    sessions: SessionStore,
    inbox: Sender<ControlEvent>,
    rng: StdRng,
    loop_no_match: NoMatchPolicy,
}

impl<T: Transport> Player<T> {
    pub fn new(
        catalog: Catalog,
        transport: T,
        inbox: Sender<ControlEvent>,
        settings: &PlaybackSettings,
    ) -> Self {
        Self {
            catalog,
            transport,
            sessions: SessionStore::new(),
            inbox,
            rng: StdRng::seed_from_u64(rand::random()),
            loop_no_match: settings.loop_no_match,
        }
    }

    /// Replace the random source, e.g. with a seeded one.
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    pub fn join(&self, channel: ChannelId) -> Result<()> {
        self.transport.connect(channel)?;
        info!("joined {channel}");
        Ok(())
    }

    /// Disconnect and cancel whatever continuation is armed for the channel.
    pub fn leave(&self, channel: ChannelId) -> Result<()> {
        self.require_connection(channel)?;
        self.cancel(channel);
        self.transport.disconnect(channel)?;
        info!("left {channel}");
        Ok(())
    }

    /// Play one random track, preferring tracks matching `query`.
    ///
    /// A query that matches nothing falls back to the whole catalog.
    pub fn start_play(&mut self, channel: ChannelId, query: &str) -> Result<Track> {
        self.require_connection(channel)?;
        let tracks = self.load_catalog()?;

        let matched = matches(&tracks, query);
        let pool = if matched.is_empty() { tracks } else { matched };
        let track = self.pick(&pool).ok_or(PlayerError::EmptyCatalog)?;

        self.begin(channel, track.clone(), false, Arc::from(Vec::new()))?;
        info!("{channel}: playing {}", track.display_name);
        Ok(track)
    }

    /// Start looping random tracks from the matches of `query` (or the
    /// whole catalog for an empty query). With an empty query while a loop
    /// is running, switches the loop off instead.
    pub fn start_loop(&mut self, channel: ChannelId, query: &str) -> Result<LoopOutcome> {
        self.require_connection(channel)?;

        let query = query.trim();
        let looping = self
            .sessions
            .get(channel)
            .is_some_and(|s| s.is_looping);
        if looping && query.is_empty() {
            let track = self.halt(channel)?;
            info!("{channel}: loop switched off");
            return Ok(LoopOutcome::Stopped { track });
        }

        let tracks = self.load_catalog()?;
        let pool = if query.is_empty() {
            tracks
        } else {
            let matched = matches(&tracks, query);
            match (matched.is_empty(), self.loop_no_match) {
                (false, _) => matched,
                (true, NoMatchPolicy::Fallback) => tracks,
                (true, NoMatchPolicy::Report) => {
                    return Err(PlayerError::NoMatches(query.to_string()));
                }
            }
        };

        let track = self.pick(&pool).ok_or(PlayerError::EmptyCatalog)?;
        let pool_size = pool.len();
        self.begin(channel, track.clone(), true, Arc::from(pool))?;
        info!(
            "{channel}: looping over {pool_size} tracks, starting with {}",
            track.display_name
        );
        Ok(LoopOutcome::Started { track, pool_size })
    }

    /// Continue the session after a track finished on its own.
    ///
    /// Returns the next track when the loop goes on. Stale notices, ended
    /// single-shot tracks, stopped loops and dead connections all return
    /// `None` without touching the transport.
    pub fn on_track_ended(&mut self, ended: TrackEnded) -> Option<Track> {
        let channel = ended.channel;
        let live = self.transport.is_connected(channel);

        let step = self.sessions.update(channel, |s| {
            if s.generation != ended.generation {
                return Advance::Stale;
            }
            let ended_name = s.current_track_name().map(str::to_owned);
            if !s.is_looping {
                s.is_playing = false;
                return Advance::Finished(ended_name);
            }
            if !live {
                s.is_looping = false;
                s.is_playing = false;
                s.generation += 1;
                return Advance::Disconnected(ended_name);
            }
            match s.candidate_pool.choose(&mut self.rng).cloned() {
                Some(next) => {
                    s.generation += 1;
                    s.current_track = Some(next.clone());
                    s.is_playing = true;
                    Advance::Next(next, s.generation)
                }
                None => {
                    s.is_looping = false;
                    s.is_playing = false;
                    Advance::Finished(ended_name)
                }
            }
        })?;

        match step {
            Advance::Stale => {
                debug!("{channel}: ignoring stale end of generation {}", ended.generation);
                None
            }
            Advance::Finished(name) => {
                debug!(
                    "{channel}: {} finished, nothing to continue",
                    name.as_deref().unwrap_or("track")
                );
                None
            }
            Advance::Disconnected(name) => {
                info!(
                    "{channel}: connection gone after {}, loop cancelled",
                    name.as_deref().unwrap_or("track")
                );
                None
            }
            Advance::Next(next, generation) => {
                let armed = self.arm(channel, generation);
                match self.transport.submit(channel, &next, armed) {
                    Ok(()) => {
                        info!("{channel}: looping into {}", next.display_name);
                        Some(next)
                    }
                    Err(e) => {
                        warn!("{channel}: loop stopped, could not submit {}: {e}", next.display_name);
                        self.cancel(channel);
                        None
                    }
                }
            }
        }
    }

    /// Stop playback on the channel and end any loop.
    pub fn stop(&self, channel: ChannelId) -> Result<Track> {
        self.require_connection(channel)?;
        let track = self.halt(channel)?.ok_or(PlayerError::NothingPlaying)?;
        info!("{channel}: stopped {}", track.display_name);
        Ok(track)
    }

    /// The track most recently submitted on the channel.
    pub fn now_playing(&self, channel: ChannelId) -> Result<NowPlaying> {
        let session = self
            .sessions
            .get(channel)
            .ok_or(PlayerError::NothingPlaying)?;
        let state = session.state();
        let track = session.current_track.ok_or(PlayerError::NothingPlaying)?;
        Ok(NowPlaying { track, state })
    }

    /// Tracks to list for `query`: the whole catalog when it is empty,
    /// otherwise its matches, reporting when there are none.
    pub fn search(&self, query: &str) -> Result<Vec<Track>> {
        let tracks = self.load_catalog()?;
        if query.trim().is_empty() {
            return Ok(tracks);
        }
        let matched = matches(&tracks, query);
        if matched.is_empty() {
            return Err(PlayerError::NoMatches(query.trim().to_string()));
        }
        Ok(matched)
    }

    fn require_connection(&self, channel: ChannelId) -> Result<()> {
        if self.transport.is_connected(channel) {
            Ok(())
        } else {
            Err(PlayerError::NoVoiceConnection)
        }
    }

    fn load_catalog(&self) -> Result<Vec<Track>> {
        let tracks = self.catalog.enumerate()?;
        if tracks.is_empty() {
            return Err(PlayerError::EmptyCatalog);
        }
        Ok(tracks)
    }

    fn pick(&mut self, pool: &[Track]) -> Option<Track> {
        pool.choose(&mut self.rng).cloned()
    }

    /// Callback handed to the transport. Runs on the audio thread and only
    /// forwards a message; the session is touched later, by the loop.
    fn arm(&self, channel: ChannelId, generation: u64) -> TrackEndedFn {
        let inbox = self.inbox.clone();
        Box::new(move || {
            let ended = TrackEnded {
                channel,
                generation,
            };
            if inbox.send(ControlEvent::TrackEnded(ended)).is_err() {
                debug!("{channel}: control loop gone, dropping track end");
            }
        })
    }

    /// Replace the channel's session and submit `track`.
    ///
    /// The previous track is halted first, so exactly one track is current
    /// and at most one continuation is armed.
    fn begin(
        &mut self,
        channel: ChannelId,
        track: Track,
        looping: bool,
        pool: Arc<[Track]>,
    ) -> Result<()> {
        if let Err(e) = self.transport.halt(channel) {
            debug!("{channel}: nothing to interrupt: {e}");
        }

        let generation = self
            .sessions
            .get(channel)
            .map_or(0, |s| s.generation)
            + 1;
        self.sessions.set(
            channel,
            PlaybackSession {
                current_track: Some(track.clone()),
                is_looping: looping,
                is_playing: true,
                candidate_pool: pool,
                generation,
                ..PlaybackSession::new(channel)
            },
        );

        let armed = self.arm(channel, generation);
        if let Err(e) = self.transport.submit(channel, &track, armed) {
            self.cancel(channel);
            return Err(e.into());
        }
        Ok(())
    }

    /// Clear the loop flag, then halt. The order matters: any end notice
    /// already in flight sees `is_looping == false` (and an old generation)
    /// and does nothing.
    fn halt(&self, channel: ChannelId) -> Result<Option<Track>> {
        let halted = self
            .sessions
            .update(channel, |s| {
                let was_playing = s.is_playing;
                s.is_looping = false;
                s.is_playing = false;
                s.generation += 1;
                was_playing.then(|| s.current_track.clone()).flatten()
            })
            .flatten();

        if halted.is_some() {
            self.transport.halt(channel)?;
        }
        Ok(halted)
    }

    fn cancel(&self, channel: ChannelId) {
        self.sessions.update(channel, |s| {
            s.is_looping = false;
            s.is_playing = false;
            s.generation += 1;
        });
    }
}
