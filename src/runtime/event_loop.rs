use std::sync::Arc;
use std::sync::mpsc::Receiver;
use std::thread;

use log::{debug, info, warn};

use crate::audio::Transport;
use crate::commands::{Command, Envelope, HELP, Parser};
use crate::config::{PagerSettings, Settings};
use crate::events::ControlEvent;
use crate::library::{self, Track};
use crate::notify::{ConsoleNotifier, NavigationInput, Notifier, TrackCard};
use crate::pager::paginate;
use crate::player::{LoopOutcome, Player, PlayerError};
use crate::session::{ChannelId, SessionState, UserId};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// The single thread that owns the player. Console lines and track-end
/// notices arrive through one inbox and are handled in arrival order.
pub struct ControlLoop<T: Transport> {
    player: Player<T>,
    notifier: Arc<ConsoleNotifier>,
    parser: Parser,
    pager: PagerSettings,
}

impl<T: Transport> ControlLoop<T> {
    pub fn new(player: Player<T>, notifier: Arc<ConsoleNotifier>, settings: &Settings) -> Self {
        Self {
            player,
            notifier,
            parser: Parser::new(&settings.console),
            pager: settings.pager.clone(),
        }
    }

    pub fn player(&self) -> &Player<T> {
        &self.player
    }

    /// Handle events until `quit`, end of input, or every sender is gone.
    pub fn run(&mut self, inbox: &Receiver<ControlEvent>) {
        while let Ok(event) = inbox.recv() {
            if self.handle(event) == Flow::Quit {
                break;
            }
        }
    }

    pub fn handle(&mut self, event: ControlEvent) -> Flow {
        match event {
            ControlEvent::Input(line) => match self.parser.parse(&line) {
                Ok(Some(envelope)) => {
                    let channel = envelope.channel;
                    match self.dispatch(envelope) {
                        Ok(flow) => flow,
                        Err(e) => {
                            debug!("{channel}: command failed: {e}");
                            self.notifier.send_text(&e.to_string());
                            Flow::Continue
                        }
                    }
                }
                Ok(None) => Flow::Continue,
                Err(e) => {
                    self.notifier.send_text(&e.to_string());
                    Flow::Continue
                }
            },
            ControlEvent::TrackEnded(ended) => {
                if let Some(track) = self.player.on_track_ended(ended) {
                    self.notifier
                        .send_text(&format!("{}: looping into {}", ended.channel, track.display_name));
                }
                Flow::Continue
            }
            ControlEvent::Shutdown => {
                info!("input closed, shutting down");
                Flow::Quit
            }
        }
    }

    fn dispatch(&mut self, envelope: Envelope) -> Result<Flow, PlayerError> {
        let Envelope {
            channel,
            user,
            command,
        } = envelope;

        match command {
            Command::Join => {
                self.player.join(channel)?;
                self.notifier.send_text(&format!("Joined {channel}."));
            }
            Command::Leave => {
                self.player.leave(channel)?;
                self.notifier.send_text(&format!("Left {channel}."));
            }
            Command::Play(query) => {
                let track = self.player.start_play(channel, &query)?;
                self.announce("Now playing", &track, Vec::new());
            }
            Command::Loop(query) => match self.player.start_loop(channel, &query)? {
                LoopOutcome::Started { track, pool_size } => {
                    let pool = format!("{pool_size} tracks");
                    self.announce("Looping", &track, vec![("Pool", pool)]);
                }
                LoopOutcome::Stopped { track } => {
                    let text = match track {
                        Some(track) => format!("Loop switched off, stopped {}.", track.display_name),
                        None => "Loop switched off.".to_string(),
                    };
                    self.notifier.send_text(&text);
                }
            },
            Command::Stop => {
                let track = self.player.stop(channel)?;
                self.notifier
                    .send_text(&format!("Stopped {}.", track.display_name));
            }
            Command::Now => {
                let now = self.player.now_playing(channel)?;
                let heading = match now.state {
                    SessionState::Looping => "Now looping",
                    SessionState::Playing => "Now playing",
                    SessionState::Idle | SessionState::Ended => "Last played",
                };
                self.announce(heading, &now.track, Vec::new());
            }
            Command::List(query) => {
                let entries = self
                    .player
                    .search(&query)?
                    .into_iter()
                    .map(|t| t.display_name)
                    .collect();
                self.spawn_listing(channel, user, entries);
            }
            Command::Navigate(direction) => {
                let input = NavigationInput {
                    user,
                    direction: Some(direction),
                };
                if !self.notifier.route_navigation(input) {
                    debug!("{user}: no listing to navigate");
                }
            }
            Command::Help => self.notifier.send_text(HELP),
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    fn announce(&self, heading: &str, track: &Track, extra: Vec<(&str, String)>) {
        let mut card = TrackCard::new(heading, track, library::resolve(track));
        for (name, value) in extra {
            card = card.with_field(name, value);
        }
        self.notifier.send_rich(&card);
    }

    /// Listings wait for navigation, so they run on their own thread.
    fn spawn_listing(&self, channel: ChannelId, user: UserId, entries: Vec<String>) {
        let notifier = Arc::clone(&self.notifier);
        let settings = self.pager.clone();
        let spawned = thread::Builder::new()
            .name(format!("pager-{}", channel.0))
            .spawn(move || {
                let exit = paginate(notifier.as_ref(), entries, user, &settings);
                debug!("{channel}: listing for {user} done: {exit:?}");
            });
        if let Err(e) = spawned {
            warn!("{channel}: could not start listing: {e}");
            self.notifier.send_text("Could not show the listing.");
        }
    }
}
