//! Parsing console lines into commands.
//!
//! A line is `[#<channel>] [~<user>] <command> [query]`. Commands carry the
//! configured prefix (`!play love`); navigation (`<`, `>`, `prev`, `next`)
//! and the console's own `help`/`quit` work with or without it. Lines that
//! are neither are chatter and parse to `None`.

use thiserror::Error;

use crate::config::ConsoleSettings;
use crate::notify::Direction;
use crate::session::{ChannelId, UserId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Join,
    Leave,
    Play(String),
    Stop,
    Loop(String),
    List(String),
    Now,
    Navigate(Direction),
    Help,
    Quit,
}

/// A command together with where it was issued and by whom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    pub channel: ChannelId,
    pub user: UserId,
    pub command: Command,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unknown command \"{0}\". Try help.")]
    Unknown(String),
    #[error("\"{0}\" is not a channel number.")]
    BadChannel(String),
    #[error("\"{0}\" is not a user number.")]
    BadUser(String),
}

pub const HELP: &str = "\
Commands (prefix each with the command prefix):
  join              connect to the channel
  leave             disconnect and stop everything
  play [query]      play one random track, matching the query if possible
  loop [query]      keep playing random tracks; loop with no query toggles off
  stop              stop playback and any loop
  now               show the current track
  list [query]      list tracks, 10 per page
Navigation: < or prev, > or next
Address a channel with #<n> and a user with ~<n>, e.g. \"#2 ~5 !loop rain\".
help, quit";

#[derive(Debug, Clone)]
pub struct Parser {
    prefix: String,
    default_channel: ChannelId,
    default_user: UserId,
}

impl Parser {
    pub fn new(settings: &ConsoleSettings) -> Self {
        Self {
            prefix: settings.command_prefix.clone(),
            default_channel: ChannelId(settings.default_channel),
            default_user: UserId(settings.default_user),
        }
    }

    pub fn parse(&self, line: &str) -> Result<Option<Envelope>, ParseError> {
        let mut channel = self.default_channel;
        let mut user = self.default_user;
        let mut rest = line.trim();

        loop {
            let (head, tail) = split_word(rest);
            if let Some(n) = head.strip_prefix('#') {
                let n = n.parse().map_err(|_| ParseError::BadChannel(head.to_string()))?;
                channel = ChannelId(n);
            } else if let Some(n) = head.strip_prefix('~') {
                let n = n.parse().map_err(|_| ParseError::BadUser(head.to_string()))?;
                user = UserId(n);
            } else {
                break;
            }
            rest = tail;
        }

        let (word, args) = split_word(rest);
        let command = match word {
            "" => return Ok(None),
            "<" | "prev" => Command::Navigate(Direction::Previous),
            ">" | "next" => Command::Navigate(Direction::Next),
            "help" => Command::Help,
            "quit" | "exit" => Command::Quit,
            _ => match word.strip_prefix(self.prefix.as_str()) {
                Some(name) => named(name, args)?,
                None => return Ok(None),
            },
        };

        Ok(Some(Envelope {
            channel,
            user,
            command,
        }))
    }
}

fn named(name: &str, args: &str) -> Result<Command, ParseError> {
    let query = args.to_string();
    let command = match name.to_lowercase().as_str() {
        "join" => Command::Join,
        "leave" => Command::Leave,
        "play" | "p" => Command::Play(query),
        "loop" => Command::Loop(query),
        "stop" => Command::Stop,
        "now" | "np" => Command::Now,
        "list" | "ls" => Command::List(query),
        "prev" => Command::Navigate(Direction::Previous),
        "next" => Command::Navigate(Direction::Next),
        "help" => Command::Help,
        "quit" => Command::Quit,
        _ => return Err(ParseError::Unknown(name.to_string())),
    };
    Ok(command)
}

/// First whitespace-separated word and the trimmed remainder.
fn split_word(s: &str) -> (&str, &str) {
    match s.split_once(char::is_whitespace) {
        Some((head, tail)) => (head, tail.trim()),
        None => (s, ""),
    }
}
