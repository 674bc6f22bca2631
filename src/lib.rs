//! Unattended playback sessions over a local music folder: random single
//! plays, query-scoped random loops per channel, and paged track listings.

pub mod audio;
pub mod commands;
pub mod config;
pub mod events;
pub mod library;
pub mod notify;
pub mod pager;
pub mod player;
pub mod runtime;
pub mod session;
