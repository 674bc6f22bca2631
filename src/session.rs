//! Per-channel playback sessions.
//!
//! `PlaybackSession` is the state record the continuation controller reads
//! and writes; `SessionStore` keeps one per channel behind its own lock so
//! channels never contend with each other.

mod model;
mod store;

pub use model::{ChannelId, PlaybackSession, SessionState, UserId};
pub use store::SessionStore;
