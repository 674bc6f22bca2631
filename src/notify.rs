//! Presentation layer: how replies, track cards and paged listings reach
//! the user, and how navigation input comes back.

mod card;
mod console;

use std::fmt;
use std::time::Duration;

use crate::pager::Page;
use crate::session::UserId;

pub use card::TrackCard;
pub use console::ConsoleNotifier;

/// Identifies a paged message so it can be edited later.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct MessageHandle(pub u64);

impl fmt::Display for MessageHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "msg-{}", self.0)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

/// Someone reacted to a paged message. `direction` is `None` for input
/// that is not a navigation control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationInput {
    pub user: UserId,
    pub direction: Option<Direction>,
}

pub trait Notifier: Send + Sync {
    fn send_text(&self, text: &str);

    fn send_rich(&self, card: &TrackCard);

    /// Post `page` for `asker`; with `navigable` set, attach previous/next
    /// controls.
    fn send_paged(&self, page: &Page, asker: UserId, navigable: bool) -> MessageHandle;

    fn edit_paged(&self, handle: MessageHandle, page: &Page);

    /// Remove the navigation controls from a paged message.
    fn clear_navigation(&self, handle: MessageHandle);

    /// Wait up to `timeout` for the next input on `handle`. `None` on timeout.
    fn await_navigation(&self, handle: MessageHandle, timeout: Duration)
    -> Option<NavigationInput>;
}
