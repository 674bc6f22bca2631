use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use crossterm::style::Stylize;

use crate::pager::Page;
use crate::session::UserId;

use super::{MessageHandle, NavigationInput, Notifier, TrackCard};

struct Listing {
    handle: MessageHandle,
    asker: UserId,
    tx: Sender<NavigationInput>,
    rx: Arc<Mutex<Receiver<NavigationInput>>>,
}

/// Prints replies to stdout. Navigation typed at the console goes to the
/// typist's own most recent listing that still has controls.
#[derive(Default)]
pub struct ConsoleNotifier {
    next_id: AtomicU64,
    listings: Mutex<Vec<Listing>>,
}

impl ConsoleNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    fn listings(&self) -> MutexGuard<'_, Vec<Listing>> {
        self.listings.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Hand `input` to the newest navigable listing opened by the same
    /// user. Returns `false` when that user has no listing waiting.
    pub fn route_navigation(&self, input: NavigationInput) -> bool {
        let listings = self.listings();
        match listings.iter().rev().find(|l| l.asker == input.user) {
            Some(listing) => listing.tx.send(input).is_ok(),
            None => false,
        }
    }

    fn print_page(&self, handle: MessageHandle, page: &Page, navigable: bool) {
        let mut out = io::stdout().lock();
        let _ = writeln!(out, "{}", format!("[{handle}] Tracks").bold());
        for line in page.lines() {
            let _ = writeln!(out, "  {line}");
        }
        let footer = if navigable {
            format!("{}  (< previous, > next)", page.footer())
        } else {
            page.footer()
        };
        let _ = writeln!(out, "  {}", footer.dark_grey());
    }
}

impl Notifier for ConsoleNotifier {
    fn send_text(&self, text: &str) {
        let mut out = io::stdout().lock();
        let _ = writeln!(out, "{}", text.cyan());
    }

    fn send_rich(&self, card: &TrackCard) {
        let mut out = io::stdout().lock();
        let _ = writeln!(out, "{} {}", card.heading.clone().green().bold(), card.title.clone().bold());
        for (name, value) in &card.fields {
            let _ = writeln!(out, "  {}: {value}", name.clone().dark_grey());
        }
        if let Some(cover) = &card.thumbnail {
            let kind = cover.mime_type.as_deref().unwrap_or("image");
            let _ = writeln!(
                out,
                "  {}",
                format!("[cover: {kind}, {} KiB]", cover.data.len().div_ceil(1024)).dark_grey()
            );
        }
    }

    fn send_paged(&self, page: &Page, asker: UserId, navigable: bool) -> MessageHandle {
        let handle = MessageHandle(self.next_id.fetch_add(1, Ordering::Relaxed) + 1);
        if navigable {
            let (tx, rx) = mpsc::channel();
            self.listings().push(Listing {
                handle,
                asker,
                tx,
                rx: Arc::new(Mutex::new(rx)),
            });
        }
        self.print_page(handle, page, navigable);
        handle
    }

    fn edit_paged(&self, handle: MessageHandle, page: &Page) {
        self.print_page(handle, page, true);
    }

    fn clear_navigation(&self, handle: MessageHandle) {
        self.listings().retain(|l| l.handle != handle);
        let mut out = io::stdout().lock();
        let _ = writeln!(out, "{}", format!("[{handle}] navigation closed").dark_grey());
    }

    fn await_navigation(
        &self,
        handle: MessageHandle,
        timeout: Duration,
    ) -> Option<NavigationInput> {
        let rx = self
            .listings()
            .iter()
            .find(|l| l.handle == handle)
            .map(|l| l.rx.clone())?;
        let rx = rx.lock().unwrap_or_else(PoisonError::into_inner);
        rx.recv_timeout(timeout).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::Direction;
    use crate::pager::Pages;

    fn long_listing() -> Pages {
        Pages::new((1..=25).map(|i| i.to_string()).collect(), 10)
    }

    fn nav(user: u64, direction: Direction) -> NavigationInput {
        NavigationInput {
            user: UserId(user),
            direction: Some(direction),
        }
    }

    #[test]
    fn navigation_reaches_the_users_newest_listing() {
        let notifier = ConsoleNotifier::new();
        let pages = long_listing();
        let older = notifier.send_paged(&pages.page(0), UserId(1), true);
        let newer = notifier.send_paged(&pages.page(0), UserId(1), true);

        let input = nav(1, Direction::Next);
        assert!(notifier.route_navigation(input.clone()));

        let zero = Duration::from_millis(0);
        assert_eq!(notifier.await_navigation(newer, zero), Some(input));
        assert_eq!(notifier.await_navigation(older, zero), None);
    }

    #[test]
    fn concurrent_listings_of_different_users_stay_separate() {
        let notifier = ConsoleNotifier::new();
        let pages = long_listing();
        let first = notifier.send_paged(&pages.page(0), UserId(1), true);
        let second = notifier.send_paged(&pages.page(0), UserId(2), true);

        assert!(notifier.route_navigation(nav(1, Direction::Next)));
        assert!(notifier.route_navigation(nav(2, Direction::Previous)));
        assert!(!notifier.route_navigation(nav(3, Direction::Next)));

        let zero = Duration::from_millis(0);
        assert_eq!(
            notifier.await_navigation(first, zero),
            Some(nav(1, Direction::Next))
        );
        assert_eq!(
            notifier.await_navigation(second, zero),
            Some(nav(2, Direction::Previous))
        );
        assert_eq!(notifier.await_navigation(first, zero), None);
    }

    #[test]
    fn cleared_listing_stops_receiving() {
        let notifier = ConsoleNotifier::new();
        let handle = notifier.send_paged(&long_listing().page(0), UserId(1), true);
        notifier.clear_navigation(handle);

        assert!(!notifier.route_navigation(nav(1, Direction::Previous)));
        assert_eq!(notifier.await_navigation(handle, Duration::from_millis(0)), None);
    }

    #[test]
    fn single_page_listing_takes_no_input() {
        let notifier = ConsoleNotifier::new();
        let pages = Pages::new(vec!["only".to_string()], 10);
        notifier.send_paged(&pages.page(0), UserId(1), false);

        assert!(!notifier.route_navigation(nav(1, Direction::Next)));
    }
}
