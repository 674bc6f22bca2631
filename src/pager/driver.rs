use std::time::{Duration, Instant};

use log::debug;

use crate::config::{MAX_PAGER_TIMEOUT_SECS, PagerSettings};
use crate::notify::{Direction, Notifier};
use crate::session::UserId;

use super::pages::Pages;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PagerExit {
    /// Everything fit on one page; no navigation was offered.
    SinglePage,
    /// Nobody navigated for the timeout; `page` was showing at the end.
    TimedOut { page: usize },
}

/// Show `entries` page by page on behalf of `user`.
///
/// Blocks until the listing times out, so callers run it off the control
/// loop. Input from other users and anything that is not previous/next is
/// ignored and does not extend the timeout. Previous on the first page and
/// next on the last page change nothing but still count as activity.
pub fn paginate<N: Notifier + ?Sized>(
    notifier: &N,
    entries: Vec<String>,
    user: UserId,
    settings: &PagerSettings,
) -> PagerExit {
    let pages = Pages::new(entries, settings.page_size);
    let mut current = 0;

    let navigable = pages.count() > 1;
    let handle = notifier.send_paged(&pages.page(current), user, navigable);
    if !navigable {
        return PagerExit::SinglePage;
    }

    let timeout = Duration::from_secs(settings.timeout_secs.min(MAX_PAGER_TIMEOUT_SECS));
    let mut deadline = Instant::now() + timeout;

    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            break;
        }
        let Some(input) = notifier.await_navigation(handle, remaining) else {
            break;
        };
        if input.user != user {
            debug!("{handle}: ignoring input from {}", input.user);
            continue;
        }
        let Some(direction) = input.direction else {
            continue;
        };

        let target = match direction {
            Direction::Next if current + 1 < pages.count() => Some(current + 1),
            Direction::Previous if current > 0 => Some(current - 1),
            _ => None,
        };
        if let Some(target) = target {
            current = target;
            notifier.edit_paged(handle, &pages.page(current));
        }
        deadline = Instant::now() + timeout;
    }

    debug!("{handle}: listing timed out on page {}", current + 1);
    notifier.clear_navigation(handle);
    PagerExit::TimedOut { page: current }
}
