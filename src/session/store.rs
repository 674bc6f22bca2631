use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};

use super::model::{ChannelId, PlaybackSession};

type Slot = Arc<Mutex<PlaybackSession>>;

/// One independently locked session record per channel.
///
/// The outer map is only held long enough to find or insert a slot, so
/// work on channel A never waits on channel B. All access to a given
/// channel goes through that channel's mutex, which makes per-channel
/// operations linearizable: a reader always sees the latest write.
#[derive(Debug, Default)]
pub struct SessionStore {
    slots: RwLock<HashMap<ChannelId, Slot>>,
}

fn lock(slot: &Slot) -> MutexGuard<'_, PlaybackSession> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, channel: ChannelId) -> Option<Slot> {
        self.slots
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&channel)
            .cloned()
    }

    /// Snapshot of the channel's session, if one was ever created.
    pub fn get(&self, channel: ChannelId) -> Option<PlaybackSession> {
        self.slot(channel).map(|slot| lock(&slot).clone())
    }

    /// Replace the channel's session wholesale.
    pub fn set(&self, channel: ChannelId, session: PlaybackSession) {
        if let Some(slot) = self.slot(channel) {
            *lock(&slot) = session;
            return;
        }

        let mut slots = self.slots.write().unwrap_or_else(PoisonError::into_inner);
        match slots.get(&channel) {
            // Lost an insert race; the slot is there now.
            Some(slot) => *lock(slot) = session,
            None => {
                slots.insert(channel, Arc::new(Mutex::new(session)));
            }
        }
    }

    /// Read-modify-write the channel's session under its lock.
    ///
    /// Returns `None` without calling `f` when the channel has no session.
    pub fn update<R>(
        &self,
        channel: ChannelId,
        f: impl FnOnce(&mut PlaybackSession) -> R,
    ) -> Option<R> {
        let slot = self.slot(channel)?;
        let mut session = lock(&slot);
        Some(f(&mut session))
    }

    /// Turn looping off. Returns whether the session was looping.
    pub fn clear_looping(&self, channel: ChannelId) -> bool {
        self.update(channel, |s| std::mem::replace(&mut s.is_looping, false))
            .unwrap_or(false)
    }
}
