//! Delayed actions stored as plain records and released by the world clock.

use std::time::Duration;

use heavy_machine_gun_core::{ScheduleId, ScheduledAction};

/// Pending action awaiting its deadline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct ScheduledEntry {
    pub(crate) id: ScheduleId,
    pub(crate) fire_at: Duration,
    pub(crate) action: ScheduledAction,
}

/// Stores scheduled actions and allocates identifiers that are never reused.
#[derive(Debug)]
pub(crate) struct Scheduler {
    next_id: u64,
    pending: Vec<ScheduledEntry>,
}

impl Scheduler {
    pub(crate) fn new() -> Self {
        Self {
            next_id: 0,
            pending: Vec::new(),
        }
    }

    pub(crate) fn schedule(&mut self, fire_at: Duration, action: ScheduledAction) -> ScheduleId {
        let id = ScheduleId::new(self.next_id);
        self.next_id = self.next_id.saturating_add(1);
        self.pending.push(ScheduledEntry {
            id,
            fire_at,
            action,
        });
        id
    }

    pub(crate) fn cancel(&mut self, id: ScheduleId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|entry| entry.id != id);
        self.pending.len() != before
    }

    /// Removes every entry due at `now`, ordered by deadline then identifier.
    pub(crate) fn drain_due(&mut self, now: Duration) -> Vec<ScheduledEntry> {
        let (mut due, pending): (Vec<_>, Vec<_>) = self
            .pending
            .drain(..)
            .partition(|entry| entry.fire_at <= now);
        self.pending = pending;
        due.sort_by_key(|entry| (entry.fire_at, entry.id));
        due
    }

    pub(crate) fn clear(&mut self) {
        self.pending.clear();
    }

    pub(crate) fn len(&self) -> usize {
        self.pending.len()
    }
}
