//! Deferred one-shot actions
//!
//! The original browser game leaned on wall-clock `setTimeout` chains for
//! the bounce stop, crash auto-repair and game-over exit. Here those are
//! tick-indexed entries owned by the session: they fire when the tick
//! counter catches up, and dropping the session discards every pending
//! entry, so a stale timer can never mutate a fresh session.

/// Actions that can be scheduled against a future tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredAction {
    /// Settle the post-collision bounce to a full stop
    BounceStop,
    /// End the crashed state and release the particle pool
    Repair,
    /// Raise the session's finished flag after game over
    EndSession,
}

#[derive(Debug, Clone, Copy)]
struct Entry {
    fire_at: u64,
    action: DeferredAction,
}

/// Tick-indexed one-shot action queue
#[derive(Debug, Default)]
pub struct Scheduler {
    entries: Vec<Entry>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `action` to fire once `now >= fire_at`
    pub fn schedule(&mut self, fire_at: u64, action: DeferredAction) {
        self.entries.push(Entry { fire_at, action });
    }

    /// Drop every pending entry for `action`
    pub fn cancel(&mut self, action: DeferredAction) {
        self.entries.retain(|entry| entry.action != action);
    }

    /// Whether any entry for `action` is still pending
    pub fn is_scheduled(&self, action: DeferredAction) -> bool {
        self.entries.iter().any(|entry| entry.action == action)
    }

    /// Remove and return all actions due at `now`, in insertion order
    pub fn drain_due(&mut self, now: u64) -> Vec<DeferredAction> {
        let mut due = Vec::new();
        self.entries.retain(|entry| {
            if entry.fire_at <= now {
                due.push(entry.action);
                false
            } else {
                true
            }
        });
        due
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
