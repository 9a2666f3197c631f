use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

/// A request to call back after `delay`. Whoever drives the state machine
/// sleeps for `delay` and hands `id` back; the state machine ignores ids it
/// no longer considers pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timer {
    pub id: TimerId,
    pub delay: Duration,
}

/// Holds at most one pending timer. Arming a new one supersedes the previous.
#[derive(Debug, Default)]
pub struct TimerSlot {
    next: u64,
    pending: Option<TimerId>,
}

impl TimerSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arm(&mut self, delay: Duration) -> Timer {
        self.next += 1;
        let id = TimerId(self.next);
        self.pending = Some(id);
        Timer { id, delay }
    }

    pub fn arm_ms(&mut self, millis: u64) -> Timer {
        self.arm(Duration::from_millis(millis))
    }

    pub fn is_current(&self, id: TimerId) -> bool {
        self.pending == Some(id)
    }

    /// Consume the pending timer if `id` is it.
    pub fn take(&mut self, id: TimerId) -> bool {
        if self.is_current(id) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_armed(&self) -> bool {
        self.pending.is_some()
    }
}
