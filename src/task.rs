//! Cancellable periodic task slots.
//!
//! The core never spawns anything: a host scheduler wakes it up at the
//! deadline a [`TaskSlot`] reports. Every (re)schedule or cancel bumps the
//! slot's [`Epoch`], so a wake-up carrying an older epoch is stale and must
//! not touch state.

use embassy_time::{Duration, Instant};

/// Generation of a scheduled task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Epoch(u32);

impl Epoch {
    pub const fn value(self) -> u32 {
        self.0
    }

    #[must_use]
    const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

/// A single periodic task: its epoch and the next wake-up deadline
#[derive(Debug, Clone, Copy, Default)]
pub struct TaskSlot {
    epoch: Epoch,
    deadline: Option<Instant>,
}

impl TaskSlot {
    pub const fn new() -> Self {
        Self {
            epoch: Epoch(0),
            deadline: None,
        }
    }

    /// Replace whatever is scheduled with a task due at `deadline`
    pub fn schedule(&mut self, deadline: Instant) -> Epoch {
        self.epoch = self.epoch.next();
        self.deadline = Some(deadline);
        self.epoch
    }

    /// Cancel the scheduled task
    ///
    /// Returns `true` if a task was scheduled.
    pub fn cancel(&mut self) -> bool {
        self.epoch = self.epoch.next();
        self.deadline.take().is_some()
    }

    /// Epoch of the most recent schedule or cancel
    pub const fn epoch(&self) -> Epoch {
        self.epoch
    }

    pub const fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub const fn is_scheduled(&self) -> bool {
        self.deadline.is_some()
    }

    /// Check that `epoch` belongs to the live task
    pub fn is_current(&self, epoch: Epoch) -> bool {
        self.deadline.is_some() && self.epoch == epoch
    }

    /// Check if the live task should run at `now`
    pub fn is_due(&self, now: Instant) -> bool {
        self.deadline.is_some_and(|deadline| deadline <= now)
    }

    /// Move the deadline one period forward, keeping the epoch
    pub fn advance(&mut self, period: Duration) {
        if let Some(deadline) = self.deadline.as_mut() {
            *deadline += period;
        }
    }

    /// Restart the period from `now`, keeping the epoch
    pub fn restart_from(&mut self, now: Instant, period: Duration) {
        if self.deadline.is_some() {
            self.deadline = Some(now + period);
        }
    }
}
