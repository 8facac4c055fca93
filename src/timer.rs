//! Countdown timer.
//!
//! `Inactive -> Active -> Inactive`, where the return to `Inactive` is either
//! natural expiry (reported as [`TimerEvent::Finished`]) or a cancel. Only one
//! countdown is live: starting a new one replaces the previous one and any
//! tick still carrying the old [`Epoch`] is ignored.

use core::fmt;

use embassy_time::{Duration, Instant};

use crate::logging::debug_log;
use crate::math::{ratio, saturating_sub};
use crate::task::{Epoch, TaskSlot};

/// Default tick interval (1 second).
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(1000);

/// Shortest tick interval; shorter configured intervals are raised to it
pub const MIN_TICK_INTERVAL: Duration = Duration::from_millis(1);

pub const DEFAULT_TIMER_CONFIG: TimerConfig = TimerConfig {
    tick_interval: DEFAULT_TICK_INTERVAL,
    expiry_action: ExpiryAction::None,
};

/// What happens to the lamp when a countdown runs out
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ExpiryAction {
    /// Leave the lamp as it is
    #[default]
    None,
    /// Force brightness to the given value (clamped like any other write)
    ForceBrightness(f32),
}

/// Configuration for the countdown timer
#[derive(Debug, Clone, Copy)]
pub struct TimerConfig {
    /// Interval between ticks; each tick removes this much remaining time
    pub tick_interval: Duration,
    /// Action applied when a countdown finishes
    pub expiry_action: ExpiryAction,
}

impl Default for TimerConfig {
    fn default() -> Self {
        DEFAULT_TIMER_CONFIG
    }
}

/// A running countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    total: Duration,
    remaining: Duration,
}

impl Countdown {
    const fn new(total: Duration) -> Self {
        Self {
            total,
            remaining: total,
        }
    }

    pub const fn total(&self) -> Duration {
        self.total
    }

    pub const fn remaining(&self) -> Duration {
        self.remaining
    }

    /// Elapsed share of the countdown (0.0-1.0)
    pub fn progress(&self) -> f32 {
        1.0 - ratio(self.remaining, self.total)
    }

    /// Remaining time for display
    pub const fn remaining_time(&self) -> RemainingTime {
        RemainingTime(self.remaining)
    }
}

/// Remaining time formatted as `MM:SS`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemainingTime(pub Duration);

impl fmt::Display for RemainingTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let secs = self.0.as_secs();
        write!(f, "{:02}:{:02}", secs / 60, secs % 60)
    }
}

/// Timer state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimerState {
    #[default]
    Inactive,
    Active(Countdown),
}

impl TimerState {
    pub const fn is_active(&self) -> bool {
        matches!(self, Self::Active(_))
    }

    pub const fn countdown(&self) -> Option<Countdown> {
        match self {
            Self::Active(countdown) => Some(*countdown),
            Self::Inactive => None,
        }
    }

    /// Elapsed share of the active countdown, `0.0` when inactive
    pub fn progress(&self) -> f32 {
        self.countdown().map_or(0.0, |countdown| countdown.progress())
    }
}

/// Something the timer reports to its owner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// A countdown started (replacing any previous one)
    Started(Countdown),
    /// A tick passed and the countdown is still running
    Tick(Countdown),
    /// The countdown ran out
    Finished,
    /// An active countdown was cancelled
    Cancelled,
}

/// Timer duration choices offered to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerOption {
    /// Keep the lamp on, no countdown
    Infinite,
    /// Countdown of the given number of minutes
    Minutes(u32),
}

impl TimerOption {
    /// Options offered before a custom duration
    pub const PRESETS: [Self; 3] = [Self::Infinite, Self::Minutes(30), Self::Minutes(60)];

    /// Countdown length, or `None` if no countdown should run
    pub fn duration(self) -> Option<Duration> {
        match self {
            Self::Infinite | Self::Minutes(0) => None,
            Self::Minutes(minutes) => Some(minutes_to_duration(minutes)),
        }
    }
}

impl fmt::Display for TimerOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Infinite => f.write_str("Infinite"),
            Self::Minutes(60) => f.write_str("1 Hour"),
            Self::Minutes(1) => f.write_str("1 Minute"),
            Self::Minutes(minutes) if minutes % 60 == 0 => write!(f, "{} Hours", minutes / 60),
            Self::Minutes(minutes) => write!(f, "{} Minutes", minutes),
        }
    }
}

/// Convert whole minutes to a [`Duration`]
pub fn minutes_to_duration(minutes: u32) -> Duration {
    Duration::from_secs(u64::from(minutes) * 60)
}

/// Countdown timer
#[derive(Debug, Clone)]
pub struct CountdownTimer {
    interval: Duration,
    state: TimerState,
    task: TaskSlot,
}

impl CountdownTimer {
    pub const fn new(config: &TimerConfig) -> Self {
        let interval = if config.tick_interval.as_ticks() < MIN_TICK_INTERVAL.as_ticks() {
            MIN_TICK_INTERVAL
        } else {
            config.tick_interval
        };
        Self {
            interval,
            state: TimerState::Inactive,
            task: TaskSlot::new(),
        }
    }

    pub const fn state(&self) -> TimerState {
        self.state
    }

    pub const fn is_active(&self) -> bool {
        self.state.is_active()
    }

    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Epoch of the live countdown (or of the last cancel)
    pub const fn epoch(&self) -> Epoch {
        self.task.epoch()
    }

    /// When the next tick is due, if a countdown is running
    pub const fn next_deadline(&self) -> Option<Instant> {
        self.task.deadline()
    }

    /// Start a countdown of `total`, replacing any running one
    ///
    /// `total` is expected to be positive. A zero countdown finishes on its
    /// first tick.
    pub fn start(&mut self, total: Duration, now: Instant) -> Epoch {
        debug_assert!(total.as_ticks() > 0, "countdown must be positive");
        self.task.cancel();
        let countdown = Countdown::new(total);
        self.state = TimerState::Active(countdown);
        let epoch = self.task.schedule(now + self.interval);
        debug_log!("[CountdownTimer.start] {}ms", total.as_millis());
        epoch
    }

    /// Start a countdown of whole minutes
    pub fn start_minutes(&mut self, minutes: u32, now: Instant) -> Epoch {
        self.start(minutes_to_duration(minutes), now)
    }

    /// Stop the countdown without reporting it as finished
    ///
    /// Returns `true` if a countdown was running.
    pub fn cancel(&mut self) -> bool {
        self.task.cancel();
        let was_active = self.state.is_active();
        self.state = TimerState::Inactive;
        if was_active {
            debug_log!("[CountdownTimer.cancel]");
        }
        was_active
    }

    /// Run one tick scheduled under `epoch`
    ///
    /// Ticks from a replaced or cancelled countdown return `None` and change
    /// nothing.
    pub fn on_tick(&mut self, epoch: Epoch) -> Option<TimerEvent> {
        if !self.task.is_current(epoch) {
            debug_log!("[CountdownTimer.on_tick] stale epoch {}", epoch.value());
            return None;
        }
        let TimerState::Active(mut countdown) = self.state else {
            return None;
        };

        countdown.remaining = saturating_sub(countdown.remaining, self.interval);
        if countdown.remaining.as_ticks() == 0 {
            self.task.cancel();
            self.state = TimerState::Inactive;
            debug_log!("[CountdownTimer.on_tick] finished");
            return Some(TimerEvent::Finished);
        }

        self.state = TimerState::Active(countdown);
        self.task.advance(self.interval);
        Some(TimerEvent::Tick(countdown))
    }

    /// Run every tick due at `now`
    ///
    /// Returns the last event: `Finished` if the countdown ran out, otherwise
    /// the latest `Tick`.
    pub fn poll(&mut self, now: Instant) -> Option<TimerEvent> {
        let mut last = None;
        while self.task.is_due(now) {
            let event = self.on_tick(self.task.epoch());
            if event.is_none() {
                break;
            }
            last = event;
            if last == Some(TimerEvent::Finished) {
                break;
            }
        }
        last
    }
}
