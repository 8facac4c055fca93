//! Lamp session - the orchestrator
//!
//! Composes the lamp state, the scene engine, the countdown timer and the
//! tutorial flag. All mutation happens on the caller's thread: intents are
//! applied directly or drained from the [`IntentChannel`] on each tick, and
//! the caller sleeps until the deadline the tick reports.
//!
//! # Usage
//!
//! ```ignore
//! let mut session = LampSession::new(INTENTS.receiver(), display, prefs, &DEFAULT_SESSION_CONFIG);
//!
//! loop {
//!     let result = session.tick(Instant::from_millis(now_ms()));
//!     for event in &result.timer_events {
//!         // notify the user
//!     }
//!     wait_for_input_or(result.sleep_duration);
//! }
//! ```
//!
//! [`IntentChannel`]: crate::intent::IntentChannel

use embassy_time::{Duration, Instant};
use heapless::Vec;

use crate::DisplayOutput;
use crate::intent::{IntentReceiver, LampIntent};
use crate::lamp::{DEFAULT_LAMP_CONFIG, LampConfig, LampState};
use crate::logging::debug_log;
use crate::preferences::{PreferenceStore, Tutorial};
use crate::scene::SceneEngine;
use crate::timer::{
    CountdownTimer, DEFAULT_TIMER_CONFIG, ExpiryAction, TimerConfig, TimerEvent, TimerOption,
};

/// Timer events a single tick can report
///
/// One slot is kept for the timer poll, so a tick applies at most
/// `MAX_TICK_EVENTS - 1` event-producing intents. Further intents stay
/// queued for the next tick.
pub const MAX_TICK_EVENTS: usize = 8;

pub const DEFAULT_SESSION_CONFIG: SessionConfig = SessionConfig {
    lamp: DEFAULT_LAMP_CONFIG,
    timer: DEFAULT_TIMER_CONFIG,
};

/// Configuration for the lamp session
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionConfig {
    pub lamp: LampConfig,
    pub timer: TimerConfig,
}

/// Result of a session tick
#[derive(Debug, Clone, Default)]
pub struct SessionTick {
    /// Timer events, oldest first
    pub timer_events: Vec<TimerEvent, MAX_TICK_EVENTS>,
    /// Earliest pending timer tick or scene step
    pub next_deadline: Option<Instant>,
    /// How long the caller may sleep (zero if already due or intents are
    /// still queued, `None` if idle)
    pub sleep_duration: Option<Duration>,
}

impl SessionTick {
    /// Check if the countdown ran out during this tick
    pub fn timer_finished(&self) -> bool {
        self.timer_events.contains(&TimerEvent::Finished)
    }
}

/// Lamp session
pub struct LampSession<'a, O: DisplayOutput, P: PreferenceStore, const INTENT_CHANNEL_SIZE: usize>
{
    intents: IntentReceiver<'a, INTENT_CHANNEL_SIZE>,
    expiry_action: ExpiryAction,

    lamp: LampState<O>,
    scenes: SceneEngine,
    timer: CountdownTimer,
    tutorial: Tutorial<P>,
}

impl<'a, O: DisplayOutput, P: PreferenceStore, const INTENT_CHANNEL_SIZE: usize>
    LampSession<'a, O, P, INTENT_CHANNEL_SIZE>
{
    /// Start a session
    ///
    /// Pushes the initial lamp state to `output` and reads the tutorial flag
    /// from `preferences`.
    pub fn new(
        intents: IntentReceiver<'a, INTENT_CHANNEL_SIZE>,
        output: O,
        preferences: P,
        config: &SessionConfig,
    ) -> Self {
        Self {
            intents,
            expiry_action: config.timer.expiry_action,
            lamp: LampState::new(output, &config.lamp),
            scenes: SceneEngine::new(),
            timer: CountdownTimer::new(&config.timer),
            tutorial: Tutorial::new(preferences),
        }
    }

    pub const fn lamp(&self) -> &LampState<O> {
        &self.lamp
    }

    pub const fn scenes(&self) -> &SceneEngine {
        &self.scenes
    }

    pub const fn timer(&self) -> &CountdownTimer {
        &self.timer
    }

    pub const fn tutorial(&self) -> &Tutorial<P> {
        &self.tutorial
    }

    /// Apply a single intent immediately
    ///
    /// Returns the timer event the intent caused, if any.
    pub fn apply(&mut self, intent: LampIntent, now: Instant) -> Option<TimerEvent> {
        match intent {
            LampIntent::Drag(drag) => self.lamp.apply_drag(drag),
            LampIntent::SetBrightness(brightness) => self.lamp.set_brightness(brightness),
            LampIntent::SetColor(color) => self.lamp.set_color(color),
            LampIntent::ActivateScene(id) => {
                self.scenes.activate(id.scene(), &mut self.lamp, now);
            }
            LampIntent::StopScene => {
                self.scenes.stop();
            }
            LampIntent::SelectTimer(option) => return self.select_timer(option, now),
            LampIntent::StartTimer { minutes } => {
                return self.select_timer(TimerOption::Minutes(minutes), now);
            }
            LampIntent::CancelTimer => return self.cancel_timer(),
            LampIntent::CompleteTutorial => self.tutorial.complete(),
            LampIntent::ResetTutorial => self.tutorial.reset(),
        }
        None
    }

    /// Process one step
    ///
    /// Drains pending intents, runs due timer ticks and scene steps, and
    /// applies the expiry action if the countdown ran out.
    pub fn tick(&mut self, now: Instant) -> SessionTick {
        let mut result = SessionTick::default();

        while result.timer_events.len() < MAX_TICK_EVENTS - 1 {
            let Ok(intent) = self.intents.try_receive() else {
                break;
            };
            if let Some(event) = self.apply(intent, now) {
                push_event(&mut result.timer_events, event);
            }
        }

        if let Some(event) = self.timer.poll(now) {
            if event == TimerEvent::Finished {
                self.on_timer_finished();
            }
            push_event(&mut result.timer_events, event);
        }

        self.scenes.poll(now, &mut self.lamp);

        result.next_deadline = self.next_deadline();
        result.sleep_duration = if self.intents.is_empty() {
            result.next_deadline.map(|deadline| {
                deadline
                    .checked_duration_since(now)
                    .unwrap_or(Duration::from_ticks(0))
            })
        } else {
            Some(Duration::from_ticks(0))
        };
        result
    }

    /// Earliest pending timer tick or scene step
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.timer.next_deadline(), self.scenes.next_deadline()) {
            (Some(timer), Some(scene)) => Some(timer.min(scene)),
            (timer, scene) => timer.or(scene),
        }
    }

    /// Time left on the running countdown
    pub fn remaining(&self) -> Option<Duration> {
        self.timer.state().countdown().map(|c| c.remaining())
    }

    /// End the session
    ///
    /// Stops the scene and the countdown, restores the system brightness and
    /// hands back the output and the preference store.
    pub fn end(mut self) -> (O, P) {
        self.scenes.stop();
        self.timer.cancel();
        (self.lamp.release(), self.tutorial.into_store())
    }

    fn select_timer(&mut self, option: TimerOption, now: Instant) -> Option<TimerEvent> {
        let Some(total) = option.duration() else {
            return self.cancel_timer();
        };
        self.timer.start(total, now);
        self.timer.state().countdown().map(TimerEvent::Started)
    }

    fn cancel_timer(&mut self) -> Option<TimerEvent> {
        self.timer.cancel().then_some(TimerEvent::Cancelled)
    }

    fn on_timer_finished(&mut self) {
        match self.expiry_action {
            ExpiryAction::None => {}
            ExpiryAction::ForceBrightness(brightness) => {
                debug_log!("[LampSession] timer expired, forcing brightness");
                self.scenes.stop();
                self.lamp.set_brightness(brightness);
            }
        }
    }
}

#[cfg_attr(not(any(feature = "log", feature = "esp32-log")), allow(unused_variables))]
fn push_event(events: &mut Vec<TimerEvent, MAX_TICK_EVENTS>, event: TimerEvent) {
    // The intent drain always leaves a slot for the timer poll
    if let Err(event) = events.push(event) {
        debug_log!("[LampSession.tick] event buffer full, dropped {:?}", event);
    }
}
