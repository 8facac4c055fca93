//! Scene activation and color cycling.

use embassy_time::{Duration, Instant};

use super::Scene;
use crate::DisplayOutput;
use crate::lamp::LampState;
use crate::logging::debug_log;
use crate::task::{Epoch, TaskSlot};

/// Shortest hold time of an animated step
const MIN_STEP: Duration = Duration::from_millis(1);

/// Drives the active scene
///
/// At most one scene animation is live; activating a scene always replaces
/// the previous one.
#[derive(Debug, Clone, Default)]
pub struct SceneEngine {
    current: Option<&'static Scene>,
    color_index: usize,
    task: TaskSlot,
}

impl SceneEngine {
    pub const fn new() -> Self {
        Self {
            current: None,
            color_index: 0,
            task: TaskSlot::new(),
        }
    }

    /// Currently active scene
    pub const fn current(&self) -> Option<&'static Scene> {
        self.current
    }

    /// Index of the color applied last
    pub const fn color_index(&self) -> usize {
        self.color_index
    }

    /// Check if a color cycle is running
    pub const fn is_animating(&self) -> bool {
        self.task.is_scheduled()
    }

    pub const fn epoch(&self) -> Epoch {
        self.task.epoch()
    }

    /// When the next color is due, if a cycle is running
    pub const fn next_deadline(&self) -> Option<Instant> {
        self.task.deadline()
    }

    /// Activate a scene
    ///
    /// Cancels any running cycle and applies the first color and the scene
    /// brightness right away. Animated scenes then advance to the next color
    /// every `transition_duration`.
    ///
    /// Returns the epoch of the new cycle for animated scenes.
    pub fn activate<O: DisplayOutput>(
        &mut self,
        scene: &'static Scene,
        lamp: &mut LampState<O>,
        now: Instant,
    ) -> Option<Epoch> {
        self.task.cancel();
        self.current = Some(scene);
        self.color_index = 0;
        debug_log!("[SceneEngine.activate] {}", scene.id);

        Self::apply_step(scene, 0, lamp);
        if !scene.is_animated {
            return None;
        }
        Some(self.task.schedule(now + Self::step_duration(scene)))
    }

    /// Stop the active scene
    ///
    /// The lamp keeps its last color and brightness. Returns `true` if a
    /// scene was active.
    pub fn stop(&mut self) -> bool {
        self.task.cancel();
        let was_active = self.current.take().is_some();
        if was_active {
            debug_log!("[SceneEngine.stop]");
        }
        was_active
    }

    /// Advance the cycle scheduled under `epoch` by one color
    ///
    /// Steps from a replaced or stopped cycle return `false` and change
    /// nothing.
    pub fn on_step<O: DisplayOutput>(&mut self, epoch: Epoch, lamp: &mut LampState<O>) -> bool {
        if !self.task.is_current(epoch) {
            debug_log!("[SceneEngine.on_step] stale epoch {}", epoch.value());
            return false;
        }
        let Some(scene) = self.current else {
            return false;
        };
        self.color_index = next_index(self.color_index, scene.colors.len());
        Self::apply_step(scene, self.color_index, lamp);
        self.task.advance(Self::step_duration(scene));
        true
    }

    /// Advance the cycle if a step is due at `now`
    ///
    /// If the caller fell more than two steps behind, the backlog is skipped:
    /// only the next color is applied and the period restarts from `now`.
    ///
    /// Returns `true` if a color was applied.
    pub fn poll<O: DisplayOutput>(&mut self, now: Instant, lamp: &mut LampState<O>) -> bool {
        let (Some(scene), Some(deadline)) = (self.current, self.task.deadline()) else {
            return false;
        };
        if deadline > now {
            return false;
        }

        let step = Self::step_duration(scene);
        let mut applied = self.on_step(self.task.epoch(), lamp);
        if now >= deadline + step + step {
            self.task.restart_from(now, step);
        } else {
            while self.task.is_due(now) {
                applied |= self.on_step(self.task.epoch(), lamp);
            }
        }
        applied
    }

    fn apply_step<O: DisplayOutput>(scene: &Scene, index: usize, lamp: &mut LampState<O>) {
        if let Some(color) = scene.colors.get(index) {
            lamp.set_color(*color);
        }
        lamp.set_brightness(scene.brightness);
    }

    fn step_duration(scene: &Scene) -> Duration {
        scene.transition_duration.max(MIN_STEP)
    }
}

const fn next_index(index: usize, len: usize) -> usize {
    if len == 0 { 0 } else { (index + 1) % len }
}
