//! User intents and the bounded queue that carries them.
//!
//! Gesture and UI callbacks push [`LampIntent`]s; the session drains them on
//! its next tick. The queue is a `heapless::Deque` behind a
//! `critical-section` mutex, so senders may live in interrupt or callback
//! context.

use core::cell::RefCell;

use critical_section::Mutex;
use heapless::Deque;

use crate::color::Rgb;
use crate::lamp::Drag;
use crate::scene::SceneId;
use crate::timer::TimerOption;

/// Something the user asked the lamp to do
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LampIntent {
    /// Drag on the lamp surface
    Drag(Drag),
    /// Explicit brightness
    SetBrightness(f32),
    /// Color chosen in the picker
    SetColor(Rgb),
    /// Activate a preset scene
    ActivateScene(SceneId),
    /// Stop the active scene
    StopScene,
    /// Timer option chosen in the picker
    SelectTimer(TimerOption),
    /// Start a countdown of whole minutes
    StartTimer { minutes: u32 },
    /// Cancel the running countdown
    CancelTimer,
    /// Tutorial was finished
    CompleteTutorial,
    /// Tutorial should be shown again
    ResetTutorial,
}

/// Error returned when trying to send to a full queue.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrySendError(pub LampIntent);

/// Error returned when trying to receive from an empty queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TryReceiveError;

/// Bounded intent queue
///
/// SIZE is the number of intents that can wait for the next tick
pub struct IntentChannel<const SIZE: usize> {
    inner: Mutex<RefCell<Deque<LampIntent, SIZE>>>,
}

impl<const SIZE: usize> IntentChannel<SIZE> {
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(Deque::new())),
        }
    }

    pub const fn sender(&self) -> IntentSender<'_, SIZE> {
        IntentSender { channel: self }
    }

    pub const fn receiver(&self) -> IntentReceiver<'_, SIZE> {
        IntentReceiver { channel: self }
    }

    /// Queue an intent
    ///
    /// Returns the intent back if the queue is full.
    pub fn try_send(&self, intent: LampIntent) -> Result<(), TrySendError> {
        critical_section::with(|cs| {
            let mut queue = self.inner.borrow(cs).borrow_mut();
            queue.push_back(intent).map_err(TrySendError)
        })
    }

    /// Take the oldest queued intent
    pub fn try_receive(&self) -> Result<LampIntent, TryReceiveError> {
        critical_section::with(|cs| {
            let mut queue = self.inner.borrow(cs).borrow_mut();
            queue.pop_front().ok_or(TryReceiveError)
        })
    }

    /// Number of queued intents
    pub fn len(&self) -> usize {
        critical_section::with(|cs| self.inner.borrow(cs).borrow().len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every queued intent
    pub fn clear(&self) {
        critical_section::with(|cs| self.inner.borrow(cs).borrow_mut().clear());
    }
}

impl<const SIZE: usize> Default for IntentChannel<SIZE> {
    fn default() -> Self {
        Self::new()
    }
}

/// Sending half, handed to gesture and UI callbacks
#[derive(Clone, Copy)]
pub struct IntentSender<'a, const SIZE: usize> {
    channel: &'a IntentChannel<SIZE>,
}

impl<const SIZE: usize> IntentSender<'_, SIZE> {
    pub fn try_send(&self, intent: LampIntent) -> Result<(), TrySendError> {
        self.channel.try_send(intent)
    }
}

/// Receiving half, owned by the session
#[derive(Clone, Copy)]
pub struct IntentReceiver<'a, const SIZE: usize> {
    channel: &'a IntentChannel<SIZE>,
}

impl<const SIZE: usize> IntentReceiver<'_, SIZE> {
    pub fn try_receive(&self) -> Result<LampIntent, TryReceiveError> {
        self.channel.try_receive()
    }

    pub fn is_empty(&self) -> bool {
        self.channel.is_empty()
    }
}
