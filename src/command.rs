//! Commands crossing into the lighting tick context.
//!
//! UI or network tasks queue [`FadeCommand`]s from any context; the tick
//! context drains them into the controller before advancing the fade.

use core::cell::RefCell;

use critical_section::Mutex;
use embassy_time::Instant;
use heapless::Deque;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::error::FadeError;
use crate::state::{LightingState, TransitionRequest};
use crate::transition::FadeController;

/// Request for the fade controller, issued from any context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FadeCommand {
    /// Fade (or jump, for a zero duration) to a target
    Start(TransitionRequest),
    /// Jump to a target
    ApplyImmediate(LightingState),
    /// Stop the active fade where it is
    Abort,
    /// Seed the current values without transmitting
    SetCurrent(LightingState),
}

impl FadeCommand {
    /// Run the command against the controller
    pub fn apply(self, controller: &mut FadeController, now: Instant) -> Result<(), FadeError> {
        match self {
            Self::Start(request) => controller.start(request, now),
            Self::ApplyImmediate(target) => controller.apply_immediate(target, now),
            Self::Abort => controller.abort(),
            Self::SetCurrent(state) => controller.set_current(state),
        }
    }

    /// Check if the command replaces whatever fade is running
    pub const fn supersedes_fade(&self) -> bool {
        matches!(self, Self::Start(_) | Self::ApplyImmediate(_) | Self::Abort)
    }
}

/// Bounded queue of fade commands.
///
/// Shared between producers and the tick context; every access runs in a
/// critical section, storage is a fixed `heapless::Deque`.
pub struct CommandQueue<const SIZE: usize> {
    inner: Mutex<RefCell<Deque<FadeCommand, SIZE>>>,
}

impl<const SIZE: usize> CommandQueue<SIZE> {
    /// Create an empty queue
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(Deque::new())),
        }
    }

    /// Queue a command
    ///
    /// Returns the command if the queue is full
    pub fn push(&self, command: FadeCommand) -> Result<(), FadeCommand> {
        critical_section::with(|cs| self.inner.borrow(cs).borrow_mut().push_back(command))
    }

    /// Queue a transition, dropping queued transitions it would supersede.
    ///
    /// Only the last fade request matters once the tick drains the queue,
    /// so a burst of requests (e.g. a dragged slider) never fills it up.
    /// `SetCurrent` commands are kept in place.
    pub fn push_latest(&self, command: FadeCommand) -> Result<(), FadeCommand> {
        critical_section::with(|cs| {
            let mut queue = self.inner.borrow(cs).borrow_mut();
            if command.supersedes_fade() {
                let mut kept: Deque<FadeCommand, SIZE> = Deque::new();
                while let Some(queued) = queue.pop_front() {
                    if !queued.supersedes_fade() {
                        // kept can hold everything queue held
                        let _ = kept.push_back(queued);
                    }
                }
                *queue = kept;
            }
            queue.push_back(command)
        })
    }

    /// Take the oldest command
    pub fn pop(&self) -> Option<FadeCommand> {
        critical_section::with(|cs| self.inner.borrow(cs).borrow_mut().pop_front())
    }

    /// Number of queued commands
    pub fn len(&self) -> usize {
        critical_section::with(|cs| self.inner.borrow(cs).borrow().len())
    }

    /// Check if nothing is queued
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every queued command
    pub fn clear(&self) {
        critical_section::with(|cs| self.inner.borrow(cs).borrow_mut().clear());
    }

    /// Apply every queued command to the controller in arrival order.
    ///
    /// Meant for the tick context only. Returns the number of commands
    /// applied. Stops at the first command the controller rejects: that
    /// command is dropped, the rest stay queued for the next drain.
    pub fn drain_into(
        &self,
        controller: &mut FadeController,
        now: Instant,
    ) -> Result<usize, FadeError> {
        let mut applied = 0;
        while let Some(command) = self.pop() {
            #[cfg(feature = "esp32-log")]
            println!("[CommandQueue.drain_into] {:?}", command);
            command.apply(controller, now)?;
            applied += 1;
        }
        Ok(applied)
    }
}

impl<const SIZE: usize> Default for CommandQueue<SIZE> {
    fn default() -> Self {
        Self::new()
    }
}
