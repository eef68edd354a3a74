//! Lighting tick driver.
//!
//! Provides portable tick pacing without async/await or platform timers.
//! The caller sleeps between ticks for the returned duration.

use embassy_time::{Duration, Instant};

use crate::command::CommandQueue;
use crate::error::FadeError;
use crate::transition::{FadeController, FadeState};
use crate::EventSender;

/// Result of a tick
#[derive(Debug, Clone, Copy)]
pub struct TickResult {
    /// The deadline for the next tick.
    pub next_deadline: Instant,
    /// How long to wait until the next tick (zero if behind schedule).
    pub sleep_duration: Duration,
    /// Controller state after the tick.
    pub state: FadeState,
}

/// Owns the fade controller and runs it on a fixed cadence.
///
/// Each tick:
/// - Drains queued [`FadeCommand`](crate::FadeCommand)s into the controller
/// - Advances the fade and transmits at most one round
/// - Returns timing info so the caller can sleep appropriately
///
/// # Usage
///
/// ```ignore
/// static COMMANDS: CommandQueue<8> = CommandQueue::new();
///
/// let controller = FadeController::with_state(FaderConfig::default(), restored);
/// let mut scheduler = TickScheduler::new(controller, &COMMANDS, bus);
///
/// loop {
///     let result = scheduler.tick(Instant::now())?;
///     sleep_ms(result.sleep_duration.as_millis());
/// }
/// ```
pub struct TickScheduler<'a, S: EventSender, const SIZE: usize> {
    controller: FadeController,
    commands: &'a CommandQueue<SIZE>,
    sender: S,
    next_tick: Instant,
    tick_interval: Duration,
}

impl<'a, S: EventSender, const SIZE: usize> TickScheduler<'a, S, SIZE> {
    /// Create a scheduler ticking at the controller's configured cadence
    pub fn new(controller: FadeController, commands: &'a CommandQueue<SIZE>, sender: S) -> Self {
        let tick_interval = controller.config().tick_interval;
        Self {
            controller,
            commands,
            sender,
            next_tick: Instant::from_millis(0),
            tick_interval,
        }
    }

    /// Run one lighting tick.
    ///
    /// If we have fallen more than two ticks behind, the schedule restarts
    /// from `now` instead of catching up in a burst.
    ///
    /// A command the controller rejects is returned as the error and the
    /// controller is not ticked on this cadence; commands queued behind it
    /// are applied on the next tick.
    pub fn tick(&mut self, now: Instant) -> Result<TickResult, FadeError> {
        let max_drift = Duration::from_millis(self.tick_interval.as_millis() * 2);
        if now > self.next_tick + max_drift {
            self.next_tick = now;
        }

        self.commands.drain_into(&mut self.controller, now)?;
        let state = self.controller.tick(now, &mut self.sender)?;

        self.next_tick += self.tick_interval;

        Ok(TickResult {
            next_deadline: self.next_tick,
            sleep_duration: self.next_tick.saturating_duration_since(now),
            state,
        })
    }

    pub fn controller(&self) -> &FadeController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut FadeController {
        &mut self.controller
    }

    pub fn sender(&self) -> &S {
        &self.sender
    }

    pub fn sender_mut(&mut self) -> &mut S {
        &mut self.sender
    }
}
