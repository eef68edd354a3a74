//! Fade state machine
//!
//! Moves a [`LightingState`] towards a target over time and pushes the
//! rounded channel values to an [`EventSender`] in rate limited rounds.
//! All mutating operations are expected to run on the single lighting tick
//! context; the controller itself does no locking.

use embassy_time::{Duration, Instant};

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::error::FadeError;
use crate::interpolate::{Accumulators, accumulators_of, interpolate, progress_of, round_channels};
use crate::rate_limit::{MIN_TRANSMIT_INTERVAL, RateLimiter};
use crate::state::{CHANNEL_COUNT, LightingState, TRANSMIT_ORDER, TransitionRequest};
use crate::{EventSender, SendOutcome};

/// Default cadence of the lighting tick
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(10);

/// Timing configuration of the fade controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaderConfig {
    /// Minimum spacing between the start of two transmission rounds.
    ///
    /// Values below [`MIN_TRANSMIT_INTERVAL`] are raised to it.
    pub min_transmit_interval: Duration,
    /// Cadence the tick driver calls [`FadeController::tick`] at
    pub tick_interval: Duration,
}

impl FaderConfig {
    /// Bus floor and a 10 ms tick
    pub const DEFAULT: Self = Self {
        min_transmit_interval: MIN_TRANSMIT_INTERVAL,
        tick_interval: DEFAULT_TICK_INTERVAL,
    };

    /// Same config with the transmit interval raised to the bus floor
    pub const fn with_floor(self) -> Self {
        if self.min_transmit_interval.as_ticks() < MIN_TRANSMIT_INTERVAL.as_ticks() {
            Self {
                min_transmit_interval: MIN_TRANSMIT_INTERVAL,
                tick_interval: self.tick_interval,
            }
        } else {
            self
        }
    }
}

impl Default for FaderConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
/// Phase of the fade controller
pub enum FadeState {
    #[default]
    /// Nothing to do
    Idle,
    /// Interpolating or flushing towards the target
    Fading,
    /// Target reached; drops back to idle on the next tick
    Complete,
}

/// Snapshot for progress displays
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FadeProgress {
    /// Phase at the time of the snapshot
    pub state: FadeState,
    /// Last computed values
    pub current: LightingState,
    /// Time since the fade started, capped at `total_ms`
    pub elapsed_ms: u32,
    /// Fade length
    pub total_ms: u32,
    /// 0..=100, reaches 100 only once the fade is complete
    pub percent: u8,
}

/// Lighting fade controller
#[derive(Debug, Clone)]
pub struct FadeController {
    config: FaderConfig,
    initialized: bool,
    state: FadeState,

    // Values
    current: LightingState,
    /// Last value the bus acknowledged per channel
    confirmed: LightingState,
    source: LightingState,
    target: LightingState,
    accumulators: Accumulators,

    // Timing
    duration_ms: u32,
    fade_start: Instant,
    limiter: RateLimiter,

    // Transmission
    next_channel: usize,
    transmit_pending: bool,
}

impl FadeController {
    /// Create an uninitialized controller with default timings.
    ///
    /// This is `const` so the controller can live in a `static`;
    /// call [`FadeController::init`] before use.
    pub const fn new() -> Self {
        Self::with_config(FaderConfig::DEFAULT)
    }

    /// Create an uninitialized controller.
    ///
    /// The transmit interval never goes below [`MIN_TRANSMIT_INTERVAL`].
    pub const fn with_config(config: FaderConfig) -> Self {
        let config = config.with_floor();
        Self {
            config,
            initialized: false,
            state: FadeState::Idle,
            current: LightingState::OFF,
            confirmed: LightingState::OFF,
            source: LightingState::OFF,
            target: LightingState::OFF,
            accumulators: [0.0; CHANNEL_COUNT],
            duration_ms: 0,
            fade_start: Instant::from_millis(0),
            limiter: RateLimiter::new(config.min_transmit_interval),
            next_channel: 0,
            transmit_pending: false,
        }
    }

    /// Create an initialized controller seeded with `current`
    pub fn with_state(config: FaderConfig, current: LightingState) -> Self {
        let mut controller = Self::with_config(config);
        controller.init();
        controller.seed(current);
        controller
    }

    /// Initialize the controller with every channel at zero.
    ///
    /// Calling it again is a no-op.
    pub fn init(&mut self) {
        if self.initialized {
            #[cfg(feature = "esp32-log")]
            println!("[FadeController.init] already initialized");
            return;
        }
        *self = Self::with_config(self.config);
        self.initialized = true;
        #[cfg(feature = "esp32-log")]
        println!("[FadeController.init] fade controller initialized");
    }

    /// Check if [`FadeController::init`] has run
    pub const fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Effective timing configuration
    pub const fn config(&self) -> FaderConfig {
        self.config
    }

    /// Start a transition from the current values to `request.target`.
    ///
    /// An active fade is superseded and the new one starts from wherever
    /// the old one got to. A zero duration jumps straight to the target
    /// and leaves a single round of all channels to transmit.
    pub fn start(&mut self, request: TransitionRequest, now: Instant) -> Result<(), FadeError> {
        self.ensure_initialized()?;

        if self.state == FadeState::Fading {
            #[cfg(feature = "esp32-log")]
            println!("[FadeController.start] superseding active fade");
        }

        self.source = self.current;
        self.target = request.target;
        self.duration_ms = request.duration_ms;
        self.fade_start = now;
        self.next_channel = 0;
        self.transmit_pending = true;
        self.state = FadeState::Fading;

        if request.is_immediate() {
            #[cfg(feature = "esp32-log")]
            println!(
                "[FadeController.start] immediate apply: B={} R={} G={} B={} W={}",
                request.target.brightness(),
                request.target.red(),
                request.target.green(),
                request.target.blue(),
                request.target.white()
            );
            self.current = request.target;
            self.accumulators = accumulators_of(&request.target);
            return Ok(());
        }

        #[cfg(feature = "esp32-log")]
        println!(
            "[FadeController.start] fade over {} ms: B={}->{} R={}->{} G={}->{} B={}->{} W={}->{}",
            request.duration_ms,
            self.source.brightness(),
            request.target.brightness(),
            self.source.red(),
            request.target.red(),
            self.source.green(),
            request.target.green(),
            self.source.blue(),
            request.target.blue(),
            self.source.white(),
            request.target.white()
        );
        self.accumulators = accumulators_of(&self.current);

        Ok(())
    }

    /// Jump to `target`, still honoring the transmission floor
    pub fn apply_immediate(&mut self, target: LightingState, now: Instant) -> Result<(), FadeError> {
        self.start(TransitionRequest::immediate(target), now)
    }

    /// Stop immediately, keeping whatever values were last computed.
    ///
    /// Any pending transmission is dropped.
    pub fn abort(&mut self) -> Result<(), FadeError> {
        self.ensure_initialized()?;

        if self.state == FadeState::Fading {
            #[cfg(feature = "esp32-log")]
            println!(
                "[FadeController.abort] aborted at B={} R={} G={} B={} W={}",
                self.current.brightness(),
                self.current.red(),
                self.current.green(),
                self.current.blue(),
                self.current.white()
            );
        }

        self.state = FadeState::Idle;
        self.transmit_pending = false;
        self.next_channel = 0;
        Ok(())
    }

    pub fn get_current(&self) -> Result<LightingState, FadeError> {
        self.ensure_initialized()?;
        Ok(self.current)
    }

    /// Seed the current values without transmitting anything.
    ///
    /// Used after restoring a previously applied state, so the bus is
    /// assumed to already hold these values.
    pub fn set_current(&mut self, state: LightingState) -> Result<(), FadeError> {
        self.ensure_initialized()?;
        self.seed(state);
        #[cfg(feature = "esp32-log")]
        println!(
            "[FadeController.set_current] B={} R={} G={} B={} W={}",
            state.brightness(),
            state.red(),
            state.green(),
            state.blue(),
            state.white()
        );
        Ok(())
    }

    /// Advance the fade to `now` and transmit at most one round.
    ///
    /// Never blocks: a bus that is not ready only delays the remaining
    /// channels to a later tick. Returns the state after the tick.
    pub fn tick<S: EventSender>(&mut self, now: Instant, sender: &mut S) -> Result<FadeState, FadeError> {
        self.ensure_initialized()?;

        match self.state {
            FadeState::Idle => return Ok(FadeState::Idle),
            FadeState::Complete => {
                self.state = FadeState::Idle;
                return Ok(FadeState::Idle);
            }
            FadeState::Fading => {}
        }

        let elapsed = now.saturating_duration_since(self.fade_start);
        let progress = progress_of(elapsed, self.duration());

        self.accumulators = interpolate(&self.source, &self.target, progress);
        self.current = round_channels(&self.accumulators);
        if self.current != self.confirmed {
            self.transmit_pending = true;
        }

        if self.transmit_pending && self.limiter.permits(now) {
            self.transmit_round(now, sender);
        }

        if progress >= 1.0 && !self.transmit_pending {
            if self.current == self.target && self.confirmed == self.target {
                #[cfg(feature = "esp32-log")]
                println!("[FadeController.tick] fade complete");
                self.state = FadeState::Complete;
            } else {
                // Some channel was skipped on the bus, flush the exact target again
                self.current = self.target;
                self.accumulators = accumulators_of(&self.target);
                self.transmit_pending = true;
            }
        }

        Ok(self.state)
    }

    /// Progress of the current fade at `now`.
    ///
    /// A pure read; an uninitialized controller reports an idle, empty fade.
    pub fn get_progress(&self, now: Instant) -> FadeProgress {
        if !self.initialized {
            return FadeProgress::default();
        }

        let total_ms = self.duration_ms;
        let (elapsed_ms, percent) = match self.state {
            FadeState::Idle => (0, 0),
            FadeState::Complete => (total_ms, 100),
            FadeState::Fading => {
                let elapsed = now.saturating_duration_since(self.fade_start).as_millis();
                let elapsed_ms = u32::try_from(elapsed).unwrap_or(u32::MAX).min(total_ms);
                let percent = if total_ms == 0 {
                    99
                } else {
                    (u64::from(elapsed_ms) * 100 / u64::from(total_ms)).min(99)
                };
                (elapsed_ms, u8::try_from(percent).unwrap_or(99))
            }
        };

        FadeProgress {
            state: self.state,
            current: self.current,
            elapsed_ms,
            total_ms,
            percent,
        }
    }

    /// Check if a fade is in progress
    pub const fn is_active(&self) -> bool {
        self.initialized && matches!(self.state, FadeState::Fading)
    }

    /// Current phase
    pub const fn state(&self) -> FadeState {
        self.state
    }

    /// Values the current fade started from
    pub const fn source(&self) -> LightingState {
        self.source
    }

    /// Values the current fade is heading to
    pub const fn target(&self) -> LightingState {
        self.target
    }

    /// Check if a round is computed but not yet fully on the bus
    pub const fn is_transmit_pending(&self) -> bool {
        self.transmit_pending
    }

    fn duration(&self) -> Duration {
        Duration::from_millis(u64::from(self.duration_ms))
    }

    fn seed(&mut self, state: LightingState) {
        self.current = state;
        self.confirmed = state;
        self.accumulators = accumulators_of(&state);
    }

    fn ensure_initialized(&self) -> Result<(), FadeError> {
        if self.initialized {
            Ok(())
        } else {
            Err(FadeError::NotInitialized)
        }
    }

    /// Send the channels of the current round, resuming at `next_channel`.
    ///
    /// `NotReady` suspends the round at that channel, any other failure
    /// skips the channel so the round can still finish.
    fn transmit_round<S: EventSender>(&mut self, now: Instant, sender: &mut S) {
        self.limiter.record(now);

        while self.next_channel < CHANNEL_COUNT {
            let channel = TRANSMIT_ORDER[self.next_channel];
            let value = self.current[channel];
            #[cfg(feature = "esp32-log")]
            println!("[FadeController.transmit] {}={}", channel.as_str(), value);

            match sender.send(channel, value) {
                SendOutcome::Sent => {
                    self.confirmed[channel] = value;
                    self.next_channel += 1;
                }
                SendOutcome::NotReady => return,
                SendOutcome::Failed => {
                    self.next_channel += 1;
                }
            }
        }

        self.next_channel = 0;
        self.transmit_pending = false;
    }
}

impl Default for FadeController {
    fn default() -> Self {
        Self::new()
    }
}
