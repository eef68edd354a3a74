#![no_std]

pub mod command;
pub mod error;
pub mod event;
pub mod interpolate;
pub mod rate_limit;
pub mod scheduler;
pub mod state;
pub mod transition;

pub use command::{CommandQueue, FadeCommand};
pub use error::FadeError;
pub use event::{DEFAULT_BASE_EVENT_ID, EventIdSender, EventProducer};
pub use rate_limit::{MIN_TRANSMIT_INTERVAL, RateLimiter, may_transmit};
pub use scheduler::{TickResult, TickScheduler};
pub use state::{Channel, LightingState, TRANSMIT_ORDER, TransitionRequest};
pub use transition::{FadeController, FadeProgress, FadeState, FaderConfig};

pub use embassy_time::{Duration, Instant};

/// Result of handing one channel value to the bus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// Value is on its way
    Sent,
    /// Bus is busy, retry the same channel on a later tick
    NotReady,
    /// Value was dropped, move on to the next channel
    Failed,
}

/// Abstract bus producer
///
/// Implement this trait to put lighting parameters on a bus.
/// The fade controller calls it at most once per channel per round.
pub trait EventSender {
    /// Emit one channel value
    fn send(&mut self, channel: Channel, value: u8) -> SendOutcome;
}

impl<T: EventSender + ?Sized> EventSender for &mut T {
    fn send(&mut self, channel: Channel, value: u8) -> SendOutcome {
        (**self).send(channel, value)
    }
}
