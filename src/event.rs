//! Mapping of channel values onto 64-bit bus event ids.
//!
//! The configured base id keeps its upper six bytes; byte 6 carries the
//! channel parameter index and byte 7 the value:
//! `XX.XX.XX.XX.XX.XX.PP.VV`.

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::error::FadeError;
use crate::state::Channel;
use crate::{EventSender, SendOutcome};

/// Base event id used until one is configured
pub const DEFAULT_BASE_EVENT_ID: u64 = 0x0501_0101_2260_0000;

const BASE_MASK: u64 = 0xFFFF_FFFF_FFFF_0000;

/// Event id announcing `value` for `channel`
#[inline]
#[allow(clippy::cast_lossless)]
pub const fn encode_event_id(base: u64, channel: Channel, value: u8) -> u64 {
    (base & BASE_MASK) | ((channel.parameter() as u64) << 8) | value as u64
}

/// Split an event id produced under `base` back into channel and value
#[allow(clippy::cast_possible_truncation)]
pub fn decode_event_id(base: u64, event_id: u64) -> Result<(Channel, u8), FadeError> {
    if event_id & BASE_MASK != base & BASE_MASK {
        return Err(FadeError::InvalidArgument);
    }
    let channel = Channel::from_index((event_id >> 8) as u8)?;
    Ok((channel, event_id as u8))
}

/// Something that can put a single event id on the bus
pub trait EventProducer {
    /// Emit one event id
    fn produce(&mut self, event_id: u64) -> SendOutcome;
}

/// [`EventSender`] that encodes channel values as event ids
#[derive(Debug, Clone)]
pub struct EventIdSender<P: EventProducer> {
    producer: P,
    base_event_id: u64,
}

impl<P: EventProducer> EventIdSender<P> {
    /// Create a sender using [`DEFAULT_BASE_EVENT_ID`]
    pub const fn new(producer: P) -> Self {
        Self::with_base_event_id(producer, DEFAULT_BASE_EVENT_ID)
    }

    /// Create a sender with a configured base id
    pub const fn with_base_event_id(producer: P, base_event_id: u64) -> Self {
        Self {
            producer,
            base_event_id,
        }
    }

    /// Base id currently in use
    pub const fn base_event_id(&self) -> u64 {
        self.base_event_id
    }

    /// Change the base id, e.g. after the node configuration was edited
    pub fn set_base_event_id(&mut self, base_event_id: u64) {
        if base_event_id != self.base_event_id {
            #[cfg(feature = "esp32-log")]
            println!(
                "[EventIdSender.set_base_event_id] {:016x} -> {:016x}",
                self.base_event_id, base_event_id
            );
            self.base_event_id = base_event_id;
        }
    }

    /// Wrapped producer
    pub const fn producer(&self) -> &P {
        &self.producer
    }

    /// Wrapped producer, mutably
    pub fn producer_mut(&mut self) -> &mut P {
        &mut self.producer
    }

    /// Unwrap the producer
    pub fn into_inner(self) -> P {
        self.producer
    }
}

impl<P: EventProducer> EventSender for EventIdSender<P> {
    fn send(&mut self, channel: Channel, value: u8) -> SendOutcome {
        let event_id = encode_event_id(self.base_event_id, channel, value);
        #[cfg(feature = "esp32-log")]
        println!(
            "[EventIdSender.send] {:016x} (param={}, value={})",
            event_id,
            channel.parameter(),
            value
        );
        self.producer.produce(event_id)
    }
}
