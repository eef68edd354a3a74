//! Lighting values and the channels they are made of.

use core::ops::{Index, IndexMut};

use smart_leds::RGB8;

use crate::error::FadeError;

/// Number of independently controlled channels
pub const CHANNEL_COUNT: usize = 5;

/// Order in which channels go out within one transmission round.
///
/// Brightness leads so that a fade from black never flashes the old color.
pub const TRANSMIT_ORDER: [Channel; CHANNEL_COUNT] = [
    Channel::Brightness,
    Channel::Red,
    Channel::Green,
    Channel::Blue,
    Channel::White,
];

const CHANNEL_ID_RED: u8 = 0;
const CHANNEL_ID_GREEN: u8 = 1;
const CHANNEL_ID_BLUE: u8 = 2;
const CHANNEL_ID_WHITE: u8 = 3;
const CHANNEL_ID_BRIGHTNESS: u8 = 4;

/// One lighting parameter.
///
/// The discriminant is the parameter index used on the bus.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Channel {
    Red = CHANNEL_ID_RED,
    Green = CHANNEL_ID_GREEN,
    Blue = CHANNEL_ID_BLUE,
    White = CHANNEL_ID_WHITE,
    Brightness = CHANNEL_ID_BRIGHTNESS,
}

impl Channel {
    /// All channels in storage (parameter index) order
    pub const ALL: [Self; CHANNEL_COUNT] = [
        Self::Red,
        Self::Green,
        Self::Blue,
        Self::White,
        Self::Brightness,
    ];

    /// Position of the channel inside a [`LightingState`]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Bus parameter index of the channel
    pub const fn parameter(self) -> u8 {
        self as u8
    }

    /// Channel for a bus parameter index
    pub const fn from_index(index: u8) -> Result<Self, FadeError> {
        Ok(match index {
            CHANNEL_ID_RED => Self::Red,
            CHANNEL_ID_GREEN => Self::Green,
            CHANNEL_ID_BLUE => Self::Blue,
            CHANNEL_ID_WHITE => Self::White,
            CHANNEL_ID_BRIGHTNESS => Self::Brightness,
            _ => return Err(FadeError::InvalidArgument),
        })
    }

    /// Short label for logs
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Red => "R",
            Self::Green => "G",
            Self::Blue => "B",
            Self::White => "W",
            Self::Brightness => "Brightness",
        }
    }
}

/// Value of every channel at one moment.
///
/// Brightness is a peer channel, not a multiplier, so every combination
/// of values is valid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct LightingState {
    channels: [u8; CHANNEL_COUNT],
}

impl LightingState {
    /// All channels at zero
    pub const OFF: Self = Self {
        channels: [0; CHANNEL_COUNT],
    };

    /// Build a state from individual channel values
    pub const fn new(red: u8, green: u8, blue: u8, white: u8, brightness: u8) -> Self {
        Self {
            channels: [red, green, blue, white, brightness],
        }
    }

    /// Build a state from values laid out in [`Channel::ALL`] order
    pub const fn from_channels(channels: [u8; CHANNEL_COUNT]) -> Self {
        Self { channels }
    }

    /// Build a state from the color part and the two remaining channels
    pub const fn from_rgb(rgb: RGB8, white: u8, brightness: u8) -> Self {
        Self::new(rgb.r, rgb.g, rgb.b, white, brightness)
    }

    /// Values in [`Channel::ALL`] order
    pub const fn channels(&self) -> [u8; CHANNEL_COUNT] {
        self.channels
    }

    /// Value of one channel
    pub const fn get(&self, channel: Channel) -> u8 {
        self.channels[channel.index()]
    }

    /// Overwrite one channel
    pub fn set(&mut self, channel: Channel, value: u8) {
        self.channels[channel.index()] = value;
    }

    /// Red channel
    pub const fn red(&self) -> u8 {
        self.get(Channel::Red)
    }

    /// Green channel
    pub const fn green(&self) -> u8 {
        self.get(Channel::Green)
    }

    /// Blue channel
    pub const fn blue(&self) -> u8 {
        self.get(Channel::Blue)
    }

    /// White channel
    pub const fn white(&self) -> u8 {
        self.get(Channel::White)
    }

    /// Brightness channel
    pub const fn brightness(&self) -> u8 {
        self.get(Channel::Brightness)
    }

    /// Color part of the state
    pub const fn rgb(&self) -> RGB8 {
        RGB8 {
            r: self.red(),
            g: self.green(),
            b: self.blue(),
        }
    }
}

impl Index<Channel> for LightingState {
    type Output = u8;

    fn index(&self, channel: Channel) -> &u8 {
        &self.channels[channel.index()]
    }
}

impl IndexMut<Channel> for LightingState {
    fn index_mut(&mut self, channel: Channel) -> &mut u8 {
        &mut self.channels[channel.index()]
    }
}

/// Raw channel values coming from outside (e.g. a stored scene).
///
/// The slice must hold exactly one value per channel in [`Channel::ALL`] order.
impl TryFrom<&[u8]> for LightingState {
    type Error = FadeError;

    fn try_from(raw: &[u8]) -> Result<Self, Self::Error> {
        let channels: [u8; CHANNEL_COUNT] =
            raw.try_into().map_err(|_| FadeError::InvalidArgument)?;
        Ok(Self { channels })
    }
}

/// Request to move the light to `target`.
///
/// A zero duration applies the target immediately.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransitionRequest {
    /// Values to end at
    pub target: LightingState,
    /// Fade length in milliseconds
    pub duration_ms: u32,
}

impl TransitionRequest {
    /// Fade to `target` over `duration_ms`
    pub const fn new(target: LightingState, duration_ms: u32) -> Self {
        Self {
            target,
            duration_ms,
        }
    }

    /// Jump to `target` without fading
    pub const fn immediate(target: LightingState) -> Self {
        Self::new(target, 0)
    }

    /// Check if the request skips the fade
    pub const fn is_immediate(&self) -> bool {
        self.duration_ms == 0
    }
}
