//! Linear interpolation between two lighting states.
//!
//! Channels are carried as `f32` between ticks and only the rounded form is
//! ever compared or transmitted. Stepping the integers directly would drift,
//! while `start + (target - start) * 1.0` lands exactly on the target.

use embassy_time::Duration;

use crate::state::{CHANNEL_COUNT, Channel, LightingState};

/// Floating value of every channel, in [`Channel::ALL`] order
pub type Accumulators = [f32; CHANNEL_COUNT];

/// Fraction of `duration` covered by `elapsed`, clamped to `1.0`.
///
/// A zero duration is always complete.
#[allow(clippy::cast_precision_loss)]
pub fn progress_of(elapsed: Duration, duration: Duration) -> f32 {
    let total = duration.as_millis();
    if total == 0 {
        return 1.0;
    }
    let elapsed = elapsed.as_millis();
    if elapsed >= total {
        return 1.0;
    }

    elapsed as f32 / total as f32
}

/// Interpolate a single channel
#[inline]
pub fn lerp(start: u8, target: u8, progress: f32) -> f32 {
    let start = f32::from(start);
    start + (f32::from(target) - start) * progress
}

/// Round a channel value to the nearest transmittable integer
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn round_channel(value: f32) -> u8 {
    let rounded = libm::roundf(value);
    if rounded <= 0.0 {
        0
    } else if rounded >= 255.0 {
        u8::MAX
    } else {
        rounded as u8
    }
}

/// Interpolate every channel
pub fn interpolate(start: &LightingState, target: &LightingState, progress: f32) -> Accumulators {
    let mut values = [0.0; CHANNEL_COUNT];
    for channel in Channel::ALL {
        values[channel.index()] = lerp(start[channel], target[channel], progress);
    }
    values
}

/// Rounded form of the accumulators
pub fn round_channels(values: &Accumulators) -> LightingState {
    let mut channels = [0; CHANNEL_COUNT];
    for (rounded, value) in channels.iter_mut().zip(values) {
        *rounded = round_channel(*value);
    }
    LightingState::from_channels(channels)
}

/// Exact floating form of a state
pub fn accumulators_of(state: &LightingState) -> Accumulators {
    state.channels().map(f32::from)
}

