//! Ringdown Core - shared value types for the resonance diagnostic
//!
//! This crate holds the data model the rest of the workspace passes around:
//!
//! - [`Waveform`] - immutable mono sample buffer with its sample rate
//! - [`SilenceBoundary`] / [`Stimulus`] - where a stimulus ends and decay
//!   observation begins
//! - [`ParameterSet`] - one point of the device parameter grid
//!
//! All types here are plain values: compared by field equality, never
//! mutated after construction, safe to send across threads.

mod params;
mod waveform;

pub use params::{ParameterError, ParameterSet};
pub use waveform::{SilenceBoundary, Stimulus, Waveform};

/// Nominal sample rate of the diagnostic, in Hz.
///
/// Every stimulus is generated at this rate and the device under test is
/// expected to return audio at the same rate.
pub const NOMINAL_SAMPLE_RATE: f32 = 44_100.0;

/// Floor added to power before taking the logarithm, so that silence maps
/// to a finite dB value instead of negative infinity.
pub const DB_EPSILON: f32 = 1e-10;

/// dB value of pure silence: `10 * log10(DB_EPSILON)`.
pub const SILENCE_FLOOR_DB: f32 = -100.0;

/// Convert a power value to decibels with the [`DB_EPSILON`] floor.
#[inline]
pub fn power_to_db(power: f32) -> f32 {
    10.0 * (power + DB_EPSILON).log10()
}
