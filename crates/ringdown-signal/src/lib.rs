//! Ringdown Signal - deterministic test-stimulus generators
//!
//! Every generator returns a [`Stimulus`]: a mono waveform consisting of an
//! excitation followed by a silent tail, plus the timestamp where the
//! excitation ends. The silent tail is where the diagnostic looks for
//! energy that should not be there.
//!
//! All generators are pure. The two that use randomness ([`noise_burst`]
//! and [`pad_swell`]) take an explicit seed, so a given argument list
//! always produces bit-identical output.
//!
//! ```rust
//! use ringdown_signal::noise_burst;
//!
//! let stim = noise_burst(1.0, 2.0, 44_100.0, 0xDECAF);
//! assert_eq!(stim.waveform.len(), 3 * 44_100);
//! assert!((stim.silence_boundary.secs() - 1.0).abs() < f32::EPSILON);
//! ```

mod bank;
mod generators;
mod rng;

pub use bank::standard_bank;
pub use generators::{
    chord_burst, drum_hit, harmonic_decay, impulse, impulse_train, noise_burst, pad_swell, pluck,
    sustained_then_stop, sweep, tone_burst, vocal_formant,
};
pub use rng::XorShift32;

pub use ringdown_core::{SilenceBoundary, Stimulus, Waveform};
