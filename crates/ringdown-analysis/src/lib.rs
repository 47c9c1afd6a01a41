//! Ringdown Analysis - time-frequency descriptors for decay measurement
//!
//! This crate turns a [`Waveform`](ringdown_core::Waveform) into the
//! numbers the diagnostic actually compares against thresholds:
//!
//! - [`fft`] - FFT wrapper with windowing functions
//! - [`spectrogram`] - short-time dB spectrogram with explicit axes
//! - [`residual`] - average/peak energy inside a time-frequency window
//! - [`resonance`] - frequencies that fail to decay after the stimulus ends
//!
//! All functions here are pure: identical input yields bit-identical
//! output, which is what makes the sweep reproducible.
//!
//! ```rust,ignore
//! use ringdown_analysis::{StftParams, compute_spectrogram, residual, resonance};
//!
//! let spec = compute_spectrogram(&waveform, &StftParams::default())?;
//! let res = residual::measure(&spec, (1.5, 2.5), (20.0, 8000.0))?;
//! let ringing = resonance::find_resonant_frequencies(&spec, 1.0, 1.0, -60.0);
//! ```

pub mod fft;
pub mod residual;
pub mod resonance;
pub mod spectrogram;

pub use fft::{Fft, Window};
pub use residual::ResidualMeasurement;
pub use resonance::ResonantFrequency;
pub use spectrogram::{Spectrogram, StftParams, compute_spectrogram};

use thiserror::Error;

/// Analysis contract violations.
///
/// These are programming or input-contract errors, not operational
/// failures: the caller handed us something the math cannot produce a
/// meaningful answer for, and we refuse instead of returning NaN.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AnalysisError {
    /// Spectrogram requested on a waveform shorter than one analysis window.
    #[error("waveform of {len} samples is shorter than one {window_size}-sample analysis window")]
    WaveformTooShort {
        /// Waveform length in samples.
        len: usize,
        /// Requested analysis window size.
        window_size: usize,
    },

    /// Overlap must leave a positive hop between frames.
    #[error("overlap {overlap} must be smaller than window size {window_size}")]
    InvalidOverlap {
        /// Requested overlap in samples.
        overlap: usize,
        /// Requested window size in samples.
        window_size: usize,
    },

    /// A measurement window selects no spectrogram cells.
    #[error("measurement window [{start}, {end}] selects no spectrogram cells")]
    EmptyWindow {
        /// Window start (seconds or Hz).
        start: f32,
        /// Window end (seconds or Hz).
        end: f32,
    },
}

/// Locate the axis index whose value is nearest to `target`.
///
/// Rounding policy: nearest value wins; on an exact tie between two axis
/// points the lower index wins. The axis must be ascending.
pub(crate) fn nearest_index(axis: &[f32], target: f32) -> Option<usize> {
    if axis.is_empty() {
        return None;
    }
    let mut best = 0;
    let mut best_dist = (axis[0] - target).abs();
    for (i, &v) in axis.iter().enumerate().skip(1) {
        let dist = (v - target).abs();
        if dist < best_dist {
            best = i;
            best_dist = dist;
        }
    }
    Some(best)
}
