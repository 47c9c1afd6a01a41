//! Short-time dB spectrogram with explicit time and frequency axes.

use crate::fft::{Fft, Window};
use crate::{AnalysisError, nearest_index};
use ringdown_core::{Waveform, power_to_db};

/// Parameters of the short-time transform.
///
/// The defaults (2048-sample window, 1920-sample overlap, Hann) give a
/// 128-sample hop, about 2.9 ms at 44.1 kHz. The diagnostic needs that
/// fine a time grid to trace decay curves over a few hundred
/// milliseconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StftParams {
    /// Analysis window length in samples.
    pub window_size: usize,
    /// Overlap between consecutive windows in samples.
    pub overlap: usize,
    /// Window function.
    pub window: Window,
}

impl Default for StftParams {
    fn default() -> Self {
        Self {
            window_size: 2048,
            overlap: 1920,
            window: Window::Hann,
        }
    }
}

impl StftParams {
    /// Hop length between frames, `window_size - overlap`.
    pub fn hop(&self) -> usize {
        self.window_size - self.overlap
    }
}

/// Time-frequency magnitude representation in decibels.
///
/// Invariant: `magnitude_db` has exactly `frequencies.len()` rows of
/// `times.len()` columns each; both axes are ascending. Derived
/// transiently from a waveform and never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct Spectrogram {
    frequencies: Vec<f32>,
    times: Vec<f32>,
    magnitude_db: Vec<Vec<f32>>,
}

impl Spectrogram {
    /// Ascending frequency axis in Hz, one entry per bin.
    pub fn frequencies(&self) -> &[f32] {
        &self.frequencies
    }

    /// Ascending time axis in seconds; entries are window centers.
    pub fn times(&self) -> &[f32] {
        &self.times
    }

    /// Magnitude matrix in dB, indexed `[frequency][time]`.
    pub fn magnitude_db(&self) -> &[Vec<f32>] {
        &self.magnitude_db
    }

    /// Number of frequency bins.
    pub fn num_bins(&self) -> usize {
        self.frequencies.len()
    }

    /// Number of time frames.
    pub fn num_frames(&self) -> usize {
        self.times.len()
    }

    /// Index of the frequency bin nearest to `freq_hz`.
    ///
    /// Nearest-value lookup, not interpolation; on an exact tie the lower
    /// index wins.
    pub fn freq_index_nearest(&self, freq_hz: f32) -> Option<usize> {
        nearest_index(&self.frequencies, freq_hz)
    }

    /// Index of the time frame whose center is nearest to `secs`.
    ///
    /// Same rounding policy as [`Self::freq_index_nearest`].
    pub fn time_index_nearest(&self, secs: f32) -> Option<usize> {
        nearest_index(&self.times, secs)
    }
}

/// Compute the short-time dB spectrogram of a waveform.
///
/// For an `N`-sample waveform with window `W` and overlap `O` the time
/// axis has exactly `(N - O) / (W - O)` frames (integer division); a
/// waveform shorter than one window is an error rather than a degenerate
/// all-NaN result.
///
/// Per frame, the windowed power spectral density is
/// `|X[k]|^2 / (sr * sum(w^2))` (doubled off DC/Nyquist to fold the
/// negative frequencies in), then converted to dB as
/// `10 * log10(power + 1e-10)` so silence maps to a finite -100 dB floor.
///
/// Pure function: identical input yields bit-identical output.
pub fn compute_spectrogram(
    waveform: &Waveform,
    params: &StftParams,
) -> Result<Spectrogram, AnalysisError> {
    let w = params.window_size;
    if params.overlap >= w {
        return Err(AnalysisError::InvalidOverlap {
            overlap: params.overlap,
            window_size: w,
        });
    }
    let samples = waveform.samples();
    if samples.len() < w {
        return Err(AnalysisError::WaveformTooShort {
            len: samples.len(),
            window_size: w,
        });
    }

    let hop = params.hop();
    let num_frames = (samples.len() - params.overlap) / hop;
    let num_bins = w / 2 + 1;
    let sample_rate = waveform.sample_rate();

    let fft = Fft::new(w);
    let coeffs = params.window.coefficients(w);
    let window_power: f32 = coeffs.iter().map(|&c| c * c).sum();
    let scale = 1.0 / (sample_rate * window_power);

    // Row-major [freq][time]; frames are computed one at a time and
    // scattered into the rows.
    let mut magnitude_db = vec![vec![0.0f32; num_frames]; num_bins];

    let mut frame = vec![0.0f32; w];
    for frame_idx in 0..num_frames {
        let start = frame_idx * hop;
        frame.copy_from_slice(&samples[start..start + w]);
        for (sample, &coeff) in frame.iter_mut().zip(coeffs.iter()) {
            *sample *= coeff;
        }

        let spectrum = fft.forward(&frame);
        for (bin, c) in spectrum.iter().enumerate() {
            let mut power = c.norm_sqr() * scale;
            if bin != 0 && bin != num_bins - 1 {
                power *= 2.0;
            }
            magnitude_db[bin][frame_idx] = power_to_db(power);
        }
    }

    let frequencies = (0..num_bins)
        .map(|k| k as f32 * sample_rate / w as f32)
        .collect();
    let times = (0..num_frames)
        .map(|i| (i * hop + w / 2) as f32 / sample_rate)
        .collect();

    Ok(Spectrogram {
        frequencies,
        times,
        magnitude_db,
    })
}
