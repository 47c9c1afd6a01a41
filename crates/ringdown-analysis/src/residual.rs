//! Residual-energy measurement inside a time-frequency window.

use crate::spectrogram::Spectrogram;
use crate::AnalysisError;
use serde::Serialize;

/// Summary of spectral energy inside one time-frequency window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ResidualMeasurement {
    /// Mean magnitude over the selected cells, in dB.
    pub average_db: f32,
    /// Peak magnitude over the selected cells, in dB.
    pub max_db: f32,
}

/// Measure average and peak energy in a window.
///
/// `time_window` is `(start_secs, end_secs)`, `freq_window` is
/// `(low_hz, high_hz)`. Window edges are resolved to the nearest axis
/// entries (ties to the lower index); both edges are inclusive. Since the
/// spectrogram already carries the -100 dB epsilon floor, an all-silent
/// window measures exactly that floor, never `-inf` or NaN.
pub fn measure(
    spectrogram: &Spectrogram,
    time_window: (f32, f32),
    freq_window: (f32, f32),
) -> Result<ResidualMeasurement, AnalysisError> {
    let t0 = spectrogram.time_index_nearest(time_window.0);
    let t1 = spectrogram.time_index_nearest(time_window.1);
    let f0 = spectrogram.freq_index_nearest(freq_window.0);
    let f1 = spectrogram.freq_index_nearest(freq_window.1);

    let (Some(t0), Some(t1), Some(f0), Some(f1)) = (t0, t1, f0, f1) else {
        return Err(AnalysisError::EmptyWindow {
            start: time_window.0,
            end: time_window.1,
        });
    };
    if t1 < t0 {
        return Err(AnalysisError::EmptyWindow {
            start: time_window.0,
            end: time_window.1,
        });
    }
    if f1 < f0 {
        return Err(AnalysisError::EmptyWindow {
            start: freq_window.0,
            end: freq_window.1,
        });
    }

    let mut sum = 0.0f64;
    let mut max = f32::MIN;
    let mut count = 0usize;
    for row in &spectrogram.magnitude_db()[f0..=f1] {
        for &v in &row[t0..=t1] {
            sum += f64::from(v);
            max = max.max(v);
            count += 1;
        }
    }

    Ok(ResidualMeasurement {
        average_db: (sum / count as f64) as f32,
        max_db: max,
    })
}

/// Magnitude over time at the bin nearest `freq_hz`, from `from_secs` to
/// the end of the spectrogram.
///
/// Returns `(seconds after from_secs, dB)` pairs, the decay curve of one
/// frequency after the stimulus stops.
pub fn decay_curve(spectrogram: &Spectrogram, freq_hz: f32, from_secs: f32) -> Vec<(f32, f32)> {
    let (Some(bin), Some(start)) = (
        spectrogram.freq_index_nearest(freq_hz),
        spectrogram.time_index_nearest(from_secs),
    ) else {
        return Vec::new();
    };

    let row = &spectrogram.magnitude_db()[bin];
    spectrogram.times()[start..]
        .iter()
        .zip(&row[start..])
        .map(|(&t, &db)| (t - from_secs, db))
        .collect()
}
