//! Detection of frequencies that fail to decay after the stimulus ends.

use crate::spectrogram::Spectrogram;
use serde::Serialize;

/// Frequency bins below this are ignored; DC offset and rumble would
/// otherwise show up as false resonances.
pub const MIN_RESONANCE_FREQ_HZ: f32 = 20.0;

/// Default energy threshold for calling a bin resonant, in dB.
pub const DEFAULT_THRESHOLD_DB: f32 = -60.0;

/// A frequency whose energy persists above threshold during the silence
/// window. A spectrally clean device produces none of these.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ResonantFrequency {
    /// Bin center frequency in Hz.
    pub frequency_hz: f32,
    /// Average energy during the analysis window, in dB.
    pub energy_db: f32,
}

/// Scan the post-stimulus window for frequencies that fail to decay.
///
/// Averages each bin's dB magnitude over the frames whose center lies in
/// `[silence_start, silence_start + analysis_duration]`, then reports
/// every bin above [`MIN_RESONANCE_FREQ_HZ`] whose average exceeds
/// `threshold_db`, sorted descending by energy. This is the operational
/// form of "a horizontal line after the stimulus ends" on a spectrogram
/// plot.
///
/// Returns an empty list when no frame centers fall inside the window.
pub fn find_resonant_frequencies(
    spectrogram: &Spectrogram,
    silence_start: f32,
    analysis_duration: f32,
    threshold_db: f32,
) -> Vec<ResonantFrequency> {
    let window_end = silence_start + analysis_duration;
    let frames: Vec<usize> = spectrogram
        .times()
        .iter()
        .enumerate()
        .filter(|&(_, &t)| t >= silence_start && t <= window_end)
        .map(|(i, _)| i)
        .collect();
    if frames.is_empty() {
        return Vec::new();
    }

    let mut found: Vec<ResonantFrequency> = spectrogram
        .frequencies()
        .iter()
        .zip(spectrogram.magnitude_db())
        .filter(|&(&freq, _)| freq > MIN_RESONANCE_FREQ_HZ)
        .filter_map(|(&freq, row)| {
            let avg =
                frames.iter().map(|&i| f64::from(row[i])).sum::<f64>() / frames.len() as f64;
            let energy_db = avg as f32;
            (energy_db > threshold_db).then_some(ResonantFrequency {
                frequency_hz: freq,
                energy_db,
            })
        })
        .collect();

    // Worst offender first. Energies are finite by construction (the dB
    // conversion is floored), so the comparison cannot fail.
    found.sort_by(|a, b| b.energy_db.partial_cmp(&a.energy_db).unwrap());
    found
}
