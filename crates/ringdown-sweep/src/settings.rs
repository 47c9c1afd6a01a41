//! Sweep-wide thresholds and knobs.

use ringdown_analysis::StftParams;
use std::time::Duration;

/// Fixed windows, thresholds, and concurrency limits for one sweep.
#[derive(Debug, Clone)]
pub struct SweepSettings {
    /// Offset from the silence boundary to the start of the residual
    /// measurement window, in seconds. Skipping the first half second
    /// keeps the window clear of legitimate release tails.
    pub measure_offset_secs: f32,
    /// Length of the residual measurement window, in seconds.
    pub measure_duration_secs: f32,
    /// Frequency band of the residual measurement, in Hz.
    pub analysis_band_hz: (f32, f32),
    /// Length of the resonance analysis window (starting at the silence
    /// boundary), in seconds.
    pub resonance_window_secs: f32,
    /// Per-bin energy above this during the resonance window is flagged,
    /// in dB.
    pub resonance_threshold_db: f32,
    /// A configuration whose residual average exceeds this is listed in
    /// the verdicts, in dB.
    pub residual_verdict_db: f32,
    /// Concurrent sessions the device boundary tolerates. Analysis is
    /// always fully parallel; this only gates harness calls.
    pub max_concurrent_harness_sessions: usize,
    /// Deadline for a single harness invocation. Expiry fails that pair
    /// only.
    pub harness_timeout: Duration,
    /// Short-time transform parameters shared by all measurements.
    pub stft: StftParams,
}

impl Default for SweepSettings {
    fn default() -> Self {
        Self {
            measure_offset_secs: 0.5,
            measure_duration_secs: 1.0,
            analysis_band_hz: (20.0, 8000.0),
            resonance_window_secs: 1.0,
            resonance_threshold_db: -60.0,
            residual_verdict_db: -70.0,
            max_concurrent_harness_sessions: 1,
            harness_timeout: Duration::from_secs(60),
            stft: StftParams::default(),
        }
    }
}
