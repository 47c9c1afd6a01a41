//! Waveform and stimulus value types.

/// Immutable mono audio buffer with its sample rate.
#[derive(Debug, Clone, PartialEq)]
pub struct Waveform {
    samples: Vec<f32>,
    sample_rate: f32,
}

impl Waveform {
    /// Create a waveform from raw samples.
    pub fn new(samples: Vec<f32>, sample_rate: f32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    /// Sample data.
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Sample rate in Hz.
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// True if the waveform holds no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Duration in seconds.
    pub fn duration_secs(&self) -> f32 {
        self.samples.len() as f32 / self.sample_rate
    }

    /// Peak absolute sample value.
    pub fn peak(&self) -> f32 {
        self.samples.iter().fold(0.0f32, |acc, &s| acc.max(s.abs()))
    }
}

/// Timestamp (seconds) where a stimulus ends and decay observation begins.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SilenceBoundary(pub f32);

impl SilenceBoundary {
    /// Boundary time in seconds.
    pub fn secs(self) -> f32 {
        self.0
    }
}

/// A generated test signal paired with its silence boundary.
///
/// The boundary always refers to the dry waveform's timeline; processed
/// audio is measured against the same boundary since the device under test
/// must not move the stimulus in time.
#[derive(Debug, Clone, PartialEq)]
pub struct Stimulus {
    /// The generated waveform (stimulus followed by a silent tail).
    pub waveform: Waveform,
    /// Where the stimulus ends within [`Self::waveform`].
    pub silence_boundary: SilenceBoundary,
}

impl Stimulus {
    /// Create a stimulus from a waveform and the time its excitation ends.
    pub fn new(waveform: Waveform, silence_starts_at: f32) -> Self {
        Self {
            waveform,
            silence_boundary: SilenceBoundary(silence_starts_at),
        }
    }
}
