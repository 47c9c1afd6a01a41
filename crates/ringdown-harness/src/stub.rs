//! In-process stand-in harnesses.
//!
//! Used two ways: by the test suites, where deterministic device behavior
//! is needed, and by dry-only runs, where [`Bypass`] stands in for the
//! absent device so the pipeline still produces baseline measurements.

use crate::{EffectHarness, HarnessError};
use ringdown_core::{ParameterSet, Waveform};
use std::f32::consts::PI;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Returns the input unchanged.
pub struct Bypass;

impl EffectHarness for Bypass {
    fn process(&self, input: &Waveform, _params: &ParameterSet) -> Result<Waveform, HarnessError> {
        Ok(input.clone())
    }
}

/// Applies a flat gain.
pub struct Gain(pub f32);

impl EffectHarness for Gain {
    fn process(&self, input: &Waveform, _params: &ParameterSet) -> Result<Waveform, HarnessError> {
        let samples = input.samples().iter().map(|&s| s * self.0).collect();
        Ok(Waveform::new(samples, input.sample_rate()))
    }
}

/// Simulates the resonance bug: mixes a tone over the full buffer, so the
/// tone keeps sounding where the stimulus has gone silent.
pub struct StuckTone {
    /// Frequency of the stuck tone in Hz.
    pub freq_hz: f32,
    /// Linear amplitude of the stuck tone.
    pub amplitude: f32,
}

impl EffectHarness for StuckTone {
    fn process(&self, input: &Waveform, _params: &ParameterSet) -> Result<Waveform, HarnessError> {
        let sr = input.sample_rate();
        let samples = input
            .samples()
            .iter()
            .enumerate()
            .map(|(i, &s)| s + self.amplitude * (2.0 * PI * self.freq_hz * i as f32 / sr).sin())
            .collect();
        Ok(Waveform::new(samples, sr))
    }
}

/// Bypass that fails exactly one invocation (1-based), counted across
/// threads.
pub struct FailNth {
    nth: usize,
    calls: AtomicUsize,
}

impl FailNth {
    /// Fail the `nth` call to `process` (1-based), pass all others through.
    pub fn new(nth: usize) -> Self {
        Self {
            nth,
            calls: AtomicUsize::new(0),
        }
    }
}

impl EffectHarness for FailNth {
    fn process(&self, input: &Waveform, _params: &ParameterSet) -> Result<Waveform, HarnessError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if call == self.nth {
            return Err(HarnessError::ProcessingFailed(format!(
                "injected failure on call {call}"
            )));
        }
        Ok(input.clone())
    }
}

/// A device that is not there: probe and process both fail. Drives the
/// dry-only degradation path in tests.
pub struct Unavailable;

impl EffectHarness for Unavailable {
    fn process(&self, _input: &Waveform, _params: &ParameterSet) -> Result<Waveform, HarnessError> {
        Err(HarnessError::DeviceUnavailable("stub device".into()))
    }

    fn probe(&self) -> Result<(), HarnessError> {
        Err(HarnessError::DeviceUnavailable("stub device".into()))
    }
}

/// Bypass that sleeps first; for exercising per-pair timeouts.
pub struct Slow(pub Duration);

impl EffectHarness for Slow {
    fn process(&self, input: &Waveform, _params: &ParameterSet) -> Result<Waveform, HarnessError> {
        std::thread::sleep(self.0);
        Ok(input.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> Waveform {
        Waveform::new(vec![0.1, -0.2, 0.3], 44_100.0)
    }

    #[test]
    fn bypass_is_identity() {
        let out = Bypass.process(&input(), &ParameterSet::new(0.0, 0.0)).unwrap();
        assert_eq!(out, input());
    }

    #[test]
    fn fail_nth_fails_exactly_once() {
        let harness = FailNth::new(2);
        let params = ParameterSet::new(0.0, 0.0);
        let results: Vec<bool> = (0..4)
            .map(|_| harness.process(&input(), &params).is_ok())
            .collect();
        assert_eq!(results, vec![true, false, true, true]);
    }

    #[test]
    fn stuck_tone_keeps_sounding_in_silence() {
        let silent = Waveform::new(vec![0.0; 4410], 44_100.0);
        let harness = StuckTone {
            freq_hz: 440.0,
            amplitude: 0.1,
        };
        let out = harness.process(&silent, &ParameterSet::new(0.0, 0.0)).unwrap();
        assert!(out.peak() > 0.05);
    }
}
