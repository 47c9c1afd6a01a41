//! Ringdown Harness - boundary to the audio effect under test
//!
//! The harness is a pure call-and-return seam: hand it a waveform and a
//! [`ParameterSet`], get back the processed waveform or a typed failure.
//! It performs no analysis, and a failure on one invocation never
//! poisons the next one.
//!
//! Implementations:
//!
//! - [`RenderHarness`] - drives an external offline render tool found by a
//!   [`DeviceLocator`], one subprocess per invocation
//! - [`stub`] - in-process stand-ins for deterministic tests and dry runs

mod locator;
mod render;
pub mod stub;

pub use locator::{DeviceLocator, EnvPathLocator, FixedLocator};
pub use render::RenderHarness;

use ringdown_core::{ParameterSet, Waveform};
use thiserror::Error;

/// Failure of a single harness invocation.
#[derive(Debug, Clone, Error)]
pub enum HarnessError {
    /// The device under test could not be found or started at all. The
    /// orchestrator treats this as persistent and degrades to dry-only
    /// analysis.
    #[error("device under test unavailable: {0}")]
    DeviceUnavailable(String),

    /// The device rejected the parameter values.
    #[error("device rejected parameters: {0}")]
    ParameterRejected(String),

    /// The device started but processing failed.
    #[error("processing failed: {0}")]
    ProcessingFailed(String),

    /// The invocation did not complete within the caller's deadline.
    #[error("processing timed out after {secs:.1}s")]
    Timeout {
        /// The deadline that expired, in seconds.
        secs: f32,
    },
}

/// The effect under test.
///
/// `process` must be safe to call from multiple threads; each invocation
/// is an independent session with no state carried over, so one
/// configuration's ringing cannot bleed into the next measurement.
pub trait EffectHarness: Send + Sync {
    /// Run one waveform through the device with the given parameters.
    fn process(&self, input: &Waveform, params: &ParameterSet) -> Result<Waveform, HarnessError>;

    /// Cheap availability probe, called once before a sweep.
    ///
    /// The default implementation reports available; [`RenderHarness`]
    /// checks that its tool actually exists.
    fn probe(&self) -> Result<(), HarnessError> {
        Ok(())
    }
}

impl<T: EffectHarness + ?Sized> EffectHarness for Box<T> {
    fn process(&self, input: &Waveform, params: &ParameterSet) -> Result<Waveform, HarnessError> {
        (**self).process(input, params)
    }

    fn probe(&self) -> Result<(), HarnessError> {
        (**self).probe()
    }
}
