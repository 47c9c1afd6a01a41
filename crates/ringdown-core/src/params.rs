//! Device parameter grid points.

use serde::Serialize;
use thiserror::Error;

/// One configuration of the device under test.
///
/// A plain value object: compared by field equality, never mutated after
/// construction. The fields mirror the public parameters of the
/// frequency-domain effect being diagnosed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParameterSet {
    /// Frequency shift in Hz.
    pub shift_hz: f32,
    /// Quantization strength in percent (0 = off, 100 = full snap).
    pub quantize_strength: f32,
    /// Spectral smear time in milliseconds.
    pub smear_ms: f32,
    /// Enhanced (phase-vocoder) processing mode.
    pub enhanced: bool,
    /// Dry/wet mix in percent (100 = fully wet).
    pub dry_wet: f32,
}

impl ParameterSet {
    /// A fully-wet configuration with the given shift and quantize values
    /// and the diagnostic's fixed 100 ms smear.
    pub fn new(shift_hz: f32, quantize_strength: f32) -> Self {
        Self {
            shift_hz,
            quantize_strength,
            smear_ms: 100.0,
            enhanced: true,
            dry_wet: 100.0,
        }
    }

    /// Deterministic filesystem-safe label, e.g.
    /// `shift400_quant100_smear100_enh_wet100`.
    ///
    /// Float fields are rounded to whole units; the grid the diagnostic
    /// sweeps only ever uses integral values.
    pub fn label(&self) -> String {
        format!(
            "shift{}_quant{}_smear{}_{}_wet{}",
            self.shift_hz.round() as i64,
            self.quantize_strength.round() as i64,
            self.smear_ms.round() as i64,
            if self.enhanced { "enh" } else { "plain" },
            self.dry_wet.round() as i64,
        )
    }

    /// Check every field against the device's accepted ranges.
    ///
    /// Called once before a sweep starts so that a bad grid fails fast
    /// instead of mid-run.
    pub fn validate(&self) -> Result<(), ParameterError> {
        if !self.shift_hz.is_finite() || self.shift_hz.abs() > 10_000.0 {
            return Err(ParameterError {
                field: "shift_hz",
                value: self.shift_hz,
                accepted: "-10000..=10000",
            });
        }
        if !(0.0..=100.0).contains(&self.quantize_strength) {
            return Err(ParameterError {
                field: "quantize_strength",
                value: self.quantize_strength,
                accepted: "0..=100",
            });
        }
        if !(0.0..=1_000.0).contains(&self.smear_ms) {
            return Err(ParameterError {
                field: "smear_ms",
                value: self.smear_ms,
                accepted: "0..=1000",
            });
        }
        if !(0.0..=100.0).contains(&self.dry_wet) {
            return Err(ParameterError {
                field: "dry_wet",
                value: self.dry_wet,
                accepted: "0..=100",
            });
        }
        Ok(())
    }
}

/// A parameter value outside the device's accepted range.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("parameter {field} = {value} outside accepted range {accepted}")]
pub struct ParameterError {
    /// Name of the offending field.
    pub field: &'static str,
    /// The rejected value.
    pub value: f32,
    /// Human-readable accepted range.
    pub accepted: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_is_deterministic_and_filesystem_safe() {
        let p = ParameterSet::new(400.0, 100.0);
        assert_eq!(p.label(), "shift400_quant100_smear100_enh_wet100");
        assert!(!p.label().contains(['/', ' ', '.']));
    }

    #[test]
    fn default_grid_point_validates() {
        assert!(ParameterSet::new(1500.0, 0.0).validate().is_ok());
    }

    #[test]
    fn nan_shift_is_rejected() {
        let p = ParameterSet {
            shift_hz: f32::NAN,
            ..ParameterSet::new(0.0, 0.0)
        };
        assert!(p.validate().is_err());
    }

    #[test]
    fn quantize_above_100_is_rejected() {
        let p = ParameterSet {
            quantize_strength: 150.0,
            ..ParameterSet::new(0.0, 0.0)
        };
        let err = p.validate().unwrap_err();
        assert_eq!(err.field, "quantize_strength");
    }

    #[test]
    fn equality_is_by_field() {
        assert_eq!(ParameterSet::new(400.0, 100.0), ParameterSet::new(400.0, 100.0));
        assert_ne!(ParameterSet::new(400.0, 100.0), ParameterSet::new(400.0, 0.0));
    }
}
