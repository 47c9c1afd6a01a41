//! Subprocess harness driving an external offline render tool.

use crate::{DeviceLocator, EffectHarness, HarnessError};
use ringdown_core::{ParameterSet, Waveform};
use std::path::PathBuf;
use std::process::Command;

/// Harness that renders through an external tool, one subprocess per
/// invocation.
///
/// Contract with the tool: it accepts `--input`/`--output` WAV paths plus
/// one flag per device parameter, renders offline, and exits nonzero on
/// failure (printing `bad parameter:` diagnostics to stderr when the
/// failure is a rejected value). Spawning a fresh process per pair is
/// what guarantees no state bleeds between sweep pairs.
pub struct RenderHarness {
    tool: PathBuf,
}

impl RenderHarness {
    /// Harness for a known tool path.
    pub fn new(tool: PathBuf) -> Self {
        Self { tool }
    }

    /// Resolve the tool through a locator.
    ///
    /// A locator miss is the expected "device not installed" condition.
    pub fn from_locator(locator: &dyn DeviceLocator) -> Result<Self, HarnessError> {
        locator
            .locate()
            .map(Self::new)
            .ok_or_else(|| HarnessError::DeviceUnavailable("no render tool found".into()))
    }

    /// Path of the render tool.
    pub fn tool(&self) -> &PathBuf {
        &self.tool
    }
}

impl EffectHarness for RenderHarness {
    fn process(&self, input: &Waveform, params: &ParameterSet) -> Result<Waveform, HarnessError> {
        let dir = tempfile::tempdir()
            .map_err(|e| HarnessError::ProcessingFailed(format!("tempdir: {e}")))?;
        let in_path = dir.path().join("in.wav");
        let out_path = dir.path().join("out.wav");

        ringdown_io::write_wav(&in_path, input)
            .map_err(|e| HarnessError::ProcessingFailed(format!("writing input: {e}")))?;

        tracing::debug!(tool = %self.tool.display(), params = %params.label(), "rendering");
        let output = Command::new(&self.tool)
            .arg("--input")
            .arg(&in_path)
            .arg("--output")
            .arg(&out_path)
            .args(["--shift", &params.shift_hz.to_string()])
            .args(["--quantize", &params.quantize_strength.to_string()])
            .args(["--smear", &params.smear_ms.to_string()])
            .args(["--dry-wet", &params.dry_wet.to_string()])
            .args(params.enhanced.then_some("--enhanced"))
            .output()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    HarnessError::DeviceUnavailable(format!("{}: {e}", self.tool.display()))
                } else {
                    HarnessError::ProcessingFailed(format!("spawn: {e}"))
                }
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            if stderr.contains("bad parameter:") {
                return Err(HarnessError::ParameterRejected(stderr.trim().to_string()));
            }
            return Err(HarnessError::ProcessingFailed(format!(
                "exit {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        ringdown_io::read_wav(&out_path)
            .map_err(|e| HarnessError::ProcessingFailed(format!("reading output: {e}")))
    }

    fn probe(&self) -> Result<(), HarnessError> {
        if self.tool.exists() {
            Ok(())
        } else {
            Err(HarnessError::DeviceUnavailable(format!(
                "{} does not exist",
                self.tool.display()
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FixedLocator;

    #[test]
    fn missing_tool_fails_probe_as_unavailable() {
        let harness = RenderHarness::new(PathBuf::from("/definitely/not/a/tool"));
        assert!(matches!(
            harness.probe(),
            Err(HarnessError::DeviceUnavailable(_))
        ));
    }

    #[test]
    fn from_locator_reports_missing_device() {
        let locator = FixedLocator(PathBuf::from("/definitely/not/a/tool"));
        assert!(matches!(
            RenderHarness::from_locator(&locator),
            Err(HarnessError::DeviceUnavailable(_))
        ));
    }

    #[test]
    fn missing_tool_fails_process_per_invocation() {
        let harness = RenderHarness::new(PathBuf::from("/definitely/not/a/tool"));
        let input = Waveform::new(vec![0.0; 64], 44_100.0);
        let params = ParameterSet::new(400.0, 100.0);
        // One failed invocation must not poison the next.
        for _ in 0..2 {
            assert!(harness.process(&input, &params).is_err());
        }
    }
}
