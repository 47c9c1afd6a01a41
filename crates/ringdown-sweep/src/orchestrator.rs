//! The sweep driver.

use crate::limiter::SessionLimiter;
use crate::report::{DryBaseline, FailureKind, PairKey, PairOutcome, SweepReport, SweepResult};
use crate::{SweepError, SweepSettings};
use rayon::prelude::*;
use ringdown_analysis::{AnalysisError, ResidualMeasurement, ResonantFrequency, residual, resonance};
use ringdown_core::{ParameterSet, SilenceBoundary, Stimulus, Waveform};
use ringdown_harness::{EffectHarness, HarnessError};
use std::sync::Arc;
use std::sync::mpsc;
use std::time::Duration;

/// Runs the full signal x configuration grid through the harness and the
/// analysis pipeline.
pub struct SweepOrchestrator<H: EffectHarness + 'static> {
    harness: Arc<H>,
    settings: SweepSettings,
}

impl<H: EffectHarness + 'static> SweepOrchestrator<H> {
    /// Orchestrator over an injected harness.
    pub fn new(harness: H, settings: SweepSettings) -> Self {
        Self {
            harness: Arc::new(harness),
            settings,
        }
    }

    /// Evaluate every (signal, configuration) pair and assemble the report.
    ///
    /// Configurations are validated before the first harness call; a bad
    /// grid fails here rather than mid-sweep. If the device probe fails,
    /// the run degrades to dry-only analysis (reported once, not per
    /// pair). Per-pair harness failures are recorded in the report and
    /// never abort the sweep.
    pub fn run(
        &self,
        signals: &[(String, Stimulus)],
        configs: &[ParameterSet],
    ) -> Result<SweepReport, SweepError> {
        self.run_with_progress(signals, configs, || {})
    }

    /// Like [`Self::run`], invoking `progress` once per completed pair.
    pub fn run_with_progress(
        &self,
        signals: &[(String, Stimulus)],
        configs: &[ParameterSet],
        progress: impl Fn() + Sync,
    ) -> Result<SweepReport, SweepError> {
        for config in configs {
            config.validate().map_err(|source| SweepError::MalformedParameter {
                label: config.label(),
                source,
            })?;
        }

        let signal_ids: Vec<String> = signals.iter().map(|(id, _)| id.clone()).collect();
        let config_labels: Vec<String> = configs.iter().map(ParameterSet::label).collect();

        let dry_only_reason = match self.harness.probe() {
            Ok(()) => None,
            Err(err) => {
                tracing::warn!(%err, "device probe failed, degrading to dry-only analysis");
                Some(err.to_string())
            }
        };
        let dry_only = dry_only_reason.is_some();

        tracing::info!(
            signals = signals.len(),
            configs = configs.len(),
            dry_only,
            "starting sweep"
        );

        // Dry baselines first: these must always succeed, since the
        // stimuli come from our own generators.
        let dry_baselines = signals
            .par_iter()
            .map(|(id, stim)| {
                let (residual, resonances) = self
                    .analyze(&stim.waveform, stim.silence_boundary)
                    .map_err(|source| SweepError::DryAnalysis {
                        signal_id: id.clone(),
                        source,
                    })?;
                Ok(DryBaseline {
                    signal_id: id.clone(),
                    residual,
                    resonances,
                })
            })
            .collect::<Result<Vec<_>, SweepError>>()?;

        let result: SweepResult = if dry_only {
            SweepResult::new()
        } else {
            let limiter = SessionLimiter::new(self.settings.max_concurrent_harness_sessions);
            let pairs: Vec<(&(String, Stimulus), &ParameterSet)> = signals
                .iter()
                .flat_map(|s| configs.iter().map(move |c| (s, c)))
                .collect();

            // Keyed aggregation: the BTreeMap is built from whatever
            // order rayon finishes in, so scheduling cannot change the
            // result.
            pairs
                .par_iter()
                .map(|&((id, stim), config)| {
                    let key = PairKey {
                        signal_id: id.clone(),
                        config_label: config.label(),
                    };
                    let outcome = self.evaluate_pair(stim, config, &limiter);
                    if let PairOutcome::Failed { kind, message } = &outcome {
                        tracing::warn!(signal = %id, config = %key.config_label, ?kind, %message, "pair failed");
                    }
                    progress();
                    (key, outcome)
                })
                .collect()
        };

        let report = SweepReport::assemble(
            dry_only,
            dry_only_reason,
            signal_ids,
            config_labels,
            dry_baselines,
            result,
            self.settings.residual_verdict_db,
        );
        tracing::info!(
            successes = report.successes().count(),
            failures = report.failures().count(),
            verdicts = report.verdicts.len(),
            "sweep finished"
        );
        Ok(report)
    }

    /// Evaluate one pair: harness call under the session limiter and the
    /// timeout, then analysis. Never panics, never aborts the sweep.
    fn evaluate_pair(
        &self,
        stimulus: &Stimulus,
        config: &ParameterSet,
        limiter: &SessionLimiter,
    ) -> PairOutcome {
        let processed = {
            let _session = limiter.acquire();
            call_with_timeout(
                Arc::clone(&self.harness),
                stimulus.waveform.clone(),
                config.clone(),
                self.settings.harness_timeout,
            )
        };

        match processed {
            Err(err) => PairOutcome::Failed {
                kind: FailureKind::from(&err),
                message: err.to_string(),
            },
            Ok(waveform) => match self.analyze(&waveform, stimulus.silence_boundary) {
                // The device's output was too degenerate to analyze;
                // that is the pair's failure, not the sweep's.
                Err(err) => PairOutcome::Failed {
                    kind: FailureKind::Analysis,
                    message: err.to_string(),
                },
                Ok((residual, resonances)) => {
                    tracing::debug!(
                        config = %config.label(),
                        average_db = residual.average_db,
                        max_db = residual.max_db,
                        resonances = resonances.len(),
                        "pair measured"
                    );
                    PairOutcome::Success {
                        processed: waveform,
                        residual,
                        resonances,
                    }
                }
            },
        }
    }

    fn analyze(
        &self,
        waveform: &Waveform,
        boundary: SilenceBoundary,
    ) -> Result<(ResidualMeasurement, Vec<ResonantFrequency>), AnalysisError> {
        measure_decay(waveform, boundary, &self.settings)
    }
}

/// Fixed post-stimulus measurement of one waveform: residual window at
/// boundary + offset, resonance scan from the boundary itself.
///
/// This is the per-pair analysis the orchestrator applies; it is public
/// so pre-rendered audio (processed outside this process) can be
/// measured identically.
pub fn measure_decay(
    waveform: &Waveform,
    boundary: SilenceBoundary,
    settings: &SweepSettings,
) -> Result<(ResidualMeasurement, Vec<ResonantFrequency>), AnalysisError> {
    let spectrogram = ringdown_analysis::compute_spectrogram(waveform, &settings.stft)?;

    let start = boundary.secs() + settings.measure_offset_secs;
    let measurement = residual::measure(
        &spectrogram,
        (start, start + settings.measure_duration_secs),
        settings.analysis_band_hz,
    )?;
    let resonances = resonance::find_resonant_frequencies(
        &spectrogram,
        boundary.secs(),
        settings.resonance_window_secs,
        settings.resonance_threshold_db,
    );
    Ok((measurement, resonances))
}

/// Run one harness call on a worker thread with a deadline.
///
/// On timeout the worker is abandoned; it finishes (or hangs) in the
/// background and its result is dropped. The harness contract makes each
/// invocation an independent session, so an abandoned call cannot
/// corrupt later pairs.
fn call_with_timeout<H: EffectHarness + 'static>(
    harness: Arc<H>,
    input: Waveform,
    params: ParameterSet,
    timeout: Duration,
) -> Result<Waveform, HarnessError> {
    let (tx, rx) = mpsc::channel();
    std::thread::spawn(move || {
        let _ = tx.send(harness.process(&input, &params));
    });

    match rx.recv_timeout(timeout) {
        Ok(result) => result,
        Err(mpsc::RecvTimeoutError::Timeout) => Err(HarnessError::Timeout {
            secs: timeout.as_secs_f32(),
        }),
        Err(mpsc::RecvTimeoutError::Disconnected) => {
            Err(HarnessError::ProcessingFailed("harness worker panicked".into()))
        }
    }
}
