//! The sweep's output model.
//!
//! Everything an external renderer needs: per-pair outcomes keyed by
//! (signal, configuration), dry baselines, and the verdict list. The
//! whole model serializes to JSON; waveforms are kept in memory for the
//! artifact writer but never serialized.

use ringdown_analysis::{ResidualMeasurement, ResonantFrequency};
use ringdown_core::Waveform;
use ringdown_harness::HarnessError;
use serde::Serialize;
use std::collections::BTreeMap;

/// Identity of one (signal, configuration) evaluation.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct PairKey {
    /// Stimulus id, e.g. `noise_burst`.
    pub signal_id: String,
    /// Configuration label, e.g. `shift400_quant100_smear100_enh_wet100`.
    pub config_label: String,
}

/// Classified cause of a pair failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Device not found or not startable.
    DeviceUnavailable,
    /// Device rejected the parameter values.
    ParameterRejected,
    /// Device started but processing failed.
    ProcessingFailed,
    /// The harness call exceeded its deadline.
    Timeout,
    /// The device's output could not be analyzed (e.g. returned a
    /// buffer shorter than one analysis window).
    Analysis,
}

impl From<&HarnessError> for FailureKind {
    fn from(err: &HarnessError) -> Self {
        match err {
            HarnessError::DeviceUnavailable(_) => FailureKind::DeviceUnavailable,
            HarnessError::ParameterRejected(_) => FailureKind::ParameterRejected,
            HarnessError::ProcessingFailed(_) => FailureKind::ProcessingFailed,
            HarnessError::Timeout { .. } => FailureKind::Timeout,
        }
    }
}

/// Result of evaluating one pair: measurements, or an explicit failure.
///
/// Failures are first-class entries, never silently dropped, so a
/// report always accounts for the full grid.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PairOutcome {
    /// The device processed the pair and the output was analyzed.
    Success {
        /// The processed audio (kept for artifact writing, not serialized).
        #[serde(skip)]
        processed: Waveform,
        /// Residual energy in the post-stimulus window.
        residual: ResidualMeasurement,
        /// Frequencies failing to decay, worst first.
        resonances: Vec<ResonantFrequency>,
    },
    /// The pair could not be evaluated.
    Failed {
        /// Classified cause.
        kind: FailureKind,
        /// Human-readable detail.
        message: String,
    },
}

/// Mapping from pair identity to outcome; one entry per grid cell.
pub type SweepResult = BTreeMap<PairKey, PairOutcome>;

/// One flattened report row.
#[derive(Debug, Clone, Serialize)]
pub struct PairEntry {
    /// Which pair this row describes.
    #[serde(flatten)]
    pub key: PairKey,
    /// What happened.
    #[serde(flatten)]
    pub outcome: PairOutcome,
}

/// Baseline analysis of a dry (unprocessed) stimulus.
#[derive(Debug, Clone, Serialize)]
pub struct DryBaseline {
    /// Stimulus id.
    pub signal_id: String,
    /// Residual energy of the dry signal in the same window the
    /// processed signals are measured in.
    pub residual: ResidualMeasurement,
    /// Resonances of the dry signal; nonempty would mean a bad stimulus.
    pub resonances: Vec<ResonantFrequency>,
}

/// A configuration flagged by the thresholds.
#[derive(Debug, Clone, Serialize)]
pub struct Verdict {
    /// The flagged configuration.
    pub config_label: String,
    /// Worst per-signal residual average for this configuration, in dB.
    pub worst_average_db: f32,
    /// How many of its pairs showed at least one resonant frequency.
    pub resonant_pairs: usize,
    /// True if the residual threshold was exceeded.
    pub exceeds_residual: bool,
}

/// Complete output of one sweep run.
#[derive(Debug, Serialize)]
pub struct SweepReport {
    /// True when the device was unavailable and only dry signals were
    /// analyzed.
    pub dry_only: bool,
    /// Why the run is dry-only, when it is.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dry_only_reason: Option<String>,
    /// Signal ids in sweep order.
    pub signal_ids: Vec<String>,
    /// Configuration labels in sweep order.
    pub config_labels: Vec<String>,
    /// Per-signal dry analysis.
    pub dry_baselines: Vec<DryBaseline>,
    /// Per-pair outcomes, sorted by key.
    pub entries: Vec<PairEntry>,
    /// Configurations exceeding the thresholds, worst first.
    pub verdicts: Vec<Verdict>,
}

impl SweepReport {
    /// Assemble a report from per-pair outcomes, deriving the verdicts.
    ///
    /// The orchestrator uses this internally; it is also the entry point
    /// for building a report from outcomes produced elsewhere, such as
    /// measurements of pre-rendered audio files.
    pub fn assemble(
        dry_only: bool,
        dry_only_reason: Option<String>,
        signal_ids: Vec<String>,
        config_labels: Vec<String>,
        dry_baselines: Vec<DryBaseline>,
        result: SweepResult,
        residual_verdict_db: f32,
    ) -> Self {
        let mut verdicts = Vec::new();
        for label in &config_labels {
            let mut worst = f32::MIN;
            let mut resonant_pairs = 0usize;
            let mut evaluated = false;
            for (key, outcome) in &result {
                if key.config_label != *label {
                    continue;
                }
                if let PairOutcome::Success {
                    residual,
                    resonances,
                    ..
                } = outcome
                {
                    evaluated = true;
                    worst = worst.max(residual.average_db);
                    if !resonances.is_empty() {
                        resonant_pairs += 1;
                    }
                }
            }
            let exceeds_residual = evaluated && worst > residual_verdict_db;
            if exceeds_residual || resonant_pairs > 0 {
                verdicts.push(Verdict {
                    config_label: label.clone(),
                    worst_average_db: worst,
                    resonant_pairs,
                    exceeds_residual,
                });
            }
        }
        verdicts.sort_by(|a, b| b.worst_average_db.partial_cmp(&a.worst_average_db).unwrap());

        let entries = result
            .into_iter()
            .map(|(key, outcome)| PairEntry { key, outcome })
            .collect();

        Self {
            dry_only,
            dry_only_reason,
            signal_ids,
            config_labels,
            dry_baselines,
            entries,
            verdicts,
        }
    }

    /// Pairs that evaluated successfully.
    pub fn successes(&self) -> impl Iterator<Item = &PairEntry> {
        self.entries
            .iter()
            .filter(|e| matches!(e.outcome, PairOutcome::Success { .. }))
    }

    /// Pairs that failed, with their classified cause.
    pub fn failures(&self) -> impl Iterator<Item = &PairEntry> {
        self.entries
            .iter()
            .filter(|e| matches!(e.outcome, PairOutcome::Failed { .. }))
    }

    /// Look up one pair's outcome.
    pub fn outcome(&self, signal_id: &str, config_label: &str) -> Option<&PairOutcome> {
        self.entries
            .iter()
            .find(|e| e.key.signal_id == signal_id && e.key.config_label == config_label)
            .map(|e| &e.outcome)
    }

    /// Residual averages shaped for the external heatmap renderer:
    /// rows follow `config_labels`, columns follow `signal_ids`, `None`
    /// marks failed pairs.
    pub fn residual_matrix(&self) -> Vec<Vec<Option<f32>>> {
        self.config_labels
            .iter()
            .map(|label| {
                self.signal_ids
                    .iter()
                    .map(|id| match self.outcome(id, label) {
                        Some(PairOutcome::Success { residual, .. }) => Some(residual.average_db),
                        _ => None,
                    })
                    .collect()
            })
            .collect()
    }
}
