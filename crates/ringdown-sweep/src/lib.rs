//! Ringdown Sweep - drives the diagnostic over a signal x configuration grid
//!
//! The orchestrator takes an injected [`EffectHarness`], a set of
//! stimuli, and an explicit list of [`ParameterSet`]s, and produces a
//! [`SweepReport`]: per-pair residual measurements and resonance lists,
//! plus a verdict list of configurations that ring.
//!
//! Every (signal, configuration) pair is an independent unit of work;
//! pairs are evaluated on the rayon pool and aggregated by key, so the
//! result is identical regardless of scheduling order. Access to the
//! device boundary is gated by a session limiter (most devices allow a
//! single concurrent session), while analysis runs fully parallel.
//!
//! ```rust
//! use ringdown_harness::stub::Bypass;
//! use ringdown_sweep::{SweepOrchestrator, SweepSettings};
//! use ringdown_core::ParameterSet;
//!
//! let signals = ringdown_signal::standard_bank(44_100.0, 1);
//! let configs = vec![ParameterSet::new(400.0, 100.0)];
//! let orchestrator = SweepOrchestrator::new(Bypass, SweepSettings::default());
//! let report = orchestrator.run(&signals, &configs).unwrap();
//! assert!(report.verdicts.is_empty());
//! ```

mod limiter;
mod orchestrator;
mod report;
mod settings;

pub use orchestrator::{SweepOrchestrator, measure_decay};
pub use report::{
    DryBaseline, FailureKind, PairEntry, PairKey, PairOutcome, SweepReport, SweepResult, Verdict,
};
pub use settings::SweepSettings;

use ringdown_analysis::AnalysisError;
use ringdown_core::ParameterError;
use thiserror::Error;

/// Errors that abort a sweep before or during the run.
///
/// Harness failures are deliberately absent here: they are operational,
/// isolated to their pair, and recorded inside the report instead.
#[derive(Debug, Error)]
pub enum SweepError {
    /// A configuration in the grid is outside the device's accepted
    /// ranges. Surfaced before the first harness call.
    #[error("configuration {label}: {source}")]
    MalformedParameter {
        /// Label of the offending configuration.
        label: String,
        /// The range violation.
        source: ParameterError,
    },

    /// A dry stimulus could not be analyzed. The stimuli are generated
    /// by this tool, so this is a contract violation, not an operational
    /// condition.
    #[error("analysis of dry signal '{signal_id}' failed: {source}")]
    DryAnalysis {
        /// Id of the signal that failed analysis.
        signal_id: String,
        /// The underlying analysis error.
        source: AnalysisError,
    },
}
