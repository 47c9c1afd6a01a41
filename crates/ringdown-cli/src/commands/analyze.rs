//! Measurement of pre-rendered artifacts.
//!
//! The mirror image of `run` for setups where the device cannot be
//! driven as a subprocess: `generate` writes the dry stimuli, the user
//! renders them through the device by hand, and this command measures
//! the results and assembles the same report `run` would have produced.

use super::common::{GridArgs, print_summary};
use anyhow::Context;
use clap::Args;
use ringdown_core::Stimulus;
use ringdown_sweep::{
    DryBaseline, FailureKind, PairKey, PairOutcome, SweepError, SweepReport, SweepResult,
    SweepSettings, measure_decay,
};
use std::path::{Path, PathBuf};

#[derive(Args)]
pub struct AnalyzeArgs {
    /// Directory containing the processed_*.wav files
    #[arg(short, long, default_value = "ringdown-out")]
    dir: PathBuf,

    /// Report output path (default: <dir>/report.json)
    #[arg(long)]
    report: Option<PathBuf>,

    #[command(flatten)]
    grid: GridArgs,
}

pub fn run(args: AnalyzeArgs) -> anyhow::Result<()> {
    let signals = args.grid.bank();
    let configs = args.grid.configs()?;
    let settings = SweepSettings::default();

    for config in &configs {
        config.validate().map_err(|source| SweepError::MalformedParameter {
            label: config.label(),
            source,
        })?;
    }

    let signal_ids: Vec<String> = signals.iter().map(|(id, _)| id.clone()).collect();
    let config_labels: Vec<String> = configs.iter().map(|c| c.label()).collect();

    // The bank is rebuilt from the seed, so the dry baselines and the
    // silence boundaries match what `generate` wrote.
    let dry_baselines = signals
        .iter()
        .map(|(id, stim)| {
            let (residual, resonances) =
                measure_decay(&stim.waveform, stim.silence_boundary, &settings)
                    .with_context(|| format!("analyzing dry signal '{id}'"))?;
            Ok(DryBaseline {
                signal_id: id.clone(),
                residual,
                resonances,
            })
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    let mut result = SweepResult::new();
    for (id, stimulus) in &signals {
        for label in &config_labels {
            let key = PairKey {
                signal_id: id.clone(),
                config_label: label.clone(),
            };
            let outcome = measure_artifact(&args.dir, stimulus, &key, &settings);
            result.insert(key, outcome);
        }
    }

    let report = SweepReport::assemble(
        false,
        None,
        signal_ids,
        config_labels,
        dry_baselines,
        result,
        settings.residual_verdict_db,
    );

    let report_path = args.report.unwrap_or_else(|| args.dir.join("report.json"));
    std::fs::write(&report_path, serde_json::to_string_pretty(&report)?)?;
    println!("Report written to {}", report_path.display());

    print_summary(&report);
    Ok(())
}

/// Measure one pre-rendered file. Missing or unreadable artifacts become
/// per-pair failures, matching how `run` records device failures.
fn measure_artifact(
    dir: &Path,
    stimulus: &Stimulus,
    key: &PairKey,
    settings: &SweepSettings,
) -> PairOutcome {
    let path = dir.join(ringdown_io::processed_artifact_name(
        &key.signal_id,
        &key.config_label,
    ));

    let waveform = match ringdown_io::read_wav(&path) {
        Ok(waveform) => waveform,
        Err(err) => {
            return PairOutcome::Failed {
                kind: FailureKind::ProcessingFailed,
                message: format!("{}: {err}", path.display()),
            };
        }
    };

    match measure_decay(&waveform, stimulus.silence_boundary, settings) {
        Ok((residual, resonances)) => PairOutcome::Success {
            processed: waveform,
            residual,
            resonances,
        },
        Err(err) => PairOutcome::Failed {
            kind: FailureKind::Analysis,
            message: err.to_string(),
        },
    }
}
