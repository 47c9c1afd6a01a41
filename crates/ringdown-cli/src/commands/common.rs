//! Shared argument handling and report printing.

use clap::Args;
use ringdown_core::{ParameterSet, Stimulus};
use ringdown_sweep::{PairOutcome, SweepReport};

/// Stimulus bank and configuration grid arguments, shared by every
/// sweep-shaped command. Keeping them identical across `run`, `generate`
/// and `analyze` is what makes the manual-render workflow line up: the
/// same seed and grid always name the same artifact files.
#[derive(Args)]
pub struct GridArgs {
    /// Shift values in Hz (comma-separated)
    #[arg(long, default_value = "0,400,700,1000,1500")]
    pub shift: String,

    /// Quantize strengths in percent (comma-separated)
    #[arg(long, default_value = "0,100")]
    pub quantize: String,

    /// Smear time in milliseconds, applied to every configuration
    #[arg(long, default_value = "100.0")]
    pub smear: f32,

    /// Seed for the stochastic stimuli
    #[arg(long, default_value = "42")]
    pub seed: u64,

    /// Sample rate of the generated stimuli in Hz
    #[arg(long, default_value = "44100.0")]
    pub sample_rate: f32,
}

impl GridArgs {
    /// The full shift x quantize grid.
    pub fn configs(&self) -> anyhow::Result<Vec<ParameterSet>> {
        let shifts = parse_values(&self.shift)?;
        let quantizes = parse_values(&self.quantize)?;

        let mut configs = Vec::with_capacity(shifts.len() * quantizes.len());
        for &shift in &shifts {
            for &quantize in &quantizes {
                configs.push(ParameterSet {
                    smear_ms: self.smear,
                    ..ParameterSet::new(shift, quantize)
                });
            }
        }
        Ok(configs)
    }

    /// The standard stimulus bank at this command's rate and seed.
    pub fn bank(&self) -> Vec<(String, Stimulus)> {
        ringdown_signal::standard_bank(self.sample_rate, self.seed)
    }
}

fn parse_values(list: &str) -> anyhow::Result<Vec<f32>> {
    let values: Vec<f32> = list
        .split(',')
        .map(|s| {
            s.trim()
                .parse::<f32>()
                .map_err(|e| anyhow::anyhow!("bad value '{}': {e}", s.trim()))
        })
        .collect::<anyhow::Result<_>>()?;
    if values.is_empty() {
        anyhow::bail!("empty value list");
    }
    Ok(values)
}

/// Human-readable run summary on stdout.
pub fn print_summary(report: &SweepReport) {
    if report.dry_only {
        println!("Device unavailable; dry signals analyzed only.");
        if let Some(reason) = &report.dry_only_reason {
            println!("  reason: {reason}");
        }
        return;
    }

    println!(
        "{} signals x {} configurations: {} ok, {} failed",
        report.signal_ids.len(),
        report.config_labels.len(),
        report.successes().count(),
        report.failures().count()
    );

    for entry in report.failures() {
        if let PairOutcome::Failed { kind, message } = &entry.outcome {
            println!(
                "  failed  {} / {}  [{kind:?}] {message}",
                entry.key.signal_id, entry.key.config_label
            );
        }
    }

    if report.verdicts.is_empty() {
        println!("No configuration exceeded the resonance thresholds.");
    } else {
        println!("Flagged configurations (worst first):");
        for v in &report.verdicts {
            print!(
                "  {}  worst avg {:.1} dB, {} resonant pair(s)",
                v.config_label, v.worst_average_db, v.resonant_pairs
            );
            if v.exceeds_residual {
                print!("  [residual above threshold]");
            }
            println!();
        }
    }
}
