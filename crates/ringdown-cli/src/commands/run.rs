//! The full diagnostic sweep command.

use super::common::{GridArgs, print_summary};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use ringdown_harness::stub::Bypass;
use ringdown_harness::{DeviceLocator, EffectHarness, EnvPathLocator, FixedLocator, RenderHarness};
use ringdown_sweep::{PairOutcome, SweepOrchestrator, SweepReport, SweepSettings};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Args)]
pub struct RunArgs {
    /// Directory for the report and audio artifacts
    #[arg(short, long, default_value = "ringdown-out")]
    out_dir: PathBuf,

    /// Path to the render tool (default: $RINGDOWN_DEVICE, then the
    /// conventional install location)
    #[arg(long)]
    device: Option<PathBuf>,

    /// Use the in-process bypass instead of a render tool
    #[arg(long)]
    bypass: bool,

    /// Per-pair render deadline in seconds
    #[arg(long, default_value = "60.0")]
    timeout: f32,

    #[command(flatten)]
    grid: GridArgs,
}

pub fn run(args: RunArgs) -> anyhow::Result<()> {
    let signals = args.grid.bank();
    let configs = args.grid.configs()?;
    let harness = select_harness(&args)?;

    let settings = SweepSettings {
        harness_timeout: Duration::from_secs_f32(args.timeout),
        ..SweepSettings::default()
    };

    println!(
        "Sweeping {} signals x {} configurations...",
        signals.len(),
        configs.len()
    );

    let pb = ProgressBar::new((signals.len() * configs.len()) as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("##-"),
    );

    let orchestrator = SweepOrchestrator::new(harness, settings);
    let report = orchestrator.run_with_progress(&signals, &configs, || pb.inc(1))?;
    pb.finish_and_clear();

    std::fs::create_dir_all(&args.out_dir)?;
    write_artifacts(&args.out_dir, &signals, &report)?;

    let report_path = args.out_dir.join("report.json");
    std::fs::write(&report_path, serde_json::to_string_pretty(&report)?)?;
    println!("Report written to {}", report_path.display());

    print_summary(&report);
    Ok(())
}

fn select_harness(args: &RunArgs) -> anyhow::Result<Box<dyn EffectHarness>> {
    if args.bypass {
        return Ok(Box::new(Bypass));
    }

    if let Some(device) = &args.device {
        // An explicit path is taken at its word; if it is missing, the
        // probe fails and the run degrades to dry-only.
        if FixedLocator(device.clone()).locate().is_none() {
            tracing::warn!(path = %device.display(), "device path does not exist");
        }
        return Ok(Box::new(RenderHarness::new(device.clone())));
    }

    let locator = EnvPathLocator::default_device();
    match RenderHarness::from_locator(&locator) {
        Ok(harness) => Ok(Box::new(harness)),
        Err(err) => {
            tracing::warn!(%err, "no render device found, run will be dry-only");
            Ok(Box::new(RenderHarness::new(PathBuf::from(
                "/usr/local/lib/ringdown/render-device",
            ))))
        }
    }
}

/// Write every waveform the sweep touched: dry stimuli always, processed
/// outputs for each successful pair.
fn write_artifacts(
    dir: &Path,
    signals: &[(String, ringdown_core::Stimulus)],
    report: &SweepReport,
) -> anyhow::Result<()> {
    for (id, stimulus) in signals {
        let path = dir.join(ringdown_io::dry_artifact_name(id));
        ringdown_io::write_wav(&path, &stimulus.waveform)?;
    }

    for entry in report.successes() {
        if let PairOutcome::Success { processed, .. } = &entry.outcome {
            let name = ringdown_io::processed_artifact_name(
                &entry.key.signal_id,
                &entry.key.config_label,
            );
            ringdown_io::write_wav(dir.join(name), processed)?;
        }
    }
    Ok(())
}
