//! Stimulus bank generation command.
//!
//! Writes the dry stimulus files so the device can be rendered outside
//! this tool (in a DAW, on another machine). Rendered outputs dropped
//! back into the same directory under the `processed_*` names are picked
//! up by `ringdown analyze`.

use super::common::GridArgs;
use clap::Args;
use std::path::PathBuf;

#[derive(Args)]
pub struct GenerateArgs {
    /// Directory to write the stimulus WAV files into
    #[arg(short, long, default_value = "ringdown-out")]
    out_dir: PathBuf,

    #[command(flatten)]
    grid: GridArgs,
}

pub fn run(args: GenerateArgs) -> anyhow::Result<()> {
    let signals = args.grid.bank();
    std::fs::create_dir_all(&args.out_dir)?;

    println!("Writing {} stimuli to {}", signals.len(), args.out_dir.display());
    for (id, stimulus) in &signals {
        let path = args.out_dir.join(ringdown_io::dry_artifact_name(id));
        ringdown_io::write_wav(&path, &stimulus.waveform)?;
        println!(
            "  {:<16} {:.2}s, silence from {:.2}s",
            id,
            stimulus.waveform.duration_secs(),
            stimulus.silence_boundary.secs()
        );
    }

    println!("Expected processed names per configuration:");
    for config in args.grid.configs()? {
        println!("  processed_<signal>_{}.wav", config.label());
    }
    Ok(())
}
