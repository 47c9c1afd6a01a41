//! Ringdown CLI - resonance diagnostic sweeps for offline render devices.

mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "ringdown")]
#[command(author, version, about = "Resonance diagnostic for offline audio render devices", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full sweep against the render device
    Run(commands::run::RunArgs),

    /// Write the stimulus bank as WAV files for rendering by hand
    Generate(commands::generate::GenerateArgs),

    /// Measure pre-rendered WAV files and assemble a report
    Analyze(commands::analyze::AnalyzeArgs),
}

fn main() -> anyhow::Result<()> {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run(args) => commands::run::run(args),
        Commands::Generate(args) => commands::generate::run(args),
        Commands::Analyze(args) => commands::analyze::run(args),
    }
}
