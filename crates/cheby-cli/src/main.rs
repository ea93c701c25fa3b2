//! Cheby CLI - design Chebyshev filters and run them over audio files.

mod commands;
mod wav;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "cheby")]
#[command(author, version, about = "Chebyshev IIR filter designer", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Synthesize filter coefficients
    Design(commands::design::DesignCommandArgs),

    /// Print the impulse response of a designed filter
    Impulse(commands::impulse::ImpulseArgs),

    /// Filter a WAV file
    Process(commands::process::ProcessArgs),

    /// List, show and save filter presets
    Presets(commands::presets::PresetsArgs),
}

fn main() -> anyhow::Result<()> {
    // Diagnostics go to stderr so coefficient output stays pipeable
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Design(args) => commands::design::run(args),
        Commands::Impulse(args) => commands::impulse::run(args),
        Commands::Process(args) => commands::process::run(args),
        Commands::Presets(args) => commands::presets::run(args),
    }
}
