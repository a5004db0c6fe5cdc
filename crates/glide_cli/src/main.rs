//! Glide CLI
//!
//! Replays scripted touch and wheel input against a scroll view with fixed
//! geometry and prints the resulting offset, scale and gesture phase after
//! every step.
//!
//! ```text
//! glide replay scenarios/fling.json
//! glide replay scenarios/fling.json --config glide.toml --json
//! glide defaults > glide.toml
//! ```

mod replay;
mod scenario;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use glide_scroll::ScrollConfig;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::replay::{run_scenario, write_trace};
use crate::scenario::Scenario;

#[derive(Parser)]
#[command(name = "glide")]
#[command(author, version, about = "Glide scroll engine - scenario replay", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a scenario file (JSON, or TOML with a .toml extension)
    Replay {
        /// Scenario to replay
        scenario: PathBuf,

        /// Scroll configuration (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Print one JSON object per step
        #[arg(long)]
        json: bool,
    },

    /// Print the default scroll configuration as TOML
    Defaults,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins over --verbose
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Replay {
            scenario,
            config,
            json,
        } => cmd_replay(scenario, config, json),
        Commands::Defaults => cmd_defaults(),
    }
}

fn cmd_replay(scenario: PathBuf, config: Option<PathBuf>, json: bool) -> Result<()> {
    let config = match config {
        Some(path) => ScrollConfig::load(&path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => ScrollConfig::default(),
    };
    let scenario = Scenario::from_path(&scenario)?;

    let trace = run_scenario(&scenario, config)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    write_trace(&trace, json, &mut out)?;
    Ok(())
}

fn cmd_defaults() -> Result<()> {
    let toml = ScrollConfig::default()
        .to_toml_string()
        .context("failed to serialize default config")?;
    print!("{}", toml);
    Ok(())
}
