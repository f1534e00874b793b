//! Scratch Game CLI
//!
//! Usage:
//!   scratch-game --config config/config.json --betting-amount 100
//!   scratch-game --config config/config.json --format text --seed 42
//!   scratch-game --config config/config.json --interactive

mod render;
mod session;

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use sg_engine::{GameConfig, ScratchEngine};

use crate::render::{RoundReport, TextReport};

#[derive(Parser)]
#[command(name = "scratch-game", version, about = "Play a scratch card round")]
struct Cli {
    /// Game configuration (JSON, or YAML by extension)
    #[arg(long)]
    config: PathBuf,

    /// Wager for a one-shot round
    #[arg(long = "betting-amount", value_name = "N")]
    betting_amount: Option<String>,

    /// Seed for reproducible matrices
    #[arg(long)]
    seed: Option<u64>,

    /// Prompt for bets and play until `q`
    #[arg(long)]
    interactive: bool,

    /// Output format for a one-shot round
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// Debug logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config_path = cli.config.display();
    let config = GameConfig::load(&cli.config)
        .with_context(|| format!("Failed to load config {config_path}"))?;
    let mut engine = match cli.seed {
        Some(seed) => ScratchEngine::seeded(config, seed),
        None => ScratchEngine::new(config),
    }
    .context("Invalid game configuration")?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if cli.interactive {
        let stdin = io::stdin();
        session::run_interactive(&mut engine, stdin.lock(), &mut out)
            .context("Interactive session failed")?;
        return Ok(());
    }

    let bet = session::bet_or_default(cli.betting_amount.as_deref());
    let outcome = engine.play(bet);

    match cli.format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, &RoundReport::from(&outcome))
                .context("Failed to write JSON output")?;
            writeln!(out)?;
        }
        OutputFormat::Text => write!(out, "{}", TextReport(&outcome))?,
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}
