use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use cluesolver::game::{Settings, Transcript};
use cluesolver::solver::SolverReport;

/// Replays a recorded game and prints who may hold which card.
#[derive(Debug, Parser)]
#[command(name = "cluesolver", version)]
struct Args {
    /// Transcript of the game, as JSON
    transcript: PathBuf,

    /// Report settings, as JSON (defaults to $CLUESOLVER_CONFIG)
    #[arg(long)]
    config: Option<PathBuf>,
}

fn init_logging() {
    env_logger::init();
}

fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();

    let settings = Settings::load(args.config.as_deref());
    let input = fs::read_to_string(&args.transcript)
        .with_context(|| format!("reading {}", args.transcript.display()))?;
    let transcript = Transcript::parse(&input)
        .with_context(|| format!("parsing {}", args.transcript.display()))?;

    info!(
        "Replaying {} events for {} players",
        transcript.events.len(),
        transcript.players.len()
    );
    let solver = transcript.replay()?;

    print!("{}", SolverReport::new(&solver, &settings));
    Ok(())
}
