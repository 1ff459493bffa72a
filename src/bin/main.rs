//--------------------------------------------------------------------------------------------------
// MODULE OVERVIEW
//--------------------------------------------------------------------------------------------------
// This is the command line driver for the stable matching engine.
// It loads or generates a configuration, validates it, runs deferred acceptance and
// reports the matching together with the event trace.
//--------------------------------------------------------------------------------------------------
// Reference configuration:     cargo run --
// From a JSON file:            cargo run -- --config ./people.json
// Random 6x4 configuration:    cargo run -- --random --proposers 6 --receivers 4 --seed 7
// Step through and keep trace: cargo run -- --step --trace-dir ./traces
// Machine readable output:     cargo run -- --json
use anyhow::{Context, Result};
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use std::fs;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use stable_matching::{
    Config, Configuration, ConfigurationValidator, EventLogger, MatchingEvent,
    MatchingSession, Pairing, PersistenceEventHandler, random_configuration,
    reference_configuration, replay,
};

/// CLI options for the application
#[derive(Parser, Debug)]
#[command(name = "stable-matching", about = "Deferred acceptance stable matching")]
struct Opt {
    /// JSON configuration with `proposers` and `receivers`
    #[arg(long, conflicts_with = "random")]
    config: Option<PathBuf>,

    /// Generate a random configuration instead of using the reference one
    #[arg(long)]
    random: bool,

    /// Number of proposers for a random configuration
    #[arg(long, default_value_t = 5)]
    proposers: usize,

    /// Number of receivers for a random configuration
    #[arg(long, default_value_t = 5)]
    receivers: usize,

    /// Seed for the random configuration
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Log the events of every iteration as it runs
    #[arg(long)]
    step: bool,

    /// Directory to write the event trace to, as JSON lines
    #[arg(long)]
    trace_dir: Option<PathBuf>,

    /// Print the result as JSON instead of plain text
    #[arg(long)]
    json: bool,
}

/// Final state of a run, as printed with `--json`
#[derive(Debug, Serialize)]
struct MatchingReport<'a> {
    pairings: Vec<Pairing>,
    exhausted: Vec<&'a str>,
    iterations: usize,
    events: &'a [MatchingEvent],
}

fn load_configuration(opt: &Opt) -> Result<Configuration> {
    if let Some(path) = &opt.config {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read configuration {}", path.display()))?;
        let configuration = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse configuration {}", path.display()))?;
        info!("Loaded configuration from {}", path.display());
        return Ok(configuration);
    }

    if opt.random {
        let mut rng = StdRng::seed_from_u64(opt.seed);
        info!(
            "Generated random configuration ({}x{}, seed {})",
            opt.proposers, opt.receivers, opt.seed
        );
        return Ok(random_configuration(opt.proposers, opt.receivers, &mut rng));
    }

    Ok(reference_configuration())
}

fn main() -> Result<()> {
    // Parse command line arguments
    let opt = Opt::parse();
    let config = Config::try_from_env()?;

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.log_level))
        .init();

    let configuration = load_configuration(&opt)?;
    let validator = ConfigurationValidator::from_config(&config);
    let mut session = MatchingSession::start(configuration, &validator)?;

    if opt.step {
        let mut console = EventLogger::new(0);
        while let Some(report) = session.step() {
            info!("Iteration {}: {:?}", session.engine().iterations(), report.outcome);
            replay(&report.events, &mut console)?;
        }
    } else {
        session.run();
    }

    let engine = session.engine();

    if let Some(dir) = &opt.trace_dir {
        let mut persistence = PersistenceEventHandler::new(dir)
            .with_context(|| format!("failed to create trace directory {}", dir.display()))?;
        replay(engine.log().history(), &mut persistence)?;
        if let Some(path) = persistence.current_path() {
            info!("Wrote {} events to {}", persistence.event_count(), path.display());
        }
    }

    let blocking = engine.blocking_pairs();
    if !blocking.is_empty() {
        warn!("Matching has {} blocking pairs", blocking.len());
    }

    if opt.json {
        let report = MatchingReport {
            pairings: engine.pairings(),
            exhausted: engine.exhausted(),
            iterations: engine.iterations(),
            events: engine.log().history(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Matching after {} iterations:", engine.iterations());
        for pairing in engine.pairings() {
            println!("  {}", pairing);
        }
        for proposer in engine.exhausted() {
            println!("  {} - (none)", proposer);
        }
    }

    Ok(())
}
