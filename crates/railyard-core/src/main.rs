//! Railyard
//!
//! Runs a negotiation session in the terminal. Player messages are read
//! from stdin, one per line; tick summaries and train replies go to stdout.

use clap::Parser;
use railyard_core::{GameSession, RailyardConfig};
use railyard_events::TickReport;
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{fmt, EnvFilter};

/// Command line arguments for the railyard session
#[derive(Parser, Debug)]
#[command(name = "railyard")]
#[command(about = "Talk runaway trains out of their hunt")]
struct Args {
    /// TOML config file (defaults to ./railyard.toml if present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Random seed for grid population and counter-offers
    #[arg(long)]
    seed: Option<u64>,

    /// Turn limit
    #[arg(long)]
    max_turns: Option<u32>,

    /// Milliseconds between ticks
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Print JSON snapshots and replies instead of text
    #[arg(long)]
    json: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn load_config(args: &Args) -> Result<RailyardConfig, String> {
    let mut config = match &args.config {
        Some(path) => RailyardConfig::load(path).map_err(|e| format!("{}: {}", path.display(), e))?,
        None => RailyardConfig::load_or_default(),
    };

    if let Some(seed) = args.seed {
        config.session.seed = seed;
    }
    if let Some(max_turns) = args.max_turns {
        config.session.max_turns = max_turns;
    }
    if let Some(tick_ms) = args.tick_ms {
        config.session.tick_interval_ms = tick_ms;
    }

    config.validate().map_err(|e| e.to_string())?;
    Ok(config)
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string(value) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Warning: could not serialize output: {}", e),
    }
}

fn print_report(report: &TickReport, max_turns: u32) {
    println!("-- Turn {} / {} --", report.turn, max_turns);
    for meal in &report.consumptions {
        println!("{} consumed {} at {}", meal.train, meal.label, meal.position);
    }
    for collision in &report.collisions {
        println!("{}", collision);
    }
    for line in &report.status {
        println!("{}", line);
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if args.verbose {
            EnvFilter::new("railyard_core=debug")
        } else {
            EnvFilter::new("railyard_core=info")
        }
    });
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let max_turns = config.session.max_turns;

    let mut session = match GameSession::from_config(config) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let mut feed = match session.start().await {
        Ok(feed) => feed,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    println!("RAILYARD GAME STARTED");
    println!("{}", session.roster_summary().await);
    println!("Type a message to negotiate. Use @NAME to address specific trains.");
    println!();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            report = feed.recv() => {
                let Some(report) = report else { break };
                if args.json {
                    print_json(&session.snapshot().await);
                } else {
                    print_report(&report, max_turns);
                }
                if let Some(outcome) = &report.outcome {
                    println!("{}", outcome);
                    break;
                }
            }
            line = lines.next_line() => {
                match line {
                    Ok(Some(text)) => {
                        let text = text.trim();
                        if text.is_empty() {
                            continue;
                        }
                        let replies = session.send_player_message(text).await;
                        if args.json {
                            print_json(&replies);
                            print_json(&session.snapshot().await);
                        } else {
                            for reply in &replies {
                                println!("{}", reply);
                            }
                        }
                    }
                    Ok(None) => break,
                    Err(e) => {
                        eprintln!("Error reading stdin: {}", e);
                        break;
                    }
                }
            }
        }
    }

    session.shutdown();
    ExitCode::SUCCESS
}
