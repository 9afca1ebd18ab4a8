//! Self-play CLI
//!
//! Run learning games between agents and track Elo ratings.

use std::env;
use std::time::Duration;

use anyhow::bail;
use tracing_subscriber::EnvFilter;

use agent_core::{LearningAgent, MaterialOracle, Oracle};
use oracle_uci::UciOracle;
use parametric_engine::ParametricAgent;
use random_engine::RandomAgent;
use tabular_engine::TabularAgent;

use selfplay::{EloTracker, RunConfig, SelfPlayRunner};

fn print_usage() {
    println!("Self-Play Runner");
    println!();
    println!("Usage:");
    println!("  selfplay run <agent1> <agent2> [options]");
    println!("  selfplay leaderboard");
    println!();
    println!("Agents:");
    println!("  parametric    - Alpha-beta search with oracle-tuned evaluation weights");
    println!("  tabular       - Epsilon-greedy TD(0) over a state-action value table");
    println!("  random        - Uniform random legal moves (baseline)");
    println!();
    println!("Options:");
    println!("  --games N       Number of games to play (default 10)");
    println!("  --depth D       Search depth for the parametric agent (default 3)");
    println!("  --max-moves N   Plies before a game is adjudicated drawn (default 200)");
    println!("  --oracle CMD    `material` or a UCI engine command (default material)");
    println!("  --seed S        Seed for reproducible runs");
    println!("  --config FILE   Load options from a TOML file (flags still override)");
    println!();
    println!("Examples:");
    println!("  selfplay run parametric tabular --games 100");
    println!("  selfplay run parametric random --oracle stockfish --depth 4");
}

fn create_agent(
    spec: &str,
    config: &RunConfig,
    seed_offset: u64,
) -> anyhow::Result<Box<dyn LearningAgent>> {
    match spec.to_lowercase().as_str() {
        "parametric" => Ok(Box::new(
            ParametricAgent::new(spec).with_depth(config.depth),
        )),
        "tabular" => Ok(match config.seed {
            Some(seed) => Box::new(TabularAgent::with_seed(spec, seed + seed_offset)),
            None => Box::new(TabularAgent::new(spec)),
        }),
        "random" => Ok(match config.seed {
            Some(seed) => Box::new(RandomAgent::with_seed(spec, seed + seed_offset)),
            None => Box::new(RandomAgent::new(spec)),
        }),
        _ => bail!("unknown agent: {spec}"),
    }
}

fn create_oracle(config: &RunConfig) -> anyhow::Result<Box<dyn Oracle>> {
    if config.oracle == "material" {
        return Ok(Box::new(MaterialOracle::new()));
    }
    let oracle = UciOracle::spawn(&config.oracle)?
        .with_depth(config.oracle_depth)
        .with_timeout(Duration::from_secs(config.oracle_timeout_secs));
    Ok(Box::new(oracle))
}

fn run_command(args: &[String]) -> anyhow::Result<()> {
    if args.len() < 2 {
        print_usage();
        bail!("run requires two agent specifications");
    }
    let a_spec = &args[0];
    let b_spec = &args[1];

    // A --config file loads first so explicit flags can override it.
    let mut config = RunConfig::default();
    let mut i = 2;
    while i < args.len() {
        if args[i] == "--config" || args[i] == "-c" {
            if i + 1 < args.len() {
                config = RunConfig::load(&args[i + 1])?;
                i += 1;
            }
        }
        i += 1;
    }

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--games" | "-g" => {
                if i + 1 < args.len() {
                    config.games = args[i + 1].parse().unwrap_or(config.games);
                    i += 1;
                }
            }
            "--depth" | "-d" => {
                if i + 1 < args.len() {
                    config.depth = args[i + 1].parse().unwrap_or(config.depth);
                    i += 1;
                }
            }
            "--max-moves" => {
                if i + 1 < args.len() {
                    config.max_moves = args[i + 1].parse().unwrap_or(config.max_moves);
                    i += 1;
                }
            }
            "--oracle" => {
                if i + 1 < args.len() {
                    config.oracle = args[i + 1].clone();
                    i += 1;
                }
            }
            "--seed" => {
                if i + 1 < args.len() {
                    config.seed = args[i + 1].parse().ok();
                    i += 1;
                }
            }
            "--config" | "-c" => {
                i += 1; // already handled
            }
            _ => {}
        }
        i += 1;
    }

    println!("=== Run: {} vs {} ===", a_spec, b_spec);
    println!(
        "Games: {}, Depth: {}, Oracle: {}",
        config.games, config.depth, config.oracle
    );
    println!();

    let mut a = create_agent(a_spec, &config, 0)?;
    let mut b = create_agent(b_spec, &config, 1)?;
    let mut oracle = create_oracle(&config)?;

    let mut tracker = EloTracker::load(&config.elo_path).unwrap_or_default();
    let mut runner = SelfPlayRunner::new(config.clone());
    let report = runner.run(a.as_mut(), b.as_mut(), oracle.as_mut(), &mut tracker);

    report.print_report();
    tracker.print_leaderboard();

    if let Err(e) = tracker.save(&config.elo_path) {
        tracing::warn!(error = %e, "failed to save ratings");
    }
    if let Err(e) = report.save(&config.report_path) {
        tracing::warn!(error = %e, "failed to save run report");
    }

    Ok(())
}

fn show_leaderboard() {
    match EloTracker::load(&RunConfig::default().elo_path) {
        Ok(tracker) => tracker.print_leaderboard(),
        Err(_) => println!("No rating data found. Run some games first!"),
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        print_usage();
        return Ok(());
    }

    match args[1].as_str() {
        "run" => run_command(&args[2..]),
        "leaderboard" | "elo" => {
            show_leaderboard();
            Ok(())
        }
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        other => {
            eprintln!("Unknown command: {}", other);
            print_usage();
            Ok(())
        }
    }
}
