//! xeno-sim - headless battlescape runner.
//!
//! - `xeno-sim run --scenario <file>` - play a scenario to completion
//! - `xeno-sim check --scenario <file>` - validate a scenario without playing it

mod scenario;

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use xeno_battle::{Battle, BattleView, TurnProgress};
use xeno_core::{TeamId, TickContext};
use xeno_nav::Terrain;

use crate::scenario::Scenario;

#[derive(Parser)]
#[command(name = "xeno-sim")]
#[command(about = "Headless battlescape scenario runner", version)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a scenario until one side wins or the turn limit is reached
    Run {
        /// Scenario YAML file
        #[arg(long)]
        scenario: PathBuf,

        /// Override the scenario's seed
        #[arg(long)]
        seed: Option<u64>,

        /// Override the scenario's turn limit
        #[arg(long)]
        max_turns: Option<u32>,
    },

    /// Load and set up a scenario, then exit
    Check {
        /// Scenario YAML file
        #[arg(long)]
        scenario: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins over -v.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });

    fmt().with_env_filter(filter).with_target(false).init();

    match cli.command {
        Commands::Run {
            scenario,
            seed,
            max_turns,
        } => run(&scenario, seed, max_turns),
        Commands::Check { scenario } => check(&scenario),
    }
}

fn run(path: &Path, seed: Option<u64>, max_turns: Option<u32>) -> Result<()> {
    let scenario = Scenario::load(path)?;
    let seed = seed.unwrap_or(scenario.seed);
    let max_turns = max_turns.unwrap_or(scenario.max_turns).max(1);
    let (mut battle, mut turns) = scenario.build(seed)?;

    tracing::info!(scenario = %scenario.name, seed, max_turns, "battle started");

    let mut ctx = TickContext::new(0, scenario.seconds_per_tick, seed);
    let winner = loop {
        match turns.update(&ctx, &mut battle)? {
            TurnProgress::BattleOver { winner } => break Some(winner),
            TurnProgress::TurnComplete { turn } if turn >= max_turns => {
                tracing::info!(turn, "turn limit reached");
                break None;
            }
            _ => {}
        }
        ctx = ctx.next();
    };

    println!("Scenario: {}", display_name(&scenario));
    println!("Turns played: {}", turns.turn());
    println!("Ticks: {}", ctx.tick + 1);
    match winner {
        Some(Some(team)) => println!("Winner: {}", team_name(&battle, team)),
        Some(None) => println!("Winner: none, both sides are out of the fight"),
        None => println!("Winner: undecided"),
    }
    println!();
    println!("Survivors:");
    for team in battle.teams() {
        println!("  {}: {}/{}", team.name(), battle.survivors(team.id()), team.len());
    }

    Ok(())
}

fn check(path: &Path) -> Result<()> {
    let scenario = Scenario::load(path)?;
    let (battle, _turns) = scenario.build(scenario.seed)?;
    let extent = battle.terrain().extent();

    println!("Scenario: {}", display_name(&scenario));
    println!("Terrain: {}x{}x{}", extent.width, extent.depth, extent.height);
    for team in battle.teams() {
        println!("  {}: {} combatants", team.name(), team.len());
    }
    println!("OK");
    Ok(())
}

fn display_name(scenario: &Scenario) -> &str {
    if scenario.name.is_empty() {
        "(unnamed)"
    } else {
        &scenario.name
    }
}

fn team_name(battle: &Battle, team: TeamId) -> String {
    battle
        .team(team)
        .map(|t| t.name().to_string())
        .unwrap_or_else(|| team.to_string())
}
