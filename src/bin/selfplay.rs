//! Self-play driver: random agents on a generated map.

#![allow(clippy::print_stdout)]

use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use rust_tribes::agent::{play_game, Agent, RandomAgent};
use rust_tribes::core::{GameConfig, GameMode};
use rust_tribes::setup::GameBuilder;
use rust_tribes::tribe::TribeKind;

/// Play one seeded game between random agents and print the ranking.
#[derive(Parser, Debug)]
#[command(name = "rust-tribes-selfplay")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Board side length
    #[arg(long, default_value = "11")]
    size: usize,

    /// Number of tribes (2-4)
    #[arg(short, long, default_value = "2", value_parser = clap::value_parser!(u8).range(2..=4))]
    tribes: u8,

    /// Game seed; also seeds the agents
    #[arg(short, long, default_value = "0")]
    seed: u64,

    /// Map seed (default: same as the game seed)
    #[arg(long)]
    map_seed: Option<u64>,

    /// Turn limit
    #[arg(short = 't', long, default_value = "30")]
    max_turns: u32,

    /// Stop after this many actions even if the game is still running
    #[arg(long, default_value = "100000")]
    max_actions: usize,

    /// Rank by score only; capitals do not decide the game
    #[arg(long)]
    score_mode: bool,
}

fn run(args: &Args) -> rust_tribes::Result<()> {
    let mode = if args.score_mode {
        GameMode::Score
    } else {
        GameMode::Capitals
    };
    let config = GameConfig::new()
        .with_mode(mode)
        .with_max_turns(args.max_turns)
        .with_auto_end_turn(true);
    let kinds: Vec<TribeKind> = TribeKind::ALL
        .iter()
        .copied()
        .take(usize::from(args.tribes))
        .collect();

    let mut gs = GameBuilder::new(args.size)
        .with_config(config)
        .with_tribes(kinds)
        .generated(args.map_seed.unwrap_or(args.seed))
        .build(args.seed)?;
    info!(size = args.size, tribes = args.tribes, seed = args.seed, "game ready");

    let mut agents: Vec<Box<dyn Agent>> = (0..u64::from(args.tribes))
        .map(|i| Box::new(RandomAgent::new(args.seed.wrapping_add(i + 1))) as Box<dyn Agent>)
        .collect();
    let result = play_game(&mut gs, &mut agents, args.max_actions)?;

    info!(
        turn = gs.turn(),
        actions = gs.history().len(),
        ?result,
        "game finished"
    );
    for (rank, (tribe, score)) in gs.ranking().into_iter().enumerate() {
        let cities = gs.city_count(tribe);
        println!("{:>2}. {tribe}  score {score:>6}  cities {cities}", rank + 1);
    }
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("rust_tribes=info")),
        )
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("selfplay failed: {e}");
            ExitCode::FAILURE
        }
    }
}
