//! Standalone engine-vs-engine series runner.
//!
//! Run with:
//! `cargo run --release --bin engine_match_series`
//! `cargo run --release --bin engine_match_series -- --games 4 --depth 2 --seed 99 --verbose`

use tracing::Level;

use mailbox_chess::engines::engine_minimax::MinimaxEngine;
use mailbox_chess::engines::engine_random::RandomEngine;
use mailbox_chess::engines::engine_trait::Engine;
use mailbox_chess::search::minimax::{MinimaxConfig, DEFAULT_MINIMAX_DEPTH};
use mailbox_chess::tables::canned_moves::MoveType;
use mailbox_chess::utils::engine_match_harness::{
    play_engine_match_series, MatchConfig, MatchSeriesConfig,
};

struct Args {
    games: u16,
    depth: u8,
    seed: u64,
    max_plies: u16,
    verbose: bool,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            games: 10,
            depth: DEFAULT_MINIMAX_DEPTH,
            seed: 1234,
            max_plies: 200,
            verbose: false,
        }
    }
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args::default();
    let mut it = std::env::args().skip(1);
    while let Some(flag) = it.next() {
        match flag.as_str() {
            "--verbose" | "-v" => args.verbose = true,
            "--games" => args.games = parse_value(&flag, it.next())?,
            "--depth" => args.depth = parse_value(&flag, it.next())?,
            "--seed" => args.seed = parse_value(&flag, it.next())?,
            "--max-plies" => args.max_plies = parse_value(&flag, it.next())?,
            other => return Err(format!("unknown argument {other:?}")),
        }
    }
    Ok(args)
}

fn parse_value<T: std::str::FromStr>(flag: &str, value: Option<String>) -> Result<T, String> {
    let value = value.ok_or_else(|| format!("{flag} needs a value"))?;
    value
        .parse()
        .map_err(|_| format!("invalid value {value:?} for {flag}"))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = parse_args()?;

    tracing_subscriber::fmt()
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::INFO })
        .with_target(false)
        .init();

    let depth = args.depth;
    // Customize these two lines to experiment with different engines/depths.
    let player1 = move || {
        Box::new(
            MinimaxEngine::new(MinimaxConfig { depth }).with_move_type(MoveType::Opening),
        ) as Box<dyn Engine>
    };
    let player2 = || Box::new(RandomEngine::new()) as Box<dyn Engine>;

    let stats = play_engine_match_series(
        player1,
        player2,
        &MatchSeriesConfig {
            games: args.games,
            base_seed: args.seed,
            per_game: MatchConfig {
                max_plies: args.max_plies,
                ..MatchConfig::default()
            },
        },
    )?;

    println!("{}", stats.report());
    println!("outcomes: {:?}", stats.outcomes);
    Ok(())
}
