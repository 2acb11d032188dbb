//! go-board: command-line driver for the board engine.
//!
//! ## Usage
//!
//! - `go-board` - Run the capture demo
//! - `go-board demo --size 5` - Surround and capture a stone, print the result
//! - `go-board selfplay --games 10 --check` - Random games with invariant checks

use anyhow::{Context, Result, ensure};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use go_board::board::Board;
use go_board::constants::{DEFAULT_BOARD_SIZE, MAX_BOARD_SIZE};
use go_board::playout::play_random_game;
use go_board::point::{Player, Point};

/// go-board: incremental Go board engine
#[derive(Parser)]
#[command(name = "go-board")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log level directive, combined with RUST_LOG
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Surround a stone in the middle of the board and capture it
    Demo {
        /// Board side length (at least 3)
        #[arg(long, default_value_t = 5)]
        size: usize,
    },
    /// Play random games and report the results
    Selfplay {
        /// Board side length
        #[arg(long, default_value_t = DEFAULT_BOARD_SIZE)]
        size: usize,
        /// Number of games
        #[arg(long, default_value_t = 1)]
        games: usize,
        /// Move limit per game
        #[arg(long, default_value_t = 1000)]
        moves: usize,
        /// RNG seed; random when omitted
        #[arg(long)]
        seed: Option<u64>,
        /// Validate board invariants after every move
        #[arg(long)]
        check: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(
                cli.log_level
                    .parse()
                    .with_context(|| format!("invalid log level '{}'", cli.log_level))?,
            ),
        )
        .init();

    match cli.command {
        Some(Commands::Demo { size }) => run_demo(size),
        Some(Commands::Selfplay {
            size,
            games,
            moves,
            seed,
            check,
        }) => run_selfplay(size, games, moves, seed, check),
        None => run_demo(5),
    }
}

fn check_size(size: usize, min: usize) -> Result<()> {
    ensure!(
        (min..=MAX_BOARD_SIZE).contains(&size),
        "board size must be between {min} and {MAX_BOARD_SIZE}, got {size}"
    );
    Ok(())
}

fn run_demo(size: usize) -> Result<()> {
    check_size(size, 3)?;
    let mut board = Board::new(size, size);
    let center = Point::new(size / 2 + 1, size / 2 + 1);

    board.place_stone(Player::Black, center)?;
    info!(%center, hash = board.hash(), "black plays");

    let surrounding = board.neighbors(center).to_vec();
    for pt in surrounding {
        let placement = board.place_stone(Player::White, pt)?;
        info!(point = %pt, captured = placement.captures(), "white plays");
        for stone in &placement.captured {
            println!("captured black stone at {stone}");
        }
    }

    board.assert_valid().context("board invariants after demo")?;
    for pt in board.neighbors(center) {
        let libs = board
            .group_at(*pt)
            .map(|g| g.liberty_count())
            .unwrap_or_default();
        println!("white stone at {pt}: {libs} liberties");
    }
    println!("center empty: {}", board.player_at(center).is_none());
    println!("hash: {:#018x}", board.hash());
    Ok(())
}

fn run_selfplay(
    size: usize,
    games: usize,
    moves: usize,
    seed: Option<u64>,
    check: bool,
) -> Result<()> {
    check_size(size, 1)?;
    let seed = seed.unwrap_or_else(|| fastrand::u64(..));
    info!(size, games, moves, seed, check, "starting self-play");

    let mut rng = fastrand::Rng::with_seed(seed);
    for game in 1..=games {
        let mut board = Board::new(size, size);
        let stats = play_random_game(&mut board, &mut rng, moves, check)
            .with_context(|| format!("game {game} (seed {seed}) broke a board invariant"))?;
        println!(
            "game {game}: {} moves, {} passes, {} captured, black {} white {}, hash {:#018x}",
            stats.moves,
            stats.passes,
            stats.captures,
            stats.black_stones,
            stats.white_stones,
            stats.final_hash
        );
    }
    Ok(())
}
