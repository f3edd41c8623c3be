//! Solves a Sokoban level read from an XSB file.
//!
//! The level uses the usual XSB symbols (`#` wall, `.` goal, `$` box,
//! `*` box on goal, `@` player, `+` player on goal). The move string is
//! printed with one lowercase letter (`u`, `d`, `l`, `r`) per step.
//!
//! # Usage
//!
//! ```sh
//! cargo run --example solve_level -- path/to/level.xsb
//! ```
//!
//! Read the level from standard input:
//!
//! ```sh
//! cargo run --example solve_level -- - < level.xsb
//! ```
//!
//! Adjust the search budget (defaults: 1000000 expansions, 60 seconds):
//!
//! ```sh
//! cargo run --example solve_level -- level.xsb --max-expansions 50000 --time-limit 5
//! ```
//!
//! Set `RUST_LOG=debug` to see search progress.

use std::{
    fs,
    io::{self, Read as _},
    path::{Path, PathBuf},
    process,
    time::{Duration, Instant},
};

use clap::Parser;
use sokoban_core::Board;
use sokoban_solver::{SearchLimits, SolveError, Solver, replay};

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Level file in XSB format, or `-` for standard input.
    #[arg(value_name = "FILE")]
    level: PathBuf,

    /// Maximum number of node expansions.
    #[arg(long, value_name = "COUNT", default_value_t = SearchLimits::DEFAULT_MAX_EXPANSIONS)]
    max_expansions: usize,

    /// Wall-clock limit in seconds.
    #[arg(long, value_name = "SECONDS", default_value_t = SearchLimits::DEFAULT_TIME_LIMIT.as_secs())]
    time_limit: u64,

    /// Disable both limits.
    #[arg(long, conflicts_with_all = ["max_expansions", "time_limit"])]
    unbounded: bool,

    /// Print every intermediate board of the solution.
    #[arg(long)]
    show_steps: bool,
}

fn main() {
    better_panic::install();
    env_logger::init();

    let args = Args::parse();

    let text = match read_level(&args.level) {
        Ok(text) => text,
        Err(err) => {
            eprintln!("Failed to read {}: {err}", args.level.display());
            process::exit(2);
        }
    };
    let board = match text.parse::<Board>() {
        Ok(board) => board,
        Err(err) => {
            eprintln!("Invalid level: {err}");
            process::exit(2);
        }
    };

    let limits = if args.unbounded {
        SearchLimits::unbounded()
    } else {
        SearchLimits::default()
            .with_max_expansions(args.max_expansions)
            .with_time_limit(Duration::from_secs(args.time_limit))
    };
    let solver = Solver::new(limits);

    println!("Level:");
    print_board(&board);
    println!();

    let start = Instant::now();
    let (solution, stats) = match solver.solve_board(&board) {
        Ok(result) => result,
        Err(err @ SolveError::InvalidLevel(_)) => {
            eprintln!("{err}");
            process::exit(2);
        }
        Err(err) => {
            eprintln!("No solution: {err}");
            process::exit(1);
        }
    };
    let elapsed = start.elapsed();

    println!("Solution ({} moves):", solution.len());
    println!("  {solution}");
    println!();

    if args.show_steps {
        let mut current = board.clone();
        for (i, &direction) in solution.moves().iter().enumerate() {
            let Some(next) = replay(&current, &[direction]) else {
                eprintln!("Move {i} ({direction}) is illegal");
                process::exit(1);
            };
            println!("Step {} ({direction}):", i + 1);
            print_board(&next);
            println!();
            current = next;
        }
    }

    println!("Stats:");
    println!("  expansions: {}", stats.expansions());
    println!("  generated: {}", stats.generated());
    println!("  duplicates: {}", stats.duplicates());
    println!("  deadlocks: {}", stats.deadlocks());
    println!("  max frontier: {}", stats.max_frontier());
    println!("  elapsed: {elapsed:.2?}");
}

fn read_level(path: &Path) -> io::Result<String> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text)?;
        return Ok(text);
    }
    fs::read_to_string(path)
}

fn print_board(board: &Board) {
    for line in board.to_string().lines() {
        println!("  {line}");
    }
}
