//! Ataxx Perft - Node counting for the move generator.
//!
//! Counts leaf nodes for a position, splits the count by root move, checks a
//! TOML suite of reference counts, counts through a hash table, or times a
//! fixed set of gapped openings.

mod bench;
mod suite;

use ataxx_engine::{perft, perft_divide, perft_hashed, PerftEntry, PerftTable, Position, TableKey};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use suite::Suite;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ataxx-perft")]
#[command(about = "Move generator node counts for Ataxx positions")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Count leaf nodes at every depth up to DEPTH
    Perft {
        /// Deepest depth to search
        depth: u32,
        /// Position in board notation, or "startpos"
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        fen: Vec<String>,
    },
    /// Split the node count at DEPTH by root move
    Divide {
        /// Depth to search
        #[arg(value_parser = clap::value_parser!(u32).range(1..))]
        depth: u32,
        /// Position in board notation, or "startpos"
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        fen: Vec<String>,
    },
    /// Count leaf nodes at every depth up to DEPTH through a hash table
    Tt {
        /// Deepest depth to search
        depth: u32,
        /// Table size in megabytes
        #[arg(long, default_value_t = 16)]
        hash_mb: usize,
        /// Key entries on the symmetry-reduced hash
        #[arg(long)]
        canonical: bool,
        /// Position in board notation, or "startpos"
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        fen: Vec<String>,
    },
    /// Time perft over a fixed list of gapped openings
    Bench {
        /// Depth to search
        #[arg(default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        depth: u32,
    },
    /// Check every position of a suite file against its expected count
    Suite {
        /// Path to the TOML suite file
        path: PathBuf,
        /// Skip entries deeper than this
        #[arg(long)]
        max_depth: Option<u32>,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Perft { depth, fen } => run_perft(&position_from_args(&fen), depth),
        Commands::Divide { depth, fen } => run_divide(&position_from_args(&fen), depth),
        Commands::Tt {
            depth,
            hash_mb,
            canonical,
            fen,
        } => {
            let mode = if canonical { TableKey::Canonical } else { TableKey::Hash };
            run_tt(&position_from_args(&fen), depth, hash_mb, mode)
        }
        Commands::Bench { depth } => run_bench(depth),
        Commands::Suite { path, max_depth } => run_suite(&path, max_depth)?,
    }

    Ok(())
}

fn position_from_args(fen: &[String]) -> Position {
    let fen = if fen.is_empty() {
        "startpos".to_string()
    } else {
        fen.join(" ")
    };

    let position = Position::from_fen(&fen);
    tracing::debug!("Parsed {:?} as {}", fen, position.to_fen());
    position
}

fn nps(nodes: u64, elapsed: Duration) -> u64 {
    let micros = elapsed.as_micros().max(1);
    (nodes as u128 * 1_000_000 / micros) as u64
}

fn run_perft(position: &Position, depth: u32) {
    tracing::info!("Running perft to depth {} on {}", depth, position.to_fen());
    println!("{}", position);
    println!();

    for d in 1..=depth {
        let start = Instant::now();
        let nodes = perft(position, d);
        let elapsed = start.elapsed();
        println!(
            "depth {:>2}  nodes {:>14}  time {:>8} ms  nps {:>12}",
            d,
            nodes,
            elapsed.as_millis(),
            nps(nodes, elapsed)
        );
    }
}

fn run_divide(position: &Position, depth: u32) {
    tracing::info!("Running divide at depth {} on {}", depth, position.to_fen());
    println!("{}", position);
    println!();

    let start = Instant::now();
    let results = perft_divide(position, depth);
    let elapsed = start.elapsed();

    let total: u64 = results.iter().map(|(_, nodes)| nodes).sum();
    for (i, (m, nodes)) in results.iter().enumerate() {
        println!("{}/{}  {}  {}", i + 1, results.len(), m, nodes);
    }
    println!();
    println!("Total: {}", total);
    println!("Time: {} ms", elapsed.as_millis());
}

fn run_tt(position: &Position, depth: u32, hash_mb: usize, mode: TableKey) {
    let mut table = PerftTable::new(hash_mb, mode);
    tracing::info!(
        "Running hashed perft to depth {} on {} ({} MB, {:?} keys)",
        depth,
        position.to_fen(),
        hash_mb.max(1),
        mode
    );
    println!("Table size: {} MB", hash_mb.max(1));
    println!("Entries: {}", table.capacity());
    println!("Entry size: {} B", std::mem::size_of::<PerftEntry>());
    println!();
    println!("{}", position);
    println!();

    for d in 0..=depth {
        let start = Instant::now();
        let nodes = perft_hashed(position, d, &mut table);
        let elapsed = start.elapsed();
        println!(
            "depth {:>2}  nodes {:>14}  hashfull {:>4}  time {:>8} ms  nps {:>12}",
            d,
            nodes,
            table.hashfull(),
            elapsed.as_millis(),
            nps(nodes, elapsed)
        );
    }
}

fn run_bench(depth: u32) {
    tracing::info!("Running bench at depth {} over {} positions", depth, bench::BENCH_FENS.len());
    println!("Pos       Nodes       SumNodes     Time     SumTime   Mnps  SumMnps  FEN");

    let mut total_nodes = 0u64;
    let mut total_time = Duration::ZERO;

    for (i, fen) in bench::BENCH_FENS.iter().enumerate() {
        let position = Position::from_fen(fen);

        let start = Instant::now();
        let nodes = perft(&position, depth);
        let elapsed = start.elapsed();

        total_nodes += nodes;
        total_time += elapsed;
        println!(
            "{:<5}{:>10}{:>15}{:>9}{:>12}{:>7}{:>9}  {}",
            i + 1,
            nodes,
            total_nodes,
            bench::format_seconds(elapsed),
            bench::format_seconds(total_time),
            nps(nodes, elapsed) / 1_000_000,
            nps(total_nodes, total_time) / 1_000_000,
            fen
        );
    }
}

fn run_suite(path: &std::path::Path, max_depth: Option<u32>) -> anyhow::Result<()> {
    let suite = Suite::load(path)?;
    tracing::info!("Loaded {} positions from {:?}", suite.positions.len(), path);

    let mut failed = 0;
    let mut skipped = 0;

    for entry in &suite.positions {
        let Some(outcome) = entry.run(max_depth) else {
            tracing::debug!("Skipping {} at depth {}", entry.name, entry.depth);
            skipped += 1;
            continue;
        };

        let status = if outcome.passed() { "ok" } else { "FAIL" };
        println!(
            "{:<4}  {:<20}  depth {:>2}  nodes {:>12}  expected {:>12}  {:>8} ms",
            status,
            entry.name,
            outcome.depth,
            outcome.nodes,
            outcome.expected,
            outcome.elapsed.as_millis()
        );

        if !outcome.passed() {
            tracing::warn!(
                "{} ({}) gave {} nodes, expected {}",
                entry.name,
                entry.fen,
                outcome.nodes,
                outcome.expected
            );
            failed += 1;
        }
    }

    let run = suite.positions.len() - skipped;
    println!();
    println!("{} passed, {} failed, {} skipped", run - failed, failed, skipped);

    if failed > 0 {
        anyhow::bail!("{} of {} suite positions failed", failed, run);
    }
    Ok(())
}
