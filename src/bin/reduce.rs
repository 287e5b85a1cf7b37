//! Strict-dominance reduction binary.
//!
//! Usage:
//!   cargo run --release --bin reduce -- [OPTIONS]
//!
//! Options:
//!   --game <NAME>        Built-in game: pd, pennies, mixed (default: pd)
//!   --random <RxC>       Solve a random RxC game instead (e.g. 6x6)
//!   --seed <N>           Random seed for --random (default: 0)
//!   --parallel           Probe candidates in parallel within each scan
//!   --epsilon <VALUE>    Strictness tolerance (default: 1e-9)
//!   --output <FILE>      Output file (default: solution.json)

use std::env;
use std::fs;

use rand::rngs::StdRng;
use rand::SeedableRng;

use dominance_solver::dominance::{
    solve_round, EquilibriumOutcome, NormalFormGame, ReductionConfig, SimplexSolver,
};
use dominance_solver::games::classic;

fn main() {
    env_logger::init();
    let args: Vec<String> = env::args().collect();

    // Parse arguments
    let mut game_name = "pd".to_string();
    let mut random_shape: Option<(usize, usize)> = None;
    let mut seed: u64 = 0;
    let mut parallel = false;
    let mut epsilon: Option<f64> = None;
    let mut output_file = "solution.json".to_string();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--game" | "-g" => {
                i += 1;
                if i < args.len() {
                    game_name = args[i].clone();
                }
            }
            "--random" | "-r" => {
                i += 1;
                if i < args.len() {
                    random_shape = parse_shape(&args[i]);
                    if random_shape.is_none() {
                        eprintln!("Invalid shape: {} (expected e.g. 6x6)", args[i]);
                        return;
                    }
                }
            }
            "--seed" | "-s" => {
                i += 1;
                if i < args.len() {
                    seed = args[i].parse().unwrap_or(0);
                }
            }
            "--parallel" | "-p" => {
                parallel = true;
            }
            "--epsilon" | "-e" => {
                i += 1;
                if i < args.len() {
                    epsilon = args[i].parse().ok();
                }
            }
            "--output" | "-o" => {
                i += 1;
                if i < args.len() {
                    output_file = args[i].clone();
                }
            }
            "--help" | "-h" => {
                print_help();
                return;
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
                print_help();
                return;
            }
        }
        i += 1;
    }

    println!("=================================================");
    println!("  Iterated Strict-Dominance Reduction");
    println!("=================================================");
    println!();

    let mut config = ReductionConfig::default().with_parallel_probes(parallel);
    if let Some(e) = epsilon {
        config = config.with_epsilon(e);
    }
    if let Err(e) = config.validate() {
        eprintln!("Invalid configuration: {}", e);
        return;
    }

    let (root, description) = if let Some((rows, cols)) = random_shape {
        let mut rng = StdRng::seed_from_u64(seed);
        let root = classic::random_game(&mut rng, rows, cols, -9, 9);
        (root, format!("random {}x{} game (seed {})", rows, cols, seed))
    } else {
        match game_name.as_str() {
            "pd" => (classic::prisoners_dilemma(), "Prisoner's Dilemma".to_string()),
            "pennies" => (classic::matching_pennies(), "Matching Pennies".to_string()),
            "mixed" => (classic::mixed_dominance(), "Mixed-Dominance 3x3".to_string()),
            other => {
                eprintln!("Unknown game: {} (expected pd, pennies or mixed)", other);
                return;
            }
        }
    };

    println!("Game: {}", description);
    println!("Parallel probes: {}", parallel);
    println!("Epsilon: {}", config.epsilon);
    println!();

    println!("Initial game:");
    match NormalFormGame::from_tree(&root) {
        Ok(game) => print!("{}", game),
        Err(e) => {
            eprintln!("Malformed game tree: {}", e);
            return;
        }
    }
    println!();

    let solution = match solve_round(&root, SimplexSolver::new(config.max_simplex_pivots), &config)
    {
        Ok(solution) => solution,
        Err(e) => {
            eprintln!("Malformed game tree: {}", e);
            return;
        }
    };

    println!("Reduction complete!");
    println!(
        "Removed {} rows and {} columns in {} passes ({} LP probes, {:.4}s)",
        solution.stats.rows_removed,
        solution.stats.cols_removed,
        solution.stats.passes,
        solution.stats.lp_probes,
        solution.stats.elapsed_seconds
    );
    println!();

    match &solution.outcome {
        EquilibriumOutcome::Pure { row, col } => {
            println!(
                "Pure equilibrium: ({}, {})",
                solution.profile.row_labels[*row], solution.profile.col_labels[*col]
            );
        }
        EquilibriumOutcome::Mixed { row_mix, col_mix } => {
            println!("Mixed equilibrium: row {:.4} / column {:.4}", row_mix, col_mix);
        }
        EquilibriumOutcome::Unresolved { reason } => {
            println!("Unresolved ({:?}); submitting uniform fallback", reason);
        }
        EquilibriumOutcome::NoSurvivors => {
            println!("No survivors; submitting uniform fallback");
        }
    }

    println!();
    println!("=== Strategy Profile ===");
    for (label, prob) in solution
        .profile
        .row_labels
        .iter()
        .zip(&solution.profile.row_probabilities)
    {
        println!("  row    {}: {:.1}%", label, prob * 100.0);
    }
    for (label, prob) in solution
        .profile
        .col_labels
        .iter()
        .zip(&solution.profile.col_probabilities)
    {
        println!("  column {}: {:.1}%", label, prob * 100.0);
    }
    println!();

    // Export results
    println!("Exporting results to {}...", output_file);
    match serde_json::to_string_pretty(&solution)
        .map_err(|e| e.to_string())
        .and_then(|json| fs::write(&output_file, json).map_err(|e| e.to_string()))
    {
        Ok(_) => println!("Results saved successfully!"),
        Err(e) => eprintln!("Error saving results: {}", e),
    }

    println!("Done!");
}

fn parse_shape(raw: &str) -> Option<(usize, usize)> {
    let (rows, cols) = raw.split_once('x')?;
    let rows = rows.parse().ok().filter(|&n| n > 0)?;
    let cols = cols.parse().ok().filter(|&n| n > 0)?;
    Some((rows, cols))
}

fn print_help() {
    println!("Iterated Strict-Dominance Reduction");
    println!();
    println!("Usage: reduce [OPTIONS]");
    println!();
    println!("Options:");
    println!("  -g, --game <NAME>        Built-in game: pd, pennies, mixed (default: pd)");
    println!("  -r, --random <RxC>       Solve a random RxC game instead (e.g. 6x6)");
    println!("  -s, --seed <N>           Random seed for --random (default: 0)");
    println!("  -p, --parallel           Probe candidates in parallel within each scan");
    println!("  -e, --epsilon <VALUE>    Strictness tolerance (default: 1e-9)");
    println!("  -o, --output <FILE>      Output file (default: solution.json)");
    println!("  -h, --help               Show this help");
    println!();
    println!("Examples:");
    println!("  # Reduce the Prisoner's Dilemma");
    println!("  reduce --game pd");
    println!();
    println!("  # Reduce a random 8x8 game with parallel probing");
    println!("  reduce --random 8x8 --seed 42 --parallel");
}
