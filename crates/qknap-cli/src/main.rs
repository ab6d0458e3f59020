mod input;

use clap::{Parser, Subcommand, ValueEnum};
use std::fmt::Write;
use std::path::{Path, PathBuf};

use qknap_core::{Encoding, Items, KnapsackSolution};
use qknap_model::{ExactSolver, Sampler, SimulatedAnnealingSampler};

#[derive(Parser)]
#[command(name = "qknap")]
#[command(about = "Solve 0/1 knapsack problems through quadratic model encodings", long_about = None)]
struct Cli {
    /// Show debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode the items, sample the model and report the selected items
    Solve {
        /// Item file: one `cost,weight` or `name,cost,weight` per line
        file: PathBuf,
        /// Maximum total weight
        #[arg(default_value_t = 70.0)]
        capacity: f64,
        /// Model encoding (bqm, cqm)
        #[arg(short, long, default_value = "bqm")]
        encoding: Encoding,
        /// Sampler used to minimize the model
        #[arg(short, long, value_enum, default_value_t = SamplerKind::Anneal)]
        sampler: SamplerKind,
        /// Number of samples to draw
        #[arg(long, default_value_t = 10)]
        reads: usize,
        /// Annealing sweeps per sample
        #[arg(long, default_value_t = 1000)]
        sweeps: usize,
        /// Seed for reproducible annealing
        #[arg(long)]
        seed: Option<u64>,
        /// Output format (pretty, json)
        #[arg(short, long, default_value = "pretty")]
        format: String,
    },
    /// Print the encoded model as JSON
    Encode {
        /// Item file
        file: PathBuf,
        /// Maximum total weight
        #[arg(default_value_t = 70.0)]
        capacity: f64,
        /// Model encoding (bqm, cqm)
        #[arg(short, long, default_value = "bqm")]
        encoding: Encoding,
    },
    /// Check an item file for errors
    Check {
        /// The file to check
        file: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum SamplerKind {
    /// Enumerate every assignment (small models only)
    Exact,
    /// Simulated annealing
    Anneal,
}

fn read_table(file: &Path) -> input::ItemTable {
    let source = match std::fs::read_to_string(file) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error reading file {}: {}", file.display(), e);
            std::process::exit(1);
        }
    };
    match input::parse_items(&source) {
        Ok(table) => table,
        Err(e) => {
            eprintln!("Error in {}: {}", file.display(), e);
            std::process::exit(1);
        }
    }
}

fn load_items(file: &Path, capacity: f64) -> Items {
    if !(capacity > 0.0) {
        eprintln!("Usage: qknap solve <data file> <capacity>: capacity must be positive");
        std::process::exit(1);
    }

    let table = read_table(file);
    let items = match table.names {
        Some(names) => Items::with_names(names, &table.costs, &table.weights, capacity),
        None => Items::new(&table.costs, &table.weights, capacity),
    };
    match items {
        Ok(items) => items,
        Err(e) => {
            eprintln!("Invalid items: {}", e);
            std::process::exit(1);
        }
    }
}

fn build_sampler(kind: SamplerKind, reads: usize, sweeps: usize, seed: Option<u64>) -> Box<dyn Sampler> {
    match kind {
        SamplerKind::Exact => Box::new(ExactSolver::new().with_num_reads(reads)),
        SamplerKind::Anneal => {
            let mut sampler = SimulatedAnnealingSampler::new()
                .with_num_reads(reads)
                .with_num_sweeps(sweeps);
            if let Some(seed) = seed {
                sampler = sampler.with_seed(seed);
            }
            Box::new(sampler)
        }
    }
}

fn format_solution(items: &Items, solution: &KnapsackSolution) -> String {
    let weights: Vec<f64> = solution
        .selected
        .iter()
        .filter_map(|&i| items.get(i).map(|item| item.weight))
        .collect();
    let costs: Vec<f64> = solution
        .selected
        .iter()
        .filter_map(|&i| items.get(i).map(|item| item.cost))
        .collect();

    let mut out = String::new();
    let _ = writeln!(out, "Found solution at energy {}", solution.energy);
    let _ = writeln!(out, "Selected item numbers (0-indexed): {:?}", solution.selected);
    let names = solution.names(items);
    if !names.is_empty() {
        let _ = writeln!(out, "Selected item names: {:?}", names);
    }
    let _ = writeln!(
        out,
        "Selected item weights: {:?}, total = {}",
        weights, solution.total_weight
    );
    let _ = writeln!(
        out,
        "Selected item costs: {:?}, total = {}",
        costs, solution.total_cost
    );
    if !solution.within_capacity {
        let _ = writeln!(
            out,
            "Warning: total weight exceeds capacity {}; the penalty model returned an infeasible selection",
            items.capacity()
        );
    }
    out
}

fn main() {
    let cli = Cli::parse();

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Error);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    match cli.command {
        Commands::Solve {
            file,
            capacity,
            encoding,
            sampler,
            reads,
            sweeps,
            seed,
            format,
        } => {
            let items = load_items(&file, capacity);
            let sampler = build_sampler(sampler, reads, sweeps, seed);

            let solution = match qknap_core::solve(&items, encoding, sampler.as_ref()) {
                Ok(s) => s,
                Err(e) => {
                    eprintln!("Solve error: {}", e);
                    std::process::exit(1);
                }
            };

            if format == "json" {
                match serde_json::to_string_pretty(&solution) {
                    Ok(json) => println!("{}", json),
                    Err(e) => {
                        eprintln!("Error serializing solution: {}", e);
                        std::process::exit(1);
                    }
                }
            } else {
                print!("{}", format_solution(&items, &solution));
            }
        }
        Commands::Encode { file, capacity, encoding } => {
            let items = load_items(&file, capacity);
            let model = match encoding.encode_items(&items) {
                Ok(m) => m,
                Err(e) => {
                    eprintln!("Encode error: {}", e);
                    std::process::exit(1);
                }
            };

            match serde_json::to_string_pretty(&model) {
                Ok(json) => println!("{}", json),
                Err(e) => {
                    eprintln!("Error serializing model: {}", e);
                    std::process::exit(1);
                }
            }
        }
        Commands::Check { file } => {
            let table = read_table(&file);
            let total_cost: f64 = table.costs.iter().sum();
            let total_weight: f64 = table.weights.iter().sum();
            let min_weight = table.weights.iter().copied().fold(f64::INFINITY, f64::min);

            println!("✓ {} is valid", file.display());
            println!("  {} items{}", table.costs.len(), if table.names.is_some() { " (named)" } else { "" });
            println!("  total cost   {}", total_cost);
            println!("  total weight {}", total_weight);
            println!("  lightest     {}", min_weight);
        }
    }
}
