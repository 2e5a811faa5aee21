//! linkgraph: run link-graph queries over an edge list.
//!
//! Loads the graph once per invocation, answers a single query and exits.
//! Logs go to stderr (filter with `RUST_LOG`), results to stdout.

use std::fmt::Display;
use std::process;

use clap::{Parser, Subcommand};
use linkgraph_core::{HamiltonianConfig, MAX_DENSE_LIMIT, MAX_MASK_BITS};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

mod error;
mod load;
mod report;

use error::Result;

/// Structural queries over a directed graph of page links.
#[derive(Parser, Debug)]
#[command(name = "linkgraph", version, about = "Structural queries over a directed link graph")]
struct Cli {
    /// Edge list file (`from to` per line), or `-` for stdin
    edges: String,

    /// Emit results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Largest vertex count that gets a dense Hamiltonian table
    /// [default: 20, or --max-vertices if lower]
    #[arg(long, global = true,
          value_parser = clap::value_parser!(u64).range(0..=MAX_DENSE_LIMIT as u64))]
    dense_limit: Option<u64>,

    /// Largest vertex count the Hamiltonian search accepts
    #[arg(long, global = true, default_value_t = HamiltonianConfig::default().max_vertices as u64,
          value_parser = clap::value_parser!(u64).range(1..=MAX_MASK_BITS as u64))]
    max_vertices: u64,

    /// Refuse graphs whose estimated memory exceeds this many MB
    #[arg(long, global = true, default_value_t = 4096,
          value_parser = clap::value_parser!(u64).range(64..=131_072))]
    max_memory_mb: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Shortest link count between two pages (-1 if none)
    Path {
        from: String,
        to: String,
        /// Also print the pages along one shortest route
        #[arg(short, long)]
        route: bool,
    },
    /// Pages of minimum eccentricity
    Centers,
    /// Strongly connected components
    Scc,
    /// A path visiting every page exactly once, if any
    Hamiltonian,
    /// Graph size and load statistics
    Stats,
}

impl Cli {
    /// Table sizing for the Hamiltonian search. An unset dense limit follows
    /// a lowered `--max-vertices`; an explicit one is passed through as given.
    fn hamiltonian_config(&self) -> HamiltonianConfig {
        let max_vertices = self.max_vertices as usize;
        let dense_limit = match self.dense_limit {
            Some(limit) => limit as usize,
            None => HamiltonianConfig::default().dense_limit.min(max_vertices),
        };
        HamiltonianConfig {
            dense_limit,
            max_vertices,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let (graph, load_stats) = load::load_graph(&cli.edges, cli.max_memory_mb as usize)?;

    match cli.command {
        Commands::Path { from, to, route } => {
            emit(&report::path(&graph, &from, &to, route), cli.json)
        }
        Commands::Centers => emit(&report::center_set(&graph), cli.json),
        Commands::Scc => emit(&report::components(&graph), cli.json),
        Commands::Hamiltonian => {
            emit(&report::hamiltonian(&graph, &cli.hamiltonian_config())?, cli.json)
        }
        Commands::Stats => emit(&report::stats(&graph, &load_stats), cli.json),
    }
}

fn emit<T: Serialize + Display>(report: &T, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        println!("{}", report);
    }
    Ok(())
}
