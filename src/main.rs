use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use adjgraph::{
    algorithms::{TopoAlgorithm, UnknownAlgorithm},
    graph::Graph,
    instrumentation::Counters,
};
use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err}");
        for cause in err.chain().skip(1) {
            eprintln!("  caused by: {cause}");
        }
        std::process::exit(1);
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "adjgraph",
    about = "Inspect adjacency-list graphs and compare topological sorting algorithms."
)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print a graph file and check its invariants.
    Show {
        /// Graph in the whitespace-delimited text format.
        file: PathBuf,
    },
    /// Topologically sort a directed graph file.
    Sort {
        file: PathBuf,
        /// Algorithm to run: v1, v2, v3 or all. Repeat to run several; defaults to all.
        #[arg(short, long = "algorithm", value_name = "ALGORITHM")]
        algorithms: Vec<AlgorithmArg>,
        /// Report vertex iterations, edge iterations and edge removals.
        #[arg(long)]
        counters: bool,
    },
    /// Write a complete graph in the text format to stdout.
    Complete {
        /// Number of vertices.
        vertices: usize,
        #[arg(long)]
        directed: bool,
    },
}

/// Value of `--algorithm`: one algorithm, or `all` of them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum AlgorithmArg {
    All,
    One(TopoAlgorithm),
}

impl FromStr for AlgorithmArg {
    type Err = UnknownAlgorithm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("all") {
            Ok(AlgorithmArg::All)
        } else {
            s.parse().map(AlgorithmArg::One)
        }
    }
}

/// Algorithms to run, in first-mention order without repeats. No argument
/// means all of them.
fn selected_algorithms(args: &[AlgorithmArg]) -> Vec<TopoAlgorithm> {
    if args.is_empty() {
        return TopoAlgorithm::ALL.to_vec();
    }

    let mut selected = Vec::with_capacity(TopoAlgorithm::ALL.len());
    let candidates = args.iter().flat_map(|arg| match *arg {
        AlgorithmArg::All => TopoAlgorithm::ALL.to_vec(),
        AlgorithmArg::One(algorithm) => vec![algorithm],
    });
    for algorithm in candidates {
        if !selected.contains(&algorithm) {
            selected.push(algorithm);
        }
    }
    selected
}

fn init_tracing(verbose: u8) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = match verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        };
        EnvFilter::new(format!("adjgraph={level},warn"))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .compact()
        .init();
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    debug!(?cli, "parsed arguments");

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Command::Show { file } => {
            let graph = load(&file)?;
            write!(out, "{graph}")?;
            match graph.validate() {
                Ok(()) => writeln!(out, "Invariants hold")?,
                Err(violation) => writeln!(out, "Invariant violated: {violation}")?,
            }
        }
        Command::Sort {
            file,
            algorithms,
            counters,
        } => {
            let graph = load(&file)?;
            for algorithm in selected_algorithms(&algorithms) {
                let mut tally = Counters::new();
                let result = graph
                    .topo_sort_instrumented(algorithm, &mut tally)
                    .with_context(|| format!("cannot sort {}", file.display()))?;
                info!(%algorithm, valid = result.is_valid(), "sorted");

                writeln!(out, "--- {algorithm} ---")?;
                write!(out, "{}", result.display(&graph))?;
                if counters {
                    writeln!(out, "{tally}")?;
                }
            }
        }
        Command::Complete { vertices, directed } => {
            Graph::complete(vertices, directed)
                .write_text(&mut out)
                .context("cannot write graph")?;
        }
    }

    out.flush()?;
    Ok(())
}

fn load(path: &Path) -> Result<Graph> {
    let graph = Graph::from_file(path)
        .with_context(|| format!("failed to read graph from {}", path.display()))?;
    debug!(
        path = %path.display(),
        vertices = graph.vertex_count(),
        edges = graph.edge_count(),
        "loaded graph"
    );
    Ok(graph)
}
