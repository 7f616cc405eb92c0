//! Command implementations and argument parsing for the pcst CLI.

use std::{
    io::{self, Write},
    path::PathBuf,
};

use clap::{Args, Parser, Subcommand};
use pcst_core::{
    DEFAULT_TIGHTNESS_EPSILON, EdgeListGraph, PcstBuilder, PcstError, PriceSteinerTreeResult,
    RunningForever, TracingProgressTracker, WeightedGraph, estimate_peak_bytes, format_bytes,
    prizes_from_slice,
};
use thiserror::Error;
use tracing::{field, info, instrument};

use super::input::{read_edges, read_prizes};

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(name = "pcst", about = "Solve prize-collecting Steiner tree instances.")]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Compute a prize-collecting Steiner tree for a graph on disk.
    Solve(SolveCommand),
}

/// Options accepted by the `solve` command.
#[derive(Debug, Args, Clone)]
pub struct SolveCommand {
    /// Edge file with one `source target cost` triple per line.
    #[arg(long)]
    pub edges: PathBuf,

    /// Prize file with one prize per line; line order gives the node id.
    #[arg(long)]
    pub prizes: PathBuf,

    /// Relative tolerance under which an edge counts as fully paid.
    #[arg(long, default_value_t = DEFAULT_TIGHTNESS_EPSILON)]
    pub epsilon: f64,

    /// Refuse to solve when the estimated peak memory exceeds this size.
    ///
    /// Accepts plain bytes or a binary suffix such as `512M` or `2GiB`.
    #[arg(long = "max-memory", value_parser = parse_byte_size)]
    pub max_memory: Option<u64>,
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// File I/O failed while loading an input file.
    #[error("failed to read `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// An input line could not be parsed.
    #[error("{path}:{line}: {message}")]
    Parse {
        /// File containing the malformed line.
        path: PathBuf,
        /// 1-based line number.
        line: usize,
        /// What was wrong with the line.
        message: String,
    },
    /// The instance is estimated to need more memory than allowed.
    #[error(
        "estimated peak memory {} exceeds the --max-memory limit of {}",
        format_bytes(*.estimated),
        format_bytes(*.limit)
    )]
    MemoryLimitExceeded {
        /// Estimated peak memory in bytes.
        estimated: u64,
        /// Limit supplied by the caller in bytes.
        limit: u64,
    },
    /// The solver rejected its configuration or input.
    #[error(transparent)]
    Core(#[from] PcstError),
}

/// Summarises the outcome of executing a CLI command.
#[derive(Debug, Clone)]
pub struct ExecutionSummary {
    /// Number of relationships read from the edge file, both directions
    /// counted.
    pub relationships: usize,
    /// Estimated peak memory of the solve in bytes.
    pub estimated_bytes: u64,
    /// Parent assignment produced by the solver.
    pub result: PriceSteinerTreeResult,
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when reading the inputs or solving fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use pcst_cli::cli::{Cli, Command, SolveCommand, run_cli};
/// # use tempfile::TempDir;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let dir = TempDir::new()?;
/// let edges = dir.path().join("edges.txt");
/// let prizes = dir.path().join("prizes.txt");
/// std::fs::write(&edges, "0 1 1.0\n")?;
/// std::fs::write(&prizes, "5\n5\n")?;
/// let cli = Cli {
///     command: Command::Solve(SolveCommand {
///         edges,
///         prizes,
///         epsilon: 1e-6,
///         max_memory: None,
///     }),
/// };
/// let summary = run_cli(cli)?;
/// assert_eq!(summary.result.effective_node_count(), 2);
/// # Ok(())
/// # }
/// ```
#[instrument(name = "cli.run", err, skip(cli), fields(command = field::Empty))]
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    match cli.command {
        Command::Solve(solve) => {
            tracing::Span::current().record("command", "solve");
            run_solve(solve)
        }
    }
}

#[instrument(
    name = "cli.solve",
    err,
    skip(command),
    fields(
        edges = %command.edges.display(),
        prizes = %command.prizes.display(),
        epsilon = command.epsilon,
    ),
)]
pub(super) fn run_solve(command: SolveCommand) -> Result<ExecutionSummary, CliError> {
    let solver = PcstBuilder::new()
        .with_tightness_epsilon(command.epsilon)
        .build()?;
    let prizes = read_prizes(&command.prizes)?;
    let graph = EdgeListGraph::try_new(prizes.len(), read_edges(&command.edges)?)?;

    let relationships = graph.relationship_count();
    let estimated_bytes = estimate_peak_bytes(graph.node_count(), relationships);
    check_memory_limit(estimated_bytes, command.max_memory)?;

    let result = solver.compute(
        &graph,
        prizes_from_slice(&prizes),
        &mut TracingProgressTracker::new(),
        &RunningForever,
    )?;
    info!(
        nodes = graph.node_count(),
        kept = result.effective_node_count(),
        estimated = %format_bytes(estimated_bytes),
        "solve completed"
    );
    Ok(ExecutionSummary {
        relationships,
        estimated_bytes,
        result,
    })
}

pub(super) fn check_memory_limit(estimated: u64, limit: Option<u64>) -> Result<(), CliError> {
    match limit {
        Some(limit) if estimated > limit => {
            Err(CliError::MemoryLimitExceeded { estimated, limit })
        }
        _ => Ok(()),
    }
}

/// Parses a byte count with an optional binary suffix.
///
/// Accepted suffixes are `K`, `M`, `G` and `T`, optionally followed by `B`
/// or `iB`, in any case. All of them are powers of 1024.
///
/// # Errors
/// Returns a description of the problem when the input is not a whole
/// number, carries an unknown suffix or overflows `u64`.
///
/// # Examples
/// ```
/// use pcst_cli::cli::parse_byte_size;
///
/// assert_eq!(parse_byte_size("512"), Ok(512));
/// assert_eq!(parse_byte_size("2KiB"), Ok(2048));
/// assert!(parse_byte_size("1.5G").is_err());
/// ```
pub fn parse_byte_size(raw: &str) -> Result<u64, String> {
    let trimmed = raw.trim();
    let split = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len());
    let (digits, suffix) = trimmed.split_at(split);
    if digits.is_empty() {
        return Err(format!("`{raw}` does not start with a byte count"));
    }
    let shift = match suffix.to_ascii_lowercase().as_str() {
        "" | "b" => 0,
        "k" | "kb" | "kib" => 10,
        "m" | "mb" | "mib" => 20,
        "g" | "gb" | "gib" => 30,
        "t" | "tb" | "tib" => 40,
        other => return Err(format!("unknown size suffix `{other}`")),
    };
    digits
        .parse::<u64>()
        .ok()
        .and_then(|count| count.checked_mul(1_u64 << shift))
        .ok_or_else(|| format!("`{raw}` does not fit in 64 bits"))
}

/// Renders `summary` to `writer` as a short header followed by one
/// tab-separated `node parent cost` row per node.
///
/// Pruned nodes report parent `-1` and the root reports `-2`.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
pub fn render_summary(summary: &ExecutionSummary, mut writer: impl Write) -> io::Result<()> {
    let result = &summary.result;
    writeln!(writer, "nodes: {}", result.node_count())?;
    writeln!(writer, "kept: {}", result.effective_node_count())?;
    writeln!(writer, "total cost: {}", result.total_cost())?;
    writeln!(writer, "net value: {}", result.net_value())?;
    writeln!(writer, "node\tparent\tcost")?;
    for (node, parent) in result.parent_array().into_iter().enumerate() {
        writeln!(
            writer,
            "{node}\t{parent}\t{}",
            result.relationship_to_parent_cost(node)
        )?;
    }
    Ok(())
}
