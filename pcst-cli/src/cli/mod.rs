//! Command-line interface orchestration for the solver.
//!
//! The CLI offers a single `solve` command that reads an edge file and a
//! prize file, runs the solver and prints the parent assignment.

mod commands;
mod input;

pub use commands::{
    Cli, CliError, Command, ExecutionSummary, SolveCommand, parse_byte_size, render_summary,
    run_cli,
};
pub use input::EdgeTriple;

#[cfg(test)]
mod test_helpers;
