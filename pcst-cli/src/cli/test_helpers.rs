//! Small helpers shared across CLI tests.
//!
//! The CLI unit tests write temporary edge and prize files and assert error
//! handling behaviour. These helpers keep the test cases concise.

use std::{fs, io, path::PathBuf};

use tempfile::TempDir;

use super::{CliError, SolveCommand, commands::run_solve};

pub(super) fn temp_dir() -> TempDir {
    match TempDir::new() {
        Ok(dir) => dir,
        Err(err) => panic!("failed to create temp dir: {err}"),
    }
}

pub(super) fn write_file(dir: &TempDir, name: &str, contents: &str) -> io::Result<PathBuf> {
    let path = dir.path().join(name);
    fs::write(&path, contents)?;
    Ok(path)
}

/// Writes both input files and returns a `solve` command reading them.
pub(super) fn solve_command(dir: &TempDir, edges: &str, prizes: &str) -> io::Result<SolveCommand> {
    Ok(SolveCommand {
        edges: write_file(dir, "edges.txt", edges)?,
        prizes: write_file(dir, "prizes.txt", prizes)?,
        epsilon: 1e-6,
        max_memory: None,
    })
}

pub(super) fn run_solve_expecting_error(command: SolveCommand, panic_msg: &str) -> CliError {
    match run_solve(command) {
        Ok(_) => panic!("{panic_msg}"),
        Err(err) => err,
    }
}
