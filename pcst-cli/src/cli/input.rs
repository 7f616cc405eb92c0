//! Text loaders for edge and prize files.
//!
//! Both formats are line based. Blank lines and lines starting with `#` are
//! skipped. An edge line holds `source target cost` separated by whitespace;
//! a prize line holds a single prize, and the line's position among the data
//! lines is the node id.

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use tracing::{debug, instrument};

use super::commands::CliError;

/// Undirected `(source, target, cost)` triple read from an edge file.
pub type EdgeTriple = (usize, usize, f64);

#[instrument(name = "cli.read_edges", err, fields(path = %path.display()))]
pub(super) fn read_edges(path: &Path) -> Result<Vec<EdgeTriple>, CliError> {
    let edges = parse_edges(open(path)?, path)?;
    debug!(edges = edges.len(), "edge file loaded");
    Ok(edges)
}

#[instrument(name = "cli.read_prizes", err, fields(path = %path.display()))]
pub(super) fn read_prizes(path: &Path) -> Result<Vec<f64>, CliError> {
    let prizes = parse_prizes(open(path)?, path)?;
    debug!(nodes = prizes.len(), "prize file loaded");
    Ok(prizes)
}

fn open(path: &Path) -> Result<BufReader<File>, CliError> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|source| CliError::Io {
            path: path.to_path_buf(),
            source,
        })
}

pub(super) fn parse_edges<R: BufRead>(reader: R, path: &Path) -> Result<Vec<EdgeTriple>, CliError> {
    data_lines(reader, path)?
        .into_iter()
        .map(|(line, text)| {
            parse_edge_line(&text).map_err(|message| CliError::Parse {
                path: path.to_path_buf(),
                line,
                message,
            })
        })
        .collect()
}

pub(super) fn parse_prizes<R: BufRead>(reader: R, path: &Path) -> Result<Vec<f64>, CliError> {
    data_lines(reader, path)?
        .into_iter()
        .map(|(line, text)| {
            parse_number::<f64>(text.trim(), "prize").map_err(|message| CliError::Parse {
                path: path.to_path_buf(),
                line,
                message,
            })
        })
        .collect()
}

/// Returns the non-comment lines with their 1-based line numbers.
fn data_lines<R: BufRead>(reader: R, path: &Path) -> Result<Vec<(usize, String)>, CliError> {
    let mut lines = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let text = line.map_err(|source| CliError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let trimmed = text.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        lines.push((index + 1, trimmed.to_owned()));
    }
    Ok(lines)
}

fn parse_edge_line(text: &str) -> Result<EdgeTriple, String> {
    let fields: Vec<&str> = text.split_whitespace().collect();
    let [source, target, cost] = fields.as_slice() else {
        return Err(format!(
            "expected `source target cost`, found {} fields",
            fields.len()
        ));
    };
    Ok((
        parse_number(source, "source")?,
        parse_number(target, "target")?,
        parse_number(cost, "cost")?,
    ))
}

fn parse_number<T>(raw: &str, what: &str) -> Result<T, String>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.parse::<T>()
        .map_err(|error| format!("invalid {what} `{raw}`: {error}"))
}
