//! Shared plumbing for the `ct_*` command-line utilities: argument
//! handling, input opening, rename maps and the per-line tree loop.

use crate::{ParseOptions, Tree, TreeError, TreeParseError};
use clap::Parser;
use clap::error::ErrorKind;
use rustc_hash::FxHashMap;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::process::ExitCode;
use thiserror::Error;

/// Old label to new label.
pub type LabelMap = FxHashMap<String, String>;

/// Name that selects standard input instead of a file.
pub const STDIN_NAME: &str = "-";

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Unable to open file: {path}")]
    FileOpen {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("{0}")]
    Usage(String),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("Line {line}: {source}")]
    Line {
        line: usize,
        #[source]
        source: TreeParseError,
    },
    #[error(transparent)]
    Tree(#[from] TreeError),
}

/// Logs go to stderr; `RUST_LOG` sets the filter (default `warn`).
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();
}

/// Parses the process arguments, exiting with status 1 on usage errors.
///
/// `--help` and `--version` still exit successfully.
pub fn parse_args<T: Parser>() -> T {
    match T::try_parse() {
        Ok(args) => args,
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => err.exit(),
            _ => {
                let _ = err.print();
                std::process::exit(1)
            }
        },
    }
}

/// Turns the outcome of a utility into its exit code, printing a one-line
/// diagnostic on failure.
pub fn finish(result: Result<(), CliError>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::debug!(error = ?err, "utility failed");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

/// Opens `path` for buffered reading; [STDIN_NAME] reads standard input.
pub fn open_input(path: &str) -> Result<Box<dyn BufRead>, CliError> {
    if path == STDIN_NAME {
        return Ok(Box::new(BufReader::new(io::stdin())));
    }
    let file = File::open(path).map_err(|source| CliError::FileOpen {
        path: path.to_string(),
        source,
    })?;
    Ok(Box::new(BufReader::new(file)))
}

/// Reads a rename map: one `old new` pair per line, separated by
/// whitespace. A missing second column maps to the empty label; a repeated
/// key keeps its first value.
pub fn parse_label_map<R: BufRead>(reader: R) -> Result<LabelMap, CliError> {
    let mut label_map = LabelMap::default();
    for line in reader.lines() {
        let line = line?;
        let mut columns = line.split_whitespace();
        let Some(old_label) = columns.next() else {
            continue;
        };
        let new_label = columns.next().unwrap_or_default();
        let _ = label_map
            .entry(old_label.to_string())
            .or_insert_with(|| new_label.to_string());
    }
    tracing::debug!(entries = label_map.len(), "read label map");
    Ok(label_map)
}

pub fn read_label_map(path: &str) -> Result<LabelMap, CliError> {
    parse_label_map(open_input(path)?)
}

/// Parses each non-blank line of `reader` as one tree and hands it to
/// `on_tree`, stopping at the first error.
pub fn for_each_tree<R, F>(
    reader: R,
    options: &ParseOptions,
    mut on_tree: F,
) -> Result<(), CliError>
where
    R: BufRead,
    F: FnMut(Tree) -> Result<(), CliError>,
{
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let line_number = idx + 1;
        tracing::trace!(line = line_number, "reading tree");
        let tree = Tree::from_newick(&line, options).map_err(|source| {
            CliError::Line { line: line_number, source }
        })?;
        on_tree(tree)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_parse_label_map() {
        let map = parse_label_map(Cursor::new("A X\n\nB\tY extra\nC\nA Z\n"))
            .unwrap();
        assert_eq!(map.len(), 3);
        assert_eq!(map["A"], "X");
        assert_eq!(map["B"], "Y");
        assert_eq!(map["C"], "");
    }

    #[test]
    fn test_for_each_tree_skips_blank_lines() {
        let mut counts = Vec::new();
        for_each_tree(
            Cursor::new("(A,B);\n\n  \n((A,B),C);\n"),
            &ParseOptions::default(),
            |tree| {
                counts.push(tree.node_count());
                Ok(())
            },
        )
        .unwrap();
        assert_eq!(counts, vec![3, 5]);
    }

    #[test]
    fn test_for_each_tree_reports_line() {
        let err = for_each_tree(
            Cursor::new("(A,B);\n(A:1,(B:2;\n"),
            &ParseOptions::default(),
            |_| Ok(()),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            CliError::Line {
                line: 2,
                source: TreeParseError::UnbalancedParentheses { .. }
            }
        ));
    }

    #[test]
    fn test_open_missing_file() {
        let err = open_input("no/such/file.tre").err().unwrap();
        assert_eq!(err.to_string(), "Unable to open file: no/such/file.tre");
    }
}
