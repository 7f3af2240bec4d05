//! Error types.
//!
//! Configuration problems (bad parameter files) and structural problems
//! (unbalanced brackets found while interpreting) are kept apart so callers
//! can tell "never started" from "stopped halfway".

use std::path::PathBuf;

/// Failure while reading or parsing an L-System parameter file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read parameter file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("missing required field `{field}` (line {line})")]
    MissingField { field: &'static str, line: usize },

    #[error("line {line}: `{value}` is not a valid non-negative integer for `{field}`")]
    InvalidInteger {
        field: &'static str,
        line: usize,
        value: String,
    },

    #[error("line {line}: `{value}` is not a valid number for `{field}`")]
    InvalidNumber {
        field: &'static str,
        line: usize,
        value: String,
    },

    #[error("line {line}: rule `{text}` has no `->` separator")]
    MissingSeparator { line: usize, text: String },

    #[error("line {line}: rule left-hand side `{lhs}` must be exactly one symbol")]
    InvalidSymbol { line: usize, lhs: String },
}

/// Failure while interpreting a command string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InterpretError {
    /// A `]` (or any symbol mapped to a pop) found the pose stack empty.
    #[error("unbalanced bracket: pop at symbol {index} with an empty pose stack")]
    UnbalancedBracket { index: usize },
}

/// Any failure of the full parameters-to-artifact pipeline.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Interpret(#[from] InterpretError),

    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),

    #[error("failed to serialize output: {0}")]
    Serialize(#[from] serde_json::Error),
}
