//! Centralised error types used across the crate.

use std::io;

use thiserror::Error;

use crate::core::data::ParseTableError;

/// Precise configuration faults. Fatal before anything is rendered.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("duplicate columns in declared groups: {0:?}")]
    DuplicateColumns(Vec<usize>),
    #[error("column {column} is out of range for a table with {columns} columns")]
    ColumnOutOfRange { column: usize, columns: usize },
    #[error("background opacity {0} must lie within [0, 1]")]
    InvalidOpacity(f64),
    #[error("malformed style override `{0}`, expected `property=value`")]
    MalformedStyle(String),
    #[error("malformed column list `{0}`, expected comma separated indices")]
    MalformedColumns(String),
}

/// Structural faults reported by a table provider before the pass starts.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MalformedTableError {
    #[error("missing header section")]
    MissingHeader,
    #[error("missing body section")]
    MissingBody,
    #[error("missing rows")]
    MissingRows,
    #[error("missing cells")]
    MissingCells,
}

/// A column group without a single numeric value has no min/max.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("column group {columns:?} has no numeric values")]
pub struct EmptyRangeError {
    pub columns: Vec<usize>,
}

/// Top-level error type bubbled up by public APIs.
#[derive(Debug, Error)]
pub enum DatabarError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Table(#[from] ParseTableError),
    #[error(transparent)]
    Malformed(#[from] MalformedTableError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    EmptyRange(#[from] EmptyRangeError),
    #[error("invalid configuration file: {0}")]
    ConfigFile(#[from] serde_json::Error),
}
