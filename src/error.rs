//! Error types for the ranking core and the ridership tables.

use thiserror::Error;

use crate::graph::StationId;

/// Failures raised by graph construction, normalization, propagation and
/// ranking. Every variant names the entity that broke the precondition.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RankError {
    #[error("station {station} is not in the node list")]
    NotFound { station: StationId },

    #[error("index {index} is out of range for a node list of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("insufficient data: {0}")]
    InsufficientData(String),

    #[error("dimension mismatch for {what}: expected {expected}, found {found}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("non-finite value in propagation at hop {hop}")]
    NumericInstability { hop: usize },

    #[error("non-finite {what} ({value}) while normalizing edge weights")]
    NonFiniteStatistic { what: &'static str, value: f64 },

    #[error("edge {from} - {to} has non-finite weight {weight}")]
    InvalidWeight {
        from: StationId,
        to: StationId,
        weight: f64,
    },

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Failures raised while reading exported ridership tables.
#[derive(Error, Debug)]
pub enum RidershipError {
    #[error("invalid reporting period: {0}")]
    Period(String),

    #[error("no ridership data for {0}")]
    NoRidershipData(String),

    #[error("ridership table for {0} has no \"Boarding Category\" column")]
    MissingColumn(String),

    #[error("line {line}, category {category}: cannot parse count {value:?}")]
    BadCount {
        line: String,
        category: String,
        value: String,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T, E = RankError> = std::result::Result<T, E>;
