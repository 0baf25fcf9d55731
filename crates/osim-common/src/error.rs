//! Error types for the OS simulator.

use thiserror::Error;

/// Result type alias for simulator operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the OS simulator.
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors (10-19)
    #[error("configuration error: {0}")]
    Config(String),

    #[error("unknown {engine} algorithm: {name}")]
    UnknownAlgorithm { engine: String, name: String },

    #[error("{algorithm} requires parameter `{parameter}`")]
    MissingParameter {
        algorithm: String,
        parameter: String,
    },

    // Workload validation errors (20-29)
    #[error("duplicate pid {pid} in workload")]
    DuplicatePid { pid: u32 },

    #[error("{field} = {value} is outside [{min}, {max}]")]
    OutOfRange {
        field: String,
        value: u64,
        min: u64,
        max: u64,
    },

    #[error("{what} has {count} entries, limit is {limit}")]
    LimitExceeded {
        what: String,
        count: usize,
        limit: usize,
    },

    #[error("{0} must not be empty")]
    EmptyWorkload(String),

    // Simulation errors (30-39)
    #[error("simulation failed: {0}")]
    Simulation(String),

    // I/O errors (60-69)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Returns the error code for this error type.
    /// Used for detailed error reporting in JSON output.
    pub fn code(&self) -> u32 {
        match self {
            Error::Config(_) => 10,
            Error::UnknownAlgorithm { .. } => 11,
            Error::MissingParameter { .. } => 12,
            Error::DuplicatePid { .. } => 21,
            Error::OutOfRange { .. } => 22,
            Error::LimitExceeded { .. } => 23,
            Error::EmptyWorkload(_) => 24,
            Error::Simulation(_) => 30,
            Error::Io(_) => 60,
            Error::Json(_) => 61,
        }
    }

    /// Configuration errors are surfaced before any simulation work starts.
    pub fn is_config(&self) -> bool {
        (10..20).contains(&self.code())
    }

    /// Precondition violations rejected at the workload boundary.
    pub fn is_validation(&self) -> bool {
        (20..30).contains(&self.code())
    }

    pub(crate) fn out_of_range(field: impl Into<String>, value: u64, min: u64, max: u64) -> Self {
        Error::OutOfRange {
            field: field.into(),
            value,
            min,
            max,
        }
    }
}
