//! Exit codes for the osim CLI.
//!
//! Exit codes communicate the outcome without requiring output parsing.
//! They are stable across releases.

use osim_common::Error;

/// Exit codes for osim operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Simulation ran and its report was written
    Clean = 0,

    /// Unknown algorithm, missing parameter, or unusable config file
    ConfigError = 10,

    /// Workload rejected before reaching an engine
    ValidationError = 11,

    /// Engine failure
    SimulationError = 12,

    /// I/O or serialization error
    IoError = 13,

    /// Internal/unknown error
    InternalError = 99,
}

impl ExitCode {
    /// Convert to i32 for process exit.
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Check if this exit code indicates success.
    pub fn is_success(self) -> bool {
        matches!(self, ExitCode::Clean)
    }

    /// Check if this exit code indicates an error requiring attention.
    pub fn is_error(self) -> bool {
        (self as i32) >= 10
    }

    /// Map an error to the exit code its group reports.
    pub fn for_error(err: &Error) -> Self {
        match err.code() {
            10..=19 => ExitCode::ConfigError,
            20..=29 => ExitCode::ValidationError,
            30..=39 => ExitCode::SimulationError,
            60..=69 => ExitCode::IoError,
            _ => ExitCode::InternalError,
        }
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as i32
    }
}

impl From<&Error> for ExitCode {
    fn from(err: &Error) -> Self {
        ExitCode::for_error(err)
    }
}
