//! Semantic validation of a loaded configuration.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::SimulatorConfig;

/// One inconsistency found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Dotted path of the offending field, e.g. `defaults.quantum`.
    pub field: String,
    pub message: String,
}

impl ValidationError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        ValidationError {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Collect every inconsistency in `config`; an empty result means valid.
pub fn validate_config(config: &SimulatorConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let limits = &config.limits;
    let defaults = &config.defaults;

    if !osim_common::schema::is_compatible(&config.schema_version) {
        errors.push(ValidationError::new(
            "schema_version",
            format!("unsupported version {}", config.schema_version),
        ));
    }

    for (field, value) in [
        ("limits.max_processes", limits.max_processes),
        ("limits.max_references", limits.max_references),
        ("limits.max_frames", limits.max_frames),
        ("limits.max_requests", limits.max_requests),
    ] {
        if value == 0 {
            errors.push(ValidationError::new(field, "must be at least 1"));
        }
    }

    if limits.max_quantum == 0 {
        errors.push(ValidationError::new("limits.max_quantum", "must be at least 1"));
    }

    if limits.max_tick == 0 {
        errors.push(ValidationError::new("limits.max_tick", "must be at least 1"));
    }

    if limits.min_disk_size == 0 {
        errors.push(ValidationError::new("limits.min_disk_size", "must be at least 1"));
    }

    if limits.min_disk_size > limits.max_disk_size {
        errors.push(ValidationError::new(
            "limits.min_disk_size",
            format!(
                "{} exceeds limits.max_disk_size {}",
                limits.min_disk_size, limits.max_disk_size
            ),
        ));
    }

    if defaults.quantum == 0 || defaults.quantum > limits.max_quantum {
        errors.push(ValidationError::new(
            "defaults.quantum",
            format!("must be in [1, {}]", limits.max_quantum),
        ));
    }

    if defaults.frame_count == 0 || defaults.frame_count > limits.max_frames {
        errors.push(ValidationError::new(
            "defaults.frame_count",
            format!("must be in [1, {}]", limits.max_frames),
        ));
    }

    if !(limits.min_disk_size..=limits.max_disk_size).contains(&defaults.disk_size) {
        errors.push(ValidationError::new(
            "defaults.disk_size",
            format!(
                "must be in [{}, {}]",
                limits.min_disk_size, limits.max_disk_size
            ),
        ));
    }

    errors
}
