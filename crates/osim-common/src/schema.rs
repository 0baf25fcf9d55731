//! Schema versioning and JSON schema export.

use crate::algorithm::Engine;
use crate::request::{CpuRequest, DiskRequest, PageRequest};

/// Current schema version for all JSON outputs.
///
/// Follows semver: MAJOR.MINOR.PATCH
/// - MAJOR: Breaking changes (field removals, type changes)
/// - MINOR: Additive changes (new optional fields)
/// - PATCH: Bug fixes, documentation
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Check if a schema version is compatible with current.
pub fn is_compatible(version: &str) -> bool {
    let current_major = SCHEMA_VERSION
        .split('.')
        .next()
        .and_then(|s| s.parse::<u32>().ok())
        .unwrap_or(0);

    let other_major = version
        .split('.')
        .next()
        .and_then(|s| s.parse::<u32>().ok())
        .unwrap_or(0);

    current_major == other_major
}

/// JSON schema of the request document accepted by an engine.
pub fn request_schema(engine: Engine) -> serde_json::Value {
    let schema = match engine {
        Engine::Cpu => schemars::schema_for!(CpuRequest),
        Engine::Page => schemars::schema_for!(PageRequest),
        Engine::Disk => schemars::schema_for!(DiskRequest),
    };
    serde_json::to_value(schema).unwrap_or(serde_json::Value::Null)
}
