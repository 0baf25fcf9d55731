//! OS simulator configuration loading and validation.
//!
//! This crate provides:
//! - Typed Rust structs for config.json (input limits and defaults)
//! - Config resolution (CLI → env → XDG → defaults)
//! - Semantic validation

pub mod config;
pub mod resolve;
pub mod validate;

pub use config::{Defaults, Limits, SimulatorConfig};
pub use resolve::{resolve_config, ConfigError, ConfigPaths, ConfigSource, ResolvedConfig};
pub use validate::{validate_config, ValidationError};

/// Schema version for configuration files.
pub const CONFIG_SCHEMA_VERSION: &str = "1.0.0";
