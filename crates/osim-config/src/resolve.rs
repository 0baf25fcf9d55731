//! Config resolution: CLI flag → environment → XDG config dir → defaults.

use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::config::SimulatorConfig;
use crate::validate::{validate_config, ValidationError};

/// Environment variable naming a config file.
pub const CONFIG_ENV_VAR: &str = "OSIM_CONFIG";

/// File name looked up under the XDG config directory.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Errors that can occur while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid configuration: {}", join(.0))]
    Invalid(Vec<ValidationError>),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl From<ConfigError> for osim_common::Error {
    fn from(err: ConfigError) -> Self {
        osim_common::Error::Config(err.to_string())
    }
}

/// Where the effective configuration came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfigSource {
    Cli,
    Env,
    Xdg,
    Defaults,
}

/// Candidate config file locations, highest precedence first.
#[derive(Debug, Clone, Default)]
pub struct ConfigPaths {
    pub cli: Option<PathBuf>,
    pub env: Option<PathBuf>,
    pub xdg: Option<PathBuf>,
}

impl ConfigPaths {
    /// Discover candidates from the process environment.
    pub fn discover(cli: Option<&Path>) -> Self {
        ConfigPaths {
            cli: cli.map(Path::to_path_buf),
            env: std::env::var_os(CONFIG_ENV_VAR)
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
            xdg: default_config_path(),
        }
    }

    /// The highest-precedence candidate that was specified at all.
    fn selected(&self) -> Option<(ConfigSource, &Path)> {
        if let Some(path) = &self.cli {
            return Some((ConfigSource::Cli, path));
        }
        if let Some(path) = &self.env {
            return Some((ConfigSource::Env, path));
        }
        self.xdg.as_deref().map(|path| (ConfigSource::Xdg, path))
    }
}

/// Path of the per-user config file, if the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("osim").join(CONFIG_FILE_NAME))
}

/// Effective configuration plus its provenance.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedConfig {
    pub config: SimulatorConfig,
    pub source: ConfigSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl ResolvedConfig {
    pub fn defaults() -> Self {
        ResolvedConfig {
            config: SimulatorConfig::default(),
            source: ConfigSource::Defaults,
            path: None,
        }
    }

    pub fn using_defaults(&self) -> bool {
        self.source == ConfigSource::Defaults
    }
}

/// Load and validate a config file.
pub fn load_config(path: &Path) -> Result<SimulatorConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config = SimulatorConfig::from_json(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    let errors = validate_config(&config);
    if !errors.is_empty() {
        return Err(ConfigError::Invalid(errors));
    }
    Ok(config)
}

/// Resolve the effective configuration.
///
/// Only the highest-precedence candidate is consulted. A candidate whose file
/// does not exist falls back to the built-in defaults; a file that exists but
/// fails to parse or validate is an error.
pub fn resolve_config(paths: &ConfigPaths) -> Result<ResolvedConfig, ConfigError> {
    let Some((source, path)) = paths.selected() else {
        return Ok(ResolvedConfig::defaults());
    };

    if !path.exists() {
        return Ok(ResolvedConfig::defaults());
    }

    Ok(ResolvedConfig {
        config: load_config(path)?,
        source,
        path: Some(path.to_path_buf()),
    })
}
