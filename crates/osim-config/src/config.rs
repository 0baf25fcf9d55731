//! Simulator configuration types.
//!
//! Limits bound the size of a workload before it reaches an engine; defaults
//! fill in request fields the caller left out.

use osim_common::{Cylinder, Direction, Tick};
use serde::{Deserialize, Serialize};

use crate::CONFIG_SCHEMA_VERSION;

/// Complete simulator configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    pub schema_version: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub limits: Limits,

    pub defaults: Defaults,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        SimulatorConfig {
            schema_version: CONFIG_SCHEMA_VERSION.to_string(),
            description: None,
            limits: Limits::default(),
            defaults: Defaults::default(),
        }
    }
}

impl SimulatorConfig {
    /// Parse a configuration document; absent fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Upper bounds on workload size, enforced before any engine runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Limits {
    pub max_processes: usize,
    pub max_quantum: Tick,
    pub max_references: usize,
    pub max_frames: usize,
    pub max_requests: usize,
    pub min_disk_size: Cylinder,
    pub max_disk_size: Cylinder,
    /// Bound on the last arrival plus the sum of all bursts, which caps
    /// every timestamp a CPU schedule can produce.
    pub max_tick: Tick,
}

impl Default for Limits {
    fn default() -> Self {
        Limits {
            max_processes: 20,
            max_quantum: 10,
            max_references: 100,
            max_frames: 10,
            max_requests: 50,
            min_disk_size: 50,
            max_disk_size: 500,
            max_tick: 1_000_000_000,
        }
    }
}

/// Values used when a request leaves a field out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    /// Round-Robin quantum used by comparison runs when none is given.
    pub quantum: Tick,
    pub disk_size: Cylinder,
    pub direction: Direction,
    pub frame_count: usize,
}

impl Default for Defaults {
    fn default() -> Self {
        Defaults {
            quantum: 2,
            disk_size: 200,
            direction: Direction::Right,
            frame_count: 3,
        }
    }
}
