//! Workload value types consumed by the simulation engines.
//!
//! These are immutable inputs: engines copy whatever run state they need and
//! never mutate a caller's workload, so one workload can be replayed under
//! every policy for comparison.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::id::{Cylinder, PageNumber, Pid, Tick};

/// A schedulable unit for the CPU engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Process {
    pub pid: Pid,
    pub arrival: Tick,
    /// Total CPU time required.
    pub burst: Tick,
    /// Lower value is more urgent.
    pub priority: u32,
}

impl Process {
    pub fn new(pid: u32, arrival: Tick, burst: Tick, priority: u32) -> Self {
        Process {
            pid: Pid(pid),
            arrival,
            burst,
            priority,
        }
    }
}

/// A page reference string plus the number of physical frames.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageWorkload {
    pub references: Vec<PageNumber>,
    pub frame_count: usize,
}

/// Initial sweep direction of the disk head.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    JsonSchema,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Towards lower cylinders.
    Left,
    /// Towards higher cylinders.
    #[default]
    Right,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Left => f.write_str("left"),
            Direction::Right => f.write_str("right"),
        }
    }
}

/// A disk request queue with the head state at time zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiskWorkload {
    /// Cylinder requests in arrival order.
    pub requests: Vec<Cylinder>,
    pub initial_head: Cylinder,
    /// Total cylinders; valid positions are `0..disk_size`.
    pub disk_size: Cylinder,
    pub direction: Direction,
}
