//! Request shapes accepted at the simulation boundary.
//!
//! These mirror the JSON documents a presentation layer submits. Algorithm
//! names stay strings here so that an unknown name surfaces as a
//! configuration error rather than a deserialization failure.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::id::{Cylinder, PageNumber, Pid, Tick};
use crate::workload::{Direction, DiskWorkload, PageWorkload, Process};

/// One process row of a CPU request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ProcessInput {
    /// Process ID (>= 1, unique within the request).
    pub pid: u32,
    /// Arrival time (>= 0).
    #[serde(alias = "arrival_time")]
    pub arrival: Tick,
    /// Burst time (>= 1).
    #[serde(alias = "burst_time")]
    pub burst: Tick,
    /// Priority, 0 is the most urgent.
    #[serde(default)]
    pub priority: u32,
}

impl ProcessInput {
    pub fn to_process(&self) -> Process {
        Process {
            pid: Pid(self.pid),
            arrival: self.arrival,
            burst: self.burst,
            priority: self.priority,
        }
    }
}

/// CPU scheduling simulation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CpuRequest {
    /// One of FCFS, SJF, SRTF, Priority, RoundRobin.
    pub algorithm: String,
    pub processes: Vec<ProcessInput>,
    /// Time slice for RoundRobin; ignored by other policies.
    #[serde(default, alias = "time_quantum", skip_serializing_if = "Option::is_none")]
    pub quantum: Option<Tick>,
}

impl CpuRequest {
    pub fn processes(&self) -> Vec<Process> {
        self.processes.iter().map(ProcessInput::to_process).collect()
    }
}

/// Page replacement simulation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PageRequest {
    /// One of FIFO, LRU, Optimal, LFU.
    pub algorithm: String,
    /// Page reference string.
    pub page_sequence: Vec<PageNumber>,
    /// Number of physical frames (>= 1).
    pub frame_count: usize,
}

impl PageRequest {
    pub fn workload(&self) -> PageWorkload {
        PageWorkload {
            references: self.page_sequence.clone(),
            frame_count: self.frame_count,
        }
    }
}

/// Disk scheduling simulation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DiskRequest {
    /// One of FCFS, SSTF, SCAN, C-SCAN, LOOK, C-LOOK.
    pub algorithm: String,
    /// Cylinder requests in arrival order.
    pub request_queue: Vec<Cylinder>,
    pub initial_head: Cylinder,
    /// Total cylinders; the configured default applies when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disk_size: Option<Cylinder>,
    /// Initial sweep direction for SCAN, C-SCAN, LOOK and C-LOOK.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<Direction>,
}

impl DiskRequest {
    /// Resolve optional fields against the configured defaults.
    pub fn workload(&self, default_disk_size: Cylinder, default_direction: Direction) -> DiskWorkload {
        DiskWorkload {
            requests: self.request_queue.clone(),
            initial_head: self.initial_head,
            disk_size: self.disk_size.unwrap_or(default_disk_size),
            direction: self.direction.unwrap_or(default_direction),
        }
    }
}
