//! Closed policy enumerations for each simulation engine.
//!
//! Requests carry algorithm names as strings; parsing them here is the single
//! place where an unknown name becomes a configuration error.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// The three simulation engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Engine {
    Cpu,
    Page,
    Disk,
}

impl Engine {
    pub const ALL: [Engine; 3] = [Engine::Cpu, Engine::Page, Engine::Disk];

    pub fn as_str(self) -> &'static str {
        match self {
            Engine::Cpu => "cpu",
            Engine::Page => "page",
            Engine::Disk => "disk",
        }
    }
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Folds case and separators so `round-robin`, `RoundRobin` and `ROUND_ROBIN`
/// all compare equal.
fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, '-' | '_' | ' '))
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

fn unknown(engine: Engine, name: &str) -> Error {
    Error::UnknownAlgorithm {
        engine: engine.to_string(),
        name: name.to_string(),
    }
}

/// CPU scheduling policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CpuAlgorithm {
    #[serde(rename = "FCFS")]
    Fcfs,
    #[serde(rename = "SJF")]
    Sjf,
    #[serde(rename = "SRTF")]
    Srtf,
    Priority,
    RoundRobin,
}

impl CpuAlgorithm {
    pub const ALL: [CpuAlgorithm; 5] = [
        CpuAlgorithm::Fcfs,
        CpuAlgorithm::Sjf,
        CpuAlgorithm::Srtf,
        CpuAlgorithm::Priority,
        CpuAlgorithm::RoundRobin,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CpuAlgorithm::Fcfs => "FCFS",
            CpuAlgorithm::Sjf => "SJF",
            CpuAlgorithm::Srtf => "SRTF",
            CpuAlgorithm::Priority => "Priority",
            CpuAlgorithm::RoundRobin => "RoundRobin",
        }
    }

    /// Whether a running process can lose the processor before it finishes.
    pub fn is_preemptive(self) -> bool {
        matches!(self, CpuAlgorithm::Srtf | CpuAlgorithm::RoundRobin)
    }

    /// Whether the policy needs a time quantum.
    pub fn requires_quantum(self) -> bool {
        self == CpuAlgorithm::RoundRobin
    }
}

impl FromStr for CpuAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "FCFS" => Ok(CpuAlgorithm::Fcfs),
            "SJF" => Ok(CpuAlgorithm::Sjf),
            "SRTF" => Ok(CpuAlgorithm::Srtf),
            "PRIORITY" => Ok(CpuAlgorithm::Priority),
            "ROUNDROBIN" | "RR" => Ok(CpuAlgorithm::RoundRobin),
            _ => Err(unknown(Engine::Cpu, s)),
        }
    }
}

impl fmt::Display for CpuAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Page replacement policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PageAlgorithm {
    #[serde(rename = "FIFO")]
    Fifo,
    #[serde(rename = "LRU")]
    Lru,
    Optimal,
    #[serde(rename = "LFU")]
    Lfu,
}

impl PageAlgorithm {
    pub const ALL: [PageAlgorithm; 4] = [
        PageAlgorithm::Fifo,
        PageAlgorithm::Lru,
        PageAlgorithm::Optimal,
        PageAlgorithm::Lfu,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PageAlgorithm::Fifo => "FIFO",
            PageAlgorithm::Lru => "LRU",
            PageAlgorithm::Optimal => "Optimal",
            PageAlgorithm::Lfu => "LFU",
        }
    }
}

impl FromStr for PageAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "FIFO" => Ok(PageAlgorithm::Fifo),
            "LRU" => Ok(PageAlgorithm::Lru),
            "OPTIMAL" | "OPT" | "MIN" => Ok(PageAlgorithm::Optimal),
            "LFU" => Ok(PageAlgorithm::Lfu),
            _ => Err(unknown(Engine::Page, s)),
        }
    }
}

impl fmt::Display for PageAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Disk head scheduling policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DiskAlgorithm {
    #[serde(rename = "FCFS")]
    Fcfs,
    #[serde(rename = "SSTF")]
    Sstf,
    #[serde(rename = "SCAN")]
    Scan,
    #[serde(rename = "C-SCAN")]
    CScan,
    #[serde(rename = "LOOK")]
    Look,
    #[serde(rename = "C-LOOK")]
    CLook,
}

impl DiskAlgorithm {
    pub const ALL: [DiskAlgorithm; 6] = [
        DiskAlgorithm::Fcfs,
        DiskAlgorithm::Sstf,
        DiskAlgorithm::Scan,
        DiskAlgorithm::CScan,
        DiskAlgorithm::Look,
        DiskAlgorithm::CLook,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DiskAlgorithm::Fcfs => "FCFS",
            DiskAlgorithm::Sstf => "SSTF",
            DiskAlgorithm::Scan => "SCAN",
            DiskAlgorithm::CScan => "C-SCAN",
            DiskAlgorithm::Look => "LOOK",
            DiskAlgorithm::CLook => "C-LOOK",
        }
    }

    /// Whether the sweep direction affects the service order.
    pub fn is_directional(self) -> bool {
        !matches!(self, DiskAlgorithm::Fcfs | DiskAlgorithm::Sstf)
    }

    /// Circular variants jump back to the far end instead of reversing.
    pub fn is_circular(self) -> bool {
        matches!(self, DiskAlgorithm::CScan | DiskAlgorithm::CLook)
    }
}

impl FromStr for DiskAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "FCFS" => Ok(DiskAlgorithm::Fcfs),
            "SSTF" => Ok(DiskAlgorithm::Sstf),
            "SCAN" | "ELEVATOR" => Ok(DiskAlgorithm::Scan),
            "CSCAN" => Ok(DiskAlgorithm::CScan),
            "LOOK" => Ok(DiskAlgorithm::Look),
            "CLOOK" => Ok(DiskAlgorithm::CLook),
            _ => Err(unknown(Engine::Disk, s)),
        }
    }
}

impl fmt::Display for DiskAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
