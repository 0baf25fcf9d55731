//! Report assembly and text rendering.
//!
//! Reports are the serializable outputs of a simulation run. Metric values
//! are rounded here and nowhere else: two decimals for averages and
//! percentages, four for throughput. Empty frames are written as `-1`.

use osim_common::{
    CpuAlgorithm, Cylinder, Direction, DiskAlgorithm, PageAlgorithm, PageNumber, Pid, Tick,
    SCHEMA_VERSION,
};
use osim_math::{round2, round_to};
use serde::Serialize;

use crate::cpu::{CpuSchedule, ProcessRecord};
use crate::disk::{DiskTrace, SeekStep};
use crate::metrics::{CpuMetrics, DiskMetrics, PageMetrics};
use crate::page::{PageStatus, PageTrace};

/// Sentinel written for an unoccupied frame.
pub const EMPTY_FRAME: i64 = -1;

// ---------------------------------------------------------------------------
// Rounding
// ---------------------------------------------------------------------------

impl CpuMetrics {
    pub fn rounded(&self) -> Self {
        CpuMetrics {
            total_processes: self.total_processes,
            avg_waiting: round2(self.avg_waiting),
            avg_turnaround: round2(self.avg_turnaround),
            avg_response: round2(self.avg_response),
            cpu_utilization: round2(self.cpu_utilization),
            throughput: round_to(self.throughput, 4),
        }
    }
}

impl PageMetrics {
    pub fn rounded(&self) -> Self {
        PageMetrics {
            hit_ratio: round2(self.hit_ratio),
            fault_ratio: round2(self.fault_ratio),
            ..*self
        }
    }
}

impl DiskMetrics {
    pub fn rounded(&self) -> Self {
        DiskMetrics {
            avg_seek: round2(self.avg_seek),
            ..*self
        }
    }
}

// ---------------------------------------------------------------------------
// CPU
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessRow {
    pub pid: Pid,
    pub arrival: Tick,
    pub burst: Tick,
    pub priority: u32,
    pub start: Tick,
    pub finish: Tick,
    pub turnaround: Tick,
    pub waiting: Tick,
    pub response: Tick,
}

impl From<&ProcessRecord> for ProcessRow {
    fn from(r: &ProcessRecord) -> Self {
        ProcessRow {
            pid: r.pid,
            arrival: r.arrival,
            burst: r.burst,
            priority: r.priority,
            start: r.start,
            finish: r.finish,
            turnaround: r.turnaround(),
            waiting: r.waiting(),
            response: r.response(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineRow {
    pub pid: Pid,
    pub start: Tick,
    pub end: Tick,
    pub duration: Tick,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CpuReport {
    pub schema_version: &'static str,
    pub algorithm: CpuAlgorithm,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantum: Option<Tick>,
    pub metrics: CpuMetrics,
    pub processes: Vec<ProcessRow>,
    pub timeline: Vec<TimelineRow>,
}

impl CpuReport {
    pub fn new(schedule: &CpuSchedule, quantum: Option<Tick>) -> Self {
        CpuReport {
            schema_version: SCHEMA_VERSION,
            algorithm: schedule.algorithm,
            quantum: quantum.filter(|_| schedule.algorithm.requires_quantum()),
            metrics: CpuMetrics::from_schedule(schedule).rounded(),
            processes: schedule.processes.iter().map(ProcessRow::from).collect(),
            timeline: schedule
                .timeline
                .iter()
                .map(|e| TimelineRow {
                    pid: e.pid,
                    start: e.start,
                    end: e.end,
                    duration: e.duration(),
                })
                .collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Page
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageRow {
    pub step: usize,
    pub page: PageNumber,
    pub frame_state: Vec<i64>,
    pub status: PageStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evicted: Option<PageNumber>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageReport {
    pub schema_version: &'static str,
    pub algorithm: PageAlgorithm,
    pub metrics: PageMetrics,
    pub trace: Vec<PageRow>,
}

impl PageReport {
    pub fn new(trace: &PageTrace) -> Self {
        PageReport {
            schema_version: SCHEMA_VERSION,
            algorithm: trace.algorithm,
            metrics: PageMetrics::from_trace(trace).rounded(),
            trace: trace
                .steps
                .iter()
                .map(|s| PageRow {
                    step: s.step,
                    page: s.page,
                    frame_state: s
                        .frame_state
                        .iter()
                        .map(|f| f.map_or(EMPTY_FRAME, i64::from))
                        .collect(),
                    status: s.status,
                    evicted: s.evicted,
                })
                .collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Disk
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiskReport {
    pub schema_version: &'static str,
    pub algorithm: DiskAlgorithm,
    pub initial_head: Cylinder,
    pub disk_size: Cylinder,
    /// Present only for policies whose order depends on it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<Direction>,
    pub metrics: DiskMetrics,
    pub sequence: Vec<Cylinder>,
    pub trace: Vec<SeekStep>,
}

impl DiskReport {
    pub fn new(trace: &DiskTrace, disk_size: Cylinder, direction: Direction) -> Self {
        DiskReport {
            schema_version: SCHEMA_VERSION,
            algorithm: trace.algorithm,
            initial_head: trace.initial_head,
            disk_size,
            direction: Some(direction).filter(|_| trace.algorithm.is_directional()),
            metrics: DiskMetrics::from_trace(trace).rounded(),
            sequence: trace.sequence.clone(),
            trace: trace.steps.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Rendering to text
// ---------------------------------------------------------------------------

/// Render a CPU report as a process table, timeline and metric block.
pub fn render_cpu_summary(report: &CpuReport) -> String {
    let mut lines = Vec::new();
    let quantum = report
        .quantum
        .map(|q| format!(" (quantum {q})"))
        .unwrap_or_default();
    lines.push(format!("CPU scheduling: {}{}", report.algorithm, quantum));
    lines.push(String::new());
    lines.push(format!(
        "  {:>5} {:>7} {:>5} {:>8} {:>5} {:>6} {:>10} {:>7} {:>8}",
        "PID", "ARRIVAL", "BURST", "PRIORITY", "START", "FINISH", "TURNAROUND", "WAITING",
        "RESPONSE",
    ));
    for p in &report.processes {
        lines.push(format!(
            "  {:>5} {:>7} {:>5} {:>8} {:>5} {:>6} {:>10} {:>7} {:>8}",
            p.pid.to_string(),
            p.arrival,
            p.burst,
            p.priority,
            p.start,
            p.finish,
            p.turnaround,
            p.waiting,
            p.response,
        ));
    }

    lines.push(String::new());
    let timeline: Vec<String> = report
        .timeline
        .iter()
        .map(|e| format!("{}[{}-{}]", e.pid, e.start, e.end))
        .collect();
    lines.push(format!("  Timeline: {}", timeline.join(" ")));

    let m = &report.metrics;
    lines.push(String::new());
    lines.push(format!("  Average waiting:     {:.2}", m.avg_waiting));
    lines.push(format!("  Average turnaround:  {:.2}", m.avg_turnaround));
    lines.push(format!("  Average response:    {:.2}", m.avg_response));
    lines.push(format!("  CPU utilization:     {:.2}%", m.cpu_utilization));
    lines.push(format!("  Throughput:          {:.4}", m.throughput));
    lines.join("\n")
}

/// Render a page report as a per-reference frame table.
pub fn render_page_summary(report: &PageReport) -> String {
    let m = &report.metrics;
    let mut lines = Vec::new();
    lines.push(format!(
        "Page replacement: {} ({} frames)",
        report.algorithm, m.frames
    ));
    lines.push(String::new());
    for row in &report.trace {
        let frames: Vec<String> = row
            .frame_state
            .iter()
            .map(|&f| {
                if f == EMPTY_FRAME {
                    "-".to_string()
                } else {
                    f.to_string()
                }
            })
            .collect();
        let evicted = row
            .evicted
            .map(|p| format!("  (evicted {p})"))
            .unwrap_or_default();
        lines.push(format!(
            "  {:>3}  page {:>3}  [{}]  {}{}",
            row.step,
            row.page,
            frames.join(" "),
            row.status.as_str(),
            evicted,
        ));
    }
    lines.push(String::new());
    lines.push(format!(
        "  Faults: {}/{}  Hits: {}  Hit ratio: {:.2}%  Fault ratio: {:.2}%",
        m.page_faults, m.total_references, m.page_hits, m.hit_ratio, m.fault_ratio,
    ));
    lines.join("\n")
}

/// Render a disk report as a seek table.
pub fn render_disk_summary(report: &DiskReport) -> String {
    let m = &report.metrics;
    let mut lines = Vec::new();
    let direction = report
        .direction
        .map(|d| format!(", moving {d}"))
        .unwrap_or_default();
    lines.push(format!(
        "Disk scheduling: {} (head {}, {} cylinders{})",
        report.algorithm, report.initial_head, report.disk_size, direction
    ));
    lines.push(String::new());
    for s in &report.trace {
        lines.push(format!(
            "  {:>3}  {:>4} -> {:>4}  seek {:>4}  total {:>5}",
            s.step, s.from, s.to, s.seek, s.cumulative,
        ));
    }
    lines.push(String::new());
    lines.push(format!(
        "  Total seek: {}  Average: {:.2}  Max: {}  Min: {}  Requests: {}",
        m.total_seek, m.avg_seek, m.max_seek, m.min_seek, m.total_requests,
    ));
    lines.join("\n")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
