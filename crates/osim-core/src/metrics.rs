//! Aggregate statistics derived from a completed trace.
//!
//! Values here keep full precision; rounding is applied only when a report
//! is assembled.

use osim_common::Tick;
use osim_math::{complementary_percentages, mean_u64, safe_ratio, Spread};
use serde::Serialize;

use crate::cpu::CpuSchedule;
use crate::disk::DiskTrace;
use crate::page::PageTrace;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CpuMetrics {
    pub total_processes: usize,
    pub avg_waiting: f64,
    pub avg_turnaround: f64,
    pub avg_response: f64,
    /// Busy time over the span from the earliest arrival to the makespan,
    /// as a percentage.
    pub cpu_utilization: f64,
    /// Completed processes per tick over the same span.
    pub throughput: f64,
}

impl CpuMetrics {
    pub fn from_schedule(schedule: &CpuSchedule) -> Self {
        let records = &schedule.processes;
        let earliest_arrival = records.iter().map(|r| r.arrival).min().unwrap_or(0);
        let span: Tick = schedule.makespan().saturating_sub(earliest_arrival);
        let busy: Tick = records.iter().map(|r| r.burst).sum();

        CpuMetrics {
            total_processes: records.len(),
            avg_waiting: mean_u64(records.iter().map(|r| r.waiting())),
            avg_turnaround: mean_u64(records.iter().map(|r| r.turnaround())),
            avg_response: mean_u64(records.iter().map(|r| r.response())),
            cpu_utilization: safe_ratio(busy as f64, span as f64) * 100.0,
            throughput: safe_ratio(records.len() as f64, span as f64),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PageMetrics {
    pub total_references: usize,
    pub page_faults: usize,
    pub page_hits: usize,
    pub hit_ratio: f64,
    pub fault_ratio: f64,
    pub frames: usize,
}

impl PageMetrics {
    pub fn from_trace(trace: &PageTrace) -> Self {
        let total = trace.total_references();
        let (hit_ratio, fault_ratio) =
            complementary_percentages(trace.hits() as u64, total as u64);
        PageMetrics {
            total_references: total,
            page_faults: trace.faults,
            page_hits: trace.hits(),
            hit_ratio,
            fault_ratio,
            frames: trace.frame_count,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DiskMetrics {
    pub total_seek: u64,
    pub avg_seek: f64,
    pub max_seek: u64,
    pub min_seek: u64,
    pub total_requests: usize,
}

impl DiskMetrics {
    pub fn from_trace(trace: &DiskTrace) -> Self {
        let spread = Spread::from_samples(trace.steps.iter().map(|s| s.seek));
        DiskMetrics {
            total_seek: spread.total,
            avg_seek: spread.mean(),
            max_seek: spread.max,
            min_seek: spread.min,
            total_requests: trace.sequence.len(),
        }
    }
}
