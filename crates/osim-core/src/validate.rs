//! Workload validation at the simulation boundary.
//!
//! Engines assume their input passed these checks. The first violation is
//! reported; nothing is clamped or repaired.

use std::collections::HashSet;

use osim_common::{CpuAlgorithm, DiskWorkload, Error, PageWorkload, Process, Result, Tick};
use osim_config::Limits;

use crate::cpu;

fn out_of_range(field: impl Into<String>, value: u64, min: u64, max: u64) -> Error {
    Error::OutOfRange {
        field: field.into(),
        value,
        min,
        max,
    }
}

fn within_limit(what: &str, count: usize, limit: usize) -> Result<()> {
    if count == 0 {
        return Err(Error::EmptyWorkload(what.to_string()));
    }
    if count > limit {
        return Err(Error::LimitExceeded {
            what: what.to_string(),
            count,
            limit,
        });
    }
    Ok(())
}

/// Non-empty, bounded in size, pids >= 1 and unique, bursts >= 1, and the
/// last arrival plus total burst within `limits.max_tick`.
pub fn validate_processes(processes: &[Process], limits: &Limits) -> Result<()> {
    within_limit("processes", processes.len(), limits.max_processes)?;

    let mut seen = HashSet::with_capacity(processes.len());
    for (i, p) in processes.iter().enumerate() {
        if p.pid.0 == 0 {
            return Err(out_of_range(
                format!("processes[{i}].pid"),
                0,
                1,
                u64::from(u32::MAX),
            ));
        }
        if p.burst == 0 {
            return Err(out_of_range(
                format!("processes[{i}].burst"),
                0,
                1,
                Tick::MAX,
            ));
        }
        if !seen.insert(p.pid) {
            return Err(Error::DuplicatePid { pid: p.pid.0 });
        }
    }

    let horizon = cpu::horizon(processes).unwrap_or(Tick::MAX);
    if horizon > limits.max_tick {
        return Err(out_of_range("horizon", horizon, 0, limits.max_tick));
    }
    Ok(())
}

/// A quantum is required, and bounded, only for Round-Robin.
pub fn validate_quantum(
    algorithm: CpuAlgorithm,
    quantum: Option<Tick>,
    limits: &Limits,
) -> Result<()> {
    if !algorithm.requires_quantum() {
        return Ok(());
    }
    let quantum = quantum.ok_or_else(|| Error::MissingParameter {
        algorithm: algorithm.to_string(),
        parameter: "quantum".to_string(),
    })?;
    if quantum == 0 || quantum > limits.max_quantum {
        return Err(out_of_range("quantum", quantum, 1, limits.max_quantum));
    }
    Ok(())
}

pub fn validate_page(workload: &PageWorkload, limits: &Limits) -> Result<()> {
    within_limit(
        "page_sequence",
        workload.references.len(),
        limits.max_references,
    )?;
    if workload.frame_count == 0 || workload.frame_count > limits.max_frames {
        return Err(out_of_range(
            "frame_count",
            workload.frame_count as u64,
            1,
            limits.max_frames as u64,
        ));
    }
    Ok(())
}

/// Disk size within limits; head and every request inside `[0, disk_size)`.
pub fn validate_disk(workload: &DiskWorkload, limits: &Limits) -> Result<()> {
    let size = workload.disk_size;
    if !(limits.min_disk_size..=limits.max_disk_size).contains(&size) {
        return Err(out_of_range(
            "disk_size",
            u64::from(size),
            u64::from(limits.min_disk_size),
            u64::from(limits.max_disk_size),
        ));
    }
    within_limit("request_queue", workload.requests.len(), limits.max_requests)?;

    let last = u64::from(size.saturating_sub(1));
    if workload.initial_head >= size {
        return Err(out_of_range(
            "initial_head",
            u64::from(workload.initial_head),
            0,
            last,
        ));
    }
    if let Some((i, &c)) = workload
        .requests
        .iter()
        .enumerate()
        .find(|&(_, &c)| c >= size)
    {
        return Err(out_of_range(format!("request_queue[{i}]"), u64::from(c), 0, last));
    }
    Ok(())
}
