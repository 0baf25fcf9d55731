//! Disk head scheduling engine.
//!
//! Every policy is a pure reordering of the request queue. The seek trace is
//! then derived by walking that order from the initial head position.

mod order;

use osim_common::{Cylinder, DiskAlgorithm, DiskWorkload};
use serde::Serialize;
use tracing::{debug, trace};

/// One head movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeekStep {
    /// 1-based position in the service order.
    pub step: usize,
    pub from: Cylinder,
    pub to: Cylinder,
    pub seek: u64,
    /// Running total including this step.
    pub cumulative: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiskTrace {
    pub algorithm: DiskAlgorithm,
    pub initial_head: Cylinder,
    /// Cylinders in service order.
    pub sequence: Vec<Cylinder>,
    pub steps: Vec<SeekStep>,
}

impl DiskTrace {
    pub fn total_seek(&self) -> u64 {
        self.steps.last().map_or(0, |s| s.cumulative)
    }
}

/// Order in which `algorithm` services the workload's requests.
pub fn service_order(workload: &DiskWorkload, algorithm: DiskAlgorithm) -> Vec<Cylinder> {
    let requests = &workload.requests;
    let head = workload.initial_head;
    match algorithm {
        DiskAlgorithm::Fcfs => order::fcfs(requests),
        DiskAlgorithm::Sstf => order::shortest_seek_first(requests, head),
        DiskAlgorithm::Scan | DiskAlgorithm::Look => {
            order::sweep(requests, head, workload.direction)
        }
        DiskAlgorithm::CScan | DiskAlgorithm::CLook => {
            order::circular_sweep(requests, head, workload.direction)
        }
    }
}

/// Walk `sequence` from `initial_head`, recording each movement.
pub fn seek_steps(initial_head: Cylinder, sequence: &[Cylinder]) -> Vec<SeekStep> {
    let mut head = initial_head;
    let mut cumulative = 0;
    sequence
        .iter()
        .enumerate()
        .map(|(i, &to)| {
            let seek = u64::from(to.abs_diff(head));
            cumulative += seek;
            let step = SeekStep {
                step: i + 1,
                from: head,
                to,
                seek,
                cumulative,
            };
            trace!(from = head, to, seek, "head move");
            head = to;
            step
        })
        .collect()
}

/// Run `algorithm` over the workload.
pub fn simulate(workload: &DiskWorkload, algorithm: DiskAlgorithm) -> DiskTrace {
    let sequence = service_order(workload, algorithm);
    let steps = seek_steps(workload.initial_head, &sequence);
    let trace = DiskTrace {
        algorithm,
        initial_head: workload.initial_head,
        sequence,
        steps,
    };
    debug!(
        %algorithm,
        requests = trace.sequence.len(),
        direction = %workload.direction,
        total_seek = trace.total_seek(),
        "disk trace complete"
    );
    trace
}
