//! CPU scheduling engine.
//!
//! Five policies share one calling contract: an immutable process set goes
//! in, a [`CpuSchedule`] (per-process completion records plus the execution
//! timeline) comes out. Run state such as remaining burst lives in private
//! [`Job`] copies so the caller's workload is never touched.

mod nonpreemptive;
mod round_robin;
mod srtf;
mod timeline;

use osim_common::{CpuAlgorithm, Error, Pid, Process, Result, Tick};
use serde::Serialize;
use std::num::NonZeroU64;
use tracing::debug;

pub use timeline::{Timeline, TimelineEvent};

/// A policy together with the parameters it needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CpuPolicy {
    Fcfs,
    Sjf,
    Srtf,
    Priority,
    RoundRobin { quantum: NonZeroU64 },
}

impl CpuPolicy {
    /// Bind an algorithm to its parameters.
    ///
    /// Round-Robin without a positive quantum is a configuration error; the
    /// quantum is ignored by every other policy.
    pub fn new(algorithm: CpuAlgorithm, quantum: Option<Tick>) -> Result<Self> {
        Ok(match algorithm {
            CpuAlgorithm::Fcfs => CpuPolicy::Fcfs,
            CpuAlgorithm::Sjf => CpuPolicy::Sjf,
            CpuAlgorithm::Srtf => CpuPolicy::Srtf,
            CpuAlgorithm::Priority => CpuPolicy::Priority,
            CpuAlgorithm::RoundRobin => {
                let quantum = quantum.and_then(NonZeroU64::new).ok_or_else(|| {
                    Error::MissingParameter {
                        algorithm: algorithm.to_string(),
                        parameter: "quantum".to_string(),
                    }
                })?;
                CpuPolicy::RoundRobin { quantum }
            }
        })
    }

    pub fn algorithm(self) -> CpuAlgorithm {
        match self {
            CpuPolicy::Fcfs => CpuAlgorithm::Fcfs,
            CpuPolicy::Sjf => CpuAlgorithm::Sjf,
            CpuPolicy::Srtf => CpuAlgorithm::Srtf,
            CpuPolicy::Priority => CpuAlgorithm::Priority,
            CpuPolicy::RoundRobin { .. } => CpuAlgorithm::RoundRobin,
        }
    }
}

/// Completion record for one process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProcessRecord {
    pub pid: Pid,
    pub arrival: Tick,
    pub burst: Tick,
    pub priority: u32,
    /// Time of first dispatch.
    pub start: Tick,
    /// Time the last unit of burst completed.
    pub finish: Tick,
}

impl ProcessRecord {
    pub fn turnaround(&self) -> Tick {
        self.finish - self.arrival
    }

    pub fn waiting(&self) -> Tick {
        self.turnaround() - self.burst
    }

    pub fn response(&self) -> Tick {
        self.start - self.arrival
    }
}

/// Result of running one policy over a process set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CpuSchedule {
    pub algorithm: CpuAlgorithm,
    /// One record per process, in arrival order (ties keep input order).
    pub processes: Vec<ProcessRecord>,
    pub timeline: Vec<TimelineEvent>,
}

impl CpuSchedule {
    /// End of the last timeline event, 0 for an empty schedule.
    pub fn makespan(&self) -> Tick {
        self.timeline.last().map_or(0, |e| e.end)
    }
}

/// Per-run mutable state for one process.
#[derive(Debug, Clone)]
pub(crate) struct Job {
    pub process: Process,
    pub remaining: Tick,
    pub start: Option<Tick>,
}

impl Job {
    fn new(process: Process) -> Self {
        Job {
            process,
            remaining: process.burst,
            start: None,
        }
    }

    /// Record the first dispatch; later dispatches keep the original start.
    pub fn dispatch(&mut self, now: Tick) {
        self.start.get_or_insert(now);
    }

    /// Build the completion record once `remaining` has reached zero.
    pub fn complete(&self, now: Tick) -> ProcessRecord {
        debug_assert_eq!(self.remaining, 0, "{} completed with work left", self.process.pid);
        debug_assert!(self.start.is_some(), "{} completed without dispatch", self.process.pid);
        ProcessRecord {
            pid: self.process.pid,
            arrival: self.process.arrival,
            burst: self.process.burst,
            priority: self.process.priority,
            start: self.start.unwrap_or(now),
            finish: now,
        }
    }
}

/// Copy the workload into jobs sorted by arrival; the sort is stable so
/// processes arriving together keep their input order.
pub(crate) fn jobs_by_arrival(processes: &[Process]) -> Vec<Job> {
    let mut jobs: Vec<Job> = processes.iter().copied().map(Job::new).collect();
    jobs.sort_by_key(|job| job.process.arrival);
    jobs
}

/// Collects completion records indexed by job slot.
pub(crate) struct Completed {
    records: Vec<Option<ProcessRecord>>,
}

impl Completed {
    pub fn new(len: usize) -> Self {
        Completed {
            records: vec![None; len],
        }
    }

    pub fn insert(&mut self, slot: usize, record: ProcessRecord) {
        debug_assert!(self.records[slot].is_none(), "{} finished twice", record.pid);
        self.records[slot] = Some(record);
    }

    pub fn into_records(self) -> Vec<ProcessRecord> {
        self.records.into_iter().flatten().collect()
    }
}

/// Latest tick any schedule of `processes` can reach: the last arrival
/// plus the sum of all bursts. `None` when that does not fit in a [`Tick`].
///
/// Every policy is work-conserving, so the makespan never exceeds this.
pub fn horizon(processes: &[Process]) -> Option<Tick> {
    let last_arrival = processes.iter().map(|p| p.arrival).max().unwrap_or(0);
    processes
        .iter()
        .try_fold(last_arrival, |tick, p| tick.checked_add(p.burst))
}

/// [`schedule`] for workloads that have not been bounded by a tick limit.
///
/// Fails with [`Error::Simulation`] when the timeline would run past
/// `Tick::MAX`.
pub fn try_schedule(processes: &[Process], policy: CpuPolicy) -> Result<CpuSchedule> {
    if horizon(processes).is_none() {
        return Err(Error::Simulation(format!(
            "{} timeline overflows: last arrival plus total burst exceeds {}",
            policy.algorithm(),
            Tick::MAX
        )));
    }
    Ok(schedule(processes, policy))
}

/// Run `policy` over `processes`.
///
/// The input is assumed validated (unique pids, burst >= 1, a [`horizon`]
/// that fits in a [`Tick`]); every policy terminates because each dispatch
/// consumes at least one unit of burst.
pub fn schedule(processes: &[Process], policy: CpuPolicy) -> CpuSchedule {
    let (records, timeline) = match policy {
        CpuPolicy::Fcfs => nonpreemptive::fcfs(processes),
        CpuPolicy::Sjf => nonpreemptive::shortest_job_first(processes),
        CpuPolicy::Priority => nonpreemptive::priority(processes),
        CpuPolicy::Srtf => srtf::shortest_remaining_time_first(processes),
        CpuPolicy::RoundRobin { quantum } => round_robin::round_robin(processes, quantum.get()),
    };

    let schedule = CpuSchedule {
        algorithm: policy.algorithm(),
        processes: records,
        timeline: timeline.into_events(),
    };
    debug!(
        algorithm = %schedule.algorithm,
        processes = schedule.processes.len(),
        events = schedule.timeline.len(),
        makespan = schedule.makespan(),
        "cpu schedule complete"
    );
    schedule
}

#[cfg(test)]
mod tests {
    use super::*;

    pub(super) fn scenario_a() -> Vec<Process> {
        vec![
            Process::new(1, 0, 5, 0),
            Process::new(2, 1, 3, 0),
            Process::new(3, 2, 8, 0),
        ]
    }

    fn record(schedule: &CpuSchedule, pid: u32) -> ProcessRecord {
        *schedule
            .processes
            .iter()
            .find(|r| r.pid == Pid(pid))
            .unwrap()
    }

    #[test]
    fn round_robin_requires_quantum() {
        let err = CpuPolicy::new(CpuAlgorithm::RoundRobin, None).unwrap_err();
        assert!(err.is_config());
        let err = CpuPolicy::new(CpuAlgorithm::RoundRobin, Some(0)).unwrap_err();
        assert!(err.is_config());
        assert_eq!(
            CpuPolicy::new(CpuAlgorithm::RoundRobin, Some(3)).unwrap(),
            CpuPolicy::RoundRobin {
                quantum: NonZeroU64::new(3).unwrap()
            }
        );
    }

    #[test]
    fn quantum_ignored_for_other_policies() {
        assert_eq!(
            CpuPolicy::new(CpuAlgorithm::Sjf, Some(4)).unwrap(),
            CpuPolicy::Sjf
        );
    }

    #[test]
    fn derived_times() {
        let schedule = schedule(&scenario_a(), CpuPolicy::Fcfs);
        let p2 = record(&schedule, 2);
        assert_eq!(p2.turnaround(), 7);
        assert_eq!(p2.waiting(), 4);
        assert_eq!(p2.response(), 4);
        assert_eq!(schedule.makespan(), 16);
    }

    #[test]
    fn input_is_not_mutated() {
        let processes = scenario_a();
        let before = processes.clone();
        let _ = schedule(&processes, CpuPolicy::Srtf);
        assert_eq!(processes, before);
    }

    #[test]
    fn every_policy_completes_every_process_once() {
        let processes = vec![
            Process::new(4, 3, 2, 1),
            Process::new(1, 0, 7, 3),
            Process::new(2, 0, 4, 0),
            Process::new(3, 9, 1, 2),
        ];
        for algorithm in CpuAlgorithm::ALL {
            let policy = CpuPolicy::new(algorithm, Some(2)).unwrap();
            let schedule = schedule(&processes, policy);
            assert_eq!(schedule.processes.len(), processes.len(), "{algorithm}");

            let total: Tick = schedule.timeline.iter().map(|e| e.duration()).sum();
            assert_eq!(total, 14, "{algorithm}: timeline must cover every burst");

            for r in &schedule.processes {
                let ran: Tick = schedule
                    .timeline
                    .iter()
                    .filter(|e| e.pid == r.pid)
                    .map(|e| e.duration())
                    .sum();
                assert_eq!(ran, r.burst, "{algorithm}: {}", r.pid);
                assert!(r.turnaround() >= r.burst);
            }
        }
    }

    #[test]
    fn single_process_arriving_late() {
        let processes = vec![Process::new(1, 5, 3, 0)];
        for algorithm in CpuAlgorithm::ALL {
            let policy = CpuPolicy::new(algorithm, Some(1)).unwrap();
            let schedule = schedule(&processes, policy);
            let r = schedule.processes[0];
            assert_eq!((r.start, r.finish), (5, 8), "{algorithm}");
            assert_eq!(
                schedule.timeline,
                vec![TimelineEvent {
                    pid: Pid(1),
                    start: 5,
                    end: 8
                }],
                "{algorithm}"
            );
        }
    }

    #[test]
    fn empty_workload() {
        for algorithm in CpuAlgorithm::ALL {
            let policy = CpuPolicy::new(algorithm, Some(2)).unwrap();
            let schedule = schedule(&[], policy);
            assert!(schedule.processes.is_empty());
            assert!(schedule.timeline.is_empty());
            assert_eq!(schedule.makespan(), 0);
        }
    }
}
