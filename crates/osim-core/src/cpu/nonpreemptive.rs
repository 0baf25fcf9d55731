//! Run-to-completion policies: FCFS, SJF and Priority.
//!
//! All three share one loop and differ only in the selection key. Among the
//! processes that have arrived, the smallest `(key, arrival, slot)` wins,
//! where `slot` is the position in the arrival-sorted job list and therefore
//! encodes input order for simultaneous arrivals.

use osim_common::{Process, Tick};
use tracing::trace;

use super::{jobs_by_arrival, Completed, Job, ProcessRecord, Timeline};

pub(super) fn fcfs(processes: &[Process]) -> (Vec<ProcessRecord>, Timeline) {
    run_to_completion(processes, |_| 0)
}

pub(super) fn shortest_job_first(processes: &[Process]) -> (Vec<ProcessRecord>, Timeline) {
    run_to_completion(processes, |job| job.process.burst)
}

pub(super) fn priority(processes: &[Process]) -> (Vec<ProcessRecord>, Timeline) {
    run_to_completion(processes, |job| u64::from(job.process.priority))
}

fn run_to_completion<F>(processes: &[Process], key: F) -> (Vec<ProcessRecord>, Timeline)
where
    F: Fn(&Job) -> u64,
{
    let mut jobs = jobs_by_arrival(processes);
    let mut done = Completed::new(jobs.len());
    let mut timeline = Timeline::new();
    let mut pending: Vec<usize> = (0..jobs.len()).collect();
    let mut now: Tick = 0;

    while !pending.is_empty() {
        let ready = pending
            .iter()
            .enumerate()
            .filter(|&(_, &slot)| jobs[slot].process.arrival <= now)
            .min_by_key(|&(_, &slot)| (key(&jobs[slot]), jobs[slot].process.arrival, slot))
            .map(|(at, _)| at);

        let Some(at) = ready else {
            // Idle: `pending` stays arrival-sorted, so its head arrives next.
            now = jobs[pending[0]].process.arrival;
            continue;
        };

        let slot = pending.remove(at);
        let job = &mut jobs[slot];
        job.dispatch(now);
        let end = now + job.remaining;
        trace!(pid = %job.process.pid, start = now, end, "dispatch");
        timeline.push(job.process.pid, now, end);
        job.remaining = 0;
        now = end;
        done.insert(slot, job.complete(now));
    }

    (done.into_records(), timeline)
}
