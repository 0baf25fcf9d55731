//! Shortest Remaining Time First.
//!
//! The ready set is a min-heap keyed `(remaining, pid)`. Between arrivals the
//! head of the heap only becomes more preferred as it runs, so instead of
//! stepping one tick at a time the head runs until it finishes or the next
//! process arrives, whichever comes first. The resulting trace is identical
//! to the tick-by-tick simulation.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use osim_common::{Pid, Process, Tick};
use tracing::trace;

use super::{jobs_by_arrival, Completed, ProcessRecord, Timeline};

pub(super) fn shortest_remaining_time_first(
    processes: &[Process],
) -> (Vec<ProcessRecord>, Timeline) {
    let mut jobs = jobs_by_arrival(processes);
    let mut done = Completed::new(jobs.len());
    let mut timeline = Timeline::new();
    let mut ready: BinaryHeap<Reverse<(Tick, Pid, usize)>> = BinaryHeap::new();
    let mut next_arrival = 0;
    let mut now: Tick = 0;

    while !ready.is_empty() || next_arrival < jobs.len() {
        while next_arrival < jobs.len() && jobs[next_arrival].process.arrival <= now {
            let job = &jobs[next_arrival];
            ready.push(Reverse((job.remaining, job.process.pid, next_arrival)));
            next_arrival += 1;
        }

        let Some(Reverse((_, pid, slot))) = ready.pop() else {
            now = jobs[next_arrival].process.arrival;
            continue;
        };

        // Every arrival at or before `now` is admitted, so the horizon is
        // strictly in the future.
        let horizon = jobs.get(next_arrival).map(|j| j.process.arrival);
        let job = &mut jobs[slot];
        job.dispatch(now);
        let run = match horizon {
            Some(at) => job.remaining.min(at - now),
            None => job.remaining,
        };

        timeline.push(pid, now, now + run);
        now += run;
        job.remaining -= run;

        if job.remaining == 0 {
            trace!(%pid, finish = now, "complete");
            done.insert(slot, job.complete(now));
        } else {
            trace!(%pid, at = now, remaining = job.remaining, "requeue");
            ready.push(Reverse((job.remaining, pid, slot)));
        }
    }

    (done.into_records(), timeline)
}
