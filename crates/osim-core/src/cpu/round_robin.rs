//! Round-Robin with a fixed quantum.

use std::collections::VecDeque;

use osim_common::{Process, Tick};
use tracing::trace;

use super::{jobs_by_arrival, Completed, Job, ProcessRecord, Timeline};

pub(super) fn round_robin(processes: &[Process], quantum: Tick) -> (Vec<ProcessRecord>, Timeline) {
    let mut jobs = jobs_by_arrival(processes);
    let mut done = Completed::new(jobs.len());
    let mut timeline = Timeline::new();
    let mut queue: VecDeque<usize> = VecDeque::with_capacity(jobs.len());
    let mut next_arrival = 0;
    let mut now: Tick = 0;

    loop {
        admit(&jobs, &mut next_arrival, now, &mut queue);

        let Some(slot) = queue.pop_front() else {
            match jobs.get(next_arrival) {
                Some(job) => {
                    now = job.process.arrival;
                    continue;
                }
                None => break,
            }
        };

        let job = &mut jobs[slot];
        job.dispatch(now);
        let run = job.remaining.min(quantum);
        let pid = job.process.pid;
        timeline.push(pid, now, now + run);
        now += run;
        job.remaining -= run;

        if job.remaining == 0 {
            trace!(%pid, finish = now, "complete");
            done.insert(slot, job.complete(now));
        } else {
            // A process joins the queue at its arrival time, so one arriving
            // during the slice, or exactly as the quantum expires, is already
            // queued when the preempted process is appended to the back.
            admit(&jobs, &mut next_arrival, now, &mut queue);
            trace!(%pid, at = now, remaining = jobs[slot].remaining, "quantum expired");
            queue.push_back(slot);
        }
    }

    (done.into_records(), timeline)
}

/// Enqueue every job that has arrived by `now`, in arrival order.
fn admit(jobs: &[Job], next_arrival: &mut usize, now: Tick, queue: &mut VecDeque<usize>) {
    while let Some(job) = jobs.get(*next_arrival) {
        if job.process.arrival > now {
            break;
        }
        queue.push_back(*next_arrival);
        *next_arrival += 1;
    }
}
