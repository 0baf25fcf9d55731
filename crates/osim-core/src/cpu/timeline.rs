use osim_common::{Pid, Tick};
use serde::Serialize;

/// A contiguous interval during which one process holds the processor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimelineEvent {
    pub pid: Pid,
    pub start: Tick,
    pub end: Tick,
}

impl TimelineEvent {
    pub fn duration(&self) -> Tick {
        self.end - self.start
    }
}

/// Append-only execution timeline.
///
/// Slices are pushed in time order. A slice that continues the previous
/// event (same pid, no gap) extends it instead of opening a new event, so
/// back-to-back quanta of one process and consecutive SRTF ticks collapse
/// into a single interval.
#[derive(Debug, Default)]
pub struct Timeline {
    events: Vec<TimelineEvent>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, pid: Pid, start: Tick, end: Tick) {
        debug_assert!(start < end, "empty slice for {pid}");
        if let Some(last) = self.events.last_mut() {
            debug_assert!(last.end <= start, "overlapping slice for {pid}");
            if last.pid == pid && last.end == start {
                last.end = end;
                return;
            }
        }
        self.events.push(TimelineEvent { pid, start, end });
    }

    pub fn into_events(self) -> Vec<TimelineEvent> {
        self.events
    }
}
