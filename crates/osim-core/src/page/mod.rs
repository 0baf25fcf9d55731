//! Page replacement engine.
//!
//! Walks a reference string against a fixed-size frame table. A reference
//! to a resident page is a hit and never evicts; a miss fills the lowest
//! free slot, or replaces the slot chosen by the policy once memory is full.

mod replacer;

use osim_common::{PageAlgorithm, PageNumber, PageWorkload};
use serde::Serialize;
use tracing::{debug, trace};

use replacer::{replacer_for, PageEvent};

/// Outcome of a single reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PageStatus {
    Hit,
    Fault,
}

impl PageStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            PageStatus::Hit => "HIT",
            PageStatus::Fault => "FAULT",
        }
    }
}

/// Frame table snapshot after one reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageStep {
    /// 1-based position in the reference string.
    pub step: usize,
    pub page: PageNumber,
    /// Resident page per slot; `None` for an unoccupied frame. Length is
    /// always the configured frame count.
    pub frame_state: Vec<Option<PageNumber>>,
    pub status: PageStatus,
    /// Page displaced by this reference, if any.
    pub evicted: Option<PageNumber>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageTrace {
    pub algorithm: PageAlgorithm,
    pub frame_count: usize,
    pub steps: Vec<PageStep>,
    pub faults: usize,
}

impl PageTrace {
    pub fn total_references(&self) -> usize {
        self.steps.len()
    }

    pub fn hits(&self) -> usize {
        self.total_references() - self.faults
    }
}

/// Run `algorithm` over the workload's reference string.
pub fn simulate(workload: &PageWorkload, algorithm: PageAlgorithm) -> PageTrace {
    let references = &workload.references;
    let frame_count = workload.frame_count;
    let mut frames: Vec<Option<PageNumber>> = vec![None; frame_count];
    let mut replacer = replacer_for(algorithm, references, frame_count);
    let mut steps = Vec::with_capacity(references.len());
    let mut faults = 0;

    for (step, &page) in references.iter().enumerate() {
        let mut evicted = None;
        let status = if let Some(slot) = frames.iter().position(|f| *f == Some(page)) {
            replacer.page_event(PageEvent::Hit { slot, step });
            PageStatus::Hit
        } else {
            faults += 1;
            let free = frames.iter().position(Option::is_none);
            let slot = match free {
                Some(slot) => Some(slot),
                None if frame_count > 0 => Some(replacer.pick_victim()),
                None => None,
            };
            if let Some(slot) = slot {
                evicted = frames[slot].replace(page);
                replacer.page_event(PageEvent::Loaded { slot, step });
                if let Some(victim) = evicted {
                    trace!(step, page, victim, slot, "evict");
                }
            }
            PageStatus::Fault
        };

        steps.push(PageStep {
            step: step + 1,
            page,
            frame_state: frames.clone(),
            status,
            evicted,
        });
    }

    debug!(
        %algorithm,
        references = references.len(),
        frame_count,
        faults,
        "page trace complete"
    );
    PageTrace {
        algorithm,
        frame_count,
        steps,
        faults,
    }
}
