//! Victim selection policies.
//!
//! The engine owns the frame table and tells a replacer what happened to
//! each slot; the replacer keeps whatever per-slot bookkeeping its policy
//! needs and names a slot when all frames are full.

use std::cmp::Reverse;
use std::collections::HashMap;

use osim_common::{PageAlgorithm, PageNumber};

/// A frame table event reported by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PageEvent {
    /// The page resident in `slot` was referenced at `step`.
    Hit { slot: usize, step: usize },
    /// A page was loaded into `slot` at `step`.
    Loaded { slot: usize, step: usize },
}

pub(crate) trait PageReplacer {
    fn page_event(&mut self, event: PageEvent);

    /// Slot to evict. Only called when every frame is occupied.
    fn pick_victim(&self) -> usize;
}

/// Build the replacer for `algorithm`. Optimal needs the whole reference
/// string up front.
pub(crate) fn replacer_for(
    algorithm: PageAlgorithm,
    references: &[PageNumber],
    frame_count: usize,
) -> Box<dyn PageReplacer> {
    match algorithm {
        PageAlgorithm::Fifo => Box::new(Fifo::new(frame_count)),
        PageAlgorithm::Lru => Box::new(Lru::new(frame_count)),
        PageAlgorithm::Optimal => Box::new(Optimal::new(references, frame_count)),
        PageAlgorithm::Lfu => Box::new(Lfu::new(frame_count)),
    }
}

/// First slot holding the smallest value.
fn lowest(values: &[usize]) -> usize {
    values
        .iter()
        .enumerate()
        .min_by_key(|&(slot, &v)| (v, slot))
        .map_or(0, |(slot, _)| slot)
}

/// Evicts the page that was loaded earliest; hits do not reorder.
pub(crate) struct Fifo {
    loaded_at: Vec<usize>,
}

impl Fifo {
    pub fn new(frame_count: usize) -> Self {
        Fifo {
            loaded_at: vec![0; frame_count],
        }
    }
}

impl PageReplacer for Fifo {
    fn page_event(&mut self, event: PageEvent) {
        if let PageEvent::Loaded { slot, step } = event {
            self.loaded_at[slot] = step;
        }
    }

    fn pick_victim(&self) -> usize {
        lowest(&self.loaded_at)
    }
}

/// Evicts the page whose last reference is oldest.
pub(crate) struct Lru {
    last_use: Vec<usize>,
}

impl Lru {
    pub fn new(frame_count: usize) -> Self {
        Lru {
            last_use: vec![0; frame_count],
        }
    }
}

impl PageReplacer for Lru {
    fn page_event(&mut self, event: PageEvent) {
        let (PageEvent::Hit { slot, step } | PageEvent::Loaded { slot, step }) = event;
        self.last_use[slot] = step;
    }

    fn pick_victim(&self) -> usize {
        lowest(&self.last_use)
    }
}

/// Belady's policy: evicts the page referenced farthest in the future.
pub(crate) struct Optimal {
    /// For each step, the next step referencing the same page
    /// (`usize::MAX` if never).
    next_occurrence: Vec<usize>,
    next_use: Vec<usize>,
}

impl Optimal {
    pub fn new(references: &[PageNumber], frame_count: usize) -> Self {
        let mut next_occurrence = vec![usize::MAX; references.len()];
        let mut seen: HashMap<PageNumber, usize> = HashMap::new();
        for (step, page) in references.iter().enumerate().rev() {
            if let Some(next) = seen.insert(*page, step) {
                next_occurrence[step] = next;
            }
        }
        Optimal {
            next_occurrence,
            next_use: vec![usize::MAX; frame_count],
        }
    }
}

impl PageReplacer for Optimal {
    fn page_event(&mut self, event: PageEvent) {
        let (PageEvent::Hit { slot, step } | PageEvent::Loaded { slot, step }) = event;
        self.next_use[slot] = self.next_occurrence[step];
    }

    fn pick_victim(&self) -> usize {
        self.next_use
            .iter()
            .enumerate()
            .max_by_key(|&(slot, &next)| (next, Reverse(slot)))
            .map_or(0, |(slot, _)| slot)
    }
}

/// Evicts the page with the fewest references since it was loaded.
pub(crate) struct Lfu {
    count: Vec<usize>,
}

impl Lfu {
    pub fn new(frame_count: usize) -> Self {
        Lfu {
            count: vec![0; frame_count],
        }
    }
}

impl PageReplacer for Lfu {
    fn page_event(&mut self, event: PageEvent) {
        match event {
            PageEvent::Hit { slot, .. } => self.count[slot] += 1,
            PageEvent::Loaded { slot, .. } => self.count[slot] = 1,
        }
    }

    fn pick_victim(&self) -> usize {
        lowest(&self.count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fifo_ignores_hits() {
        let mut r = Fifo::new(2);
        r.page_event(PageEvent::Loaded { slot: 0, step: 0 });
        r.page_event(PageEvent::Loaded { slot: 1, step: 1 });
        r.page_event(PageEvent::Hit { slot: 0, step: 2 });
        assert_eq!(r.pick_victim(), 0);
    }

    #[test]
    fn lru_tracks_hits() {
        let mut r = Lru::new(2);
        r.page_event(PageEvent::Loaded { slot: 0, step: 0 });
        r.page_event(PageEvent::Loaded { slot: 1, step: 1 });
        r.page_event(PageEvent::Hit { slot: 0, step: 2 });
        assert_eq!(r.pick_victim(), 1);
    }

    #[test]
    fn optimal_next_occurrence_table() {
        let r = Optimal::new(&[7, 0, 7, 1, 0], 2);
        assert_eq!(r.next_occurrence, vec![2, 4, usize::MAX, usize::MAX, usize::MAX]);
    }

    #[test]
    fn optimal_never_used_again_ties_to_lowest_slot() {
        let mut r = Optimal::new(&[1, 2, 3, 4], 3);
        for step in 0..3 {
            r.page_event(PageEvent::Loaded { slot: step, step });
        }
        assert_eq!(r.pick_victim(), 0);
    }

    #[test]
    fn lfu_resets_on_load_and_ties_low() {
        let mut r = Lfu::new(3);
        r.page_event(PageEvent::Loaded { slot: 0, step: 0 });
        r.page_event(PageEvent::Loaded { slot: 1, step: 1 });
        r.page_event(PageEvent::Loaded { slot: 2, step: 2 });
        r.page_event(PageEvent::Hit { slot: 0, step: 3 });
        assert_eq!(r.pick_victim(), 1);

        r.page_event(PageEvent::Hit { slot: 0, step: 4 });
        r.page_event(PageEvent::Loaded { slot: 0, step: 5 });
        assert_eq!(r.pick_victim(), 0);
    }
}
