//! Static descriptions of every supported algorithm.

use osim_common::{CpuAlgorithm, DiskAlgorithm, Engine, PageAlgorithm};
use serde::Serialize;

/// One catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AlgorithmInfo {
    pub engine: Engine,
    /// Canonical name accepted by the engine.
    pub id: &'static str,
    pub name: &'static str,
    pub preemptive: bool,
    pub description: &'static str,
    pub complexity: &'static str,
    /// Extra request parameters the policy needs.
    #[serde(skip_serializing_if = "no_parameters")]
    pub parameters: &'static [&'static str],
    pub advantages: &'static [&'static str],
    pub disadvantages: &'static [&'static str],
}

fn no_parameters(parameters: &&'static [&'static str]) -> bool {
    parameters.is_empty()
}

pub fn cpu_info(algorithm: CpuAlgorithm) -> AlgorithmInfo {
    let (name, description, complexity, advantages, disadvantages): (
        _,
        _,
        _,
        &'static [&'static str],
        &'static [&'static str],
    ) = match algorithm {
        CpuAlgorithm::Fcfs => (
            "First Come First Serve",
            "Runs processes to completion in arrival order",
            "O(n log n)",
            &["Simple", "No starvation"],
            &["High average waiting time", "Convoy effect"],
        ),
        CpuAlgorithm::Sjf => (
            "Shortest Job First",
            "Runs the shortest arrived burst to completion",
            "O(n²)",
            &["Minimum average waiting time among non-preemptive policies"],
            &["Long jobs can starve", "Needs burst times in advance"],
        ),
        CpuAlgorithm::Srtf => (
            "Shortest Remaining Time First",
            "Preemptive SJF: the smallest remaining burst always runs",
            "O(n log n)",
            &["Optimal average waiting time"],
            &["Frequent context switches", "Long jobs can starve"],
        ),
        CpuAlgorithm::Priority => (
            "Priority Scheduling",
            "Runs the most urgent arrived process (lowest number) to completion",
            "O(n²)",
            &["Urgent work runs first"],
            &["Low-priority processes can starve"],
        ),
        CpuAlgorithm::RoundRobin => (
            "Round Robin",
            "Cycles through a FIFO ready queue one quantum at a time",
            "O(total burst / quantum)",
            &["Fair sharing", "Good response time"],
            &["Context switch overhead", "Sensitive to quantum size"],
        ),
    };
    AlgorithmInfo {
        engine: Engine::Cpu,
        id: algorithm.as_str(),
        name,
        preemptive: algorithm.is_preemptive(),
        description,
        complexity,
        parameters: if algorithm.requires_quantum() {
            &["quantum"]
        } else {
            &[]
        },
        advantages,
        disadvantages,
    }
}

pub fn page_info(algorithm: PageAlgorithm) -> AlgorithmInfo {
    let (name, description, complexity, advantages, disadvantages): (
        _,
        _,
        _,
        &'static [&'static str],
        &'static [&'static str],
    ) = match algorithm {
        PageAlgorithm::Fifo => (
            "First In First Out",
            "Evicts the page that has been resident longest",
            "O(frames) per reference",
            &["Simple"],
            &["Belady's anomaly", "Ignores usage"],
        ),
        PageAlgorithm::Lru => (
            "Least Recently Used",
            "Evicts the page whose last reference is oldest",
            "O(frames) per reference",
            &["Tracks recency", "No Belady's anomaly"],
            &["Bookkeeping on every reference"],
        ),
        PageAlgorithm::Optimal => (
            "Optimal (Belady)",
            "Evicts the page whose next reference is farthest away",
            "O(frames) per reference after O(n) lookahead",
            &["Fewest possible faults"],
            &["Needs the future reference string"],
        ),
        PageAlgorithm::Lfu => (
            "Least Frequently Used",
            "Evicts the page referenced least often since it was loaded",
            "O(frames) per reference",
            &["Keeps heavily used pages"],
            &["Slow to adapt when the working set shifts"],
        ),
    };
    AlgorithmInfo {
        engine: Engine::Page,
        id: algorithm.as_str(),
        name,
        preemptive: false,
        description,
        complexity,
        parameters: &[],
        advantages,
        disadvantages,
    }
}

pub fn disk_info(algorithm: DiskAlgorithm) -> AlgorithmInfo {
    let (name, description, advantages, disadvantages): (
        _,
        _,
        &'static [&'static str],
        &'static [&'static str],
    ) = match algorithm {
        DiskAlgorithm::Fcfs => (
            "First Come First Serve",
            "Services requests in arrival order",
            &["Fair", "No starvation"],
            &["Large total seek"],
        ),
        DiskAlgorithm::Sstf => (
            "Shortest Seek Time First",
            "Services the closest pending request next",
            &["Low total seek"],
            &["Distant requests can starve"],
        ),
        DiskAlgorithm::Scan => (
            "SCAN (Elevator)",
            "Sweeps toward one end, then reverses",
            &["Predictable", "Bounded wait"],
            &["Requests just behind the head wait a full sweep"],
        ),
        DiskAlgorithm::CScan => (
            "Circular SCAN",
            "Sweeps one way, then wraps to the far end and continues",
            &["More uniform wait than SCAN"],
            &["Long return jump"],
        ),
        DiskAlgorithm::Look => (
            "LOOK",
            "Like SCAN, but turns at the last request instead of the disk end",
            &["No travel past the outermost request"],
            &["Slightly more bookkeeping than SCAN"],
        ),
        DiskAlgorithm::CLook => (
            "Circular LOOK",
            "Like C-SCAN, but bounded by the outermost requests",
            &["Most uniform wait"],
            &["Long return jump"],
        ),
    };
    AlgorithmInfo {
        engine: Engine::Disk,
        id: algorithm.as_str(),
        name,
        preemptive: false,
        description,
        complexity: if algorithm == DiskAlgorithm::Sstf {
            "O(n²)"
        } else {
            "O(n log n)"
        },
        parameters: if algorithm.is_directional() {
            &["direction"]
        } else {
            &[]
        },
        advantages,
        disadvantages,
    }
}

/// Every algorithm of `engine`, in canonical order.
pub fn algorithms(engine: Engine) -> Vec<AlgorithmInfo> {
    match engine {
        Engine::Cpu => CpuAlgorithm::ALL.into_iter().map(cpu_info).collect(),
        Engine::Page => PageAlgorithm::ALL.into_iter().map(page_info).collect(),
        Engine::Disk => DiskAlgorithm::ALL.into_iter().map(disk_info).collect(),
    }
}

/// The whole catalog, or one engine's part of it.
pub fn catalog(engine: Option<Engine>) -> Vec<AlgorithmInfo> {
    match engine {
        Some(engine) => algorithms(engine),
        None => Engine::ALL.into_iter().flat_map(algorithms).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_covers_every_algorithm() {
        assert_eq!(catalog(None).len(), 15);
        assert_eq!(catalog(Some(Engine::Disk)).len(), 6);
    }

    #[test]
    fn ids_parse_back() {
        for info in catalog(Some(Engine::Cpu)) {
            assert!(info.id.parse::<CpuAlgorithm>().is_ok(), "{}", info.id);
        }
        for info in catalog(Some(Engine::Page)) {
            assert!(info.id.parse::<PageAlgorithm>().is_ok(), "{}", info.id);
        }
        for info in catalog(Some(Engine::Disk)) {
            assert!(info.id.parse::<DiskAlgorithm>().is_ok(), "{}", info.id);
        }
    }

    #[test]
    fn parameters_listed() {
        assert_eq!(cpu_info(CpuAlgorithm::RoundRobin).parameters, &["quantum"]);
        assert!(cpu_info(CpuAlgorithm::Srtf).preemptive);
        assert_eq!(disk_info(DiskAlgorithm::CLook).parameters, &["direction"]);
        assert!(disk_info(DiskAlgorithm::Fcfs).parameters.is_empty());
    }

    #[test]
    fn serializes_without_empty_parameters() {
        let json = serde_json::to_value(page_info(PageAlgorithm::Lru)).unwrap();
        assert!(json.get("parameters").is_none());
        assert_eq!(json["id"], "LRU");
        assert_eq!(json["engine"], "page");
    }
}
