//! Property-based tests for engine and metric invariants.

use std::collections::{BTreeSet, HashMap};

use osim_common::{
    CpuAlgorithm, Direction, DiskAlgorithm, DiskWorkload, PageAlgorithm, PageWorkload, Pid,
    Process,
};
use osim_core::cpu::{schedule, CpuPolicy, CpuSchedule};
use osim_core::metrics::{CpuMetrics, DiskMetrics, PageMetrics};
use osim_core::{disk, page};
use proptest::prelude::*;

fn processes_strategy() -> impl Strategy<Value = Vec<Process>> {
    prop::collection::vec((0u64..30, 1u64..12, 0u32..5), 1..12).prop_map(|specs| {
        specs
            .into_iter()
            .enumerate()
            .map(|(i, (arrival, burst, priority))| {
                Process::new(i as u32 + 1, arrival, burst, priority)
            })
            .collect()
    })
}

fn policies() -> Vec<CpuPolicy> {
    let mut out: Vec<CpuPolicy> = [
        CpuAlgorithm::Fcfs,
        CpuAlgorithm::Sjf,
        CpuAlgorithm::Srtf,
        CpuAlgorithm::Priority,
    ]
    .into_iter()
    .map(|a| CpuPolicy::new(a, None).expect("non-quantum policy"))
    .collect();
    for q in [1, 3, 7] {
        out.push(CpuPolicy::new(CpuAlgorithm::RoundRobin, Some(q)).expect("valid quantum"));
    }
    out
}

fn total_waiting(schedule: &CpuSchedule) -> u64 {
    schedule.processes.iter().map(|r| r.waiting()).sum()
}

fn disk_strategy() -> impl Strategy<Value = DiskWorkload> {
    (
        prop::collection::vec(0u32..200, 1..20),
        0u32..200,
        prop_oneof![Just(Direction::Left), Just(Direction::Right)],
    )
        .prop_map(|(requests, initial_head, direction)| DiskWorkload {
            requests,
            initial_head,
            disk_size: 200,
            direction,
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    #[test]
    fn cpu_records_are_consistent(processes in processes_strategy()) {
        for policy in policies() {
            let schedule = schedule(&processes, policy);
            prop_assert_eq!(schedule.processes.len(), processes.len());

            for record in &schedule.processes {
                prop_assert!(record.start >= record.arrival);
                prop_assert!(record.finish >= record.start + record.burst);
                prop_assert_eq!(record.turnaround(), record.finish - record.arrival);
                prop_assert_eq!(record.waiting(), record.turnaround() - record.burst);
                prop_assert_eq!(record.response(), record.start - record.arrival);
            }
        }
    }

    #[test]
    fn cpu_timeline_covers_every_burst_once(processes in processes_strategy()) {
        let bursts: HashMap<Pid, u64> = processes.iter().map(|p| (p.pid, p.burst)).collect();

        for policy in policies() {
            let schedule = schedule(&processes, policy);
            let mut executed: HashMap<Pid, u64> = HashMap::new();
            let mut cursor = 0;
            for event in &schedule.timeline {
                prop_assert!(event.start >= cursor, "overlapping slices under {:?}", policy);
                prop_assert!(event.end > event.start);
                cursor = event.end;
                *executed.entry(event.pid).or_default() += event.duration();
            }
            prop_assert_eq!(&executed, &bursts);
            prop_assert_eq!(schedule.makespan(), cursor);
        }
    }

    #[test]
    fn srtf_minimizes_total_waiting(processes in processes_strategy()) {
        let srtf = total_waiting(&schedule(&processes, CpuPolicy::Srtf));
        for policy in policies() {
            prop_assert!(
                srtf <= total_waiting(&schedule(&processes, policy)),
                "SRTF beaten by {:?}",
                policy
            );
        }
    }

    #[test]
    fn cpu_metrics_are_bounded(processes in processes_strategy()) {
        for policy in policies() {
            let metrics = CpuMetrics::from_schedule(&schedule(&processes, policy));
            prop_assert!(metrics.cpu_utilization > 0.0);
            prop_assert!(metrics.cpu_utilization <= 100.0 + 1e-9);
            prop_assert!(metrics.throughput > 0.0);
            prop_assert!(metrics.avg_turnaround >= metrics.avg_waiting);
        }
    }

    #[test]
    fn page_counts_are_consistent(
        references in prop::collection::vec(0u32..10, 1..60),
        frame_count in 1usize..6,
    ) {
        let workload = PageWorkload { references: references.clone(), frame_count };
        let distinct = references.iter().collect::<BTreeSet<_>>().len();

        for algorithm in PageAlgorithm::ALL {
            let trace = page::simulate(&workload, algorithm);
            prop_assert_eq!(trace.total_references(), references.len());
            prop_assert!(trace.faults <= references.len());
            prop_assert!(trace.faults >= distinct.min(references.len()));
            prop_assert_eq!(trace.faults + trace.hits(), references.len());

            for step in &trace.steps {
                prop_assert_eq!(step.frame_state.len(), frame_count);
                prop_assert!(step.frame_state.contains(&Some(step.page)));
            }

            let metrics = PageMetrics::from_trace(&trace);
            prop_assert!((metrics.hit_ratio + metrics.fault_ratio - 100.0).abs() < 1e-9);
        }
    }

    #[test]
    fn optimal_never_faults_more(
        references in prop::collection::vec(0u32..8, 1..60),
        frame_count in 1usize..5,
    ) {
        let workload = PageWorkload { references, frame_count };
        let optimal = page::simulate(&workload, PageAlgorithm::Optimal).faults;
        for algorithm in [PageAlgorithm::Fifo, PageAlgorithm::Lru, PageAlgorithm::Lfu] {
            prop_assert!(optimal <= page::simulate(&workload, algorithm).faults);
        }
    }

    #[test]
    fn enough_frames_means_compulsory_faults_only(
        references in prop::collection::vec(0u32..6, 1..40),
    ) {
        let distinct = references.iter().collect::<BTreeSet<_>>().len();
        let workload = PageWorkload { references, frame_count: 6 };
        for algorithm in PageAlgorithm::ALL {
            prop_assert_eq!(page::simulate(&workload, algorithm).faults, distinct);
        }
    }

    #[test]
    fn disk_sequence_is_a_permutation(workload in disk_strategy()) {
        let mut expected = workload.requests.clone();
        expected.sort_unstable();

        for algorithm in DiskAlgorithm::ALL {
            let trace = disk::simulate(&workload, algorithm);
            let mut serviced = trace.sequence.clone();
            serviced.sort_unstable();
            prop_assert_eq!(&serviced, &expected);
        }
    }

    #[test]
    fn disk_seek_totals_add_up(workload in disk_strategy()) {
        for algorithm in DiskAlgorithm::ALL {
            let trace = disk::simulate(&workload, algorithm);
            let sum: u64 = trace.steps.iter().map(|s| s.seek).sum();
            prop_assert_eq!(trace.total_seek(), sum);
            prop_assert_eq!(trace.steps.last().map(|s| s.cumulative), Some(sum));
            prop_assert_eq!(trace.steps[0].from, workload.initial_head);
            for pair in trace.steps.windows(2) {
                prop_assert_eq!(pair[0].to, pair[1].from);
            }

            let metrics = DiskMetrics::from_trace(&trace);
            prop_assert_eq!(metrics.total_seek, sum);
            prop_assert!(metrics.min_seek <= metrics.max_seek);
        }
    }

    #[test]
    fn look_variants_visit_like_scan_variants(workload in disk_strategy()) {
        prop_assert_eq!(
            disk::service_order(&workload, DiskAlgorithm::Scan),
            disk::service_order(&workload, DiskAlgorithm::Look)
        );
        prop_assert_eq!(
            disk::service_order(&workload, DiskAlgorithm::CScan),
            disk::service_order(&workload, DiskAlgorithm::CLook)
        );
    }

    #[test]
    fn engines_are_deterministic(
        processes in processes_strategy(),
        workload in disk_strategy(),
    ) {
        for policy in policies() {
            prop_assert_eq!(schedule(&processes, policy), schedule(&processes, policy));
        }
        for algorithm in DiskAlgorithm::ALL {
            prop_assert_eq!(
                disk::simulate(&workload, algorithm),
                disk::simulate(&workload, algorithm)
            );
        }
    }
}
