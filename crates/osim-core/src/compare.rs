//! Run one workload under several policies and tabulate the headline metrics.
//!
//! Each policy runs independently through the regular request path. A policy
//! that fails (unknown name, invalid workload) records its error in place of
//! metrics and the remaining policies still run.

use osim_common::{
    CpuAlgorithm, CpuRequest, Cylinder, Direction, DiskAlgorithm, DiskRequest, Engine,
    PageAlgorithm, PageNumber, PageRequest, ProcessInput, Result, Tick, SCHEMA_VERSION,
};
use osim_config::SimulatorConfig;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::metrics::CpuMetrics;
use crate::runner::{run_disk, run_page, schedule_cpu};

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

/// Compare CPU policies over one process set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CpuCompareRequest {
    pub processes: Vec<ProcessInput>,
    /// Policies to run; all of them when empty.
    #[serde(default)]
    pub algorithms: Vec<String>,
    /// Round-Robin quantum; the configured default when absent.
    #[serde(default, alias = "time_quantum")]
    pub quantum: Option<Tick>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PageCompareRequest {
    pub page_sequence: Vec<PageNumber>,
    pub frame_count: usize,
    #[serde(default)]
    pub algorithms: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DiskCompareRequest {
    pub request_queue: Vec<Cylinder>,
    pub initial_head: Cylinder,
    #[serde(default)]
    pub disk_size: Option<Cylinder>,
    #[serde(default)]
    pub direction: Option<Direction>,
    #[serde(default)]
    pub algorithms: Vec<String>,
}

/// JSON schema of an engine's comparison request document.
pub fn compare_schema(engine: Engine) -> serde_json::Value {
    let schema = match engine {
        Engine::Cpu => schemars::schema_for!(CpuCompareRequest),
        Engine::Page => schemars::schema_for!(PageCompareRequest),
        Engine::Disk => schemars::schema_for!(DiskCompareRequest),
    };
    serde_json::to_value(schema).unwrap_or(serde_json::Value::Null)
}

fn names_or_all(names: &[String], all: impl IntoIterator<Item = &'static str>) -> Vec<String> {
    if names.is_empty() {
        all.into_iter().map(str::to_string).collect()
    } else {
        names.to_vec()
    }
}

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CpuSummary {
    pub avg_waiting: f64,
    pub avg_turnaround: f64,
    pub cpu_utilization: f64,
    pub throughput: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PageSummary {
    pub page_faults: usize,
    pub hit_ratio: f64,
    pub fault_ratio: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DiskSummary {
    pub total_seek: u64,
    pub avg_seek: f64,
}

/// One row of a comparison: metrics on success, the error message otherwise.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonEntry<M> {
    pub algorithm: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics: Option<M>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<M> ComparisonEntry<M> {
    fn map_metrics<N>(self, f: impl Fn(M) -> N) -> ComparisonEntry<N> {
        ComparisonEntry {
            algorithm: self.algorithm,
            metrics: self.metrics.map(f),
            error: self.error,
        }
    }

    fn from_result(algorithm: String, result: Result<M>) -> Self {
        match result {
            Ok(metrics) => ComparisonEntry {
                algorithm,
                metrics: Some(metrics),
                error: None,
            },
            Err(e) => {
                warn!(%algorithm, error = %e, "policy failed during comparison");
                ComparisonEntry {
                    algorithm,
                    metrics: None,
                    error: Some(e.to_string()),
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison<M> {
    pub schema_version: &'static str,
    pub engine: Engine,
    pub results: Vec<ComparisonEntry<M>>,
    /// Policy with the best headline metric among the successful runs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best: Option<String>,
}

impl<M> Comparison<M> {
    fn new<K, F>(engine: Engine, results: Vec<ComparisonEntry<M>>, key: F) -> Self
    where
        K: PartialOrd,
        F: Fn(&M) -> K,
    {
        let mut best: Option<(&str, K)> = None;
        for entry in &results {
            let Some(metrics) = &entry.metrics else {
                continue;
            };
            let k = key(metrics);
            if best.as_ref().map_or(true, |(_, b)| k < *b) {
                best = Some((entry.algorithm.as_str(), k));
            }
        }
        let best = best.map(|(name, _)| name.to_string());
        Comparison {
            schema_version: SCHEMA_VERSION,
            engine,
            results,
            best,
        }
    }

    pub fn failures(&self) -> usize {
        self.results.iter().filter(|e| e.error.is_some()).count()
    }

    /// Convert every row's metrics, keeping `best` as already chosen.
    fn map_metrics<N>(self, f: impl Fn(M) -> N) -> Comparison<N> {
        Comparison {
            schema_version: self.schema_version,
            engine: self.engine,
            results: self
                .results
                .into_iter()
                .map(|entry| entry.map_metrics(&f))
                .collect(),
            best: self.best,
        }
    }
}

// ---------------------------------------------------------------------------
// Runs
// ---------------------------------------------------------------------------

/// Best is the lowest average waiting time, compared before the reported
/// figures are rounded.
pub fn compare_cpu(request: &CpuCompareRequest, config: &SimulatorConfig) -> Comparison<CpuSummary> {
    let quantum = request.quantum.unwrap_or(config.defaults.quantum);
    let names = names_or_all(
        &request.algorithms,
        CpuAlgorithm::ALL.into_iter().map(CpuAlgorithm::as_str),
    );
    let results = names
        .into_iter()
        .map(|algorithm| {
            let single = CpuRequest {
                algorithm: algorithm.clone(),
                processes: request.processes.clone(),
                quantum: Some(quantum),
            };
            let result =
                schedule_cpu(&single, config).map(|schedule| CpuMetrics::from_schedule(&schedule));
            ComparisonEntry::from_result(algorithm, result)
        })
        .collect();
    Comparison::new(Engine::Cpu, results, |m: &CpuMetrics| m.avg_waiting).map_metrics(|m| {
        let m = m.rounded();
        CpuSummary {
            avg_waiting: m.avg_waiting,
            avg_turnaround: m.avg_turnaround,
            cpu_utilization: m.cpu_utilization,
            throughput: m.throughput,
        }
    })
}

/// Best is the fewest faults.
pub fn compare_page(
    request: &PageCompareRequest,
    config: &SimulatorConfig,
) -> Comparison<PageSummary> {
    let names = names_or_all(
        &request.algorithms,
        PageAlgorithm::ALL.into_iter().map(PageAlgorithm::as_str),
    );
    let results = names
        .into_iter()
        .map(|algorithm| {
            let single = PageRequest {
                algorithm: algorithm.clone(),
                page_sequence: request.page_sequence.clone(),
                frame_count: request.frame_count,
            };
            let result = run_page(&single, config).map(|report| PageSummary {
                page_faults: report.metrics.page_faults,
                hit_ratio: report.metrics.hit_ratio,
                fault_ratio: report.metrics.fault_ratio,
            });
            ComparisonEntry::from_result(algorithm, result)
        })
        .collect();
    Comparison::new(Engine::Page, results, |m: &PageSummary| m.page_faults)
}

/// Best is the least total seek.
pub fn compare_disk(
    request: &DiskCompareRequest,
    config: &SimulatorConfig,
) -> Comparison<DiskSummary> {
    let names = names_or_all(
        &request.algorithms,
        DiskAlgorithm::ALL.into_iter().map(DiskAlgorithm::as_str),
    );
    let results = names
        .into_iter()
        .map(|algorithm| {
            let single = DiskRequest {
                algorithm: algorithm.clone(),
                request_queue: request.request_queue.clone(),
                initial_head: request.initial_head,
                disk_size: request.disk_size,
                direction: request.direction,
            };
            let result = run_disk(&single, config).map(|report| DiskSummary {
                total_seek: report.metrics.total_seek,
                avg_seek: report.metrics.avg_seek,
            });
            ComparisonEntry::from_result(algorithm, result)
        })
        .collect();
    Comparison::new(Engine::Disk, results, |m: &DiskSummary| m.total_seek)
}

// ---------------------------------------------------------------------------
// Rendering to text
// ---------------------------------------------------------------------------

/// Render a comparison as one line per policy; `columns` formats the metrics.
pub fn render_comparison<M, F>(comparison: &Comparison<M>, columns: F) -> String
where
    F: Fn(&M) -> String,
{
    let mut lines = vec![format!("Comparison: {}", comparison.engine), String::new()];
    for entry in &comparison.results {
        let body = match (&entry.metrics, &entry.error) {
            (Some(m), _) => columns(m),
            (None, Some(e)) => format!("error: {e}"),
            (None, None) => String::new(),
        };
        let marker = if comparison.best.as_deref() == Some(entry.algorithm.as_str()) {
            "*"
        } else {
            " "
        };
        lines.push(format!("{marker} {:<12} {body}", entry.algorithm));
    }
    lines.join("\n")
}

pub fn render_cpu_comparison(comparison: &Comparison<CpuSummary>) -> String {
    render_comparison(comparison, |m| {
        format!(
            "waiting {:>7.2}  turnaround {:>7.2}  utilization {:>6.2}%  throughput {:.4}",
            m.avg_waiting, m.avg_turnaround, m.cpu_utilization, m.throughput
        )
    })
}

pub fn render_page_comparison(comparison: &Comparison<PageSummary>) -> String {
    render_comparison(comparison, |m| {
        format!(
            "faults {:>3}  hit ratio {:>6.2}%  fault ratio {:>6.2}%",
            m.page_faults, m.hit_ratio, m.fault_ratio
        )
    })
}

pub fn render_disk_comparison(comparison: &Comparison<DiskSummary>) -> String {
    render_comparison(comparison, |m| {
        format!("total seek {:>5}  avg seek {:>7.2}", m.total_seek, m.avg_seek)
    })
}
