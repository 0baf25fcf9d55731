//! Request-level entry points: parse the algorithm name, validate the
//! workload against the configured limits, run the engine, build the report.
//!
//! Configuration errors (unknown algorithm, missing quantum) are raised
//! before the workload is inspected, so a bad request never reaches an engine.

use osim_common::{
    CpuAlgorithm, CpuRequest, DiskAlgorithm, DiskRequest, PageAlgorithm, PageRequest, Result,
};
use osim_config::SimulatorConfig;
use tracing::info;

use crate::cpu::{self, CpuPolicy, CpuSchedule};
use crate::report::{CpuReport, DiskReport, PageReport};
use crate::validate::{validate_disk, validate_page, validate_processes, validate_quantum};
use crate::{disk, page};

/// Validate and run a CPU request, returning the raw schedule.
pub fn schedule_cpu(request: &CpuRequest, config: &SimulatorConfig) -> Result<CpuSchedule> {
    let algorithm: CpuAlgorithm = request.algorithm.parse()?;
    validate_quantum(algorithm, request.quantum, &config.limits)?;
    let policy = CpuPolicy::new(algorithm, request.quantum)?;

    let processes = request.processes();
    validate_processes(&processes, &config.limits)?;

    info!(%algorithm, processes = processes.len(), "running cpu simulation");
    cpu::try_schedule(&processes, policy)
}

pub fn run_cpu(request: &CpuRequest, config: &SimulatorConfig) -> Result<CpuReport> {
    let schedule = schedule_cpu(request, config)?;
    Ok(CpuReport::new(&schedule, request.quantum))
}

pub fn run_page(request: &PageRequest, config: &SimulatorConfig) -> Result<PageReport> {
    let algorithm: PageAlgorithm = request.algorithm.parse()?;
    let workload = request.workload();
    validate_page(&workload, &config.limits)?;

    info!(
        %algorithm,
        references = workload.references.len(),
        frames = workload.frame_count,
        "running page simulation"
    );
    let trace = page::simulate(&workload, algorithm);
    Ok(PageReport::new(&trace))
}

pub fn run_disk(request: &DiskRequest, config: &SimulatorConfig) -> Result<DiskReport> {
    let algorithm: DiskAlgorithm = request.algorithm.parse()?;
    let workload = request.workload(config.defaults.disk_size, config.defaults.direction);
    validate_disk(&workload, &config.limits)?;

    info!(
        %algorithm,
        requests = workload.requests.len(),
        head = workload.initial_head,
        "running disk simulation"
    );
    let trace = disk::simulate(&workload, algorithm);
    Ok(DiskReport::new(&trace, workload.disk_size, workload.direction))
}
