//! Command-line surface of the `osim` binary.
//!
//! Every command resolves configuration, builds a request from `--input` or
//! inline flags, runs it and writes exactly one document to stdout. Failures
//! map to an [`ExitCode`]; in JSON formats the error is also written as an
//! `{"error": {"code", "message"}}` envelope.

use std::path::{Path, PathBuf};

use clap::{ArgAction, Args, Parser, Subcommand};
use osim_common::{
    CpuRequest, Cylinder, Direction, DiskRequest, Engine, Error, OutputFormat, PageNumber,
    PageRequest, ProcessInput, Result, Tick,
};
use osim_config::{resolve_config, ConfigError, ConfigPaths, ResolvedConfig};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::catalog;
use crate::compare::{
    compare_cpu, compare_disk, compare_page, compare_schema, render_cpu_comparison,
    render_disk_comparison, render_page_comparison, CpuCompareRequest, DiskCompareRequest,
    PageCompareRequest,
};
use crate::exit_codes::ExitCode;
use crate::report::{render_cpu_summary, render_disk_summary, render_page_summary};
use crate::runner::{run_cpu, run_disk, run_page};

/// Simulate CPU scheduling, page replacement and disk scheduling policies.
#[derive(Parser, Debug)]
#[command(name = "osim", version, about)]
pub struct Cli {
    /// Output format
    #[arg(long, short = 'f', value_enum, default_value_t = OutputFormat::Json, global = true)]
    pub format: OutputFormat,

    /// Config file (overrides OSIM_CONFIG and the per-user config)
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a CPU scheduling simulation
    Cpu(CpuArgs),
    /// Run a page replacement simulation
    Page(PageArgs),
    /// Run a disk scheduling simulation
    Disk(DiskArgs),
    /// Run one workload under several policies
    Compare(CompareArgs),
    /// Describe the supported algorithms
    Algorithms {
        /// Limit the listing to one engine
        #[arg(value_enum)]
        engine: Option<Engine>,
    },
    /// Print the JSON schema of an engine's request document
    Schema {
        #[arg(value_enum)]
        engine: Engine,
        /// Describe the `compare` request instead of the single-run request
        #[arg(long)]
        compare: bool,
    },
    /// Inspect configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the effective configuration and where it came from
    Show,
    /// Check the selected config file
    Validate,
}

/// A process given inline as `pid:arrival:burst[:priority]`.
pub fn parse_process(s: &str) -> std::result::Result<ProcessInput, String> {
    let fields: Vec<&str> = s.split(':').map(str::trim).collect();
    if !(3..=4).contains(&fields.len()) {
        return Err(format!("expected pid:arrival:burst[:priority], got {s:?}"));
    }
    let number = |i: usize, name: &str| -> std::result::Result<u64, String> {
        fields[i]
            .parse::<u64>()
            .map_err(|e| format!("{name} in {s:?}: {e}"))
    };
    let pid = u32::try_from(number(0, "pid")?).map_err(|e| format!("pid in {s:?}: {e}"))?;
    let priority = match fields.get(3) {
        Some(_) => u32::try_from(number(3, "priority")?)
            .map_err(|e| format!("priority in {s:?}: {e}"))?,
        None => 0,
    };
    Ok(ProcessInput {
        pid,
        arrival: number(1, "arrival")?,
        burst: number(2, "burst")?,
        priority,
    })
}

#[derive(Args, Debug, Default)]
pub struct CpuWorkloadArgs {
    /// Request document (JSON); inline flags override its fields
    #[arg(long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Process as pid:arrival:burst[:priority] (repeatable)
    #[arg(long = "process", short = 'p', value_parser = parse_process)]
    pub processes: Vec<ProcessInput>,

    /// Round-Robin time quantum
    #[arg(long, short = 'q', alias = "time-quantum")]
    pub quantum: Option<Tick>,
}

#[derive(Args, Debug)]
pub struct CpuArgs {
    /// FCFS, SJF, SRTF, Priority or RoundRobin
    #[arg(long, short = 'a')]
    pub algorithm: Option<String>,

    #[command(flatten)]
    pub workload: CpuWorkloadArgs,
}

#[derive(Args, Debug, Default)]
pub struct PageWorkloadArgs {
    /// Request document (JSON); inline flags override its fields
    #[arg(long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Page reference string, comma separated
    #[arg(long, value_delimiter = ',')]
    pub pages: Vec<PageNumber>,

    /// Number of physical frames
    #[arg(long)]
    pub frames: Option<usize>,
}

#[derive(Args, Debug)]
pub struct PageArgs {
    /// FIFO, LRU, Optimal or LFU
    #[arg(long, short = 'a')]
    pub algorithm: Option<String>,

    #[command(flatten)]
    pub workload: PageWorkloadArgs,
}

#[derive(Args, Debug, Default)]
pub struct DiskWorkloadArgs {
    /// Request document (JSON); inline flags override its fields
    #[arg(long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Cylinder requests in arrival order, comma separated
    #[arg(long, value_delimiter = ',')]
    pub requests: Vec<Cylinder>,

    /// Initial head position
    #[arg(long)]
    pub head: Option<Cylinder>,

    /// Total cylinders
    #[arg(long)]
    pub disk_size: Option<Cylinder>,

    /// Initial sweep direction
    #[arg(long, value_enum)]
    pub direction: Option<Direction>,
}

#[derive(Args, Debug)]
pub struct DiskArgs {
    /// FCFS, SSTF, SCAN, C-SCAN, LOOK or C-LOOK
    #[arg(long, short = 'a')]
    pub algorithm: Option<String>,

    #[command(flatten)]
    pub workload: DiskWorkloadArgs,
}

#[derive(Args, Debug)]
pub struct CompareArgs {
    #[command(subcommand)]
    pub engine: CompareCommands,
}

#[derive(Subcommand, Debug)]
pub enum CompareCommands {
    Cpu {
        /// Policies to compare, comma separated (default: all)
        #[arg(long, value_delimiter = ',')]
        algorithms: Vec<String>,
        #[command(flatten)]
        workload: CpuWorkloadArgs,
    },
    Page {
        #[arg(long, value_delimiter = ',')]
        algorithms: Vec<String>,
        #[command(flatten)]
        workload: PageWorkloadArgs,
    },
    Disk {
        #[arg(long, value_delimiter = ',')]
        algorithms: Vec<String>,
        #[command(flatten)]
        workload: DiskWorkloadArgs,
    },
}

// ---------------------------------------------------------------------------
// Request assembly
// ---------------------------------------------------------------------------

fn read_input<T: DeserializeOwned>(path: &Path) -> Result<T> {
    debug!(path = %path.display(), "reading request document");
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

fn required<T>(value: Option<T>, flag: &str) -> Result<T> {
    value.ok_or_else(|| Error::Config(format!("--{flag} is required without --input")))
}

fn cpu_request(algorithm: Option<&str>, args: &CpuWorkloadArgs) -> Result<CpuRequest> {
    let mut request = match &args.input {
        Some(path) => read_input(path)?,
        None => CpuRequest {
            algorithm: required(algorithm, "algorithm")?.to_string(),
            processes: Vec::new(),
            quantum: None,
        },
    };
    if let Some(algorithm) = algorithm {
        request.algorithm = algorithm.to_string();
    }
    if !args.processes.is_empty() {
        request.processes = args.processes.clone();
    }
    if args.quantum.is_some() {
        request.quantum = args.quantum;
    }
    Ok(request)
}

fn page_request(algorithm: Option<&str>, args: &PageWorkloadArgs) -> Result<PageRequest> {
    let mut request = match &args.input {
        Some(path) => read_input(path)?,
        None => PageRequest {
            algorithm: required(algorithm, "algorithm")?.to_string(),
            page_sequence: Vec::new(),
            frame_count: required(args.frames, "frames")?,
        },
    };
    if let Some(algorithm) = algorithm {
        request.algorithm = algorithm.to_string();
    }
    if !args.pages.is_empty() {
        request.page_sequence = args.pages.clone();
    }
    if let Some(frames) = args.frames {
        request.frame_count = frames;
    }
    Ok(request)
}

fn disk_request(algorithm: Option<&str>, args: &DiskWorkloadArgs) -> Result<DiskRequest> {
    let mut request = match &args.input {
        Some(path) => read_input(path)?,
        None => DiskRequest {
            algorithm: required(algorithm, "algorithm")?.to_string(),
            request_queue: Vec::new(),
            initial_head: required(args.head, "head")?,
            disk_size: None,
            direction: None,
        },
    };
    if let Some(algorithm) = algorithm {
        request.algorithm = algorithm.to_string();
    }
    if !args.requests.is_empty() {
        request.request_queue = args.requests.clone();
    }
    if let Some(head) = args.head {
        request.initial_head = head;
    }
    request.disk_size = args.disk_size.or(request.disk_size);
    request.direction = args.direction.or(request.direction);
    Ok(request)
}

fn cpu_compare_request(algorithms: &[String], args: &CpuWorkloadArgs) -> Result<CpuCompareRequest> {
    let mut request = match &args.input {
        Some(path) => read_input(path)?,
        None => CpuCompareRequest {
            processes: Vec::new(),
            algorithms: Vec::new(),
            quantum: None,
        },
    };
    if !algorithms.is_empty() {
        request.algorithms = algorithms.to_vec();
    }
    if !args.processes.is_empty() {
        request.processes = args.processes.clone();
    }
    request.quantum = args.quantum.or(request.quantum);
    Ok(request)
}

fn page_compare_request(
    algorithms: &[String],
    args: &PageWorkloadArgs,
) -> Result<PageCompareRequest> {
    let mut request = match &args.input {
        Some(path) => read_input(path)?,
        None => PageCompareRequest {
            page_sequence: Vec::new(),
            frame_count: required(args.frames, "frames")?,
            algorithms: Vec::new(),
        },
    };
    if !algorithms.is_empty() {
        request.algorithms = algorithms.to_vec();
    }
    if !args.pages.is_empty() {
        request.page_sequence = args.pages.clone();
    }
    if let Some(frames) = args.frames {
        request.frame_count = frames;
    }
    Ok(request)
}

fn disk_compare_request(
    algorithms: &[String],
    args: &DiskWorkloadArgs,
) -> Result<DiskCompareRequest> {
    let mut request = match &args.input {
        Some(path) => read_input(path)?,
        None => DiskCompareRequest {
            request_queue: Vec::new(),
            initial_head: required(args.head, "head")?,
            disk_size: None,
            direction: None,
            algorithms: Vec::new(),
        },
    };
    if !algorithms.is_empty() {
        request.algorithms = algorithms.to_vec();
    }
    if !args.requests.is_empty() {
        request.request_queue = args.requests.clone();
    }
    if let Some(head) = args.head {
        request.initial_head = head;
    }
    request.disk_size = args.disk_size.or(request.disk_size);
    request.direction = args.direction.or(request.direction);
    Ok(request)
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

fn emit<T, F>(format: OutputFormat, value: &T, summary: F) -> Result<()>
where
    T: Serialize,
    F: FnOnce(&T) -> String,
{
    let text = match format {
        OutputFormat::Json => serde_json::to_string_pretty(value)?,
        OutputFormat::Jsonl => serde_json::to_string(value)?,
        OutputFormat::Summary => summary(value),
    };
    println!("{text}");
    Ok(())
}

/// Error document written to stdout in JSON formats.
pub fn error_envelope(err: &Error) -> serde_json::Value {
    serde_json::json!({
        "error": {
            "code": err.code(),
            "message": err.to_string(),
        }
    })
}

fn report_error(format: OutputFormat, err: &Error) -> ExitCode {
    let code = ExitCode::for_error(err);
    if format.is_json() {
        let envelope = error_envelope(err);
        let text = if format == OutputFormat::Jsonl {
            envelope.to_string()
        } else {
            serde_json::to_string_pretty(&envelope).unwrap_or_else(|_| envelope.to_string())
        };
        println!("{text}");
    } else {
        eprintln!("error: {err}");
    }
    code
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

fn resolve(cli: &Cli) -> std::result::Result<ResolvedConfig, ConfigError> {
    let resolved = resolve_config(&ConfigPaths::discover(cli.config.as_deref()))?;
    debug!(source = ?resolved.source, path = ?resolved.path, "configuration resolved");
    Ok(resolved)
}

/// Run the parsed command line and return the process exit code.
pub fn run(cli: &Cli) -> ExitCode {
    match execute(cli) {
        Ok(code) => code,
        Err(err) => report_error(cli.format, &err),
    }
}

fn execute(cli: &Cli) -> Result<ExitCode> {
    let format = cli.format;
    match &cli.command {
        Commands::Algorithms { engine } => {
            let entries = catalog::catalog(*engine);
            emit(format, &entries, |entries| {
                entries
                    .iter()
                    .map(|e| format!("{:<5} {:<11} {}: {}", e.engine, e.id, e.name, e.description))
                    .collect::<Vec<_>>()
                    .join("\n")
            })?;
            Ok(ExitCode::Clean)
        }
        Commands::Schema { engine, compare } => {
            let schema = if *compare {
                compare_schema(*engine)
            } else {
                osim_common::schema::request_schema(*engine)
            };
            let text = match format {
                OutputFormat::Jsonl => serde_json::to_string(&schema)?,
                _ => serde_json::to_string_pretty(&schema)?,
            };
            println!("{text}");
            Ok(ExitCode::Clean)
        }
        Commands::Config { command } => run_config(cli, command),
        Commands::Cpu(args) => {
            let config = resolve(cli)?.config;
            let request = cpu_request(args.algorithm.as_deref(), &args.workload)?;
            let report = run_cpu(&request, &config)?;
            emit(format, &report, render_cpu_summary)?;
            Ok(ExitCode::Clean)
        }
        Commands::Page(args) => {
            let config = resolve(cli)?.config;
            let request = page_request(args.algorithm.as_deref(), &args.workload)?;
            let report = run_page(&request, &config)?;
            emit(format, &report, render_page_summary)?;
            Ok(ExitCode::Clean)
        }
        Commands::Disk(args) => {
            let config = resolve(cli)?.config;
            let request = disk_request(args.algorithm.as_deref(), &args.workload)?;
            let report = run_disk(&request, &config)?;
            emit(format, &report, render_disk_summary)?;
            Ok(ExitCode::Clean)
        }
        Commands::Compare(args) => {
            let config = resolve(cli)?.config;
            match &args.engine {
                CompareCommands::Cpu { algorithms, workload } => {
                    let request = cpu_compare_request(algorithms, workload)?;
                    emit(format, &compare_cpu(&request, &config), render_cpu_comparison)?;
                }
                CompareCommands::Page { algorithms, workload } => {
                    let request = page_compare_request(algorithms, workload)?;
                    emit(format, &compare_page(&request, &config), render_page_comparison)?;
                }
                CompareCommands::Disk { algorithms, workload } => {
                    let request = disk_compare_request(algorithms, workload)?;
                    emit(format, &compare_disk(&request, &config), render_disk_comparison)?;
                }
            }
            Ok(ExitCode::Clean)
        }
    }
}

fn run_config(cli: &Cli, command: &ConfigCommands) -> Result<ExitCode> {
    let format = cli.format;
    match command {
        ConfigCommands::Show => {
            let resolved = resolve(cli)?;
            emit(format, &resolved, |r| {
                let origin = r
                    .path
                    .as_ref()
                    .map(|p| format!(" ({})", p.display()))
                    .unwrap_or_default();
                let l = &r.config.limits;
                let d = &r.config.defaults;
                [
                    format!("source: {:?}{}", r.source, origin),
                    format!(
                        "limits: processes {} quantum {} references {} frames {} requests {} disk {}..={} tick {}",
                        l.max_processes,
                        l.max_quantum,
                        l.max_references,
                        l.max_frames,
                        l.max_requests,
                        l.min_disk_size,
                        l.max_disk_size,
                        l.max_tick
                    ),
                    format!(
                        "defaults: quantum {} disk_size {} direction {} frames {}",
                        d.quantum, d.disk_size, d.direction, d.frame_count
                    ),
                ]
                .join("\n")
            })?;
            Ok(ExitCode::Clean)
        }
        ConfigCommands::Validate => match resolve(cli) {
            Ok(resolved) => {
                let doc = serde_json::json!({
                    "valid": true,
                    "source": resolved.source,
                    "path": resolved.path,
                });
                emit(format, &doc, |_| "configuration is valid".to_string())?;
                Ok(ExitCode::Clean)
            }
            Err(ConfigError::Invalid(errors)) => {
                let doc = serde_json::json!({
                    "valid": false,
                    "errors": &errors,
                });
                emit(format, &doc, |_| {
                    errors
                        .iter()
                        .map(|e| format!("invalid: {e}"))
                        .collect::<Vec<_>>()
                        .join("\n")
                })?;
                Ok(ExitCode::ConfigError)
            }
            Err(other) => Err(other.into()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_inline_process() {
        let p = parse_process("3:2:8").unwrap();
        assert_eq!((p.pid, p.arrival, p.burst, p.priority), (3, 2, 8, 0));
        let p = parse_process("1:0:5:2").unwrap();
        assert_eq!(p.priority, 2);
        assert!(parse_process("1:0").is_err());
        assert!(parse_process("1:x:5").is_err());
    }

    #[test]
    fn inline_flags_build_request() {
        let cli = Cli::parse_from([
            "osim", "cpu", "-a", "RR", "-q", "2", "-p", "1:0:5", "-p", "2:1:3",
        ]);
        let Commands::Cpu(args) = &cli.command else {
            panic!("expected cpu command");
        };
        let request = cpu_request(args.algorithm.as_deref(), &args.workload).unwrap();
        assert_eq!(request.algorithm, "RR");
        assert_eq!(request.quantum, Some(2));
        assert_eq!(request.processes.len(), 2);
    }

    #[test]
    fn missing_algorithm_without_input_is_config_error() {
        let err = cpu_request(None, &CpuWorkloadArgs::default()).unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn input_file_with_flag_override() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("disk.json");
        std::fs::write(
            &path,
            r#"{"algorithm":"SCAN","request_queue":[98,183,37],"initial_head":53}"#,
        )
        .unwrap();
        let args = DiskWorkloadArgs {
            input: Some(path),
            direction: Some(Direction::Left),
            ..DiskWorkloadArgs::default()
        };
        let request = disk_request(Some("LOOK"), &args).unwrap();
        assert_eq!(request.algorithm, "LOOK");
        assert_eq!(request.request_queue, vec![98, 183, 37]);
        assert_eq!(request.direction, Some(Direction::Left));
    }

    #[test]
    fn comma_separated_lists() {
        let cli = Cli::parse_from(["osim", "page", "-a", "LRU", "--pages", "1,2,3", "--frames", "2"]);
        let Commands::Page(args) = &cli.command else {
            panic!("expected page command");
        };
        assert_eq!(args.workload.pages, vec![1, 2, 3]);
    }

    #[test]
    fn envelope_shape() {
        let err = Error::EmptyWorkload("request_queue".to_string());
        let env = error_envelope(&err);
        assert_eq!(env["error"]["code"], 24);
        assert_eq!(env["error"]["message"], "request_queue must not be empty");
    }
}
