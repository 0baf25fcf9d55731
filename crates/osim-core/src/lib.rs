//! OS simulator core: CPU scheduling, page replacement and disk scheduling
//! engines, the metric calculator, and the `osim` command-line surface.
//!
//! The engines are pure functions over validated workloads. [`runner`] is the
//! request boundary that parses algorithm names, checks configured limits and
//! turns engine output into serializable reports.

pub mod catalog;
pub mod cli;
pub mod compare;
pub mod cpu;
pub mod disk;
pub mod exit_codes;
pub mod logging;
pub mod metrics;
pub mod page;
pub mod report;
pub mod runner;
pub mod validate;

pub use exit_codes::ExitCode;
pub use runner::{run_cpu, run_disk, run_page};
