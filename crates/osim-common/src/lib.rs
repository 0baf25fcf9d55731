//! OS simulator common types, policy names, and errors.
//!
//! This crate provides foundational types shared across osim crates:
//! - Workload value types (processes, page references, disk requests)
//! - Closed policy enumerations for each engine
//! - Request shapes accepted at the simulation boundary
//! - Common error types
//! - Output format specifications

pub mod algorithm;
pub mod error;
pub mod id;
pub mod output;
pub mod request;
pub mod schema;
pub mod workload;

pub use algorithm::{CpuAlgorithm, DiskAlgorithm, Engine, PageAlgorithm};
pub use error::{Error, Result};
pub use id::{Cylinder, PageNumber, Pid, Tick};
pub use output::OutputFormat;
pub use request::{CpuRequest, DiskRequest, PageRequest, ProcessInput};
pub use schema::SCHEMA_VERSION;
pub use workload::{Direction, DiskWorkload, PageWorkload, Process};
