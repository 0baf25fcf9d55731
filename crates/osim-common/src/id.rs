//! Identity and unit types shared by the engines.
//!
//! Simulated time is measured in abstract ticks; page numbers and cylinders
//! are plain unsigned integers so negative inputs are unrepresentable.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Simulated time unit.
pub type Tick = u64;

/// Virtual page number referenced by a workload.
pub type PageNumber = u32;

/// Addressable disk head position.
pub type Cylinder = u32;

/// Process ID wrapper with display formatting.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(transparent)]
pub struct Pid(pub u32);

impl fmt::Display for Pid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}

impl From<u32> for Pid {
    fn from(pid: u32) -> Self {
        Pid(pid)
    }
}
