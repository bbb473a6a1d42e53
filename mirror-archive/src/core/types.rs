//! Shared deterministic types for pipeline steps and their outcomes.

use std::fmt;
use std::time::Duration;

/// The fixed set of pipeline steps, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepKind {
    Clone,
    Archive,
    Compress,
    Inspect,
}

impl StepKind {
    /// Short stable name used in structured log fields.
    pub fn name(self) -> &'static str {
        match self {
            Self::Clone => "clone",
            Self::Archive => "archive",
            Self::Compress => "compress",
            Self::Inspect => "inspect",
        }
    }

    /// Human-readable progress description.
    pub fn description(self) -> &'static str {
        match self {
            Self::Clone => "Cloning repository with --mirror",
            Self::Archive => "Creating tar archive",
            Self::Compress => "Compressing with zstd",
            Self::Inspect => "Getting file information",
        }
    }
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Whether a step's failure aborts the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Criticality {
    /// Failure terminates the run with a non-zero exit status.
    Mandatory,
    /// Failure is logged as a warning and the run continues.
    Advisory,
}

/// Result of a single attempted step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepResult {
    Succeeded,
    Failed { message: String },
}

/// Bookkeeping for one attempted step, kept for the final report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepRecord {
    pub kind: StepKind,
    pub criticality: Criticality,
    /// Wall-clock time, already rounded to milliseconds.
    pub elapsed: Duration,
    pub result: StepResult,
}

impl StepRecord {
    pub fn succeeded(&self) -> bool {
        matches!(self.result, StepResult::Succeeded)
    }

    /// True when this record represents a failure that aborts the run.
    pub fn is_fatal(&self) -> bool {
        !self.succeeded() && self.criticality == Criticality::Mandatory
    }
}
