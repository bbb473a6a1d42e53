//! Final run report: per-step timings and the artifact verdict.

use std::path::PathBuf;

use tracing::{error, info, warn};

use crate::core::timing::format_elapsed;
use crate::core::types::{StepRecord, StepResult};

/// Everything attempted during a run, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// Final artifact path as configured (relative to the workdir).
    pub artifact: PathBuf,
    pub records: Vec<StepRecord>,
    /// Whether the artifact existed once the pipeline stopped.
    pub artifact_exists: bool,
}

impl RunReport {
    pub fn new(artifact: impl Into<PathBuf>) -> Self {
        Self {
            artifact: artifact.into(),
            records: Vec::new(),
            artifact_exists: false,
        }
    }

    pub fn push(&mut self, record: StepRecord) {
        self.records.push(record);
    }

    /// First mandatory step that failed, if any.
    pub fn fatal_step(&self) -> Option<&StepRecord> {
        self.records.iter().find(|record| record.is_fatal())
    }

    /// A run succeeds when no mandatory step failed and the artifact exists.
    pub fn succeeded(&self) -> bool {
        self.fatal_step().is_none() && self.artifact_exists
    }

    /// Log the per-step summary followed by the artifact verdict.
    pub fn log_summary(&self) {
        for record in &self.records {
            let elapsed = format_elapsed(record.elapsed);
            let description = record.kind.description();
            match &record.result {
                StepResult::Succeeded => {
                    info!(step = %record.kind, %elapsed, "{description}: ok in {elapsed}");
                }
                StepResult::Failed { message } if record.is_fatal() => {
                    error!(
                        step = %record.kind,
                        %elapsed,
                        "{description}: failed after {elapsed}: {message}"
                    );
                }
                StepResult::Failed { message } => {
                    warn!(
                        step = %record.kind,
                        %elapsed,
                        "{description}: failed after {elapsed} (ignored): {message}"
                    );
                }
            }
        }

        info!("Final archive: {}", self.artifact.display());
        if self.artifact_exists {
            info!("Archive created successfully!");
        } else {
            error!("Archive file was not created");
        }
    }
}
