//! Orchestration for a single archive run.
//!
//! A run cleans stale outputs, then walks the step table in order. Mandatory
//! steps stop the run on their first failure; advisory steps only warn. Every
//! attempted step lands in the [`RunReport`], which is logged whether the run
//! finished or aborted.

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{debug, info, instrument, warn};

use crate::core::plan::Step;
use crate::core::settings::ArchiveSettings;
use crate::core::timing::{format_elapsed, round_to_millis};
use crate::core::types::{Criticality, StepRecord, StepResult};
use crate::io::cleanup::{clean_artifacts, create_output_dirs};
use crate::io::process::CommandRunner;
use crate::report::RunReport;

/// Inputs for [`run_archive`].
#[derive(Debug, Clone, Copy)]
pub struct ArchiveRequest<'a> {
    /// Directory all relative paths and commands are resolved against.
    pub workdir: &'a Path,
    pub settings: &'a ArchiveSettings,
    pub steps: &'a [Step],
}

/// Clean stale artifacts, run every step, and log the final report.
///
/// Returns the report when all mandatory steps succeeded. On a mandatory
/// failure the report is logged first and the error names the failed step.
/// Cleanup failures abort before any step runs.
#[instrument(skip_all, fields(workdir = %request.workdir.display()))]
pub fn run_archive<R: CommandRunner>(
    runner: &R,
    request: &ArchiveRequest<'_>,
) -> Result<RunReport> {
    clean_artifacts(request.workdir, request.settings).context("pre-run cleanup")?;
    create_output_dirs(request.workdir, request.settings)?;

    let mut report = RunReport::new(&request.settings.compressed_file);
    let result = run_steps(runner, request.workdir, request.steps, &mut report);
    report.artifact_exists = request
        .workdir
        .join(&request.settings.compressed_file)
        .exists();
    report.log_summary();
    result?;
    Ok(report)
}

/// Execute `steps` in order, recording each attempt in `report`.
pub fn run_steps<R: CommandRunner>(
    runner: &R,
    workdir: &Path,
    steps: &[Step],
    report: &mut RunReport,
) -> Result<()> {
    for step in steps {
        if let Some(required) = &step.requires
            && !workdir.join(required).exists()
        {
            debug!(
                step = %step.kind,
                path = %required.display(),
                "required path missing, skipping"
            );
            continue;
        }

        let (record, outcome) = run_step(runner, workdir, step);
        report.push(record);

        if let Err(err) = outcome {
            match step.criticality {
                Criticality::Mandatory => {
                    return Err(err.context(format!("{} failed", step.kind.description())));
                }
                Criticality::Advisory => {
                    warn!(step = %step.kind, "Could not complete {}: {err:#}", step.kind.name());
                }
            }
        }
    }
    Ok(())
}

fn run_step<R: CommandRunner>(
    runner: &R,
    workdir: &Path,
    step: &Step,
) -> (StepRecord, Result<()>) {
    info!(step = %step.kind, "{}...", step.kind.description());
    let started = Instant::now();
    let outcome = runner.run(step, workdir);
    let elapsed = started.elapsed();

    let result = match &outcome {
        Ok(()) => {
            info!(
                step = %step.kind,
                "{} completed in {}",
                step.kind.description(),
                format_elapsed(elapsed)
            );
            StepResult::Succeeded
        }
        Err(err) => StepResult::Failed {
            message: format!("{err:#}"),
        },
    };

    let record = StepRecord {
        kind: step.kind,
        criticality: step.criticality,
        elapsed: round_to_millis(elapsed),
        result,
    };
    (record, outcome)
}
