//! Fan-out over many documents.
//!
//! Every document is an independent task: one document in, one cleaned
//! document out. A failing document is logged and reported, never propagated
//! to its siblings. This module runs tasks on a fixed-size rayon pool; the
//! timeout-enforcing pool lives in [`crate::async_api`].

use crate::error::{Error, Result};
use crate::extract::Extractor;
use crate::model::{CleanedDocument, DocumentStats, Outcome, SkipReason};
use crate::options::BatchOptions;
use crate::pipeline::Pipeline;
use rayon::prelude::*;
use serde::Serialize;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// How one document task ended.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TaskStatus {
    /// Cleaned text was produced and handed to the sink.
    Cleaned(DocumentStats),
    /// The document emptied out during filtering.
    Skipped {
        /// Stage that emptied it
        reason: SkipReason,
    },
    /// Extraction, processing or the sink failed.
    Failed {
        /// Error message
        error: String,
    },
    /// The document exceeded its time budget.
    TimedOut,
}

/// Result of one document task.
#[derive(Debug, Clone, Serialize)]
pub struct TaskReport {
    /// Source document
    pub path: PathBuf,
    /// Outcome of the task
    pub status: TaskStatus,
    /// Wall-clock time spent on the task
    pub elapsed: Duration,
}

/// Task counts of a batch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    /// Documents that produced text
    pub cleaned: usize,
    /// Documents skipped as empty
    pub skipped: usize,
    /// Documents that failed
    pub failed: usize,
    /// Documents that timed out
    pub timed_out: usize,
}

impl BatchSummary {
    /// Counts the statuses of a batch.
    pub fn from_reports(reports: &[TaskReport]) -> Self {
        reports
            .iter()
            .fold(Self::default(), |mut summary, report| {
                match report.status {
                    TaskStatus::Cleaned(_) => summary.cleaned += 1,
                    TaskStatus::Skipped { .. } => summary.skipped += 1,
                    TaskStatus::Failed { .. } => summary.failed += 1,
                    TaskStatus::TimedOut => summary.timed_out += 1,
                }
                summary
            })
    }

    /// Total number of tasks.
    pub fn total(&self) -> usize {
        self.cleaned + self.skipped + self.failed + self.timed_out
    }
}

/// Runs one document through extraction, the pipeline and the sink.
///
/// Once `cancelled` is set the sink is no longer called: a document given
/// up on by its caller produces no output.
pub(crate) fn run_task<F>(
    pipeline: &Pipeline,
    extractor: &dyn Extractor,
    path: &Path,
    sink: &F,
    cancelled: &AtomicBool,
) -> TaskStatus
where
    F: Fn(&Path, &CleanedDocument) -> Result<()> + ?Sized,
{
    let result = pipeline
        .process_path(extractor, path)
        .and_then(|outcome| match outcome {
            Outcome::Cleaned(_) if cancelled.load(Ordering::SeqCst) => {
                tracing::debug!(path = %path.display(), "discarding output of cancelled task");
                Ok(TaskStatus::TimedOut)
            }
            Outcome::Cleaned(document) => {
                sink(path, &document)?;
                Ok(TaskStatus::Cleaned(document.stats))
            }
            Outcome::Skipped { reason, .. } => Ok(TaskStatus::Skipped { reason }),
        });

    match result {
        Ok(status) => status,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "document failed");
            TaskStatus::Failed {
                error: e.to_string(),
            }
        }
    }
}

/// Cleans every path on a dedicated rayon pool of `options.workers` threads.
///
/// `sink` receives each cleaned document on the worker thread, typically to
/// write it out. Reports come back in input order. A panicking document is
/// reported as failed. `options.timeout` is not enforced here; use
/// [`crate::async_api::process_paths`] for that.
pub fn process_paths<F>(
    pipeline: &Pipeline,
    extractor: &dyn Extractor,
    paths: &[PathBuf],
    options: &BatchOptions,
    sink: F,
) -> Result<Vec<TaskReport>>
where
    F: Fn(&Path, &CleanedDocument) -> Result<()> + Sync,
{
    options.validate()?;
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(options.workers)
        .build()
        .map_err(|e| Error::Worker(e.to_string()))?;

    tracing::info!(documents = paths.len(), workers = options.workers, "starting batch");

    let reports = pool.install(|| {
        paths
            .par_iter()
            .map(|path| {
                let started = Instant::now();
                let status = catch_unwind(AssertUnwindSafe(|| {
                    run_task(pipeline, extractor, path, &sink, &AtomicBool::new(false))
                }))
                .unwrap_or_else(|_| {
                    tracing::warn!(path = %path.display(), "document task panicked");
                    TaskStatus::Failed {
                        error: "task panicked".to_string(),
                    }
                });
                TaskReport {
                    path: path.clone(),
                    status,
                    elapsed: started.elapsed(),
                }
            })
            .collect::<Vec<_>>()
    });

    let summary = BatchSummary::from_reports(&reports);
    tracing::info!(
        cleaned = summary.cleaned,
        skipped = summary.skipped,
        failed = summary.failed,
        "batch finished"
    );
    Ok(reports)
}

/// Lists the files with the given extension in a directory, sorted by name.
pub fn collect_inputs(dir: impl AsRef<Path>, extension: &str) -> Result<Vec<PathBuf>> {
    let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.is_file() && p.extension().is_some_and(|e| e == extension))
        .collect();
    paths.sort();
    Ok(paths)
}
