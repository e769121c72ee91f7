//! Async API with a timeout-enforcing worker pool.
//!
//! Enable the `async` feature (on by default) to use these APIs:
//!
//! ```toml
//! [dependencies]
//! prosefilter = { version = "0.1", features = ["async"] }
//! ```
//!
//! Cleaning is CPU-bound, so every document runs in `spawn_blocking`. A
//! semaphore bounds the number of documents in flight and each task gets its
//! own timeout. A timed-out blocking task cannot be interrupted; it finishes
//! in the background while its slot is already handed to the next document,
//! and its result is never handed to the sink.

use crate::batch::{run_task, BatchSummary, TaskReport, TaskStatus};
use crate::error::{Error, Result};
use crate::extract::Extractor;
use crate::model::{CleanedDocument, Outcome};
use crate::options::BatchOptions;
use crate::pipeline::Pipeline;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;

/// Asynchronously cleans raw extracted text.
///
/// # Example
///
/// ```no_run
/// # async fn example() -> prosefilter::Result<()> {
/// use prosefilter::{FilterOptions, Pipeline};
///
/// let pipeline = Pipeline::new(FilterOptions::default())?;
/// let raw = tokio::fs::read_to_string("thesis.txt").await?;
/// let outcome = prosefilter::async_api::process_text(&pipeline, raw).await?;
/// println!("{}", outcome.text().unwrap_or_default());
/// # Ok(())
/// # }
/// ```
pub async fn process_text(pipeline: &Pipeline, raw: String) -> Result<Outcome> {
    let pipeline = pipeline.clone();
    tokio::task::spawn_blocking(move || pipeline.process(&raw))
        .await
        .map_err(|e| Error::Worker(e.to_string()))?
}

/// Asynchronously reads a pre-extracted text file and cleans it.
pub async fn process_file(pipeline: &Pipeline, path: impl AsRef<Path>) -> Result<Outcome> {
    let path = path.as_ref();
    let bytes = tokio::fs::read(path).await.map_err(|e| Error::Extraction {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    process_text(pipeline, String::from_utf8_lossy(&bytes).into_owned()).await
}

/// Cleans every path with at most `options.workers` documents in flight,
/// each under `options.timeout`.
///
/// Reports come back in input order. Timeouts, failures and panics are
/// reported per document and never cancel other tasks.
pub async fn process_paths<F>(
    pipeline: Pipeline,
    extractor: Arc<dyn Extractor>,
    paths: Vec<PathBuf>,
    options: BatchOptions,
    sink: F,
) -> Result<Vec<TaskReport>>
where
    F: Fn(&Path, &CleanedDocument) -> Result<()> + Send + Sync + 'static,
{
    options.validate()?;
    tracing::info!(
        documents = paths.len(),
        workers = options.workers,
        timeout_secs = options.timeout.as_secs_f64(),
        "starting batch"
    );

    let semaphore = Arc::new(Semaphore::new(options.workers));
    let sink = Arc::new(sink);
    let mut handles = Vec::with_capacity(paths.len());

    for path in paths {
        let semaphore = Arc::clone(&semaphore);
        let pipeline = pipeline.clone();
        let extractor = Arc::clone(&extractor);
        let sink = Arc::clone(&sink);
        let timeout = options.timeout;

        handles.push(tokio::spawn(async move {
            let _permit = semaphore
                .acquire_owned()
                .await
                .map_err(|e| Error::Worker(e.to_string()))?;
            let started = Instant::now();

            let cancelled = Arc::new(AtomicBool::new(false));
            let task_cancelled = Arc::clone(&cancelled);
            let task_path = path.clone();
            let work = tokio::task::spawn_blocking(move || {
                run_task(
                    &pipeline,
                    extractor.as_ref(),
                    &task_path,
                    sink.as_ref(),
                    &task_cancelled,
                )
            });

            let status = match tokio::time::timeout(timeout, work).await {
                Ok(Ok(status)) => status,
                Ok(Err(join_error)) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %join_error,
                        "document task aborted"
                    );
                    TaskStatus::Failed {
                        error: join_error.to_string(),
                    }
                }
                Err(_) => {
                    cancelled.store(true, Ordering::SeqCst);
                    tracing::warn!(path = %path.display(), ?timeout, "document timed out");
                    TaskStatus::TimedOut
                }
            };

            Ok::<_, Error>(TaskReport {
                path,
                status,
                elapsed: started.elapsed(),
            })
        }));
    }

    let mut reports = Vec::with_capacity(handles.len());
    for handle in handles {
        let report = handle.await.map_err(|e| Error::Worker(e.to_string()))??;
        reports.push(report);
    }

    let summary = BatchSummary::from_reports(&reports);
    tracing::info!(
        cleaned = summary.cleaned,
        skipped = summary.skipped,
        failed = summary.failed,
        timed_out = summary.timed_out,
        "batch finished"
    );
    Ok(reports)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::FilterOptions;
    use std::sync::Mutex;
    use std::time::Duration;

    const PROSE: &str = "Bu bölümde araştırmanın amacı ve kapsamı ayrıntılı biçimde ele alınmaktadır.";

    #[tokio::test]
    async fn test_process_text() {
        let pipeline = Pipeline::new(FilterOptions::default()).unwrap();
        let outcome = process_text(&pipeline, PROSE.to_string()).await.unwrap();
        assert_eq!(outcome.text(), Some(PROSE));
    }

    #[tokio::test]
    async fn test_missing_file_is_extraction_error() {
        let pipeline = Pipeline::new(FilterOptions::default()).unwrap();
        let result = process_file(&pipeline, "/nonexistent/prosefilter/input.txt").await;
        assert!(matches!(result, Err(Error::Extraction { .. })));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_timeout_does_not_affect_siblings() {
        let extractor = |path: &Path| -> Result<String> {
            if path.ends_with("slow.txt") {
                std::thread::sleep(Duration::from_millis(500));
            }
            if path.ends_with("broken.txt") {
                return Err(Error::Extraction {
                    path: path.to_path_buf(),
                    message: "unreadable".into(),
                });
            }
            Ok(PROSE.to_string())
        };
        let paths = vec![
            PathBuf::from("slow.txt"),
            PathBuf::from("fast.txt"),
            PathBuf::from("broken.txt"),
        ];
        let options = BatchOptions::default()
            .with_workers(2)
            .with_timeout(Duration::from_millis(100));

        let reports = process_paths(
            Pipeline::new(FilterOptions::default()).unwrap(),
            Arc::new(extractor),
            paths,
            options,
            |_, _| Ok(()),
        )
        .await
        .unwrap();

        assert_eq!(reports[0].status, TaskStatus::TimedOut);
        assert!(matches!(reports[1].status, TaskStatus::Cleaned(_)));
        assert!(matches!(reports[2].status, TaskStatus::Failed { .. }));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_timed_out_document_is_not_written() {
        let extractor = |path: &Path| -> Result<String> {
            if path.ends_with("slow.txt") {
                std::thread::sleep(Duration::from_millis(300));
            }
            Ok(PROSE.to_string())
        };
        let written = Arc::new(Mutex::new(Vec::new()));
        let sink_written = Arc::clone(&written);

        let reports = process_paths(
            Pipeline::new(FilterOptions::default()).unwrap(),
            Arc::new(extractor),
            vec![PathBuf::from("slow.txt"), PathBuf::from("fast.txt")],
            BatchOptions::default()
                .with_workers(2)
                .with_timeout(Duration::from_millis(50)),
            move |path, _| {
                sink_written.lock().unwrap().push(path.to_path_buf());
                Ok(())
            },
        )
        .await
        .unwrap();
        assert_eq!(reports[0].status, TaskStatus::TimedOut);

        // Let the abandoned blocking task run to completion.
        tokio::time::sleep(Duration::from_millis(600)).await;
        assert_eq!(*written.lock().unwrap(), vec![PathBuf::from("fast.txt")]);
    }

    #[tokio::test]
    async fn test_invalid_batch_options() {
        let result = process_paths(
            Pipeline::new(FilterOptions::default()).unwrap(),
            Arc::new(crate::extract::PlainTextExtractor),
            Vec::new(),
            BatchOptions::default().with_timeout(Duration::ZERO),
            |_, _| Ok(()),
        )
        .await;
        assert!(matches!(result, Err(Error::InvalidConfig(_))));
    }
}
