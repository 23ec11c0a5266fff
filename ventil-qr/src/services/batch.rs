//! Batch generation over an inclusive range of valve numbers.
//!
//! Items run on a bounded pool: one task per valve number, at most `workers`
//! rendering at once on the blocking thread pool. A failing item is recorded
//! and never stops the rest of the batch.

use std::collections::BTreeSet;
use std::ops::RangeInclusive;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::Semaphore;
use tokio::task::{JoinError, JoinSet};

use super::generator::LabelGenerator;

/// Log progress after this many finished items.
const PROGRESS_EVERY: usize = 10;

/// One valve number that could not be generated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemFailure {
    pub id: u32,
    pub message: String,
}

/// Outcome of a batch run.
#[derive(Debug, Clone, Default)]
pub struct BatchSummary {
    pub success_count: usize,
    /// Sorted by valve number.
    pub failures: Vec<ItemFailure>,
    pub output_dir: PathBuf,
}

impl BatchSummary {
    pub fn error_count(&self) -> usize {
        self.failures.len()
    }

    pub fn total(&self) -> usize {
        self.success_count + self.error_count()
    }

    /// Print the end-of-run report to stdout.
    pub fn print_report(&self) {
        let dir = std::path::absolute(&self.output_dir).unwrap_or_else(|_| self.output_dir.clone());
        println!("{}", "-".repeat(60));
        println!("Done!");
        println!("Successful: {}", self.success_count);
        println!("Errors: {}", self.error_count());
        if !self.failures.is_empty() {
            let ids: Vec<String> = self.failures.iter().map(|f| f.id.to_string()).collect();
            println!("Failed valves: {}", ids.join(", "));
        }
        println!("Files saved in: {}", dir.display());
    }
}

/// Generate every valve number in `ids`, at most `workers` at a time.
pub async fn run_batch(
    generator: Arc<LabelGenerator>,
    ids: RangeInclusive<u32>,
    workers: usize,
) -> BatchSummary {
    let total = ids.clone().count();
    let workers = workers.max(1);

    tracing::info!(
        start = ids.start(),
        end = ids.end(),
        total,
        workers,
        output_dir = %generator.output_dir().display(),
        "Starting batch generation"
    );

    let semaphore = Arc::new(Semaphore::new(workers));
    let finished = Arc::new(AtomicUsize::new(0));
    let mut pending: BTreeSet<u32> = BTreeSet::new();
    let mut tasks = JoinSet::new();
    let mut summary = BatchSummary {
        output_dir: generator.output_dir().to_path_buf(),
        ..BatchSummary::default()
    };

    for id in ids {
        let permit = match semaphore.clone().acquire_owned().await {
            Ok(permit) => permit,
            Err(e) => {
                record_failure(&mut summary, id, format!("worker pool closed: {e}"));
                continue;
            }
        };
        pending.insert(id);

        let generator = generator.clone();
        let finished = finished.clone();
        tasks.spawn(async move {
            let _permit = permit;
            let outcome = match tokio::task::spawn_blocking(move || generator.generate(id)).await {
                Ok(Ok(path)) => Ok(path),
                Ok(Err(e)) => Err(e.to_string()),
                Err(e) => Err(format!("worker task failed: {e}")),
            };

            let done = finished.fetch_add(1, Ordering::Relaxed) + 1;
            if done % PROGRESS_EVERY == 0 {
                tracing::info!(done, total, "Progress: {done}/{total} labels processed");
            }
            (id, outcome)
        });

        // Collect finished items as we go so the set holds at most the
        // in-flight tasks.
        while let Some(joined) = tasks.try_join_next() {
            collect(&mut summary, &mut pending, joined);
        }
    }

    while let Some(joined) = tasks.join_next().await {
        collect(&mut summary, &mut pending, joined);
    }

    for id in pending {
        record_failure(&mut summary, id, "task aborted before reporting".into());
    }
    summary.failures.sort_by_key(|f| f.id);

    tracing::info!(
        success = summary.success_count,
        errors = summary.error_count(),
        "Batch generation finished"
    );
    summary
}

type ItemOutcome = (u32, Result<PathBuf, String>);

fn collect(
    summary: &mut BatchSummary,
    pending: &mut BTreeSet<u32>,
    joined: Result<ItemOutcome, JoinError>,
) {
    match joined {
        Ok((id, Ok(path))) => {
            pending.remove(&id);
            summary.success_count += 1;
            tracing::debug!(id, path = %path.display(), "Label generated");
        }
        Ok((id, Err(message))) => {
            pending.remove(&id);
            record_failure(summary, id, message);
        }
        // The id is recovered from `pending` once the set is drained.
        Err(e) => tracing::error!("Batch task aborted: {e}"),
    }
}

fn record_failure(summary: &mut BatchSummary, id: u32, message: String) {
    tracing::warn!(id, error = %message, "Failed to generate label for valve {id}");
    summary.failures.push(ItemFailure { id, message });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GeneratorConfig;
    use label_engine::OutputFormat;

    fn generator(dir: &std::path::Path) -> Arc<LabelGenerator> {
        let config = GeneratorConfig {
            output_dir: dir.to_path_buf(),
            font_candidates: Vec::new(),
            format: OutputFormat::Png,
            font_size: 24,
            ..GeneratorConfig::default()
        };
        Arc::new(LabelGenerator::new(config).unwrap())
    }

    #[tokio::test]
    async fn every_id_produces_one_file() {
        let dir = tempfile::tempdir().unwrap();
        let generator = generator(dir.path());

        let summary = run_batch(generator.clone(), 1..=12, 4).await;

        assert_eq!(summary.success_count, 12);
        assert_eq!(summary.error_count(), 0);
        assert_eq!(summary.total(), 12);
        for id in 1..=12 {
            assert!(generator.output_path(id).is_file(), "missing label {id}");
        }
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 12);
    }

    #[tokio::test]
    async fn one_blocked_item_does_not_stop_the_batch() {
        let dir = tempfile::tempdir().unwrap();
        let generator = generator(dir.path());
        // A directory at the target path makes the file write fail.
        std::fs::create_dir(generator.output_path(3)).unwrap();

        let summary = run_batch(generator.clone(), 1..=6, 1).await;

        assert_eq!(summary.error_count(), 1);
        assert_eq!(summary.success_count, 5);
        assert_eq!(summary.failures[0].id, 3);
        assert!(!summary.failures[0].message.is_empty());
        for id in [4, 5, 6] {
            assert!(generator.output_path(id).is_file());
        }
    }

    #[tokio::test]
    async fn rerun_overwrites_existing_files() {
        let dir = tempfile::tempdir().unwrap();
        let generator = generator(dir.path());

        let first = run_batch(generator.clone(), 1..=3, 2).await;
        let second = run_batch(generator.clone(), 1..=3, 2).await;

        assert_eq!(first.success_count, 3);
        assert_eq!(second.success_count, 3);
        assert_eq!(second.error_count(), 0);
    }

    #[tokio::test]
    async fn long_range_with_few_workers_accounts_for_every_id() {
        let dir = tempfile::tempdir().unwrap();
        let generator = generator(dir.path());
        std::fs::create_dir(generator.output_path(17)).unwrap();
        std::fs::create_dir(generator.output_path(33)).unwrap();

        let summary = run_batch(generator.clone(), 1..=40, 2).await;

        assert_eq!(summary.total(), 40);
        assert_eq!(summary.success_count, 38);
        let failed: Vec<u32> = summary.failures.iter().map(|f| f.id).collect();
        assert_eq!(failed, vec![17, 33]);
    }

    #[tokio::test]
    async fn single_id_range() {
        let dir = tempfile::tempdir().unwrap();
        let summary = run_batch(generator(dir.path()), 199..=199, 8).await;
        assert_eq!(summary.total(), 1);
        assert_eq!(summary.success_count, 1);
    }
}
