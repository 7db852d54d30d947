//! Dispatch loop: sequential input reading, bounded-concurrency workers.
//!
//! Reads source identifiers line by line, resolves each one in the loop, and
//! spawns one fetch-and-count worker per resolved source. A semaphore caps
//! the workers in flight; acquisition blocks this loop, not the workers, so
//! launch order always equals input order. Failed resolutions are logged and
//! dropped without a result.

use anyhow::{Context, Result};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::{mpsc, Semaphore};
use tokio::task::JoinSet;

use crate::counter;
use crate::source::SourceResolver;

use super::aggregate;
use super::record::{SourceRecord, WorkResult};
use super::report::TallyReport;

/// Result channel capacity. A worker blocks briefly on a full channel while
/// the aggregator catches up.
const RESULT_CHANNEL_CAPACITY: usize = 16;

/// Tracks how many workers run at once and the highest value that reached.
/// Workers only exist while holding a semaphore permit, so the peak can
/// never exceed the worker limit.
#[derive(Debug, Default)]
struct WorkerGauge {
    in_flight: AtomicUsize,
    peak: AtomicUsize,
}

impl WorkerGauge {
    fn enter(&self) {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
    }

    fn exit(&self) {
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
    }

    fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}

/// Tuning for one pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// Maximum fetch-and-count workers in flight (clamped to at least 1).
    pub worker_limit: usize,
    /// Marker substring counted in each source.
    pub pattern: String,
}

/// Runs the whole pipeline over `input` and returns the ordered report.
///
/// Workers may finish in any order; the report restores input order. Sources
/// that fail to resolve are skipped and appear nowhere in the report or the
/// total.
pub async fn run_sources<R>(
    input: R,
    resolver: &SourceResolver,
    opts: &PipelineOptions,
) -> Result<TallyReport>
where
    R: AsyncBufRead + Unpin,
{
    let limiter = Arc::new(Semaphore::new(opts.worker_limit.max(1)));
    let pattern: Arc<str> = Arc::from(opts.pattern.as_str());
    let gauge = Arc::new(WorkerGauge::default());
    let (result_tx, result_rx) = mpsc::channel::<WorkResult>(RESULT_CHANNEL_CAPACITY);
    let aggregator = aggregate::spawn(result_rx);

    let mut workers = JoinSet::new();
    let mut lines = input.lines();
    let mut index = 0usize;
    while let Some(label) = lines.next_line().await.context("read input line")? {
        let record = SourceRecord { index, label };
        index += 1;

        // Resolution happens here, in input order. A failure drops the
        // source without consuming a slot or producing a result.
        let stream = match resolver.open(&record.label).await {
            Ok(stream) => stream,
            Err(err) => {
                tracing::warn!(source = %record.label, "skipping source: {:#}", err);
                continue;
            }
        };

        let permit = Arc::clone(&limiter)
            .acquire_owned()
            .await
            .context("concurrency limiter closed")?;
        let tx = result_tx.clone();
        let pattern = Arc::clone(&pattern);
        let gauge = Arc::clone(&gauge);
        workers.spawn(async move {
            gauge.enter();
            // count_stream consumes the stream, so it is closed on every
            // exit path before the result is delivered.
            let count = counter::count_stream(stream, pattern.as_bytes()).await;
            let result = WorkResult::new(record, count);
            // The aggregator only stops after all senders drop, so a send
            // error cannot happen while this worker holds its tx.
            let _ = tx.send(result).await;
            // Leave the gauge before releasing the slot; a successor worker
            // may start the moment the permit drops.
            gauge.exit();
            drop(permit);
        });
    }

    // Wait for every launched worker to finish, not merely for slot release.
    // Only then may the result channel close.
    while let Some(joined) = workers.join_next().await {
        if let Err(err) = joined {
            tracing::warn!("worker task failed: {}", err);
        }
    }
    drop(result_tx);

    let state = aggregator.await.context("aggregator task failed")?;
    tracing::debug!(
        collected = state.len(),
        total = state.total(),
        peak_workers = gauge.peak(),
        "pipeline drained"
    );
    Ok(TallyReport::from_state(state).with_peak_workers(gauge.peak()))
}
