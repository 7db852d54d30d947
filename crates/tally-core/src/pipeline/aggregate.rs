//! Result aggregation: unordered collection plus the running total.

use tokio::sync::mpsc::Receiver;
use tokio::task::JoinHandle;

use super::record::WorkResult;

/// Collected results and their running total.
///
/// Owned and mutated only by the aggregator task (single writer); everyone
/// else sees it after that task finishes.
#[derive(Debug, Default)]
pub struct AggregateState {
    results: Vec<WorkResult>,
    total: u64,
}

impl AggregateState {
    pub(crate) fn absorb(&mut self, result: WorkResult) {
        self.total += result.count;
        self.results.push(result);
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Consumes the state, yielding results in arrival order plus the total.
    pub(crate) fn into_parts(self) -> (Vec<WorkResult>, u64) {
        (self.results, self.total)
    }
}

/// Spawns the aggregator task.
///
/// Taking the receiver by move makes a second start impossible. The task
/// finishes only once every sender is gone and all buffered results are
/// drained, which is the dispatch loop's "no more results" signal.
pub(crate) fn spawn(mut results_rx: Receiver<WorkResult>) -> JoinHandle<AggregateState> {
    tokio::spawn(async move {
        let mut state = AggregateState::default();
        while let Some(result) = results_rx.recv().await {
            tracing::debug!(index = result.index, count = result.count, "collected result");
            state.absorb(result);
        }
        state
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    fn result(index: usize, count: u64) -> WorkResult {
        WorkResult {
            index,
            label: format!("source-{}", index),
            count,
        }
    }

    #[test]
    fn absorb_accumulates_results_and_total() {
        let mut state = AggregateState::default();
        state.absorb(result(2, 8));
        state.absorb(result(0, 3));
        assert_eq!(state.len(), 2);
        assert_eq!(state.total(), 11);
    }

    #[tokio::test]
    async fn aggregator_drains_until_all_senders_drop() {
        let (tx, rx) = mpsc::channel(4);
        let handle = spawn(rx);

        // Two producers delivering out of order, like workers would.
        let tx2 = tx.clone();
        let a = tokio::spawn(async move { tx2.send(result(1, 5)).await.unwrap() });
        let b = tokio::spawn(async move { tx.send(result(0, 2)).await.unwrap() });
        a.await.unwrap();
        b.await.unwrap();

        let state = handle.await.unwrap();
        assert_eq!(state.len(), 2);
        assert_eq!(state.total(), 7);
    }

    #[tokio::test]
    async fn aggregator_of_empty_channel_is_empty() {
        let (tx, rx) = mpsc::channel::<WorkResult>(1);
        let handle = spawn(rx);
        drop(tx);
        let state = handle.await.unwrap();
        assert!(state.is_empty());
        assert_eq!(state.total(), 0);
    }
}
