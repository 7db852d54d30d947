//! Final ordered report.

use std::io::{self, Write};

use super::aggregate::AggregateState;
use super::record::WorkResult;

/// Per-source counts restored to input order, plus the grand total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TallyReport {
    entries: Vec<WorkResult>,
    total: u64,
    peak_workers: usize,
}

impl TallyReport {
    /// Orders the collected results by their original input index. Indices
    /// are unique, so the ordering is fully determined.
    pub fn from_state(state: AggregateState) -> Self {
        let (mut entries, total) = state.into_parts();
        entries.sort_by_key(|r| r.index);
        Self {
            entries,
            total,
            peak_workers: 0,
        }
    }

    pub(crate) fn with_peak_workers(mut self, peak: usize) -> Self {
        self.peak_workers = peak;
        self
    }

    pub fn entries(&self) -> &[WorkResult] {
        &self.entries
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    /// Highest number of workers observed in flight during the run. Never
    /// written to the report output; exists for logging and for checking the
    /// concurrency cap from tests.
    pub fn peak_workers(&self) -> usize {
        self.peak_workers
    }

    /// Writes the fixed report format: one `Count for <label>: <count>` line
    /// per source in input order, then `Total: <sum>`.
    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for entry in &self.entries {
            writeln!(out, "Count for {}: {}", entry.label, entry.count)?;
        }
        writeln!(out, "Total: {}", self.total)
    }
}
