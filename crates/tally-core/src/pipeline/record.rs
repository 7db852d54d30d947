//! Index-tagged records flowing through the pipeline.

/// One input line, tagged with its position among all lines read.
///
/// The index is assigned by the dispatch loop in input order and is dense
/// over every line read, including lines whose resolution later fails.
/// Report ordering relies on it, never on completion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRecord {
    pub index: usize,
    /// Verbatim input line, reproduced in the report.
    pub label: String,
}

/// Completed fetch-and-count work for one source. Owned by the worker that
/// produced it until handed to the aggregator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkResult {
    pub index: usize,
    pub label: String,
    pub count: u64,
}

impl WorkResult {
    pub fn new(record: SourceRecord, count: u64) -> Self {
        Self {
            index: record.index,
            label: record.label,
            count,
        }
    }
}
