//! Concurrency pipeline: dispatch, aggregation, ordered reporting.
//!
//! The dispatch loop reads sources in input order and fans work out to a
//! bounded set of concurrent fetch-and-count workers. The aggregator collects
//! unordered results and the running total. The reporter restores input
//! order. Launch order equals input order; completion order is arbitrary;
//! report order equals input order again.

mod aggregate;
mod dispatch;
mod record;
mod report;

pub use aggregate::AggregateState;
pub use dispatch::{run_sources, PipelineOptions};
pub use record::{SourceRecord, WorkResult};
pub use report::TallyReport;
