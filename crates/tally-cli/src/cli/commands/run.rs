//! `tally run` – count sources listed on stdin.

use anyhow::{Context, Result};
use tally_core::config::TallyConfig;
use tally_core::pipeline::{self, PipelineOptions};
use tally_core::source::SourceResolver;

pub async fn run_count(
    cfg: &TallyConfig,
    workers: Option<usize>,
    pattern: Option<String>,
) -> Result<()> {
    let opts = PipelineOptions {
        worker_limit: workers.unwrap_or(cfg.worker_limit),
        pattern: pattern.unwrap_or_else(|| cfg.pattern.clone()),
    };
    let resolver = SourceResolver::new(cfg.connect_timeout_secs, cfg.request_timeout_secs)?;

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let report = pipeline::run_sources(stdin, &resolver, &opts).await?;
    tracing::info!(
        sources = report.entries().len(),
        total = report.total(),
        "pipeline finished"
    );

    let stdout = std::io::stdout();
    report.write_to(&mut stdout.lock()).context("write report")?;
    Ok(())
}
