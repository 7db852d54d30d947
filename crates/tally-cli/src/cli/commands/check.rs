//! `tally check` – resolve and count one source, surfacing failures.
//!
//! Unlike the pipeline, which absorbs resolution failures, this one-shot
//! diagnostic command reports them as process errors.

use anyhow::{Context, Result};
use tally_core::config::TallyConfig;
use tally_core::counter;
use tally_core::source::{SourceKind, SourceResolver};

pub async fn run_check(cfg: &TallyConfig, source: &str, pattern: Option<String>) -> Result<()> {
    let pattern = pattern.unwrap_or_else(|| cfg.pattern.clone());
    let resolver = SourceResolver::new(cfg.connect_timeout_secs, cfg.request_timeout_secs)?;

    let kind = SourceKind::classify(source);
    tracing::debug!(?kind, source, "checking single source");
    let stream = resolver.open(source).await.context("resolve source")?;
    let count = counter::count_stream(stream, pattern.as_bytes()).await;

    match kind {
        SourceKind::Remote => println!("{} (url)", source),
        SourceKind::Local => println!("{} (file)", source),
    }
    println!("Count for {}: {}", source, count);
    Ok(())
}
