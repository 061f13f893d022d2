//! `txextract batch` — extract many transactions in parallel.
//!
//! Events flow through a broadcast channel to a printer task while the
//! rayon workers run on the blocking pool.

use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use txextract_core::tx::TxBundle;
use txextract_evm::{chunked_extract, BroadcastPublisher, Extractor};

use crate::config::ExtractorConfig;
use crate::output;

pub async fn run(config: &ExtractorConfig, input: &Path) -> Result<()> {
    let bundles = read_bundles(input)?;
    let registry = crate::load_registry(&config.abi_dir)?;

    let (publisher, mut rx) = BroadcastPublisher::new(bundles.len().max(1));
    let extractor = Extractor::new(
        Arc::new(registry),
        Arc::new(config.delegates()),
        Arc::new(publisher),
    );

    let printer = tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(published) => match output::render(published.topic, &published.event) {
                    Ok(line) => println!("{line}"),
                    Err(e) => tracing::warn!("render error: {e}"),
                },
                Err(RecvError::Lagged(n)) => tracing::warn!("printer lagged, {n} events dropped"),
                Err(RecvError::Closed) => break,
            }
        }
    });

    let chunk_size = config.batch_chunk_size;
    let (outcomes, errors, metrics) = tokio::task::spawn_blocking(move || {
        let (outcomes, errors) = chunked_extract(&extractor, &bundles, chunk_size);
        // Dropping the extractor closes the channel and stops the printer.
        let metrics = extractor.metrics();
        (outcomes, errors, metrics)
    })
    .await
    .context("extraction task panicked")?;
    printer.await.context("printer task panicked")?;

    for (idx, err) in &errors {
        eprintln!("bundle {idx}: {err}");
    }
    eprintln!(
        "{} processed: {} published, {} skipped, {} failed",
        outcomes.len() + errors.len(),
        metrics.published,
        metrics.skipped,
        metrics.failed
    );
    Ok(())
}

fn read_bundles(path: &Path) -> Result<Vec<TxBundle>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("read '{}'", path.display()))?;
    parse_bundles(&content).with_context(|| format!("parse '{}'", path.display()))
}

/// Accept either a JSON array or one bundle per line.
fn parse_bundles(content: &str) -> Result<Vec<TxBundle>> {
    if content.trim_start().starts_with('[') {
        return Ok(serde_json::from_str(content)?);
    }
    content
        .lines()
        .filter(|l| !l.trim().is_empty())
        .enumerate()
        .map(|(i, line)| serde_json::from_str(line).with_context(|| format!("line {}", i + 1)))
        .collect()
}
