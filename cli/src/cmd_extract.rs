//! `txextract extract` — extract and print the event of one transaction.

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;
use txextract_core::tx::{Receipt, TransactionRecord};
use txextract_evm::{Extractor, Outcome};

use crate::config::ExtractorConfig;
use crate::output::JsonLinesPublisher;

pub fn run(
    config: &ExtractorConfig,
    tx_path: &Path,
    receipt_path: Option<&Path>,
    block_time: i64,
) -> Result<()> {
    let tx: TransactionRecord = crate::read_json(tx_path)?;
    let receipt: Option<Receipt> = receipt_path.map(crate::read_json::<Receipt>).transpose()?;

    let registry = crate::load_registry(&config.abi_dir)?;
    let extractor = Extractor::new(
        Arc::new(registry),
        Arc::new(config.delegates()),
        Arc::new(JsonLinesPublisher::new(std::io::stdout())),
    );

    match extractor.process(&tx, receipt.as_ref(), block_time)? {
        Outcome::Published { topic } => tracing::debug!("published on {topic}"),
        Outcome::Skipped { method } => eprintln!("method '{method}' is not handled; no event"),
    }
    Ok(())
}
