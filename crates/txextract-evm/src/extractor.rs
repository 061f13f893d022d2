//! `Extractor` — per-transaction pipeline from raw record to published event.
//!
//! # How it works
//! 1. Look up the calldata selector in the method registry
//! 2. No match: the transaction is a plain value transfer (`ethTransfer` topic)
//! 3. Match outside the handled set: skipped, nothing decoded
//! 4. Otherwise build the context, run the method precheck, decode the
//!    calldata, normalize it into an event and publish it under the method topic

use std::sync::{Arc, Mutex, PoisonError};

use tracing::{trace, warn};
use txextract_core::{
    context::{self, DelegateResolver},
    error::ExtractError,
    event::Event,
    method::MethodResolver,
    order::OrderHasher,
    publish::{EventPublisher, EventTopic},
    tx::{Receipt, TransactionRecord, TxBundle},
};

use crate::decoder::MethodDecoder;
use crate::hasher::KeccakOrderHasher;
use crate::normalizer;
use crate::plain;

/// Metrics snapshot for the extractor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractorMetrics {
    pub published: u64,
    pub skipped: u64,
    pub failed: u64,
}

/// What happened to one transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Published { topic: EventTopic },
    /// The selector resolved to a method outside the handled set.
    Skipped { method: String },
}

enum Routed {
    Event(EventTopic, Event),
    Skipped(String),
}

/// Turns raw transactions into published domain events.
///
/// Stateless per transaction; safe to share across threads.
pub struct Extractor {
    methods: Arc<dyn MethodResolver>,
    delegates: Arc<dyn DelegateResolver>,
    hasher: Arc<dyn OrderHasher>,
    publisher: Arc<dyn EventPublisher>,
    metrics: Mutex<ExtractorMetrics>,
}

impl Extractor {
    pub fn new(
        methods: Arc<dyn MethodResolver>,
        delegates: Arc<dyn DelegateResolver>,
        publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            methods,
            delegates,
            hasher: Arc::new(KeccakOrderHasher),
            publisher,
            metrics: Mutex::new(ExtractorMetrics::default()),
        }
    }

    /// Replace the default Keccak order hasher.
    pub fn with_hasher(mut self, hasher: Arc<dyn OrderHasher>) -> Self {
        self.hasher = hasher;
        self
    }

    /// Returns a snapshot of current metrics.
    pub fn metrics(&self) -> ExtractorMetrics {
        self.lock_metrics().clone()
    }

    /// Build the event for one transaction without publishing it.
    ///
    /// `Ok(None)` means the method is known to the registry but not handled.
    pub fn extract(
        &self,
        tx: &TransactionRecord,
        receipt: Option<&Receipt>,
        block_time: i64,
    ) -> Result<Option<(EventTopic, Event)>, ExtractError> {
        Ok(match self.route(tx, receipt, block_time)? {
            Routed::Event(topic, event) => Some((topic, event)),
            Routed::Skipped(_) => None,
        })
    }

    /// Extract and publish one transaction, updating the metrics.
    pub fn process(
        &self,
        tx: &TransactionRecord,
        receipt: Option<&Receipt>,
        block_time: i64,
    ) -> Result<Outcome, ExtractError> {
        let result = self
            .route(tx, receipt, block_time)
            .and_then(|routed| match routed {
                Routed::Event(topic, event) => {
                    self.publisher.publish(topic, &event)?;
                    Ok(Outcome::Published { topic })
                }
                Routed::Skipped(method) => Ok(Outcome::Skipped { method }),
            });

        let mut metrics = self.lock_metrics();
        match &result {
            Ok(Outcome::Published { .. }) => metrics.published += 1,
            Ok(Outcome::Skipped { .. }) => metrics.skipped += 1,
            Err(e) => {
                metrics.failed += 1;
                warn!("extractor,tx:{} {} error: {e}", tx.hash, e.kind());
            }
        }
        result
    }

    /// Convenience wrapper over [`Extractor::process`] for a bundled record.
    pub fn process_bundle(&self, bundle: &TxBundle) -> Result<Outcome, ExtractError> {
        self.process(&bundle.tx, bundle.receipt.as_ref(), bundle.block_time)
    }

    fn route(
        &self,
        tx: &TransactionRecord,
        receipt: Option<&Receipt>,
        block_time: i64,
    ) -> Result<Routed, ExtractError> {
        let description = MethodDecoder::split_selector(&tx.input)
            .ok()
            .and_then(|(selector, _)| self.methods.resolve(&selector));
        let Some(description) = description else {
            return Ok(Routed::Event(
                EventTopic::EthTransfer,
                plain::handle_plain(tx, receipt, block_time),
            ));
        };

        let Some(kind) = description.kind() else {
            trace!(
                "extractor,tx:{} method {} not handled, skipping",
                tx.hash,
                description.name()
            );
            return Ok(Routed::Skipped(description.name().to_string()));
        };

        let delegate = self.delegates.delegate_for(&tx.recipient());
        let ctx = context::build(tx, receipt, block_time, description.name(), delegate);
        normalizer::precheck(kind, &ctx)?;

        let decoded = MethodDecoder::decode(&description, &tx.input)?;
        Ok(match normalizer::dispatch(decoded, ctx, self.hasher.as_ref())? {
            Some(event) => Routed::Event(EventTopic::from(kind), event),
            None => Routed::Skipped(description.name().to_string()),
        })
    }

    fn lock_metrics(&self) -> std::sync::MutexGuard<'_, ExtractorMetrics> {
        self.metrics.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
