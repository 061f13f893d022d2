//! JSON-lines output for published events.

use serde::Serialize;
use std::io::Write;
use std::sync::Mutex;
use txextract_core::{
    error::PublishError,
    event::Event,
    publish::{EventPublisher, EventTopic},
};

/// One output line: `{"topic": "...", "event": {...}}`.
#[derive(Serialize)]
pub struct Line<'a> {
    pub topic: &'a str,
    pub event: &'a Event,
}

/// Render one output line.
pub fn render(topic: EventTopic, event: &Event) -> Result<String, serde_json::Error> {
    serde_json::to_string(&Line {
        topic: topic.as_str(),
        event,
    })
}

/// Publishes events by writing one JSON object per line.
pub struct JsonLinesPublisher<W: Write + Send> {
    out: Mutex<W>,
}

impl<W: Write + Send> JsonLinesPublisher<W> {
    pub fn new(out: W) -> Self {
        Self { out: Mutex::new(out) }
    }

    pub fn into_inner(self) -> W {
        self.out
            .into_inner()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl<W: Write + Send> EventPublisher for JsonLinesPublisher<W> {
    fn publish(&self, topic: EventTopic, event: &Event) -> Result<(), PublishError> {
        let line = render(topic, event).map_err(|e| PublishError::Transport(e.to_string()))?;
        let mut out = self
            .out
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        writeln!(out, "{line}").map_err(|e| PublishError::Transport(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{Address, B256, U256};
    use txextract_core::{context::TransactionContext, event::TransferEvent, status::TxStatus};

    #[test]
    fn writes_one_line_per_event() {
        let event = Event::Transfer(TransferEvent {
            ctx: TransactionContext {
                block_number: 1,
                block_hash: B256::ZERO,
                block_time: 0,
                tx_hash: B256::ZERO,
                tx_index: 0,
                from: Address::ZERO,
                to: Address::ZERO,
                protocol: Address::ZERO,
                delegate_address: None,
                gas_limit: U256::ZERO,
                gas_used: U256::ZERO,
                gas_price: U256::ZERO,
                nonce: 0,
                value: U256::from(5u64),
                status: TxStatus::Success,
                identify: "unknown".into(),
                log_index: 0,
            },
            sender: Address::ZERO,
            receiver: Address::ZERO,
            amount: U256::from(5u64),
        });
        let publisher = JsonLinesPublisher::new(Vec::new());
        publisher.publish(EventTopic::EthTransfer, &event).unwrap();
        publisher.publish(EventTopic::EthTransfer, &event).unwrap();

        let out = String::from_utf8(publisher.into_inner()).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        let json: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(json["topic"], "ethTransfer");
        assert_eq!(json["event"]["event"], "transfer");
    }
}
