//! Execution status derived from an optional receipt.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::tx::{Receipt, TransactionRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxStatus {
    /// No receipt yet: the transaction has not been mined
    Pending,
    Success,
    Failed,
}

impl fmt::Display for TxStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TxStatus::Pending => write!(f, "pending"),
            TxStatus::Success => write!(f, "success"),
            TxStatus::Failed => write!(f, "failed"),
        }
    }
}

/// Resolve a transaction's execution status.
pub fn resolve(tx: &TransactionRecord, receipt: Option<&Receipt>) -> TxStatus {
    match receipt {
        None => TxStatus::Pending,
        Some(r) if r.failed(tx) => TxStatus::Failed,
        Some(_) => TxStatus::Success,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{Address, Bytes, B256, U256, U64};

    fn tx() -> TransactionRecord {
        TransactionRecord {
            hash: B256::ZERO,
            block_hash: B256::ZERO,
            block_number: U64::from(1),
            transaction_index: U64::ZERO,
            from: Address::ZERO,
            to: None,
            gas: U256::from(100_000u64),
            gas_price: U256::ZERO,
            nonce: U64::ZERO,
            value: U256::ZERO,
            input: Bytes::new(),
        }
    }

    #[test]
    fn status_table() {
        let tx = tx();
        let failed = Receipt { gas_used: U256::from(50_000u64), status: Some(U64::ZERO) };
        let success = Receipt { gas_used: U256::from(50_000u64), status: Some(U64::from(1)) };

        assert_eq!(resolve(&tx, None), TxStatus::Pending);
        assert_eq!(resolve(&tx, Some(&failed)), TxStatus::Failed);
        assert_eq!(resolve(&tx, Some(&success)), TxStatus::Success);
    }

    #[test]
    fn status_display() {
        assert_eq!(TxStatus::Pending.to_string(), "pending");
        assert_eq!(TxStatus::Failed.to_string(), "failed");
    }
}
