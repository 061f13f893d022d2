//! The canonical transaction-metadata record embedded in every event.

use alloy_primitives::{Address, B256, U256};
use serde::{Deserialize, Serialize};

use crate::method::names;
use crate::status::{self, TxStatus};
use crate::tx::{Receipt, TransactionRecord};

/// Resolves the delegate contract associated with a protocol address.
///
/// Implementations are shared across threads and must answer lookups
/// without blocking.
pub trait DelegateResolver: Send + Sync {
    fn delegate_for(&self, protocol: &Address) -> Option<Address>;
}

/// Transaction metadata shared by every event produced from one transaction.
///
/// Built once per processing attempt and embedded by value; never mutated
/// after `build` returns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionContext {
    pub block_number: u64,
    pub block_hash: B256,
    /// Block timestamp (Unix seconds)
    pub block_time: i64,
    pub tx_hash: B256,
    pub tx_index: u64,
    pub from: Address,
    pub to: Address,
    /// The contract the call was sent to
    pub protocol: Address,
    /// Delegate of `protocol`, if the resolver knows one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delegate_address: Option<Address>,
    pub gas_limit: U256,
    /// Zero while the transaction is pending
    pub gas_used: U256,
    pub gas_price: U256,
    pub nonce: u64,
    pub value: U256,
    pub status: TxStatus,
    /// Method name, or `"unknown"` for plain value transfers
    pub identify: String,
    pub log_index: u32,
}

/// Build the context record for `tx` in one step.
pub fn build(
    tx: &TransactionRecord,
    receipt: Option<&Receipt>,
    block_time: i64,
    method_name: &str,
    delegate_address: Option<Address>,
) -> TransactionContext {
    let recipient = tx.recipient();
    TransactionContext {
        block_number: tx.block_number.to::<u64>(),
        block_hash: tx.block_hash,
        block_time,
        tx_hash: tx.hash,
        tx_index: tx.transaction_index.to::<u64>(),
        from: tx.from,
        to: recipient,
        protocol: recipient,
        delegate_address,
        gas_limit: tx.gas,
        gas_used: receipt.map(|r| r.gas_used).unwrap_or(U256::ZERO),
        gas_price: tx.gas_price,
        nonce: tx.nonce.to::<u64>(),
        value: tx.value,
        status: status::resolve(tx, receipt),
        identify: method_name.to_string(),
        log_index: 0,
    }
}

impl TransactionContext {
    /// Whether this context belongs to a plain value transfer.
    pub fn is_plain_transfer(&self) -> bool {
        self.identify == names::UNKNOWN
    }
}
