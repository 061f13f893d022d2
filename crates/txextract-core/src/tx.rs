//! Raw transaction and receipt records as delivered by the ingestion layer.
//!
//! Field names and encodings follow the Ethereum JSON-RPC shape
//! (`eth_getTransactionByHash` / `eth_getTransactionReceipt`), so records can
//! be deserialized straight from node responses.

use alloy_primitives::{Address, Bytes, B256, U256, U64};
use serde::{Deserialize, Serialize};

/// A raw, undecoded transaction. This is the input to every extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    pub hash: B256,
    pub block_hash: B256,
    pub block_number: U64,
    pub transaction_index: U64,
    pub from: Address,
    /// `None` for contract-creation transactions
    #[serde(default)]
    pub to: Option<Address>,
    /// Gas limit supplied by the sender
    pub gas: U256,
    pub gas_price: U256,
    pub nonce: U64,
    pub value: U256,
    /// Raw calldata: 4-byte selector followed by ABI-encoded arguments, or empty
    #[serde(default)]
    pub input: Bytes,
}

impl TransactionRecord {
    /// Recipient address, with contract creation mapped to the zero address.
    pub fn recipient(&self) -> Address {
        self.to.unwrap_or_default()
    }
}

/// The subset of a transaction receipt the extractor consumes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    pub gas_used: U256,
    /// EIP-658 status (1 = success, 0 = revert). Absent on pre-Byzantium receipts.
    #[serde(default)]
    pub status: Option<U64>,
}

impl Receipt {
    /// Whether the receipt records an execution failure.
    ///
    /// Pre-Byzantium receipts carry no status; there a transaction that burned
    /// its whole gas limit is treated as reverted.
    pub fn failed(&self, tx: &TransactionRecord) -> bool {
        match self.status {
            Some(status) => status == U64::ZERO,
            None => self.gas_used == tx.gas,
        }
    }
}

/// One unit of extraction work: a transaction with its block context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TxBundle {
    pub tx: TransactionRecord,
    #[serde(default)]
    pub receipt: Option<Receipt>,
    /// Block timestamp (Unix seconds)
    pub block_time: i64,
}
