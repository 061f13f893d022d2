//! Relay order record and the order-hash capability.

use alloy_primitives::{Address, B256, U256};
use serde::{Deserialize, Serialize};

/// An order as carried by `submitRing` and `cancelOrder` calldata.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Order {
    pub protocol: Address,
    pub delegate_address: Address,
    pub owner: Address,
    pub token_s: Address,
    pub token_b: Address,
    pub wallet_address: Address,
    pub auth_addr: Address,
    pub amount_s: U256,
    pub amount_b: U256,
    /// Unix seconds
    pub valid_since: U256,
    /// Unix seconds
    pub valid_until: U256,
    pub lrc_fee: U256,
    pub buy_no_more_than_amount_b: bool,
    pub margin_split_percentage: u8,
    pub v: u8,
    pub r: B256,
    pub s: B256,
    /// Canonical order hash; zero until computed
    pub hash: B256,
}

/// Computes the canonical hash of an order.
pub trait OrderHasher: Send + Sync {
    fn order_hash(&self, order: &Order) -> B256;
}
