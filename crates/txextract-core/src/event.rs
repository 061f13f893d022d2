//! Domain events: the primary output of txextract.
//!
//! Every variant composes the transaction metadata through a named `ctx`
//! field instead of flattening it.

use alloy_primitives::{Address, B256, U256};
use serde::{Deserialize, Serialize};

use crate::context::TransactionContext;
use crate::order::Order;

/// A batched order-matching submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RingSubmissionEvent {
    pub ctx: TransactionContext,
    pub orders: Vec<Order>,
    pub fee_recipient: Address,
    pub fee_selections: u16,
    /// Set when the ring submission reverted on-chain
    #[serde(skip_serializing_if = "Option::is_none")]
    pub err: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderCancelledEvent {
    pub ctx: TransactionContext,
    pub order_hash: B256,
    pub amount_cancelled: U256,
}

/// Invalidates every order of `owner` created before `cutoff`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CutoffEvent {
    pub ctx: TransactionContext,
    pub owner: Address,
    pub cutoff: U256,
}

/// Invalidates orders of `owner` on one token pair created before `cutoff`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CutoffPairEvent {
    pub ctx: TransactionContext,
    pub owner: Address,
    pub token1: Address,
    pub token2: Address,
    pub cutoff: U256,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprovalEvent {
    pub ctx: TransactionContext,
    pub owner: Address,
    pub spender: Address,
    pub amount: U256,
}

/// Token transfer (contract call) or native-value transfer (plain transaction).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferEvent {
    pub ctx: TransactionContext,
    pub sender: Address,
    pub receiver: Address,
    pub amount: U256,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WethDepositEvent {
    pub ctx: TransactionContext,
    pub dst: Address,
    pub amount: U256,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WethWithdrawalEvent {
    pub ctx: TransactionContext,
    pub src: Address,
    pub amount: U256,
}

/// The closed set of events handed to the publisher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
    RingSubmission(RingSubmissionEvent),
    OrderCancellation(OrderCancelledEvent),
    CutoffAll(CutoffEvent),
    CutoffPair(CutoffPairEvent),
    Approval(ApprovalEvent),
    Transfer(TransferEvent),
    WethDeposit(WethDepositEvent),
    WethWithdrawal(WethWithdrawalEvent),
}

impl Event {
    /// The transaction metadata this event was built from.
    pub fn ctx(&self) -> &TransactionContext {
        match self {
            Event::RingSubmission(e) => &e.ctx,
            Event::OrderCancellation(e) => &e.ctx,
            Event::CutoffAll(e) => &e.ctx,
            Event::CutoffPair(e) => &e.ctx,
            Event::Approval(e) => &e.ctx,
            Event::Transfer(e) => &e.ctx,
            Event::WethDeposit(e) => &e.ctx,
            Event::WethWithdrawal(e) => &e.ctx,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Event::RingSubmission(_) => "RingSubmission",
            Event::OrderCancellation(_) => "OrderCancellation",
            Event::CutoffAll(_) => "CutoffAll",
            Event::CutoffPair(_) => "CutoffPair",
            Event::Approval(_) => "Approval",
            Event::Transfer(_) => "Transfer",
            Event::WethDeposit(_) => "WethDeposit",
            Event::WethWithdrawal(_) => "WethWithdrawal",
        }
    }
}
