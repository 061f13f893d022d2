//! # txextract-core
//!
//! Core types, capability traits, and primitives shared across all txextract
//! crates. The method decoder, the event normalizer, and the extraction
//! pipeline are all built on top of the interfaces defined here.

pub mod context;
pub mod error;
pub mod event;
pub mod method;
pub mod order;
pub mod publish;
pub mod status;
pub mod tx;

pub use context::{DelegateResolver, TransactionContext};
pub use error::{DecodeError, ExtractError, PublishError, RegistryError};
pub use event::{
    ApprovalEvent, CutoffEvent, CutoffPairEvent, Event, OrderCancelledEvent, RingSubmissionEvent,
    TransferEvent, WethDepositEvent, WethWithdrawalEvent,
};
pub use method::{MethodDescription, MethodKind, MethodResolver};
pub use order::{Order, OrderHasher};
pub use publish::{EventPublisher, EventTopic};
pub use status::TxStatus;
pub use tx::{Receipt, TransactionRecord, TxBundle};
