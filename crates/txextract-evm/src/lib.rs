//! # txextract-evm
//!
//! Turns EVM transactions into relay domain events.
//!
//! ## Implementation notes
//! - Uses `alloy-core` dyn-abi for calldata decode against a runtime JSON ABI
//! - calldata[..4] → method selector, resolved through a `MethodResolver`
//! - calldata[4..] → ABI-encoded parameter sequence, narrowed into typed inputs
//! - Transactions without a known selector are treated as native-value transfers

pub mod batch;
pub mod decoder;
pub mod extractor;
pub mod hasher;
pub mod inputs;
pub mod normalizer;
pub mod plain;
pub mod publish;

pub use batch::{chunked_extract, parallel_extract};
pub use decoder::{DecodedMethod, MethodDecoder};
pub use extractor::{Extractor, ExtractorMetrics, Outcome};
pub use hasher::KeccakOrderHasher;
pub use inputs::MethodInputs;
pub use publish::{BroadcastPublisher, Published};
