//! Error types for the txextract pipeline.

use thiserror::Error;

/// Errors that can occur while decoding a single method's calldata.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("calldata too short: {len} bytes (need at least 4 for selector)")]
    CalldataTooShort { len: usize },

    #[error("selector mismatch: description declares {expected}, calldata carries {got}")]
    SelectorMismatch { expected: String, got: String },

    #[error("unresolvable parameter type in '{method}': {reason}")]
    UnresolvableType { method: String, reason: String },

    #[error("ABI decode failed: {reason}")]
    AbiDecodeFailed { reason: String },
}

/// Errors that abort extraction of a single transaction.
///
/// Skipped methods are not errors; they surface as `Ok(None)` from the
/// normalizer.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    #[error("{method} method inputs shape mismatch: {reason}")]
    ShapeMismatch { method: String, reason: String },

    #[error("{method} method precheck failed: {reason}")]
    Precheck { method: String, reason: String },

    #[error("publish failed: {0}")]
    Publish(#[from] PublishError),
}

impl ExtractError {
    pub fn shape(method: &str, reason: impl Into<String>) -> Self {
        Self::ShapeMismatch {
            method: method.to_string(),
            reason: reason.into(),
        }
    }

    /// Short, stable label used as a metrics/log key.
    pub fn kind(&self) -> &'static str {
        match self {
            ExtractError::Decode(_) => "decode",
            ExtractError::ShapeMismatch { .. } => "shape_mismatch",
            ExtractError::Precheck { .. } => "precheck",
            ExtractError::Publish(_) => "publish",
        }
    }
}

/// Errors reported by an `EventPublisher`.
#[derive(Debug, Error)]
pub enum PublishError {
    #[error("no active subscribers for topic {topic}")]
    NoSubscribers { topic: String },

    #[error("transport error: {0}")]
    Transport(String),
}

/// Errors from the method registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("selector {selector} already registered as '{existing}'")]
    AlreadyExists { selector: String, existing: String },

    #[error("invalid ABI JSON: {reason}")]
    InvalidAbi { reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
