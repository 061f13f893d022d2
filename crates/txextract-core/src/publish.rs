//! Publish topics and the `EventPublisher` capability.

use std::fmt;

use crate::error::PublishError;
use crate::event::Event;
use crate::method::MethodKind;

/// Named stream an event is delivered on.
///
/// Method-derived events use the method name. Native-value transfers get
/// their own topic so downstream consumers can tell them apart from token
/// `transfer` calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventTopic {
    Method(MethodKind),
    EthTransfer,
}

impl EventTopic {
    pub const ETH_TRANSFER: &'static str = "ethTransfer";

    pub fn as_str(&self) -> &'static str {
        match self {
            EventTopic::Method(kind) => kind.as_str(),
            EventTopic::EthTransfer => Self::ETH_TRANSFER,
        }
    }
}

impl From<MethodKind> for EventTopic {
    fn from(kind: MethodKind) -> Self {
        EventTopic::Method(kind)
    }
}

impl fmt::Display for EventTopic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Delivers one event under a topic.
///
/// Called synchronously by the extractor; retry and buffering belong to the
/// implementation.
pub trait EventPublisher: Send + Sync {
    fn publish(&self, topic: EventTopic, event: &Event) -> Result<(), PublishError>;
}
