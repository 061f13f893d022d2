//! Tokio broadcast-channel publisher.

use tokio::sync::broadcast;
use txextract_core::{
    error::PublishError,
    event::Event,
    publish::{EventPublisher, EventTopic},
};

/// One published event together with the topic it was sent under.
#[derive(Debug, Clone)]
pub struct Published {
    pub topic: EventTopic,
    pub event: Event,
}

/// Fans events out to every live `broadcast::Receiver`.
///
/// Subscribe before extraction starts; events sent while nobody listens are
/// reported as `PublishError::NoSubscribers`.
#[derive(Debug, Clone)]
pub struct BroadcastPublisher {
    tx: broadcast::Sender<Published>,
}

impl BroadcastPublisher {
    pub fn new(capacity: usize) -> (Self, broadcast::Receiver<Published>) {
        let (tx, rx) = broadcast::channel(capacity);
        (Self { tx }, rx)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Published> {
        self.tx.subscribe()
    }
}

impl EventPublisher for BroadcastPublisher {
    fn publish(&self, topic: EventTopic, event: &Event) -> Result<(), PublishError> {
        self.tx
            .send(Published {
                topic,
                event: event.clone(),
            })
            .map(|_| ())
            .map_err(|_| PublishError::NoSubscribers {
                topic: topic.to_string(),
            })
    }
}
