// In memory implementation of the EventProducer port.
//
// Purpose
// - Support workflow tests and local development without a broker.
//
// Responsibilities
// - Record every acknowledged message in publish order.
// - Simulate an offline broker, or a number of transient failures.

use crate::shared::infrastructure::event_bus::{EventProducer, EventProducerError};
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use tokio::sync::Mutex;

#[derive(Debug, Clone, PartialEq)]
pub struct PublishedMessage {
    pub topic: String,
    pub partition_key: String,
    pub payload: serde_json::Value,
}

#[derive(Default)]
pub struct InMemoryEventProducer {
    messages: Mutex<Vec<PublishedMessage>>,
    calls: AtomicU32,
    failures_left: AtomicU32,
    is_offline: AtomicBool,
}

impl InMemoryEventProducer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_offline(&self) {
        self.is_offline.fetch_xor(true, Ordering::SeqCst);
    }

    /// Fail the next `count` publish calls, then recover.
    pub fn fail_next(&self, count: u32) {
        self.failures_left.store(count, Ordering::SeqCst);
    }

    pub async fn published(&self) -> Vec<PublishedMessage> {
        self.messages.lock().await.clone()
    }

    /// Publish attempts, including failed ones.
    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl EventProducer for InMemoryEventProducer {
    async fn publish(
        &self,
        topic: &str,
        partition_key: &str,
        payload: &serde_json::Value,
    ) -> Result<(), EventProducerError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if self.is_offline.load(Ordering::SeqCst) {
            return Err(EventProducerError::Unreachable("Event bus offline".into()));
        }
        let transient = self
            .failures_left
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |left| left.checked_sub(1))
            .is_ok();
        if transient {
            return Err(EventProducerError::Rejected {
                status: 503,
                body: "Event bus busy".into(),
            });
        }

        self.messages.lock().await.push(PublishedMessage {
            topic: topic.to_string(),
            partition_key: partition_key.to_string(),
            payload: payload.clone(),
        });
        Ok(())
    }
}
