// Outbound port to the message broker.
//
// An `Ok(())` from `publish` only means the broker acknowledged the message.
// Consumer processing is out of reach of this port.

pub mod in_memory;
pub mod pulsar_event_producer;

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EventProducerError {
    #[error("failed to serialize event: {0}")]
    Serialization(String),

    #[error("broker unreachable: {0}")]
    Unreachable(String),

    #[error("broker rejected the message with status {status}: {body}")]
    Rejected { status: u16, body: String },
}

#[async_trait]
pub trait EventProducer: Send + Sync {
    async fn publish(
        &self,
        topic: &str,
        partition_key: &str,
        payload: &serde_json::Value,
    ) -> Result<(), EventProducerError>;
}
