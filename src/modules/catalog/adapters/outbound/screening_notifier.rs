use std::sync::Arc;

use crate::modules::catalog::core::events::{SCREENING_CREATED_EVENT_TYPE, ScreeningCreatedEvent};
use crate::modules::catalog::use_cases::create_screening::outcome::NotificationOutcome;
use crate::shared::core::retry::{RetryPolicy, retry_with_backoff};
use crate::shared::infrastructure::event_bus::{EventProducer, EventProducerError};

pub const SHOW_CREATED_TOPIC: &str = "show.created";

/// Publishes `ScreeningCreatedEvent`s keyed by screening id, with bounded retry.
pub struct ScreeningNotifier {
    topic: String,
    producer: Arc<dyn EventProducer>,
    retry: RetryPolicy,
}

impl ScreeningNotifier {
    pub fn new(
        topic: impl Into<String>,
        producer: Arc<dyn EventProducer>,
        retry: RetryPolicy,
    ) -> Self {
        Self {
            topic: topic.into(),
            producer,
            retry,
        }
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    #[tracing::instrument(skip(self, event), fields(screening_id = %event.show_id(), topic = %self.topic))]
    pub async fn notify(&self, event: &ScreeningCreatedEvent) -> NotificationOutcome {
        let payload = match to_payload(event) {
            Ok(payload) => payload,
            Err(err) => {
                tracing::error!(error = %err, "screening created event not serializable");
                return NotificationOutcome::Failed {
                    attempts: 0,
                    reason: err.to_string(),
                };
            }
        };
        let key = event.partition_key();

        let outcome = retry_with_backoff(&self.retry, || {
            self.producer.publish(&self.topic, &key, &payload)
        })
        .await;

        match outcome.value {
            Ok(()) => {
                tracing::info!(attempts = outcome.attempts, "screening created event published");
                NotificationOutcome::Delivered {
                    attempts: outcome.attempts,
                }
            }
            Err(err) => {
                tracing::error!(
                    attempts = outcome.attempts,
                    error = %err,
                    "screening created event not delivered"
                );
                NotificationOutcome::Failed {
                    attempts: outcome.attempts,
                    reason: err.to_string(),
                }
            }
        }
    }
}

fn to_payload(event: &ScreeningCreatedEvent) -> Result<serde_json::Value, EventProducerError> {
    let mut payload = serde_json::to_value(event)
        .map_err(|err| EventProducerError::Serialization(err.to_string()))?;
    match payload.as_object_mut() {
        Some(fields) => {
            fields.insert("type".into(), SCREENING_CREATED_EVENT_TYPE.into());
            Ok(payload)
        }
        None => Err(EventProducerError::Serialization(
            "event did not serialize to an object".into(),
        )),
    }
}
