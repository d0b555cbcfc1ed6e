use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use serde::Serialize;

use crate::shared::infrastructure::event_bus::{EventProducer, EventProducerError};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PulsarProducerMessageProperties {
    event_type: String,
    timestamp: i64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PulsarProducerMessage {
    payload: String,
    key: Option<String>,
    properties: Option<PulsarProducerMessageProperties>,
    replication_clusters: Option<Vec<String>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PulsarProducerBody<'a> {
    producer_name: &'a str,
    messages: Vec<PulsarProducerMessage>,
}

/// Publishes through the Pulsar REST producer endpoint.
/// The partition key becomes the message key, which Pulsar uses for key-based routing.
#[derive(Debug, Clone)]
pub struct PulsarEventProducer {
    client: Client,
    producer_name: String,
    broker_url: String,
    tenant: String,
    namespace: String,
}

impl PulsarEventProducer {
    pub fn new(
        producer_name: impl Into<String>,
        broker_url: impl Into<String>,
        tenant: impl Into<String>,
        namespace: impl Into<String>,
    ) -> Self {
        Self {
            client: Client::new(),
            producer_name: producer_name.into(),
            broker_url: broker_url.into().trim_end_matches('/').to_string(),
            tenant: tenant.into(),
            namespace: namespace.into(),
        }
    }

    fn topic_url(&self, topic: &str) -> String {
        format!(
            "{}/topics/persistent/{}/{}/{}",
            self.broker_url, self.tenant, self.namespace, topic
        )
    }
}

fn event_type_of(payload: &serde_json::Value) -> String {
    payload
        .get("type")
        .and_then(|t| t.as_str())
        .unwrap_or("unknown")
        .to_string()
}

#[async_trait]
impl EventProducer for PulsarEventProducer {
    async fn publish(
        &self,
        topic: &str,
        partition_key: &str,
        payload: &serde_json::Value,
    ) -> Result<(), EventProducerError> {
        let serialized = serde_json::to_string(payload)
            .map_err(|err| EventProducerError::Serialization(err.to_string()))?;

        let body = PulsarProducerBody {
            producer_name: &self.producer_name,
            messages: vec![PulsarProducerMessage {
                payload: serialized,
                key: Some(partition_key.to_string()),
                properties: Some(PulsarProducerMessageProperties {
                    event_type: event_type_of(payload),
                    timestamp: Utc::now().timestamp_millis(),
                }),
                replication_clusters: None,
            }],
        };

        let response = self
            .client
            .post(self.topic_url(topic))
            .json(&body)
            .send()
            .await
            .map_err(|err| EventProducerError::Unreachable(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(EventProducerError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        Ok(())
    }
}
