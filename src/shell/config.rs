// Process configuration, read from the environment (a `.env` file is honoured).

use std::net::SocketAddr;
use std::time::Duration;
use thiserror::Error;

use crate::modules::catalog::adapters::outbound::screening_notifier::SHOW_CREATED_TOPIC;
use crate::modules::catalog::use_cases::find_screenings::query::DiscoveryStrategy;
use crate::shared::core::retry::RetryPolicy;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required setting {0}")]
    Missing(&'static str),

    #[error("invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct PulsarConfig {
    pub url: String,
    pub tenant: String,
    pub namespace: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub http_addr: SocketAddr,
    /// `None` selects the in-memory catalog.
    pub database_url: Option<String>,
    /// `None` selects the in-memory event producer.
    pub pulsar: Option<PulsarConfig>,
    pub show_created_topic: String,
    pub discovery_strategy: DiscoveryStrategy,
    pub jwt_secret: String,
    pub publish_retry: RetryPolicy,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let http_addr: SocketAddr = parse_or("HTTP_ADDR", get("HTTP_ADDR"), "0.0.0.0:8080".parse().ok())?;
        let discovery_strategy =
            parse_or("DISCOVERY_STRATEGY", get("DISCOVERY_STRATEGY"), Some(DiscoveryStrategy::Join))?;
        let max_retries = parse_or("PUBLISH_MAX_RETRIES", get("PUBLISH_MAX_RETRIES"), Some(3u32))?;
        let initial_backoff_ms = parse_or(
            "PUBLISH_INITIAL_BACKOFF_MS",
            get("PUBLISH_INITIAL_BACKOFF_MS"),
            Some(100u64),
        )?;
        let jwt_secret = get("JWT_SECRET").ok_or(ConfigError::Missing("JWT_SECRET"))?;

        let pulsar = get("PULSAR_URL").map(|url| PulsarConfig {
            url,
            tenant: get("PULSAR_TENANT").unwrap_or_else(|| "public".into()),
            namespace: get("PULSAR_NAMESPACE").unwrap_or_else(|| "default".into()),
        });

        Ok(Self {
            http_addr,
            database_url: get("DATABASE_URL"),
            pulsar,
            show_created_topic: get("SHOW_CREATED_TOPIC").unwrap_or_else(|| SHOW_CREATED_TOPIC.into()),
            discovery_strategy,
            jwt_secret,
            publish_retry: RetryPolicy {
                max_retries,
                initial_delay: Duration::from_millis(initial_backoff_ms),
                ..RetryPolicy::default()
            },
        })
    }
}

fn parse_or<T>(key: &'static str, raw: Option<String>, default: Option<T>) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        Some(value) => value.trim().parse().map_err(|err: T::Err| ConfigError::Invalid {
            key,
            reason: err.to_string(),
        }),
        None => default.ok_or(ConfigError::Missing(key)),
    }
}
