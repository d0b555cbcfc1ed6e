// Wired application state and tokens for inbound adapter tests.

use std::collections::HashMap;
use std::sync::Arc;

use crate::modules::catalog::adapters::outbound::in_memory::InMemoryCatalog;
use crate::shared::infrastructure::event_bus::in_memory::InMemoryEventProducer;
use crate::shell::auth::JwtVerifier;
use crate::shell::config::AppConfig;
use crate::shell::state::AppState;

pub const TEST_JWT_SECRET: &str = "catalog-test-secret";

pub fn test_config() -> AppConfig {
    test_config_with(&[])
}

/// Test settings with `overrides` applied on top.
pub fn test_config_with(overrides: &[(&str, &str)]) -> AppConfig {
    let mut settings: HashMap<&str, &str> = HashMap::from([
        ("JWT_SECRET", TEST_JWT_SECRET),
        ("PUBLISH_MAX_RETRIES", "1"),
        ("PUBLISH_INITIAL_BACKOFF_MS", "1"),
    ]);
    settings.extend(overrides.iter().copied());
    AppConfig::from_lookup(|key: &str| settings.get(key).map(|v| v.to_string())).unwrap()
}

pub fn app_state(catalog: Arc<InMemoryCatalog>, producer: Arc<InMemoryEventProducer>) -> AppState {
    app_state_with(catalog, producer, &test_config())
}

pub fn app_state_with(
    catalog: Arc<InMemoryCatalog>,
    producer: Arc<InMemoryEventProducer>,
    config: &AppConfig,
) -> AppState {
    AppState::wire(catalog, producer, config)
}

pub fn token_with(roles: &[&str]) -> String {
    JwtVerifier::new(TEST_JWT_SECRET)
        .issue("test-user", roles, chrono::Duration::minutes(5))
        .unwrap()
}

pub fn bearer(roles: &[&str]) -> String {
    format!("Bearer {}", token_with(roles))
}
