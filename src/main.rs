use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{EnvFilter, fmt};

use movie_catalog::modules::catalog::adapters::outbound::in_memory::InMemoryCatalog;
use movie_catalog::modules::catalog::adapters::outbound::postgres::PgCatalog;
use movie_catalog::shared::infrastructure::event_bus::EventProducer;
use movie_catalog::shared::infrastructure::event_bus::in_memory::InMemoryEventProducer;
use movie_catalog::shared::infrastructure::event_bus::pulsar_event_producer::PulsarEventProducer;
use movie_catalog::shell::config::AppConfig;
use movie_catalog::shell::http::router;
use movie_catalog::shell::state::AppState;

const NOTIFICATION_DRAIN_LIMIT: Duration = Duration::from_secs(10);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::from_env().context("loading configuration")?;

    let producer: Arc<dyn EventProducer> = match &config.pulsar {
        Some(pulsar) => {
            tracing::info!(url = %pulsar.url, tenant = %pulsar.tenant, namespace = %pulsar.namespace, "publishing to pulsar");
            Arc::new(PulsarEventProducer::new(
                "movie-catalog",
                pulsar.url.clone(),
                pulsar.tenant.clone(),
                pulsar.namespace.clone(),
            ))
        }
        None => {
            tracing::warn!("PULSAR_URL not set, events stay in memory");
            Arc::new(InMemoryEventProducer::new())
        }
    };

    let state = match &config.database_url {
        Some(url) => {
            let pool = PgPoolOptions::new()
                .max_connections(10)
                .connect(url)
                .await
                .context("connecting to postgres")?;
            let catalog = Arc::new(PgCatalog::new(pool));
            catalog.migrate().await.context("running migrations")?;
            tracing::info!("catalog backed by postgres");
            AppState::wire(catalog, producer, &config)
        }
        None => {
            tracing::warn!("DATABASE_URL not set, catalog is in memory and starts empty");
            AppState::wire(Arc::new(InMemoryCatalog::new()), producer, &config)
        }
    };

    let strategy = state.discovery.strategy();
    let create_screening = state.create_screening.clone();
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(config.http_addr)
        .await
        .with_context(|| format!("binding {}", config.http_addr))?;
    tracing::info!(
        addr = %config.http_addr,
        %strategy,
        "listening; GraphQL at /graphql"
    );
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    create_screening
        .drain_notifications(NOTIFICATION_DRAIN_LIMIT)
        .await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "could not listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
