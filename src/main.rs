//! Payment records server
//!
//! Reads configuration from the YAML file named by `PAYMENTS_CONFIG`
//! (defaults when unset); `DATABASE_URL` overrides `storage.database_url`.

use anyhow::Result;
use payments::config::{ServiceConfig, StorageBackend};
use payments::core::{PaymentService, PaymentStore};
use payments::server::{AppState, build_router, serve};
use payments::storage::InMemoryPaymentStore;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = load_config()?;
    config.validate()?;

    let store = build_store(&config).await?;
    tracing::info!(backend = store.backend_name(), "payment store ready");

    let state = AppState::new(PaymentService::new(store), config.search.clone())?;
    let app = build_router(state);

    serve(app, &config.server.bind_addr).await
}

fn load_config() -> Result<ServiceConfig> {
    let config = match std::env::var("PAYMENTS_CONFIG") {
        Ok(path) => {
            tracing::info!("Loading configuration from {}", path);
            ServiceConfig::from_yaml_file(&path)?
        }
        Err(_) => ServiceConfig::default(),
    };

    Ok(match std::env::var("DATABASE_URL") {
        Ok(url) => config.with_database_url(url),
        Err(_) => config,
    })
}

async fn build_store(config: &ServiceConfig) -> Result<Arc<dyn PaymentStore>> {
    match config.storage.backend {
        StorageBackend::InMemory => Ok(Arc::new(InMemoryPaymentStore::new())),
        StorageBackend::Postgres => postgres_store(config).await,
    }
}

#[cfg(feature = "postgres")]
async fn postgres_store(config: &ServiceConfig) -> Result<Arc<dyn PaymentStore>> {
    use payments::storage::{PostgresPaymentStore, postgres::ensure_schema};
    use sqlx::postgres::PgPoolOptions;
    use std::time::Duration;

    let url = config
        .storage
        .database_url
        .as_deref()
        .ok_or_else(|| anyhow::anyhow!("storage.database_url is required for postgres"))?;

    let pool = PgPoolOptions::new()
        .max_connections(config.storage.max_connections)
        .acquire_timeout(Duration::from_secs(config.storage.acquire_timeout_secs))
        .connect(url)
        .await?;
    ensure_schema(&pool).await?;

    Ok(Arc::new(PostgresPaymentStore::new(pool)))
}

#[cfg(not(feature = "postgres"))]
async fn postgres_store(_config: &ServiceConfig) -> Result<Arc<dyn PaymentStore>> {
    anyhow::bail!("storage.backend is postgres but the binary was built without the `postgres` feature")
}
