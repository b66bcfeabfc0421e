//! Backend entry-point: wires the admin REST endpoints and OpenAPI docs.

use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use actix_web::web;
use reqwest::Url;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use backend::inbound::http::health::HealthState;
use backend::outbound::persistence::{DbPool, PoolConfig};
use backend::server::{
    DEFAULT_IDENTITY_TIMEOUT, IdentityProviderConfig, ServerConfig, create_server,
};

fn bind_addr_from_env() -> std::io::Result<SocketAddr> {
    let raw = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".into());
    raw.parse()
        .map_err(|e| std::io::Error::other(format!("invalid BIND_ADDR {raw}: {e}")))
}

fn identity_provider_from_env() -> std::io::Result<Option<IdentityProviderConfig>> {
    let Ok(raw) = env::var("IDENTITY_PROVIDER_URL") else {
        return Ok(None);
    };
    let base_url = Url::parse(&raw)
        .map_err(|e| std::io::Error::other(format!("invalid IDENTITY_PROVIDER_URL {raw}: {e}")))?;
    let timeout = match env::var("IDENTITY_PROVIDER_TIMEOUT_SECONDS") {
        Ok(secs) => {
            let secs: u64 = secs.parse().map_err(|e| {
                std::io::Error::other(format!("invalid IDENTITY_PROVIDER_TIMEOUT_SECONDS: {e}"))
            })?;
            Duration::from_secs(secs)
        }
        Err(_) => DEFAULT_IDENTITY_TIMEOUT,
    };
    Ok(Some(IdentityProviderConfig { base_url, timeout }))
}

async fn db_pool_from_env() -> std::io::Result<Option<DbPool>> {
    let Ok(database_url) = env::var("DATABASE_URL") else {
        return Ok(None);
    };
    let pool = DbPool::new(PoolConfig::new(database_url))
        .await
        .map_err(|e| std::io::Error::other(format!("database pool setup: {e}")))?;
    Ok(Some(pool))
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let mut config = ServerConfig::new(bind_addr_from_env()?);
    match db_pool_from_env().await? {
        Some(pool) => config = config.with_db_pool(pool),
        None => warn!("DATABASE_URL not set; running on in-memory fixtures"),
    }
    match identity_provider_from_env()? {
        Some(identity_provider) => config = config.with_identity_provider(identity_provider),
        None => warn!("IDENTITY_PROVIDER_URL not set; accepting the fixture identity"),
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    server.await
}
