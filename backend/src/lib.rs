pub mod auth;
pub mod axum_http;
pub mod config;

use std::{sync::Arc, time::Duration};

use anyhow::Result;
use chrono::Utc;
use domain::repositories::sessions::SessionStore;
use infra::{postgres::postgres_connection, sessions::in_memory::InMemorySessionStore};
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

const SESSION_PURGE_INTERVAL: Duration = Duration::from_secs(5 * 60);

pub fn init_tracing() -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_timer(tracing_subscriber::fmt::time::ChronoLocal::rfc_3339())
        .try_init()
        .map_err(|err| anyhow::anyhow!("failed to initialise tracing: {err}"))?;

    Ok(())
}

pub async fn run() -> Result<()> {
    let dotenvy_env = config::config_loader::load()?;
    info!(stage = %dotenvy_env.stage, "ENV has been loaded");

    let postgres_pool = postgres_connection::establish_connection(
        &dotenvy_env.database.url,
        dotenvy_env.database.max_connections,
    )?;
    info!("Postgres connection has been established");

    let session_store = Arc::new(InMemorySessionStore::new(chrono::Duration::hours(
        dotenvy_env.session.ttl_hours,
    )));
    spawn_session_purge(Arc::clone(&session_store));

    axum_http::http_serve::start(
        Arc::new(dotenvy_env),
        Arc::new(postgres_pool),
        session_store,
    )
    .await?;

    Ok(())
}

fn spawn_session_purge<S>(store: Arc<S>)
where
    S: SessionStore + Send + Sync + 'static,
{
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(SESSION_PURGE_INTERVAL);
        loop {
            ticker.tick().await;
            match store.purge_expired(Utc::now()).await {
                Ok(0) => {}
                Ok(purged) => debug!(purged, "sessions: expired sessions purged"),
                Err(err) => error!(error = ?err, "sessions: purge failed"),
            }
        }
    });
}
