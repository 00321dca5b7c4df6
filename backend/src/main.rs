//! Catalog service entry point: loads configuration, prepares the SQLite
//! store and serves the HTTP surface.

mod server;

use std::io;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use catalog_backend::config::CatalogSettings;
use catalog_backend::inbound::http::health::HealthState;
use catalog_backend::inbound::http::session_config::{BuildMode, SessionInputs, session_settings};
use catalog_backend::outbound::persistence::{DbPool, PoolConfig, ensure_schema};

use server::{ServerConfig, build_identity_provider, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = CatalogSettings::load()
        .map_err(|err| io::Error::other(format!("failed to load configuration: {err}")))?;
    let mode = BuildMode::from_debug_assertions();

    let session = session_settings(
        &SessionInputs {
            key_file: settings.session_key_file.clone(),
            cookie_secure: settings.session_cookie_secure,
            allow_ephemeral: settings.allow_ephemeral_session_key,
        },
        mode,
    )
    .map_err(io::Error::other)?;

    let database_path = settings.database_path();
    let pool = DbPool::new(PoolConfig::new(database_path.to_string_lossy()))
        .await
        .map_err(io::Error::other)?;
    ensure_schema(&pool).await.map_err(io::Error::other)?;
    info!(path = %database_path.display(), "catalog store ready");

    let identity_provider = build_identity_provider(settings.oauth_client(), mode)?;

    let config = ServerConfig::new(session, settings.bind_addr())
        .with_db_pool(pool)
        .with_identity_provider(identity_provider);
    info!(addr = %config.bind_addr(), "starting HTTP server");

    let health_state = web::Data::new(HealthState::new());
    create_server(health_state, config)?.await
}
