//! Backend entry-point: loads settings, wires the snippets API and serves it.

mod server;

use actix_web::web;
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use backend::inbound::http::health::HealthState;
use backend::inbound::http::session_config::{BuildMode, session_settings_from_env};
#[cfg(feature = "metrics")]
use server::default_metrics;
use server::{ServerConfig, ServerSettings, create_server};

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

    let settings = ServerSettings::load().map_err(std::io::Error::other)?;
    let mode = BuildMode::from_debug_assertions();
    let session = session_settings_from_env(&DefaultEnv::new(), mode)
        .map_err(std::io::Error::other)?;
    info!(fingerprint = %session.fingerprint(), "session signing key loaded");

    let accounts = settings.accounts(mode).map_err(std::io::Error::other)?;
    info!(users = accounts.user_count(), "account directory loaded");

    let bind_addr = settings.bind_addr();
    let config = ServerConfig::new(session, bind_addr, accounts);
    #[cfg(feature = "metrics")]
    let config = config.with_metrics(default_metrics());

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    info!(%bind_addr, "listening");
    server.await
}

#[cfg(test)]
mod tests;
