//! Server settings and the configuration object used to build the server.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::sync::Arc;

use actix_web::cookie::{Key, SameSite};
use backend::inbound::http::session_config::{BuildMode, SessionSettings};
use backend::outbound::memory::{AccountSeedError, MemoryAccountDirectory};
use ortho_config::OrthoConfig;
use serde::Deserialize;
use tracing::warn;

#[cfg(feature = "metrics")]
use actix_web_prom::PrometheusMetrics;

const DEFAULT_PORT: u16 = 8080;

/// Listener and account settings loaded via OrthoConfig from CLI flags,
/// `SNIPPETS_*` environment variables and configuration files.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "SNIPPETS")]
pub struct ServerSettings {
    /// Address to bind; defaults to every IPv4 interface.
    pub bind_address: Option<IpAddr>,
    /// Port to bind; defaults to 8080.
    pub port: Option<u16>,
    /// JSON document listing users (with passwords) and groups.
    pub accounts_file: Option<PathBuf>,
}

/// Raised when the account directory cannot be built.
#[derive(Debug, thiserror::Error)]
pub enum AccountsConfigError {
    #[error("SNIPPETS_ACCOUNTS_FILE is required in release builds")]
    Missing,
    #[error(transparent)]
    Seed(#[from] AccountSeedError),
}

impl ServerSettings {
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(
            self.bind_address
                .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED)),
            self.port.unwrap_or(DEFAULT_PORT),
        )
    }

    /// Load the configured accounts file. Debug builds without one fall back
    /// to the development `admin` account.
    pub fn accounts(&self, mode: BuildMode) -> Result<MemoryAccountDirectory, AccountsConfigError> {
        match (&self.accounts_file, mode) {
            (Some(path), _) => Ok(MemoryAccountDirectory::load(path)?),
            (None, BuildMode::Debug) => {
                warn!("no accounts file configured; using development admin account");
                Ok(MemoryAccountDirectory::development()?)
            }
            (None, BuildMode::Release) => Err(AccountsConfigError::Missing),
        }
    }
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) accounts: Arc<MemoryAccountDirectory>,
    #[cfg(feature = "metrics")]
    pub(crate) prometheus: Option<PrometheusMetrics>,
}

impl ServerConfig {
    #[must_use]
    pub fn new(
        session: SessionSettings,
        bind_addr: SocketAddr,
        accounts: MemoryAccountDirectory,
    ) -> Self {
        let SessionSettings {
            key,
            cookie_secure,
            same_site,
        } = session;
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
            accounts: Arc::new(accounts),
            #[cfg(feature = "metrics")]
            prometheus: None,
        }
    }

    #[cfg(feature = "metrics")]
    /// Attach Prometheus middleware to the configuration.
    #[must_use]
    pub fn with_metrics(mut self, prometheus: Option<PrometheusMetrics>) -> Self {
        self.prometheus = prometheus;
        self
    }
}
