//! Tests for the backend application bootstrap, covering metrics initialisation
//! and readiness signalling.

use super::server::{ServerConfig, create_server};
#[cfg(feature = "metrics")]
use super::server::initialize_metrics;
use actix_web::cookie::{Key, SameSite};
use actix_web::web;
#[cfg(feature = "metrics")]
use actix_web_prom::PrometheusMetricsBuilder;
use backend::inbound::http::health::HealthState;
use backend::inbound::http::session_config::SessionSettings;
use backend::outbound::memory::MemoryAccountDirectory;
use rstest::{fixture, rstest};

#[fixture]
fn health_state() -> web::Data<HealthState> {
    web::Data::new(HealthState::new())
}

#[fixture]
fn config() -> ServerConfig {
    ServerConfig::new(
        SessionSettings {
            key: Key::generate(),
            cookie_secure: false,
            same_site: SameSite::Lax,
        },
        "127.0.0.1:0".parse().expect("loopback address"),
        MemoryAccountDirectory::development().expect("development accounts"),
    )
}

#[cfg(feature = "metrics")]
#[test]
fn initialize_metrics_returns_metrics_on_success() {
    let metrics = initialize_metrics(|| {
        PrometheusMetricsBuilder::new("bootstrap_test")
            .endpoint("/metrics")
            .build()
    });

    assert!(metrics.is_some(), "expected metrics to be present on success");
}

#[rstest]
#[actix_rt::test]
async fn create_server_marks_ready(health_state: web::Data<HealthState>, config: ServerConfig) {
    assert!(!health_state.is_ready(), "state should start unready");

    let _server = create_server(health_state.clone(), config).expect("server should build");

    assert!(
        health_state.is_ready(),
        "server creation should mark readiness"
    );
}

#[cfg(feature = "metrics")]
#[rstest]
#[actix_rt::test]
async fn create_server_marks_ready_with_metrics(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) {
    let metrics = PrometheusMetricsBuilder::new("bootstrap_metrics_test")
        .endpoint("/metrics")
        .build()
        .expect("metrics should build for tests");

    let _server = create_server(health_state.clone(), config.with_metrics(Some(metrics)))
        .expect("server should build with metrics");

    assert!(health_state.is_ready());
}
