//! Prometheus request metrics, enabled with the `metrics` feature.
//!
//! When the exporter fails to build the server still starts; requests then
//! pass through [`RequestMetrics::Off`] untouched apart from boxing the body.

use std::fmt::Display;
use std::sync::Arc;

use actix_service::boxed::{self, BoxService};
use actix_service::{Service, ServiceExt as _, Transform};
use actix_web::body::{BoxBody, MessageBody};
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::middleware::Compat;
use actix_web_prom::{PrometheusMetrics, PrometheusMetricsBuilder};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

/// Namespace prefixed to every exported series.
pub(crate) const METRICS_NAMESPACE: &str = "snippets";
/// Path serving the Prometheus text exposition.
pub(crate) const METRICS_ENDPOINT: &str = "/metrics";

/// Build the exporter with the service defaults.
pub(crate) fn default_metrics() -> Option<PrometheusMetrics> {
    initialize_metrics(|| {
        PrometheusMetricsBuilder::new(METRICS_NAMESPACE)
            .endpoint(METRICS_ENDPOINT)
            .build()
    })
}

/// Run `build`, logging and discarding a failure.
pub(crate) fn initialize_metrics<F, E>(build: F) -> Option<PrometheusMetrics>
where
    F: FnOnce() -> Result<PrometheusMetrics, E>,
    E: Display,
{
    build()
        .inspect_err(|error| warn!(%error, "prometheus metrics disabled"))
        .ok()
}

/// Middleware that records request metrics when an exporter is present.
#[derive(Clone)]
pub(crate) enum RequestMetrics {
    On(Arc<PrometheusMetrics>),
    Off,
}

impl From<Option<PrometheusMetrics>> for RequestMetrics {
    fn from(metrics: Option<PrometheusMetrics>) -> Self {
        metrics.map_or(Self::Off, |exporter| Self::On(Arc::new(exporter)))
    }
}

type Boxed = BoxService<ServiceRequest, ServiceResponse<BoxBody>, actix_web::Error>;

impl<S, B> Transform<S, ServiceRequest> for RequestMetrics
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = Boxed;
    type Future = LocalBoxFuture<'static, Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        match self {
            Self::On(exporter) => {
                let pending = Compat::new(PrometheusMetrics::clone(exporter)).new_transform(service);
                Box::pin(async move { pending.await.map(boxed::service) })
            }
            Self::Off => {
                let passthrough =
                    service.map(|res: ServiceResponse<B>| res.map_into_boxed_body());
                Box::pin(async move { Ok(boxed::service(passthrough)) })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, HttpResponse, test, web};
    use rstest::rstest;

    #[rstest]
    fn failed_exporter_is_dropped() {
        let metrics = initialize_metrics(|| Err::<PrometheusMetrics, _>("registry clash"));
        assert!(metrics.is_none());
    }

    #[rstest]
    #[case(true, 200)]
    #[case(false, 404)]
    #[actix_web::test]
    async fn endpoint_is_served_only_when_enabled(#[case] enabled: bool, #[case] status: u16) {
        let metrics = if enabled {
            initialize_metrics(|| PrometheusMetricsBuilder::new("test").endpoint("/metrics").build())
        } else {
            None
        };
        let app = test::init_service(
            App::new()
                .wrap(RequestMetrics::from(metrics))
                .route("/ping", web::get().to(HttpResponse::Ok)),
        )
        .await;

        let ping = test::call_service(&app, test::TestRequest::get().uri("/ping").to_request()).await;
        assert!(ping.status().is_success());
        let res =
            test::call_service(&app, test::TestRequest::get().uri("/metrics").to_request()).await;
        assert_eq!(res.status().as_u16(), status);
    }
}
