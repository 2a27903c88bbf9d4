//! HTTP-level middleware (cross-cutting concerns).
//!
//! Applies to every route, protected or not:
//! - Request-Id generation + propagation (X-Request-Id)
//! - Access logging (TraceLayer)
//! - Body size limit (1 MiB)
//! - Per-request timeout from `Config`, answered with the usual error body

use std::time::Duration;

use axum::Router;
use axum::error_handling::HandleErrorLayer;
use axum::http::header::HeaderName;
use axum::response::IntoResponse;
use tower::timeout::TimeoutLayer;
use tower::{BoxError, ServiceBuilder};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::error::AppError;

const BODY_LIMIT_BYTES: usize = 1024 * 1024;

pub fn apply(router: Router, config: &Config) -> Router {
    let request_id_header = HeaderName::from_static("x-request-id");

    // Request-id layers sit outside HandleErrorLayer so a converted 408 still carries the id.
    let layers = ServiceBuilder::new()
        .layer(SetRequestIdLayer::new(
            request_id_header.clone(),
            MakeRequestUuid,
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header))
        .layer(HandleErrorLayer::new(handle_layer_error))
        .layer(RequestBodyLimitLayer::new(BODY_LIMIT_BYTES))
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.request_timeout_seconds,
        )))
        .layer(TraceLayer::new_for_http());

    router.layer(layers)
}

async fn handle_layer_error(err: BoxError) -> impl IntoResponse {
    if err.is::<tower::timeout::error::Elapsed>() {
        tracing::warn!("request timed out");
        AppError::Timeout
    } else {
        tracing::error!(error = %err, "unhandled middleware error");
        AppError::Internal
    }
}
