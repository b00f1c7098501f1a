//! REST route definitions and the HTTP middleware stack.

use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderName, StatusCode};
use axum::routing::get;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::field::Empty;

use crate::api::rest::handlers;
use crate::config::HttpConfig;
use crate::domain::service::Service;

const X_REQUEST_ID: &str = "x-request-id";

/// Register the `/User` resource and the health checks.
pub fn register_routes(router: Router, service: Arc<Service>) -> Router {
    router
        .route(
            "/User",
            get(handlers::get_user)
                .post(handlers::create_user)
                .put(handlers::update_user)
                .delete(handlers::delete_user),
        )
        .route("/health", get(handlers::health))
        .route("/healthz", get(handlers::healthz))
        .layer(axum::Extension(service))
}

/// Apply all middleware layers to a router.
///
/// At runtime requests flow from the outermost layer inwards:
/// `SetRequestId` → `PropagateRequestId` → Trace → Timeout → `BodyLimit` → Router.
pub fn apply_middleware(mut router: Router, cfg: &HttpConfig) -> Router {
    // 4) Body limit, enforced by the body extractors as a 413 Problem
    router = router.layer(DefaultBodyLimit::max(cfg.body_limit_bytes));

    // 3) Timeout
    router = router.layer(TimeoutLayer::with_status_code(
        StatusCode::GATEWAY_TIMEOUT,
        cfg.request_timeout,
    ));

    // 2) Trace
    router = router.layer(
        TraceLayer::new_for_http()
            .make_span_with(|req: &axum::http::Request<axum::body::Body>| {
                let rid = req
                    .headers()
                    .get(X_REQUEST_ID)
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("n/a");

                tracing::info_span!(
                    "http_request",
                    method = %req.method(),
                    uri = %req.uri().path(),
                    request_id = %rid,
                    status = Empty,
                    latency_ms = Empty,
                )
            })
            .on_response(
                |res: &axum::http::Response<axum::body::Body>,
                 latency: std::time::Duration,
                 span: &tracing::Span| {
                    span.record("status", res.status().as_u16());
                    span.record("latency_ms", latency.as_millis());
                },
            ),
    );

    // 1) Request id: set on the way in, echoed on the way out
    let x_request_id = HeaderName::from_static(X_REQUEST_ID);
    router = router.layer(PropagateRequestIdLayer::new(x_request_id.clone()));
    router = router.layer(SetRequestIdLayer::new(x_request_id, MakeRequestUuid));

    router
}
