//! Common middleware stack applied around every module router.

use std::any::Any;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::extract::DefaultBodyLimit;
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use http::{Request, StatusCode, header};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::field::Empty;

use crate::api::cors::build_cors_layer;
use crate::api::problem::{
    APPLICATION_PROBLEM_JSON, gateway_timeout, internal_error, payload_too_large,
};
use crate::api::request::{self, RequestMeta, X_REQUEST_ID};
use crate::config::ServerConfig;

/// Apply all middleware layers to a router.
///
/// Layers are registered innermost first. At runtime requests flow:
/// `SetRequestId` → `PropagateRequestId` → Trace → `CatchPanic` →
/// `problem_bodies` → Timeout → `BodyLimit` → CORS (when configured) → Router.
#[must_use]
pub fn apply_middleware_stack(mut router: Router, cfg: &ServerConfig) -> Router {
    if let Some(cors) = cfg.cors.as_ref() {
        router = router.layer(build_cors_layer(cors));
    }

    router = router.layer(RequestBodyLimitLayer::new(cfg.body_limit_bytes));
    router = router.layer(DefaultBodyLimit::max(cfg.body_limit_bytes));

    router = router.layer(TimeoutLayer::with_status_code(
        StatusCode::GATEWAY_TIMEOUT,
        Duration::from_secs(cfg.request_timeout_secs),
    ));

    router = router.layer(middleware::from_fn(problem_bodies));

    router = router.layer(CatchPanicLayer::custom(handle_panic));

    router = apply_trace_layer(router);

    router = router.layer(PropagateRequestIdLayer::new(request::header()));
    router.layer(SetRequestIdLayer::new(request::header(), MakeRequestUuid))
}

/// One span per request; status and latency are recorded when the response is ready.
fn apply_trace_layer(router: Router) -> Router {
    router.layer(
        TraceLayer::new_for_http()
            .make_span_with(|req: &Request<Body>| {
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
                |res: &Response<Body>, latency: Duration, span: &tracing::Span| {
                    let ms = latency.as_millis();
                    span.record("status", res.status().as_u16());
                    span.record("latency_ms", ms);
                    tracing::info!(
                        parent: span,
                        status = res.status().as_u16(),
                        latency_ms = ms,
                        "request completed"
                    );
                },
            ),
    )
}

/// Rewrite bare 413 and 504 responses from the body limit, extractors and
/// timeout layers into problem documents. Problems pass through untouched.
async fn problem_bodies(meta: RequestMeta, req: Request<Body>, next: Next) -> Response {
    let res = next.run(req).await;

    let is_problem = res
        .headers()
        .get(header::CONTENT_TYPE)
        .is_some_and(|v| v.as_bytes() == APPLICATION_PROBLEM_JSON.as_bytes());
    if is_problem {
        return res;
    }

    match res.status() {
        StatusCode::PAYLOAD_TOO_LARGE => meta
            .finalize(payload_too_large("Request body exceeds the configured limit"))
            .into_response(),
        StatusCode::GATEWAY_TIMEOUT => {
            tracing::warn!(path = %meta.path, "request timed out");
            meta.finalize(gateway_timeout("Request did not complete in time"))
                .into_response()
        }
        _ => res,
    }
}

/// Turn a handler panic into a generic 500 problem; the payload is only logged.
fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("non-string panic payload");

    tracing::error!(panic = %detail, "request handler panicked");

    internal_error("Internal Server Error")
        .with_code("INTERNAL_ERROR")
        .into_response()
}
