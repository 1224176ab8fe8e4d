#![allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]

//! End-to-end tests of `/calc` through the full middleware stack.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use calckit::ServerConfig;
use calckit::api::apply_middleware_stack;
use calculator::{CalculatorConfig, CalculatorModule};
use calculator_sdk::{Calculation, CalculationRequest, CalculatorApi, EvaluationError, Operand};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

fn app_with(config: CalculatorConfig) -> Router {
    let router = CalculatorModule::new(config).router().unwrap();
    apply_middleware_stack(router, &ServerConfig::default())
}

fn app() -> Router {
    app_with(CalculatorConfig::default())
}

async fn send(app: Router, req: Request<Body>) -> (StatusCode, Option<String>, Value) {
    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let content_type = resp
        .headers()
        .get(header::CONTENT_TYPE)
        .map(|v| v.to_str().unwrap().to_owned());
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, content_type, body)
}

async fn get(app: Router, uri: &str) -> (StatusCode, Option<String>, Value) {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

async fn post_json(app: Router, body: &str) -> (StatusCode, Option<String>, Value) {
    let req = Request::post("/calc")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_owned()))
        .unwrap();
    send(app, req).await
}

#[tokio::test]
async fn get_power() {
    let (status, _, body) = get(app(), "/calc?op=pow&a=2&b=8").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["op"], "pow");
    assert_eq!(body["a"].as_f64(), Some(2.0));
    assert_eq!(body["b"].as_f64(), Some(8.0));
    assert_eq!(body["result"].as_f64(), Some(256.0));
}

#[tokio::test]
async fn get_square_root_omits_missing_b() {
    let (status, _, body) = get(app(), "/calc?op=sqrt&a=9").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"].as_f64(), Some(3.0));
    assert!(body.get("b").is_none());
}

#[tokio::test]
async fn get_domain_error_is_problem() {
    let (status, content_type, body) = get(app(), "/calc?op=sqrt&a=-1").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(content_type.as_deref(), Some("application/problem+json"));
    assert_eq!(body["detail"], "Square root of negative number is undefined");
    assert_eq!(body["code"], "DOMAIN_ERROR");
    assert_eq!(body["status"], 400);
    assert_eq!(body["instance"], "/calc");
    assert!(body["trace_id"].is_string());
}

#[tokio::test]
async fn get_requires_op() {
    for uri in ["/calc?a=1", "/calc?op=&a=1"] {
        let (status, _, body) = get(app(), uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body["detail"], "Query param \"op\" is required");
        assert_eq!(body["code"], "MISSING_OPERATION");
    }
}

#[tokio::test]
async fn get_unknown_operation() {
    let (status, _, body) = get(app(), "/calc?op=nope&a=1").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["detail"],
        "Unsupported operation: nope. Use one of sqrt|fact|ln|pow"
    );
    assert_eq!(body["code"], "UNSUPPORTED_OPERATION");
}

#[tokio::test]
async fn get_invalid_operand_checked_before_operation() {
    let (status, _, body) = get(app(), "/calc?op=nope&a=abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Inputs must be valid numbers");
    assert_eq!(body["code"], "INVALID_OPERAND");
}

#[tokio::test]
async fn get_missing_operand_is_invalid() {
    let (status, _, body) = get(app(), "/calc?op=sqrt").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Inputs must be valid numbers");
}

#[tokio::test]
async fn non_finite_results_are_null() {
    let (status, _, body) = get(app(), "/calc?op=ln&a=0").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["result"].is_null());

    let (status, _, body) = get(app(), "/calc?op=fact&a=171").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["result"].is_null());
}

#[tokio::test]
async fn post_factorial() {
    let (status, _, body) = post_json(app(), r#"{"op":"fact","a":5}"#).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"].as_f64(), Some(120.0));
}

#[tokio::test]
async fn post_accepts_numeric_strings() {
    let (status, _, body) = post_json(app(), r#"{"op":"pow","a":"2","b":" 3 "}"#).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"].as_f64(), Some(8.0));
}

#[tokio::test]
async fn post_requires_op() {
    for raw in ["{}", r#"{"op":null,"a":1}"#, r#"{"op":"","a":1}"#] {
        let (status, _, body) = post_json(app(), raw).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{raw}");
        assert_eq!(body["detail"], "Body field \"op\" is required");
    }
}

#[tokio::test]
async fn post_rejects_non_numeric_json_operands() {
    let (status, _, body) = post_json(app(), r#"{"op":"sqrt","a":true}"#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Inputs must be valid numbers");
}

#[tokio::test]
async fn post_malformed_json() {
    let (status, content_type, body) = post_json(app(), r#"{"op": "sqrt", "a": "#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(content_type.as_deref(), Some("application/problem+json"));
    assert_eq!(body["code"], "MALFORMED_BODY");
}

fn oversized_body() -> String {
    format!(r#"{{"op":"sqrt","a":"{}"}}"#, "9".repeat(20_000))
}

#[tokio::test]
async fn oversized_body_with_length_is_413_problem() {
    let body = oversized_body();
    let req = Request::post("/calc")
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::CONTENT_LENGTH, body.len())
        .header("x-request-id", "big-1")
        .body(Body::from(body))
        .unwrap();
    let (status, content_type, problem) = send(app(), req).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(content_type.as_deref(), Some("application/problem+json"));
    assert_eq!(problem["status"], 413);
    assert_eq!(problem["code"], "PAYLOAD_TOO_LARGE");
    assert_eq!(problem["instance"], "/calc");
    assert_eq!(problem["trace_id"], "big-1");
}

#[tokio::test]
async fn oversized_body_without_length_is_413_problem() {
    let (status, content_type, problem) = post_json(app(), &oversized_body()).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(content_type.as_deref(), Some("application/problem+json"));
    assert_eq!(problem["code"], "PAYLOAD_TOO_LARGE");
}

#[tokio::test]
async fn post_without_json_content_type_is_415_problem() {
    let req = Request::post("/calc")
        .body(Body::from(r#"{"op":"sqrt","a":9}"#))
        .unwrap();
    let (status, content_type, problem) = send(app(), req).await;
    assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_eq!(content_type.as_deref(), Some("application/problem+json"));
    assert_eq!(problem["status"], 415);
    assert_eq!(problem["code"], "UNSUPPORTED_MEDIA_TYPE");
    assert_eq!(problem["instance"], "/calc");
}

#[tokio::test]
async fn strict_domain_from_config() {
    let strict = CalculatorConfig {
        strict_domain: true,
        ..CalculatorConfig::default()
    };

    let (status, _, body) = get(app_with(strict.clone()), "/calc?op=ln&a=0").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Natural logarithm requires a positive number");

    let (status, _, body) = post_json(app_with(strict), r#"{"op":"pow","a":0,"b":-1}"#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Cannot raise zero to a negative power");
}

struct FailingApi;

impl CalculatorApi for FailingApi {
    fn evaluate(&self, _op: &str, _a: &Operand, _b: &Operand) -> Result<f64, EvaluationError> {
        Err(EvaluationError::Internal)
    }

    fn calculate(&self, _req: &CalculationRequest) -> Result<Calculation, EvaluationError> {
        Err(EvaluationError::Internal)
    }
}

#[tokio::test]
async fn internal_faults_are_masked() {
    let router = CalculatorModule::default()
        .router_with_api(Arc::new(FailingApi))
        .unwrap();
    let app = apply_middleware_stack(router, &ServerConfig::default());

    let (status, _, body) = get(app, "/calc?op=sqrt&a=4").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["detail"], "Internal Server Error");
    assert_eq!(body["code"], "INTERNAL_ERROR");
}

#[tokio::test]
async fn request_id_becomes_trace_id() {
    let req = Request::get("/calc?op=fact&a=-3")
        .header("x-request-id", "req-123")
        .body(Body::empty())
        .unwrap();
    let (status, _, body) = send(app(), req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["trace_id"], "req-123");
    assert_eq!(body["detail"], "Factorial of negative number is undefined");
}
