//! Re-exports and convenience constructors for Problem types

use http::StatusCode;

pub use calc_errors::problem::{APPLICATION_PROBLEM_JSON, Problem};

pub fn payload_too_large(detail: impl Into<String>) -> Problem {
    Problem::new(StatusCode::PAYLOAD_TOO_LARGE, "Payload Too Large", detail)
        .with_code("PAYLOAD_TOO_LARGE")
}

pub fn gateway_timeout(detail: impl Into<String>) -> Problem {
    Problem::new(StatusCode::GATEWAY_TIMEOUT, "Gateway Timeout", detail)
        .with_code("REQUEST_TIMEOUT")
}

pub fn not_found(detail: impl Into<String>) -> Problem {
    Problem::new(StatusCode::NOT_FOUND, "Not Found", detail)
}

pub fn internal_error(detail: impl Into<String>) -> Problem {
    Problem::new(
        StatusCode::INTERNAL_SERVER_ERROR,
        "Internal Server Error",
        detail,
    )
}
