//! HTTP API helpers shared by modules: problem constructors, request context
//! extraction and the common middleware stack.

pub mod cors;
pub mod middleware;
pub mod problem;
pub mod request;

pub use middleware::apply_middleware_stack;
pub use problem::{Problem, gateway_timeout, internal_error, not_found, payload_too_large};
pub use request::{RequestMeta, X_REQUEST_ID};
