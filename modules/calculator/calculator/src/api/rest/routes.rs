//! Route registration for the calculator REST API.

use std::sync::Arc;

use axum::routing::get;
use axum::{Extension, Router};
use calculator_sdk::CalculatorApi;

use super::handlers;

/// Mount `GET /calc` and `POST /calc` backed by `api`.
#[must_use]
pub fn register_routes(router: Router, api: Arc<dyn CalculatorApi>) -> Router {
    let calc = Router::new()
        .route("/calc", get(handlers::get_calc).post(handlers::post_calc))
        .layer(Extension(api));

    router.merge(calc)
}
