//! REST handlers for the calculator module.

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Extension, Query};
use calc_errors::Problem;
use calckit::api::RequestMeta;
use calculator_sdk::{CalculationRequest, CalculatorApi};

use super::dto::{CalcBody, CalcQuery, CalcResponse};
use super::error::{
    evaluation_error_to_problem, json_rejection_to_problem, query_rejection_to_problem,
};

pub type CalcResult<T> = Result<T, Problem>;

/// GET /calc?op=&a=&b=
///
/// # Errors
/// A problem response for malformed queries and rejected calculations.
pub async fn get_calc(
    Extension(api): Extension<Arc<dyn CalculatorApi>>,
    meta: RequestMeta,
    query: Result<Query<CalcQuery>, QueryRejection>,
) -> CalcResult<Json<CalcResponse>> {
    let Query(query) = query.map_err(|r| meta.finalize(query_rejection_to_problem(&r)))?;
    let req = query
        .into_request()
        .map_err(|e| meta.finalize(evaluation_error_to_problem(&e)))?;

    calculate(api.as_ref(), &meta, req)
}

/// POST /calc with `{ "op", "a", "b" }`
///
/// # Errors
/// A problem response for malformed bodies and rejected calculations.
pub async fn post_calc(
    Extension(api): Extension<Arc<dyn CalculatorApi>>,
    meta: RequestMeta,
    body: Result<Json<CalcBody>, JsonRejection>,
) -> CalcResult<Json<CalcResponse>> {
    let Json(body) = body.map_err(|r| meta.finalize(json_rejection_to_problem(&r)))?;
    let req = body
        .into_request()
        .map_err(|e| meta.finalize(evaluation_error_to_problem(&e)))?;

    calculate(api.as_ref(), &meta, req)
}

fn calculate(
    api: &dyn CalculatorApi,
    meta: &RequestMeta,
    req: CalculationRequest,
) -> CalcResult<Json<CalcResponse>> {
    let calc = api.calculate(&req).map_err(|e| {
        tracing::debug!(op = %req.op, error = %e, "Calculation rejected");
        meta.finalize(evaluation_error_to_problem(&e))
    })?;

    Ok(Json(CalcResponse::new(req.op, &calc)))
}
