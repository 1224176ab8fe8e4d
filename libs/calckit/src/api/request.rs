//! Per-request context used to enrich problems with `instance` and `trace_id`.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use http::HeaderName;
use http::request::Parts;

use crate::api::problem::Problem;

/// Header carrying the request id (set by the middleware stack when absent).
pub const X_REQUEST_ID: &str = "x-request-id";

#[must_use]
pub fn header() -> HeaderName {
    HeaderName::from_static(X_REQUEST_ID)
}

/// Request path and id, extracted from any request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestMeta {
    pub path: String,
    pub request_id: Option<String>,
}

impl RequestMeta {
    /// Attach this request's path and id to a problem.
    #[must_use]
    pub fn finalize(&self, problem: Problem) -> Problem {
        calc_errors::finalize(problem, &self.path, self.request_id.clone())
    }
}

impl<S: Send + Sync> FromRequestParts<S> for RequestMeta {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let request_id = parts
            .headers
            .get(X_REQUEST_ID)
            .and_then(|v| v.to_str().ok())
            .map(ToOwned::to_owned);

        Ok(Self {
            path: parts.uri.path().to_owned(),
            request_id,
        })
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use axum::http::{Request, StatusCode};

    #[tokio::test]
    async fn extracts_path_and_request_id() {
        let req = Request::builder()
            .uri("/calc?op=sqrt&a=9")
            .header(X_REQUEST_ID, "rid-42")
            .body(())
            .unwrap();
        let (mut parts, ()) = req.into_parts();

        let meta = RequestMeta::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(meta.path, "/calc");
        assert_eq!(meta.request_id.as_deref(), Some("rid-42"));
    }

    #[test]
    fn finalize_enriches_problem() {
        let meta = RequestMeta {
            path: "/calc".to_owned(),
            request_id: Some("rid-1".to_owned()),
        };
        let p = meta.finalize(Problem::new(StatusCode::BAD_REQUEST, "Bad Request", "x"));
        assert_eq!(p.instance, "/calc");
        assert_eq!(p.trace_id.as_deref(), Some("rid-1"));
    }
}
