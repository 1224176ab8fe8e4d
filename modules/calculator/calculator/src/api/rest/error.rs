//! REST error mapping for the calculator module.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use calc_errors::{ErrDef, Problem};
use calculator_sdk::{ErrorClass, EvaluationError};
use http::StatusCode;

pub const MISSING_OPERATION: ErrDef = ErrDef {
    status: 400,
    title: "Missing operation",
    code: "MISSING_OPERATION",
    type_url: "https://errors.calculator.local/MISSING_OPERATION",
};

pub const UNSUPPORTED_OPERATION: ErrDef = ErrDef {
    status: 400,
    title: "Unsupported operation",
    code: "UNSUPPORTED_OPERATION",
    type_url: "https://errors.calculator.local/UNSUPPORTED_OPERATION",
};

pub const INVALID_OPERAND: ErrDef = ErrDef {
    status: 400,
    title: "Invalid operand",
    code: "INVALID_OPERAND",
    type_url: "https://errors.calculator.local/INVALID_OPERAND",
};

pub const DOMAIN_ERROR: ErrDef = ErrDef {
    status: 400,
    title: "Domain error",
    code: "DOMAIN_ERROR",
    type_url: "https://errors.calculator.local/DOMAIN_ERROR",
};

pub const MALFORMED_BODY: ErrDef = ErrDef {
    status: 400,
    title: "Malformed request body",
    code: "MALFORMED_BODY",
    type_url: "https://errors.calculator.local/MALFORMED_BODY",
};

pub const UNSUPPORTED_MEDIA_TYPE: ErrDef = ErrDef {
    status: 415,
    title: "Unsupported media type",
    code: "UNSUPPORTED_MEDIA_TYPE",
    type_url: "https://errors.calculator.local/UNSUPPORTED_MEDIA_TYPE",
};

pub const PAYLOAD_TOO_LARGE: ErrDef = ErrDef {
    status: 413,
    title: "Payload Too Large",
    code: "PAYLOAD_TOO_LARGE",
    type_url: "https://errors.calculator.local/PAYLOAD_TOO_LARGE",
};

pub const MALFORMED_QUERY: ErrDef = ErrDef {
    status: 400,
    title: "Malformed query string",
    code: "MALFORMED_QUERY",
    type_url: "https://errors.calculator.local/MALFORMED_QUERY",
};

pub const INTERNAL: ErrDef = ErrDef {
    status: 500,
    title: "Internal Server Error",
    code: "INTERNAL_ERROR",
    type_url: "https://errors.calculator.local/INTERNAL_ERROR",
};

/// Generic detail for every internal fault.
pub const INTERNAL_DETAIL: &str = "Internal Server Error";

/// Map an evaluation error to a problem. Client errors carry their message;
/// internal ones are logged and masked.
pub fn evaluation_error_to_problem(err: &EvaluationError) -> Problem {
    if err.class() == ErrorClass::Internal {
        tracing::error!(error = %err, "Internal error in calculator");
        return INTERNAL.as_problem(INTERNAL_DETAIL);
    }

    let def = match err {
        EvaluationError::MissingOperation(_) => MISSING_OPERATION,
        EvaluationError::UnsupportedOperation(_) => UNSUPPORTED_OPERATION,
        EvaluationError::InvalidOperand => INVALID_OPERAND,
        EvaluationError::Domain(_) => DOMAIN_ERROR,
        EvaluationError::Internal => INTERNAL,
    };
    def.as_problem(err.to_string())
}

/// Map a body rejection by its status: an over-limit body stays 413, a
/// missing JSON content type stays 415, anything else is a malformed body.
pub fn json_rejection_to_problem(rejection: &JsonRejection) -> Problem {
    tracing::debug!(error = %rejection, status = %rejection.status(), "Rejected calculation body");
    let def = match rejection.status() {
        StatusCode::PAYLOAD_TOO_LARGE => PAYLOAD_TOO_LARGE,
        StatusCode::UNSUPPORTED_MEDIA_TYPE => UNSUPPORTED_MEDIA_TYPE,
        _ => MALFORMED_BODY,
    };
    def.as_problem(rejection.body_text())
}

pub fn query_rejection_to_problem(rejection: &QueryRejection) -> Problem {
    tracing::debug!(error = %rejection, "Rejected calculation query");
    MALFORMED_QUERY.as_problem(rejection.body_text())
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use axum::extract::rejection::MissingJsonContentType;
    use calculator_sdk::DomainViolation;

    #[test]
    fn test_client_errors_are_bad_requests() {
        let cases = [
            (
                EvaluationError::MissingOperation(EvaluationError::MISSING_QUERY_OP),
                "MISSING_OPERATION",
            ),
            (EvaluationError::unsupported("nope"), "UNSUPPORTED_OPERATION"),
            (EvaluationError::InvalidOperand, "INVALID_OPERAND"),
            (
                EvaluationError::Domain(DomainViolation::NegativeSquareRoot),
                "DOMAIN_ERROR",
            ),
        ];

        for (err, code) in cases {
            let problem = evaluation_error_to_problem(&err);
            assert_eq!(problem.status, StatusCode::BAD_REQUEST);
            assert_eq!(problem.code, code);
            assert_eq!(problem.detail, err.to_string());
        }
    }

    #[test]
    fn test_internal_error_is_masked() {
        let problem = evaluation_error_to_problem(&EvaluationError::Internal);
        assert_eq!(problem.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(problem.detail, INTERNAL_DETAIL);
        assert_eq!(problem.code, "INTERNAL_ERROR");
    }

    #[test]
    fn test_missing_content_type_keeps_415() {
        let rejection = JsonRejection::from(MissingJsonContentType::default());
        let problem = json_rejection_to_problem(&rejection);
        assert_eq!(problem.status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert_eq!(problem.code, "UNSUPPORTED_MEDIA_TYPE");
    }
}
