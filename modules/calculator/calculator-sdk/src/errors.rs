//! Error types for the calculator SDK.

use thiserror::Error;

/// Inputs outside an operation's mathematical domain.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomainViolation {
    #[error("Square root of negative number is undefined")]
    NegativeSquareRoot,

    #[error("Factorial of negative number is undefined")]
    NegativeFactorial,

    #[error("Factorial is defined for integers only")]
    NonIntegerFactorial,

    #[error("Logarithm of negative number is undefined")]
    NegativeLogarithm,

    // Rejected only when strict domain checks are enabled.
    #[error("Natural logarithm requires a positive number")]
    ZeroLogarithm,

    #[error("Factorial result would be too large (max: 170!)")]
    FactorialTooLarge,

    #[error("Cannot raise zero to a negative power")]
    ZeroToNegativePower,

    #[error("Cannot raise negative number to non-integer power")]
    NegativeBaseFractionalExponent,
}

/// How an error may be presented to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Caused by the input; the message is safe to show.
    Client,
    /// Unexpected fault; only a generic message may leave the process.
    Internal,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvaluationError {
    /// The operation identifier was not supplied. Carries the user-facing
    /// message naming where it was expected.
    #[error("{0}")]
    MissingOperation(&'static str),

    #[error("Unsupported operation: {0}. Use one of sqrt|fact|ln|pow")]
    UnsupportedOperation(String),

    #[error("Inputs must be valid numbers")]
    InvalidOperand,

    #[error(transparent)]
    Domain(#[from] DomainViolation),

    #[error("Internal Server Error")]
    Internal,
}

impl EvaluationError {
    pub const MISSING_QUERY_OP: &'static str = "Query param \"op\" is required";
    pub const MISSING_BODY_OP: &'static str = "Body field \"op\" is required";

    #[must_use]
    pub fn unsupported(op: impl Into<String>) -> Self {
        Self::UnsupportedOperation(op.into())
    }

    #[must_use]
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::Internal => ErrorClass::Internal,
            Self::MissingOperation(_)
            | Self::UnsupportedOperation(_)
            | Self::InvalidOperand
            | Self::Domain(_) => ErrorClass::Client,
        }
    }
}
