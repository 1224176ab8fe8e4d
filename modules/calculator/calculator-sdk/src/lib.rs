//! Calculator SDK
//!
//! This crate provides the public contract of the calculator module:
//! - `CalculatorApi` trait implemented by the evaluator
//! - Model types (`Operation`, `Operand`, `CalculationRequest`, `Calculation`)
//! - Error types (`EvaluationError`, `DomainViolation`, `ErrorClass`)
//!
//! Adapters hold the evaluator behind the trait object:
//! ```ignore
//! let api: Arc<dyn CalculatorApi> = Arc::new(Service::new(false));
//! let value = api.evaluate("pow", &Operand::from("2"), &Operand::from(8.0))?;
//! ```

#![forbid(unsafe_code)]

pub mod api;
pub mod errors;
pub mod models;

pub use api::CalculatorApi;
pub use errors::{DomainViolation, ErrorClass, EvaluationError};
pub use models::{Calculation, CalculationRequest, InputHints, Operand, Operation};
