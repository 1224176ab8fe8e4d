//! `CalculatorApi` trait definition.

use crate::errors::EvaluationError;
use crate::models::{Calculation, CalculationRequest, Operand};

/// Public API of the calculator module.
///
/// Evaluation is pure and synchronous; implementations must be shareable
/// across request handlers.
pub trait CalculatorApi: Send + Sync {
    /// Evaluate `op` on the raw operands. `b` is only consulted by binary
    /// operations.
    ///
    /// # Errors
    /// Returns an [`EvaluationError`] when an operand does not coerce to a
    /// finite number, the operation is unknown, or the input lies outside the
    /// operation's domain.
    fn evaluate(&self, op: &str, a: &Operand, b: &Operand) -> Result<f64, EvaluationError>;

    /// Evaluate a request and build the echo record returned to callers.
    ///
    /// # Errors
    /// Same failure modes as [`CalculatorApi::evaluate`].
    fn calculate(&self, req: &CalculationRequest) -> Result<Calculation, EvaluationError>;
}
