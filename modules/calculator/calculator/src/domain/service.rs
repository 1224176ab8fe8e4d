//! The evaluator: operand coercion, domain checks and arithmetic.

use calculator_sdk::{
    Calculation, CalculationRequest, CalculatorApi, DomainViolation, EvaluationError, Operand,
    Operation,
};
use tracing::debug;

/// Largest `n` whose factorial is finite in `f64`.
const MAX_FINITE_FACTORIAL: f64 = 170.0;

/// Stateless calculator service.
///
/// With `strict_domain` off, inputs outside the real domain that IEEE 754
/// still answers (`ln 0`, `171!`, `(-8)^0.5`) produce `-inf`/`inf`/NaN.
/// With it on they are rejected as domain errors.
#[derive(Debug, Clone, Copy, Default)]
pub struct Service {
    strict_domain: bool,
}

impl Service {
    #[must_use]
    pub fn new(strict_domain: bool) -> Self {
        Self { strict_domain }
    }

    /// Evaluate `op` on raw operands.
    ///
    /// The first operand is coerced before the operation is looked up, so a
    /// bad number is reported even when the operation is unknown.
    ///
    /// # Errors
    /// `InvalidOperand`, `UnsupportedOperation` or a `Domain` violation.
    pub fn evaluate(&self, op: &str, a: &Operand, b: &Operand) -> Result<f64, EvaluationError> {
        self.run(op, a, b).map(|(_, _, result)| result)
    }

    /// Evaluate and build the echo record.
    ///
    /// # Errors
    /// Same as [`Service::evaluate`].
    pub fn calculate(&self, req: &CalculationRequest) -> Result<Calculation, EvaluationError> {
        let (operation, a, result) = self.run(&req.op, &req.a, &req.b)?;
        Ok(Calculation {
            operation,
            a,
            b: req.b.coerce().ok(),
            result,
        })
    }

    fn run(
        &self,
        op: &str,
        a: &Operand,
        b: &Operand,
    ) -> Result<(Operation, f64, f64), EvaluationError> {
        let x = a.coerce()?;
        let operation: Operation = op.parse()?;

        let result = match operation {
            Operation::SquareRoot => square_root(x)?,
            Operation::Factorial => self.factorial(x)?,
            Operation::NaturalLog => self.natural_log(x)?,
            Operation::Power => {
                let y = b.coerce()?;
                self.power(x, y)?
            }
        };

        debug!(op = %operation, a = x, result, "evaluated");
        Ok((operation, x, result))
    }

    fn factorial(&self, x: f64) -> Result<f64, DomainViolation> {
        if x < 0.0 {
            return Err(DomainViolation::NegativeFactorial);
        }
        if x.fract() != 0.0 {
            return Err(DomainViolation::NonIntegerFactorial);
        }
        if self.strict_domain && x > MAX_FINITE_FACTORIAL {
            return Err(DomainViolation::FactorialTooLarge);
        }
        Ok(factorial(x))
    }

    fn natural_log(&self, x: f64) -> Result<f64, DomainViolation> {
        if x < 0.0 {
            return Err(DomainViolation::NegativeLogarithm);
        }
        if self.strict_domain && x == 0.0 {
            return Err(DomainViolation::ZeroLogarithm);
        }
        Ok(x.ln())
    }

    fn power(&self, x: f64, y: f64) -> Result<f64, DomainViolation> {
        if self.strict_domain {
            if x == 0.0 && y < 0.0 {
                return Err(DomainViolation::ZeroToNegativePower);
            }
            if x < 0.0 && y.fract() != 0.0 {
                return Err(DomainViolation::NegativeBaseFractionalExponent);
            }
        }
        Ok(x.powf(y))
    }
}

fn square_root(x: f64) -> Result<f64, DomainViolation> {
    if x < 0.0 {
        return Err(DomainViolation::NegativeSquareRoot);
    }
    Ok(x.sqrt())
}

/// Iterative product `1 * 2 * ... * n`. Stops once the product overflows to
/// infinity, so arbitrarily large `n` terminates.
fn factorial(n: f64) -> f64 {
    let mut acc = 1.0_f64;
    let mut i = 2.0_f64;
    while i <= n {
        acc *= i;
        if acc.is_infinite() {
            break;
        }
        i += 1.0;
    }
    acc
}

impl CalculatorApi for Service {
    fn evaluate(&self, op: &str, a: &Operand, b: &Operand) -> Result<f64, EvaluationError> {
        Service::evaluate(self, op, a, b)
    }

    fn calculate(&self, req: &CalculationRequest) -> Result<Calculation, EvaluationError> {
        Service::calculate(self, req)
    }
}
