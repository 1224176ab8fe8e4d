//! REST DTOs for the calculator module.

use calculator_sdk::{Calculation, CalculationRequest, EvaluationError, Operand};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Query string of `GET /calc`. Values stay textual until coercion.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CalcQuery {
    pub op: Option<String>,
    pub a: Option<String>,
    pub b: Option<String>,
}

impl CalcQuery {
    /// # Errors
    /// `MissingOperation` when `op` is absent or empty.
    pub fn into_request(self) -> Result<CalculationRequest, EvaluationError> {
        let op = self
            .op
            .filter(|op| !op.is_empty())
            .ok_or(EvaluationError::MissingOperation(
                EvaluationError::MISSING_QUERY_OP,
            ))?;

        Ok(CalculationRequest {
            op,
            a: self.a.into(),
            b: self.b.into(),
        })
    }
}

/// JSON body of `POST /calc`. Fields keep their JSON type so numbers and
/// numeric strings are both accepted.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CalcBody {
    pub op: Option<Value>,
    pub a: Option<Value>,
    pub b: Option<Value>,
}

impl CalcBody {
    /// # Errors
    /// `MissingOperation` when `op` is absent, null or an empty string.
    pub fn into_request(self) -> Result<CalculationRequest, EvaluationError> {
        let op = match self.op {
            Some(Value::String(op)) if !op.is_empty() => op,
            None | Some(Value::Null | Value::String(_)) => {
                return Err(EvaluationError::MissingOperation(
                    EvaluationError::MISSING_BODY_OP,
                ));
            }
            // never a valid identifier; reported as unsupported
            Some(other) => other.to_string(),
        };

        Ok(CalculationRequest {
            op,
            a: json_operand(self.a),
            b: json_operand(self.b),
        })
    }
}

fn json_operand(value: Option<Value>) -> Operand {
    match value {
        None | Some(Value::Null) => Operand::Absent,
        Some(Value::Number(n)) => n.as_f64().map_or(Operand::Absent, Operand::Number),
        Some(Value::String(s)) => Operand::Text(s),
        // bools, arrays and objects keep their JSON text, which never parses
        Some(other) => Operand::Text(other.to_string()),
    }
}

/// Successful calculation. Non-finite results are `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalcResponse {
    pub op: String,
    pub a: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub b: Option<f64>,
    pub result: Option<f64>,
}

impl CalcResponse {
    #[must_use]
    pub fn new(op: String, calc: &Calculation) -> Self {
        Self {
            op,
            a: calc.a,
            b: calc.b,
            result: calc.result.is_finite().then_some(calc.result),
        }
    }
}
