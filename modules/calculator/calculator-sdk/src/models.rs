//! Model types for the calculator SDK.

use std::fmt;
use std::str::FromStr;

use crate::errors::EvaluationError;

/// The closed set of supported operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    SquareRoot,
    Factorial,
    NaturalLog,
    Power,
}

/// Labels and placeholders the form shows for an operation's inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputHints {
    pub a_label: &'static str,
    pub a_placeholder: &'static str,
    /// `None` for unary operations; the second input is hidden.
    pub b: Option<(&'static str, &'static str)>,
}

impl Operation {
    /// All operations in display order.
    pub const ALL: [Operation; 4] = [
        Operation::SquareRoot,
        Operation::Factorial,
        Operation::NaturalLog,
        Operation::Power,
    ];

    /// Wire identifier.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SquareRoot => "sqrt",
            Self::Factorial => "fact",
            Self::NaturalLog => "ln",
            Self::Power => "pow",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::SquareRoot => "Square Root",
            Self::Factorial => "Factorial",
            Self::NaturalLog => "Logarithm",
            Self::Power => "Power",
        }
    }

    /// Number of operands the operation consumes.
    #[must_use]
    pub fn arity(self) -> usize {
        match self {
            Self::Power => 2,
            Self::SquareRoot | Self::Factorial | Self::NaturalLog => 1,
        }
    }

    #[must_use]
    pub fn input_hints(self) -> InputHints {
        match self {
            Self::SquareRoot => InputHints {
                a_label: "Number",
                a_placeholder: "e.g., 16",
                b: None,
            },
            Self::Factorial => InputHints {
                a_label: "Number (Integer)",
                a_placeholder: "e.g., 5",
                b: None,
            },
            Self::NaturalLog => InputHints {
                a_label: "Number (Positive)",
                a_placeholder: "e.g., 2.71828",
                b: None,
            },
            Self::Power => InputHints {
                a_label: "Base",
                a_placeholder: "e.g., 2",
                b: Some(("Exponent", "e.g., 3")),
            },
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = EvaluationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| EvaluationError::unsupported(s))
    }
}

/// A raw operand as received from a caller, before numeric coercion.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Operand {
    #[default]
    Absent,
    Text(String),
    Number(f64),
}

impl Operand {
    /// Coerce to a finite number. Absent, empty, unparsable and non-finite
    /// inputs are rejected; nothing defaults to zero.
    ///
    /// Text is parsed as a decimal float after trimming whitespace, so
    /// radix prefixes such as `0x`, `0b` and `0o` are rejected.
    ///
    /// # Errors
    /// Returns [`EvaluationError::InvalidOperand`] when the operand is not a
    /// finite number.
    pub fn coerce(&self) -> Result<f64, EvaluationError> {
        let value = match self {
            Self::Absent => return Err(EvaluationError::InvalidOperand),
            Self::Number(x) => *x,
            Self::Text(s) => {
                let s = s.trim();
                if s.is_empty() {
                    return Err(EvaluationError::InvalidOperand);
                }
                s.parse::<f64>()
                    .map_err(|_| EvaluationError::InvalidOperand)?
            }
        };

        if value.is_finite() {
            Ok(value)
        } else {
            Err(EvaluationError::InvalidOperand)
        }
    }
}

impl From<f64> for Operand {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for Operand {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for Operand {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl<T: Into<Operand>> From<Option<T>> for Operand {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Absent, Into::into)
    }
}

/// A single calculation as submitted by an adapter.
#[derive(Debug, Clone, PartialEq)]
pub struct CalculationRequest {
    pub op: String,
    pub a: Operand,
    /// Only consulted by binary operations.
    pub b: Operand,
}

impl CalculationRequest {
    pub fn new(op: impl Into<String>, a: impl Into<Operand>, b: impl Into<Operand>) -> Self {
        Self {
            op: op.into(),
            a: a.into(),
            b: b.into(),
        }
    }
}

/// Successful outcome echoed back to the caller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Calculation {
    pub operation: Operation,
    pub a: f64,
    /// Present whenever a second operand was supplied and coerces.
    pub b: Option<f64>,
    /// May be infinite or NaN.
    pub result: f64,
}
