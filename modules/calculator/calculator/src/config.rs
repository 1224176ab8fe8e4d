//! Configuration for the calculator module.

use serde::{Deserialize, Serialize};

/// Read from `modules.calculator.config`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct CalculatorConfig {
    /// Reject inputs the form refuses (zero logarithm, factorial above 170,
    /// zero to a negative power, negative base with fractional exponent)
    /// instead of returning `inf`/NaN.
    pub strict_domain: bool,

    /// Page title of the HTML form.
    pub title: String,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            strict_domain: false,
            title: "Calculator".to_owned(),
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let cfg = CalculatorConfig::default();
        assert!(!cfg.strict_domain);
        assert_eq!(cfg.title, "Calculator");
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let cfg: CalculatorConfig =
            serde_json::from_value(serde_json::json!({ "strict_domain": true })).unwrap();
        assert!(cfg.strict_domain);
        assert_eq!(cfg.title, "Calculator");
    }

    #[test]
    fn test_unknown_fields_rejected() {
        let res: Result<CalculatorConfig, _> =
            serde_json::from_value(serde_json::json!({ "strict": true }));
        assert!(res.is_err());
    }
}
