use serde::{Deserialize, Serialize};

/// Options fixed at [crate::Evaluator] construction. Both can be changed later through the
/// evaluator's setters.
///
/// Deserializes from camelCase JSON; omitted fields keep their defaults, so `{}` is the default
/// configuration.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EvaluatorConfig {
    /// Memoize decisions until the next store change or flush. Enabled by default.
    pub caching: bool,
    /// Report every store check and cache write through `log` at debug level. This never
    /// changes evaluation results. Disabled by default.
    pub trace: bool,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            caching: true,
            trace: false,
        }
    }
}

impl EvaluatorConfig {
    pub fn with_caching(mut self, enabled: bool) -> Self {
        self.caching = enabled;
        self
    }

    pub fn with_trace(mut self, enabled: bool) -> Self {
        self.trace = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::EvaluatorConfig;
    use test_case::test_case;

    #[test]
    fn defaults() {
        let config = EvaluatorConfig::default();
        assert!(config.caching);
        assert!(!config.trace);
    }

    #[test_case("{}", EvaluatorConfig::default(); "empty object is the default")]
    #[test_case(r#"{"caching": false}"#, EvaluatorConfig::default().with_caching(false); "caching only")]
    #[test_case(r#"{"trace": true}"#, EvaluatorConfig::default().with_trace(true); "trace only")]
    #[test_case(
        r#"{"caching": false, "trace": true}"#,
        EvaluatorConfig { caching: false, trace: true };
        "both fields"
    )]
    fn deserialization(json: &str, expected: EvaluatorConfig) {
        assert_eq!(
            serde_json::from_str::<EvaluatorConfig>(json).unwrap(),
            expected
        );
    }
}
