//! Configuration for the Analyzer

use serde::{Deserialize, Serialize};

/// What to do with the model's cleaned output before relaying it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputPolicy {
    /// Parse and validate against the report schema; reject malformed output
    #[default]
    Strict,
    /// Relay the cleaned text without inspecting it
    Passthrough,
}

/// Configuration for the Analyzer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisConfig {
    /// Output validation policy
    pub output_policy: OutputPolicy,

    /// Log a warning when the report cites filenames that were not uploaded
    pub warn_unknown_sources: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            output_policy: OutputPolicy::Strict,
            warn_unknown_sources: true,
        }
    }
}

impl AnalysisConfig {
    /// Configuration that relays model output unvalidated
    pub fn passthrough() -> Self {
        Self {
            output_policy: OutputPolicy::Passthrough,
            warn_unknown_sources: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_strict() {
        let config = AnalysisConfig::default();
        assert_eq!(config.output_policy, OutputPolicy::Strict);
        assert!(config.warn_unknown_sources);
    }

    #[test]
    fn test_passthrough_preset() {
        let config = AnalysisConfig::passthrough();
        assert_eq!(config.output_policy, OutputPolicy::Passthrough);
        assert!(!config.warn_unknown_sources);
    }

    #[test]
    fn test_policy_names() {
        #[derive(Deserialize)]
        struct Wrapper {
            output_policy: OutputPolicy,
        }

        let parsed: Wrapper = serde_json::from_str(r#"{"output_policy": "passthrough"}"#).unwrap();
        assert_eq!(parsed.output_policy, OutputPolicy::Passthrough);
        assert!(serde_json::from_str::<Wrapper>(r#"{"output_policy": "lenient"}"#).is_err());
    }
}
