//! Playground configuration loading from YAML files
//!
//! Every section is optional; missing fields take the documented defaults,
//! so an empty file is a valid configuration.

use crate::{ParseOptions, PlaygroundError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Root structure for `api-playground.yaml`
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PlaygroundConfig {
    /// Extractor filters
    pub parse: ParseOptions,
    /// Prompt-injection limits
    pub injection: InjectionSettings,
    /// Parse-result cache
    pub cache: CacheSettings,
}

/// Limits for context injection into prompts
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct InjectionSettings {
    /// Endpoints listed in the formatted fragment before truncating
    pub max_listed_endpoints: usize,
    /// Estimated-token threshold above which a context is too large
    pub max_tokens: usize,
    /// Endpoint count kept when trimming an oversized context
    pub trim_to: usize,
    /// Mask credentials that appear in the fragment
    pub redact: bool,
}

impl Default for InjectionSettings {
    fn default() -> Self {
        Self {
            max_listed_endpoints: 50,
            max_tokens: 2000,
            trim_to: 30,
            redact: true,
        }
    }
}

/// Time-bounded cache settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CacheSettings {
    pub ttl_seconds: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self { ttl_seconds: 300 }
    }
}

impl PlaygroundConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            PlaygroundError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        Self::from_yaml(&content).map_err(|e| match e {
            PlaygroundError::Config(msg) => {
                PlaygroundError::Config(format!("{} (in {:?})", msg, path))
            }
            other => other,
        })
    }

    /// Parse configuration from YAML text
    pub fn from_yaml(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(content)
            .map_err(|e| PlaygroundError::Config(format!("Failed to parse config YAML: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = PlaygroundConfig::from_yaml("").unwrap();
        assert_eq!(config, PlaygroundConfig::default());
        assert_eq!(config.parse.max_endpoints, 200);
        assert_eq!(config.injection.max_tokens, 2000);
        assert_eq!(config.injection.trim_to, 30);
        assert_eq!(config.cache.ttl_seconds, 300);
    }

    #[test]
    fn test_partial_config_keeps_other_defaults() {
        let config = PlaygroundConfig::from_yaml(
            "parse:\n  max_endpoints: 10\n  exclude_tags: [internal]\ninjection:\n  redact: false\n",
        )
        .unwrap();

        assert_eq!(config.parse.max_endpoints, 10);
        assert_eq!(config.parse.exclude_tags, vec!["internal".to_string()]);
        assert!(!config.parse.include_deprecated);
        assert!(!config.injection.redact);
        assert_eq!(config.injection.max_listed_endpoints, 50);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "cache:\n  ttl_seconds: 5").unwrap();

        let config = PlaygroundConfig::load(file.path()).unwrap();
        assert_eq!(config.cache.ttl_seconds, 5);
    }

    #[test]
    fn test_malformed_config_is_config_error() {
        let err = PlaygroundConfig::from_yaml("parse: [1, 2").unwrap_err();
        assert!(matches!(err, PlaygroundError::Config(_)));
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let err = PlaygroundConfig::load(Path::new("/nonexistent/api-playground.yaml")).unwrap_err();
        assert!(matches!(err, PlaygroundError::Config(_)));
    }
}
