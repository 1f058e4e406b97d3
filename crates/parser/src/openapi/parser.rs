//! OpenAPI document loader

use super::types::OpenApiSpec;
use api_playground_common::{NormalizedDocument, ParseOptions, PlaygroundError, Result};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// OpenAPI 3.x parser
///
/// Holds a decoded document; call [`OpenApiParser::parse`] to extract the
/// normalized catalog with a given set of filters.
pub struct OpenApiParser {
    /// Loaded OpenAPI spec
    spec: OpenApiSpec,
}

impl OpenApiParser {
    /// Load an OpenAPI document from a JSON or YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            PlaygroundError::MalformedInput(format!(
                "Failed to read OpenAPI file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;

        match serde_json::from_str::<Value>(&content) {
            Ok(value) => Self::from_value(value),
            Err(_) => {
                let value = crate::detect::decode_yaml(&content).ok_or_else(|| {
                    PlaygroundError::MalformedInput(format!(
                        "{} is neither JSON nor YAML",
                        path.as_ref().display()
                    ))
                })?;
                Self::from_value(value)
            }
        }
    }

    /// Parse an OpenAPI document from JSON text
    pub fn from_json(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json).map_err(|e| {
            PlaygroundError::MalformedInput(format!("Failed to parse OpenAPI JSON: {}", e))
        })?;
        Self::from_value(value)
    }

    /// Wrap an already-decoded OpenAPI document
    pub fn from_value(value: Value) -> Result<Self> {
        if !value.is_object() {
            return Err(PlaygroundError::MalformedInput(
                "OpenAPI document must be an object".to_string(),
            ));
        }

        let spec: OpenApiSpec = serde_json::from_value(value).map_err(|e| {
            PlaygroundError::MalformedInput(format!("Failed to decode OpenAPI document: {}", e))
        })?;

        Ok(Self { spec })
    }

    /// Extract the normalized endpoint catalog
    pub fn parse(&self, options: &ParseOptions) -> NormalizedDocument {
        super::converter::convert_openapi_to_document(&self.spec, options)
    }

    /// Get reference to the underlying OpenAPI spec
    pub fn spec(&self) -> &OpenApiSpec {
        &self.spec
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_openapi() {
        let openapi_json = r#"{
            "openapi": "3.0.0",
            "info": {
                "title": "Test API",
                "version": "1.0.0"
            },
            "paths": {}
        }"#;

        let parser = OpenApiParser::from_json(openapi_json);
        assert!(parser.is_ok());

        let parser = parser.unwrap();
        assert_eq!(parser.spec.openapi.as_deref(), Some("3.0.0"));
        assert_eq!(parser.spec.info.title.as_deref(), Some("Test API"));
    }

    #[test]
    fn test_non_object_is_malformed() {
        let err = OpenApiParser::from_json("[1, 2, 3]").err().unwrap();
        assert!(matches!(err, PlaygroundError::MalformedInput(_)));
    }
}
