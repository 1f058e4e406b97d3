//! Swagger document loader

use super::types::SwaggerSpec;
use api_playground_common::{NormalizedDocument, ParseOptions, PlaygroundError, Result};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Swagger 2.0 parser
pub struct SwaggerParser {
    /// Loaded Swagger spec
    spec: SwaggerSpec,
}

impl SwaggerParser {
    /// Load a Swagger document from a JSON or YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            PlaygroundError::MalformedInput(format!(
                "Failed to read Swagger file {}: {}",
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

    /// Parse a Swagger document from JSON text
    pub fn from_json(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json).map_err(|e| {
            PlaygroundError::MalformedInput(format!("Failed to parse Swagger JSON: {}", e))
        })?;
        Self::from_value(value)
    }

    /// Wrap an already-decoded Swagger document
    pub fn from_value(value: Value) -> Result<Self> {
        if !value.is_object() {
            return Err(PlaygroundError::MalformedInput(
                "Swagger document must be an object".to_string(),
            ));
        }

        let spec: SwaggerSpec = serde_json::from_value(value).map_err(|e| {
            PlaygroundError::MalformedInput(format!("Failed to decode Swagger document: {}", e))
        })?;

        Ok(Self { spec })
    }

    /// Extract the normalized endpoint catalog
    pub fn parse(&self, options: &ParseOptions) -> NormalizedDocument {
        super::converter::convert_swagger_to_document(&self.spec, options)
    }

    /// Get reference to the underlying Swagger spec
    pub fn spec(&self) -> &SwaggerSpec {
        &self.spec
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_swagger() {
        let parser = SwaggerParser::from_json(
            r#"{"swagger": "2.0", "info": {"title": "Pets", "version": "1"}, "paths": {}}"#,
        )
        .unwrap();

        assert_eq!(parser.spec().swagger.as_deref(), Some("2.0"));
        assert_eq!(parser.spec().info.title.as_deref(), Some("Pets"));
    }
}
