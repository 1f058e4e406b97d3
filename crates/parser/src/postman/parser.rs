//! Postman collection loader

use super::types::PostmanCollection;
use api_playground_common::{NormalizedDocument, ParseOptions, PlaygroundError, Result};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Postman Collection parser
pub struct PostmanParser {
    /// Loaded collection
    collection: PostmanCollection,
}

impl PostmanParser {
    /// Load a collection export from file path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            PlaygroundError::MalformedInput(format!(
                "Failed to read Postman collection {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;

        Self::from_json(&content)
    }

    /// Parse a collection from JSON text
    pub fn from_json(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json).map_err(|e| {
            PlaygroundError::MalformedInput(format!("Failed to parse Postman JSON: {}", e))
        })?;
        Self::from_value(value)
    }

    /// Wrap an already-decoded collection
    pub fn from_value(value: Value) -> Result<Self> {
        if !value.is_object() {
            return Err(PlaygroundError::MalformedInput(
                "Postman collection must be an object".to_string(),
            ));
        }

        let collection: PostmanCollection = serde_json::from_value(value).map_err(|e| {
            PlaygroundError::MalformedInput(format!("Failed to decode Postman collection: {}", e))
        })?;

        Ok(Self { collection })
    }

    /// Extract the normalized endpoint catalog
    pub fn parse(&self, options: &ParseOptions) -> NormalizedDocument {
        super::converter::convert_postman_to_document(&self.collection, options)
    }

    /// Get reference to the underlying collection
    pub fn collection(&self) -> &PostmanCollection {
        &self.collection
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_collection() {
        let parser = PostmanParser::from_json(
            r#"{
                "info": {"_postman_id": "1", "name": "Demo"},
                "item": []
            }"#,
        )
        .unwrap();

        assert_eq!(parser.collection().info.name.as_deref(), Some("Demo"));
        assert!(parser.collection().item.is_empty());
    }
}
