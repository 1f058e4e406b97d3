//! Format detection
//!
//! Classifies raw documentation as OpenAPI 3.x, Swagger 2.0, a Postman
//! collection, or HTML/free text. Detection is a pure function of its input.

use crate::lenient::scalar_to_string;
use serde_json::Value;
use std::fmt;

/// Raw documentation handed to the parser
#[derive(Debug, Clone, Copy)]
pub enum RawDocument<'a> {
    /// Text that may hold JSON, YAML, HTML or anything else
    Text(&'a str),
    /// An already-decoded structured value
    Structured(&'a Value),
}

impl<'a> From<&'a str> for RawDocument<'a> {
    fn from(text: &'a str) -> Self {
        RawDocument::Text(text)
    }
}

impl<'a> From<&'a String> for RawDocument<'a> {
    fn from(text: &'a String) -> Self {
        RawDocument::Text(text)
    }
}

impl<'a> From<&'a Value> for RawDocument<'a> {
    fn from(value: &'a Value) -> Self {
        RawDocument::Structured(value)
    }
}

/// Result of format detection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentFormat {
    OpenApi,
    Swagger,
    Postman,
    Html,
    Unknown,
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentFormat::OpenApi => write!(f, "openapi"),
            DocumentFormat::Swagger => write!(f, "swagger"),
            DocumentFormat::Postman => write!(f, "postman"),
            DocumentFormat::Html => write!(f, "html"),
            DocumentFormat::Unknown => write!(f, "unknown"),
        }
    }
}

/// Classify raw documentation
///
/// Text that does not decode as a structured document is `Html`; text that
/// decodes but carries no known signature is `Unknown`.
pub fn detect_format(input: RawDocument<'_>) -> DocumentFormat {
    match input {
        RawDocument::Structured(value) => detect_value_format(value),
        RawDocument::Text(text) => match decode_text(text) {
            Some(value) => detect_value_format(&value),
            None => DocumentFormat::Html,
        },
    }
}

/// Classify a decoded value by its schema signature, in priority order
pub fn detect_value_format(value: &Value) -> DocumentFormat {
    if version_field(value, "openapi").is_some_and(|v| v.starts_with("3.")) {
        return DocumentFormat::OpenApi;
    }

    if version_field(value, "swagger").is_some_and(|v| v == "2.0") {
        return DocumentFormat::Swagger;
    }

    if is_postman_collection(value) {
        return DocumentFormat::Postman;
    }

    DocumentFormat::Unknown
}

/// Decode text as a structured document
///
/// JSON is tried first. YAML is accepted only when it yields an OpenAPI or
/// Swagger document, so prose and markup that happen to be valid YAML still
/// fall through to the HTML extractor.
pub(crate) fn decode_text(text: &str) -> Option<Value> {
    if let Ok(value) = serde_json::from_str::<Value>(text) {
        return Some(value);
    }

    let value = decode_yaml(text)?;
    match detect_value_format(&value) {
        DocumentFormat::OpenApi | DocumentFormat::Swagger => Some(value),
        _ => None,
    }
}

/// Decode YAML into a JSON value
///
/// Scalar mapping keys become strings, so `200:` response keys survive.
pub(crate) fn decode_yaml(text: &str) -> Option<Value> {
    let yaml: serde_yaml::Value = serde_yaml::from_str(text).ok()?;
    Some(yaml_to_json(yaml))
}

fn yaml_to_json(yaml: serde_yaml::Value) -> Value {
    match yaml {
        serde_yaml::Value::Null => Value::Null,
        serde_yaml::Value::Bool(b) => Value::Bool(b),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::from(i)
            } else if let Some(u) = n.as_u64() {
                Value::from(u)
            } else {
                n.as_f64()
                    .and_then(serde_json::Number::from_f64)
                    .map(Value::Number)
                    .unwrap_or(Value::Null)
            }
        }
        serde_yaml::Value::String(s) => Value::String(s),
        serde_yaml::Value::Sequence(items) => {
            Value::Array(items.into_iter().map(yaml_to_json).collect())
        }
        serde_yaml::Value::Mapping(mapping) => Value::Object(
            mapping
                .into_iter()
                .filter_map(|(key, value)| Some((yaml_key(key)?, yaml_to_json(value))))
                .collect(),
        ),
        serde_yaml::Value::Tagged(tagged) => yaml_to_json(tagged.value),
    }
}

fn yaml_key(key: serde_yaml::Value) -> Option<String> {
    match key {
        serde_yaml::Value::String(s) => Some(s),
        serde_yaml::Value::Number(n) => Some(n.to_string()),
        serde_yaml::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn version_field(value: &Value, key: &str) -> Option<String> {
    value.get(key).and_then(scalar_to_string)
}

fn is_postman_collection(value: &Value) -> bool {
    let Some(info) = value.get("info").and_then(Value::as_object) else {
        return false;
    };

    let has_identifier = info.contains_key("_postman_id")
        || info
            .get("schema")
            .and_then(Value::as_str)
            .is_some_and(|schema| schema.contains("getpostman.com"));

    has_identifier && value.get("item").is_some_and(Value::is_array)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_detect_structured_formats() {
        let openapi = json!({"openapi": "3.1.0", "paths": {}});
        assert_eq!(detect_value_format(&openapi), DocumentFormat::OpenApi);

        let swagger = json!({"swagger": "2.0", "paths": {}});
        assert_eq!(detect_value_format(&swagger), DocumentFormat::Swagger);

        let postman = json!({
            "info": {
                "name": "Demo",
                "schema": "https://schema.getpostman.com/json/collection/v2.1.0/collection.json"
            },
            "item": []
        });
        assert_eq!(detect_value_format(&postman), DocumentFormat::Postman);
    }

    #[test]
    fn test_openapi_takes_priority() {
        let both = json!({"openapi": "3.0.3", "swagger": "2.0"});
        assert_eq!(detect_value_format(&both), DocumentFormat::OpenApi);
    }

    #[test]
    fn test_near_misses_are_unknown() {
        assert_eq!(
            detect_value_format(&json!({"openapi": "2.0"})),
            DocumentFormat::Unknown
        );
        assert_eq!(
            detect_value_format(&json!({"swagger": "1.2"})),
            DocumentFormat::Unknown
        );
        // Postman identifier without an item list
        assert_eq!(
            detect_value_format(&json!({"info": {"_postman_id": "abc"}})),
            DocumentFormat::Unknown
        );
        // Item list without a Postman identifier
        assert_eq!(
            detect_value_format(&json!({"info": {"name": "x"}, "item": []})),
            DocumentFormat::Unknown
        );
    }

    #[test]
    fn test_text_that_is_not_json_is_html() {
        let html = "<html><body><h1>Docs</h1></body></html>";
        assert_eq!(detect_format(RawDocument::Text(html)), DocumentFormat::Html);
        assert_eq!(detect_format("".into()), DocumentFormat::Html);
        assert_eq!(detect_format("title: just yaml".into()), DocumentFormat::Html);
    }

    #[test]
    fn test_json_text_without_signature_is_unknown() {
        assert_eq!(detect_format(r#"{"hello": "world"}"#.into()), DocumentFormat::Unknown);
    }

    #[test]
    fn test_yaml_numeric_keys_become_strings() {
        let value = decode_yaml("responses:\n  200:\n    description: ok\n").unwrap();
        assert_eq!(value["responses"]["200"]["description"], "ok");
    }

    #[test]
    fn test_yaml_openapi_text() {
        let yaml = "openapi: 3.0.0\ninfo:\n  title: Pets\n  version: 1.0\npaths: {}\n";
        assert_eq!(detect_format(yaml.into()), DocumentFormat::OpenApi);
    }
}
