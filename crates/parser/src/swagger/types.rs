//! Swagger 2.0 type definitions

use crate::lenient::{lenient, lenient_string};
use serde::Deserialize;
use serde_json::{Map, Value};

pub use crate::operation::{Info, Operation, PathItem};

/// Swagger document root
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SwaggerSpec {
    /// Always "2.0" for documents routed here
    #[serde(deserialize_with = "lenient_string")]
    pub swagger: Option<String>,

    #[serde(deserialize_with = "lenient")]
    pub info: Info,

    #[serde(deserialize_with = "lenient_string")]
    pub host: Option<String>,

    #[serde(rename = "basePath", deserialize_with = "lenient_string")]
    pub base_path: Option<String>,

    /// Transfer protocols; the first one is used for the base URL
    #[serde(deserialize_with = "lenient")]
    pub schemes: Vec<String>,

    /// Path items keyed by path template, in document order
    #[serde(deserialize_with = "lenient")]
    pub paths: Map<String, Value>,

    /// Reusable parameters referenced as `#/parameters/<name>`
    #[serde(deserialize_with = "lenient")]
    pub parameters: Map<String, Value>,

    #[serde(deserialize_with = "lenient")]
    pub security: Option<Vec<Value>>,
}

impl SwaggerSpec {
    /// `scheme://host/basePath`, defaulting scheme and host
    pub fn base_url(&self) -> String {
        let scheme = self
            .schemes
            .first()
            .map(String::as_str)
            .filter(|s| !s.is_empty())
            .unwrap_or("https");

        let host = self
            .host
            .as_deref()
            .map(str::trim)
            .filter(|h| !h.is_empty())
            .unwrap_or(api_playground_common::PLACEHOLDER_HOST);

        let base_path = self
            .base_path
            .as_deref()
            .map(|p| p.trim().trim_end_matches('/'))
            .unwrap_or("");

        if base_path.is_empty() {
            format!("{}://{}", scheme, host)
        } else if base_path.starts_with('/') {
            format!("{}://{}{}", scheme, host, base_path)
        } else {
            format!("{}://{}/{}", scheme, host, base_path)
        }
    }
}
