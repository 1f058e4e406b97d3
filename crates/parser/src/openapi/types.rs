//! OpenAPI 3.x type definitions
//!
//! Only the parts needed to build endpoint descriptors are modeled. Request
//! bodies, responses and schemas stay as raw JSON values.

use crate::lenient::{lenient, lenient_string};
use serde::Deserialize;
use serde_json::{Map, Value};

pub use crate::operation::{Info, Operation, PathItem};

/// OpenAPI document root
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OpenApiSpec {
    /// OpenAPI version (e.g., "3.0.0")
    #[serde(deserialize_with = "lenient_string")]
    pub openapi: Option<String>,

    /// API metadata
    #[serde(deserialize_with = "lenient")]
    pub info: Info,

    /// Servers
    #[serde(deserialize_with = "lenient")]
    pub servers: Vec<Server>,

    /// Path items keyed by path template, in document order
    #[serde(deserialize_with = "lenient")]
    pub paths: Map<String, Value>,

    /// Reusable components
    #[serde(deserialize_with = "lenient")]
    pub components: Components,

    /// Default security requirement for every operation
    #[serde(deserialize_with = "lenient")]
    pub security: Option<Vec<Value>>,
}

/// Server information
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Server {
    #[serde(deserialize_with = "lenient_string")]
    pub url: Option<String>,

    /// Template variables used in `url`
    #[serde(deserialize_with = "lenient")]
    pub variables: Map<String, Value>,
}

impl Server {
    /// Server URL with `{name}` variables replaced by their defaults
    pub fn resolved_url(&self) -> Option<String> {
        let mut url = self.url.clone()?;
        for (name, variable) in &self.variables {
            if let Some(default) = variable.get("default").and_then(Value::as_str) {
                url = url.replace(&format!("{{{}}}", name), default);
            }
        }
        Some(url)
    }
}

/// Reusable components
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Components {
    #[serde(deserialize_with = "lenient")]
    pub parameters: Map<String, Value>,
}
