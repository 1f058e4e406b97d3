//! Postman Collection v2.x type definitions

use crate::lenient::{lenient, lenient_string};
use serde::Deserialize;
use serde_json::Value;

/// Collection variable names that seed the base URL
pub const BASE_URL_VARIABLES: [&str; 3] = ["baseUrl", "base_url", "url"];

/// Collection root
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PostmanCollection {
    #[serde(deserialize_with = "lenient")]
    pub info: CollectionInfo,

    /// Top-level folders and requests
    #[serde(deserialize_with = "lenient")]
    pub item: Vec<Value>,

    #[serde(deserialize_with = "lenient")]
    pub variable: Vec<Variable>,

    /// Collection-wide auth inherited by every request
    pub auth: Option<Value>,
}

/// Collection information block
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CollectionInfo {
    #[serde(deserialize_with = "lenient_string")]
    pub name: Option<String>,

    /// String or `{ "content": ... }`
    pub description: Option<Value>,

    #[serde(deserialize_with = "lenient_string")]
    pub schema: Option<String>,

    #[serde(rename = "_postman_id", deserialize_with = "lenient_string")]
    pub postman_id: Option<String>,

    #[serde(deserialize_with = "lenient_string")]
    pub version: Option<String>,
}

/// Collection variable
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Variable {
    #[serde(deserialize_with = "lenient_string")]
    pub key: Option<String>,

    #[serde(deserialize_with = "lenient_string")]
    pub value: Option<String>,
}

/// A node in the item tree: a folder when `item` is present, else a request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Item {
    #[serde(deserialize_with = "lenient_string")]
    pub name: Option<String>,

    #[serde(deserialize_with = "lenient")]
    pub item: Option<Vec<Value>>,

    /// Either a bare URL string or a request object
    pub request: Option<Value>,

    pub description: Option<Value>,

    pub auth: Option<Value>,

    /// Saved example responses
    #[serde(deserialize_with = "lenient")]
    pub response: Vec<Value>,
}

/// Request object form of `Item::request`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RequestObject {
    #[serde(deserialize_with = "lenient_string")]
    pub method: Option<String>,

    /// Either a raw string or a structured URL object
    pub url: Option<Value>,

    #[serde(deserialize_with = "lenient")]
    pub header: Vec<KeyValue>,

    pub description: Option<Value>,

    pub auth: Option<Value>,

    pub body: Option<Value>,
}

/// Header or query entry
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct KeyValue {
    #[serde(deserialize_with = "lenient_string")]
    pub key: Option<String>,

    #[serde(deserialize_with = "lenient")]
    pub disabled: bool,

    pub description: Option<Value>,
}

impl PostmanCollection {
    /// First collection variable that names a base URL
    pub fn base_url_variable(&self) -> Option<&str> {
        self.variable
            .iter()
            .filter(|v| {
                v.key
                    .as_deref()
                    .is_some_and(|k| BASE_URL_VARIABLES.contains(&k))
            })
            .find_map(|v| v.value.as_deref().map(str::trim).filter(|s| !s.is_empty()))
    }
}

/// Whether an `auth` block demands credentials
///
/// `None` when the block is absent or does not say, meaning the parent's
/// setting applies.
pub fn auth_requirement(auth: Option<&Value>) -> Option<bool> {
    auth?
        .get("type")
        .and_then(Value::as_str)
        .map(|kind| kind != "noauth")
}
