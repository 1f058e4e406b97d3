//! Common types and utilities for API Playground
//!
//! This crate contains the normalized endpoint catalog every documentation
//! parser produces, the shared error type, and configuration loading used
//! across the parser, context, and CLI components.

mod config;

pub use config::{CacheSettings, InjectionSettings, PlaygroundConfig};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Base URL used when a document declares no usable server.
///
/// `example.com` is reserved (RFC 2606), so this can never be mistaken for a
/// real API host.
pub const PLACEHOLDER_BASE_URL: &str = "https://api.example.com";

/// Host used when a Swagger 2.0 document omits `host`.
pub const PLACEHOLDER_HOST: &str = "api.example.com";

/// Default cap on endpoints emitted by the structured extractors.
pub const DEFAULT_MAX_ENDPOINTS: usize = 200;

/// Errors that can occur while parsing, validating, or storing API documentation
#[derive(Error, Debug)]
pub enum PlaygroundError {
    #[error("Unsupported format: document does not match OpenAPI, Swagger or Postman")]
    UnsupportedFormat,

    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("Invalid document: {}", .0.join("; "))]
    InvalidDocument(Vec<String>),

    #[error("Context not found: {0}")]
    ContextNotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Template error: {0}")]
    Template(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result type for playground operations
pub type Result<T> = std::result::Result<T, PlaygroundError>;

/// HTTP methods an endpoint descriptor may carry
///
/// Declaration order is the fixed per-path iteration order used by the
/// OpenAPI and Swagger extractors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
    Options,
}

impl HttpMethod {
    /// All methods in extraction order
    pub const ALL: [HttpMethod; 7] = [
        HttpMethod::Get,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Patch,
        HttpMethod::Delete,
        HttpMethod::Head,
        HttpMethod::Options,
    ];

    /// Uppercase wire name (e.g. "GET")
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Head => "HEAD",
            HttpMethod::Options => "OPTIONS",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = PlaygroundError;

    /// Case-insensitive; surrounding whitespace is ignored
    fn from_str(s: &str) -> Result<Self> {
        let upper = s.trim().to_ascii_uppercase();
        HttpMethod::ALL
            .into_iter()
            .find(|m| m.as_str() == upper)
            .ok_or_else(|| PlaygroundError::MalformedInput(format!("unknown HTTP method: {s}")))
    }
}

/// Where a parameter is sent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamLocation {
    Query,
    Path,
    Body,
    Header,
}

impl ParamLocation {
    /// Map a source `in` value onto a location
    ///
    /// Cookies travel in the `Cookie` header and Swagger `formData` travels in
    /// the request body, so both fold into the nearest location. Anything
    /// else is unknown.
    pub fn from_source(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "query" => Some(ParamLocation::Query),
            "path" => Some(ParamLocation::Path),
            "header" | "cookie" => Some(ParamLocation::Header),
            "body" | "formdata" => Some(ParamLocation::Body),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ParamLocation::Query => "query",
            ParamLocation::Path => "path",
            ParamLocation::Body => "body",
            ParamLocation::Header => "header",
        }
    }
}

/// Which extractor produced a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    #[serde(rename = "openapi")]
    OpenApi,
    Swagger,
    Postman,
    Html,
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceType::OpenApi => write!(f, "OpenAPI"),
            SourceType::Swagger => write!(f, "Swagger"),
            SourceType::Postman => write!(f, "Postman"),
            SourceType::Html => write!(f, "HTML"),
        }
    }
}

/// One parameter of an endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterDescriptor {
    pub name: String,

    #[serde(rename = "in")]
    pub location: ParamLocation,

    #[serde(default)]
    pub required: bool,

    /// Declared type (e.g. "string", "integer")
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub param_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Raw schema, passed through untouched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<serde_json::Value>,
}

/// One HTTP operation (method + path)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointDescriptor {
    pub method: HttpMethod,

    /// Source-relative path; never joined with the base URL at parse time
    pub path: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    pub parameters: Vec<ParameterDescriptor>,

    /// Opaque request body definition
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_body: Option<serde_json::Value>,

    /// Opaque responses definition
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub responses: Option<serde_json::Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<String>,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    pub requires_auth: bool,
}

impl EndpointDescriptor {
    /// Endpoint with only method and path set
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            summary: None,
            description: None,
            parameters: Vec::new(),
            request_body: None,
            responses: None,
            operation_id: None,
            tags: Vec::new(),
            requires_auth: false,
        }
    }

    /// Names of required parameters, in declaration order
    pub fn required_parameter_names(&self) -> Vec<&str> {
        self.parameters
            .iter()
            .filter(|p| p.required)
            .map(|p| p.name.as_str())
            .collect()
    }
}

/// Document-level metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub source_type: SourceType,
}

impl DocumentMetadata {
    pub fn new(source_type: SourceType) -> Self {
        Self {
            title: None,
            version: None,
            description: None,
            source_type,
        }
    }
}

/// Format-independent result of any extractor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedDocument {
    pub base_url: String,

    /// In source traversal order; repeated method+path pairs are kept
    pub endpoints: Vec<EndpointDescriptor>,

    pub metadata: DocumentMetadata,
}

impl NormalizedDocument {
    /// Whether the base URL is the placeholder rather than a discovered one
    pub fn has_placeholder_base_url(&self) -> bool {
        self.base_url == PLACEHOLDER_BASE_URL
    }
}

/// Extraction limits and filters
///
/// The deprecation and tag filters apply to OpenAPI and Swagger operations;
/// Postman and HTML extraction only honor `max_endpoints`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    /// Extraction stops (without error) once this many endpoints are emitted
    pub max_endpoints: usize,

    /// Keep operations marked `deprecated`
    pub include_deprecated: bool,

    /// When non-empty, keep only operations sharing at least one tag
    pub include_tags: Vec<String>,

    /// When non-empty, drop operations carrying any of these tags
    pub exclude_tags: Vec<String>,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_endpoints: DEFAULT_MAX_ENDPOINTS,
            include_deprecated: false,
            include_tags: Vec::new(),
            exclude_tags: Vec::new(),
        }
    }
}

impl ParseOptions {
    /// Apply the deprecation and tag filters to one operation
    pub fn admits(&self, deprecated: bool, tags: &[String]) -> bool {
        if deprecated && !self.include_deprecated {
            return false;
        }
        if !self.include_tags.is_empty() && !tags.iter().any(|t| self.include_tags.contains(t)) {
            return false;
        }
        if !self.exclude_tags.is_empty() && tags.iter().any(|t| self.exclude_tags.contains(t)) {
            return false;
        }
        true
    }
}

/// Where a context's document came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind", content = "value")]
pub enum ContextSource {
    Url(String),
    File(String),
}

impl fmt::Display for ContextSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContextSource::Url(url) => f.write_str(url),
            ContextSource::File(name) => f.write_str(name),
        }
    }
}

/// Check that a string parses as an absolute URL
pub fn is_valid_url(candidate: &str) -> bool {
    url::Url::parse(candidate).is_ok()
}
