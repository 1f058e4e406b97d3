//! OpenAPI 3.x extractor
//!
//! Parses OpenAPI 3.x documents into the normalized endpoint catalog.
//!
//! ## Extraction rules
//! - Base URL: first `servers` entry, with `{variable}` templates replaced by
//!   their declared defaults; the placeholder base URL otherwise
//! - Operations: every path item in document order, methods in the fixed
//!   order GET, POST, PUT, PATCH, DELETE, HEAD, OPTIONS
//! - Filters: deprecation, include/exclude tags, `max_endpoints` cut-off
//!
//! ## Usage
//! ```rust,ignore
//! use api_playground_parser::openapi::OpenApiParser;
//!
//! let parser = OpenApiParser::from_file("petstore.json")?;
//! let document = parser.parse(&ParseOptions::default());
//! ```

mod converter;
mod parser;
mod types;

pub use parser::OpenApiParser;
pub use types::*;
