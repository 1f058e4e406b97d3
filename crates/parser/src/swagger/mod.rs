//! Swagger 2.0 extractor
//!
//! Parses Swagger 2.0 documents into the normalized endpoint catalog.
//!
//! The base URL is assembled as `scheme://host/basePath`, with `https` as the
//! default scheme and the placeholder host when `host` is absent. Operation
//! filtering, ordering and `requiresAuth` follow the OpenAPI extractor.
//!
//! ## Usage
//! ```rust,ignore
//! use api_playground_parser::swagger::SwaggerParser;
//!
//! let parser = SwaggerParser::from_file("petstore-v2.json")?;
//! let document = parser.parse(&ParseOptions::default());
//! ```

mod converter;
mod parser;
mod types;

pub use parser::SwaggerParser;
pub use types::*;
