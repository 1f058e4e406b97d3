//! Postman Collection extractor
//!
//! Parses Postman Collection v2.x exports into the normalized endpoint
//! catalog.
//!
//! ## Traversal
//! Items form a tree of folders and requests. The tree is walked depth-first
//! in declared order; each request is tagged with the name of its nearest
//! enclosing folder. Traversal stops once `max_endpoints` requests have been
//! collected.
//!
//! ## Base URL
//! Seeded from a collection variable named `baseUrl`, `base_url` or `url`.
//! Without one, the origin of the first absolute request URL is used, and the
//! placeholder base URL if no request URL parses.
//!
//! ## Usage
//! ```rust,ignore
//! use api_playground_parser::postman::PostmanParser;
//!
//! let parser = PostmanParser::from_file("collection.postman_collection.json")?;
//! let document = parser.parse(&ParseOptions::default());
//! ```

mod converter;
mod parser;
mod types;

pub use parser::PostmanParser;
pub use types::*;
