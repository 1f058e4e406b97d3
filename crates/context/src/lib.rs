//! API contexts and prompt-injection formatting for API Playground
//!
//! A context is a validated [`NormalizedDocument`](api_playground_common::NormalizedDocument)
//! with a name, provenance and timestamps. This crate owns:
//! - [`ApiContext`] creation and document replacement
//! - [`ContextFormatter`], which renders a context as a prompt fragment from
//!   a Tera template, with token estimation and endpoint trimming
//! - [`ContextStore`], the persistence seam, and [`MemoryContextStore`]
//! - [`ContentCache`], a TTL cache keyed by content hash
//! - [`redact_secrets`] for masking credentials in outgoing text

mod cache;
mod context;
mod formatter;
mod redact;
mod store;
mod templates;

pub use cache::{content_key, ContentCache};
pub use context::ApiContext;
pub use formatter::{
    default_formatter, estimate_tokens, format_for_prompt_injection, is_too_large_for_injection,
    trim_to_endpoint_limit, ContextFormatter, CHARS_PER_TOKEN, UNTAGGED_GROUP,
};
pub use redact::{redact_secrets, REDACTED};
pub use store::{save_and_activate, ContextStore, MemoryContextStore};
pub use templates::endpoint_line;
