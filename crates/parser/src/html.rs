//! HTML / free-text heuristic extractor
//!
//! **Best effort, no correctness guarantee.** This is the fallback for any
//! documentation that is not a structured OpenAPI, Swagger or Postman
//! document. It scans text with regular expressions:
//!
//! 1. The origin of the first absolute URL becomes the base URL.
//! 2. Every `METHOD /path` occurrence becomes an endpoint.
//! 3. Standalone REST-looking paths (`/users`, `/api/v1/users/{id}`) not
//!    already found become GET endpoints.
//!
//! Both false positives and false negatives are expected. Extraction never
//! fails; the worst case is an empty endpoint list.

use api_playground_common::{
    DocumentMetadata, EndpointDescriptor, HttpMethod, NormalizedDocument, SourceType,
    PLACEHOLDER_BASE_URL,
};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use tracing::debug;
use url::Url;

/// Hard cap on endpoints produced from free text
pub const MAX_HTML_ENDPOINTS: usize = 50;

static ABSOLUTE_URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"https?://[^\s"'<>()\[\]]+"#).expect("valid URL pattern"));

static METHOD_AND_PATH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(GET|POST|PUT|PATCH|DELETE|HEAD|OPTIONS)\s+(/[A-Za-z0-9_\-./{}:]*)")
        .expect("valid method pattern")
});

static REST_PATH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:/api)?(?:/v[0-9]+)?/[A-Za-z][A-Za-z0-9_-]*(?:/\{[A-Za-z0-9_]+\})?")
        .expect("valid path pattern")
});

static TITLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<title[^>]*>(.*?)</title>").expect("valid title pattern"));

/// Extract endpoints from HTML or any other text
///
/// At most `min(max_endpoints, MAX_HTML_ENDPOINTS)` endpoints are returned.
pub fn extract_html(text: &str, max_endpoints: usize) -> NormalizedDocument {
    let limit = max_endpoints.min(MAX_HTML_ENDPOINTS);
    let mut endpoints = Vec::new();
    let mut seen_paths: HashSet<String> = HashSet::new();

    for caps in METHOD_AND_PATH.captures_iter(text) {
        if endpoints.len() >= limit {
            break;
        }
        let Ok(method) = caps[1].parse::<HttpMethod>() else {
            continue;
        };
        let path = caps[2].trim_end_matches(['.', ',', ':']);
        if path.is_empty() {
            continue;
        }

        seen_paths.insert(path.to_string());
        endpoints.push(synthesized(method, path));
    }

    for found in REST_PATH.find_iter(text) {
        if endpoints.len() >= limit {
            break;
        }
        if !starts_cleanly(text, found.start()) || !ends_cleanly(text, found.end()) {
            continue;
        }
        if seen_paths.insert(found.as_str().to_string()) {
            endpoints.push(synthesized(HttpMethod::Get, found.as_str()));
        }
    }

    debug!(endpoints = endpoints.len(), "extracted endpoints from free text");

    NormalizedDocument {
        base_url: first_origin(text).unwrap_or_else(|| PLACEHOLDER_BASE_URL.to_string()),
        endpoints,
        metadata: DocumentMetadata {
            title: page_title(text),
            version: None,
            description: None,
            source_type: SourceType::Html,
        },
    }
}

fn synthesized(method: HttpMethod, path: &str) -> EndpointDescriptor {
    let mut endpoint = EndpointDescriptor::new(method, path);
    endpoint.summary = Some(format!("{} {}", method, path));
    endpoint
}

/// Origin of the first absolute URL that parses
fn first_origin(text: &str) -> Option<String> {
    ABSOLUTE_URL
        .find_iter(text)
        .filter_map(|m| Url::parse(m.as_str()).ok())
        .map(|url| url.origin())
        .find(|origin| origin.is_tuple())
        .map(|origin| origin.ascii_serialization())
}

fn page_title(text: &str) -> Option<String> {
    let raw = TITLE.captures(text)?.get(1)?.as_str();
    let title = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    (!title.is_empty()).then_some(title)
}

/// A path token must not continue a word, URL or closing tag
fn starts_cleanly(text: &str, start: usize) -> bool {
    match text[..start].chars().next_back() {
        None => true,
        Some(c) => c.is_whitespace() || matches!(c, '"' | '\'' | '`' | '(' | '>' | '='),
    }
}

/// A path token must not run on into a longer path or a file name
fn ends_cleanly(text: &str, end: usize) -> bool {
    let mut rest = text[end..].chars();
    match rest.next() {
        None => true,
        Some(c) if c.is_alphanumeric() || matches!(c, '_' | '-' | '/' | '{' | '}') => false,
        Some('.') => !rest.next().is_some_and(char::is_alphanumeric),
        Some(_) => true,
    }
}
