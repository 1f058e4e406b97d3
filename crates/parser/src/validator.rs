//! Minimum-viability checks for normalized documents

use api_playground_common::{is_valid_url, NormalizedDocument};
use serde::Serialize;

pub const MISSING_BASE_URL: &str = "Base URL is required";
pub const INVALID_BASE_URL: &str = "Invalid base URL format";
pub const NO_ENDPOINTS: &str = "No endpoints found in documentation";

/// Outcome of validating a document
///
/// Every failing check contributes its own message, so callers can show all
/// problems at once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<String>,
}

/// Check a document before it may become a stored context
///
/// Checks run independently, so an empty base URL is reported both as
/// missing and as an invalid URL.
pub fn validate(document: &NormalizedDocument) -> ValidationReport {
    let mut errors = Vec::new();
    let base_url = document.base_url.trim();

    if base_url.is_empty() {
        errors.push(MISSING_BASE_URL.to_string());
    }

    if !is_valid_url(base_url) {
        errors.push(INVALID_BASE_URL.to_string());
    }

    if document.endpoints.is_empty() {
        errors.push(NO_ENDPOINTS.to_string());
    }

    ValidationReport {
        valid: errors.is_empty(),
        errors,
    }
}
