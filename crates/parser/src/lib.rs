//! API documentation parsing for API Playground
//!
//! This crate turns raw API documentation into a [`NormalizedDocument`]: a
//! base URL, an ordered list of endpoint descriptors, and metadata.
//!
//! ## Parsing Strategy
//!
//! Raw content is classified once by [`detect_format`], then handed to the
//! matching extractor through a lookup table:
//! - OpenAPI 3.x → [`openapi::OpenApiParser`]
//! - Swagger 2.0 → [`swagger::SwaggerParser`]
//! - Postman Collection v2.x → [`postman::PostmanParser`]
//! - Text that is not a structured document → [`html::extract_html`]
//!
//! Structured input with no known signature fails with
//! `PlaygroundError::UnsupportedFormat`. All parsing is synchronous and
//! pure; identical input and options always yield an identical document.

mod detect;
pub mod html;
mod lenient;
mod operation;
pub mod openapi;
pub mod postman;
pub mod swagger;
mod validator;

pub use detect::{detect_format, detect_value_format, DocumentFormat, RawDocument};
pub use openapi::OpenApiParser;
pub use postman::PostmanParser;
pub use swagger::SwaggerParser;
pub use validator::{validate, ValidationReport, INVALID_BASE_URL, MISSING_BASE_URL, NO_ENDPOINTS};

use api_playground_common::{NormalizedDocument, ParseOptions, PlaygroundError, Result};
use serde_json::Value;
use tracing::debug;

/// Extractor for one structured format
type Extractor = fn(&Value, &ParseOptions) -> Result<NormalizedDocument>;

const EXTRACTORS: [(DocumentFormat, Extractor); 3] = [
    (DocumentFormat::OpenApi, extract_openapi as Extractor),
    (DocumentFormat::Swagger, extract_swagger as Extractor),
    (DocumentFormat::Postman, extract_postman as Extractor),
];

fn extract_openapi(value: &Value, options: &ParseOptions) -> Result<NormalizedDocument> {
    Ok(OpenApiParser::from_value(value.clone())?.parse(options))
}

fn extract_swagger(value: &Value, options: &ParseOptions) -> Result<NormalizedDocument> {
    Ok(SwaggerParser::from_value(value.clone())?.parse(options))
}

fn extract_postman(value: &Value, options: &ParseOptions) -> Result<NormalizedDocument> {
    Ok(PostmanParser::from_value(value.clone())?.parse(options))
}

fn extractor_for(format: DocumentFormat) -> Option<Extractor> {
    EXTRACTORS
        .iter()
        .find(|(candidate, _)| *candidate == format)
        .map(|(_, extractor)| *extractor)
}

/// Parse raw documentation into a normalized document
///
/// # Arguments
/// * `input` - Text (JSON, YAML, HTML, anything) or an already-decoded value
/// * `options` - Extractor filters; the HTML fallback only honors `max_endpoints`
///
/// # Errors
/// * `UnsupportedFormat` - structured input matching no known signature
/// * `MalformedInput` - a detected document whose root cannot be decoded
pub fn parse(input: RawDocument<'_>, options: &ParseOptions) -> Result<NormalizedDocument> {
    let decoded;
    let value = match input {
        RawDocument::Structured(value) => value,
        RawDocument::Text(text) => match detect::decode_text(text) {
            Some(value) => {
                decoded = value;
                &decoded
            }
            None => {
                debug!("input is not a structured document, using HTML extractor");
                return Ok(html::extract_html(text, options.max_endpoints));
            }
        },
    };

    let format = detect_value_format(value);
    debug!(%format, "detected document format");

    let extractor = extractor_for(format).ok_or(PlaygroundError::UnsupportedFormat)?;
    extractor(value, options)
}

/// Parse text input; see [`parse`]
pub fn parse_str(text: &str, options: &ParseOptions) -> Result<NormalizedDocument> {
    parse(RawDocument::Text(text), options)
}

/// Parse an already-decoded value; see [`parse`]
pub fn parse_value(value: &Value, options: &ParseOptions) -> Result<NormalizedDocument> {
    parse(RawDocument::Structured(value), options)
}

/// Parse, then reject documents that fail [`validate`]
///
/// # Errors
/// Everything [`parse`] returns, plus `InvalidDocument` carrying every
/// validation message.
pub fn parse_and_validate(
    input: RawDocument<'_>,
    options: &ParseOptions,
) -> Result<NormalizedDocument> {
    let document = parse(input, options)?;
    let report = validate(&document);
    if !report.valid {
        return Err(PlaygroundError::InvalidDocument(report.errors));
    }
    Ok(document)
}
