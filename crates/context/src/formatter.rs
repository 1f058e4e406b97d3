//! Prompt-injection formatting
//!
//! Renders a context as a compact text fragment for an AI prompt. Sizes are
//! measured with [`estimate_tokens`], which is an approximation (four
//! characters per token), not a real tokenizer. Callers should leave headroom
//! rather than treat the estimate as exact.

use crate::context::ApiContext;
use crate::redact::redact_secrets;
use crate::templates::{load_templates, CONTEXT_TEMPLATE};
use api_playground_common::{
    EndpointDescriptor, InjectionSettings, NormalizedDocument, PlaygroundError, Result,
};
use once_cell::sync::Lazy;
use serde::Serialize;
use tera::{Context, Tera};
use tracing::debug;

/// Characters counted as one token by [`estimate_tokens`]
pub const CHARS_PER_TOKEN: usize = 4;

/// Group name for endpoints without tags
pub const UNTAGGED_GROUP: &str = "General";

/// Renders contexts into prompt fragments
pub struct ContextFormatter {
    tera: Tera,
    settings: InjectionSettings,
}

#[derive(Serialize)]
struct EndpointGroup<'a> {
    name: &'a str,
    endpoints: Vec<&'a EndpointDescriptor>,
}

impl ContextFormatter {
    pub fn new(settings: InjectionSettings) -> Result<Self> {
        let tera = load_templates()?;
        Ok(Self { tera, settings })
    }

    /// Formatter with the default limits (50 listed endpoints, redaction on)
    pub fn with_defaults() -> Result<Self> {
        Self::new(InjectionSettings::default())
    }

    pub fn settings(&self) -> &InjectionSettings {
        &self.settings
    }

    /// Format a stored context
    pub fn format(&self, context: &ApiContext) -> Result<String> {
        self.format_document(&context.name, &context.document)
    }

    /// Format a document under the given context name
    ///
    /// Lists at most `max_listed_endpoints` endpoints, grouped by first tag in
    /// order of first appearance, and notes how many were left out.
    pub fn format_document(&self, name: &str, document: &NormalizedDocument) -> Result<String> {
        let listed = document.endpoints.len().min(self.settings.max_listed_endpoints);
        let groups = group_by_first_tag(&document.endpoints[..listed]);

        let mut context = Context::new();
        context.insert("name", name);
        context.insert("base_url", &document.base_url);
        context.insert("description", &document.metadata.description);
        context.insert("groups", &groups);
        context.insert("remaining", &(document.endpoints.len() - listed));

        let rendered = self
            .tera
            .render(CONTEXT_TEMPLATE, &context)
            .map_err(|e| PlaygroundError::Template(format!("Template error: {:?}", e)))?;

        Ok(if self.settings.redact {
            redact_secrets(&rendered)
        } else {
            rendered
        })
    }

    /// Whether the formatted context exceeds `max_tokens` estimated tokens
    pub fn is_too_large(&self, context: &ApiContext, max_tokens: usize) -> Result<bool> {
        Ok(estimate_tokens(&self.format(context)?) > max_tokens)
    }

    /// Format a context, trimming its endpoints first if it is too large
    ///
    /// Uses the configured `max_tokens` threshold and `trim_to` limit.
    pub fn format_within_budget(&self, context: &ApiContext) -> Result<String> {
        let full = self.format(context)?;
        let tokens = estimate_tokens(&full);
        if tokens <= self.settings.max_tokens {
            return Ok(full);
        }

        debug!(
            tokens,
            max_tokens = self.settings.max_tokens,
            trim_to = self.settings.trim_to,
            "context too large for injection, trimming endpoints"
        );
        let trimmed = trim_to_endpoint_limit(&context.document, self.settings.trim_to);
        self.format_document(&context.name, &trimmed)
    }
}

fn group_by_first_tag(endpoints: &[EndpointDescriptor]) -> Vec<EndpointGroup<'_>> {
    let mut groups: Vec<EndpointGroup<'_>> = Vec::new();

    for endpoint in endpoints {
        let name = endpoint
            .tags
            .first()
            .map(String::as_str)
            .unwrap_or(UNTAGGED_GROUP);

        match groups.iter_mut().find(|g| g.name == name) {
            Some(group) => group.endpoints.push(endpoint),
            None => groups.push(EndpointGroup {
                name,
                endpoints: vec![endpoint],
            }),
        }
    }

    groups
}

/// Estimated token count of a text: `ceil(chars / 4)`
///
/// This is a fixed-ratio approximation, not a tokenizer; real counts vary by
/// model and content.
pub fn estimate_tokens(text: &str) -> usize {
    text.chars().count().div_ceil(CHARS_PER_TOKEN)
}

/// Copy of a document keeping only its first `max_endpoints` endpoints
pub fn trim_to_endpoint_limit(
    document: &NormalizedDocument,
    max_endpoints: usize,
) -> NormalizedDocument {
    NormalizedDocument {
        base_url: document.base_url.clone(),
        endpoints: document.endpoints.iter().take(max_endpoints).cloned().collect(),
        metadata: document.metadata.clone(),
    }
}

// Template load failures are kept as their message; `PlaygroundError` is not `Clone`.
static DEFAULT_FORMATTER: Lazy<std::result::Result<ContextFormatter, String>> = Lazy::new(|| {
    ContextFormatter::with_defaults().map_err(|e| match e {
        PlaygroundError::Template(message) => message,
        other => other.to_string(),
    })
});

/// Shared formatter with the default settings, built on first use
pub fn default_formatter() -> Result<&'static ContextFormatter> {
    DEFAULT_FORMATTER
        .as_ref()
        .map_err(|message| PlaygroundError::Template(message.clone()))
}

/// Format a context with the default settings
pub fn format_for_prompt_injection(context: &ApiContext) -> Result<String> {
    default_formatter()?.format(context)
}

/// Whether a context's default rendering exceeds `max_tokens` (usually 2000)
pub fn is_too_large_for_injection(context: &ApiContext, max_tokens: usize) -> Result<bool> {
    default_formatter()?.is_too_large(context, max_tokens)
}
