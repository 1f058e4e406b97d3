//! Named, validated API contexts

use api_playground_common::{
    ContextSource, NormalizedDocument, ParseOptions, PlaygroundError, Result,
};
use api_playground_parser::{parse_and_validate, validate, RawDocument};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

/// A normalized document promoted to a stored, named context
///
/// Only documents that pass validation become contexts, so every context has
/// a parseable base URL and at least one endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiContext {
    pub id: Uuid,
    pub name: String,
    pub source: ContextSource,
    pub document: NormalizedDocument,
    pub created_at: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
}

impl ApiContext {
    /// Promote a document to a context
    ///
    /// # Errors
    /// `InvalidDocument` with every validation message when the document is
    /// not viable.
    pub fn new(
        name: impl Into<String>,
        source: ContextSource,
        document: NormalizedDocument,
    ) -> Result<Self> {
        ensure_valid(&document)?;

        let now = Utc::now();
        let context = Self {
            id: Uuid::new_v4(),
            name: name.into(),
            source,
            document,
            created_at: now,
            last_updated: now,
        };
        debug!(id = %context.id, name = %context.name, "created API context");
        Ok(context)
    }

    /// Parse raw documentation and promote the result in one step
    pub fn from_documentation(
        name: impl Into<String>,
        source: ContextSource,
        input: RawDocument<'_>,
        options: &ParseOptions,
    ) -> Result<Self> {
        let document = parse_and_validate(input, options)?;
        Self::new(name, source, document)
    }

    /// Swap in a freshly parsed document, keeping identity and creation time
    ///
    /// The current document is left untouched if the new one is invalid.
    pub fn replace_document(&mut self, document: NormalizedDocument) -> Result<()> {
        ensure_valid(&document)?;
        self.document = document;
        self.last_updated = Utc::now();
        Ok(())
    }

    pub fn endpoint_count(&self) -> usize {
        self.document.endpoints.len()
    }
}

fn ensure_valid(document: &NormalizedDocument) -> Result<()> {
    let report = validate(document);
    if report.valid {
        Ok(())
    } else {
        Err(PlaygroundError::InvalidDocument(report.errors))
    }
}
