//! Time-bounded cache keyed by content hash

use api_playground_common::{CacheSettings, NormalizedDocument, ParseOptions, Result};
use api_playground_parser::parse_str;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tracing::debug;

/// SHA-256 hex digest of some content
pub fn content_key(content: &str) -> String {
    format!("{:x}", Sha256::digest(content.as_bytes()))
}

struct Entry<T> {
    value: T,
    inserted_at: Instant,
}

/// Map whose entries expire after a fixed time-to-live
///
/// Expired entries are treated as absent and evicted when touched.
pub struct ContentCache<T> {
    ttl: Duration,
    entries: HashMap<String, Entry<T>>,
}

impl<T> ContentCache<T> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: HashMap::new(),
        }
    }

    pub fn from_settings(settings: &CacheSettings) -> Self {
        Self::new(Duration::from_secs(settings.ttl_seconds))
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Store a value, replacing any entry under the same key
    pub fn insert(&mut self, key: String, value: T) {
        self.entries.insert(
            key,
            Entry {
                value,
                inserted_at: Instant::now(),
            },
        );
    }

    pub fn get(&mut self, key: &str) -> Option<&T> {
        let expired = self
            .entries
            .get(key)
            .is_some_and(|entry| entry.inserted_at.elapsed() >= self.ttl);

        if expired {
            debug!(key, "evicting expired cache entry");
            self.entries.remove(key);
            return None;
        }

        self.entries.get(key).map(|entry| &entry.value)
    }

    /// Drop every expired entry
    pub fn purge_expired(&mut self) {
        let ttl = self.ttl;
        self.entries.retain(|_, entry| entry.inserted_at.elapsed() < ttl);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ContentCache<NormalizedDocument> {
    /// Parse text, reusing the result for identical text and options
    ///
    /// Failed parses are not cached.
    pub fn parse_cached(&mut self, text: &str, options: &ParseOptions) -> Result<NormalizedDocument> {
        let key = format!("{}:{}", content_key(text), content_key(&serde_json::to_string(options)?));

        if let Some(document) = self.get(&key) {
            debug!("parse cache hit");
            return Ok(document.clone());
        }

        let document = parse_str(text, options)?;
        self.insert(key, document.clone());
        Ok(document)
    }
}
