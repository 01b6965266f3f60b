//! In-memory record source
//!
//! Holds payloads per kind and can be told to fail for chosen kinds. Used by
//! tests and by callers that already hold their data in memory.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use serde_json::Value;

use super::RecordSource;
use crate::error::{ReportError, ReportResult};
use crate::models::{RecordKind, SourcePayload};

/// Record source backed by in-memory payloads
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    name: String,
    payloads: HashMap<RecordKind, SourcePayload>,
    failing: HashSet<RecordKind>,
}

impl MemorySource {
    /// Create an empty source
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Store a payload for a kind
    pub fn with_payload(mut self, kind: RecordKind, payload: SourcePayload) -> Self {
        self.payloads.insert(kind, payload);
        self
    }

    /// Store a JSON document for a kind, classified as a store would return it
    pub fn with_json(self, kind: RecordKind, value: Value) -> Self {
        let payload = SourcePayload::from_json(kind, value);
        self.with_payload(kind, payload)
    }

    /// Make every fetch of `kind` fail
    pub fn failing(mut self, kind: RecordKind) -> Self {
        self.failing.insert(kind);
        self
    }
}

#[async_trait]
impl RecordSource for MemorySource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch(&self, kind: RecordKind) -> ReportResult<Option<SourcePayload>> {
        if self.failing.contains(&kind) {
            return Err(ReportError::source_failure(
                &self.name,
                kind.key(),
                "source unavailable",
            ));
        }
        Ok(self.payloads.get(&kind).cloned())
    }
}
