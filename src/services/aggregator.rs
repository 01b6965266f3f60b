//! Record aggregation
//!
//! Collects a `RawRecordSet` from an ordered list of sources. For each kind
//! the first source returning a non-empty payload wins; failures and empty
//! results fall through to the next source, and a kind nobody can supply
//! resolves to an empty array.

use futures::future::join_all;
use serde_json::Value;
use tracing::{debug, warn};

use crate::models::{RawRecordSet, RecordKind};
use crate::sources::RecordSource;

/// Collects raw records from sources in precedence order
pub struct Aggregator<'a> {
    sources: Vec<&'a dyn RecordSource>,
}

impl<'a> Aggregator<'a> {
    /// Create an aggregator over sources, highest precedence first
    pub fn new(sources: Vec<&'a dyn RecordSource>) -> Self {
        Self { sources }
    }

    /// Names of the configured sources, in precedence order
    pub fn source_names(&self) -> Vec<String> {
        self.sources.iter().map(|s| s.name().to_string()).collect()
    }

    /// Collect every kind
    ///
    /// All kinds are fetched concurrently and all of them are awaited before
    /// this returns, so callers never observe a partially-populated set.
    pub async fn collect(&self) -> RawRecordSet {
        let resolved = join_all(RecordKind::ALL.into_iter().map(|kind| self.resolve(kind))).await;

        let mut records = RawRecordSet::new();
        for (kind, items) in resolved {
            records.set(kind, items);
        }

        debug!(total = records.total(), "aggregation complete");
        records
    }

    /// Resolve one kind against the sources in order
    pub async fn resolve(&self, kind: RecordKind) -> (RecordKind, Vec<Value>) {
        for source in &self.sources {
            match source.fetch(kind).await {
                Ok(Some(payload)) if !payload.is_empty() => {
                    let items = payload.normalize();
                    debug!(
                        kind = kind.key(),
                        source = source.name(),
                        count = items.len(),
                        "resolved kind"
                    );
                    return (kind, items);
                }
                Ok(_) => {
                    debug!(kind = kind.key(), source = source.name(), "no data");
                }
                Err(e) => {
                    warn!(
                        kind = kind.key(),
                        source = source.name(),
                        error = %e,
                        "source failed, falling back"
                    );
                }
            }
        }
        (kind, Vec::new())
    }
}

/// Collect a record set from sources in precedence order
pub async fn aggregate(sources: &[&dyn RecordSource]) -> RawRecordSet {
    Aggregator::new(sources.to_vec()).collect().await
}
