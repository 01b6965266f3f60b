//! Record sources
//!
//! A record source is anything that can hand back raw records for a kind:
//! a remote document store, a local cache, an in-memory fixture. The
//! aggregator consults sources in a declared precedence order.

pub mod json_dir;
pub mod memory;

use async_trait::async_trait;

use crate::error::ReportResult;
use crate::models::{RecordKind, SourcePayload};

pub use json_dir::JsonDirSource;
pub use memory::MemorySource;

/// Trait for fetching raw records per kind (allows different backends)
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Name used in logs
    fn name(&self) -> &str;

    /// Fetch the raw payload stored for `kind`
    ///
    /// `Ok(None)` means "nothing stored"; `Err` is reserved for genuine
    /// failures (I/O, permissions, unreadable data).
    async fn fetch(&self, kind: RecordKind) -> ReportResult<Option<SourcePayload>>;
}
