//! Directory-of-JSON record source
//!
//! Reads `<dir>/<kind>.json` for each kind, e.g. `debts.json` or
//! `netWorthHistory.json`. A missing file means "no data"; an unreadable or
//! invalid file is a source failure.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use super::RecordSource;
use crate::error::{ReportError, ReportResult};
use crate::models::{RecordKind, SourcePayload};
use crate::storage::read_json_value;

/// Record source backed by a directory of per-kind JSON files
#[derive(Debug, Clone)]
pub struct JsonDirSource {
    name: String,
    dir: PathBuf,
}

impl JsonDirSource {
    /// Create a source reading from `dir`
    pub fn new(name: impl Into<String>, dir: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            dir: dir.into(),
        }
    }

    /// Directory this source reads from
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing `kind`
    pub fn file_for(&self, kind: RecordKind) -> PathBuf {
        self.dir.join(format!("{}.json", kind.key()))
    }
}

#[async_trait]
impl RecordSource for JsonDirSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch(&self, kind: RecordKind) -> ReportResult<Option<SourcePayload>> {
        let path = self.file_for(kind);
        let value = read_json_value(&path).map_err(|e| {
            ReportError::source_failure(&self.name, kind.key(), e.to_string())
        })?;
        Ok(value.map(|v| SourcePayload::from_json(kind, v)))
    }
}
