//! Export service
//!
//! Runs one export end to end: parse the mode, aggregate every kind,
//! calculate metrics, build the envelope and format the artifact.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::config::Settings;
use crate::error::{ReportError, ReportResult};
use crate::export::{self, ExportArtifact, ExportEnvelope, ExportMode, SurfaceFactory};
use crate::models::{AccountProfile, RawRecordSet};
use crate::reports::{calculate, DatasetCounts, SummaryMetrics};
use crate::sources::RecordSource;
use crate::storage::write_bytes_atomic;

use super::aggregator::Aggregator;

/// Service for producing export artifacts
pub struct ExportService {
    sources: Vec<Box<dyn RecordSource>>,
    settings: Settings,
    profile: AccountProfile,
    factory: Box<dyn SurfaceFactory>,
}

impl ExportService {
    /// Create a new export service
    ///
    /// `sources` are consulted in order, highest precedence first.
    pub fn new(
        sources: Vec<Box<dyn RecordSource>>,
        settings: Settings,
        profile: AccountProfile,
        factory: Box<dyn SurfaceFactory>,
    ) -> Self {
        Self {
            sources,
            settings,
            profile,
            factory,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Aggregate the current records from every source
    pub async fn collect(&self) -> RawRecordSet {
        let sources: Vec<&dyn RecordSource> = self.sources.iter().map(|s| s.as_ref()).collect();
        let aggregator = Aggregator::new(sources);
        debug!(sources = ?aggregator.source_names(), "aggregating records");
        aggregator.collect().await
    }

    /// Run an export for a mode name such as `snapshot` or `pdf`
    ///
    /// The mode is parsed before any source is read.
    pub async fn run(&self, mode: &str) -> ReportResult<ExportArtifact> {
        let mode: ExportMode = mode.parse()?;
        self.run_mode(mode).await
    }

    /// Run an export stamped with the current time
    pub async fn run_mode(&self, mode: ExportMode) -> ReportResult<ExportArtifact> {
        self.run_at(mode, Utc::now()).await
    }

    /// Run an export stamped with `generated_at`
    pub async fn run_at(
        &self,
        mode: ExportMode,
        generated_at: DateTime<Utc>,
    ) -> ReportResult<ExportArtifact> {
        info!(mode = %mode, "starting export");

        let records = self.collect().await;
        let envelope = ExportEnvelope::build(records, &self.profile, &self.settings, generated_at)?;
        envelope.validate().map_err(ReportError::Export)?;

        let artifact = export::format(&envelope, mode, &self.settings, self.factory.as_ref())?;
        info!(
            mode = %mode,
            file = %artifact.file_name,
            bytes = artifact.content.len(),
            records = envelope.summary.dataset_counts.total_datasets,
            "export complete"
        );
        Ok(artifact)
    }

    /// Metrics and dataset counts for the current records
    pub async fn summary(&self) -> (SummaryMetrics, DatasetCounts) {
        let records = self.collect().await;
        (calculate(&records), DatasetCounts::from_records(&records))
    }
}

/// Write an artifact into `dir` under its file name
///
/// The write is atomic; a failure leaves no partial file behind.
pub fn write_artifact(dir: &Path, artifact: &ExportArtifact) -> ReportResult<PathBuf> {
    std::fs::create_dir_all(dir).map_err(|e| {
        ReportError::Export(format!(
            "Failed to create output directory {}: {}",
            dir.display(),
            e
        ))
    })?;

    let path = dir.join(&artifact.file_name);
    write_bytes_atomic(&path, artifact.content.as_bytes())?;
    info!(path = %path.display(), "artifact written");
    Ok(path)
}
