//! Export module for the report compiler
//!
//! Provides every export format over one `ExportEnvelope`:
//! - Snapshot: the envelope as JSON, round-trippable
//! - YAML: the snapshot with a comment header
//! - Tabular: one CSV row per leaf field
//! - Document: the paginated PDF report

pub mod document;
pub mod envelope;
pub mod snapshot;
pub mod tabular;
pub mod yaml;

use chrono::NaiveDate;
use std::fmt;
use std::str::FromStr;

use crate::config::Settings;
use crate::error::{ReportError, ReportResult};

pub use document::{render_document, PdfSurfaceFactory, SurfaceFactory};
pub use envelope::{ExportEnvelope, ExportInfo, ExportSummary, EXPORT_SCHEMA_VERSION};
pub use snapshot::{export_snapshot, import_snapshot};
pub use tabular::{export_tabular, parse_tabular, regroup, TabularRow};
pub use yaml::{export_yaml, import_yaml};

/// Export format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportMode {
    /// Full envelope as JSON
    Snapshot,
    /// Full envelope as commented YAML
    Yaml,
    /// Flattened leaf rows as CSV
    Tabular,
    /// Paginated PDF report
    Document,
}

impl ExportMode {
    pub const ALL: [ExportMode; 4] = [
        ExportMode::Snapshot,
        ExportMode::Yaml,
        ExportMode::Tabular,
        ExportMode::Document,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Self::Snapshot => "snapshot",
            Self::Yaml => "yaml",
            Self::Tabular => "tabular",
            Self::Document => "document",
        }
    }

    /// File extension, without the dot
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Snapshot => "json",
            Self::Yaml => "yaml",
            Self::Tabular => "csv",
            Self::Document => "pdf",
        }
    }

    /// "report" for the document, "data" for everything else
    pub fn artifact_kind(&self) -> &'static str {
        match self {
            Self::Document => "report",
            _ => "data",
        }
    }
}

impl fmt::Display for ExportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl FromStr for ExportMode {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "snapshot" | "json" => Ok(Self::Snapshot),
            "yaml" | "yml" => Ok(Self::Yaml),
            "tabular" | "csv" => Ok(Self::Tabular),
            "document" | "pdf" => Ok(Self::Document),
            _ => Err(ReportError::InvalidMode(s.to_string())),
        }
    }
}

/// Artifact payload
#[derive(Debug, Clone, PartialEq)]
pub enum ArtifactContent {
    Text(String),
    Binary(Vec<u8>),
}

impl ArtifactContent {
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Text(text) => text.as_bytes(),
            Self::Binary(bytes) => bytes.as_slice(),
        }
    }

    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A finished export, ready to be persisted by the caller
#[derive(Debug, Clone, PartialEq)]
pub struct ExportArtifact {
    pub mode: ExportMode,
    pub file_name: String,
    pub content: ArtifactContent,
}

/// Lowercase the product name, collapsing anything non-alphanumeric to `-`
fn slug(product: &str) -> String {
    let mut out = String::with_capacity(product.len());
    for c in product.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c.to_ascii_lowercase());
        } else if !out.is_empty() && !out.ends_with('-') {
            out.push('-');
        }
    }
    let trimmed = out.trim_end_matches('-');
    if trimmed.is_empty() {
        "finreport".to_string()
    } else {
        trimmed.to_string()
    }
}

/// `{product}-financial-{data|report}-{YYYY-MM-DD}.{ext}`
pub fn file_name(product: &str, mode: ExportMode, date: NaiveDate) -> String {
    format!(
        "{}-financial-{}-{}.{}",
        slug(product),
        mode.artifact_kind(),
        date.format("%Y-%m-%d"),
        mode.extension()
    )
}

/// Render `envelope` in `mode`
///
/// The surface factory is only consulted for documents.
pub fn format(
    envelope: &ExportEnvelope,
    mode: ExportMode,
    settings: &Settings,
    factory: &dyn SurfaceFactory,
) -> ReportResult<ExportArtifact> {
    let content = match mode {
        ExportMode::Snapshot => {
            ArtifactContent::Text(export_snapshot(envelope, settings.pretty_json)?)
        }
        ExportMode::Yaml => ArtifactContent::Text(export_yaml(envelope)?),
        ExportMode::Tabular => ArtifactContent::Text(export_tabular(envelope)?),
        ExportMode::Document => {
            ArtifactContent::Binary(render_document(envelope, settings, factory)?)
        }
    };

    Ok(ExportArtifact {
        mode,
        file_name: file_name(
            &envelope.export_info.product,
            mode,
            envelope.export_info.generated_at.date_naive(),
        ),
        content,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::document::MemorySurfaceFactory;
    use crate::models::{AccountProfile, RawRecordSet};
    use chrono::{TimeZone, Utc};

    fn envelope() -> ExportEnvelope {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 8, 30, 0).unwrap();
        ExportEnvelope::build(
            RawRecordSet::new(),
            &AccountProfile::anonymous(),
            &Settings::default(),
            at,
        )
        .unwrap()
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!("snapshot".parse::<ExportMode>().unwrap(), ExportMode::Snapshot);
        assert_eq!("PDF".parse::<ExportMode>().unwrap(), ExportMode::Document);
        assert_eq!(" csv ".parse::<ExportMode>().unwrap(), ExportMode::Tabular);
        assert_eq!("yml".parse::<ExportMode>().unwrap(), ExportMode::Yaml);

        let err = "xml".parse::<ExportMode>().unwrap_err();
        assert!(err.is_invalid_mode());
        assert!(err.to_string().contains("xml"));
    }

    #[test]
    fn test_file_names() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        assert_eq!(
            file_name("finreport", ExportMode::Snapshot, date),
            "finreport-financial-data-2024-05-01.json"
        );
        assert_eq!(
            file_name("Acme Wealth!", ExportMode::Document, date),
            "acme-wealth-financial-report-2024-05-01.pdf"
        );
        assert_eq!(
            file_name("  ", ExportMode::Tabular, date),
            "finreport-financial-data-2024-05-01.csv"
        );
    }

    #[test]
    fn test_format_each_mode() {
        let envelope = envelope();
        let settings = Settings::default();
        let factory = MemorySurfaceFactory::new();

        for mode in ExportMode::ALL {
            let artifact = format(&envelope, mode, &settings, &factory).unwrap();
            assert_eq!(artifact.mode, mode);
            assert!(artifact.file_name.ends_with(mode.extension()));
            assert!(!artifact.content.is_empty());
        }

        let snapshot = format(&envelope, ExportMode::Snapshot, &settings, &factory).unwrap();
        match snapshot.content {
            ArtifactContent::Text(json) => assert_eq!(import_snapshot(&json).unwrap(), envelope),
            other => panic!("expected text, got {:?}", other),
        }
    }

    #[test]
    fn test_document_uses_factory() {
        let factory = MemorySurfaceFactory::new();
        let artifact = format(
            &envelope(),
            ExportMode::Document,
            &Settings::default(),
            &factory,
        )
        .unwrap();
        assert!(matches!(artifact.content, ArtifactContent::Binary(_)));
        assert!(!factory.log().texts().is_empty());
    }
}
