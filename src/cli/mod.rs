//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod config;
pub mod export;
pub mod summary;

use std::path::PathBuf;

use clap::Args;

use crate::config::{load_profile, ReportPaths, Settings};
use crate::error::ReportResult;
use crate::export::PdfSurfaceFactory;
use crate::services::ExportService;
use crate::sources::{JsonDirSource, RecordSource};

pub use config::{handle_config_command, ConfigArgs};
pub use export::{handle_export_command, ExportArgs};
pub use summary::handle_summary_command;

/// Source selection shared by commands that read records
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Read records from this directory instead of the configured sources
    /// (repeatable, highest precedence first)
    #[arg(short, long = "source", value_name = "DIR")]
    pub sources: Vec<PathBuf>,
}

impl SourceArgs {
    /// Record sources in precedence order
    pub fn build(&self, paths: &ReportPaths, settings: &Settings) -> Vec<Box<dyn RecordSource>> {
        if self.sources.is_empty() {
            settings
                .resolved_sources(paths)
                .into_iter()
                .map(|entry| {
                    Box::new(JsonDirSource::new(entry.name, entry.dir)) as Box<dyn RecordSource>
                })
                .collect()
        } else {
            self.sources
                .iter()
                .enumerate()
                .map(|(i, dir)| {
                    Box::new(JsonDirSource::new(format!("source-{}", i + 1), dir.clone()))
                        as Box<dyn RecordSource>
                })
                .collect()
        }
    }
}

/// Export service wired to the PDF writer
pub fn build_service(
    paths: &ReportPaths,
    settings: &Settings,
    sources: &SourceArgs,
) -> ReportResult<ExportService> {
    let profile = load_profile(paths)?;
    let factory =
        PdfSurfaceFactory::with_title(format!("{} Financial Report", settings.product_name));

    Ok(ExportService::new(
        sources.build(paths, settings),
        settings.clone(),
        profile,
        Box::new(factory),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_sources_are_remote_then_cache() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ReportPaths::with_base_dir(temp_dir.path().to_path_buf());

        let sources = SourceArgs::default().build(&paths, &Settings::default());
        let names: Vec<_> = sources.iter().map(|s| s.name().to_string()).collect();
        assert_eq!(names, vec!["remote", "cache"]);
    }

    #[test]
    fn test_explicit_sources_override_settings() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ReportPaths::with_base_dir(temp_dir.path().to_path_buf());
        let args = SourceArgs {
            sources: vec![temp_dir.path().join("a"), temp_dir.path().join("b")],
        };

        let sources = args.build(&paths, &Settings::default());
        let names: Vec<_> = sources.iter().map(|s| s.name().to_string()).collect();
        assert_eq!(names, vec!["source-1", "source-2"]);
    }
}
