//! CLI command for data export
//!
//! Runs one export and writes the artifact atomically.

use std::path::PathBuf;

use clap::Args;
use futures::executor::block_on;

use super::{build_service, SourceArgs};
use crate::config::{ReportPaths, Settings};
use crate::error::{ReportError, ReportResult};
use crate::export::ExportMode;
use crate::services::write_artifact;

/// Export arguments
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Export format: snapshot, yaml, tabular or document
    /// (json, yml, csv and pdf are accepted as aliases)
    #[arg(short, long, default_value = "snapshot", value_parser = parse_export_mode)]
    pub format: ExportMode,

    /// Directory to write into (defaults to the exports directory)
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub sources: SourceArgs,
}

/// Rejects unknown formats while arguments are parsed, before any file is touched
fn parse_export_mode(value: &str) -> Result<ExportMode, ReportError> {
    value.parse()
}

/// Handle the export command
pub fn handle_export_command(
    paths: &ReportPaths,
    settings: &Settings,
    args: ExportArgs,
) -> ReportResult<()> {
    let service = build_service(paths, settings, &args.sources)?;
    let artifact = block_on(service.run_mode(args.format))?;

    let dir = args.output.unwrap_or_else(|| paths.exports_dir());
    let path = write_artifact(&dir, &artifact)?;

    println!(
        "Exported {} ({} bytes) to: {}",
        artifact.mode,
        artifact.content.len(),
        path.display()
    );
    Ok(())
}
