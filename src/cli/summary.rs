//! CLI command for the terminal summary

use futures::executor::block_on;

use super::{build_service, SourceArgs};
use crate::config::{ReportPaths, Settings};
use crate::display::format_summary;
use crate::error::ReportResult;

/// Print metrics and dataset coverage as tables
pub fn handle_summary_command(
    paths: &ReportPaths,
    settings: &Settings,
    sources: SourceArgs,
) -> ReportResult<()> {
    let service = build_service(paths, settings, &sources)?;
    let (metrics, counts) = block_on(service.summary());

    println!("{} Financial Summary", settings.product_name);
    println!();
    println!(
        "{}",
        format_summary(&metrics, &counts, &settings.currency_symbol)
    );
    Ok(())
}
