//! Service layer for the report compiler
//!
//! The service layer ties record sources, metrics and export formats into
//! one export run, and persists the resulting artifacts.

pub mod aggregator;
pub mod export;

pub use aggregator::{aggregate, Aggregator};
pub use export::{write_artifact, ExportService};
