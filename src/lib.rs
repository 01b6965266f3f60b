//! finreport - Financial report compiler
//!
//! This library aggregates a user's financial records from several sources,
//! derives summary metrics, and exports them as a JSON or YAML snapshot, a
//! flattened CSV table, or a paginated PDF report.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Paths, settings and the account profile
//! - `error`: Custom error types
//! - `models`: Record kinds, raw record sets and lenient typed views
//! - `sources`: Record sources (JSON directories, in-memory fixtures)
//! - `services`: Aggregation and the export pipeline
//! - `reports`: Summary metrics, top-N selection and insight rules
//! - `export`: Snapshot, YAML, tabular and document formats
//! - `display`: Value formatting and terminal tables
//! - `storage`: JSON reads and atomic writes
//!
//! # Example
//!
//! ```rust,ignore
//! use finreport::config::{ReportPaths, Settings};
//! use finreport::export::PdfSurfaceFactory;
//! use finreport::services::ExportService;
//! use finreport::sources::JsonDirSource;
//!
//! let paths = ReportPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let service = ExportService::new(
//!     vec![Box::new(JsonDirSource::new("cache", paths.cache_dir()))],
//!     settings,
//!     finreport::config::load_profile(&paths)?,
//!     Box::new(PdfSurfaceFactory::new()),
//! );
//! let artifact = futures::executor::block_on(service.run("document"))?;
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod reports;
pub mod services;
pub mod sources;
pub mod storage;

pub use error::{ReportError, ReportResult};
