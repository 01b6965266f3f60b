//! Configuration module for finreport
//!
//! This module provides configuration management including:
//! - Platform path resolution with an environment override
//! - User settings persistence
//! - Account profile loading

pub mod paths;
pub mod settings;

pub use paths::ReportPaths;
pub use settings::{load_profile, PageSettings, Settings, SourceEntry};
