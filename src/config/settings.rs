//! User settings for finreport
//!
//! Report branding, currency, page geometry, section sizes and the record
//! sources to consult, in precedence order.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::paths::ReportPaths;
use crate::error::ReportError;
use crate::models::AccountProfile;
use crate::reports::clamp_top_n;
use crate::storage::{read_json, write_json_atomic};

/// Page geometry in points
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageSettings {
    pub width: f64,
    pub height: f64,
    pub margin_x: f64,
    pub margin_top: f64,
    pub margin_bottom: f64,
}

impl Default for PageSettings {
    /// A4 portrait
    fn default() -> Self {
        Self {
            width: 595.28,
            height: 841.89,
            margin_x: 48.0,
            margin_top: 72.0,
            margin_bottom: 56.0,
        }
    }
}

/// One configured record source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceEntry {
    /// Name used in logs
    pub name: String,
    /// Directory of per-kind JSON files
    pub dir: PathBuf,
}

/// User settings for finreport
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Product name used in titles and artifact file names
    #[serde(default = "default_product_name")]
    pub product_name: String,

    /// Default currency symbol
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Document page geometry
    #[serde(default)]
    pub page: PageSettings,

    /// Rows shown by top-N sections (clamped to 4..=6)
    #[serde(default = "default_top_n")]
    pub top_n: usize,

    /// Net worth entries shown in the trend table
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,

    /// Activity events shown in the recent activity table
    #[serde(default = "default_activity_limit")]
    pub activity_limit: usize,

    /// Pretty-print JSON snapshots
    #[serde(default = "default_true")]
    pub pretty_json: bool,

    /// Record sources, highest precedence first
    ///
    /// Empty means the `remote` then `cache` directories under the base dir.
    #[serde(default)]
    pub sources: Vec<SourceEntry>,
}

fn default_schema_version() -> u32 {
    1
}

fn default_product_name() -> String {
    "finreport".to_string()
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_top_n() -> usize {
    5
}

fn default_history_limit() -> usize {
    6
}

fn default_activity_limit() -> usize {
    6
}

fn default_true() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            product_name: default_product_name(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            page: PageSettings::default(),
            top_n: default_top_n(),
            history_limit: default_history_limit(),
            activity_limit: default_activity_limit(),
            pretty_json: true,
            sources: Vec::new(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &ReportPaths) -> Result<Self, ReportError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| ReportError::Io(format!("Failed to read settings file: {}", e)))?;

        let mut settings: Settings = serde_json::from_str(&contents)
            .map_err(|e| ReportError::Config(format!("Failed to parse settings file: {}", e)))?;
        settings.top_n = clamp_top_n(settings.top_n);
        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self, paths: &ReportPaths) -> Result<(), ReportError> {
        paths.ensure_directories()?;
        write_json_atomic(paths.settings_file(), self)
    }

    /// Top-N row count within the supported range
    pub fn effective_top_n(&self) -> usize {
        clamp_top_n(self.top_n)
    }

    /// Configured sources, or the default remote/cache pair
    pub fn resolved_sources(&self, paths: &ReportPaths) -> Vec<SourceEntry> {
        if self.sources.is_empty() {
            vec![
                SourceEntry {
                    name: "remote".to_string(),
                    dir: paths.remote_dir(),
                },
                SourceEntry {
                    name: "cache".to_string(),
                    dir: paths.cache_dir(),
                },
            ]
        } else {
            self.sources.clone()
        }
    }
}

/// Load the account profile, falling back to an anonymous one
pub fn load_profile(paths: &ReportPaths) -> Result<AccountProfile, ReportError> {
    read_json(paths.profile_file())
}
