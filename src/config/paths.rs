//! Path management for finreport
//!
//! ## Path Resolution Order
//!
//! 1. `FINREPORT_DATA_DIR` environment variable (if set)
//! 2. The platform config directory (`~/.config/finreport` on Linux,
//!    `%APPDATA%\finreport\config` on Windows)

use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use crate::error::ReportError;

/// Environment variable overriding the base directory
pub const DATA_DIR_ENV: &str = "FINREPORT_DATA_DIR";

/// Manages all paths used by finreport
#[derive(Debug, Clone)]
pub struct ReportPaths {
    base_dir: PathBuf,
}

impl ReportPaths {
    /// Resolve the base directory from the environment or the platform
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, ReportError> {
        let base_dir = match std::env::var(DATA_DIR_ENV) {
            Ok(custom) if !custom.is_empty() => PathBuf::from(custom),
            _ => ProjectDirs::from("", "", "finreport")
                .map(|dirs| dirs.config_dir().to_path_buf())
                .ok_or_else(|| {
                    ReportError::Config("Could not determine a home directory".into())
                })?,
        };

        Ok(Self { base_dir })
    }

    /// Create ReportPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the account profile
    pub fn profile_file(&self) -> PathBuf {
        self.base_dir.join("profile.json")
    }

    /// Primary record store (`<base>/remote/`)
    pub fn remote_dir(&self) -> PathBuf {
        self.base_dir.join("remote")
    }

    /// Fallback record store (`<base>/cache/`)
    pub fn cache_dir(&self) -> PathBuf {
        self.base_dir.join("cache")
    }

    /// Default output directory for artifacts
    pub fn exports_dir(&self) -> PathBuf {
        self.base_dir.join("exports")
    }

    /// Ensure all required directories exist
    pub fn ensure_directories(&self) -> Result<(), ReportError> {
        for (label, dir) in [
            ("base", self.base_dir.clone()),
            ("remote", self.remote_dir()),
            ("cache", self.cache_dir()),
            ("exports", self.exports_dir()),
        ] {
            std::fs::create_dir_all(&dir).map_err(|e| {
                ReportError::Io(format!("Failed to create {} directory: {}", label, e))
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ReportPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.remote_dir(), temp_dir.path().join("remote"));
        assert_eq!(paths.cache_dir(), temp_dir.path().join("cache"));
        assert_eq!(paths.settings_file(), temp_dir.path().join("config.json"));
        assert_eq!(paths.profile_file(), temp_dir.path().join("profile.json"));
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ReportPaths::with_base_dir(temp_dir.path().join("nested"));

        paths.ensure_directories().unwrap();

        assert!(paths.remote_dir().exists());
        assert!(paths.cache_dir().exists());
        assert!(paths.exports_dir().exists());
    }
}
