//! Path management for pfa
//!
//! ## Path Resolution Order
//!
//! 1. `PFA_DATA_DIR` environment variable (if set)
//! 2. The platform configuration directory for `pfa`
//!    (`~/.config/pfa` on Linux, `%APPDATA%\pfa\config` on Windows)

use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use crate::error::{PfaError, PfaResult};

/// Environment variable that overrides the base directory
pub const DATA_DIR_ENV: &str = "PFA_DATA_DIR";

/// Manages all paths used by pfa
#[derive(Debug, Clone)]
pub struct PfaPaths {
    base_dir: PathBuf,
}

impl PfaPaths {
    /// Resolve the base directory from the environment or the platform default
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> PfaResult<Self> {
        let base_dir = match std::env::var_os(DATA_DIR_ENV) {
            Some(custom) if !custom.is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create paths under a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Directory holding the tabular data files
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    pub fn transactions_file(&self) -> PathBuf {
        self.data_dir().join("transactions.csv")
    }

    pub fn budget_file(&self) -> PathBuf {
        self.data_dir().join("budget.csv")
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> PfaResult<()> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| PfaError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| PfaError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }
}

fn resolve_default_path() -> PfaResult<PathBuf> {
    ProjectDirs::from("", "", "pfa")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| PfaError::Config("Could not determine a home directory".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = PfaPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.data_dir(), temp_dir.path().join("data"));
    }

    #[test]
    fn test_file_paths() {
        let temp_dir = TempDir::new().unwrap();
        let paths = PfaPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.settings_file(), temp_dir.path().join("config.json"));
        assert_eq!(
            paths.transactions_file(),
            temp_dir.path().join("data").join("transactions.csv")
        );
        assert_eq!(
            paths.budget_file(),
            temp_dir.path().join("data").join("budget.csv")
        );
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let paths = PfaPaths::with_base_dir(temp_dir.path().join("nested"));

        paths.ensure_directories().unwrap();

        assert!(paths.data_dir().is_dir());
    }
}
