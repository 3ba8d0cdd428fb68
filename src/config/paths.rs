//! Path management for budgetdash
//!
//! ## Path Resolution Order
//!
//! 1. `BUDGETDASH_DATA_DIR` environment variable (if set)
//! 2. The platform config directory from `directories`
//!    (`~/.config/budgetdash` on Linux, `%APPDATA%\budgetdash` on Windows)

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::DashError;

/// Environment variable that overrides the base directory
pub const DATA_DIR_ENV: &str = "BUDGETDASH_DATA_DIR";

/// Manages all paths used by budgetdash
#[derive(Debug, Clone)]
pub struct DashPaths {
    /// Base directory for all budgetdash state
    base_dir: PathBuf,
}

impl DashPaths {
    /// Resolve the base directory from the environment or platform defaults
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, DashError> {
        let base_dir = if let Ok(custom) = std::env::var(DATA_DIR_ENV) {
            PathBuf::from(custom)
        } else {
            ProjectDirs::from("", "", "budgetdash")
                .map(|dirs| dirs.config_dir().to_path_buf())
                .ok_or_else(|| {
                    DashError::Config("Could not determine a config directory".into())
                })?
        };

        Ok(Self { base_dir })
    }

    /// Create DashPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Directory holding the persisted session (auth, tenant, preferences)
    pub fn session_dir(&self) -> PathBuf {
        self.base_dir.join("session")
    }

    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    pub fn auth_file(&self) -> PathBuf {
        self.session_dir().join("auth.json")
    }

    pub fn tenant_file(&self) -> PathBuf {
        self.session_dir().join("tenant.json")
    }

    pub fn preferences_file(&self) -> PathBuf {
        self.session_dir().join("preferences.json")
    }

    /// Log file used while the TUI owns the terminal
    pub fn log_file(&self) -> PathBuf {
        self.base_dir.join("budgetdash.log")
    }

    /// Ensure the base and session directories exist
    pub fn ensure_directories(&self) -> Result<(), DashError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| DashError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.session_dir())
            .map_err(|e| DashError::Io(format!("Failed to create session directory: {}", e)))?;

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
        let paths = DashPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.session_dir(), temp_dir.path().join("session"));
        assert_eq!(
            paths.auth_file(),
            temp_dir.path().join("session").join("auth.json")
        );
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let paths = DashPaths::with_base_dir(temp_dir.path().join("nested"));

        paths.ensure_directories().unwrap();

        assert!(paths.base_dir().exists());
        assert!(paths.session_dir().exists());
    }

    #[test]
    fn test_file_paths() {
        let temp_dir = TempDir::new().unwrap();
        let paths = DashPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.settings_file(), temp_dir.path().join("config.json"));
        assert_eq!(paths.log_file(), temp_dir.path().join("budgetdash.log"));
        assert_eq!(
            paths.preferences_file(),
            temp_dir.path().join("session").join("preferences.json")
        );
    }
}
