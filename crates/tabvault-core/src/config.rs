//! Vault configuration

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use tabvault_export::ExportFormat;
use tabvault_session::{HISTORY_LIMIT, MAX_SESSIONS};
use tabvault_storage::SYNC_QUOTA_BYTES;

use crate::error::CoreError;
use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Local store holding sessions and export history
    pub database_path: PathBuf,
    /// Quota-limited store mirroring pinned sessions
    pub sync_database_path: PathBuf,
    pub max_sessions: usize,
    pub history_limit: usize,
    pub sync_quota_bytes: usize,
    pub sync_enabled: bool,
    /// Record each tab's pinned state in captures
    pub include_pinned: bool,
    /// Add tabs outside any group as an extra "Ungrouped" group
    pub include_ungrouped: bool,
    /// Format used when an export does not name one
    pub default_format: ExportFormat,
}

impl Config {
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            database_path: data_dir.join("tabvault.db"),
            sync_database_path: data_dir.join("tabvault-sync.db"),
            max_sessions: MAX_SESSIONS,
            history_limit: HISTORY_LIMIT,
            sync_quota_bytes: SYNC_QUOTA_BYTES,
            sync_enabled: true,
            include_pinned: true,
            include_ungrouped: false,
            default_format: ExportFormat::Json,
        }
    }

    pub fn data_dir() -> PathBuf {
        dirs::data_local_dir()
            .map(|d| d.join("TabVault"))
            .unwrap_or_else(|| PathBuf::from(".tabvault"))
    }

    /// Read a JSON config file; missing fields take their defaults
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config: Config = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path.as_ref(), serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_sessions == 0 {
            return Err(CoreError::Config("max_sessions must be at least 1".to_string()));
        }
        if self.sync_quota_bytes == 0 {
            return Err(CoreError::Config("sync_quota_bytes must be positive".to_string()));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(Self::data_dir())
    }
}

// Simple dirs implementation for the data directory
mod dirs {
    use std::path::PathBuf;

    pub fn data_local_dir() -> Option<PathBuf> {
        #[cfg(target_os = "windows")]
        {
            std::env::var("LOCALAPPDATA").ok().map(PathBuf::from)
        }
        #[cfg(target_os = "macos")]
        {
            std::env::var("HOME")
                .ok()
                .map(|h| PathBuf::from(h).join("Library/Application Support"))
        }
        #[cfg(target_os = "linux")]
        {
            std::env::var("XDG_DATA_HOME")
                .ok()
                .map(PathBuf::from)
                .or_else(|| {
                    std::env::var("HOME")
                        .ok()
                        .map(|h| PathBuf::from(h).join(".local/share"))
                })
        }
        #[cfg(not(any(target_os = "windows", target_os = "macos", target_os = "linux")))]
        {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::new(PathBuf::from("/tmp/tv"));
        assert_eq!(config.database_path, PathBuf::from("/tmp/tv/tabvault.db"));
        assert_eq!(config.max_sessions, 50);
        assert_eq!(config.history_limit, 10);
        assert_eq!(config.sync_quota_bytes, 102_400);
        assert!(config.include_pinned);
        assert!(!config.include_ungrouped);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let mut config = Config::new(dir.path().to_path_buf());
        config.max_sessions = 20;
        config.default_format = ExportFormat::Csv;
        config.save(&path).unwrap();

        assert_eq!(Config::load(&path).unwrap(), config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"include_ungrouped": true}"#).unwrap();

        let config = Config::load(&path).unwrap();
        assert!(config.include_ungrouped);
        assert_eq!(config.max_sessions, 50);
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"max_sessions": 0}"#).unwrap();

        assert!(matches!(Config::load(&path), Err(CoreError::Config(_))));
    }
}
