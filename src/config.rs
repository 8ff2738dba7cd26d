//! Runtime Configuration
//!
//! Resolves the data directory, log directory and storage backend from
//! CLI flags / environment, falling back to the platform data dir.

use std::path::PathBuf;

use clap::ValueEnum;
use log::info;

use crate::domain::DomainResult;
use crate::repository::{JsonFileRepository, MemoryRepository, SnapshotRepository, SqliteRepository};

pub const APP_NAME: &str = "pet-reminders";
pub const JSON_FILE_NAME: &str = "reminder-store.json";
pub const SQLITE_FILE_NAME: &str = "reminder-store.db";

/// Which persistence backend to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum StorageKind {
    /// Pretty JSON snapshot file
    #[default]
    Json,
    /// SQLite database file
    Sqlite,
    /// Nothing written to disk
    Memory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub log_dir: PathBuf,
    pub storage: StorageKind,
    /// Seed sample data into an empty store on startup
    pub seed: bool,
}

impl Config {
    pub fn new(data_dir: Option<PathBuf>, log_dir: Option<PathBuf>, storage: StorageKind, seed: bool) -> Self {
        let data_dir = data_dir.unwrap_or_else(Self::default_data_dir);
        let log_dir = log_dir.unwrap_or_else(|| data_dir.join("logs"));
        Self {
            data_dir,
            log_dir,
            storage,
            seed,
        }
    }

    /// `<platform data dir>/pet-reminders`, or the working directory
    pub fn default_data_dir() -> PathBuf {
        dirs::data_local_dir()
            .map(|dir| dir.join(APP_NAME))
            .unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn json_path(&self) -> PathBuf {
        self.data_dir.join(JSON_FILE_NAME)
    }

    pub fn sqlite_path(&self) -> PathBuf {
        self.data_dir.join(SQLITE_FILE_NAME)
    }

    pub fn open_repository(&self) -> DomainResult<Box<dyn SnapshotRepository>> {
        let repo: Box<dyn SnapshotRepository> = match self.storage {
            StorageKind::Json => Box::new(JsonFileRepository::new(self.json_path())),
            StorageKind::Sqlite => Box::new(SqliteRepository::open(self.sqlite_path())?),
            StorageKind::Memory => Box::new(MemoryRepository::new()),
        };
        info!("Using storage {}", repo.describe());
        Ok(repo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_paths_derive_from_data_dir() {
        let config = Config::new(Some(PathBuf::from("/tmp/pets")), None, StorageKind::Json, true);
        assert_eq!(config.log_dir, PathBuf::from("/tmp/pets/logs"));
        assert_eq!(config.json_path(), PathBuf::from("/tmp/pets/reminder-store.json"));
        assert_eq!(config.sqlite_path(), PathBuf::from("/tmp/pets/reminder-store.db"));
    }

    #[test]
    fn test_explicit_log_dir_wins() {
        let config = Config::new(
            Some(PathBuf::from("/data")),
            Some(PathBuf::from("/logs")),
            StorageKind::Sqlite,
            false,
        );
        assert_eq!(config.log_dir, PathBuf::from("/logs"));
    }

    #[test]
    fn test_open_each_backend() {
        let dir = tempdir().unwrap();
        for storage in [StorageKind::Json, StorageKind::Sqlite, StorageKind::Memory] {
            let config = Config::new(Some(dir.path().to_path_buf()), None, storage, true);
            let repo = config.open_repository().expect("backend should open");
            assert_eq!(repo.load().unwrap(), None);
        }
        assert!(dir.path().join(SQLITE_FILE_NAME).exists());
    }
}
