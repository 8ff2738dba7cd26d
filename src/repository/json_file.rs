//! JSON File Repository
//!
//! Stores the snapshot the way the browser build kept it in local storage:
//! `{"state": {"reminders": [...], "pets": [...]}, "version": 0}`.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, DomainResult};
use super::traits::{Snapshot, SnapshotRepository};

/// Envelope version written by this build
pub const SNAPSHOT_VERSION: u32 = 0;

#[derive(Debug, Serialize, Deserialize)]
struct PersistedEnvelope {
    state: Snapshot,
    #[serde(default)]
    version: u32,
}

pub struct JsonFileRepository {
    path: PathBuf,
}

impl JsonFileRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SnapshotRepository for JsonFileRepository {
    fn load(&self) -> DomainResult<Option<Snapshot>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let json = fs::read_to_string(&self.path)
            .map_err(|e| DomainError::Internal(format!("Failed to read {}: {}", self.path.display(), e)))?;
        let envelope: PersistedEnvelope = serde_json::from_str(&json)
            .map_err(|e| DomainError::Internal(format!("Failed to parse {}: {}", self.path.display(), e)))?;

        if envelope.version > SNAPSHOT_VERSION {
            log::warn!(
                "{} was written by a newer version ({}), loading anyway",
                self.path.display(),
                envelope.version
            );
        }

        Ok(Some(envelope.state))
    }

    fn save(&self, snapshot: &Snapshot) -> DomainResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .map_err(|e| DomainError::Internal(format!("Failed to create data directory: {}", e)))?;
            }
        }

        let envelope = PersistedEnvelope {
            state: snapshot.clone(),
            version: SNAPSHOT_VERSION,
        };
        let json = serde_json::to_string_pretty(&envelope)
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        // Write next to the target, then swap it in
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)
            .map_err(|e| DomainError::Internal(format!("Failed to write {}: {}", tmp.display(), e)))?;
        fs::rename(&tmp, &self.path)
            .map_err(|e| DomainError::Internal(format!("Failed to replace {}: {}", self.path.display(), e)))?;

        log::debug!("Snapshot saved to {}", self.path.display());
        Ok(())
    }

    fn describe(&self) -> String {
        format!("json:{}", self.path.display())
    }
}
