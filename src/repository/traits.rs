//! Repository Layer - Core Traits
//!
//! Defines the abstract interface the store persists through.
//! Implementations can use a JSON file, SQLite, in-memory, etc.

use serde::{Deserialize, Serialize};
use crate::domain::{DomainResult, Pet, Reminder};

/// The persisted pair. Filters and the selected date are never saved.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub reminders: Vec<Reminder>,
    #[serde(default)]
    pub pets: Vec<Pet>,
}

/// Load/save of the whole snapshot
///
/// Saves replace whatever was stored before.
pub trait SnapshotRepository: Send + Sync {
    /// Previously saved snapshot, or `None` if nothing was ever saved
    fn load(&self) -> DomainResult<Option<Snapshot>>;

    /// Replace the stored snapshot
    fn save(&self, snapshot: &Snapshot) -> DomainResult<()>;

    /// Where the data lives, for log lines
    fn describe(&self) -> String;
}
