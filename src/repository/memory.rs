//! In-Memory Repository
//!
//! Keeps the last saved snapshot in process memory. Used by tests and by
//! sessions that should not touch disk.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::domain::{DomainError, DomainResult};
use super::traits::{Snapshot, SnapshotRepository};

#[derive(Default)]
pub struct MemoryRepository {
    snapshot: Mutex<Option<Snapshot>>,
    saves: AtomicUsize,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an already saved snapshot
    pub fn with_snapshot(snapshot: Snapshot) -> Self {
        Self {
            snapshot: Mutex::new(Some(snapshot)),
            saves: AtomicUsize::new(0),
        }
    }

    /// Number of successful saves so far
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

impl SnapshotRepository for MemoryRepository {
    fn load(&self) -> DomainResult<Option<Snapshot>> {
        let guard = self
            .snapshot
            .lock()
            .map_err(|_| DomainError::Internal("memory repository poisoned".into()))?;
        Ok(guard.clone())
    }

    fn save(&self, snapshot: &Snapshot) -> DomainResult<()> {
        let mut guard = self
            .snapshot
            .lock()
            .map_err(|_| DomainError::Internal("memory repository poisoned".into()))?;
        *guard = Some(snapshot.clone());
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}
