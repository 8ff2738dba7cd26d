//! Repository Layer
//!
//! Persistence collaborator abstractions and implementations.

mod traits;
mod json_file;
mod memory;
mod sqlite;

#[cfg(test)]
mod tests;

pub use traits::{Snapshot, SnapshotRepository};
pub use json_file::{JsonFileRepository, SNAPSHOT_VERSION};
pub use memory::MemoryRepository;
pub use sqlite::SqliteRepository;
