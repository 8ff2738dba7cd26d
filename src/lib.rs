//! Pet Reminders Library
//!
//! Architecture:
//! - domain: Core business entities (Reminder, Pet, TimeSlot) and the
//!   scheduling rules over them
//! - repository: Snapshot persistence (JSON file, SQLite, memory)
//! - store: The single owner of reminder state and its mutations
//! - views: Agenda / overview read models
//! - commands: Input-validating handlers used by the CLI

pub mod commands;
pub mod config;
pub mod domain;
pub mod repository;
pub mod seed;
pub mod store;
pub mod views;

pub use config::{Config, StorageKind};
pub use store::ReminderStore;
