//! Reminder Entity
//!
//! A recurring or one-off pet-care task scheduled at a wall-clock time.
//! Field names serialize in camelCase so snapshots written by the
//! browser build load unchanged.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use super::entity::{DomainError, DomainResult, Entity};
use super::time_slot::{classify_time_slot, minutes_since_midnight, TimeSlot};

/// Longest title the form accepts
pub const MAX_TITLE_LEN: usize = 100;

/// Reminder category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Category {
    #[default]
    General,
    Lifestyle,
    Health,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::General, Category::Lifestyle, Category::Health];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::General => "General",
            Category::Lifestyle => "Lifestyle",
            Category::Health => "Health",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DomainError::InvalidInput(format!("unknown category '{}'", s)))
    }
}

/// Recurrence class. Only `Once` is gated by date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Frequency {
    Once,
    #[default]
    Daily,
    Weekly,
    Monthly,
}

impl Frequency {
    pub const ALL: [Frequency; 4] = [
        Frequency::Once,
        Frequency::Daily,
        Frequency::Weekly,
        Frequency::Monthly,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::Once => "Once",
            Frequency::Daily => "Daily",
            Frequency::Weekly => "Weekly",
            Frequency::Monthly => "Monthly",
        }
    }

    pub fn is_recurring(&self) -> bool {
        !matches!(self, Frequency::Once)
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Frequency {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Frequency::ALL
            .into_iter()
            .find(|f| f.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DomainError::InvalidInput(format!("unknown frequency '{}'", s)))
    }
}

/// A pet-care reminder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reminder {
    /// Unique identifier
    pub id: String,
    pub title: String,
    pub pet_id: String,
    /// Pet name captured at creation time; never re-synced on rename
    pub pet_name: String,
    pub category: Category,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// First scheduled day (only scheduled day for `Once`)
    pub start_date: NaiveDate,
    /// Wall-clock time, `HH:MM` 24-hour
    pub time: String,
    pub frequency: Frequency,
    #[serde(default)]
    pub is_completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    /// Historical completion days, used by the calendar strip
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub completed_dates: BTreeSet<NaiveDate>,
    #[serde(default)]
    pub streak: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Reminder {
    /// Build a fresh, incomplete reminder from validated form input
    pub fn new(id: String, form: ReminderFormData, pet_name: String, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: form.title,
            pet_id: form.pet_id,
            pet_name,
            category: form.category,
            notes: form.notes,
            start_date: form.start_date,
            time: form.time,
            frequency: form.frequency,
            is_completed: false,
            completed_at: None,
            completed_dates: BTreeSet::new(),
            streak: 0,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn time_slot(&self) -> TimeSlot {
        classify_time_slot(&self.time)
    }

    pub fn minutes_since_midnight(&self) -> Option<u32> {
        minutes_since_midnight(&self.time)
    }

    /// Merge `patch` over this record. Does not touch `updated_at`.
    pub fn apply(&mut self, patch: ReminderPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(pet_id) = patch.pet_id {
            self.pet_id = pet_id;
        }
        if let Some(pet_name) = patch.pet_name {
            self.pet_name = pet_name;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(notes) = patch.notes {
            self.notes = notes;
        }
        if let Some(start_date) = patch.start_date {
            self.start_date = start_date;
        }
        if let Some(time) = patch.time {
            self.time = time;
        }
        if let Some(frequency) = patch.frequency {
            self.frequency = frequency;
        }
        if let Some(is_completed) = patch.is_completed {
            self.is_completed = is_completed;
        }
        if let Some(completed_at) = patch.completed_at {
            self.completed_at = completed_at;
        }
        if let Some(completed_dates) = patch.completed_dates {
            self.completed_dates = completed_dates;
        }
        if let Some(streak) = patch.streak {
            self.streak = streak;
        }
    }
}

impl Entity for Reminder {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Input collected by the add/edit form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderFormData {
    pub title: String,
    pub pet_id: String,
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub notes: Option<String>,
    pub start_date: NaiveDate,
    pub time: String,
    #[serde(default)]
    pub frequency: Frequency,
}

impl ReminderFormData {
    /// Check the same rules the form enforces before submitting
    pub fn validate(&self) -> DomainResult<()> {
        let title_len = self.title.chars().count();
        if title_len == 0 {
            return Err(DomainError::InvalidInput("Reminder title is required".into()));
        }
        if title_len > MAX_TITLE_LEN {
            return Err(DomainError::InvalidInput("Title too long".into()));
        }
        if self.pet_id.trim().is_empty() {
            return Err(DomainError::InvalidInput("Please select a pet".into()));
        }
        if self.time.trim().is_empty() {
            return Err(DomainError::InvalidInput("Time is required".into()));
        }
        NaiveTime::parse_from_str(&self.time, "%H:%M")
            .map_err(|_| DomainError::InvalidInput(format!("Time must be HH:MM, got '{}'", self.time)))?;
        Ok(())
    }
}

/// Partial update; `None` leaves the field untouched.
///
/// `notes` and `completed_at` are doubly optional so an update can clear them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReminderPatch {
    pub title: Option<String>,
    pub pet_id: Option<String>,
    pub pet_name: Option<String>,
    pub category: Option<Category>,
    pub notes: Option<Option<String>>,
    pub start_date: Option<NaiveDate>,
    pub time: Option<String>,
    pub frequency: Option<Frequency>,
    pub is_completed: Option<bool>,
    pub completed_at: Option<Option<DateTime<Utc>>>,
    pub completed_dates: Option<BTreeSet<NaiveDate>>,
    pub streak: Option<u32>,
}

impl ReminderPatch {
    pub fn is_empty(&self) -> bool {
        *self == ReminderPatch::default()
    }
}

/// Submitting the edit form overwrites every form field, petName excluded
impl From<ReminderFormData> for ReminderPatch {
    fn from(form: ReminderFormData) -> Self {
        Self {
            title: Some(form.title),
            pet_id: Some(form.pet_id),
            category: Some(form.category),
            notes: Some(form.notes),
            start_date: Some(form.start_date),
            time: Some(form.time),
            frequency: Some(form.frequency),
            ..Default::default()
        }
    }
}
