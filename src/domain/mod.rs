//! Domain Layer
//!
//! Contains all domain entities and the pure scheduling functions.
//! This layer has no I/O; it depends only on serde and chrono.

mod entity;
mod pet;
mod reminder;
mod time_slot;
mod schedule;
mod calendar;

pub use entity::{position_of, DomainError, DomainResult, Entity};
pub use pet::Pet;
pub use reminder::{Category, Frequency, Reminder, ReminderFormData, ReminderPatch, MAX_TITLE_LEN};
pub use time_slot::{classify_time_slot, format_time_12h, hour_of, minutes_since_midnight, TimeSlot};
pub use schedule::{group_by_time_slot, is_active_today, sort_by_time_of_day, SlotGroup};
pub use calendar::{has_completions_on, streak_connections, week_dates, CalendarDate};
