//! Derived Views
//!
//! Read models built from the reminder list: today's agenda grouped by
//! time slot, and the all-reminders overview grouped by frequency.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{
    group_by_time_slot, is_active_today, sort_by_time_of_day, Category, DomainError, Frequency,
    Reminder, SlotGroup, TimeSlot,
};

/// Filter state; every field that is set must match
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pet_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_slot: Option<TimeSlot>,
}

impl FilterOptions {
    /// Pet and category as in the reminder screens; the time-slot filter
    /// is an addition on top of those two.
    pub fn matches(&self, reminder: &Reminder) -> bool {
        self.pet_id.as_ref().map_or(true, |id| reminder.pet_id == *id)
            && self.category.map_or(true, |c| reminder.category == c)
            && self.time_slot.map_or(true, |s| reminder.time_slot() == s)
    }

    pub fn active_count(&self) -> usize {
        [
            self.pet_id.is_some(),
            self.category.is_some(),
            self.time_slot.is_some(),
        ]
        .into_iter()
        .filter(|set| *set)
        .count()
    }

    pub fn has_active_filters(&self) -> bool {
        self.active_count() > 0
    }
}

pub fn apply_filters<'a>(reminders: &'a [Reminder], filters: &FilterOptions) -> Vec<&'a Reminder> {
    reminders.iter().filter(|r| filters.matches(r)).collect()
}

/// What to show for one day
#[derive(Debug, Clone, PartialEq)]
pub struct Agenda<'a> {
    /// Pending reminders sorted by time, grouped by slot
    pub pending: Vec<SlotGroup<&'a Reminder>>,
    /// Completed reminders, in collection order
    pub completed: Vec<&'a Reminder>,
}

impl Agenda<'_> {
    pub fn pending_count(&self) -> usize {
        self.pending.iter().map(|(_, members)| members.len()).sum()
    }

    /// Nothing left to do today
    pub fn all_caught_up(&self) -> bool {
        self.pending.is_empty()
    }
}

/// Active-today reminders matching `filters`
pub fn build_agenda<'a>(reminders: &'a [Reminder], filters: &FilterOptions, today: NaiveDate) -> Agenda<'a> {
    let todays: Vec<&Reminder> = reminders
        .iter()
        .filter(|r| is_active_today(r, today) && filters.matches(r))
        .collect();

    let (mut pending, completed): (Vec<&Reminder>, Vec<&Reminder>) =
        todays.into_iter().partition(|r| !r.is_completed);
    sort_by_time_of_day(&mut pending);

    Agenda {
        pending: group_by_time_slot(pending),
        completed,
    }
}

/// Tab of the all-reminders view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    All,
    Pending,
    Completed,
}

impl ViewMode {
    pub fn includes(&self, reminder: &Reminder) -> bool {
        match self {
            ViewMode::All => true,
            ViewMode::Pending => !reminder.is_completed,
            ViewMode::Completed => reminder.is_completed,
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ViewMode::All => "all",
            ViewMode::Pending => "pending",
            ViewMode::Completed => "completed",
        })
    }
}

impl FromStr for ViewMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(ViewMode::All),
            "pending" => Ok(ViewMode::Pending),
            "completed" => Ok(ViewMode::Completed),
            other => Err(DomainError::InvalidInput(format!("unknown view '{}'", other))),
        }
    }
}

/// Per-tab counts, computed before the view mode is applied
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TabCounts {
    pub all: usize,
    pub pending: usize,
    pub completed: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReminderOverview<'a> {
    pub mode: ViewMode,
    pub counts: TabCounts,
    /// Groups in order of first appearance
    pub by_frequency: Vec<(Frequency, Vec<&'a Reminder>)>,
}

impl ReminderOverview<'_> {
    pub fn is_empty(&self) -> bool {
        self.by_frequency.is_empty()
    }
}

/// Every reminder matching `filters`, regardless of date
pub fn build_overview<'a>(reminders: &'a [Reminder], filters: &FilterOptions, mode: ViewMode) -> ReminderOverview<'a> {
    let filtered = apply_filters(reminders, filters);

    let completed = filtered.iter().filter(|r| r.is_completed).count();
    let counts = TabCounts {
        all: filtered.len(),
        pending: filtered.len() - completed,
        completed,
    };

    let mut by_frequency: Vec<(Frequency, Vec<&Reminder>)> = Vec::new();
    for reminder in filtered.into_iter().filter(|r| mode.includes(r)) {
        match by_frequency.iter_mut().find(|(f, _)| *f == reminder.frequency) {
            Some((_, members)) => members.push(reminder),
            None => by_frequency.push((reminder.frequency, vec![reminder])),
        }
    }

    ReminderOverview {
        mode,
        counts,
        by_frequency,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ReminderFormData;
    use chrono::Utc;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, d).unwrap()
    }

    fn reminder(id: &str, pet: &str, category: Category, time: &str, frequency: Frequency) -> Reminder {
        let form = ReminderFormData {
            title: format!("Reminder {}", id),
            pet_id: pet.to_string(),
            category,
            notes: None,
            start_date: date(1),
            time: time.to_string(),
            frequency,
        };
        Reminder::new(id.to_string(), form, String::new(), Utc::now())
    }

    fn sample() -> Vec<Reminder> {
        let mut done = reminder("done", "1", Category::General, "08:00", Frequency::Daily);
        done.is_completed = true;
        vec![
            reminder("evening", "1", Category::Lifestyle, "18:00", Frequency::Daily),
            reminder("walk", "1", Category::Lifestyle, "07:00", Frequency::Daily),
            reminder("once", "2", Category::Health, "13:00", Frequency::Once),
            reminder("groom", "2", Category::General, "09:00", Frequency::Weekly),
            done,
        ]
    }

    fn ids(list: &[&Reminder]) -> Vec<String> {
        list.iter().map(|r| r.id.clone()).collect()
    }

    #[test]
    fn test_filter_matching() {
        let reminders = sample();
        let filters = FilterOptions {
            pet_id: Some("1".into()),
            category: Some(Category::Lifestyle),
            time_slot: None,
        };
        assert_eq!(ids(&apply_filters(&reminders, &filters)), vec!["evening", "walk"]);
        assert_eq!(filters.active_count(), 2);
        assert!(filters.has_active_filters());
        assert!(!FilterOptions::default().has_active_filters());
    }

    #[test]
    fn test_time_slot_filter() {
        let reminders = sample();
        let filters = FilterOptions {
            time_slot: Some(TimeSlot::Morning),
            ..Default::default()
        };
        assert_eq!(ids(&apply_filters(&reminders, &filters)), vec!["walk", "groom", "done"]);
    }

    #[test]
    fn test_agenda_on_start_date() {
        let reminders = sample();
        let agenda = build_agenda(&reminders, &FilterOptions::default(), date(1));

        let slots: Vec<TimeSlot> = agenda.pending.iter().map(|(s, _)| *s).collect();
        assert_eq!(slots, vec![TimeSlot::Morning, TimeSlot::Afternoon, TimeSlot::Evening]);
        assert_eq!(ids(&agenda.pending[0].1), vec!["walk", "groom"]);
        assert_eq!(ids(&agenda.completed), vec!["done"]);
        assert_eq!(agenda.pending_count(), 4);
        assert!(!agenda.all_caught_up());
    }

    #[test]
    fn test_agenda_drops_once_on_other_days() {
        let reminders = sample();
        let agenda = build_agenda(&reminders, &FilterOptions::default(), date(2));
        let pending: Vec<String> = agenda
            .pending
            .iter()
            .flat_map(|(_, members)| members.iter().map(|r| r.id.clone()))
            .collect();
        assert_eq!(pending, vec!["walk", "groom", "evening"]);
    }

    #[test]
    fn test_agenda_all_caught_up() {
        let mut reminders = sample();
        for r in &mut reminders {
            r.is_completed = true;
        }
        let agenda = build_agenda(&reminders, &FilterOptions::default(), date(1));
        assert!(agenda.all_caught_up());
        assert_eq!(agenda.completed.len(), 5);
    }

    #[test]
    fn test_overview_counts_and_groups() {
        let reminders = sample();
        let overview = build_overview(&reminders, &FilterOptions::default(), ViewMode::Pending);

        assert_eq!(overview.counts, TabCounts { all: 5, pending: 4, completed: 1 });
        let freqs: Vec<Frequency> = overview.by_frequency.iter().map(|(f, _)| *f).collect();
        assert_eq!(freqs, vec![Frequency::Daily, Frequency::Once, Frequency::Weekly]);
        assert_eq!(ids(&overview.by_frequency[0].1), vec!["evening", "walk"]);
    }

    #[test]
    fn test_overview_completed_tab() {
        let reminders = sample();
        let filters = FilterOptions {
            pet_id: Some("2".into()),
            ..Default::default()
        };
        let overview = build_overview(&reminders, &filters, ViewMode::Completed);
        assert_eq!(overview.counts, TabCounts { all: 2, pending: 2, completed: 0 });
        assert!(overview.is_empty());
    }

    #[test]
    fn test_view_mode_parsing() {
        assert_eq!("Pending".parse::<ViewMode>().unwrap(), ViewMode::Pending);
        assert!("archived".parse::<ViewMode>().is_err());
        assert_eq!(ViewMode::Completed.to_string(), "completed");
    }
}
