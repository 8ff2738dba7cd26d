//! Commands for Agenda, Overview, Calendar and Pets

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::{
    has_completions_on, streak_connections, week_dates, CalendarDate, Category, DomainError, Pet, TimeSlot,
};
use crate::store::ReminderStore;
use crate::views::{Agenda, FilterOptions, ReminderOverview, ViewMode};

/// Replace the active filters. An unknown pet id is rejected.
pub fn set_filters(
    store: &mut ReminderStore,
    pet_id: Option<String>,
    category: Option<Category>,
    time_slot: Option<TimeSlot>,
) -> Result<FilterOptions, String> {
    if let Some(id) = &pet_id {
        if store.find_pet(id).is_none() {
            return Err(DomainError::InvalidInput(format!("unknown pet '{}'", id)).to_string());
        }
    }
    let filters = FilterOptions {
        pet_id,
        category,
        time_slot,
    };
    store.set_filters(filters.clone());
    Ok(filters)
}

/// Agenda for `date` (defaults to the store's selected date)
pub fn get_agenda(store: &mut ReminderStore, date: Option<NaiveDate>) -> Agenda<'_> {
    if let Some(date) = date {
        store.set_selected_date(date);
    }
    let day = store.selected_date();
    store.agenda(day)
}

pub fn list_reminders(store: &ReminderStore, mode: ViewMode) -> ReminderOverview<'_> {
    store.overview(mode)
}

pub fn list_pets(store: &ReminderStore) -> Vec<Pet> {
    store.pets().to_vec()
}

/// One cell of the calendar strip
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekDay {
    #[serde(flatten)]
    pub date: CalendarDate,
    pub has_completions: bool,
    /// Completions today and tomorrow
    pub connects_next: bool,
}

/// The week containing `date`, with completion markers
pub fn get_week(store: &ReminderStore, date: NaiveDate, today: NaiveDate) -> Vec<WeekDay> {
    let week = week_dates(date, today);
    let connections = streak_connections(store.reminders(), &week);

    week.into_iter()
        .zip(connections)
        .map(|(day, connects_next)| WeekDay {
            has_completions: has_completions_on(store.reminders(), day.date),
            date: day,
            connects_next,
        })
        .collect()
}
