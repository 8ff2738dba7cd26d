//! Calendar Strip
//!
//! Monday-first week view with per-day completion markers.

use chrono::{DateTime, Datelike, Days, NaiveDate, Utc};
use serde::Serialize;

use super::reminder::Reminder;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarDate {
    pub date: NaiveDate,
    /// Day of month
    pub day: u32,
    pub is_today: bool,
    /// Three-letter weekday, e.g. `Mon`
    pub day_name: String,
}

/// The seven days (Monday to Sunday) of the week containing `date`
pub fn week_dates(date: NaiveDate, today: NaiveDate) -> Vec<CalendarDate> {
    let offset = u64::from(date.weekday().num_days_from_monday());
    let start = date.checked_sub_days(Days::new(offset)).unwrap_or(date);

    start
        .iter_days()
        .take(7)
        .map(|day| CalendarDate {
            date: day,
            day: day.day(),
            is_today: day == today,
            day_name: day.format("%a").to_string(),
        })
        .collect()
}

fn completed_at_on(completed_at: Option<DateTime<Utc>>, date: NaiveDate) -> bool {
    completed_at.is_some_and(|at| at.date_naive() == date)
}

/// Whether any completed reminder was completed on `date`, either per its
/// `completedAt` timestamp (UTC day) or its recorded completion days
pub fn has_completions_on(reminders: &[Reminder], date: NaiveDate) -> bool {
    reminders.iter().any(|r| {
        r.is_completed && (completed_at_on(r.completed_at, date) || r.completed_dates.contains(&date))
    })
}

/// For each day of `week`: it has completions and so does the next day.
/// The last day never connects.
pub fn streak_connections(reminders: &[Reminder], week: &[CalendarDate]) -> Vec<bool> {
    let marks: Vec<bool> = week
        .iter()
        .map(|day| has_completions_on(reminders, day.date))
        .collect();

    (0..marks.len())
        .map(|i| marks[i] && marks.get(i + 1).copied().unwrap_or(false))
        .collect()
}
