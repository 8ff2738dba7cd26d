//! Scheduling
//!
//! Pure functions deriving the day's active set and its time-of-day order.
//! Nothing here touches the store; callers pass plain reminders.

use std::borrow::Borrow;

use chrono::NaiveDate;

use super::reminder::{Frequency, Reminder};
use super::time_slot::TimeSlot;

/// Reminders of one time slot, in input order
pub type SlotGroup<R> = (TimeSlot, Vec<R>);

/// Whether `reminder` shows up on `today`.
///
/// `Once` reminders are active only on their start date. Recurring
/// reminders are active every day; start date, weekday and day-of-month
/// are deliberately not consulted.
pub fn is_active_today(reminder: &Reminder, today: NaiveDate) -> bool {
    match reminder.frequency {
        Frequency::Once => reminder.start_date == today,
        Frequency::Daily | Frequency::Weekly | Frequency::Monthly => true,
    }
}

/// Stable sort by minutes since midnight. Malformed times sort last.
pub fn sort_by_time_of_day<R: Borrow<Reminder>>(reminders: &mut [R]) {
    reminders.sort_by_key(|r| r.borrow().minutes_since_midnight().unwrap_or(u32::MAX));
}

/// Partition reminders into time slots, keeping their relative order.
///
/// Slots appear in the order their first member does; empty slots are
/// omitted.
pub fn group_by_time_slot<R, I>(reminders: I) -> Vec<SlotGroup<R>>
where
    R: Borrow<Reminder>,
    I: IntoIterator<Item = R>,
{
    let mut groups: Vec<SlotGroup<R>> = Vec::new();
    for reminder in reminders {
        let slot = reminder.borrow().time_slot();
        match groups.iter_mut().find(|(s, _)| *s == slot) {
            Some((_, members)) => members.push(reminder),
            None => groups.push((slot, vec![reminder])),
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Category, ReminderFormData};
    use chrono::Utc;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn reminder(id: &str, time: &str, frequency: Frequency) -> Reminder {
        let form = ReminderFormData {
            title: format!("Reminder {}", id),
            pet_id: "1".to_string(),
            category: Category::General,
            notes: None,
            start_date: date(2025, 1, 1),
            time: time.to_string(),
            frequency,
        };
        Reminder::new(id.to_string(), form, "Browny".to_string(), Utc::now())
    }

    fn ids(reminders: &[Reminder]) -> Vec<&str> {
        reminders.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn test_once_is_date_gated() {
        let once = reminder("1", "13:00", Frequency::Once);
        assert!(is_active_today(&once, date(2025, 1, 1)));
        assert!(!is_active_today(&once, date(2025, 1, 2)));
        assert!(!is_active_today(&once, date(2024, 12, 31)));
    }

    #[test]
    fn test_recurring_always_active() {
        for frequency in [Frequency::Daily, Frequency::Weekly, Frequency::Monthly] {
            let r = reminder("1", "13:00", frequency);
            assert!(is_active_today(&r, date(2025, 1, 1)));
            assert!(is_active_today(&r, date(2025, 1, 2)));
            // Before the start date too
            assert!(is_active_today(&r, date(2024, 6, 1)));
        }
    }

    #[test]
    fn test_sort_by_time_of_day() {
        let mut list = vec![
            reminder("a", "18:00", Frequency::Daily),
            reminder("b", "07:00", Frequency::Daily),
            reminder("c", "23:45", Frequency::Daily),
            reminder("d", "00:30", Frequency::Daily),
            reminder("e", "07:00", Frequency::Daily),
        ];
        sort_by_time_of_day(&mut list);
        assert_eq!(ids(&list), vec!["d", "b", "e", "a", "c"]);
    }

    #[test]
    fn test_sort_is_idempotent() {
        let mut list = vec![
            reminder("a", "16:30", Frequency::Daily),
            reminder("b", "09:00", Frequency::Weekly),
            reminder("c", "09:00", Frequency::Daily),
        ];
        sort_by_time_of_day(&mut list);
        let once = list.clone();
        sort_by_time_of_day(&mut list);
        assert_eq!(list, once);
    }

    #[test]
    fn test_sort_malformed_last() {
        let mut list = vec![
            reminder("bad", "soon", Frequency::Daily),
            reminder("ok", "22:00", Frequency::Daily),
        ];
        sort_by_time_of_day(&mut list);
        assert_eq!(ids(&list), vec!["ok", "bad"]);
    }

    #[test]
    fn test_sort_huge_hour_last() {
        let mut list = vec![
            reminder("bad", "99999999:00", Frequency::Daily),
            reminder("ok", "07:00", Frequency::Daily),
        ];
        sort_by_time_of_day(&mut list);
        assert_eq!(ids(&list), vec!["ok", "bad"]);
    }

    #[test]
    fn test_sort_borrowed() {
        let a = reminder("a", "12:00", Frequency::Daily);
        let b = reminder("b", "06:00", Frequency::Daily);
        let mut refs = vec![&a, &b];
        sort_by_time_of_day(&mut refs);
        assert_eq!(refs[0].id, "b");
    }

    #[test]
    fn test_group_by_time_slot() {
        let mut list = vec![
            reminder("1", "07:00", Frequency::Daily),
            reminder("2", "08:00", Frequency::Daily),
            reminder("3", "13:00", Frequency::Daily),
            reminder("4", "22:00", Frequency::Daily),
        ];
        sort_by_time_of_day(&mut list);

        let groups = group_by_time_slot(&list);
        let slots: Vec<TimeSlot> = groups.iter().map(|(s, _)| *s).collect();
        assert_eq!(slots, vec![TimeSlot::Morning, TimeSlot::Afternoon, TimeSlot::Night]);

        let morning: Vec<&str> = groups[0].1.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(morning, vec!["1", "2"]);
        assert!(groups.iter().all(|(_, members)| !members.is_empty()));
    }

    #[test]
    fn test_group_empty_input() {
        let groups = group_by_time_slot(Vec::<Reminder>::new());
        assert!(groups.is_empty());
    }
}
