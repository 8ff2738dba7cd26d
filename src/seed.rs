//! Sample Data
//!
//! Cold-start pets and reminders, loaded once when the store is empty.
//! Sample reminders all start on the day they are seeded and cover every
//! time slot.

use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, Utc};

use crate::domain::{Category, Frequency, Pet, Reminder};

struct SampleReminder {
    id: &'static str,
    title: &'static str,
    pet_id: &'static str,
    category: Category,
    time: &'static str,
    frequency: Frequency,
    completed: bool,
    streak: u32,
    /// Completion history as a day range in January 2025
    history: Option<(u32, u32)>,
}

const SAMPLE_REMINDERS: &[SampleReminder] = &[
    SampleReminder { id: "1", title: "Morning Walk", pet_id: "1", category: Category::Lifestyle, time: "07:00", frequency: Frequency::Daily, completed: true, streak: 15, history: Some((9, 14)) },
    SampleReminder { id: "2", title: "Evening Walk", pet_id: "1", category: Category::Lifestyle, time: "18:00", frequency: Frequency::Daily, completed: false, streak: 3, history: None },
    SampleReminder { id: "3", title: "Breakfast", pet_id: "1", category: Category::General, time: "08:00", frequency: Frequency::Daily, completed: true, streak: 10, history: Some((5, 14)) },
    SampleReminder { id: "4", title: "Lunch", pet_id: "1", category: Category::General, time: "13:00", frequency: Frequency::Daily, completed: false, streak: 4, history: None },
    SampleReminder { id: "5", title: "Medication", pet_id: "2", category: Category::Health, time: "22:00", frequency: Frequency::Daily, completed: true, streak: 8, history: Some((7, 14)) },
    SampleReminder { id: "6", title: "Afternoon Playtime", pet_id: "3", category: Category::Lifestyle, time: "15:00", frequency: Frequency::Daily, completed: false, streak: 2, history: None },
    SampleReminder { id: "7", title: "Grooming Session", pet_id: "2", category: Category::General, time: "09:00", frequency: Frequency::Weekly, completed: false, streak: 1, history: None },
    SampleReminder { id: "8", title: "Vitamin Supplements", pet_id: "3", category: Category::Health, time: "10:00", frequency: Frequency::Daily, completed: true, streak: 12, history: Some((3, 14)) },
    SampleReminder { id: "9", title: "Training Session", pet_id: "1", category: Category::Lifestyle, time: "11:00", frequency: Frequency::Daily, completed: false, streak: 5, history: None },
    SampleReminder { id: "10", title: "Snack Time", pet_id: "2", category: Category::General, time: "14:00", frequency: Frequency::Daily, completed: false, streak: 7, history: None },
    SampleReminder { id: "11", title: "Outdoor Exercise", pet_id: "3", category: Category::Lifestyle, time: "16:00", frequency: Frequency::Daily, completed: true, streak: 9, history: Some((6, 14)) },
    SampleReminder { id: "12", title: "Health Check", pet_id: "1", category: Category::Health, time: "16:30", frequency: Frequency::Weekly, completed: false, streak: 3, history: None },
    SampleReminder { id: "13", title: "Dinner Time", pet_id: "2", category: Category::General, time: "19:00", frequency: Frequency::Daily, completed: false, streak: 6, history: None },
    SampleReminder { id: "14", title: "Interactive Play", pet_id: "3", category: Category::Lifestyle, time: "19:30", frequency: Frequency::Daily, completed: true, streak: 11, history: Some((4, 14)) },
    SampleReminder { id: "15", title: "Relaxation Time", pet_id: "1", category: Category::Lifestyle, time: "20:00", frequency: Frequency::Daily, completed: false, streak: 4, history: None },
    SampleReminder { id: "16", title: "Brushing Teeth", pet_id: "2", category: Category::Health, time: "20:30", frequency: Frequency::Daily, completed: false, streak: 8, history: None },
    SampleReminder { id: "17", title: "Bedtime Routine", pet_id: "3", category: Category::General, time: "21:00", frequency: Frequency::Daily, completed: true, streak: 14, history: Some((1, 14)) },
    SampleReminder { id: "18", title: "Night Medication", pet_id: "1", category: Category::Health, time: "23:00", frequency: Frequency::Daily, completed: false, streak: 2, history: None },
    SampleReminder { id: "19", title: "Security Check", pet_id: "3", category: Category::General, time: "23:30", frequency: Frequency::Daily, completed: false, streak: 1, history: None },
    SampleReminder { id: "20", title: "Final Comfort Check", pet_id: "2", category: Category::General, time: "23:45", frequency: Frequency::Daily, completed: true, streak: 6, history: Some((9, 14)) },
];

pub fn sample_pets() -> Vec<Pet> {
    vec![
        Pet::new("1", "Browny").with_avatar("🐕"),
        Pet::new("2", "Whiskers").with_avatar("🐱"),
        Pet::new("3", "Buddy").with_avatar("🐶"),
    ]
}

fn history(range: Option<(u32, u32)>) -> BTreeSet<NaiveDate> {
    match range {
        Some((first, last)) => (first..=last)
            .filter_map(|day| NaiveDate::from_ymd_opt(2025, 1, day))
            .collect(),
        None => BTreeSet::new(),
    }
}

/// The twenty sample reminders, starting on `today`
pub fn sample_reminders(today: NaiveDate, now: DateTime<Utc>) -> Vec<Reminder> {
    let pets = sample_pets();
    let pet_name = |id: &str| {
        pets.iter()
            .find(|p| p.id == id)
            .map(|p| p.name.clone())
            .unwrap_or_default()
    };

    SAMPLE_REMINDERS
        .iter()
        .map(|s| Reminder {
            id: s.id.to_string(),
            title: s.title.to_string(),
            pet_id: s.pet_id.to_string(),
            pet_name: pet_name(s.pet_id),
            category: s.category,
            notes: None,
            start_date: today,
            time: s.time.to_string(),
            frequency: s.frequency,
            is_completed: s.completed,
            completed_at: None,
            completed_dates: history(s.history),
            streak: s.streak,
            created_at: now,
            updated_at: now,
        })
        .collect()
}
