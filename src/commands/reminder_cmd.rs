//! Commands for Reminder CRUD + Completion

use chrono::NaiveDate;
use log::info;

use crate::domain::{Category, DomainError, Frequency, Reminder, ReminderFormData, ReminderPatch};
use crate::store::ReminderStore;

/// Fields for a new reminder; omitted ones take the form defaults
#[derive(Debug, Clone, Default)]
pub struct NewReminder {
    pub title: String,
    pub pet_id: String,
    pub category: Option<Category>,
    pub notes: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub time: String,
    pub frequency: Option<Frequency>,
}

/// Fields to change on an existing reminder
#[derive(Debug, Clone, Default)]
pub struct ReminderEdit {
    pub title: Option<String>,
    pub pet_id: Option<String>,
    pub category: Option<Category>,
    pub notes: Option<String>,
    pub clear_notes: bool,
    pub start_date: Option<NaiveDate>,
    pub time: Option<String>,
    pub frequency: Option<Frequency>,
}

fn not_found(id: &str) -> String {
    DomainError::NotFound(format!("reminder {}", id)).to_string()
}

fn ensure_pet(store: &ReminderStore, pet_id: &str) -> Result<(), String> {
    match store.find_pet(pet_id) {
        Some(_) => Ok(()),
        None => Err(DomainError::InvalidInput(format!("unknown pet '{}'", pet_id)).to_string()),
    }
}

/// Blank notes count as no notes
fn non_blank(notes: Option<String>) -> Option<String> {
    notes.filter(|n| !n.trim().is_empty())
}

/// Create a reminder
pub fn create_reminder(store: &mut ReminderStore, input: NewReminder, today: NaiveDate) -> Result<Reminder, String> {
    let form = ReminderFormData {
        title: input.title.trim().to_string(),
        pet_id: input.pet_id,
        category: input.category.unwrap_or_default(),
        notes: non_blank(input.notes),
        start_date: input.start_date.unwrap_or(today),
        time: input.time,
        frequency: input.frequency.unwrap_or_default(),
    };
    form.validate().map_err(|e| e.to_string())?;
    ensure_pet(store, &form.pet_id)?;

    let reminder = store.add_reminder(form).map_err(|e| e.to_string())?;
    info!("Created reminder {} for {}", reminder.id, reminder.pet_name);
    Ok(reminder)
}

/// Update reminder; the merged form must still be valid
pub fn update_reminder(store: &mut ReminderStore, id: &str, edit: ReminderEdit) -> Result<Reminder, String> {
    let existing = store.find_reminder(id).ok_or_else(|| not_found(id))?;

    let notes = if edit.clear_notes {
        None
    } else {
        match edit.notes {
            Some(notes) => non_blank(Some(notes)),
            None => existing.notes.clone(),
        }
    };
    let form = ReminderFormData {
        title: edit
            .title
            .map(|t| t.trim().to_string())
            .unwrap_or_else(|| existing.title.clone()),
        pet_id: edit.pet_id.unwrap_or_else(|| existing.pet_id.clone()),
        category: edit.category.unwrap_or(existing.category),
        notes,
        start_date: edit.start_date.unwrap_or(existing.start_date),
        time: edit.time.unwrap_or_else(|| existing.time.clone()),
        frequency: edit.frequency.unwrap_or(existing.frequency),
    };
    form.validate().map_err(|e| e.to_string())?;
    if form.pet_id != existing.pet_id {
        ensure_pet(store, &form.pet_id)?;
    }

    store
        .update_reminder(id, ReminderPatch::from(form))
        .map_err(|e| e.to_string())?;
    store.find_reminder(id).cloned().ok_or_else(|| not_found(id))
}

/// Toggle completion, returning the updated reminder
pub fn toggle_reminder(store: &mut ReminderStore, id: &str) -> Result<Reminder, String> {
    if store.find_reminder(id).is_none() {
        return Err(not_found(id));
    }
    store.toggle_reminder_complete(id).map_err(|e| e.to_string())?;
    store.find_reminder(id).cloned().ok_or_else(|| not_found(id))
}

/// Delete reminder, returning what was removed
pub fn delete_reminder(store: &mut ReminderStore, id: &str) -> Result<Reminder, String> {
    let removed = store.find_reminder(id).cloned().ok_or_else(|| not_found(id))?;
    store.delete_reminder(id).map_err(|e| e.to_string())?;
    info!("Deleted reminder {}", id);
    Ok(removed)
}

pub fn get_streak(store: &ReminderStore, id: &str) -> Result<u32, String> {
    if store.find_reminder(id).is_none() {
        return Err(not_found(id));
    }
    Ok(store.calculate_streak(id))
}
