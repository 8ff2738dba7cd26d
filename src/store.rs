//! Reminder Store
//!
//! Sole owner of the reminder and pet collections. Every mutation goes
//! through a method here so `updatedAt` refresh and streak bookkeeping
//! are applied the same way everywhere, and every mutation that changed
//! the collections is written through to the repository.
//!
//! Unknown ids are silent no-ops. The only error source is the
//! repository failing to save; the in-memory change is kept in that case.

use chrono::{NaiveDate, Utc};
use log::{debug, info};
use uuid::Uuid;

use crate::domain::{
    position_of, DomainResult, Frequency, Pet, Reminder, ReminderFormData, ReminderPatch,
};
use crate::repository::{Snapshot, SnapshotRepository};
use crate::seed;
use crate::views::{build_agenda, build_overview, Agenda, FilterOptions, ReminderOverview, ViewMode};

pub struct ReminderStore {
    reminders: Vec<Reminder>,
    pets: Vec<Pet>,
    filters: FilterOptions,
    selected_date: NaiveDate,
    repo: Box<dyn SnapshotRepository>,
}

impl ReminderStore {
    /// Empty store; nothing is loaded from `repo`
    pub fn new(repo: Box<dyn SnapshotRepository>, today: NaiveDate) -> Self {
        Self {
            reminders: Vec::new(),
            pets: Vec::new(),
            filters: FilterOptions::default(),
            selected_date: today,
            repo,
        }
    }

    /// Store holding whatever `repo` last saved
    pub fn load(repo: Box<dyn SnapshotRepository>, today: NaiveDate) -> DomainResult<Self> {
        let mut store = Self::new(repo, today);
        match store.repo.load()? {
            Some(snapshot) => {
                info!(
                    "Loaded {} reminders and {} pets from {}",
                    snapshot.reminders.len(),
                    snapshot.pets.len(),
                    store.repo.describe()
                );
                store.reminders = snapshot.reminders;
                store.pets = snapshot.pets;
            }
            None => info!("No saved data in {}", store.repo.describe()),
        }
        Ok(store)
    }

    /// Seed sample pets and reminders into whichever collection is empty.
    ///
    /// Returns whether anything was seeded.
    pub fn initialize_data(&mut self, today: NaiveDate) -> DomainResult<bool> {
        let mut seeded = false;

        if self.pets.is_empty() {
            self.pets = seed::sample_pets();
            info!("Seeded {} sample pets", self.pets.len());
            seeded = true;
        }

        if self.reminders.is_empty() {
            self.reminders = seed::sample_reminders(today, Utc::now());
            info!("Seeded {} sample reminders", self.reminders.len());
            seeded = true;
        }

        if seeded {
            self.persist()?;
        }
        Ok(seeded)
    }

    // ========================
    // Read access
    // ========================

    pub fn reminders(&self) -> &[Reminder] {
        &self.reminders
    }

    pub fn pets(&self) -> &[Pet] {
        &self.pets
    }

    pub fn filters(&self) -> &FilterOptions {
        &self.filters
    }

    pub fn selected_date(&self) -> NaiveDate {
        self.selected_date
    }

    pub fn find_reminder(&self, id: &str) -> Option<&Reminder> {
        position_of(&self.reminders, id).map(|i| &self.reminders[i])
    }

    pub fn find_pet(&self, id: &str) -> Option<&Pet> {
        position_of(&self.pets, id).map(|i| &self.pets[i])
    }

    /// Today's agenda under the current filters
    pub fn agenda(&self, today: NaiveDate) -> Agenda<'_> {
        build_agenda(&self.reminders, &self.filters, today)
    }

    /// All reminders under the current filters
    pub fn overview(&self, mode: ViewMode) -> ReminderOverview<'_> {
        build_overview(&self.reminders, &self.filters, mode)
    }

    // ========================
    // Mutations
    // ========================

    /// Create a reminder from validated form input.
    ///
    /// `petName` is copied from the current pet list (empty if the pet is
    /// unknown). Identical reminders are allowed.
    pub fn add_reminder(&mut self, form: ReminderFormData) -> DomainResult<Reminder> {
        let pet_name = self
            .find_pet(&form.pet_id)
            .map(|pet| pet.name.clone())
            .unwrap_or_default();

        let reminder = Reminder::new(Uuid::new_v4().to_string(), form, pet_name, Utc::now());
        debug!("Adding reminder {} ({})", reminder.id, reminder.title);
        self.reminders.push(reminder.clone());
        self.persist()?;
        Ok(reminder)
    }

    /// Merge `patch` over the reminder and refresh `updatedAt`.
    ///
    /// `petName` is not re-resolved when `petId` changes.
    pub fn update_reminder(&mut self, id: &str, patch: ReminderPatch) -> DomainResult<()> {
        let Some(index) = position_of(&self.reminders, id) else {
            debug!("update_reminder: no reminder {}", id);
            return Ok(());
        };

        let reminder = &mut self.reminders[index];
        reminder.apply(patch);
        reminder.updated_at = Utc::now();
        self.persist()
    }

    pub fn delete_reminder(&mut self, id: &str) -> DomainResult<()> {
        let Some(index) = position_of(&self.reminders, id) else {
            debug!("delete_reminder: no reminder {}", id);
            return Ok(());
        };

        self.reminders.remove(index);
        self.persist()
    }

    /// Flip completion. Completing bumps the streak and stamps
    /// `completedAt`; un-completing decrements the streak (floored at 0)
    /// and clears `completedAt`. `completedDates` is left alone.
    pub fn toggle_reminder_complete(&mut self, id: &str) -> DomainResult<()> {
        let Some(index) = position_of(&self.reminders, id) else {
            debug!("toggle_reminder_complete: no reminder {}", id);
            return Ok(());
        };

        let now = Utc::now();
        let reminder = &mut self.reminders[index];
        reminder.is_completed = !reminder.is_completed;
        if reminder.is_completed {
            reminder.streak = reminder.streak.saturating_add(1);
            reminder.completed_at = Some(now);
        } else {
            reminder.streak = reminder.streak.saturating_sub(1);
            reminder.completed_at = None;
        }
        reminder.updated_at = now;
        self.persist()
    }

    /// Replace the filter state wholesale. Not persisted.
    pub fn set_filters(&mut self, filters: FilterOptions) {
        self.filters = filters;
    }

    /// Not persisted.
    pub fn set_selected_date(&mut self, date: NaiveDate) {
        self.selected_date = date;
    }

    /// Stored streak counter; 0 for unknown ids and `Once` reminders
    pub fn calculate_streak(&self, id: &str) -> u32 {
        match self.find_reminder(id) {
            Some(reminder) if reminder.frequency != Frequency::Once => reminder.streak,
            _ => 0,
        }
    }

    fn persist(&self) -> DomainResult<()> {
        let snapshot = Snapshot {
            reminders: self.reminders.clone(),
            pets: self.pets.clone(),
        };
        self.repo.save(&snapshot).map_err(|e| {
            log::error!("Failed to save to {}: {}", self.repo.describe(), e);
            e
        })
    }
}
