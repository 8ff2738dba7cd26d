//! Repository Integration Tests
//!
//! Exercises every backend against the same snapshot.

#[cfg(test)]
mod tests {
    use crate::domain::{Category, Frequency, Pet, Reminder, ReminderFormData};
    use crate::repository::{
        JsonFileRepository, MemoryRepository, Snapshot, SnapshotRepository, SqliteRepository,
    };
    use chrono::{NaiveDate, TimeZone, Utc};
    use tempfile::tempdir;

    fn sample_snapshot() -> Snapshot {
        let now = Utc.with_ymd_and_hms(2025, 1, 14, 8, 30, 0).unwrap();
        let form = ReminderFormData {
            title: "Morning Walk".to_string(),
            pet_id: "1".to_string(),
            category: Category::Lifestyle,
            notes: Some("Bring the blue leash".to_string()),
            start_date: NaiveDate::from_ymd_opt(2025, 1, 14).unwrap(),
            time: "07:00".to_string(),
            frequency: Frequency::Daily,
        };
        let mut walk = Reminder::new("r-1".into(), form.clone(), "Browny".into(), now);
        walk.is_completed = true;
        walk.completed_at = Some(now);
        walk.streak = 15;
        walk.completed_dates = [13, 14]
            .into_iter()
            .map(|d| NaiveDate::from_ymd_opt(2025, 1, d).unwrap())
            .collect();

        let mut meds = Reminder::new(
            "r-2".into(),
            ReminderFormData {
                title: "Medication".to_string(),
                pet_id: "2".to_string(),
                category: Category::Health,
                notes: None,
                time: "22:00".to_string(),
                frequency: Frequency::Once,
                ..form
            },
            "Whiskers".into(),
            now,
        );
        meds.streak = 2;

        Snapshot {
            reminders: vec![walk, meds],
            pets: vec![
                Pet::new("1", "Browny").with_avatar("🐕"),
                Pet::new("2", "Whiskers"),
            ],
        }
    }

    fn assert_round_trip(repo: &dyn SnapshotRepository) {
        assert_eq!(repo.load().expect("Load failed"), None);

        let snapshot = sample_snapshot();
        repo.save(&snapshot).expect("Save failed");
        let loaded = repo.load().expect("Load failed").expect("Nothing saved");
        assert_eq!(loaded, snapshot);

        // A second save replaces rather than appends
        let mut smaller = snapshot.clone();
        smaller.reminders.truncate(1);
        repo.save(&smaller).expect("Save failed");
        let loaded = repo.load().unwrap().unwrap();
        assert_eq!(loaded.reminders.len(), 1);
        assert_eq!(loaded.reminders[0].id, "r-1");
    }

    #[test]
    fn test_memory_repository() {
        let repo = MemoryRepository::new();
        assert_round_trip(&repo);
        assert_eq!(repo.save_count(), 2);
    }

    #[test]
    fn test_json_file_repository() {
        let dir = tempdir().unwrap();
        let repo = JsonFileRepository::new(dir.path().join("nested").join("reminder-store.json"));
        assert_round_trip(&repo);
    }

    #[test]
    fn test_json_envelope_layout() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("reminder-store.json");
        let repo = JsonFileRepository::new(&path);
        repo.save(&sample_snapshot()).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["version"], 0);
        assert_eq!(raw["state"]["pets"][0]["name"], "Browny");
        assert_eq!(raw["state"]["reminders"][0]["petName"], "Browny");
        assert_eq!(raw["state"]["reminders"][0]["completedDates"][1], "2025-01-14");
    }

    #[test]
    fn test_json_loads_browser_snapshot() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("reminder-store.json");
        std::fs::write(
            &path,
            r#"{"state":{"reminders":[{"id":"5","title":"Medication","petId":"2","petName":"Whiskers",
                "category":"Health","startDate":"2025-01-14","time":"22:00","frequency":"Daily",
                "isCompleted":true,"createdAt":"2025-01-14T08:00:00.000Z",
                "updatedAt":"2025-01-14T08:00:00.000Z","streak":8,
                "completedDates":["2025-01-13","2025-01-14"]}],
                "pets":[{"id":"2","name":"Whiskers","avatar":"🐱"}]},"version":0}"#,
        )
        .unwrap();

        let snapshot = JsonFileRepository::new(&path).load().unwrap().unwrap();
        assert_eq!(snapshot.reminders[0].streak, 8);
        assert_eq!(snapshot.reminders[0].completed_dates.len(), 2);
        assert_eq!(snapshot.pets[0].avatar.as_deref(), Some("🐱"));
    }

    #[test]
    fn test_json_corrupt_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("reminder-store.json");
        std::fs::write(&path, "{not json").unwrap();
        assert!(JsonFileRepository::new(&path).load().is_err());
    }

    #[test]
    fn test_sqlite_in_memory_repository() {
        let repo = SqliteRepository::open_in_memory().expect("Failed to open DB");
        assert_round_trip(&repo);
    }

    #[test]
    fn test_sqlite_file_survives_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("reminder-store.db");

        {
            let repo = SqliteRepository::open(&path).unwrap();
            repo.save(&sample_snapshot()).unwrap();
        }

        let reopened = SqliteRepository::open(&path).unwrap();
        assert_eq!(reopened.load().unwrap(), Some(sample_snapshot()));
    }

    #[test]
    fn test_sqlite_empty_save_loads_as_some() {
        let repo = SqliteRepository::open_in_memory().unwrap();
        repo.save(&Snapshot::default()).unwrap();
        assert_eq!(repo.load().unwrap(), Some(Snapshot::default()));
    }
}
