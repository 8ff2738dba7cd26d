//! Time Slots
//!
//! Coarse time-of-day buckets derived from a reminder's `HH:MM` clock time.
//! Only the hour is considered:
//! - morning: `[5, 12)`
//! - afternoon: `[12, 17)`
//! - evening: `[17, 21)`
//! - night: everything else

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::entity::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeSlot {
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl TimeSlot {
    pub const ALL: [TimeSlot; 4] = [
        TimeSlot::Morning,
        TimeSlot::Afternoon,
        TimeSlot::Evening,
        TimeSlot::Night,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeSlot::Morning => "morning",
            TimeSlot::Afternoon => "afternoon",
            TimeSlot::Evening => "evening",
            TimeSlot::Night => "night",
        }
    }

    /// Section heading
    pub fn label(&self) -> &'static str {
        match self {
            TimeSlot::Morning => "Morning",
            TimeSlot::Afternoon => "Afternoon",
            TimeSlot::Evening => "Evening",
            TimeSlot::Night => "Night",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            TimeSlot::Morning => "🌅",
            TimeSlot::Afternoon => "☀️",
            TimeSlot::Evening => "🌆",
            TimeSlot::Night => "🌙",
        }
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeSlot {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TimeSlot::ALL
            .into_iter()
            .find(|slot| slot.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DomainError::InvalidInput(format!("unknown time slot '{}'", s)))
    }
}

/// Hour component of `HH:MM`, or `None` if it is not a number
pub fn hour_of(time: &str) -> Option<u32> {
    time.split(':').next()?.trim().parse().ok()
}

/// `hour * 60 + minute`, or `None` for malformed or overflowing input
pub fn minutes_since_midnight(time: &str) -> Option<u32> {
    let mut parts = time.split(':');
    let hour: u32 = parts.next()?.trim().parse().ok()?;
    let minute: u32 = parts.next()?.trim().parse().ok()?;
    hour.checked_mul(60)?.checked_add(minute)
}

/// Bucket a clock time by its hour.
///
/// An hour that does not parse lands in `Night`, the catch-all bucket.
pub fn classify_time_slot(time: &str) -> TimeSlot {
    match hour_of(time) {
        Some(5..=11) => TimeSlot::Morning,
        Some(12..=16) => TimeSlot::Afternoon,
        Some(17..=20) => TimeSlot::Evening,
        _ => TimeSlot::Night,
    }
}

/// `13:05` -> `1:05 PM`. Malformed input is returned unchanged.
pub fn format_time_12h(time: &str) -> String {
    let Some((hours, minutes)) = time.split_once(':') else {
        return time.to_string();
    };
    let Ok(hour) = hours.trim().parse::<u32>() else {
        return time.to_string();
    };

    let am_pm = if hour >= 12 { "PM" } else { "AM" };
    let display_hour = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{}:{} {}", display_hour, minutes, am_pm)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_boundaries() {
        assert_eq!(classify_time_slot("05:00"), TimeSlot::Morning);
        assert_eq!(classify_time_slot("11:59"), TimeSlot::Morning);
        assert_eq!(classify_time_slot("12:00"), TimeSlot::Afternoon);
        assert_eq!(classify_time_slot("16:59"), TimeSlot::Afternoon);
        assert_eq!(classify_time_slot("17:00"), TimeSlot::Evening);
        assert_eq!(classify_time_slot("20:59"), TimeSlot::Evening);
        assert_eq!(classify_time_slot("21:00"), TimeSlot::Night);
        assert_eq!(classify_time_slot("04:59"), TimeSlot::Night);
        assert_eq!(classify_time_slot("00:00"), TimeSlot::Night);
    }

    #[test]
    fn test_minutes_are_ignored_for_slot() {
        for minute in 0..60 {
            let time = format!("16:{:02}", minute);
            assert_eq!(classify_time_slot(&time), TimeSlot::Afternoon);
        }
    }

    #[test]
    fn test_malformed_time() {
        assert_eq!(hour_of("ab:00"), None);
        assert_eq!(minutes_since_midnight("07"), None);
        assert_eq!(classify_time_slot("noon"), TimeSlot::Night);
    }

    #[test]
    fn test_minutes_since_midnight() {
        assert_eq!(minutes_since_midnight("00:00"), Some(0));
        assert_eq!(minutes_since_midnight("07:30"), Some(450));
        assert_eq!(minutes_since_midnight("23:45"), Some(1425));
    }

    #[test]
    fn test_format_time_12h() {
        assert_eq!(format_time_12h("00:15"), "12:15 AM");
        assert_eq!(format_time_12h("07:00"), "7:00 AM");
        assert_eq!(format_time_12h("12:06"), "12:06 PM");
        assert_eq!(format_time_12h("23:45"), "11:45 PM");
        assert_eq!(format_time_12h("later"), "later");
    }

    #[test]
    fn test_slot_parsing_and_labels() {
        assert_eq!("Evening".parse::<TimeSlot>().unwrap(), TimeSlot::Evening);
        assert!("dawn".parse::<TimeSlot>().is_err());
        assert_eq!(TimeSlot::Night.label(), "Night");
        assert_eq!(TimeSlot::Morning.icon(), "🌅");
    }
}
