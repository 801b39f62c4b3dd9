//! Calendar-day bucketing shared by the calendar and trend projections.
//!
//! Days are always evaluated in one fixed UTC offset so an entry near midnight
//! lands on the same day no matter where the page is viewed from.

use crate::models::MoodEntry;
use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use std::collections::HashMap;

pub fn day_of(date: DateTime<Utc>, offset: FixedOffset) -> NaiveDate {
    date.with_timezone(&offset).date_naive()
}

pub fn today_in(offset: FixedOffset) -> NaiveDate {
    day_of(Utc::now(), offset)
}

/// First entry per calendar day, in the order `entries` are given. With the
/// store's newest-first order that is the most recently added entry.
pub fn first_entry_per_day(
    entries: &[MoodEntry],
    offset: FixedOffset,
) -> HashMap<NaiveDate, &MoodEntry> {
    let mut by_day = HashMap::with_capacity(entries.len());
    for entry in entries {
        by_day.entry(day_of(entry.date, offset)).or_insert(entry);
    }
    by_day
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Intensity;
    use chrono::TimeZone;

    fn entry(id: &str, date: DateTime<Utc>) -> MoodEntry {
        MoodEntry {
            id: id.into(),
            date,
            mood: "😐 Neutral".into(),
            intensity: Intensity::default(),
            note: String::new(),
        }
    }

    #[test]
    fn first_entry_wins_per_day() {
        let entries = vec![
            entry("newer", Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap()),
            entry("older", Utc.with_ymd_and_hms(2024, 1, 1, 20, 0, 0).unwrap()),
        ];
        let by_day = first_entry_per_day(&entries, FixedOffset::east_opt(0).unwrap());

        assert_eq!(by_day.len(), 1);
        let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(by_day[&day].id, "newer");
    }

    #[test]
    fn offset_moves_late_entries_to_the_next_day() {
        let late = Utc.with_ymd_and_hms(2024, 1, 1, 23, 30, 0).unwrap();
        let utc = FixedOffset::east_opt(0).unwrap();
        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();

        assert_eq!(day_of(late, utc), NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(day_of(late, plus_two), NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
    }
}
