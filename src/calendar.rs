use crate::buckets::{first_entry_per_day, today_in};
use crate::models::{CalendarCell, CalendarDay, CalendarMonth, MoodEntry};
use chrono::{Datelike, Duration, FixedOffset, NaiveDate};

pub fn build_calendar(entries: &[MoodEntry], offset: FixedOffset) -> CalendarMonth {
    let today = today_in(offset);
    build_calendar_at(today, today, entries, offset)
}

/// Lays out the month containing `month` one cell per day, starting at day 1.
pub fn build_calendar_at(
    month: NaiveDate,
    today: NaiveDate,
    entries: &[MoodEntry],
    offset: FixedOffset,
) -> CalendarMonth {
    let first = month_start(month);
    let by_day = first_entry_per_day(entries, offset);

    let days = first
        .iter_days()
        .take_while(|date| date.month() == first.month())
        .map(|date| CalendarDay {
            date,
            day: date.day(),
            is_today: date == today,
            entry: by_day.get(&date).map(|entry| to_cell(entry)),
        })
        .collect();

    CalendarMonth {
        month: first.format("%Y-%m").to_string(),
        leading_blanks: first.weekday().num_days_from_sunday(),
        days,
    }
}

/// Parses a `YYYY-MM` month selector into the first day of that month.
pub fn parse_month(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(&format!("{}-01", value.trim()), "%Y-%m-%d").ok()
}

fn month_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.day0()))
}

fn to_cell(entry: &MoodEntry) -> CalendarCell {
    CalendarCell {
        id: entry.id.clone(),
        mood: entry.mood.clone(),
        emoji: entry.emoji().map(str::to_owned),
        label: entry.label().to_owned(),
        intensity: entry.intensity.get(),
        hue: entry.intensity.hue(),
    }
}
