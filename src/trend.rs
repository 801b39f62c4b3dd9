use crate::buckets::{first_entry_per_day, today_in};
use crate::models::{MoodEntry, TrendPoint, TrendSeries};
use chrono::{Duration, FixedOffset, NaiveDate};

pub const TREND_DAYS: i64 = 30;

pub fn build_trend(entries: &[MoodEntry], offset: FixedOffset) -> TrendSeries {
    build_trend_at(today_in(offset), entries, offset)
}

/// One point per day for the trailing window ending at `today`, oldest first.
/// Days without an entry carry no intensity rather than zero.
pub fn build_trend_at(today: NaiveDate, entries: &[MoodEntry], offset: FixedOffset) -> TrendSeries {
    let by_day = first_entry_per_day(entries, offset);
    let start = today - Duration::days(TREND_DAYS - 1);

    let points: Vec<TrendPoint> = (0..TREND_DAYS)
        .map(|day_offset| {
            let date = start + Duration::days(day_offset);
            TrendPoint {
                date,
                label: date.format("%b %d").to_string(),
                intensity: by_day.get(&date).map(|entry| entry.intensity.get()),
            }
        })
        .collect();

    let recorded: Vec<u8> = points.iter().filter_map(|point| point.intensity).collect();
    let average_intensity = (!recorded.is_empty()).then(|| {
        recorded.iter().map(|value| f64::from(*value)).sum::<f64>() / recorded.len() as f64
    });

    TrendSeries {
        start,
        end: today,
        recorded_days: recorded.len(),
        average_intensity,
        points,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Intensity;
    use chrono::{TimeZone, Utc};

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    fn entry(id: &str, intensity: u8, date: NaiveDate) -> MoodEntry {
        MoodEntry {
            id: id.into(),
            date: Utc
                .from_utc_datetime(&date.and_hms_opt(12, 0, 0).unwrap()),
            mood: "😐 Neutral".into(),
            intensity: Intensity::new(intensity).unwrap(),
            note: String::new(),
        }
    }

    #[test]
    fn always_thirty_points_oldest_first() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let trend = build_trend_at(today, &[], utc());

        assert_eq!(trend.points.len(), 30);
        assert_eq!(trend.points[0].date, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        assert_eq!(trend.points[29].date, today);
        assert_eq!(trend.points[29].label, "Mar 01");
        assert_eq!(trend.start, trend.points[0].date);
        assert_eq!(trend.end, today);
    }

    #[test]
    fn empty_window_reports_no_data() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let old = entry("1", 7, NaiveDate::from_ymd_opt(2023, 3, 1).unwrap());
        let trend = build_trend_at(today, &[old], utc());

        assert_eq!(trend.recorded_days, 0);
        assert_eq!(trend.average_intensity, None);
        assert!(trend.points.iter().all(|point| point.intensity.is_none()));
    }

    #[test]
    fn duplicate_days_use_the_first_entry() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let yesterday = today - Duration::days(1);
        let entries = vec![
            entry("3", 9, yesterday),
            entry("2", 1, yesterday),
            entry("1", 4, today - Duration::days(29)),
        ];
        let trend = build_trend_at(today, &entries, utc());

        assert_eq!(trend.points[28].intensity, Some(9));
        assert_eq!(trend.points[0].intensity, Some(4));
        assert_eq!(trend.points[29].intensity, None);
        assert_eq!(trend.recorded_days, 2);
        assert_eq!(trend.average_intensity, Some(6.5));
    }

    #[test]
    fn entries_outside_the_window_are_dropped() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let entries = vec![
            entry("2", 5, today + Duration::days(1)),
            entry("1", 5, today - Duration::days(30)),
        ];
        let trend = build_trend_at(today, &entries, utc());
        assert_eq!(trend.recorded_days, 0);
    }
}
