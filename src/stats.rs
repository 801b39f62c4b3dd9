use crate::models::{MoodEntry, MoodShare, MoodStats};
use std::collections::BTreeMap;

/// Per-mood counts and the mean intensity. An empty collection produces no
/// shares and no average instead of dividing by zero.
pub fn build_stats(entries: &[MoodEntry]) -> MoodStats {
    let total_count = entries.len();
    if total_count == 0 {
        return MoodStats {
            total_count,
            moods: Vec::new(),
            average_intensity: None,
        };
    }

    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    let mut intensity_sum = 0u64;
    for entry in entries {
        *counts.entry(entry.mood.as_str()).or_default() += 1;
        intensity_sum += u64::from(entry.intensity.get());
    }

    let total = total_count as f64;
    let mut moods: Vec<MoodShare> = counts
        .into_iter()
        .map(|(mood, count)| MoodShare {
            mood: mood.to_owned(),
            count,
            percentage: count as f64 * 100.0 / total,
        })
        .collect();
    // BTreeMap already yields labels in order; a stable sort keeps that as the tie-break.
    moods.sort_by(|a, b| b.count.cmp(&a.count));

    MoodStats {
        total_count,
        moods,
        average_intensity: Some(intensity_sum as f64 / total),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Intensity;
    use chrono::Utc;

    fn entry(mood: &str, intensity: u8) -> MoodEntry {
        MoodEntry {
            id: format!("{mood}-{intensity}"),
            date: Utc::now(),
            mood: mood.into(),
            intensity: Intensity::new(intensity).unwrap(),
            note: String::new(),
        }
    }

    #[test]
    fn empty_store_has_no_data() {
        let stats = build_stats(&[]);
        assert!(stats.is_empty());
        assert_eq!(stats.total_count, 0);
        assert!(stats.moods.is_empty());
        assert_eq!(stats.average_intensity, None);
    }

    #[test]
    fn averages_and_shares_three_moods() {
        let entries = vec![
            entry("😊 Happy", 4),
            entry("😢 Sad", 6),
            entry("😴 Tired", 8),
        ];
        let stats = build_stats(&entries);

        assert_eq!(stats.total_count, 3);
        assert_eq!(stats.average_intensity, Some(6.0));
        assert_eq!(stats.moods.len(), 3);
        for share in &stats.moods {
            assert_eq!(share.count, 1);
            assert!((share.percentage - 33.333).abs() < 0.01);
        }
    }

    #[test]
    fn shares_sorted_by_count_then_label() {
        let entries = vec![
            entry("😢 Sad", 2),
            entry("😊 Happy", 8),
            entry("😠 Angry", 9),
            entry("😊 Happy", 7),
        ];
        let stats = build_stats(&entries);

        let order: Vec<(&str, usize)> = stats
            .moods
            .iter()
            .map(|share| (share.mood.as_str(), share.count))
            .collect();
        assert_eq!(order, [("😊 Happy", 2), ("😠 Angry", 1), ("😢 Sad", 1)]);
        assert_eq!(stats.moods[0].percentage, 50.0);
        assert_eq!(stats.average_intensity, Some(6.5));
    }
}
