use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const MIN_INTENSITY: u8 = 1;
pub const MAX_INTENSITY: u8 = 10;

/// Mood intensity, always within `MIN_INTENSITY..=MAX_INTENSITY`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Intensity(u8);

impl Intensity {
    pub fn new(value: u8) -> Option<Self> {
        (MIN_INTENSITY..=MAX_INTENSITY)
            .contains(&value)
            .then_some(Self(value))
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Display hue for heat-map cells: 108 (green) at 1 down to 0 (red) at 10.
    pub fn hue(self) -> u16 {
        120 - u16::from(self.0) * 12
    }
}

impl Default for Intensity {
    fn default() -> Self {
        Self(5)
    }
}

impl TryFrom<u8> for Intensity {
    type Error = IntensityOutOfRange;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(IntensityOutOfRange(i64::from(value)))
    }
}

/// Request payloads carry the raw number so any out-of-range value reaches
/// validation instead of failing in the extractor.
impl TryFrom<i64> for Intensity {
    type Error = IntensityOutOfRange;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .ok()
            .and_then(Self::new)
            .ok_or(IntensityOutOfRange(value))
    }
}

impl From<Intensity> for u8 {
    fn from(value: Intensity) -> Self {
        value.0
    }
}

impl fmt::Display for Intensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntensityOutOfRange(pub i64);

impl fmt::Display for IntensityOutOfRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "intensity must be between {MIN_INTENSITY} and {MAX_INTENSITY}, got {}",
            self.0
        )
    }
}

impl std::error::Error for IntensityOutOfRange {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodEntry {
    pub id: String,
    pub date: DateTime<Utc>,
    pub mood: String,
    pub intensity: Intensity,
    #[serde(default)]
    pub note: String,
}

impl MoodEntry {
    /// Leading emoji of a palette mood such as `"😊 Happy"`.
    pub fn emoji(&self) -> Option<&str> {
        self.mood
            .split_once(' ')
            .map(|(emoji, _)| emoji)
            .filter(|emoji| !emoji.is_empty() && !emoji.chars().any(char::is_alphanumeric))
    }

    pub fn label(&self) -> &str {
        match self.emoji() {
            Some(emoji) => self.mood[emoji.len()..].trim_start(),
            None => &self.mood,
        }
    }
}

pub struct PaletteMood {
    pub emoji: &'static str,
    pub label: &'static str,
    pub color: &'static str,
}

impl PaletteMood {
    pub fn mood(&self) -> String {
        format!("{} {}", self.emoji, self.label)
    }
}

pub const MOOD_PALETTE: [PaletteMood; 9] = [
    PaletteMood { emoji: "😊", label: "Happy", color: "#FFD700" },
    PaletteMood { emoji: "😐", label: "Neutral", color: "#A9A9A9" },
    PaletteMood { emoji: "😢", label: "Sad", color: "#4169E1" },
    PaletteMood { emoji: "😠", label: "Angry", color: "#FF4500" },
    PaletteMood { emoji: "😴", label: "Tired", color: "#8E44AD" },
    PaletteMood { emoji: "😰", label: "Anxious", color: "#2ECC71" },
    PaletteMood { emoji: "😌", label: "Relaxed", color: "#3498DB" },
    PaletteMood { emoji: "🥳", label: "Excited", color: "#E74C3C" },
    PaletteMood { emoji: "🤔", label: "Confused", color: "#F39C12" },
];

#[derive(Debug, Deserialize)]
pub struct NewEntryRequest {
    pub mood: String,
    pub intensity: i64,
    #[serde(default)]
    pub note: String,
    pub date: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub struct EditEntryRequest {
    pub mood: String,
    pub intensity: i64,
    #[serde(default)]
    pub note: String,
}

#[derive(Debug, Deserialize)]
pub struct NewEntryForm {
    #[serde(default)]
    pub mood: String,
    #[serde(default)]
    pub custom_mood: String,
    pub intensity: i64,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub date: String,
}

#[derive(Debug, Serialize)]
pub struct UpdateResponse {
    pub updated: bool,
    pub entry: Option<MoodEntry>,
}

#[derive(Debug, Default, Deserialize)]
pub struct IndexQuery {
    pub view: Option<String>,
    pub saved: Option<String>,
    pub edit: Option<String>,
    pub month: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct MonthQuery {
    pub month: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CalendarCell {
    pub id: String,
    pub mood: String,
    pub emoji: Option<String>,
    pub label: String,
    pub intensity: u8,
    pub hue: u16,
}

#[derive(Debug, Serialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub day: u32,
    pub is_today: bool,
    pub entry: Option<CalendarCell>,
}

#[derive(Debug, Serialize)]
pub struct CalendarMonth {
    pub month: String,
    pub leading_blanks: u32,
    pub days: Vec<CalendarDay>,
}

#[derive(Debug, Serialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub label: String,
    pub intensity: Option<u8>,
}

#[derive(Debug, Serialize)]
pub struct TrendSeries {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub points: Vec<TrendPoint>,
    pub recorded_days: usize,
    pub average_intensity: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct MoodShare {
    pub mood: String,
    pub count: usize,
    pub percentage: f64,
}

#[derive(Debug, Serialize)]
pub struct MoodStats {
    pub total_count: usize,
    pub moods: Vec<MoodShare>,
    pub average_intensity: Option<f64>,
}

impl MoodStats {
    pub fn is_empty(&self) -> bool {
        self.total_count == 0
    }
}
