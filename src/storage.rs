use crate::errors::AppError;
use crate::models::MoodEntry;
use crate::store::Persistence;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use tokio::fs;
use tracing::{debug, error, warn};

/// Persists the whole entry collection as one JSON array in a single file.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Persistence for JsonFileStorage {
    async fn load(&self) -> Vec<MoodEntry> {
        match fs::read(&self.path).await {
            Ok(bytes) => match serde_json::from_slice(&bytes) {
                Ok(entries) => entries,
                Err(err) => {
                    error!(path = %self.path.display(), "failed to parse data file: {err}");
                    Vec::new()
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no data file yet");
                Vec::new()
            }
            Err(err) => {
                error!(path = %self.path.display(), "failed to read data file: {err}");
                Vec::new()
            }
        }
    }

    async fn save(&self, entries: &[MoodEntry]) -> Result<(), AppError> {
        let payload = serde_json::to_vec_pretty(entries)?;
        write_atomic(&self.path, &payload).await
    }
}

async fn write_atomic(path: &Path, payload: &[u8]) -> Result<(), AppError> {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("invalid data path: {}", path.display()),
            )
        })?;
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos())
        .unwrap_or_default();
    let temp_path = path.with_file_name(format!("{file_name}.{nanos}.tmp"));

    fs::write(&temp_path, payload).await?;
    if let Err(err) = fs::rename(&temp_path, path).await {
        if let Err(cleanup) = fs::remove_file(&temp_path).await {
            warn!(path = %temp_path.display(), "failed to remove temp file: {cleanup}");
        }
        return Err(err.into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Intensity;
    use chrono::{TimeZone, Utc};

    fn unique_data_path(tag: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let mut dir = std::env::temp_dir();
        dir.push(format!("mood_journal_{tag}_{}_{nanos}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir.join("moodEntries.json")
    }

    fn sample_entries() -> Vec<MoodEntry> {
        vec![
            MoodEntry {
                id: "1704103200000".into(),
                date: Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap(),
                mood: "😢 Sad".into(),
                intensity: Intensity::new(2).unwrap(),
                note: "rainy".into(),
            },
            MoodEntry {
                id: "1704103100000".into(),
                date: Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap(),
                mood: "😊 Happy".into(),
                intensity: Intensity::new(8).unwrap(),
                note: String::new(),
            },
        ]
    }

    #[tokio::test]
    async fn save_then_load_preserves_order_and_fields() {
        let storage = JsonFileStorage::new(unique_data_path("roundtrip"));
        let entries = sample_entries();

        storage.save(&entries).await.unwrap();

        assert_eq!(storage.load().await, entries);
    }

    #[tokio::test]
    async fn load_missing_file_is_empty() {
        let storage = JsonFileStorage::new(unique_data_path("missing"));
        assert!(storage.load().await.is_empty());
    }

    #[tokio::test]
    async fn load_corrupt_file_is_empty() {
        let path = unique_data_path("corrupt");
        std::fs::write(&path, b"{not json").unwrap();
        assert!(JsonFileStorage::new(path).load().await.is_empty());
    }

    #[tokio::test]
    async fn load_out_of_range_intensity_is_treated_as_corrupt() {
        let path = unique_data_path("range");
        std::fs::write(
            &path,
            br#"[{"id":"1","date":"2024-01-01T00:00:00.000Z","mood":"x","intensity":12,"note":""}]"#,
        )
        .unwrap();
        assert!(JsonFileStorage::new(path).load().await.is_empty());
    }

    #[tokio::test]
    async fn load_accepts_browser_encoded_entries() {
        let path = unique_data_path("browser");
        std::fs::write(
            &path,
            r#"[{"id":"1704067200000","date":"2024-01-01T00:00:00.000Z","mood":"😊 Happy","intensity":8,"note":"new year"}]"#,
        )
        .unwrap();

        let entries = JsonFileStorage::new(path).load().await;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].mood, "😊 Happy");
        assert_eq!(entries[0].intensity.get(), 8);
        assert_eq!(entries[0].date, Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
    }

    #[tokio::test]
    async fn save_overwrites_whole_collection_without_leftovers() {
        let path = unique_data_path("overwrite");
        let storage = JsonFileStorage::new(&path);
        let entries = sample_entries();

        storage.save(&entries).await.unwrap();
        storage.save(&entries[..1]).await.unwrap();

        assert_eq!(storage.load().await, entries[..1].to_vec());
        let leftovers = std::fs::read_dir(path.parent().unwrap())
            .unwrap()
            .filter_map(Result::ok)
            .filter(|item| item.file_name().to_string_lossy().ends_with(".tmp"))
            .count();
        assert_eq!(leftovers, 0);
    }
}
