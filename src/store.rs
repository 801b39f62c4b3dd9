//! The mood entry collection and its persistence seam.
//!
//! Entries are kept newest-first. Every successful mutation is followed by a
//! full-collection write through the injected [`Persistence`] backend; the
//! in-memory collection only changes once that write succeeded.

use crate::errors::AppError;
use crate::models::MoodEntry;
use chrono::{DateTime, Utc};
use std::future::Future;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info};

/// Where the entry collection is loaded from and written back to.
pub trait Persistence: Send + Sync {
    /// Reads the stored collection. Missing or unreadable data yields an
    /// empty history, never an error.
    fn load(&self) -> impl Future<Output = Vec<MoodEntry>> + Send;

    /// Replaces the stored collection with `entries`.
    fn save(&self, entries: &[MoodEntry]) -> impl Future<Output = Result<(), AppError>> + Send;
}

/// In-memory backend, handy for tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<Vec<MoodEntry>>,
    fail_writes: AtomicBool,
    writes: Mutex<usize>,
}

impl MemoryStorage {
    pub fn with_entries(entries: Vec<MoodEntry>) -> Self {
        Self {
            entries: Mutex::new(entries),
            ..Self::default()
        }
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn stored(&self) -> Vec<MoodEntry> {
        self.entries
            .lock()
            .map(|entries| entries.clone())
            .unwrap_or_default()
    }

    pub fn write_count(&self) -> usize {
        self.writes.lock().map(|count| *count).unwrap_or_default()
    }
}

impl Persistence for MemoryStorage {
    async fn load(&self) -> Vec<MoodEntry> {
        self.stored()
    }

    async fn save(&self, entries: &[MoodEntry]) -> Result<(), AppError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(AppError::internal(std::io::Error::other(
                "memory storage configured to fail",
            )));
        }
        *self.entries.lock().map_err(|_| lock_poisoned())? = entries.to_vec();
        *self.writes.lock().map_err(|_| lock_poisoned())? += 1;
        Ok(())
    }
}

fn lock_poisoned() -> AppError {
    AppError::internal(std::io::Error::other("memory storage lock poisoned"))
}

/// Numeric ids above this (9999-12-31T23:59:59.999Z in milliseconds) are not
/// timestamps and never seed the id generator.
const MAX_SEED_ID: i64 = 253_402_300_799_999;

pub struct EntryStore<P> {
    entries: Vec<MoodEntry>,
    persistence: P,
    last_id: i64,
}

impl<P: Persistence> EntryStore<P> {
    pub async fn open(persistence: P) -> Self {
        let entries = persistence.load().await;
        let last_id = entries
            .iter()
            .filter_map(|entry| entry.id.parse::<i64>().ok())
            .filter(|id| (0..=MAX_SEED_ID).contains(id))
            .max()
            .unwrap_or(0);
        info!(count = entries.len(), "loaded mood entries");
        Self {
            entries,
            persistence,
            last_id,
        }
    }

    /// Millisecond-timestamp id, strictly above every id issued so far and
    /// distinct from every stored id.
    pub fn next_id(&mut self, now: DateTime<Utc>) -> String {
        let floor = self.last_id.checked_add(1).unwrap_or(i64::MAX);
        let mut id = now.timestamp_millis().max(floor);
        while self.get(&id.to_string()).is_some() {
            match id.checked_add(1) {
                Some(next) => id = next,
                None => break,
            }
        }
        self.last_id = id;
        id.to_string()
    }

    pub async fn append(&mut self, entry: MoodEntry) -> Result<(), AppError> {
        let mut next = Vec::with_capacity(self.entries.len() + 1);
        next.push(entry);
        next.extend(self.entries.iter().cloned());

        self.persistence.save(&next).await?;

        info!(id = %next[0].id, mood = %next[0].mood, intensity = %next[0].intensity, "mood entry added");
        self.entries = next;
        Ok(())
    }

    /// Replaces the entry sharing `entry.id` in place. Returns `false`, without
    /// writing anything, when no such entry exists.
    pub async fn update(&mut self, entry: MoodEntry) -> Result<bool, AppError> {
        let Some(position) = self.entries.iter().position(|current| current.id == entry.id) else {
            debug!(id = %entry.id, "ignoring edit for unknown entry");
            return Ok(false);
        };

        let mut next = self.entries.clone();
        next[position] = entry;

        self.persistence.save(&next).await?;

        info!(id = %next[position].id, "mood entry updated");
        self.entries = next;
        Ok(true)
    }

    pub fn snapshot(&self) -> &[MoodEntry] {
        &self.entries
    }

    pub fn get(&self, id: &str) -> Option<&MoodEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn persistence(&self) -> &P {
        &self.persistence
    }
}
