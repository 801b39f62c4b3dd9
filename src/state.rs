use crate::storage::JsonFileStorage;
use crate::store::EntryStore;
use chrono::FixedOffset;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Mutex<EntryStore<JsonFileStorage>>>,
    pub utc_offset: FixedOffset,
}

impl AppState {
    pub fn new(store: EntryStore<JsonFileStorage>, utc_offset: FixedOffset) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
            utc_offset,
        }
    }
}
