pub mod app;
pub mod buckets;
pub mod calendar;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod state;
pub mod stats;
pub mod storage;
pub mod store;
pub mod trend;
pub mod ui;

pub use app::router;
pub use config::Config;
pub use state::AppState;
pub use storage::JsonFileStorage;
pub use store::{EntryStore, MemoryStorage, Persistence};
