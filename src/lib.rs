pub mod app;
pub mod config;
pub mod date_key;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod records;
pub mod state;
pub mod storage;
pub mod weekly;

pub use app::router;
pub use config::Config;
pub use date_key::{DateKey, normalize};
pub use models::{Category, DailyRecord};
pub use records::{Lookup, RecordStore, TrackerError};
pub use state::AppState;
pub use storage::{DirStore, KeyValueStore, MemoryStore, StoreError};
