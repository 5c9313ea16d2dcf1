use crate::errors::AppError;
use crate::records::RecordStore;
use crate::storage::DirStore;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub struct AppState {
    pub records: Arc<Mutex<RecordStore<DirStore>>>,
}

impl AppState {
    pub fn new(records: RecordStore<DirStore>) -> Self {
        Self {
            records: Arc::new(Mutex::new(records)),
        }
    }

    /// Runs `op` against the record store on the blocking pool, one caller
    /// at a time.
    pub async fn with_records<T, F>(&self, op: F) -> Result<T, AppError>
    where
        F: FnOnce(&mut RecordStore<DirStore>) -> Result<T, AppError> + Send + 'static,
        T: Send + 'static,
    {
        let records = Arc::clone(&self.records);
        tokio::task::spawn_blocking(move || {
            let mut guard = records.lock().map_err(AppError::internal)?;
            op(&mut guard)
        })
        .await
        .map_err(AppError::internal)?
    }
}
