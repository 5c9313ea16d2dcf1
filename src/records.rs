use crate::date_key::DateKey;
use crate::models::{Category, DailyRecord};
use crate::storage::{KeyValueStore, StoreError};
use std::fmt;
use tracing::{error, info, warn};

#[derive(Debug)]
pub enum TrackerError {
    Store(StoreError),
    Encode(serde_json::Error),
    BoxOutOfRange {
        category: Category,
        index: usize,
        box_count: usize,
    },
}

impl fmt::Display for TrackerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrackerError::Store(err) => write!(f, "{err}"),
            TrackerError::Encode(err) => write!(f, "failed to encode record: {err}"),
            TrackerError::BoxOutOfRange {
                category,
                index,
                box_count,
            } => write!(
                f,
                "{category} has {box_count} boxes, index {index} is out of range"
            ),
        }
    }
}

impl std::error::Error for TrackerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TrackerError::Store(err) => Some(err),
            TrackerError::Encode(err) => Some(err),
            TrackerError::BoxOutOfRange { .. } => None,
        }
    }
}

impl From<StoreError> for TrackerError {
    fn from(err: StoreError) -> Self {
        Self::Store(err)
    }
}

/// Outcome of reading one day's record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    Found(DailyRecord),
    Absent,
    /// Stored bytes exist but could not be read or decoded.
    Corrupt { reason: String },
}

/// Per-day records on top of a key-value store. Every mutation is written
/// through immediately.
#[derive(Debug)]
pub struct RecordStore<S> {
    backend: S,
}

impl<S: KeyValueStore> RecordStore<S> {
    pub fn new(backend: S) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    pub fn fetch(&self, key: DateKey) -> Lookup {
        let storage_key = key.storage_key();
        let bytes = match self.backend.get(&storage_key) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return Lookup::Absent,
            Err(err) => {
                return Lookup::Corrupt {
                    reason: err.to_string(),
                };
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(record) => Lookup::Found(record),
            Err(err) => Lookup::Corrupt {
                reason: err.to_string(),
            },
        }
    }

    /// Stored record for `key`; unreadable or malformed data reads as absent.
    pub fn load(&self, key: DateKey) -> Option<DailyRecord> {
        match self.fetch(key) {
            Lookup::Found(record) => Some(record),
            Lookup::Absent => None,
            Lookup::Corrupt { reason } => {
                warn!(date = %key, %reason, "discarding unreadable record");
                None
            }
        }
    }

    /// Never writes; a fresh day only reaches storage on its first mutation.
    pub fn load_or_default(&self, key: DateKey) -> DailyRecord {
        self.load(key).unwrap_or_default()
    }

    pub fn save(&mut self, record: &DailyRecord, key: DateKey) -> Result<(), TrackerError> {
        let payload = serde_json::to_vec_pretty(record).map_err(TrackerError::Encode)?;
        self.backend
            .set(&key.storage_key(), &payload)
            .map_err(|err| {
                error!(date = %key, "failed to persist record: {err}");
                TrackerError::from(err)
            })
    }

    pub fn add_box(
        &mut self,
        key: DateKey,
        category: Category,
    ) -> Result<DailyRecord, TrackerError> {
        let mut record = self.load_or_default(key);
        record.entry_mut(category).add_box();
        self.save(&record, key)?;

        info!(
            date = %key,
            %category,
            box_count = record.entry(category).box_count(),
            "box added"
        );
        Ok(record)
    }

    pub fn toggle_box(
        &mut self,
        key: DateKey,
        category: Category,
        index: usize,
    ) -> Result<DailyRecord, TrackerError> {
        let mut record = self.load_or_default(key);
        let entry = record.entry_mut(category);
        let box_count = entry.box_count();
        let checked = entry.toggle(index).ok_or(TrackerError::BoxOutOfRange {
            category,
            index,
            box_count,
        })?;
        self.save(&record, key)?;

        info!(date = %key, %category, index, checked, "box toggled");
        Ok(record)
    }
}
