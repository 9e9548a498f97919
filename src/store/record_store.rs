use super::Record;
use crate::core::Result;
use serde_json::Value;
use crate::storage::{ListenerGuard, StorageArea, ViewId};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Owner of one schema's ordered record list and its storage slot.
///
/// The in-memory list only changes through [`RecordStore::mutate`],
/// [`RecordStore::reload`] and [`RecordStore::seed_if_empty`]; every mutation
/// is written through to storage before it becomes visible.
pub struct RecordStore<R: Record> {
    area: Arc<StorageArea>,
    key: String,
    view: ViewId,
    records: Vec<R>,
}

impl<R: Record> RecordStore<R> {
    /// Open the slot `key` as a new view and load its current content.
    pub fn open(area: Arc<StorageArea>, key: impl Into<String>) -> Self {
        let view = area.register_view();
        let mut store = Self {
            area,
            key: key.into(),
            view,
            records: Vec::new(),
        };
        store.reload();
        store
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn area(&self) -> &Arc<StorageArea> {
        &self.area
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn find(&self, key: &str) -> Option<&R> {
        self.records.iter().find(|r| r.key() == key)
    }

    pub fn position(&self, key: &str) -> Option<usize> {
        self.records.iter().position(|r| r.key() == key)
    }

    /// Read the slot. Missing or malformed content yields an empty list.
    pub fn load(&self) -> Vec<R> {
        match self.area.get_item(&self.key) {
            Ok(raw) => decode_records(&self.key, raw.as_deref()),
            Err(err) => {
                warn!(key = %self.key, error = %err, "failed to read storage slot; treating as empty");
                Vec::new()
            }
        }
    }

    /// Serialize `records` and overwrite the slot.
    pub fn save(&self, records: &[R]) -> Result<()> {
        let encoded = serde_json::to_string(records)?;
        self.area.set_item(&self.key, &encoded, self.view)?;
        debug!(key = %self.key, records = records.len(), "persisted records");
        Ok(())
    }

    /// Replace the in-memory list with freshly loaded content.
    pub fn reload(&mut self) {
        self.records = self.load();
    }

    /// Install an owned copy of `defaults` when storage holds no records.
    ///
    /// Returns `true` when seeding happened.
    pub fn seed_if_empty(&mut self, defaults: &[R]) -> Result<bool> {
        let loaded = self.load();
        if !loaded.is_empty() {
            self.records = loaded;
            return Ok(false);
        }

        let seeded = defaults.to_vec();
        self.save(&seeded)?;
        info!(key = %self.key, records = seeded.len(), "seeded empty store with defaults");
        self.records = seeded;
        Ok(true)
    }

    /// Apply `f` to a working copy of the list and persist the result.
    ///
    /// The in-memory list is only replaced once the write succeeded.
    pub fn mutate<T, F>(&mut self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Vec<R>) -> T,
    {
        let mut next = self.records.clone();
        let out = f(&mut next);
        self.save(&next)?;
        self.records = next;
        Ok(out)
    }

    /// Observe writes to this slot made by other views.
    ///
    /// `callback` receives the newly persisted records, decoded with the same
    /// fail-soft rules as [`RecordStore::load`].
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&[R]) + Send + Sync + 'static,
    {
        let key = self.key.clone();
        let guard = self.area.add_listener(&self.key, self.view, move |event| {
            let records: Vec<R> = decode_records(&key, event.new_value.as_deref());
            callback(&records);
        });
        Subscription { _guard: guard }
    }
}

/// Keeps a store observer registered until dropped.
#[must_use = "the observer is removed as soon as the subscription is dropped"]
pub struct Subscription {
    _guard: ListenerGuard,
}

/// Decode a slot's raw content.
///
/// Content that is not a JSON array is treated as absent data. Inside an
/// array, elements that do not decode as `R` are skipped one by one so a
/// single unknown record never discards its neighbours.
pub fn decode_records<R: Record>(key: &str, raw: Option<&str>) -> Vec<R> {
    let Some(raw) = raw else {
        return Vec::new();
    };
    if raw.trim().is_empty() {
        return Vec::new();
    }
    let items = match serde_json::from_str::<Value>(raw) {
        Ok(Value::Array(items)) => items,
        Ok(_) => {
            warn!(key = %key, "storage slot is not an array; resetting");
            return Vec::new();
        }
        Err(err) => {
            warn!(key = %key, error = %err, "corrupted storage slot; resetting");
            return Vec::new();
        }
    };

    items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value::<R>(item) {
            Ok(record) => Some(record),
            Err(err) => {
                warn!(key = %key, index, error = %err, "skipping malformed record");
                None
            }
        })
        .collect()
}
