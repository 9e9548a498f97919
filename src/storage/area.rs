//! Shared key-value area with change notification.
//!
//! A `StorageArea` plays the role of one origin's local storage: several
//! views open stores over the same area, and every write made by one view is
//! announced to the listeners registered by the others.

use super::{FileStorage, InMemoryStorage, StorageBackend};
use crate::core::Result;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, Weak};
use tracing::{debug, warn};

/// Identifies the view that performed a write.
pub type ViewId = u64;

/// Writer id for changes that do not originate from a registered view,
/// such as a host tool editing storage directly.
pub const EXTERNAL_WRITER: ViewId = 0;

/// Change notification for one key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageEvent {
    pub key: String,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
    pub writer: ViewId,
}

type Callback = Arc<dyn Fn(&StorageEvent) + Send + Sync>;

struct ListenerEntry {
    id: u64,
    key: String,
    owner: ViewId,
    callback: Callback,
}

pub struct StorageArea {
    backend: Box<dyn StorageBackend>,
    // Held across the old-value read and the write so events chain.
    write_lock: Mutex<()>,
    listeners: Mutex<Vec<ListenerEntry>>,
    next_view: AtomicU64,
    next_listener: AtomicU64,
}

impl StorageArea {
    pub fn new<B: StorageBackend + 'static>(backend: B) -> Arc<Self> {
        Arc::new(Self {
            backend: Box::new(backend),
            write_lock: Mutex::new(()),
            listeners: Mutex::new(Vec::new()),
            next_view: AtomicU64::new(EXTERNAL_WRITER + 1),
            next_listener: AtomicU64::new(1),
        })
    }

    pub fn in_memory() -> Arc<Self> {
        Self::new(InMemoryStorage::new())
    }

    pub fn open_dir<P: AsRef<Path>>(path: P) -> Result<Arc<Self>> {
        Ok(Self::new(FileStorage::new(path)?))
    }

    /// Allocate an id for a new view over this area.
    pub fn register_view(&self) -> ViewId {
        self.next_view.fetch_add(1, Ordering::Relaxed)
    }

    pub fn get_item(&self, key: &str) -> Result<Option<String>> {
        self.backend.get_item(key)
    }

    pub fn keys(&self) -> Result<Vec<String>> {
        self.backend.keys()
    }

    /// Write `value` and notify every other view listening on `key`.
    ///
    /// Writes are serialized; listeners run after the write lock is released.
    pub fn set_item(&self, key: &str, value: &str, writer: ViewId) -> Result<()> {
        let old_value = {
            let _write = self.write_lock.lock()?;
            let old_value = self.backend.get_item(key)?;
            self.backend.set_item(key, value)?;
            old_value
        };
        self.dispatch(StorageEvent {
            key: key.to_string(),
            old_value,
            new_value: Some(value.to_string()),
            writer,
        });
        Ok(())
    }

    pub fn remove_item(&self, key: &str, writer: ViewId) -> Result<()> {
        let old_value = {
            let _write = self.write_lock.lock()?;
            let Some(old_value) = self.backend.get_item(key)? else {
                return Ok(());
            };
            self.backend.remove_item(key)?;
            old_value
        };
        self.dispatch(StorageEvent {
            key: key.to_string(),
            old_value: Some(old_value),
            new_value: None,
            writer,
        });
        Ok(())
    }

    /// Register `callback` for changes to `key` made by any view except `owner`.
    ///
    /// The listener stays registered until the returned guard is dropped.
    pub fn add_listener<F>(self: &Arc<Self>, key: &str, owner: ViewId, callback: F) -> ListenerGuard
    where
        F: Fn(&StorageEvent) + Send + Sync + 'static,
    {
        let id = self.next_listener.fetch_add(1, Ordering::Relaxed);
        let entry = ListenerEntry {
            id,
            key: key.to_string(),
            owner,
            callback: Arc::new(callback),
        };
        match self.listeners.lock() {
            Ok(mut listeners) => listeners.push(entry),
            Err(poisoned) => poisoned.into_inner().push(entry),
        }
        ListenerGuard {
            area: Arc::downgrade(self),
            id,
        }
    }

    pub fn listener_count(&self) -> usize {
        match self.listeners.lock() {
            Ok(listeners) => listeners.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }

    fn remove_listener(&self, id: u64) {
        match self.listeners.lock() {
            Ok(mut listeners) => listeners.retain(|l| l.id != id),
            Err(poisoned) => poisoned.into_inner().retain(|l| l.id != id),
        }
    }

    fn dispatch(&self, event: StorageEvent) {
        // Callbacks run without the listener lock held so they may read the
        // area or register further listeners.
        let targets: Vec<Callback> = match self.listeners.lock() {
            Ok(listeners) => listeners
                .iter()
                .filter(|l| l.key == event.key && l.owner != event.writer)
                .map(|l| Arc::clone(&l.callback))
                .collect(),
            Err(_) => {
                warn!(key = %event.key, "listener registry poisoned; change not dispatched");
                return;
            }
        };

        debug!(key = %event.key, writer = event.writer, listeners = targets.len(), "storage change");
        for callback in targets {
            callback(&event);
        }
    }
}

/// Unregisters its listener on drop.
#[must_use = "the listener is removed as soon as the guard is dropped"]
pub struct ListenerGuard {
    area: Weak<StorageArea>,
    id: u64,
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        if let Some(area) = self.area.upgrade() {
            area.remove_listener(self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::AtomicUsize;
    use std::thread;

    #[test]
    fn test_writer_does_not_hear_itself() {
        let area = StorageArea::in_memory();
        let view_a = area.register_view();
        let view_b = area.register_view();
        assert_ne!(view_a, view_b);

        let heard_a = Arc::new(AtomicUsize::new(0));
        let heard_b = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&heard_a);
        let _guard_a = area.add_listener("k", view_a, move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        let counter = Arc::clone(&heard_b);
        let _guard_b = area.add_listener("k", view_b, move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        area.set_item("k", "[]", view_a).unwrap();
        assert_eq!(heard_a.load(Ordering::SeqCst), 0);
        assert_eq!(heard_b.load(Ordering::SeqCst), 1);

        area.set_item("other", "[]", EXTERNAL_WRITER).unwrap();
        assert_eq!(heard_b.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_event_carries_old_and_new_values() {
        let area = StorageArea::in_memory();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let _guard = area.add_listener("k", area.register_view(), move |event| {
            sink.lock().unwrap().push(event.clone());
        });

        area.set_item("k", "[1]", EXTERNAL_WRITER).unwrap();
        area.remove_item("k", EXTERNAL_WRITER).unwrap();
        area.remove_item("k", EXTERNAL_WRITER).unwrap();

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].old_value, None);
        assert_eq!(seen[0].new_value.as_deref(), Some("[1]"));
        assert_eq!(seen[1].old_value.as_deref(), Some("[1]"));
        assert_eq!(seen[1].new_value, None);
    }

    #[test]
    fn test_concurrent_writers_emit_chained_events() {
        let area = StorageArea::in_memory();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let _guard = area.add_listener("k", area.register_view(), move |event| {
            sink.lock().unwrap().push(event.clone());
        });

        const WRITES: usize = 200;
        thread::scope(|scope| {
            for writer in [area.register_view(), area.register_view()] {
                let area = &area;
                scope.spawn(move || {
                    for i in 0..WRITES {
                        area.set_item("k", &format!("{}-{}", writer, i), writer).unwrap();
                    }
                });
            }
        });

        // Dispatch order may interleave, but every old value must be the
        // new value of exactly one earlier write.
        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 2 * WRITES);
        let next: HashMap<Option<String>, Option<String>> = seen
            .iter()
            .map(|e| (e.old_value.clone(), e.new_value.clone()))
            .collect();
        assert_eq!(next.len(), 2 * WRITES);

        let mut current = None;
        let mut steps = 0;
        while let Some(following) = next.get(&current) {
            current = following.clone();
            steps += 1;
        }
        assert_eq!(steps, 2 * WRITES);
        assert_eq!(current, area.get_item("k").unwrap());
    }

    #[test]
    fn test_guard_drop_unregisters() {
        let area = StorageArea::in_memory();
        let guard = area.add_listener("k", area.register_view(), |_| {});
        assert_eq!(area.listener_count(), 1);
        drop(guard);
        assert_eq!(area.listener_count(), 0);
    }
}
