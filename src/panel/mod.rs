//! Panels: a record store, its view state, and the handlers bound to the
//! host's controls.
//!
//! `Panel<R>` carries everything shared by both schemas (view state,
//! pagination, delete, bulk clear, cross-view refresh). The schema-specific
//! handlers live in `users` and `leads` as inherent impls on
//! `Panel<User>` and `Panel<Lead>`.

mod leads;
mod users;

pub use leads::{LeadPanel, LeadStats};
pub use users::{UserPanel, UserStats};

use crate::core::{PanelResult, Result};
use crate::storage::StorageArea;
use crate::store::{Record, RecordStore, Subscription};
use crate::view::{self, StatusFilter, ViewPage, ViewQuery};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info};

pub struct Panel<R: Record> {
    store: RecordStore<R>,
    query: ViewQuery<R::Status>,
    limit: Option<usize>,
    stale: Arc<AtomicBool>,
    _subscription: Subscription,
}

impl<R: Record> Panel<R> {
    fn build(
        area: Arc<StorageArea>,
        key: &str,
        page_size: usize,
        limit: Option<usize>,
    ) -> Self {
        let store = RecordStore::open(area, key);
        let stale = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&stale);
        let subscription = store.subscribe(move |_| flag.store(true, Ordering::SeqCst));
        Self {
            store,
            query: ViewQuery::new(page_size),
            limit,
            stale,
            _subscription: subscription,
        }
    }

    pub fn store(&self) -> &RecordStore<R> {
        &self.store
    }

    pub fn records(&self) -> &[R] {
        self.store.records()
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn query(&self) -> &ViewQuery<R::Status> {
        &self.query
    }

    pub fn find(&self, key: &str) -> Option<&R> {
        self.store.find(key)
    }

    /// Whether another view has written this panel's slot since the last load.
    pub fn is_stale(&self) -> bool {
        self.stale.load(Ordering::SeqCst)
    }

    /// Reload from storage if another view wrote since the last load.
    pub fn sync(&mut self) {
        if self.stale.swap(false, Ordering::SeqCst) {
            debug!(key = %self.store.key(), "reloading after external change");
            self.store.reload();
        }
    }

    /// Unconditionally reload from storage.
    pub fn refresh(&mut self) {
        self.stale.store(false, Ordering::SeqCst);
        self.store.reload();
    }

    pub fn set_filter(&mut self, status: StatusFilter<R::Status>) {
        self.query.status = status;
        self.query.page = 1;
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.query.search = search.into();
        self.query.page = 1;
    }

    pub fn go_to_page(&mut self, page: usize) {
        self.sync();
        self.query.page = page.clamp(1, self.total_pages());
    }

    pub fn next_page(&mut self) {
        self.go_to_page(self.query.page.saturating_add(1));
    }

    pub fn previous_page(&mut self) {
        self.go_to_page(self.query.page.saturating_sub(1));
    }

    /// Project the current page; the stored page index follows any clamping.
    pub fn render(&mut self) -> ViewPage<R> {
        self.sync();
        let page = view::project(self.store.records(), &self.query);
        self.query.page = page.page;
        page
    }

    /// Remove the record with `key`. A missing key is a no-op without a write.
    pub fn delete(&mut self, key: &str) -> PanelResult<bool> {
        self.sync();
        let Some(index) = self.store.position(key) else {
            debug!(key = %key, "delete of unknown record ignored");
            return Ok(false);
        };
        self.store.mutate(|records| {
            records.remove(index);
        })?;
        Ok(true)
    }

    /// Empty the store.
    pub fn clear_all(&mut self) -> PanelResult<()> {
        self.sync();
        let removed = self.store.mutate(|records| {
            let removed = records.len();
            records.clear();
            removed
        })?;
        info!(key = %self.store.key(), removed, "cleared all records");
        Ok(())
    }

    fn total_pages(&self) -> usize {
        let filtered = view::filter_records(self.store.records(), &self.query.status, &self.query.search);
        view::page_count(filtered.len(), self.query.page_size)
    }

    fn seed(&mut self, defaults: &[R]) -> Result<bool> {
        self.store.seed_if_empty(defaults)
    }

    /// Apply `f` to the record with `key` in place and persist.
    ///
    /// Returns `None` without writing when the key is gone.
    fn modify<T, F>(&mut self, key: &str, f: F) -> PanelResult<Option<T>>
    where
        F: FnOnce(&mut R) -> T,
    {
        self.sync();
        let Some(index) = self.store.position(key) else {
            debug!(key = %key, "update of unknown record ignored");
            return Ok(None);
        };
        let out = self.store.mutate(|records| f(&mut records[index]))?;
        Ok(Some(out))
    }
}
