//! View projection: status filter, free-text search and pagination over a
//! store's records.

use crate::store::Record;

/// Status filter chip: everything, or one status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter<S> {
    #[default]
    All,
    Only(S),
}

impl<S: Copy + Eq> StatusFilter<S> {
    pub fn matches(&self, status: S) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => *wanted == status,
        }
    }
}

/// Explicit view state threaded into the projector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewQuery<S> {
    pub status: StatusFilter<S>,
    pub search: String,
    /// 1-based; out-of-range values are clamped.
    pub page: usize,
    pub page_size: usize,
}

impl<S> ViewQuery<S> {
    pub fn new(page_size: usize) -> Self {
        Self {
            status: StatusFilter::All,
            search: String::new(),
            page: 1,
            page_size,
        }
    }

    pub fn with_status(mut self, status: StatusFilter<S>) -> Self {
        self.status = status;
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_page(mut self, page: usize) -> Self {
        self.page = page;
        self
    }
}

/// One projected page.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewPage<R> {
    pub items: Vec<R>,
    /// Effective page after clamping.
    pub page: usize,
    pub total_pages: usize,
    pub page_size: usize,
    pub filtered_count: usize,
    pub total_count: usize,
    /// Set when no record passed the filters.
    pub placeholder: Option<&'static str>,
}

impl<R> ViewPage<R> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// Page indicator, e.g. `"Page 2 of 5"`.
    pub fn indicator(&self) -> String {
        format!("Page {} of {}", self.page, self.total_pages)
    }
}

/// Number of pages for `count` records, never less than one.
pub fn page_count(count: usize, page_size: usize) -> usize {
    let page_size = page_size.max(1);
    count.div_ceil(page_size).max(1)
}

/// Records passing the status filter and the search text, in store order.
pub fn filter_records<'a, R: Record>(
    records: &'a [R],
    status: &StatusFilter<R::Status>,
    search: &str,
) -> Vec<&'a R> {
    let needle = search.trim().to_lowercase();
    records
        .iter()
        .filter(|r| status.matches(r.status()))
        .filter(|r| needle.is_empty() || r.search_text().to_lowercase().contains(&needle))
        .collect()
}

/// Project the page requested by `query`.
pub fn project<R: Record>(records: &[R], query: &ViewQuery<R::Status>) -> ViewPage<R> {
    let filtered = filter_records(records, &query.status, &query.search);
    let page_size = query.page_size.max(1);
    let total_pages = page_count(filtered.len(), page_size);
    let page = query.page.clamp(1, total_pages);

    let start = ((page - 1) * page_size).min(filtered.len());
    let end = (page * page_size).min(filtered.len());
    let items: Vec<R> = filtered[start..end].iter().map(|r| (*r).clone()).collect();

    ViewPage {
        placeholder: filtered.is_empty().then_some(R::EMPTY_MESSAGE),
        items,
        page,
        total_pages,
        page_size,
        filtered_count: filtered.len(),
        total_count: records.len(),
    }
}
