//! The stateful query engine behind one list view.
//!
//! [`QueryEngine`] owns the view state (filters, raw search text, sort key,
//! page) and derives everything else from it:
//!
//! ```text
//! raw search ──▶ Debouncer ──▶ effective filters ─┐
//! facets ─────────────────────────────────────────┼─▶ filter + sort ─▶ paginate ─▶ snapshot
//! sort key ───────────────────────────────────────┘        (memoized)
//! ```
//!
//! The filtered and sorted result is memoized on the source collection, the
//! effective filters and the sort key. Page changes and raw keystrokes never
//! recompute it. Whenever it is recomputed the page goes back to 1.

use std::rc::Rc;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use vitrine_seeker::{clamp_page, paginate, total_pages, Query};

use crate::config::Config;
use crate::debounce::{Clock, Debouncer, SystemClock};
use crate::error::{LoadError, Result, ViewError};
use crate::filters::{search_clauses, FilterSpec};
use crate::sort::{Listing, SortKey};

/// Single-shot load of a view's source collection.
#[derive(Debug)]
pub enum LoadState<T> {
    Pending,
    Ready(Arc<[T]>),
    Failed(LoadError),
}

impl<T> LoadState<T> {
    pub fn from_result(result: Result<Vec<T>>) -> Self {
        match result {
            Ok(records) => LoadState::Ready(records.into()),
            Err(err) => LoadState::Failed(err),
        }
    }

    /// Settles a pending load. A state that already settled is left alone.
    ///
    /// Returns `true` if the state changed.
    pub fn resolve(&mut self, result: Result<Vec<T>>) -> bool {
        if !self.is_pending() {
            warn!("ignoring a second resolution of an already settled load");
            return false;
        }
        *self = LoadState::from_result(result);
        true
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, LoadState::Pending)
    }

    /// The loaded records; empty while pending or after a failure.
    pub fn collection(&self) -> &[T] {
        match self {
            LoadState::Ready(records) => records,
            LoadState::Pending | LoadState::Failed(_) => &[],
        }
    }

    pub fn error(&self) -> Option<&LoadError> {
        match self {
            LoadState::Failed(err) => Some(err),
            _ => None,
        }
    }
}

impl<T> From<Result<Vec<T>>> for LoadState<T> {
    fn from(result: Result<Vec<T>>) -> Self {
        LoadState::from_result(result)
    }
}

/// The serializable part of a list view: everything needed to rebuild it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewState<F> {
    /// Facet selections; `filters.search()` is the raw, undebounced text.
    pub filters: F,
    pub sort: SortKey,
    pub page: usize,
}

/// What the hosting view should render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ViewStatus {
    Loading,
    /// The collection failed to load; it is shown as empty.
    Failed,
    /// The collection loaded but holds no records.
    Empty,
    /// Filters or search match nothing; offer to clear them.
    NoResults,
    Results,
}

/// One rendered page of a list view.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListSnapshot<'a, T> {
    pub items: Vec<&'a T>,
    pub result_count: usize,
    pub total_count: usize,
    pub current_page: usize,
    pub total_pages: usize,
    pub page_size: usize,
    pub has_next: bool,
    pub has_previous: bool,
    pub has_active_filters: bool,
    pub status: ViewStatus,
}

#[derive(Debug)]
struct Memo<F> {
    generation: u64,
    filters: F,
    sort: SortKey,
    indices: Vec<usize>,
}

/// Filter, search, sort and pagination state for one list of `T`.
pub struct QueryEngine<T: Listing> {
    source: LoadState<T>,
    generation: u64,
    state: ViewState<T::Filters>,
    search: Debouncer<String>,
    page_size: usize,
    clock: Rc<dyn Clock>,
    memo: Memo<T::Filters>,
    revision: u64,
}

impl<T: Listing> QueryEngine<T> {
    pub fn new(source: LoadState<T>, config: &Config, clock: Rc<dyn Clock>) -> Self {
        let state = ViewState {
            filters: T::Filters::default(),
            sort: T::DEFAULT_SORT,
            page: 1,
        };
        let memo = Memo {
            generation: 0,
            filters: state.filters.clone(),
            sort: state.sort,
            indices: Vec::new(),
        };
        let mut engine = QueryEngine {
            source,
            generation: 0,
            state,
            search: Debouncer::new(String::new(), config.search_debounce()),
            page_size: T::list_config(config).page_size.max(1),
            clock,
            memo,
            revision: 0,
        };
        engine.warn_if_failed();
        engine.recompute();
        engine
    }

    pub fn with_system_clock(source: LoadState<T>, config: &Config) -> Self {
        QueryEngine::new(source, config, Rc::new(SystemClock))
    }

    // ========================================================================
    // State changes
    // ========================================================================

    /// Records raw search input. The result follows once the input settles
    /// (see [`tick`](Self::tick)).
    pub fn set_search_term(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.search.push(text.clone(), self.clock.now());
        self.state.filters.set_search(text);
    }

    /// Lets a settled search term through. Returns `true` if the result changed.
    pub fn tick(&mut self) -> bool {
        match self.search.poll(self.clock.now()) {
            Some(_) => self.refresh(),
            None => false,
        }
    }

    /// Applies pending search input without waiting.
    pub fn flush_search(&mut self) -> bool {
        match self.search.flush() {
            Some(_) => self.refresh(),
            None => false,
        }
    }

    pub fn set_facet<S: AsRef<str>>(&mut self, name: &str, values: &[S]) -> Result<(), ViewError> {
        self.state.filters.set_facet(name, values)?;
        self.refresh();
        Ok(())
    }

    pub fn set_sort_key(&mut self, key: SortKey) -> Result<(), ViewError> {
        T::check_sort(key)?;
        self.state.sort = key;
        self.refresh();
        Ok(())
    }

    /// Moves to page `page`, clamped into the valid range.
    pub fn set_page(&mut self, page: usize) {
        let total = self.total_pages();
        let clamped = clamp_page(page, total);
        if clamped != page {
            debug!(kind = T::KIND, requested = page, page = clamped, total, "clamped page");
        }
        self.state.page = clamped;
    }

    pub fn next_page(&mut self) {
        self.set_page(self.state.page.saturating_add(1));
    }

    pub fn previous_page(&mut self) {
        self.set_page(self.state.page.saturating_sub(1));
    }

    /// Drops every facet and the search text, pending input included.
    pub fn clear_filters(&mut self) {
        self.state.filters.clear();
        self.search.replace(String::new());
        self.refresh();
    }

    /// Swaps the source collection.
    pub fn set_source(&mut self, source: LoadState<T>) {
        self.source = source;
        self.generation += 1;
        self.warn_if_failed();
        self.refresh();
    }

    /// Settles a pending load; later calls are ignored.
    pub fn resolve(&mut self, result: Result<Vec<T>>) {
        if self.source.resolve(result) {
            self.generation += 1;
            self.warn_if_failed();
            self.refresh();
        }
    }

    /// Rebuilds the view from a saved state. The search text applies at once.
    pub fn restore(&mut self, state: ViewState<T::Filters>) -> Result<(), ViewError> {
        T::check_sort(state.sort)?;
        self.search.replace(state.filters.search().to_string());
        self.state.filters = state.filters;
        self.state.sort = state.sort;
        self.refresh();
        self.set_page(state.page);
        Ok(())
    }

    /// Tears the view down: pending search input is dropped and never applied.
    pub fn unmount(&mut self) {
        self.search.cancel();
    }

    // ========================================================================
    // Reads
    // ========================================================================

    pub fn state(&self) -> &ViewState<T::Filters> {
        &self.state
    }

    pub fn source(&self) -> &LoadState<T> {
        &self.source
    }

    /// The debounced search term currently applied.
    pub fn effective_search(&self) -> &str {
        self.search.current()
    }

    pub fn is_search_pending(&self) -> bool {
        self.search.is_pending()
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Number of times the result has been recomputed.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn result_count(&self) -> usize {
        self.memo.indices.len()
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.memo.indices.len(), self.page_size)
    }

    /// Every matching record in display order, across all pages.
    pub fn results(&self) -> Vec<&T> {
        let records = self.source.collection();
        self.memo.indices.iter().map(|&index| &records[index]).collect()
    }

    pub fn snapshot(&self) -> ListSnapshot<'_, T> {
        let records = self.source.collection();
        let window = paginate(&self.memo.indices, self.page_size, self.state.page);
        let result_count = self.memo.indices.len();
        let status = match &self.source {
            LoadState::Pending => ViewStatus::Loading,
            LoadState::Failed(_) => ViewStatus::Failed,
            LoadState::Ready(_) if records.is_empty() => ViewStatus::Empty,
            LoadState::Ready(_) if result_count == 0 => ViewStatus::NoResults,
            LoadState::Ready(_) => ViewStatus::Results,
        };

        ListSnapshot {
            items: window.items.iter().map(|&index| &records[index]).collect(),
            result_count,
            total_count: records.len(),
            current_page: window.current_page,
            total_pages: window.total_pages,
            page_size: window.page_size,
            has_next: window.has_next,
            has_previous: window.has_previous,
            has_active_filters: self.memo.filters.is_active(),
            status,
        }
    }

    // ========================================================================
    // Derivation
    // ========================================================================

    fn effective_filters(&self) -> T::Filters {
        let mut filters = self.state.filters.clone();
        filters.set_search(self.search.current().clone());
        filters
    }

    /// Recomputes the result if its inputs changed. Returns `true` if it did.
    fn refresh(&mut self) -> bool {
        let filters = self.effective_filters();
        if self.memo.generation == self.generation
            && self.memo.sort == self.state.sort
            && self.memo.filters == filters
        {
            return false;
        }
        self.memo.filters = filters;
        self.recompute();
        true
    }

    fn recompute(&mut self) {
        let filters = &self.memo.filters;
        let query = search_clauses(filters.apply(Query::new()), filters.search(), T::SEARCH_FIELDS)
            .ordered(T::orderings(self.state.sort));
        self.memo.indices = query.filter_indices(self.source.collection(), T::accessor);
        self.memo.generation = self.generation;
        self.memo.sort = self.state.sort;
        self.state.page = 1;
        self.revision += 1;
        debug!(
            kind = T::KIND,
            revision = self.revision,
            results = self.memo.indices.len(),
            total = self.source.collection().len(),
            sort = %self.state.sort,
            "recomputed list"
        );
    }

    fn warn_if_failed(&self) {
        if let Some(err) = self.source.error() {
            warn!(kind = T::KIND, error = %err, "load failed, showing an empty list");
        }
    }
}
