use crate::fetcher::{SearchOptions, SearchRequest, SnapshotSink};
use crate::models::{CardRecord, SearchId, SearchSnapshot, SnapshotStatus};

use super::facets::FacetIndex;
use super::filters::{FilterKey, FilterState, SecondaryFilterState};
use super::sort::{self, SortDirection, SortKey};

/// The current search's records plus the derived facet, filter and sort
/// state that produce the visible view.
///
/// Only snapshots of the search started last by
/// [`begin_search`](Self::begin_search) are accepted.
#[derive(Debug, Default)]
pub struct ResultStore {
    last_id: u64,
    current: Option<SearchId>,
    query: String,
    records: Vec<CardRecord>,
    total: usize,
    status: Option<SnapshotStatus>,
    facets: FacetIndex,
    filters: SecondaryFilterState,
    sort_key: SortKey,
    direction: SortDirection,
    view: Vec<usize>,
}

impl ResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new search: allocate its id, drop the previous results, and
    /// return the request to hand to the fetcher. Filters and sort survive.
    pub fn begin_search(&mut self, query: &str, options: SearchOptions) -> SearchRequest {
        self.last_id += 1;
        let request = SearchRequest::new(SearchId(self.last_id), query).with_options(options);
        self.current = Some(request.id);
        self.query = request.query.clone();
        self.records.clear();
        self.total = 0;
        self.status = None;
        self.refresh();
        log::debug!("{}: began {:?}", request.id, request.query);
        request
    }

    /// Apply a snapshot. Returns `false` (and changes nothing) when it
    /// belongs to a search other than the current one.
    pub fn ingest(&mut self, snapshot: SearchSnapshot) -> bool {
        match self.current {
            Some(current) if current != snapshot.search_id => {
                log::debug!(
                    "discarding snapshot of {} while {} is current",
                    snapshot.search_id,
                    current
                );
                return false;
            }
            Some(_) => {}
            None => self.current = Some(snapshot.search_id),
        }

        if let SnapshotStatus::Failed(ref failure) = snapshot.status {
            log::warn!("{}: {}", snapshot.search_id, failure);
        }

        self.query = snapshot.query;
        self.total = snapshot.total;
        self.records = snapshot.records;
        self.records.truncate(self.total);
        self.status = Some(snapshot.status);
        self.refresh();
        true
    }

    fn refresh(&mut self) {
        self.facets = FacetIndex::from_records(&self.records);
        self.rebuild_view();
    }

    fn rebuild_view(&mut self) {
        let records = &self.records;
        let filters = &self.filters;
        let mut view: Vec<usize> = (0..records.len())
            .filter(|&i| filters.matches(&records[i]))
            .collect();
        let (key, direction) = (self.sort_key, self.direction);
        view.sort_by(|&a, &b| sort::compare(key, direction, &records[a], &records[b]));
        self.view = view;
    }

    // -- accessors ---------------------------------------------------------

    pub fn current_search(&self) -> Option<SearchId> {
        self.current
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// All records of the current search, in arrival order.
    pub fn records(&self) -> &[CardRecord] {
        &self.records
    }

    /// Filtered and sorted records.
    pub fn view(&self) -> Vec<&CardRecord> {
        self.view.iter().map(|&i| &self.records[i]).collect()
    }

    pub fn view_len(&self) -> usize {
        self.view.len()
    }

    pub fn received(&self) -> usize {
        self.records.len()
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// Status of the last accepted snapshot; `None` before the first one.
    pub fn status(&self) -> Option<&SnapshotStatus> {
        self.status.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.current.is_some() && matches!(self.status, None | Some(SnapshotStatus::Partial))
    }

    pub fn facets(&self) -> &FacetIndex {
        &self.facets
    }

    pub fn filters(&self) -> &SecondaryFilterState {
        &self.filters
    }

    pub fn filter_state(&self, key: &FilterKey) -> Option<FilterState> {
        self.filters.get(key)
    }

    // -- sort --------------------------------------------------------------

    pub fn sort_key(&self) -> SortKey {
        self.sort_key
    }

    pub fn direction(&self) -> SortDirection {
        self.direction
    }

    pub fn set_sort(&mut self, key: SortKey) {
        self.sort_key = key;
        self.rebuild_view();
    }

    pub fn set_direction(&mut self, direction: SortDirection) {
        self.direction = direction;
        self.rebuild_view();
    }

    pub fn toggle_direction(&mut self) -> SortDirection {
        self.direction = self.direction.toggle();
        self.rebuild_view();
        self.direction
    }

    // -- secondary filters -------------------------------------------------

    pub fn include(&mut self, key: FilterKey) {
        self.filters.include(key);
        self.rebuild_view();
    }

    pub fn exclude(&mut self, key: FilterKey) {
        self.filters.exclude(key);
        self.rebuild_view();
    }

    pub fn remove_filter(&mut self, key: &FilterKey) {
        if self.filters.remove(key).is_some() {
            self.rebuild_view();
        }
    }

    pub fn clear_filters(&mut self) {
        self.filters.clear();
        self.rebuild_view();
    }
}

impl SnapshotSink for ResultStore {
    fn on_snapshot(&mut self, snapshot: SearchSnapshot) {
        self.ingest(snapshot);
    }
}
