//! Paginated search with incremental snapshots.
//!
//! A search is pulled page by page through a [`SearchPager`]. After every
//! page the pager yields a [`SearchSnapshot`] holding everything accumulated
//! so far. The first page is requested immediately; every later page waits
//! for the shared rate limiter.
//!
//! Failure handling:
//! - page 1 fails: one empty snapshot with [`SnapshotStatus::Failed`], then the end;
//! - page 1 answers "no matches": one empty [`SnapshotStatus::Complete`] snapshot;
//! - a later page fails: the failure is logged and the sequence ends, so
//!   consumers keep what they already received;
//! - a later page is empty: treated like a failed page, so the sequence
//!   always ends.

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc::UnboundedSender;

use crate::config;
use crate::connection::Connection;
use crate::error::{DeckBuilderError, Result};
use crate::models::{CardRecord, SearchFailure, SearchId, SearchPage, SearchSnapshot, SnapshotStatus};

// ---------------------------------------------------------------------------
// SearchOptions / SearchRequest
// ---------------------------------------------------------------------------

/// Server-side ordering of search results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ApiOrder {
    #[default]
    Name,
    Set,
    Released,
    Rarity,
    Color,
    Usd,
    Cmc,
    Edhrec,
}

impl ApiOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            ApiOrder::Name => "name",
            ApiOrder::Set => "set",
            ApiOrder::Released => "released",
            ApiOrder::Rarity => "rarity",
            ApiOrder::Color => "color",
            ApiOrder::Usd => "usd",
            ApiOrder::Cmc => "cmc",
            ApiOrder::Edhrec => "edhrec",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ApiDirection {
    #[default]
    Asc,
    Desc,
    Auto,
}

impl ApiDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            ApiDirection::Asc => "asc",
            ApiDirection::Desc => "desc",
            ApiDirection::Auto => "auto",
        }
    }
}

/// Which duplicates the API folds together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Unique {
    #[default]
    Cards,
    Art,
    Prints,
}

impl Unique {
    pub fn as_str(self) -> &'static str {
        match self {
            Unique::Cards => "cards",
            Unique::Art => "art",
            Unique::Prints => "prints",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SearchOptions {
    pub order: ApiOrder,
    pub dir: ApiDirection,
    pub unique: Unique,
}

/// A query bound to the id of the search run it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub id: SearchId,
    pub query: String,
    pub options: SearchOptions,
}

impl SearchRequest {
    pub fn new(id: SearchId, query: &str) -> Self {
        Self {
            id,
            query: query.trim().to_string(),
            options: SearchOptions::default(),
        }
    }

    pub fn with_options(mut self, options: SearchOptions) -> Self {
        self.options = options;
        self
    }

    fn params(&self, page: u32) -> Vec<(&'static str, String)> {
        vec![
            ("q", self.query.clone()),
            ("order", self.options.order.as_str().to_string()),
            ("dir", self.options.dir.as_str().to_string()),
            ("unique", self.options.unique.as_str().to_string()),
            ("page", page.to_string()),
        ]
    }
}

// ---------------------------------------------------------------------------
// SnapshotSink
// ---------------------------------------------------------------------------

/// Receives the snapshots of a running search.
pub trait SnapshotSink {
    fn on_snapshot(&mut self, snapshot: SearchSnapshot);
}

impl<F> SnapshotSink for F
where
    F: FnMut(SearchSnapshot),
{
    fn on_snapshot(&mut self, snapshot: SearchSnapshot) {
        self(snapshot)
    }
}

/// Forwards snapshots into an unbounded channel.
#[derive(Debug, Clone)]
pub struct ChannelSink(pub UnboundedSender<SearchSnapshot>);

impl SnapshotSink for ChannelSink {
    fn on_snapshot(&mut self, snapshot: SearchSnapshot) {
        if self.0.send(snapshot).is_err() {
            log::debug!("snapshot receiver dropped");
        }
    }
}

// ---------------------------------------------------------------------------
// SearchPager
// ---------------------------------------------------------------------------

/// Pull-based page loop for one [`SearchRequest`].
pub struct SearchPager<'a> {
    conn: &'a Connection,
    request: SearchRequest,
    page: u32,
    records: Vec<CardRecord>,
    total: usize,
    has_more: bool,
    finished: bool,
}

impl<'a> SearchPager<'a> {
    pub fn new(conn: &'a Connection, request: SearchRequest) -> Self {
        Self {
            conn,
            request,
            page: 1,
            records: Vec::new(),
            total: 0,
            has_more: false,
            finished: false,
        }
    }

    pub fn request(&self) -> &SearchRequest {
        &self.request
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Forget all progress; the next call to [`next`](Self::next) starts at page 1.
    pub fn restart(&mut self) {
        self.page = 1;
        self.records.clear();
        self.total = 0;
        self.has_more = false;
        self.finished = false;
    }

    fn more_pages(&self) -> bool {
        self.has_more && self.records.len() < self.total
    }

    async fn fetch_page(&self, page: u32) -> Result<SearchPage> {
        self.conn
            .get_json(config::SEARCH_PATH, &self.request.params(page))
            .await
    }

    fn snapshot(&self, status: SnapshotStatus) -> SearchSnapshot {
        SearchSnapshot {
            search_id: self.request.id,
            query: self.request.query.clone(),
            records: self.records.clone(),
            received: self.records.len(),
            total: self.total,
            status,
        }
    }

    /// Fetch the next page and return the updated snapshot, or `None` once
    /// the sequence has ended.
    pub async fn next(&mut self) -> Option<SearchSnapshot> {
        if self.finished {
            return None;
        }

        let first = self.page == 1;
        if !first {
            if !self.more_pages() {
                self.finished = true;
                return None;
            }
            self.conn.limiter().throttle().await;
        }

        match self.fetch_page(self.page).await {
            Ok(page) => {
                if first {
                    self.total = page.total_cards;
                } else if page.data.is_empty() {
                    log::warn!(
                        "{}: page {} was empty, stopping at {} of {} cards",
                        self.request.id,
                        self.page,
                        self.records.len(),
                        self.total
                    );
                    self.finished = true;
                    return None;
                }
                self.records.extend(page.data);
                self.records.truncate(self.total);
                self.has_more = page.has_more;
                self.page += 1;

                let status = if self.more_pages() {
                    SnapshotStatus::Partial
                } else {
                    self.finished = true;
                    SnapshotStatus::Complete
                };
                log::debug!(
                    "{}: {} of {} cards",
                    self.request.id,
                    self.records.len(),
                    self.total
                );
                Some(self.snapshot(status))
            }
            Err(e) if first => {
                self.finished = true;
                if e.is_empty_result() {
                    log::info!("{}: no cards match {:?}", self.request.id, self.request.query);
                    Some(SearchSnapshot::empty(
                        self.request.id,
                        &self.request.query,
                        SnapshotStatus::Complete,
                    ))
                } else {
                    log::warn!("{}: search failed: {}", self.request.id, e);
                    Some(SearchSnapshot::empty(
                        self.request.id,
                        &self.request.query,
                        SnapshotStatus::Failed(failure_from(&e)),
                    ))
                }
            }
            Err(e) => {
                log::warn!(
                    "{}: page {} failed, keeping {} of {} cards: {}",
                    self.request.id,
                    self.page,
                    self.records.len(),
                    self.total,
                    e
                );
                self.finished = true;
                None
            }
        }
    }
}

fn failure_from(err: &DeckBuilderError) -> SearchFailure {
    match err {
        DeckBuilderError::Api {
            status, details, ..
        } => SearchFailure::Status {
            status: *status,
            details: details.clone(),
        },
        DeckBuilderError::Status { status, url } => SearchFailure::Status {
            status: *status,
            details: url.clone(),
        },
        DeckBuilderError::Http(e) => match e.status() {
            Some(status) => SearchFailure::Status {
                status: status.as_u16(),
                details: e.to_string(),
            },
            None => SearchFailure::Network(e.to_string()),
        },
        other => SearchFailure::Network(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// PageFetcher
// ---------------------------------------------------------------------------

/// Runs searches against a [`Connection`].
pub struct PageFetcher<'a> {
    conn: &'a Connection,
}

impl<'a> PageFetcher<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// A lazy pager for `request`; nothing is fetched until it is polled.
    pub fn pager(&self, request: SearchRequest) -> SearchPager<'a> {
        SearchPager::new(self.conn, request)
    }

    /// Run `request` to the end, delivering every snapshot to `sink`.
    ///
    /// Returns the status of the last delivered snapshot. `Partial` means
    /// a later page failed and the search stopped early.
    pub async fn search<S>(&self, request: SearchRequest, sink: &mut S) -> SnapshotStatus
    where
        S: SnapshotSink + ?Sized,
    {
        log::info!("{}: searching {:?}", request.id, request.query);
        let mut pager = self.pager(request);
        let mut last = SnapshotStatus::Partial;
        while let Some(snapshot) = pager.next().await {
            last = snapshot.status.clone();
            sink.on_snapshot(snapshot);
        }
        last
    }

    /// Run `request` and return every record, propagating the first error.
    ///
    /// Unlike [`search`](Self::search) this is request/response: a failure
    /// on any page is an `Err`, and "no matches" is an empty vector.
    pub async fn collect(&self, request: &SearchRequest) -> Result<Vec<CardRecord>> {
        let mut records = Vec::new();
        let mut page = 1;
        let mut total = 0;
        loop {
            if page > 1 {
                self.conn.limiter().throttle().await;
            }
            let result: Result<SearchPage> = self
                .conn
                .get_json(config::SEARCH_PATH, &request.params(page))
                .await;
            let batch = match result {
                Ok(batch) => batch,
                Err(e) if page == 1 && e.is_empty_result() => return Ok(Vec::new()),
                Err(e) => return Err(e),
            };
            if page == 1 {
                total = batch.total_cards;
            } else if batch.data.is_empty() {
                log::warn!(
                    "{}: page {} was empty, stopping at {} of {} cards",
                    request.id,
                    page,
                    records.len(),
                    total
                );
                return Ok(records);
            }
            records.extend(batch.data);
            records.truncate(total);
            if !batch.has_more || records.len() >= total {
                return Ok(records);
            }
            page += 1;
        }
    }
}
