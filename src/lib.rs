//! Card search and deck-building SDK for the Scryfall API.
//!
//! Turns filter selections into search-API queries, pages through the
//! results under a shared sliding-window rate limit, and keeps the current
//! search's records with client-side facets, filters and sorting.
//!
//! # Quick start
//!
//! ```no_run
//! use mtg_deckbuilder::query::QuerySelection;
//! use mtg_deckbuilder::results::ResultStore;
//! use mtg_deckbuilder::{Color, DeckBuilderSdk};
//!
//! # async fn run() -> mtg_deckbuilder::Result<()> {
//! let sdk = DeckBuilderSdk::builder().build()?;
//!
//! let mut selection = QuerySelection::new();
//! selection.identity.select(Color::G);
//! selection.types.add("Elf");
//!
//! let mut store = ResultStore::new();
//! sdk.search_into(&mut store, &selection.build(), Default::default()).await;
//! for card in store.view() {
//!     println!("{}", card.display_name());
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod connection;
pub mod deck;
pub mod error;
pub mod fetcher;
pub mod models;
pub mod queries;
pub mod query;
pub mod rate_limiter;
pub mod results;

pub use connection::Connection;
pub use deck::DeckBuilder;
pub use error::{DeckBuilderError, Result};
pub use fetcher::{PageFetcher, SearchOptions, SearchPager, SearchRequest, SnapshotSink};
pub use models::{CardRecord, Color, SearchId, SearchSnapshot, SnapshotStatus};
pub use query::QueryBuilder;
pub use rate_limiter::RateLimiter;
pub use results::ResultStore;

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;

// ---------------------------------------------------------------------------
// DeckBuilderSdkBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`DeckBuilderSdk`].
///
/// Use [`DeckBuilderSdk::builder()`] to obtain one, chain configuration
/// methods, and call [`build()`](DeckBuilderSdkBuilder::build).
pub struct DeckBuilderSdkBuilder {
    base_url: String,
    timeout: Duration,
    max_requests: usize,
    time_window: Duration,
    limiter: Option<Arc<RateLimiter>>,
}

impl Default for DeckBuilderSdkBuilder {
    fn default() -> Self {
        Self {
            base_url: config::API_BASE.to_string(),
            timeout: config::DEFAULT_TIMEOUT,
            max_requests: config::DEFAULT_MAX_REQUESTS,
            time_window: config::DEFAULT_TIME_WINDOW,
            limiter: None,
        }
    }
}

impl DeckBuilderSdkBuilder {
    /// Point the SDK at another API host (a mock server in tests).
    pub fn base_url(mut self, url: &str) -> Self {
        self.base_url = url.to_string();
        self
    }

    /// HTTP request timeout. Defaults to 30 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Admit at most `max_requests` throttled requests per `time_window`.
    ///
    /// Defaults to 10 per second. Ignored when
    /// [`rate_limiter`](Self::rate_limiter) supplies a shared limiter.
    pub fn rate_limit(mut self, max_requests: usize, time_window: Duration) -> Self {
        self.max_requests = max_requests;
        self.time_window = time_window;
        self
    }

    /// Share an existing limiter, e.g. between several SDK instances.
    pub fn rate_limiter(mut self, limiter: Arc<RateLimiter>) -> Self {
        self.limiter = Some(limiter);
        self
    }

    /// Build the SDK. No request is made until a query runs.
    pub fn build(self) -> Result<DeckBuilderSdk> {
        let limiter = self
            .limiter
            .unwrap_or_else(|| Arc::new(RateLimiter::new(self.max_requests, self.time_window)));
        let conn = Connection::new(&self.base_url, self.timeout, limiter)?;
        Ok(DeckBuilderSdk { conn })
    }
}

// ---------------------------------------------------------------------------
// DeckBuilderSdk
// ---------------------------------------------------------------------------

/// The main entry point.
///
/// Wraps a [`Connection`] (HTTP client plus shared rate limiter) and hands
/// out lightweight borrowing query interfaces.
pub struct DeckBuilderSdk {
    conn: Connection,
}

impl DeckBuilderSdk {
    pub fn builder() -> DeckBuilderSdkBuilder {
        DeckBuilderSdkBuilder::default()
    }

    // -- Query accessors ---------------------------------------------------

    /// Whole-result card lookups (printings, prices).
    pub fn cards(&self) -> queries::cards::CardQuery<'_> {
        queries::cards::CardQuery::new(&self.conn)
    }

    /// Catalog vocabularies.
    pub fn catalogs(&self) -> queries::catalogs::CatalogQuery<'_> {
        queries::catalogs::CatalogQuery::new(&self.conn)
    }

    /// Paginated search with incremental snapshots.
    pub fn fetcher(&self) -> PageFetcher<'_> {
        PageFetcher::new(&self.conn)
    }

    // -- Searches ------------------------------------------------------------

    /// Start a new search in `store` and run it to the end, feeding every
    /// snapshot into the store.
    pub async fn search_into(
        &self,
        store: &mut ResultStore,
        query: &str,
        options: SearchOptions,
    ) -> SnapshotStatus {
        let request = store.begin_search(query, options);
        self.fetcher().search(request, store).await
    }

    /// Run `request` on a background task and stream its snapshots.
    ///
    /// The channel closes after the last snapshot. Must be called from
    /// within a Tokio runtime.
    pub fn search_stream(&self, request: SearchRequest) -> mpsc::UnboundedReceiver<SearchSnapshot> {
        let (tx, rx) = mpsc::unbounded_channel();
        let conn = self.conn.clone();
        tokio::spawn(async move {
            let mut sink = fetcher::ChannelSink(tx);
            PageFetcher::new(&conn).search(request, &mut sink).await;
        });
        rx
    }

    // -- Accessors -----------------------------------------------------------

    pub fn rate_limiter(&self) -> &Arc<RateLimiter> {
        self.conn.limiter()
    }

    /// Return a reference to the underlying [`Connection`] for advanced usage.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl fmt::Display for DeckBuilderSdk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let limiter = self.conn.limiter();
        write!(
            f,
            "DeckBuilderSdk(base_url={}, rate_limit={}/{:?})",
            self.conn.base_url(),
            limiter.max_requests(),
            limiter.time_window()
        )
    }
}
