//! Request/response card queries built on the paginated search endpoint.

use serde::{Deserialize, Serialize};

use crate::connection::Connection;
use crate::error::Result;
use crate::fetcher::{PageFetcher, SearchOptions, SearchRequest, Unique};
use crate::models::{CardRecord, SearchId};
use crate::query::builder::quote;

// ---------------------------------------------------------------------------
// PriceSummary
// ---------------------------------------------------------------------------

/// Cheapest USD price (any finish) across a card's printings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PriceSummary {
    /// Cheapest price across all printings.
    Cheapest(Option<f64>),
    /// Flavor-named printings priced separately from standard ones.
    Split {
        flavor: Option<f64>,
        standard: Option<f64>,
    },
}

fn cheapest<'c, I>(printings: I) -> Option<f64>
where
    I: IntoIterator<Item = &'c CardRecord>,
{
    printings
        .into_iter()
        .filter_map(|c| c.prices.cheapest_usd())
        .min_by(|a, b| a.total_cmp(b))
}

/// Summarize prices of `printings` for `card`. Flavor-named cards get the
/// flavor and standard printings priced separately.
pub fn summarize_prices(card: &CardRecord, printings: &[CardRecord]) -> PriceSummary {
    if card.flavor_name.is_some() {
        PriceSummary::Split {
            flavor: cheapest(printings.iter().filter(|c| c.flavor_name.is_some())),
            standard: cheapest(printings.iter().filter(|c| c.flavor_name.is_none())),
        }
    } else {
        PriceSummary::Cheapest(cheapest(printings))
    }
}

// ---------------------------------------------------------------------------
// CardQuery
// ---------------------------------------------------------------------------

/// Query interface for whole-result card lookups.
///
/// Ids of requests issued here are always `SearchId(0)`; they never reach a
/// [`ResultStore`](crate::results::ResultStore).
pub struct CardQuery<'a> {
    conn: &'a Connection,
}

impl<'a> CardQuery<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Every card matching `query`. Errors on any page are returned.
    pub async fn search_all(&self, query: &str, options: SearchOptions) -> Result<Vec<CardRecord>> {
        let request = SearchRequest::new(SearchId(0), query).with_options(options);
        PageFetcher::new(self.conn).collect(&request).await
    }

    /// All printings of the card named `name`; for multi-faced names only
    /// the front face is used.
    pub async fn prints(&self, name: &str) -> Result<Vec<CardRecord>> {
        let front = name.split("//").next().unwrap_or(name).trim();
        let query = format!("!{}", quote(front));
        let options = SearchOptions {
            unique: Unique::Prints,
            ..SearchOptions::default()
        };
        self.search_all(&query, options).await
    }

    /// Look up `card`'s printings and summarize their prices.
    pub async fn price_summary(&self, card: &CardRecord) -> Result<PriceSummary> {
        let printings = self.prints(&card.name).await?;
        Ok(summarize_prices(card, &printings))
    }
}
