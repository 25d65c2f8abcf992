use std::fmt;

use serde::{Deserialize, Serialize};

use super::card::CardRecord;

// ---------------------------------------------------------------------------
// SearchId — identifies one search run
// ---------------------------------------------------------------------------

/// Identifier of a search run. Snapshots carry the id of the search that
/// produced them so consumers can drop results of superseded searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SearchId(pub u64);

impl fmt::Display for SearchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "search#{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// SearchFailure / SnapshotStatus
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchFailure {
    /// The request could not be sent or the body could not be read.
    Network(String),
    /// The API answered with a non-success status.
    Status { status: u16, details: String },
}

impl fmt::Display for SearchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchFailure::Network(msg) => write!(f, "network failure: {}", msg),
            SearchFailure::Status { status, details } => {
                write!(f, "request failed with status {}: {}", status, details)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SnapshotStatus {
    /// More pages are expected.
    Partial,
    /// Last snapshot of a search that ran to the end (possibly with no matches).
    Complete,
    /// The search failed before any result arrived.
    Failed(SearchFailure),
}

// ---------------------------------------------------------------------------
// SearchSnapshot — progress message emitted by the fetcher
// ---------------------------------------------------------------------------

/// Everything accumulated so far by one search, emitted after each page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchSnapshot {
    pub search_id: SearchId,
    pub query: String,
    pub records: Vec<CardRecord>,
    pub received: usize,
    pub total: usize,
    pub status: SnapshotStatus,
}

impl SearchSnapshot {
    /// The single empty snapshot that ends a search which produced nothing.
    pub fn empty(search_id: SearchId, query: &str, status: SnapshotStatus) -> Self {
        Self {
            search_id,
            query: query.to_string(),
            records: Vec::new(),
            received: 0,
            total: 0,
            status,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.status, SnapshotStatus::Failed(_))
    }

    pub fn is_final(&self) -> bool {
        !matches!(self.status, SnapshotStatus::Partial)
    }
}
