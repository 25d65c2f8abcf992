use serde::{Deserialize, Serialize};

use super::card::CardRecord;

// ---------------------------------------------------------------------------
// SearchPage — one page of `/cards/search`
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchPage {
    #[serde(default)]
    pub data: Vec<CardRecord>,
    #[serde(default)]
    pub total_cards: usize,
    #[serde(default)]
    pub has_more: bool,
    pub next_page: Option<String>,
}

// ---------------------------------------------------------------------------
// CatalogResponse — `/catalog/<name>`
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogResponse {
    #[serde(default)]
    pub data: Vec<String>,
}

// ---------------------------------------------------------------------------
// ApiErrorBody — error object returned with non-success statuses
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub status: u16,
    pub code: String,
    #[serde(default)]
    pub details: String,
}
