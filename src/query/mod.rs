//! Turns filter selections into a single search-API query string.
//!
//! Each filter category lives in its own sub-builder implementing
//! [`ClauseSource`]. [`QuerySelection`] owns one of each and joins their
//! clauses with single spaces (implicit AND); categories with nothing
//! selected contribute nothing.

pub mod builder;
pub mod identity;
pub mod mana;
pub mod mechanics;
pub mod price;
pub mod text;
pub mod types;

pub use builder::QueryBuilder;
pub use identity::IdentityFilter;
pub use mana::{CostToken, ExactCostFilter, ManaFilter};
pub use mechanics::MechanicFilter;
pub use price::PriceFilter;
pub use text::{TextFilter, TextMode};
pub use types::{TypeFilter, TypeGroupId, TypeTag};

use serde::{Deserialize, Serialize};

/// A filter category that may contribute one clause to the query.
pub trait ClauseSource {
    /// The clause for the current selection, or `None` when nothing is selected.
    fn clause(&self) -> Option<String>;
}

/// Whether a filter demands an exact match or only containment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MatchMode {
    Exact,
    #[default]
    Including,
}

impl MatchMode {
    pub fn toggle(self) -> Self {
        match self {
            MatchMode::Exact => MatchMode::Including,
            MatchMode::Including => MatchMode::Exact,
        }
    }

    /// Comparison operator for cost and identity conditions.
    pub fn operator(self) -> &'static str {
        match self {
            MatchMode::Exact => "=",
            MatchMode::Including => ">=",
        }
    }
}

// ---------------------------------------------------------------------------
// QuerySelection
// ---------------------------------------------------------------------------

/// All filter state used to build a search query.
#[derive(Debug, Clone, Default)]
pub struct QuerySelection {
    /// Free-form query typed into the main search box, passed through verbatim.
    pub raw: Option<String>,
    pub text: TextFilter,
    pub types: TypeFilter,
    pub mana: ManaFilter,
    pub identity: IdentityFilter,
    pub cost: ExactCostFilter,
    pub price: PriceFilter,
    pub mechanics: MechanicFilter,
}

impl QuerySelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the full query string. Empty when nothing is selected.
    pub fn build(&self) -> String {
        build_query(self)
    }

    /// Reset every category to its empty state.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    fn sources(&self) -> [&dyn ClauseSource; 7] {
        [
            &self.text,
            &self.types,
            &self.mana,
            &self.identity,
            &self.cost,
            &self.price,
            &self.mechanics,
        ]
    }
}

/// Build a query string from a selection.
pub fn build_query(selection: &QuerySelection) -> String {
    let mut qb = QueryBuilder::new();
    if let Some(ref raw) = selection.raw {
        qb.term(raw);
    }
    for source in selection.sources() {
        if let Some(clause) = source.clause() {
            qb.term(&clause);
        }
    }
    let query = qb.build();
    log::debug!("built query: {}", query);
    query
}
