//! Client-side secondary filters keyed by `category:value`.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DeckBuilderError;
use crate::models::CardRecord;

// ---------------------------------------------------------------------------
// FacetCategory
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FacetCategory {
    Types,
    Subtypes,
    Colors,
    Rarities,
    Sets,
    Legalities,
}

impl FacetCategory {
    pub const ALL: [FacetCategory; 6] = [
        FacetCategory::Types,
        FacetCategory::Subtypes,
        FacetCategory::Colors,
        FacetCategory::Rarities,
        FacetCategory::Sets,
        FacetCategory::Legalities,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FacetCategory::Types => "types",
            FacetCategory::Subtypes => "subtypes",
            FacetCategory::Colors => "colors",
            FacetCategory::Rarities => "rarities",
            FacetCategory::Sets => "sets",
            FacetCategory::Legalities => "legalities",
        }
    }

    /// Whether `card` matches `value` in this category.
    pub fn matches(self, card: &CardRecord, value: &str) -> bool {
        match self {
            FacetCategory::Types | FacetCategory::Subtypes => card.type_line.contains(value),
            FacetCategory::Colors => card.colors().iter().any(|c| c == value),
            FacetCategory::Rarities => card.rarity == value,
            FacetCategory::Sets => card.set_name == value,
            FacetCategory::Legalities => card.is_legal_in(value),
        }
    }
}

impl fmt::Display for FacetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FacetCategory {
    type Err = DeckBuilderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FacetCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| DeckBuilderError::InvalidArgument(format!("Unknown facet category: {}", s)))
    }
}

// ---------------------------------------------------------------------------
// FilterKey
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FilterKey {
    pub category: FacetCategory,
    pub value: String,
}

impl FilterKey {
    pub fn new(category: FacetCategory, value: &str) -> Self {
        Self {
            category,
            value: value.to_string(),
        }
    }

    pub fn matches(&self, card: &CardRecord) -> bool {
        self.category.matches(card, &self.value)
    }
}

impl fmt::Display for FilterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.category, self.value)
    }
}

impl FromStr for FilterKey {
    type Err = DeckBuilderError;

    /// Parse `category:value`; the value may itself contain colons.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (category, value) = s
            .split_once(':')
            .ok_or_else(|| DeckBuilderError::InvalidArgument(format!("Expected category:value, got {}", s)))?;
        Ok(FilterKey::new(category.parse()?, value))
    }
}

// ---------------------------------------------------------------------------
// SecondaryFilterState
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterState {
    Included,
    Excluded,
}

/// Active `category:value` constraints. A card passes when it matches every
/// included key and none of the excluded ones.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SecondaryFilterState {
    entries: BTreeMap<FilterKey, FilterState>,
}

impl SecondaryFilterState {
    pub fn include(&mut self, key: FilterKey) {
        self.entries.insert(key, FilterState::Included);
    }

    pub fn exclude(&mut self, key: FilterKey) {
        self.entries.insert(key, FilterState::Excluded);
    }

    pub fn remove(&mut self, key: &FilterKey) -> Option<FilterState> {
        self.entries.remove(key)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn get(&self, key: &FilterKey) -> Option<FilterState> {
        self.entries.get(key).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&FilterKey, FilterState)> {
        self.entries.iter().map(|(k, s)| (k, *s))
    }

    pub fn matches(&self, card: &CardRecord) -> bool {
        self.entries.iter().all(|(key, state)| match state {
            FilterState::Included => key.matches(card),
            FilterState::Excluded => !key.matches(card),
        })
    }

    /// Cards passing every constraint, in their original order.
    pub fn apply<'c>(&self, cards: &'c [CardRecord]) -> Vec<&'c CardRecord> {
        cards.iter().filter(|c| self.matches(c)).collect()
    }
}
