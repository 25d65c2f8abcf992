//! Facet counts derived from a result set.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::filters::{FacetCategory, FilterKey};
use crate::models::CardRecord;

/// Distinct values per category with the number of records matching each.
///
/// Always rebuilt from scratch with [`FacetIndex::from_records`]; there is
/// no way to edit it in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetIndex {
    types: BTreeMap<String, usize>,
    subtypes: BTreeMap<String, usize>,
    colors: BTreeMap<String, usize>,
    rarities: BTreeMap<String, usize>,
    sets: BTreeMap<String, usize>,
    legalities: BTreeMap<String, usize>,
}

impl FacetIndex {
    pub fn from_records(records: &[CardRecord]) -> Self {
        let mut index = FacetIndex::default();

        for card in records {
            let (types, subtypes) = split_type_line(&card.type_line);
            for t in types {
                index.types.entry(t).or_insert(0);
            }
            for s in subtypes {
                index.subtypes.entry(s).or_insert(0);
            }
            for c in card.colors() {
                index.colors.entry(c).or_insert(0);
            }
            if !card.rarity.is_empty() {
                index.rarities.entry(card.rarity.clone()).or_insert(0);
            }
            if !card.set_name.is_empty() {
                index.sets.entry(card.set_name.clone()).or_insert(0);
            }
            for (format, status) in &card.legalities {
                if status == "legal" {
                    index.legalities.entry(format.clone()).or_insert(0);
                }
            }
        }

        // Counts use the same predicate as the secondary filters so a
        // facet's count is what selecting it would leave.
        for category in FacetCategory::ALL {
            for (value, count) in index.category_mut(category).iter_mut() {
                *count = records
                    .iter()
                    .filter(|card| category.matches(card, value))
                    .count();
            }
        }

        index
    }

    pub fn category(&self, category: FacetCategory) -> &BTreeMap<String, usize> {
        match category {
            FacetCategory::Types => &self.types,
            FacetCategory::Subtypes => &self.subtypes,
            FacetCategory::Colors => &self.colors,
            FacetCategory::Rarities => &self.rarities,
            FacetCategory::Sets => &self.sets,
            FacetCategory::Legalities => &self.legalities,
        }
    }

    fn category_mut(&mut self, category: FacetCategory) -> &mut BTreeMap<String, usize> {
        match category {
            FacetCategory::Types => &mut self.types,
            FacetCategory::Subtypes => &mut self.subtypes,
            FacetCategory::Colors => &mut self.colors,
            FacetCategory::Rarities => &mut self.rarities,
            FacetCategory::Sets => &mut self.sets,
            FacetCategory::Legalities => &mut self.legalities,
        }
    }

    pub fn types(&self) -> &BTreeMap<String, usize> {
        &self.types
    }

    pub fn subtypes(&self) -> &BTreeMap<String, usize> {
        &self.subtypes
    }

    pub fn colors(&self) -> &BTreeMap<String, usize> {
        &self.colors
    }

    pub fn rarities(&self) -> &BTreeMap<String, usize> {
        &self.rarities
    }

    pub fn sets(&self) -> &BTreeMap<String, usize> {
        &self.sets
    }

    pub fn legalities(&self) -> &BTreeMap<String, usize> {
        &self.legalities
    }

    /// Every facet value as a filter key, category by category.
    pub fn keys(&self) -> Vec<FilterKey> {
        FacetCategory::ALL
            .into_iter()
            .flat_map(|cat| self.category(cat).keys().map(move |v| FilterKey::new(cat, v)))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        FacetCategory::ALL
            .into_iter()
            .all(|cat| self.category(cat).is_empty())
    }
}

/// Split a type line into type words and subtype words.
///
/// Multi-faced lines (`A — B // C — D`) are split per face. Words are
/// returned once each, in order of first appearance.
pub fn split_type_line(type_line: &str) -> (Vec<String>, Vec<String>) {
    let mut types: Vec<String> = Vec::new();
    let mut subtypes: Vec<String> = Vec::new();

    for face in type_line.split("//") {
        let (left, right) = match face.split_once('—') {
            Some((l, r)) => (l, r),
            None => (face, ""),
        };
        for word in left.split_whitespace() {
            if !types.iter().any(|t| t == word) {
                types.push(word.to_string());
            }
        }
        for word in right.split_whitespace() {
            if !subtypes.iter().any(|s| s == word) {
                subtypes.push(word.to_string());
            }
        }
    }

    (types, subtypes)
}
