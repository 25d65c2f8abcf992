use std::collections::BTreeSet;

use super::builder::QueryBuilder;
use super::{ClauseSource, MatchMode};
use crate::models::{color_string, Color};

/// Color identity selection.
///
/// Exact mode asks for the identity to equal the selection; including mode
/// asks for an identity that contains every selected color.
#[derive(Debug, Clone, Default)]
pub struct IdentityFilter {
    colors: BTreeSet<Color>,
    pub mode: MatchMode,
}

impl IdentityFilter {
    pub fn new(mode: MatchMode) -> Self {
        Self {
            colors: BTreeSet::new(),
            mode,
        }
    }

    pub fn colors(&self) -> &BTreeSet<Color> {
        &self.colors
    }

    pub fn select(&mut self, color: Color) {
        self.colors.insert(color);
    }

    pub fn deselect(&mut self, color: Color) {
        self.colors.remove(&color);
    }

    pub fn toggle(&mut self, color: Color) -> bool {
        if !self.colors.remove(&color) {
            self.colors.insert(color);
            true
        } else {
            false
        }
    }

    pub fn clear(&mut self) {
        self.colors.clear();
    }
}

impl ClauseSource for IdentityFilter {
    fn clause(&self) -> Option<String> {
        if self.colors.is_empty() {
            return None;
        }
        // `id:` on its own means "fits within"; `>=` gives containment.
        let mut qb = QueryBuilder::new();
        qb.compare("id", self.mode.operator(), &color_string(&self.colors));
        qb.build_non_empty()
    }
}
