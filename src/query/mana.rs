//! Mana cost filters: colored-symbol presence and exact cost patterns.

use std::collections::BTreeSet;
use std::fmt;

use super::builder::{format_number, QueryBuilder};
use super::{ClauseSource, MatchMode};
use crate::models::Color;

/// Matches cards whose cost contains no colored mana symbol at all.
pub const COLORLESS_CLAUSE: &str = "-m:/[WUBRG]/";

// ---------------------------------------------------------------------------
// ManaFilter
// ---------------------------------------------------------------------------

/// Colored mana symbols selected for the mana cost, or "colorless".
///
/// Colorless and colored selections exclude each other: selecting one
/// clears the other.
#[derive(Debug, Clone, Default)]
pub struct ManaFilter {
    colors: BTreeSet<Color>,
    colorless: bool,
    pub mode: MatchMode,
}

impl ManaFilter {
    pub fn new(mode: MatchMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    pub fn colors(&self) -> &BTreeSet<Color> {
        &self.colors
    }

    pub fn is_colorless(&self) -> bool {
        self.colorless
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty() && !self.colorless
    }

    pub fn select_color(&mut self, color: Color) {
        self.colorless = false;
        self.colors.insert(color);
    }

    pub fn deselect_color(&mut self, color: Color) {
        self.colors.remove(&color);
    }

    /// Flip a color's selection. Returns whether it is now selected.
    pub fn toggle_color(&mut self, color: Color) -> bool {
        if self.colors.contains(&color) {
            self.deselect_color(color);
            false
        } else {
            self.select_color(color);
            true
        }
    }

    pub fn select_colorless(&mut self) {
        self.colors.clear();
        self.colorless = true;
    }

    /// Flip the colorless selection. Returns whether it is now selected.
    pub fn toggle_colorless(&mut self) -> bool {
        if self.colorless {
            self.colorless = false;
        } else {
            self.select_colorless();
        }
        self.colorless
    }

    pub fn clear(&mut self) {
        self.colors.clear();
        self.colorless = false;
    }
}

fn symbol_presence(color: Color) -> [String; 2] {
    [format!("m:{{{}}}", color), format!("m:{{{}/P}}", color)]
}

impl ClauseSource for ManaFilter {
    fn clause(&self) -> Option<String> {
        if self.colorless {
            return Some(COLORLESS_CLAUSE.to_string());
        }
        if self.colors.is_empty() {
            return None;
        }

        let mut qb = QueryBuilder::new();
        match self.mode {
            MatchMode::Exact => {
                for &color in &self.colors {
                    qb.any_of(&symbol_presence(color));
                }
                for color in Color::ALL.into_iter().filter(|c| !self.colors.contains(c)) {
                    for term in symbol_presence(color) {
                        qb.not(&term);
                    }
                }
            }
            MatchMode::Including => {
                let alternatives: Vec<String> = self
                    .colors
                    .iter()
                    .flat_map(|&c| symbol_presence(c))
                    .collect();
                qb.any_of(&alternatives);
            }
        }
        qb.build_non_empty()
    }
}

// ---------------------------------------------------------------------------
// CostToken
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CostToken {
    Color(Color),
    Phyrexian(Color),
    Snow,
    X,
}

impl CostToken {
    /// Phyrexian form of a basic color token; other tokens are unchanged.
    pub fn to_phyrexian(self) -> CostToken {
        match self {
            CostToken::Color(c) => CostToken::Phyrexian(c),
            other => other,
        }
    }
}

impl fmt::Display for CostToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CostToken::Color(c) => write!(f, "{{{}}}", c),
            CostToken::Phyrexian(c) => write!(f, "{{{}/P}}", c),
            CostToken::Snow => write!(f, "{{S}}"),
            CostToken::X => write!(f, "{{X}}"),
        }
    }
}

// ---------------------------------------------------------------------------
// ExactCostFilter
// ---------------------------------------------------------------------------

/// Exact mana cost pattern (generic amount plus symbols) and CMC bounds.
#[derive(Debug, Clone)]
pub struct ExactCostFilter {
    pub generic: Option<u32>,
    tokens: Vec<CostToken>,
    pub mode: MatchMode,
    pub min_cmc: Option<f64>,
    pub max_cmc: Option<f64>,
}

impl Default for ExactCostFilter {
    fn default() -> Self {
        Self {
            generic: None,
            tokens: Vec::new(),
            mode: MatchMode::Exact,
            min_cmc: None,
            max_cmc: None,
        }
    }
}

impl ExactCostFilter {
    pub fn tokens(&self) -> &[CostToken] {
        &self.tokens
    }

    /// Append a symbol; the same symbol may appear several times.
    pub fn push(&mut self, token: CostToken) {
        self.tokens.push(token);
    }

    /// Remove every occurrence of `token`.
    pub fn remove(&mut self, token: CostToken) {
        self.tokens.retain(|t| *t != token);
    }

    pub fn clear(&mut self) {
        self.generic = None;
        self.tokens.clear();
        self.min_cmc = None;
        self.max_cmc = None;
    }

    fn generic_prefix(&self) -> String {
        self.generic.map(|g| format!("{{{}}}", g)).unwrap_or_default()
    }

    /// Cost pattern as selected, e.g. `{2}{U}{U/P}`.
    pub fn pattern(&self) -> String {
        let mut out = self.generic_prefix();
        for t in &self.tokens {
            out.push_str(&t.to_string());
        }
        out
    }

    /// Pattern with every basic color replaced by its Phyrexian form.
    pub fn phyrexian_pattern(&self) -> String {
        let mut out = self.generic_prefix();
        for t in &self.tokens {
            out.push_str(&t.to_phyrexian().to_string());
        }
        out
    }
}

impl ClauseSource for ExactCostFilter {
    fn clause(&self) -> Option<String> {
        let mut qb = QueryBuilder::new();

        let pattern = self.pattern();
        if !pattern.is_empty() {
            let op = self.mode.operator();
            let phyrexian = self.phyrexian_pattern();
            let plain = format!("mana{}{}", op, pattern);
            if phyrexian == pattern {
                qb.term(&plain);
            } else {
                qb.any_of(&[plain, format!("mana{}{}", op, phyrexian)]);
            }
        }

        if let Some(min) = self.min_cmc {
            qb.gte("cmc", &format_number(min));
        }
        if let Some(max) = self.max_cmc {
            qb.lte("cmc", &format_number(max));
        }
        qb.build_non_empty()
    }
}
