use super::builder::{quoted_term, QueryBuilder};
use super::ClauseSource;

/// How name and oracle-text conditions combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextMode {
    /// Both conditions must hold.
    #[default]
    All,
    /// Either condition may hold.
    Either,
}

/// Name and oracle-text conditions.
#[derive(Debug, Clone, Default)]
pub struct TextFilter {
    pub name: Option<String>,
    pub oracle: Option<String>,
    pub mode: TextMode,
}

impl TextFilter {
    fn terms(&self) -> Vec<String> {
        let mut terms = Vec::new();
        if let Some(name) = non_blank(&self.name) {
            terms.push(quoted_term("name", name));
        }
        if let Some(oracle) = non_blank(&self.oracle) {
            terms.push(quoted_term("oracle", oracle));
        }
        terms
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl ClauseSource for TextFilter {
    fn clause(&self) -> Option<String> {
        let terms = self.terms();
        let mut qb = QueryBuilder::new();
        match self.mode {
            TextMode::All => {
                for t in &terms {
                    qb.term(t);
                }
            }
            TextMode::Either => {
                qb.any_of(&terms);
            }
        }
        qb.build_non_empty()
    }
}
