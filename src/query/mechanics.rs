use super::builder::QueryBuilder;
use super::ClauseSource;

/// Mechanic criteria (`is:<mechanic>`); any selected mechanic may match.
#[derive(Debug, Clone, Default)]
pub struct MechanicFilter {
    mechanics: Vec<String>,
}

impl MechanicFilter {
    pub fn mechanics(&self) -> &[String] {
        &self.mechanics
    }

    /// Add a mechanic. Returns `false` if it was already selected.
    pub fn add(&mut self, mechanic: &str) -> bool {
        let mechanic = mechanic.trim();
        if mechanic.is_empty() || self.mechanics.iter().any(|m| m == mechanic) {
            return false;
        }
        self.mechanics.push(mechanic.to_string());
        true
    }

    pub fn remove(&mut self, mechanic: &str) {
        self.mechanics.retain(|m| m != mechanic);
    }

    pub fn clear(&mut self) {
        self.mechanics.clear();
    }
}

impl ClauseSource for MechanicFilter {
    fn clause(&self) -> Option<String> {
        let terms: Vec<String> = self.mechanics.iter().map(|m| format!("is:{}", m)).collect();
        let mut qb = QueryBuilder::new();
        qb.any_of(&terms);
        qb.build_non_empty()
    }
}
