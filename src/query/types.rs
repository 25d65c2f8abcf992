//! Type tags with optional OR-groups.
//!
//! Ungrouped ("main") tags apply to every group. Each group is ANDed with
//! the main tags and groups are alternatives of one another:
//!
//! ```text
//! main: Legendary      group 1: Creature Elf      group 2: Artifact
//! => ((type:Legendary type:Creature type:Elf) OR (type:Legendary type:Artifact))
//! ```

use super::builder::{quoted_term, QueryBuilder};
use super::ClauseSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TypeGroupId(pub u32);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeTag {
    pub name: String,
    pub group: Option<TypeGroupId>,
}

/// Selected type tags.
#[derive(Debug, Clone, Default)]
pub struct TypeFilter {
    tags: Vec<TypeTag>,
    groups: Vec<TypeGroupId>,
    current: Option<TypeGroupId>,
}

impl TypeFilter {
    pub fn tags(&self) -> &[TypeTag] {
        &self.tags
    }

    pub fn groups(&self) -> &[TypeGroupId] {
        &self.groups
    }

    /// Group that [`add`](Self::add) currently targets.
    pub fn current_group(&self) -> Option<TypeGroupId> {
        self.current
    }

    /// Open a new group and make it the target of subsequent adds.
    pub fn new_group(&mut self) -> TypeGroupId {
        let next = self.groups.last().map_or(1, |g| g.0 + 1);
        let id = TypeGroupId(next);
        self.groups.push(id);
        self.current = Some(id);
        id
    }

    /// Send subsequent adds back to the main (ungrouped) tags.
    pub fn close_group(&mut self) {
        self.current = None;
    }

    /// Add a type to the current target.
    pub fn add(&mut self, name: &str) -> bool {
        self.add_to(name, self.current)
    }

    /// Add a type to a specific group (`None` = main). Returns `false` for
    /// blank names, unknown groups, or a tag already present there.
    pub fn add_to(&mut self, name: &str, group: Option<TypeGroupId>) -> bool {
        let name = name.trim();
        if name.is_empty() {
            return false;
        }
        if let Some(g) = group {
            if !self.groups.contains(&g) {
                return false;
            }
        }
        if self.tags.iter().any(|t| t.name == name && t.group == group) {
            return false;
        }
        self.tags.push(TypeTag {
            name: name.to_string(),
            group,
        });
        true
    }

    pub fn remove(&mut self, name: &str, group: Option<TypeGroupId>) {
        self.tags.retain(|t| !(t.name == name && t.group == group));
    }

    /// Remove a group and all its tags.
    pub fn remove_group(&mut self, group: TypeGroupId) {
        self.tags.retain(|t| t.group != Some(group));
        self.groups.retain(|g| *g != group);
        if self.current == Some(group) {
            self.current = None;
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    fn terms_in(&self, group: Option<TypeGroupId>) -> Vec<String> {
        self.tags
            .iter()
            .filter(|t| t.group == group)
            .map(|t| type_term(&t.name))
            .collect()
    }
}

fn type_term(name: &str) -> String {
    if name.contains(char::is_whitespace) {
        quoted_term("type", name)
    } else {
        format!("type:{}", name)
    }
}

impl ClauseSource for TypeFilter {
    fn clause(&self) -> Option<String> {
        let main = self.terms_in(None);

        let mut alternatives: Vec<String> = Vec::new();
        for &group in &self.groups {
            let members = self.terms_in(Some(group));
            if members.is_empty() {
                continue;
            }
            let mut qb = QueryBuilder::new();
            qb.group(&[main.as_slice(), members.as_slice()].concat());
            alternatives.push(qb.build());
        }

        let mut qb = QueryBuilder::new();
        if alternatives.is_empty() {
            for term in &main {
                qb.term(term);
            }
        } else {
            qb.any_of(&alternatives);
        }
        qb.build_non_empty()
    }
}
