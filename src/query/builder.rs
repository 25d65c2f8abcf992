//! Search-grammar builder with chainable clause construction.
//!
//! Clauses are collected in order and joined with single spaces, which the
//! search API reads as implicit AND. Builder methods return `&mut Self` for
//! chaining.
//!
//! # Example
//!
//! ```rust
//! use mtg_deckbuilder::QueryBuilder;
//! let q = QueryBuilder::new()
//!     .quoted("name", "Lightning Bolt")
//!     .gte("cmc", "1")
//!     .not("is:funny")
//!     .build();
//! assert_eq!(q, r#"name:"Lightning Bolt" cmc>=1 -is:funny"#);
//! ```

/// Builds search-API query strings.
#[derive(Debug, Clone, Default)]
pub struct QueryBuilder {
    clauses: Vec<String>,
}

impl QueryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a raw clause verbatim. Blank input is ignored.
    pub fn term(&mut self, clause: &str) -> &mut Self {
        let clause = clause.trim();
        if !clause.is_empty() {
            self.clauses.push(clause.to_string());
        }
        self
    }

    /// Add a `key:value` condition.
    pub fn has(&mut self, key: &str, value: &str) -> &mut Self {
        self.clauses.push(format!("{}:{}", key, value));
        self
    }

    /// Add a `key:"value"` condition with embedded quotes escaped.
    pub fn quoted(&mut self, key: &str, value: &str) -> &mut Self {
        self.clauses.push(quoted_term(key, value));
        self
    }

    /// Add a comparison `{key}{op}{value}`, e.g. `mana>={2}{U}`.
    pub fn compare(&mut self, key: &str, op: &str, value: &str) -> &mut Self {
        self.clauses.push(format!("{}{}{}", key, op, value));
        self
    }

    /// Add an equality condition: `{key}={value}`.
    pub fn eq(&mut self, key: &str, value: &str) -> &mut Self {
        self.compare(key, "=", value)
    }

    /// Add a greater-than-or-equal condition: `{key}>={value}`.
    pub fn gte(&mut self, key: &str, value: &str) -> &mut Self {
        self.compare(key, ">=", value)
    }

    /// Add a less-than-or-equal condition: `{key}<={value}`.
    pub fn lte(&mut self, key: &str, value: &str) -> &mut Self {
        self.compare(key, "<=", value)
    }

    /// Add a negated clause: `-{clause}`.
    pub fn not(&mut self, clause: &str) -> &mut Self {
        self.clauses.push(format!("-{}", clause));
        self
    }

    /// Add OR-combined alternatives.
    ///
    /// Blank alternatives are dropped. Several alternatives are wrapped in
    /// parentheses; a single one is added as is.
    ///
    /// ```rust
    /// use mtg_deckbuilder::QueryBuilder;
    /// let q = QueryBuilder::new().any_of(&["is:firststrike", "is:deathtouch"]).build();
    /// assert_eq!(q, "(is:firststrike OR is:deathtouch)");
    /// ```
    pub fn any_of<S: AsRef<str>>(&mut self, alternatives: &[S]) -> &mut Self {
        let parts: Vec<&str> = alternatives
            .iter()
            .map(|a| a.as_ref().trim())
            .filter(|a| !a.is_empty())
            .collect();
        match parts.len() {
            0 => {}
            1 => self.clauses.push(parts[0].to_string()),
            _ => self.clauses.push(format!("({})", parts.join(" OR "))),
        }
        self
    }

    /// Add AND-combined clauses wrapped in one pair of parentheses.
    pub fn group<S: AsRef<str>>(&mut self, clauses: &[S]) -> &mut Self {
        let parts: Vec<&str> = clauses
            .iter()
            .map(|c| c.as_ref().trim())
            .filter(|c| !c.is_empty())
            .collect();
        if !parts.is_empty() {
            self.clauses.push(format!("({})", parts.join(" ")));
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    /// Join all clauses with single spaces.
    pub fn build(&self) -> String {
        self.clauses.join(" ")
    }

    /// Like [`build`](Self::build), but `None` when no clause was added.
    pub fn build_non_empty(&self) -> Option<String> {
        if self.clauses.is_empty() {
            None
        } else {
            Some(self.build())
        }
    }
}

/// `"value"` with backslashes and double quotes escaped.
pub fn quote(value: &str) -> String {
    let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
    format!("\"{}\"", escaped)
}

/// `key:"value"`, quoted as by [`quote`].
pub fn quoted_term(key: &str, value: &str) -> String {
    format!("{}:{}", key, quote(value))
}

/// Render a numeric bound without a trailing `.0` (`3.0` becomes `3`).
pub fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}
