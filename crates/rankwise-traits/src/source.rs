//! Where factor tables come from.

use std::collections::HashMap;

use crate::{FactorTable, RankwiseError, Result};

/// Supplies a wide factor table by factor name.
///
/// Implementations may read files, query a database, or hold tables in
/// memory. Returned tables should carry the requested name.
pub trait FactorSource: Send + Sync {
    /// Returns the table for `factor`.
    ///
    /// # Errors
    ///
    /// Returns [`RankwiseError::FactorNotFound`] when the source has no such
    /// factor, or any error raised while loading it.
    fn factor_table(&self, factor: &str) -> Result<FactorTable>;
}

/// A [`FactorSource`] backed by a map of preloaded tables.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    tables: HashMap<String, FactorTable>,
}

impl InMemorySource {
    /// Creates an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the table for `name`.
    pub fn insert(&mut self, name: impl Into<String>, table: FactorTable) {
        let name = name.into();
        let table = table.with_name(name.clone());
        self.tables.insert(name, table);
    }

    /// Builder form of [`insert`](Self::insert).
    #[must_use]
    pub fn with_table(mut self, name: impl Into<String>, table: FactorTable) -> Self {
        self.insert(name, table);
        self
    }

    /// Names of the stored factors, sorted.
    pub fn factors(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tables.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl FactorSource for InMemorySource {
    fn factor_table(&self, factor: &str) -> Result<FactorTable> {
        self.tables
            .get(factor)
            .cloned()
            .ok_or_else(|| RankwiseError::FactorNotFound(factor.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Date;

    fn table() -> FactorTable {
        FactorTable::new(
            vec![Date::from_ymd_opt(2021, 1, 4).unwrap()],
            vec!["A".to_string()],
            vec![vec![Some(1.0)]],
        )
        .unwrap()
    }

    #[test]
    fn test_in_memory_source_names_tables() {
        let source = InMemorySource::new()
            .with_table("roe", table())
            .with_table("pb", table());

        assert_eq!(source.factors(), vec!["pb", "roe"]);
        let roe = source.factor_table("roe").unwrap();
        assert_eq!(roe.name(), Some("roe"));
    }

    #[test]
    fn test_unknown_factor() {
        let source = InMemorySource::new();
        let err = source.factor_table("roe").unwrap_err();
        assert!(matches!(err, RankwiseError::FactorNotFound(name) if name == "roe"));
    }
}
