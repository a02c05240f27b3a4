//! Dismissal stores - the only durable state the engine owns

use crate::StoreError;
use brandgraph_domain::clock::current_timestamp;
use brandgraph_domain::DismissalStore;
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::BTreeSet;
use std::convert::Infallible;
use std::path::Path;

/// SQLite-backed dismissal set
///
/// Use `:memory:` for an in-memory database (useful for testing).
///
/// # Thread Safety
///
/// SQLite connections are not thread-safe. Each thread should open its
/// own `SqliteDismissalStore`.
pub struct SqliteDismissalStore {
    conn: Connection,
}

impl SqliteDismissalStore {
    /// Open (or create) the dismissal database at `path`
    ///
    /// # Examples
    ///
    /// ```
    /// use brandgraph_domain::DismissalStore;
    /// use brandgraph_store::SqliteDismissalStore;
    ///
    /// let mut store = SqliteDismissalStore::new(":memory:").unwrap();
    /// store.dismiss("refresh-stale").unwrap();
    /// assert!(store.is_dismissed("refresh-stale").unwrap());
    /// ```
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        conn.execute_batch(include_str!("schema.sql"))?;
        Ok(Self { conn })
    }
}

impl DismissalStore for SqliteDismissalStore {
    type Error = StoreError;

    fn dismiss(&mut self, suggestion_id: &str) -> Result<(), Self::Error> {
        let inserted = self.conn.execute(
            "INSERT OR IGNORE INTO dismissed_suggestions (suggestion_id, dismissed_at)
             VALUES (?1, ?2)",
            params![suggestion_id, current_timestamp() as i64],
        )?;
        if inserted > 0 {
            tracing::info!(suggestion = suggestion_id, "Suggestion dismissed");
        }
        Ok(())
    }

    fn is_dismissed(&self, suggestion_id: &str) -> Result<bool, Self::Error> {
        let found = self
            .conn
            .query_row(
                "SELECT 1 FROM dismissed_suggestions WHERE suggestion_id = ?1",
                params![suggestion_id],
                |_| Ok(true),
            )
            .optional()?;
        Ok(found.unwrap_or(false))
    }

    fn dismissed(&self) -> Result<Vec<String>, Self::Error> {
        let mut stmt = self
            .conn
            .prepare("SELECT suggestion_id FROM dismissed_suggestions ORDER BY suggestion_id")?;
        let ids = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ids)
    }
}

/// Process-local dismissal set
#[derive(Debug, Clone, Default)]
pub struct MemoryDismissalStore {
    dismissed: BTreeSet<String>,
}

impl MemoryDismissalStore {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }
}

impl DismissalStore for MemoryDismissalStore {
    type Error = Infallible;

    fn dismiss(&mut self, suggestion_id: &str) -> Result<(), Self::Error> {
        self.dismissed.insert(suggestion_id.to_string());
        Ok(())
    }

    fn is_dismissed(&self, suggestion_id: &str) -> Result<bool, Self::Error> {
        Ok(self.dismissed.contains(suggestion_id))
    }

    fn dismissed(&self) -> Result<Vec<String>, Self::Error> {
        Ok(self.dismissed.iter().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dismiss_is_idempotent() {
        let mut store = SqliteDismissalStore::new(":memory:").unwrap();
        store.dismiss("fix-warnings").unwrap();
        store.dismiss("fix-warnings").unwrap();
        assert_eq!(store.dismissed().unwrap(), vec!["fix-warnings".to_string()]);
    }

    #[test]
    fn test_unknown_is_not_dismissed() {
        let store = SqliteDismissalStore::new(":memory:").unwrap();
        assert!(!store.is_dismissed("validate-ready-assets").unwrap());
    }

    #[test]
    fn test_memory_store() {
        let mut store = MemoryDismissalStore::new();
        store.dismiss("b").unwrap();
        store.dismiss("a").unwrap();
        assert!(store.is_dismissed("a").unwrap());
        assert_eq!(store.dismissed().unwrap(), vec!["a".to_string(), "b".to_string()]);
    }
}
