//! Persistence port
//!
//! The store talks to a synchronous string key-value store. Concrete
//! backends live in consuming crates; `MemoryStore` is kept here for tests
//! and embedders that don't need durability.

use std::collections::HashMap;

use crate::error::Result;

/// Key holding the JSON array of tasks
pub const TASKS_KEY: &str = "tasks";
/// Key holding the id high-water mark
pub const COUNTER_KEY: &str = "task-counter";
pub const FILTER_KEY: &str = "filter";
pub const SORT_KEY: &str = "sort";
pub const THEME_KEY: &str = "theme";

/// Synchronous string blob store keyed by string
pub trait KeyValueStore {
    /// Read a value, `None` if the key was never written
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a value, replacing any previous one
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// In-memory key-value store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a value, builder style
    pub fn with_entry(mut self, key: &str, value: impl Into<String>) -> Self {
        self.entries.insert(key.to_string(), value.into());
        self
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
