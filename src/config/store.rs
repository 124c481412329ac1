//! Key-value configuration store abstraction.
//!
//! Settings sections are persisted by the host application as independent
//! JSON blobs; this engine only reads them. Every section is optional.

use std::collections::HashMap;

/// Read access to persisted configuration blobs.
pub trait ConfigStore {
    /// Raw JSON for a section key, if the section was ever saved.
    fn get_raw(&self, key: &str) -> Option<String>;
}

/// In-memory store, used by tests and by hosts that already hold their
/// configuration in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryConfigStore {
    entries: HashMap<String, String>,
}

impl InMemoryConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, raw_json: impl Into<String>) {
        self.entries.insert(key.into(), raw_json.into());
    }
}

impl ConfigStore for InMemoryConfigStore {
    fn get_raw(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }
}
