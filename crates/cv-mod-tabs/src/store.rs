//! Injected persistence seam for the view preference.
//!
//! The resolver only ever touches one key. The trait keeps durable
//! storage out of this crate: the binary supplies a file-backed store,
//! tests substitute `MemoryStore`. Writes are synchronous and
//! last-writer-wins; there are no concurrent writers in this model.

use std::collections::HashMap;

/// Preference key holding the active result-view id.
pub const ACTIVE_TAB_KEY: &str = "active_tab";

pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
}

/// In-memory store double.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }
}
