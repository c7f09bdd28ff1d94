//! Debug value recorder
//!
//! A key -> JSON value map handed explicitly to whatever wants to report
//! per-frame internals. Rendering it (overlay, log, test assertion) is up to
//! the owner.

use std::collections::BTreeMap;

use serde::Serialize;

#[derive(Debug, Clone, Default)]
pub struct DebugRecorder {
    entries: BTreeMap<String, String>,
}

impl DebugRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `value` under `key`, replacing any previous value
    pub fn record<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) {
        match serde_json::to_string(value) {
            Ok(json) => {
                self.entries.insert(key.to_owned(), json);
            }
            Err(e) => log::warn!("debug value {key} not recordable: {e}"),
        }
    }

    /// Recorded JSON for `key`
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// `key: value` lines in key order
    pub fn lines(&self) -> Vec<String> {
        self.entries.iter().map(|(k, v)| format!("{k}: {v}")).collect()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
