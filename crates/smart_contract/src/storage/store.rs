//! Backing store abstraction.

use crate::Result;
use std::collections::HashMap;

/// Byte-keyed persistent storage the contract state is written to.
pub trait StateStore {
    /// Reads the value stored under `key`, if any.
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &[u8], value: Vec<u8>) -> Result<()>;

    /// Removes `key`. Removing a missing key is not an error.
    fn delete(&mut self, key: &[u8]) -> Result<()>;
}

/// In-memory store used for tests and query sandboxes.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<Vec<u8>, Vec<u8>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl StateStore for MemoryStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &[u8], value: Vec<u8>) -> Result<()> {
        self.entries.insert(key.to_vec(), value);
        Ok(())
    }

    fn delete(&mut self, key: &[u8]) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}
