//! State storage host functions.
//!
//! Values are persisted in the plain (non-JSON) marshaller form and read
//! back leniently, so numeric object keys survive a store round trip.

use crate::runtime::ContractRuntime;
use crate::storage::{prefixed_key, StateStore};
use crate::{Error, Result};
use guest_json::DecodeMode;
use guest_vm::DynamicValue;

impl<S: StateStore> ContractRuntime<S> {
    /// Persists `value` under `key` in the contract state namespace.
    pub fn set_item(&mut self, key: &[u8], value: &DynamicValue) -> Result<()> {
        let prefix = [self.storage_config().state_key_prefix];
        self.set_item_with_prefix(key, value, &prefix)
    }

    /// Persists `value` under `prefix` followed by `key`.
    pub fn set_item_with_prefix(
        &mut self,
        key: &[u8],
        value: &DynamicValue,
        prefix: &[u8],
    ) -> Result<()> {
        self.ensure_writable()?;
        let db_key = prefixed_key(prefix, key);
        let text = self.codec().encode_one(value, false)?;
        log::debug!(
            "setItem {} ({} bytes)",
            String::from_utf8_lossy(&db_key),
            text.len()
        );
        self.store_mut().set(&db_key, text)
    }

    /// Reads the value stored under `key`; `None` if nothing is stored.
    pub fn get_item(&self, key: &[u8]) -> Result<Option<DynamicValue>> {
        let prefix = [self.storage_config().state_key_prefix];
        self.get_item_with_prefix(key, &prefix)
    }

    pub fn get_item_with_prefix(&self, key: &[u8], prefix: &[u8]) -> Result<Option<DynamicValue>> {
        let db_key = prefixed_key(prefix, key);
        let Some(text) = self.store().get(&db_key)? else {
            return Ok(None);
        };
        self.codec()
            .decode(&text, DecodeMode::LENIENT)
            .map(Some)
            .map_err(|source| Error::StateConversion {
                key: String::from_utf8_lossy(&db_key).into_owned(),
                text: String::from_utf8_lossy(&text).into_owned(),
                source,
            })
    }

    pub fn delete_item(&mut self, key: &[u8]) -> Result<()> {
        let prefix = [self.storage_config().state_key_prefix];
        self.delete_item_with_prefix(key, &prefix)
    }

    pub fn delete_item_with_prefix(&mut self, key: &[u8], prefix: &[u8]) -> Result<()> {
        self.ensure_writable()?;
        let db_key = prefixed_key(prefix, key);
        log::debug!("delItem {}", String::from_utf8_lossy(&db_key));
        self.store_mut().delete(&db_key)
    }

    /// The contract creator, read from its raw un-namespaced key.
    pub fn creator(&self) -> Result<Option<DynamicValue>> {
        let key = self.storage_config().creator_key.as_bytes();
        Ok(self.store().get(key)?.map(DynamicValue::String))
    }
}
