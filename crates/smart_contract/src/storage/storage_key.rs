//! Key namespacing for persisted contract state.
//!
//! Contract-chosen keys live under a one-byte marker so they can never
//! collide with the raw keys the host writes itself (such as the creator
//! record).

use guest_config::STATE_KEY_PREFIX;

/// Returns `key` under the default state namespace.
pub fn state_key(key: &[u8]) -> Vec<u8> {
    prefixed_key(&[STATE_KEY_PREFIX], key)
}

/// Returns `prefix` followed by `key`.
pub fn prefixed_key(prefix: &[u8], key: &[u8]) -> Vec<u8> {
    let mut full = Vec::with_capacity(prefix.len() + key.len());
    full.extend_from_slice(prefix);
    full.extend_from_slice(key);
    full
}
