//! Contract state storage.

pub mod storage_key;
pub mod store;

pub use storage_key::{prefixed_key, state_key};
pub use store::{MemoryStore, StateStore};
