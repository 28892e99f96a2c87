//! # Guest Bridge
//!
//! Moves values between a contract's scripting runtime and the JSON text
//! the host persists and exchanges.
//!
//! The workspace is organized into several crates:
//!
//! - [`config`] - Limits and storage layout, loadable from TOML
//! - [`vm`] - The guest value model and 1-based value stack
//! - [`json`] - The JSON marshaller (encoder, decoder, cycle guard)
//! - [`contract`] - The contract system module built on top of it
//!
//! ## Quick Start
//!
//! ```rust
//! use guest_bridge::prelude::*;
//!
//! let mut runtime = ContractRuntime::new(ExecutionContext::new("demo"), MemoryStore::new());
//! let value = runtime.json_decode(br#"{"votes":[3,1,2]}"#).unwrap();
//! runtime.set_item(b"ballot", &value).unwrap();
//!
//! let printed = runtime.print(&[DynamicValue::from("ballot"), value]).unwrap();
//! assert_eq!(printed, r#"["ballot",{"votes":[3,1,2]}]"#);
//! ```

pub use guest_config as config;
pub use guest_contract as contract;
pub use guest_json as json;
pub use guest_vm as vm;

/// Commonly used types
pub mod prelude {
    pub use guest_config::{JsonLimits, MarshalConfig, StorageConfig};
    pub use guest_contract::{ContractRuntime, ExecutionContext, MemoryStore, StateStore};
    pub use guest_json::{DecodeError, DecodeMode, EncodeError, JsonCodec};
    pub use guest_vm::{Composite, DynamicValue, Number, ValueStack};
}
