//! # Guest Contract Host Surface
//!
//! The system module a contract sees: persistent state keyed by byte
//! strings, a print facility, context accessors and JSON helpers. Values
//! cross the boundary through the `guest-json` marshaller.
//!
//! ```rust
//! use guest_contract::{ContractRuntime, ExecutionContext, MemoryStore};
//! use guest_vm::{Composite, DynamicValue};
//!
//! let mut runtime = ContractRuntime::new(ExecutionContext::new("counter"), MemoryStore::new());
//! let balances = Composite::new();
//! balances.set("alice", 10).unwrap();
//!
//! runtime.set_item(b"balances", &balances.clone().into()).unwrap();
//! let stored = runtime.get_item(b"balances").unwrap().unwrap();
//! assert!(stored.deep_eq(&DynamicValue::from(balances)));
//! ```

pub mod context;
pub mod error;
pub mod interop;
pub mod runtime;
pub mod storage;

pub use context::ExecutionContext;
pub use error::{Error, Result};
pub use runtime::ContractRuntime;
pub use storage::{prefixed_key, state_key, MemoryStore, StateStore};
