//! # Guest Runtime Value Model
//!
//! The values that live on the guest script runtime's stack, as seen by the
//! host-side marshaller.
//!
//! ## Architecture
//!
//! - **DynamicValue**: tagged variant over nil, boolean, number, byte string,
//!   composite and opaque handles
//! - **Number**: integer-or-float numeric value with exact-integer detection
//! - **Composite**: the single associative aggregate kind, shared by handle and
//!   distinguished by a stable identity
//! - **ValueStack**: 1-based positional stack the host reads arguments from and
//!   pushes results onto
//!
//! ## Example
//!
//! ```rust
//! use guest_vm::{Composite, DynamicValue, ValueStack};
//!
//! let list = Composite::from_sequence(vec![DynamicValue::from(10), DynamicValue::from(20)]);
//! assert_eq!(list.declared_len(), 2);
//!
//! let mut stack = ValueStack::new();
//! stack.push(DynamicValue::Composite(list));
//! assert_eq!(stack.len(), 1);
//! ```

pub mod error;
pub mod stack;
pub mod value;

pub use error::{VmError, VmResult};
pub use stack::ValueStack;
pub use value::composite::{Composite, CompositeId};
pub use value::number::Number;
pub use value::{DynamicValue, OpaqueHandle, ValueKind};
