//! # Guest JSON Marshaller
//!
//! Converts guest runtime values to JSON text and back, so contract state can
//! be persisted to the backing store and host arguments and results can cross
//! into contract code.
//!
//! ## Wire format
//!
//! - Composites whose keys are exactly `1..=n` (with `n` the declared element
//!   count) encode as arrays in JSON form; everything else encodes as an
//!   object.
//! - Nil encodes as `{}` in a JSON-form value slot and as `null` otherwise.
//! - Only `"`, `\`, tab, newline, backspace, form feed and carriage return are
//!   escaped. Other control bytes and raw UTF-8 are copied through, and the
//!   decoder does not understand `\u` escapes.
//! - Non-integral numbers print with six significant digits, so floats do not
//!   round-trip exactly.
//!
//! ## Quick Start
//!
//! ```rust
//! use guest_json::{DecodeMode, JsonCodec};
//! use guest_vm::{Composite, DynamicValue};
//!
//! let codec = JsonCodec::default();
//! let list = Composite::from_sequence(vec![10, 20, 30]);
//! let text = codec.encode_one(&DynamicValue::from(list), true).unwrap();
//! assert_eq!(text, b"[10,20,30]");
//!
//! let back = codec.decode(&text, DecodeMode::STRICT).unwrap();
//! assert_eq!(back.as_composite().unwrap().border(), 3);
//! ```

pub mod buffer;
pub mod codec;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod guard;
pub mod utility;

pub use buffer::ByteBuffer;
pub use codec::JsonCodec;
pub use decoder::{decode, decode_onto, DecodeMode};
pub use encoder::{encode_one, encode_range, EncodeMode};
pub use error::{DecodeError, EncodeError, JsonError, JsonResult};
pub use guard::CycleGuard;
