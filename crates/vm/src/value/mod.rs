//! Dynamic values of the guest runtime.
//!
//! This module provides the value variants the marshaller borrows while
//! encoding and produces while decoding.

pub mod composite;
pub mod number;

use composite::Composite;
use number::Number;
use std::fmt;

/// The kind of a guest value, named the way the guest runtime names it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Nil,
    Boolean,
    Number,
    String,
    Composite,
    Function,
    Userdata,
    Thread,
}

impl ValueKind {
    pub fn name(&self) -> &'static str {
        match self {
            ValueKind::Nil => "nil",
            ValueKind::Boolean => "boolean",
            ValueKind::Number => "number",
            ValueKind::String => "string",
            ValueKind::Composite => "table",
            ValueKind::Function => "function",
            ValueKind::Userdata => "userdata",
            ValueKind::Thread => "thread",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A runtime-owned value the host cannot look inside (function, userdata,
/// thread). Only its kind and an identifying token are visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OpaqueHandle {
    kind: ValueKind,
    id: u64,
}

impl OpaqueHandle {
    pub fn new(kind: ValueKind, id: u64) -> Self {
        Self { kind, id }
    }

    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    pub fn id(&self) -> u64 {
        self.id
    }
}

/// Represents a value on the guest runtime's stack.
#[derive(Debug, Clone)]
pub enum DynamicValue {
    /// Absence of a value.
    Nil,

    /// Represents a boolean value.
    Boolean(bool),

    /// Represents an integer or floating-point number.
    Number(Number),

    /// Represents a byte string; guest strings are not required to be UTF-8.
    String(Vec<u8>),

    /// Represents a shared associative container.
    Composite(Composite),

    /// Represents a value the marshaller does not support.
    Opaque(OpaqueHandle),
}

impl DynamicValue {
    /// Creates a string value from anything byte-like.
    pub fn string<T: AsRef<[u8]>>(value: T) -> Self {
        DynamicValue::String(value.as_ref().to_vec())
    }

    /// Returns the kind of the value.
    pub fn kind(&self) -> ValueKind {
        match self {
            DynamicValue::Nil => ValueKind::Nil,
            DynamicValue::Boolean(_) => ValueKind::Boolean,
            DynamicValue::Number(_) => ValueKind::Number,
            DynamicValue::String(_) => ValueKind::String,
            DynamicValue::Composite(_) => ValueKind::Composite,
            DynamicValue::Opaque(handle) => handle.kind(),
        }
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, DynamicValue::Nil)
    }

    pub fn is_string(&self) -> bool {
        matches!(self, DynamicValue::String(_))
    }

    pub fn as_number(&self) -> Option<Number> {
        match self {
            DynamicValue::Number(number) => Some(*number),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            DynamicValue::String(bytes) => Some(bytes),
            _ => None,
        }
    }

    pub fn as_composite(&self) -> Option<&Composite> {
        match self {
            DynamicValue::Composite(composite) => Some(composite),
            _ => None,
        }
    }

    /// Structural comparison: composites are compared by contents rather than
    /// identity. Keyed entries are matched by key, so entry order is ignored.
    ///
    /// Must not be called on cyclic structures.
    pub fn deep_eq(&self, other: &DynamicValue) -> bool {
        match (self, other) {
            (DynamicValue::Composite(a), DynamicValue::Composite(b)) => a.deep_eq(b),
            (a, b) => a == b,
        }
    }
}

/// Shallow equality: scalars by value, composites and opaque handles by
/// identity.
impl PartialEq for DynamicValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (DynamicValue::Nil, DynamicValue::Nil) => true,
            (DynamicValue::Boolean(a), DynamicValue::Boolean(b)) => a == b,
            (DynamicValue::Number(a), DynamicValue::Number(b)) => a == b,
            (DynamicValue::String(a), DynamicValue::String(b)) => a == b,
            (DynamicValue::Composite(a), DynamicValue::Composite(b)) => a.id() == b.id(),
            (DynamicValue::Opaque(a), DynamicValue::Opaque(b)) => a == b,
            _ => false,
        }
    }
}

impl From<bool> for DynamicValue {
    fn from(value: bool) -> Self {
        DynamicValue::Boolean(value)
    }
}

impl From<i64> for DynamicValue {
    fn from(value: i64) -> Self {
        DynamicValue::Number(Number::Integer(value))
    }
}

impl From<i32> for DynamicValue {
    fn from(value: i32) -> Self {
        DynamicValue::Number(value.into())
    }
}

impl From<u32> for DynamicValue {
    fn from(value: u32) -> Self {
        DynamicValue::Number(value.into())
    }
}

impl From<f64> for DynamicValue {
    fn from(value: f64) -> Self {
        DynamicValue::Number(Number::Float(value))
    }
}

impl From<Number> for DynamicValue {
    fn from(value: Number) -> Self {
        DynamicValue::Number(value)
    }
}

impl From<&str> for DynamicValue {
    fn from(value: &str) -> Self {
        DynamicValue::String(value.as_bytes().to_vec())
    }
}

impl From<String> for DynamicValue {
    fn from(value: String) -> Self {
        DynamicValue::String(value.into_bytes())
    }
}

impl From<Vec<u8>> for DynamicValue {
    fn from(value: Vec<u8>) -> Self {
        DynamicValue::String(value)
    }
}

impl From<Composite> for DynamicValue {
    fn from(value: Composite) -> Self {
        DynamicValue::Composite(value)
    }
}

impl<T: Into<DynamicValue>> From<Option<T>> for DynamicValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(DynamicValue::Nil, Into::into)
    }
}
