//! Composite implementation for the guest value model.
//!
//! A composite is the guest runtime's only aggregate: an associative container
//! that doubles as a 1-based sequence. Handles are shared; cloning a
//! `Composite` clones the handle, not the contents.

use super::number::Number;
use super::{DynamicValue, OpaqueHandle};
use crate::error::{VmError, VmResult};
use indexmap::IndexMap;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Stable identity of a composite for the lifetime of its allocation.
pub type CompositeId = usize;

/// Hashable projection of a composite key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum EntryKey {
    Boolean(bool),
    Integer(i64),
    Float(u64),
    String(Vec<u8>),
    Composite(CompositeId),
    Opaque(OpaqueHandle),
}

impl EntryKey {
    fn new(key: &DynamicValue) -> VmResult<Self> {
        match key {
            DynamicValue::Nil => Err(VmError::InvalidKey("nil".to_string())),
            DynamicValue::Boolean(value) => Ok(EntryKey::Boolean(*value)),
            DynamicValue::Number(number) => {
                if number.is_nan() {
                    return Err(VmError::InvalidKey("NaN".to_string()));
                }
                Ok(match number.normalized() {
                    Number::Integer(value) => EntryKey::Integer(value),
                    Number::Float(value) => EntryKey::Float(value.to_bits()),
                })
            }
            DynamicValue::String(bytes) => Ok(EntryKey::String(bytes.clone())),
            DynamicValue::Composite(composite) => Ok(EntryKey::Composite(composite.id())),
            DynamicValue::Opaque(handle) => Ok(EntryKey::Opaque(*handle)),
        }
    }
}

#[derive(Default)]
struct CompositeData {
    entries: IndexMap<EntryKey, (DynamicValue, DynamicValue)>,
    length_hint: Option<usize>,
}

/// Shared handle to a guest composite.
#[derive(Clone, Default)]
pub struct Composite {
    inner: Rc<RefCell<CompositeData>>,
}

impl Composite {
    /// Creates an empty composite.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty composite with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        let data = CompositeData {
            entries: IndexMap::with_capacity(capacity),
            length_hint: None,
        };
        Self {
            inner: Rc::new(RefCell::new(data)),
        }
    }

    /// Creates a sequence-shaped composite with the items at keys `1..=n`.
    ///
    /// Nil items leave holes, exactly as positional assignment does.
    pub fn from_sequence<I>(items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<DynamicValue>,
    {
        let items = items.into_iter();
        let composite = Self::with_capacity(items.size_hint().0);
        for (position, item) in (1..).zip(items) {
            composite.set_index(position, item.into());
        }
        composite
    }

    /// Returns the identity of this composite. Two handles share an identity
    /// exactly when they refer to the same allocation.
    pub fn id(&self) -> CompositeId {
        Rc::as_ptr(&self.inner) as *const () as usize
    }

    /// Gets the value stored under `key`, or nil.
    pub fn get(&self, key: &DynamicValue) -> DynamicValue {
        let Ok(entry_key) = EntryKey::new(key) else {
            return DynamicValue::Nil;
        };
        self.inner
            .borrow()
            .entries
            .get(&entry_key)
            .map(|(_, value)| value.clone())
            .unwrap_or(DynamicValue::Nil)
    }

    /// Gets the value stored under the integer key `index`, or nil.
    pub fn get_index(&self, index: i64) -> DynamicValue {
        self.inner
            .borrow()
            .entries
            .get(&EntryKey::Integer(index))
            .map(|(_, value)| value.clone())
            .unwrap_or(DynamicValue::Nil)
    }

    /// Stores `value` under `key`. Storing nil removes the entry.
    ///
    /// Nil and NaN keys are rejected.
    pub fn set(&self, key: impl Into<DynamicValue>, value: impl Into<DynamicValue>) -> VmResult<()> {
        let key = key.into();
        let entry_key = EntryKey::new(&key)?;
        let value = value.into();
        let key = match key {
            DynamicValue::Number(number) => DynamicValue::Number(number.normalized()),
            other => other,
        };
        let mut data = self.inner.borrow_mut();
        if value.is_nil() {
            data.entries.shift_remove(&entry_key);
        } else {
            data.entries.insert(entry_key, (key, value));
        }
        Ok(())
    }

    /// Stores `value` under the integer key `index`.
    pub fn set_index(&self, index: i64, value: DynamicValue) {
        let mut data = self.inner.borrow_mut();
        let entry_key = EntryKey::Integer(index);
        if value.is_nil() {
            data.entries.shift_remove(&entry_key);
        } else {
            data.entries.insert(entry_key, (DynamicValue::from(index), value));
        }
    }

    pub fn contains_key(&self, key: &DynamicValue) -> bool {
        EntryKey::new(key)
            .map(|entry_key| self.inner.borrow().entries.contains_key(&entry_key))
            .unwrap_or(false)
    }

    /// Number of entries actually present.
    pub fn entry_count(&self) -> usize {
        self.inner.borrow().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entry_count() == 0
    }

    /// Largest `n` such that keys `1..=n` are all present.
    pub fn border(&self) -> usize {
        let data = self.inner.borrow();
        let mut n = 0usize;
        while data.entries.contains_key(&EntryKey::Integer(n as i64 + 1)) {
            n += 1;
        }
        n
    }

    /// Declared element count: the explicit length hint when one is set,
    /// otherwise the border. The hint is independent of the entries present.
    pub fn declared_len(&self) -> usize {
        match self.inner.borrow().length_hint {
            Some(hint) => hint,
            None => self.border(),
        }
    }

    pub fn length_hint(&self) -> Option<usize> {
        self.inner.borrow().length_hint
    }

    pub fn set_length_hint(&self, hint: Option<usize>) {
        self.inner.borrow_mut().length_hint = hint;
    }

    /// Snapshot of the entries in iteration order.
    ///
    /// The snapshot holds handles, so nested composites stay shared.
    pub fn entries(&self) -> Vec<(DynamicValue, DynamicValue)> {
        self.inner.borrow().entries.values().cloned().collect()
    }

    /// Structural comparison of two acyclic composites.
    pub fn deep_eq(&self, other: &Composite) -> bool {
        if self.id() == other.id() {
            return true;
        }
        let ours = self.inner.borrow();
        let theirs = other.inner.borrow();
        if ours.entries.len() != theirs.entries.len() {
            return false;
        }
        ours.entries.iter().all(|(entry_key, (_, value))| {
            theirs
                .entries
                .get(entry_key)
                .is_some_and(|(_, other_value)| value.deep_eq(other_value))
        })
    }
}

impl fmt::Debug for Composite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Composite")
            .field("id", &format_args!("{:#x}", self.id()))
            .field("entries", &self.entry_count())
            .field("length_hint", &self.length_hint())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_creation() {
        let list = Composite::from_sequence(vec![1, 2, 3]);
        assert_eq!(list.entry_count(), 3);
        assert_eq!(list.border(), 3);
        assert_eq!(list.get_index(2), DynamicValue::from(2));
        assert!(list.get_index(4).is_nil());
    }

    #[test]
    fn test_set_nil_removes_entry() {
        let map = Composite::new();
        map.set("a", 1).unwrap();
        map.set("b", 2).unwrap();
        map.set("a", DynamicValue::Nil).unwrap();
        assert_eq!(map.entry_count(), 1);
        assert!(!map.contains_key(&DynamicValue::from("a")));
    }

    #[test]
    fn test_invalid_keys_rejected() {
        let map = Composite::new();
        assert!(matches!(
            map.set(DynamicValue::Nil, 1),
            Err(VmError::InvalidKey(_))
        ));
        assert!(matches!(map.set(f64::NAN, 1), Err(VmError::InvalidKey(_))));
    }

    #[test]
    fn test_integral_float_keys_normalize() {
        let map = Composite::new();
        map.set(2.0, "two").unwrap();
        assert_eq!(map.get_index(2), DynamicValue::from("two"));
        let (key, _) = map.entries().remove(0);
        assert!(matches!(key, DynamicValue::Number(Number::Integer(2))));
    }

    #[test]
    fn test_border_and_length_hint() {
        let map = Composite::new();
        map.set(1, 10).unwrap();
        map.set(3, 30).unwrap();
        assert_eq!(map.border(), 1);
        assert_eq!(map.declared_len(), 1);
        map.set_length_hint(Some(2));
        assert_eq!(map.declared_len(), 2);
        map.set_length_hint(None);
        assert_eq!(map.declared_len(), 1);
    }

    #[test]
    fn test_identity_is_shared_by_clones() {
        let a = Composite::new();
        let b = a.clone();
        b.set("k", true).unwrap();
        assert_eq!(a.id(), b.id());
        assert_eq!(a.get(&DynamicValue::from("k")), DynamicValue::from(true));
        assert_ne!(a.id(), Composite::new().id());
    }

    #[test]
    fn test_deep_eq_ignores_order() {
        let a = Composite::new();
        a.set("x", 1).unwrap();
        a.set("y", Composite::from_sequence(vec![1, 2])).unwrap();
        let b = Composite::new();
        b.set("y", Composite::from_sequence(vec![1, 2])).unwrap();
        b.set("x", 1.0).unwrap();
        assert!(a.deep_eq(&b));
        b.set("x", 2).unwrap();
        assert!(!a.deep_eq(&b));
    }
}
