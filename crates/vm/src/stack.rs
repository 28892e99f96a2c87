//! Value stack module for the guest runtime.
//!
//! The host addresses the guest stack by 1-based position from the bottom,
//! the way contract arguments are laid out when a host function is entered.

use crate::error::{VmError, VmResult};
use crate::value::DynamicValue;

/// The guest runtime's value stack as exposed to host functions.
#[derive(Debug, Clone, Default)]
pub struct ValueStack {
    stack: Vec<DynamicValue>,
}

impl ValueStack {
    /// Creates an empty stack.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a stack holding `values`, the first one at position 1.
    pub fn from_values(values: Vec<DynamicValue>) -> Self {
        Self { stack: values }
    }

    /// Pushes a value onto the stack.
    pub fn push(&mut self, value: DynamicValue) {
        self.stack.push(value);
    }

    /// Pops the top value.
    pub fn pop(&mut self) -> VmResult<DynamicValue> {
        self.stack.pop().ok_or(VmError::StackUnderflow)
    }

    /// Returns the top value without removing it.
    pub fn peek(&self) -> VmResult<&DynamicValue> {
        self.stack.last().ok_or(VmError::StackUnderflow)
    }

    /// Returns the value at 1-based `position`.
    pub fn get(&self, position: usize) -> VmResult<&DynamicValue> {
        position
            .checked_sub(1)
            .and_then(|index| self.stack.get(index))
            .ok_or(VmError::StackIndexOutOfRange {
                position,
                size: self.stack.len(),
            })
    }

    /// Returns the contiguous run of values at positions `start..=end`.
    ///
    /// `start == end + 1` denotes an empty run.
    pub fn range(&self, start: usize, end: usize) -> VmResult<&[DynamicValue]> {
        if start == 0 {
            return Err(VmError::StackIndexOutOfRange {
                position: start,
                size: self.stack.len(),
            });
        }
        if end > self.stack.len() || start > end + 1 {
            return Err(VmError::StackIndexOutOfRange {
                position: end,
                size: self.stack.len(),
            });
        }
        Ok(&self.stack[start - 1..end])
    }

    /// Returns every value on the stack, bottom first.
    pub fn as_slice(&self) -> &[DynamicValue] {
        &self.stack
    }

    /// Returns the number of values on the stack.
    pub fn len(&self) -> usize {
        self.stack.len()
    }

    /// Returns true if the stack is empty.
    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// Removes every value.
    pub fn clear(&mut self) {
        self.stack.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ValueStack {
        ValueStack::from_values(vec![
            DynamicValue::from(1),
            DynamicValue::from("two"),
            DynamicValue::from(true),
        ])
    }

    #[test]
    fn test_positions_are_one_based() {
        let stack = sample();
        assert_eq!(stack.get(1).unwrap(), &DynamicValue::from(1));
        assert_eq!(stack.get(3).unwrap(), &DynamicValue::from(true));
        assert!(stack.get(0).is_err());
        assert!(matches!(
            stack.get(4),
            Err(VmError::StackIndexOutOfRange { position: 4, size: 3 })
        ));
    }

    #[test]
    fn test_range() {
        let stack = sample();
        assert_eq!(stack.range(2, 3).unwrap().len(), 2);
        assert_eq!(stack.range(1, 3).unwrap().len(), 3);
        assert!(stack.range(3, 2).unwrap().is_empty());
        assert!(stack.range(2, 4).is_err());
        assert!(stack.range(0, 1).is_err());
    }

    #[test]
    fn test_push_pop() {
        let mut stack = ValueStack::new();
        assert!(matches!(stack.pop(), Err(VmError::StackUnderflow)));
        stack.push(DynamicValue::Nil);
        assert!(stack.peek().unwrap().is_nil());
        assert_eq!(stack.len(), 1);
        stack.pop().unwrap();
        assert!(stack.is_empty());
    }
}
