//! Cycle detection for the encoder.

use guest_vm::CompositeId;

/// Identities of the composites on the current encode recursion path.
///
/// Entries are strictly LIFO: every successful [`CycleGuard::enter`] is paired
/// with exactly one [`CycleGuard::leave`].
#[derive(Debug)]
pub struct CycleGuard {
    active: Vec<CompositeId>,
}

impl CycleGuard {
    pub fn new() -> Self {
        Self {
            active: Vec::with_capacity(4),
        }
    }

    /// Registers `id` as being traversed. Returns false, leaving the guard
    /// untouched, when `id` is already on the path.
    pub fn enter(&mut self, id: CompositeId) -> bool {
        if self.active.contains(&id) {
            return false;
        }
        self.active.push(id);
        true
    }

    /// Unregisters the most recently entered identity.
    pub fn leave(&mut self) {
        self.active.pop();
    }

    /// Number of composites currently on the path.
    pub fn depth(&self) -> usize {
        self.active.len()
    }

    pub fn contains(&self, id: CompositeId) -> bool {
        self.active.contains(&id)
    }
}

impl Default for CycleGuard {
    fn default() -> Self {
        Self::new()
    }
}
