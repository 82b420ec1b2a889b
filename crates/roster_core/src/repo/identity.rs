//! Identity registry for employee instances.
//!
//! # Responsibility
//! - Guarantee at most one live `Employee` instance per persisted row id.
//! - Hand out shared handles so repeated loads of the same row alias the
//!   same instance.
//!
//! # Invariants
//! - Keys are storage-assigned row ids; unpersisted employees are never
//!   registered.
//! - The registry is owned by one repository value and dies with it. It is
//!   single-threaded state: `Rc<RefCell<_>>` matches the synchronous,
//!   unsynchronized execution model of this layer.

use crate::model::employee::Employee;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Shared, interior-mutable reference to a live employee instance.
pub type EmployeeHandle = Rc<RefCell<Employee>>;

/// Arena-style cache mapping row id to the one live instance for that row.
#[derive(Debug, Default)]
pub struct IdentityRegistry {
    live: HashMap<i64, EmployeeHandle>,
}

impl IdentityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the registered handle for `id`, if any.
    pub fn get(&self, id: i64) -> Option<EmployeeHandle> {
        self.live.get(&id).map(Rc::clone)
    }

    /// Registers `handle` as the live instance for `id`, replacing any
    /// previous entry.
    pub fn insert(&mut self, id: i64, handle: EmployeeHandle) {
        self.live.insert(id, handle);
    }

    /// Drops the entry for `id`; the instance itself stays alive for
    /// whoever still holds a handle.
    pub fn remove(&mut self, id: i64) -> Option<EmployeeHandle> {
        self.live.remove(&id)
    }

    /// Forgets every entry. Used when the backing table is dropped.
    pub fn clear(&mut self) {
        self.live.clear();
    }

    pub fn contains(&self, id: i64) -> bool {
        self.live.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::IdentityRegistry;
    use crate::model::employee::Employee;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn handle(name: &str) -> super::EmployeeHandle {
        Rc::new(RefCell::new(Employee::new(name, "Tester", 1).unwrap()))
    }

    #[test]
    fn get_returns_the_same_instance() {
        let mut registry = IdentityRegistry::new();
        let first = handle("Ada");
        registry.insert(7, Rc::clone(&first));

        let fetched = registry.get(7).unwrap();
        assert!(Rc::ptr_eq(&first, &fetched));
        assert!(registry.get(8).is_none());
    }

    #[test]
    fn remove_and_clear_forget_entries() {
        let mut registry = IdentityRegistry::new();
        registry.insert(1, handle("Ada"));
        registry.insert(2, handle("Grace"));
        assert_eq!(registry.len(), 2);

        registry.remove(1);
        assert!(!registry.contains(1));
        assert!(registry.contains(2));

        registry.clear();
        assert!(registry.is_empty());
    }
}
