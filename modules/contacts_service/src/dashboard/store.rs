//! Client-side contact store
//!
//! The page owns one store and hands out clones of the handle; all clones
//! see the same rows. Rollback is done with whole-list snapshots: a
//! restore replaces the list, it never merges. Anything that changed the
//! rows between `remove` and `restore` is rolled back as well.

use crate::contract::Contact;
use parking_lot::RwLock;
use std::sync::Arc;

/// Full copy of the list taken before an optimistic change
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreSnapshot(Vec<Contact>);

impl StoreSnapshot {
    pub fn contacts(&self) -> &[Contact] {
        &self.0
    }
}

#[derive(Debug, Clone, Default)]
pub struct ContactStore {
    rows: Arc<RwLock<Vec<Contact>>>,
}

impl ContactStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current rows in display order
    pub fn rows(&self) -> Vec<Contact> {
        self.rows.read().clone()
    }

    pub fn len(&self) -> usize {
        self.rows.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.read().is_empty()
    }

    pub fn get(&self, id: &str) -> Option<Contact> {
        self.rows.read().iter().find(|c| c.id == id).cloned()
    }

    /// Replace everything (initial load)
    pub fn replace_all(&self, rows: Vec<Contact>) {
        *self.rows.write() = rows;
    }

    /// Newly created contacts go first
    pub fn prepend(&self, contact: Contact) {
        self.rows.write().insert(0, contact);
    }

    /// Swap in an updated contact at the position of the row with the same id.
    /// Returns false when no row matched.
    pub fn replace(&self, contact: Contact) -> bool {
        let mut rows = self.rows.write();
        match rows.iter_mut().find(|c| c.id == contact.id) {
            Some(slot) => {
                *slot = contact;
                true
            }
            None => false,
        }
    }

    /// Optimistically drop a row; the returned snapshot is taken under the
    /// same lock, before the removal
    pub fn remove(&self, id: &str) -> StoreSnapshot {
        let mut rows = self.rows.write();
        let snapshot = StoreSnapshot(rows.clone());
        rows.retain(|c| c.id != id);
        snapshot
    }

    /// Put back exactly the rows captured in `snapshot`
    pub fn restore(&self, snapshot: StoreSnapshot) {
        *self.rows.write() = snapshot.0;
    }
}
