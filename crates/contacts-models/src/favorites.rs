//! Optimistic favorite overrides.
//!
//! While a favorite submission for a contact is in flight, the value the
//! user asked for is shown instead of the persisted one. Entries are keyed
//! by [`ContactId`], so toggles on different contacts never interfere.

use std::collections::HashMap;

use crate::contact::{ContactId, ContactRecord};

/// Pending favorite submissions, keyed by contact.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingFavorites {
    pending: HashMap<ContactId, bool>,
}

impl PendingFavorites {
    /// Record a submission. A newer submission for the same contact wins.
    pub fn submit(&mut self, id: ContactId, favorite: bool) {
        self.pending.insert(id, favorite);
    }

    /// Clear the override once the submission settled, successfully or not.
    pub fn settle(&mut self, id: &ContactId) -> Option<bool> {
        self.pending.remove(id)
    }

    /// The pending value for `id`, if a submission is in flight.
    pub fn get(&self, id: &ContactId) -> Option<bool> {
        self.pending.get(id).copied()
    }

    /// Favorite state to display: the override if present, else the record.
    pub fn effective(&self, contact: &ContactRecord) -> bool {
        self.get(&contact.id).unwrap_or(contact.favorite)
    }

    /// Whether any submission is in flight.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Number of in-flight submissions.
    pub fn len(&self) -> usize {
        self.pending.len()
    }
}
