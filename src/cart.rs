//! Session-scoped shopping cart.
//!
//! A cart maps product id (string) to a quantity that is always > 0; the
//! quantity rules live here so every route mutates the cart the same way.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    items: BTreeMap<String, i64>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Increments the quantity for a product, inserting it when absent.
    /// Quantities ≤ 0 are ignored.
    pub fn add(&mut self, product_id: &str, quantity: i64) {
        if quantity <= 0 {
            return;
        }
        *self.items.entry(product_id.to_string()).or_insert(0) += quantity;
    }

    /// Sets an exact quantity; a quantity ≤ 0 removes the entry.
    pub fn set_quantity(&mut self, product_id: &str, quantity: i64) {
        if quantity <= 0 {
            self.items.remove(product_id);
        } else {
            self.items.insert(product_id.to_string(), quantity);
        }
    }

    /// Removes an entry unconditionally; removing a missing id is a no-op.
    pub fn remove(&mut self, product_id: &str) {
        self.items.remove(product_id);
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn quantity(&self, product_id: &str) -> Option<i64> {
        self.items.get(product_id).copied()
    }

    pub fn lines(&self) -> impl Iterator<Item = (&str, i64)> {
        self.items.iter().map(|(id, qty)| (id.as_str(), *qty))
    }
}
