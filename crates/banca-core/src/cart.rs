//! # Cart Model
//!
//! The in-memory cart backing a sale session.
//!
//! ## Invariants
//! - Items are unique by `product_id`: re-adding a product increments its
//!   quantity instead of duplicating the line.
//! - Quantities are always >= 1; setting a non-positive quantity removes the
//!   item entirely.
//! - The total is recomputed from the current items on every call. It is
//!   never cached, so it can never go stale.
//! - Stock is NOT enforced here. A product with zero stock can still be
//!   added; availability is a catalog concern surfaced by the backend when
//!   the sale is submitted.
//!
//! ## Side Effects
//! None. No network, no storage, no clock.

use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::types::{Product, SaleItem};

/// An item in the cart: a product snapshot plus a requested quantity.
///
/// The name and unit price are frozen at the moment of adding, so catalog
/// edits made while the operator is still scanning never change a line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub product_id: String,

    /// Product name at time of adding (frozen).
    pub name: String,

    /// Unit price in cents at time of adding (frozen).
    pub unit_price: Money,

    pub quantity: i64,
}

impl CartItem {
    /// Creates a cart item from a product with quantity 1.
    pub fn from_product(product: &Product) -> Self {
        CartItem {
            product_id: product.id.clone(),
            name: product.name.clone(),
            unit_price: product.price,
            quantity: 1,
        }
    }

    /// Line total (unit price × quantity).
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }
}

/// The cart for one sale session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { items: Vec::new() }
    }

    /// Adds a product to the cart, or increments its quantity by one when it
    /// is already present.
    pub fn add_item(&mut self, product: &Product) {
        if let Some(item) = self
            .items
            .iter_mut()
            .find(|i| i.product_id == product.id)
        {
            item.quantity += 1;
            return;
        }

        self.items.push(CartItem::from_product(product));
    }

    /// Sets the exact quantity of an item (not relative).
    ///
    /// A non-positive quantity removes the item. Unknown product ids are a
    /// no-op.
    pub fn update_quantity(&mut self, product_id: &str, quantity: i64) {
        if quantity <= 0 {
            self.remove_item(product_id);
            return;
        }

        if let Some(item) = self.items.iter_mut().find(|i| i.product_id == product_id) {
            item.quantity = quantity;
        }
    }

    /// Removes an item by product id. No-op when absent.
    pub fn remove_item(&mut self, product_id: &str) {
        self.items.retain(|i| i.product_id != product_id);
    }

    /// Empties the cart. Used after a successful checkout or an explicit
    /// new-sale action.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Current items, in insertion order.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct lines.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Sum of quantities across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Cart total, recomputed from the current items.
    pub fn total(&self) -> Money {
        self.items.iter().map(|i| i.line_total()).sum()
    }

    /// Snapshots the cart lines into sale items for a checkout draft.
    pub fn to_sale_items(&self) -> Vec<SaleItem> {
        self.items
            .iter()
            .map(|i| SaleItem {
                product_id: Some(i.product_id.clone()),
                name: i.name.clone(),
                quantity: i.quantity,
                unit_price: i.unit_price,
            })
            .collect()
    }
}
