//! # Cart
//!
//! The client-side view of a table's in-progress order.
//!
//! - [`Cart`] - immutable snapshot with the derived totals
//! - [`CartStore`] - the per-table store: load phase, pending order id, cache mirroring
//! - [`CartCache`] - durable per-table storage ([`MemoryCartCache`], [`FileCartCache`])
//!
//! Totals are pure functions of a snapshot; only the store's mutators write the cache.

mod cache;
mod line_item;
mod store;

pub use cache::{
    cache_key, read_cart, write_cart, CacheError, CartCache, FileCartCache, MemoryCartCache,
};
pub use line_item::LineItem;
pub use store::{CartError, CartStore, StorePhase};

use crate::gateway::PendingSale;
use crate::model::{Product, ProductId};
use rust_decimal::Decimal;

/// Flat tax applied to the subtotal.
pub const TAX_RATE: Decimal = Decimal::from_parts(5, 0, 0, false, 2);

/// An ordered set of line items, unique by product.
///
/// Every mutator returns a new snapshot and leaves `self` untouched.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// Builds a cart from lines of unknown provenance (a cache entry, for instance).
    ///
    /// Duplicate products are merged into the first occurrence and quantities are
    /// raised to at least 1, so the result always satisfies the cart invariants.
    pub fn from_items(lines: impl IntoIterator<Item = LineItem>) -> Self {
        let mut items: Vec<LineItem> = Vec::new();
        for mut line in lines {
            line.quantity = line.quantity.max(1);
            match items.iter_mut().find(|i| i.product_id == line.product_id) {
                Some(existing) => existing.quantity = existing.quantity.saturating_add(line.quantity),
                None => items.push(line),
            }
        }
        Self { items }
    }

    /// Hydrates from a persisted pending sale, one line per row.
    pub fn from_pending_sale(sale: &PendingSale) -> Self {
        Self::from_items(sale.items.iter().map(LineItem::from))
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn quantity_of(&self, product_id: ProductId) -> Option<u32> {
        self.items
            .iter()
            .find(|i| i.product_id == product_id)
            .map(|i| i.quantity)
    }

    /// One more of `product`, appended if it is not in the cart yet.
    pub fn with_added(&self, product: &Product) -> Self {
        let mut items = self.items.clone();
        match items.iter_mut().find(|i| i.product_id == product.id) {
            Some(line) => line.quantity = line.quantity.saturating_add(1),
            None => items.push(LineItem::for_product(product)),
        }
        Self { items }
    }

    pub fn with_removed(&self, product_id: ProductId) -> Self {
        Self {
            items: self
                .items
                .iter()
                .filter(|i| i.product_id != product_id)
                .cloned()
                .collect(),
        }
    }

    /// Shifts a quantity by `delta`, never below 1. Unknown products are ignored.
    pub fn with_adjusted(&self, product_id: ProductId, delta: i32) -> Self {
        let mut items = self.items.clone();
        if let Some(line) = items.iter_mut().find(|i| i.product_id == product_id) {
            let next = (i64::from(line.quantity) + i64::from(delta)).clamp(1, i64::from(u32::MAX));
            line.quantity = next as u32;
        }
        Self { items }
    }

    /// Copies sale item ids from a saved sale onto the matching lines.
    pub fn with_sale_item_ids(&self, sale: &PendingSale) -> Self {
        let mut items = self.items.clone();
        for line in items.iter_mut() {
            if let Some(row) = sale.items.iter().find(|r| r.product_id == line.product_id) {
                line.sale_item_id = Some(row.id);
            }
        }
        Self { items }
    }

    pub fn subtotal(&self) -> Decimal {
        self.items.iter().map(LineItem::line_total).sum()
    }

    pub fn tax(&self) -> Decimal {
        self.subtotal() * TAX_RATE
    }

    pub fn total(&self) -> Decimal {
        self.subtotal() + self.tax()
    }
}
