//! The per-table cart store.
//!
//! A store is bound to one table at a time and moves through three load phases:
//!
//! ```text
//!   open / switch_table          apply_load(Ok)
//!  ───────────────────▶ Loading ───────────────▶ Ready ──┐ mutators
//!                          │                       ▲     │ (mirror to cache)
//!                          │ apply_load(Err)       └─────┘
//!                          ▼
//!                        Failed
//! ```
//!
//! Mutators are rejected unless the store is `Ready`, so nothing typed while the
//! backend is still answering can be overwritten by (or overwrite) the pending sale.

use super::cache::{read_cart, write_cart, CartCache};
use super::Cart;
use crate::gateway::PendingSale;
use crate::model::{Product, ProductId, SaleId, TableId};
use crate::reconcile::Hydration;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorePhase {
    /// Waiting for the pending sale lookup.
    Loading,
    Ready,
    /// The lookup failed; reopen the table to retry.
    Failed,
}

impl fmt::Display for StorePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorePhase::Loading => f.write_str("loading"),
            StorePhase::Ready => f.write_str("ready"),
            StorePhase::Failed => f.write_str("failed"),
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CartError {
    #[error("cart for {table_id} is {phase}")]
    NotReady { table_id: TableId, phase: StorePhase },
}

/// Client-side state of one table's in-progress order.
pub struct CartStore {
    table_id: TableId,
    cart: Cart,
    pending_order_id: Option<SaleId>,
    phase: StorePhase,
    cache: Arc<dyn CartCache>,
}

impl fmt::Debug for CartStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartStore")
            .field("table_id", &self.table_id)
            .field("cart", &self.cart)
            .field("pending_order_id", &self.pending_order_id)
            .field("phase", &self.phase)
            .finish_non_exhaustive()
    }
}

impl CartStore {
    /// An empty store for `table_id`, waiting for its first load.
    pub fn open(table_id: TableId, cache: Arc<dyn CartCache>) -> Self {
        Self {
            table_id,
            cart: Cart::default(),
            pending_order_id: None,
            phase: StorePhase::Loading,
            cache,
        }
    }

    pub fn table_id(&self) -> TableId {
        self.table_id
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn pending_order_id(&self) -> Option<SaleId> {
        self.pending_order_id
    }

    pub fn phase(&self) -> StorePhase {
        self.phase
    }

    pub fn is_ready(&self) -> bool {
        self.phase == StorePhase::Ready
    }

    /// Rebinds the store to another table and waits for that table's load.
    ///
    /// The previous table's cache entry is left as it is.
    pub fn switch_table(&mut self, table_id: TableId) {
        debug!(from = %self.table_id, to = %table_id, "Switching table");
        self.table_id = table_id;
        self.cart = Cart::default();
        self.pending_order_id = None;
        self.phase = StorePhase::Loading;
    }

    /// Applies the outcome of a pending sale lookup.
    ///
    /// Returns `false` if the hydration was issued for a table other than the current
    /// one; such stale results are dropped without touching the store.
    pub fn apply_load(&mut self, hydration: Hydration) -> bool {
        if hydration.table_id != self.table_id {
            debug!(
                current = %self.table_id,
                stale = %hydration.table_id,
                "Discarding stale load"
            );
            return false;
        }
        match hydration.result {
            Ok(pending) => self.hydrate(pending.as_ref(), hydration.table_id),
            Err(e) => {
                warn!(table_id = %self.table_id, error = %e, "Pending sale lookup failed");
                self.cart = Cart::default();
                self.pending_order_id = None;
                self.phase = StorePhase::Failed;
            }
        }
        true
    }

    /// Seeds the cart for `table_id`: from the pending sale if there is one, else from
    /// the cache, else empty. Never writes the cache.
    pub fn hydrate(&mut self, pending: Option<&PendingSale>, table_id: TableId) {
        self.table_id = table_id;
        match pending {
            Some(sale) => {
                self.cart = Cart::from_pending_sale(sale);
                self.pending_order_id = Some(sale.id());
                info!(table_id = %table_id, sale_id = %sale.id(), items = self.cart.len(), "Hydrated from pending sale");
            }
            None => {
                self.pending_order_id = None;
                self.cart = match read_cart(self.cache.as_ref(), table_id) {
                    Ok(Some(items)) => Cart::from_items(items),
                    Ok(None) => Cart::default(),
                    Err(e) => {
                        warn!(table_id = %table_id, error = %e, "Ignoring unreadable cached cart");
                        Cart::default()
                    }
                };
                debug!(table_id = %table_id, items = self.cart.len(), "Hydrated from cache");
            }
        }
        self.phase = StorePhase::Ready;
    }

    pub fn add_item(&mut self, product: &Product) -> Result<(), CartError> {
        self.ensure_ready()?;
        let next = self.cart.with_added(product);
        self.commit(next);
        Ok(())
    }

    pub fn remove_item(&mut self, product_id: ProductId) -> Result<(), CartError> {
        self.ensure_ready()?;
        let next = self.cart.with_removed(product_id);
        self.commit(next);
        Ok(())
    }

    /// Shifts a quantity by `delta`; the result is never below 1.
    pub fn adjust_quantity(&mut self, product_id: ProductId, delta: i32) -> Result<(), CartError> {
        self.ensure_ready()?;
        let next = self.cart.with_adjusted(product_id, delta);
        self.commit(next);
        Ok(())
    }

    /// Empties the cart, forgets the pending order and evicts the cache entry.
    pub fn clear(&mut self) -> Result<(), CartError> {
        self.ensure_ready()?;
        self.reset();
        Ok(())
    }

    /// Records a successful save: the sale id becomes authoritative and the lines
    /// pick up their sale item ids.
    pub fn mark_saved(&mut self, sale: &PendingSale) {
        self.pending_order_id = Some(sale.id());
        let next = self.cart.with_sale_item_ids(sale);
        self.commit(next);
    }

    pub(crate) fn ensure_ready(&self) -> Result<(), CartError> {
        if self.is_ready() {
            Ok(())
        } else {
            Err(CartError::NotReady {
                table_id: self.table_id,
                phase: self.phase,
            })
        }
    }

    pub(crate) fn reset(&mut self) {
        self.cart = Cart::default();
        self.pending_order_id = None;
        self.persist();
    }

    fn commit(&mut self, next: Cart) {
        self.cart = next;
        self.persist();
    }

    fn persist(&self) {
        if let Err(e) = write_cart(self.cache.as_ref(), self.table_id, self.cart.items()) {
            warn!(table_id = %self.table_id, error = %e, "Cart cache write failed");
        }
    }
}
