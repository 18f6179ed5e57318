//! # Checkout Orchestrator
//!
//! Sequences the gateway calls behind "save" and "checkout":
//!
//! | Store state | Save | Checkout |
//! |---|---|---|
//! | no pending order | create | create, complete |
//! | pending order `n` | update `n` | update `n`, complete `n` |
//!
//! Calls are awaited strictly in order and the store is borrowed exclusively for the
//! whole sequence. A failed call leaves the cart as it was; nothing is rolled back on
//! the backend.

use crate::cart::{CartError, CartStore, LineItem};
use crate::gateway::{GatewayError, OrderGateway, PendingSale};
use crate::model::{PaymentMethod, Sale, SaleId, User};
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{error, info, instrument, warn};

/// Where a cart stands relative to the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderPhase {
    /// Nothing saved yet.
    Draft,
    Saved(SaleId),
}

impl OrderPhase {
    pub fn of(store: &CartStore) -> Self {
        match store.pending_order_id() {
            Some(id) => OrderPhase::Saved(id),
            None => OrderPhase::Draft,
        }
    }
}

/// What a receipt is printed from.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletedOrder {
    pub sale: Sale,
    /// The cart as it was at checkout.
    pub items: Vec<LineItem>,
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CheckoutError {
    #[error("cart is empty")]
    EmptyCart,

    #[error("checkout requires a signed-in user")]
    Unauthenticated,

    #[error(transparent)]
    Cart(#[from] CartError),

    #[error("backend call failed: {0}")]
    Gateway(#[from] GatewayError),

    /// The order was saved but could not be completed; it stays pending on the backend.
    #[error("{sale_id} was saved but not completed: {source}")]
    Incomplete {
        sale_id: SaleId,
        #[source]
        source: GatewayError,
    },
}

pub struct CheckoutOrchestrator<G> {
    gateway: G,
}

impl<G: OrderGateway> CheckoutOrchestrator<G> {
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }

    /// Creates or updates the table's pending sale from the cart.
    ///
    /// The cart is kept; its pending order id becomes authoritative.
    #[instrument(skip_all, fields(table_id = %store.table_id()))]
    pub async fn save(&self, store: &mut CartStore) -> Result<PendingSale, CheckoutError> {
        store.ensure_ready()?;
        if store.cart().is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        match self.ensure_saved(store).await {
            Ok(saved) => {
                store.mark_saved(&saved);
                info!(sale_id = %saved.id(), total = %saved.sale.total_amount, "Order saved");
                Ok(saved)
            }
            Err(e) => {
                warn!(error = %e, "Save failed");
                Err(e.into())
            }
        }
    }

    /// Saves the cart, completes the sale and clears the cart.
    #[instrument(skip_all, fields(table_id = %store.table_id()))]
    pub async fn checkout(
        &self,
        store: &mut CartStore,
        actor: Option<&User>,
        payment_method: PaymentMethod,
    ) -> Result<CompletedOrder, CheckoutError> {
        let actor = actor.ok_or(CheckoutError::Unauthenticated)?;
        store.ensure_ready()?;
        if store.cart().is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let saved = match self.ensure_saved(store).await {
            Ok(saved) => saved,
            Err(e) => {
                warn!(error = %e, "Checkout failed before completion");
                return Err(e.into());
            }
        };
        // A retry must update this sale rather than open a second one.
        store.mark_saved(&saved);
        let cart = store.cart().clone();

        let sale_id = saved.id();
        let sale = match self
            .gateway
            .complete_sale(
                sale_id,
                store.table_id(),
                cart.total(),
                payment_method,
                Some(actor.id),
            )
            .await
        {
            Ok(sale) => sale,
            Err(source) => {
                error!(%sale_id, error = %source, "Sale saved but completion failed; it remains pending");
                return Err(CheckoutError::Incomplete { sale_id, source });
            }
        };

        store.reset();
        info!(%sale_id, total = %sale.total_amount, cashier = %actor.id, "Checkout complete");
        Ok(CompletedOrder {
            sale,
            items: cart.items().to_vec(),
            subtotal: cart.subtotal(),
            tax: cart.tax(),
            total: cart.total(),
        })
    }

    async fn ensure_saved(&self, store: &CartStore) -> Result<PendingSale, GatewayError> {
        let cart = store.cart();
        match store.pending_order_id() {
            None => {
                self.gateway
                    .create_pending_sale(store.table_id(), cart.items(), cart.total())
                    .await
            }
            Some(sale_id) => {
                self.gateway
                    .update_pending_sale(sale_id, cart.items(), cart.total())
                    .await
            }
        }
    }
}
