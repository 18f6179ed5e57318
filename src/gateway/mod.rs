//! # Order Mutation Gateway
//!
//! The backend surface the cart core depends on. [`CheckoutOrchestrator`](crate::checkout::CheckoutOrchestrator)
//! and [`PendingSaleReconciler`](crate::reconcile::PendingSaleReconciler) are generic over
//! [`OrderGateway`], so any storage engine that honours the contract below can sit behind
//! them. [`BackendGateway`] is the implementation over the in-process resource actors.
//!
//! Calls are independent RPCs. A sequence of them (create, then complete) is not a
//! transaction: if a later call fails, earlier ones stay applied.

mod actor_gateway;

pub use actor_gateway::BackendGateway;

use crate::cart::LineItem;
use crate::model::{PaymentMethod, ProductId, Sale, SaleId, SaleItemId, TableId, UserId};
use crate::product_actor::ProductError;
use crate::sale_actor::SaleError;
use crate::sale_item_actor::SaleItemError;
use async_trait::async_trait;
use rust_decimal::Decimal;
use thiserror::Error;

/// Name and price of a product as resolved when a pending sale is read.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductSnapshot {
    pub name: String,
    pub price: Decimal,
}

/// A persisted line of a pending sale.
///
/// `product` is `None` when the product has since been deleted.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingSaleItem {
    pub id: SaleItemId,
    pub product_id: ProductId,
    pub quantity: u32,
    pub product: Option<ProductSnapshot>,
}

/// A sale row together with its line rows.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingSale {
    pub sale: Sale,
    pub items: Vec<PendingSaleItem>,
}

impl PendingSale {
    pub fn id(&self) -> SaleId {
        self.sale.id
    }
}

/// Errors surfaced by an [`OrderGateway`].
#[derive(Debug, Clone, Error, PartialEq)]
pub enum GatewayError {
    #[error("Not found: {0}")]
    NotFound(String),

    /// The sale was already completed.
    #[error("{0} is not pending")]
    SaleNotPending(SaleId),

    /// The table already has an unfinished sale.
    #[error("{table_id} already has pending {existing}")]
    DuplicatePendingSale { table_id: TableId, existing: SaleId },

    #[error("{sale_id} does not belong to {table_id}")]
    WrongTable { sale_id: SaleId, table_id: TableId },

    /// Any other backend failure.
    #[error("Backend error: {0}")]
    Backend(String),
}

impl From<SaleError> for GatewayError {
    fn from(e: SaleError) -> Self {
        match e {
            SaleError::NotFound(id) => GatewayError::NotFound(id),
            SaleError::NotPending(id) => GatewayError::SaleNotPending(id),
            SaleError::DuplicatePending { table_id, existing } => {
                GatewayError::DuplicatePendingSale { table_id, existing }
            }
            SaleError::TableNotFound(table) => GatewayError::NotFound(table.to_string()),
            other => GatewayError::Backend(other.to_string()),
        }
    }
}

impl From<SaleItemError> for GatewayError {
    fn from(e: SaleItemError) -> Self {
        match e {
            SaleItemError::NotFound(id) => GatewayError::NotFound(id),
            SaleItemError::SaleNotPending(id) => GatewayError::SaleNotPending(id),
            SaleItemError::UnknownSale(id) => GatewayError::NotFound(id.to_string()),
            SaleItemError::UnknownProduct(id) => GatewayError::NotFound(id.to_string()),
            other => GatewayError::Backend(other.to_string()),
        }
    }
}

impl From<ProductError> for GatewayError {
    fn from(e: ProductError) -> Self {
        match e {
            ProductError::NotFound(id) => GatewayError::NotFound(id),
            other => GatewayError::Backend(other.to_string()),
        }
    }
}

/// Persistence operations behind save and checkout.
#[async_trait]
pub trait OrderGateway: Send + Sync {
    /// Inserts a pending sale with one line row per item and marks the table occupied.
    async fn create_pending_sale(
        &self,
        table_id: TableId,
        items: &[LineItem],
        total_amount: Decimal,
    ) -> Result<PendingSale, GatewayError>;

    /// Re-totals a pending sale and upserts its lines by product.
    ///
    /// Line rows whose product is no longer in `items` are deleted.
    async fn update_pending_sale(
        &self,
        sale_id: SaleId,
        items: &[LineItem],
        total_amount: Decimal,
    ) -> Result<PendingSale, GatewayError>;

    /// Marks a pending sale completed and frees its table.
    async fn complete_sale(
        &self,
        sale_id: SaleId,
        table_id: TableId,
        total_amount: Decimal,
        payment_method: PaymentMethod,
        cashier: Option<UserId>,
    ) -> Result<Sale, GatewayError>;

    /// The unfinished sale of a table, if any.
    async fn get_pending_sale_by_table(
        &self,
        table_id: TableId,
    ) -> Result<Option<PendingSale>, GatewayError>;
}
