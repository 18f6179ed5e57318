//! [`OrderGateway`] over the in-process resource actors.

use super::{GatewayError, OrderGateway, PendingSale, PendingSaleItem, ProductSnapshot};
use crate::cart::LineItem;
use crate::clients::{ProductClient, SaleClient, SaleItemClient};
use crate::framework::ActorClient;
use crate::model::{
    PaymentMethod, Sale, SaleCompletion, SaleCreate, SaleId, SaleItem, SaleItemCreate, TableId,
    UserId,
};
use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use std::collections::HashSet;
use tracing::{debug, info, instrument, warn};

/// Gateway backed by the sale, sale item and product actors.
///
/// Create and update are all-or-nothing: products are checked before anything is
/// written, and a failure part way through undoes the rows already written.
///
/// Table occupancy is not touched here directly: the sale actor claims and releases
/// tables as part of opening and completing a sale.
#[derive(Clone)]
pub struct BackendGateway {
    sales: SaleClient,
    sale_items: SaleItemClient,
    products: ProductClient,
}

impl BackendGateway {
    pub fn new(sales: SaleClient, sale_items: SaleItemClient, products: ProductClient) -> Self {
        Self {
            sales,
            sale_items,
            products,
        }
    }

    /// Reads the line rows of `sale` and resolves their products.
    async fn with_items(&self, sale: Sale) -> Result<PendingSale, GatewayError> {
        let rows = self.sale_items.items_for_sale(sale.id).await?;
        let mut items = Vec::with_capacity(rows.len());
        for row in rows {
            let product = self
                .products
                .get(row.product_id)
                .await?
                .map(|p| ProductSnapshot {
                    name: p.name,
                    price: p.price,
                });
            items.push(PendingSaleItem {
                id: row.id,
                product_id: row.product_id,
                quantity: row.quantity,
                product,
            });
        }
        Ok(PendingSale { sale, items })
    }

    /// Fails with `NotFound` on the first line whose product no longer exists.
    async fn ensure_products(&self, items: &[LineItem]) -> Result<(), GatewayError> {
        for item in items {
            if self.products.get(item.product_id).await?.is_none() {
                return Err(GatewayError::NotFound(item.product_id.to_string()));
            }
        }
        Ok(())
    }

    async fn insert_lines(&self, sale_id: SaleId, items: &[LineItem]) -> Result<(), GatewayError> {
        for item in items {
            self.sale_items
                .add_item(SaleItemCreate {
                    sale_id,
                    product_id: item.product_id,
                    quantity: item.quantity,
                })
                .await?;
        }
        Ok(())
    }

    /// Upserts one row per cart line and deletes rows whose product left the cart.
    async fn sync_lines(
        &self,
        sale_id: SaleId,
        items: &[LineItem],
        before: &[SaleItem],
    ) -> Result<(), GatewayError> {
        for item in items {
            match before.iter().find(|row| row.product_id == item.product_id) {
                Some(row) if row.quantity == item.quantity => {}
                Some(row) => {
                    self.sale_items.set_quantity(row.id, item.quantity).await?;
                }
                None => {
                    self.sale_items
                        .add_item(SaleItemCreate {
                            sale_id,
                            product_id: item.product_id,
                            quantity: item.quantity,
                        })
                        .await?;
                }
            }
        }

        let kept: HashSet<_> = items.iter().map(|i| i.product_id).collect();
        for row in before.iter().filter(|row| !kept.contains(&row.product_id)) {
            debug!(sale = %sale_id, item = %row.id, "Removing dropped line");
            self.sale_items.delete(row.id).await?;
        }
        Ok(())
    }

    /// Puts the rows of `sale_id` back to `before` after a failed update.
    async fn restore_lines(&self, sale_id: SaleId, before: &[SaleItem]) {
        let current = match self.sale_items.items_for_sale(sale_id).await {
            Ok(rows) => rows,
            Err(e) => {
                warn!(sale = %sale_id, error = %e, "Could not read lines to restore");
                return;
            }
        };
        for row in &current {
            let result = match before.iter().find(|b| b.id == row.id) {
                None => self.sale_items.delete(row.id).await,
                Some(old) if old.quantity != row.quantity => self
                    .sale_items
                    .set_quantity(row.id, old.quantity)
                    .await
                    .map(|_| ()),
                Some(_) => Ok(()),
            };
            if let Err(e) = result {
                warn!(sale = %sale_id, item = %row.id, error = %e, "Could not restore line");
            }
        }
        for old in before.iter().filter(|b| current.iter().all(|row| row.id != b.id)) {
            let result = self
                .sale_items
                .add_item(SaleItemCreate {
                    sale_id,
                    product_id: old.product_id,
                    quantity: old.quantity,
                })
                .await;
            if let Err(e) = result {
                warn!(sale = %sale_id, product = %old.product_id, error = %e, "Could not restore line");
            }
        }
        info!(sale = %sale_id, "Pending sale restored after failed update");
    }

    /// Removes a sale that was opened by a create that then failed.
    ///
    /// Deleting the pending sale releases its table.
    async fn discard_sale(&self, sale_id: SaleId) {
        match self.sale_items.items_for_sale(sale_id).await {
            Ok(rows) => {
                for row in rows {
                    if let Err(e) = self.sale_items.delete(row.id).await {
                        warn!(sale = %sale_id, item = %row.id, error = %e, "Could not discard line");
                    }
                }
            }
            Err(e) => warn!(sale = %sale_id, error = %e, "Could not read lines to discard"),
        }
        match self.sales.delete(sale_id).await {
            Ok(()) => info!(sale = %sale_id, "Discarded half-created sale"),
            Err(e) => warn!(sale = %sale_id, error = %e, "Could not discard sale"),
        }
    }
}

#[async_trait]
impl OrderGateway for BackendGateway {
    #[instrument(skip(self, items), fields(items = items.len()))]
    async fn create_pending_sale(
        &self,
        table_id: TableId,
        items: &[LineItem],
        total_amount: Decimal,
    ) -> Result<PendingSale, GatewayError> {
        self.ensure_products(items).await?;
        let sale = self
            .sales
            .open_sale(SaleCreate {
                table_id,
                total_amount,
                opened_at: Utc::now(),
            })
            .await?;

        if let Err(e) = self.insert_lines(sale.id, items).await {
            self.discard_sale(sale.id).await;
            return Err(e);
        }
        info!(sale = %sale.id, table = %table_id, "Pending sale created");
        self.with_items(sale).await
    }

    #[instrument(skip(self, items), fields(items = items.len()))]
    async fn update_pending_sale(
        &self,
        sale_id: SaleId,
        items: &[LineItem],
        total_amount: Decimal,
    ) -> Result<PendingSale, GatewayError> {
        let current = self
            .sales
            .get(sale_id)
            .await?
            .ok_or_else(|| GatewayError::NotFound(sale_id.to_string()))?;
        if !current.is_pending() {
            return Err(GatewayError::SaleNotPending(sale_id));
        }
        self.ensure_products(items).await?;

        let before = self.sale_items.items_for_sale(sale_id).await?;
        let updated = match self.sync_lines(sale_id, items, &before).await {
            Ok(()) => self
                .sales
                .update_total(sale_id, total_amount)
                .await
                .map_err(GatewayError::from),
            Err(e) => Err(e),
        };
        let sale = match updated {
            Ok(sale) => sale,
            Err(e) => {
                self.restore_lines(sale_id, &before).await;
                return Err(e);
            }
        };

        info!(sale = %sale_id, total = %total_amount, "Pending sale updated");
        self.with_items(sale).await
    }

    #[instrument(skip(self))]
    async fn complete_sale(
        &self,
        sale_id: SaleId,
        table_id: TableId,
        total_amount: Decimal,
        payment_method: PaymentMethod,
        cashier: Option<UserId>,
    ) -> Result<Sale, GatewayError> {
        let sale = self
            .sales
            .get(sale_id)
            .await?
            .ok_or_else(|| GatewayError::NotFound(sale_id.to_string()))?;
        if sale.table_id != table_id {
            return Err(GatewayError::WrongTable { sale_id, table_id });
        }

        let completed = self
            .sales
            .complete(
                sale_id,
                SaleCompletion {
                    total_amount,
                    payment_method,
                    cashier,
                    completed_at: Utc::now(),
                },
            )
            .await?;
        Ok(completed)
    }

    #[instrument(skip(self))]
    async fn get_pending_sale_by_table(
        &self,
        table_id: TableId,
    ) -> Result<Option<PendingSale>, GatewayError> {
        match self.sales.pending_for_table(table_id).await? {
            Some(sale) => Ok(Some(self.with_items(sale).await?)),
            None => Ok(None),
        }
    }
}
