//! ActorEntity implementation for [`SaleItem`].

use super::error::SaleItemError;
use crate::clients::{ProductClient, SaleClient};
use crate::framework::{ActorClient, ActorEntity};
use crate::model::{SaleId, SaleItem, SaleItemCreate, SaleItemId, SaleItemUpdate};
use async_trait::async_trait;

/// Sales and products, looked up when a line is created or changed.
pub type SaleItemContext = (SaleClient, ProductClient);

#[derive(Debug, Clone)]
pub enum SaleItemAction {}

fn validate_quantity(quantity: u32) -> Result<(), SaleItemError> {
    if quantity == 0 {
        return Err(SaleItemError::ValidationError(
            "quantity must be at least 1".into(),
        ));
    }
    Ok(())
}

/// Lines may only change while their sale is pending.
async fn ensure_open(sales: &SaleClient, sale_id: SaleId) -> Result<(), SaleItemError> {
    let sale = sales
        .get(sale_id)
        .await
        .map_err(|e| SaleItemError::ActorCommunicationError(e.to_string()))?
        .ok_or(SaleItemError::UnknownSale(sale_id))?;
    if !sale.is_pending() {
        return Err(SaleItemError::SaleNotPending(sale_id));
    }
    Ok(())
}

#[async_trait]
impl ActorEntity for SaleItem {
    type Id = SaleItemId;
    type Create = SaleItemCreate;
    type Update = SaleItemUpdate;
    type Action = SaleItemAction;
    type ActionResult = ();
    type Context = SaleItemContext;
    type Error = SaleItemError;

    fn from_create_params(id: SaleItemId, params: SaleItemCreate) -> Result<Self, Self::Error> {
        validate_quantity(params.quantity)?;
        Ok(SaleItem {
            id,
            sale_id: params.sale_id,
            product_id: params.product_id,
            quantity: params.quantity,
        })
    }

    async fn on_create(&mut self, ctx: &SaleItemContext) -> Result<(), Self::Error> {
        let (sales, products) = ctx;
        ensure_open(sales, self.sale_id).await?;

        products
            .get(self.product_id)
            .await
            .map_err(|e| SaleItemError::ActorCommunicationError(e.to_string()))?
            .ok_or(SaleItemError::UnknownProduct(self.product_id))?;
        Ok(())
    }

    async fn on_update(
        &mut self,
        update: SaleItemUpdate,
        ctx: &SaleItemContext,
    ) -> Result<(), Self::Error> {
        validate_quantity(update.quantity)?;
        ensure_open(&ctx.0, self.sale_id).await?;
        self.quantity = update.quantity;
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: SaleItemAction,
        _ctx: &SaleItemContext,
    ) -> Result<(), Self::Error> {
        match action {}
    }
}
