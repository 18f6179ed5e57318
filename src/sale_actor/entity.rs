//! ActorEntity implementation for [`Sale`].
//!
//! The sale's hooks are where table occupancy is kept in step with sale status:
//!
//! | Hook | Table effect |
//! |---|---|
//! | `on_create` | claim the table for the new sale |
//! | `Complete` | release the claim, then mark the sale completed |
//! | `on_delete` | release the claim if the sale is still pending |
//!
//! The claim is a single message to the table actor, so two sales racing for one table
//! cannot both succeed.

use super::actions::SaleAction;
use super::error::SaleError;
use crate::clients::TableClient;
use crate::framework::ActorEntity;
use crate::model::{Sale, SaleCreate, SaleId, SaleStatus, SaleUpdate, TableId};
use crate::table_actor::TableError;
use async_trait::async_trait;
use rust_decimal::Decimal;
use tracing::info;

fn validate_total(total: Decimal) -> Result<(), SaleError> {
    if total.is_sign_negative() && !total.is_zero() {
        return Err(SaleError::ValidationError(format!(
            "total must not be negative, got {total}"
        )));
    }
    Ok(())
}

fn table_failure(table_id: TableId, err: TableError) -> SaleError {
    match err {
        TableError::AlreadyClaimed { held_by, .. } => SaleError::DuplicatePending {
            table_id,
            existing: held_by,
        },
        TableError::NotFound(_) => SaleError::TableNotFound(table_id),
        TableError::ValidationError(msg) => SaleError::ValidationError(msg),
        TableError::ActorCommunicationError(msg) => SaleError::ActorCommunicationError(msg),
    }
}

impl Sale {
    fn ensure_pending(&self) -> Result<(), SaleError> {
        if self.is_pending() {
            Ok(())
        } else {
            Err(SaleError::NotPending(self.id))
        }
    }
}

#[async_trait]
impl ActorEntity for Sale {
    type Id = SaleId;
    type Create = SaleCreate;
    type Update = SaleUpdate;
    type Action = SaleAction;
    type ActionResult = Sale;
    type Context = TableClient;
    type Error = SaleError;

    fn from_create_params(id: SaleId, params: SaleCreate) -> Result<Self, Self::Error> {
        validate_total(params.total_amount)?;
        Ok(Sale {
            id,
            table_id: params.table_id,
            status: SaleStatus::Pending,
            total_amount: params.total_amount,
            payment_method: None,
            cashier: None,
            created_at: params.opened_at,
            completed_at: None,
        })
    }

    async fn on_create(&mut self, tables: &TableClient) -> Result<(), Self::Error> {
        tables
            .claim(self.table_id, self.id)
            .await
            .map_err(|e| table_failure(self.table_id, e))?;
        Ok(())
    }

    async fn on_update(&mut self, update: SaleUpdate, _tables: &TableClient) -> Result<(), Self::Error> {
        self.ensure_pending()?;
        validate_total(update.total_amount)?;
        self.total_amount = update.total_amount;
        Ok(())
    }

    async fn on_delete(&self, tables: &TableClient) -> Result<(), Self::Error> {
        if self.is_pending() {
            tables
                .release(self.table_id, self.id)
                .await
                .map_err(|e| table_failure(self.table_id, e))?;
        }
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: SaleAction,
        tables: &TableClient,
    ) -> Result<Sale, Self::Error> {
        match action {
            SaleAction::Complete(completion) => {
                self.ensure_pending()?;
                validate_total(completion.total_amount)?;
                tables
                    .release(self.table_id, self.id)
                    .await
                    .map_err(|e| table_failure(self.table_id, e))?;

                self.status = SaleStatus::Completed;
                self.total_amount = completion.total_amount;
                self.payment_method = Some(completion.payment_method);
                self.cashier = completion.cashier;
                self.completed_at = Some(completion.completed_at);
                info!(sale = %self.id, table = %self.table_id, total = %self.total_amount, "Sale completed");
                Ok(self.clone())
            }
        }
    }
}
