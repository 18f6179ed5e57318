//! ActorEntity implementation for [`DiningTable`].
//!
//! The claim transitions live here. Because the table actor handles one message at a
//! time, two sales racing to open the same table are serialized: the first claim wins
//! and the second fails with [`TableError::AlreadyClaimed`].

use super::actions::TableAction;
use super::error::TableError;
use crate::framework::ActorEntity;
use crate::model::{DiningTable, TableCreate, TableId, TableUpdate};
use async_trait::async_trait;
use tracing::debug;

#[async_trait]
impl ActorEntity for DiningTable {
    type Id = TableId;
    type Create = TableCreate;
    type Update = TableUpdate;
    type Action = TableAction;
    type ActionResult = DiningTable;
    type Context = ();
    type Error = TableError;

    fn from_create_params(id: TableId, params: TableCreate) -> Result<Self, Self::Error> {
        if matches!(&params.name, Some(name) if name.trim().is_empty()) {
            return Err(TableError::ValidationError("name must not be blank".into()));
        }
        Ok(DiningTable::new(id, params.name))
    }

    async fn on_update(&mut self, update: TableUpdate, _ctx: &()) -> Result<(), Self::Error> {
        if let Some(name) = update.name {
            if name.trim().is_empty() {
                return Err(TableError::ValidationError("name must not be blank".into()));
            }
            self.name = name;
        }
        Ok(())
    }

    async fn on_delete(&self, _ctx: &()) -> Result<(), Self::Error> {
        match self.pending_sale {
            Some(held_by) => Err(TableError::AlreadyClaimed {
                table: self.id,
                held_by,
            }),
            None => Ok(()),
        }
    }

    async fn handle_action(
        &mut self,
        action: TableAction,
        _ctx: &(),
    ) -> Result<DiningTable, Self::Error> {
        match action {
            TableAction::Claim(sale) => match self.pending_sale {
                Some(held_by) if held_by != sale => {
                    return Err(TableError::AlreadyClaimed {
                        table: self.id,
                        held_by,
                    })
                }
                _ => {
                    self.pending_sale = Some(sale);
                    self.is_occupied = true;
                }
            },
            TableAction::Release(sale) => match self.pending_sale {
                Some(held_by) if held_by != sale => {
                    return Err(TableError::ValidationError(format!(
                        "{} cannot release {}, it is held by {}",
                        sale, self.id, held_by
                    )))
                }
                Some(_) => {
                    self.pending_sale = None;
                    self.is_occupied = false;
                }
                None => debug!(table = %self.id, %sale, "Release of a free table"),
            },
        }
        Ok(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SaleId;

    #[tokio::test]
    async fn test_claim_is_exclusive_until_released() {
        let mut table = DiningTable::new(TableId(4), None);
        assert_eq!(table.name, "Table 4");

        let claimed = table
            .handle_action(TableAction::Claim(SaleId(1)), &())
            .await
            .unwrap();
        assert!(claimed.is_occupied);
        assert_eq!(claimed.pending_sale, Some(SaleId(1)));

        // Same sale again is fine
        table
            .handle_action(TableAction::Claim(SaleId(1)), &())
            .await
            .unwrap();

        let err = table
            .handle_action(TableAction::Claim(SaleId(2)), &())
            .await
            .unwrap_err();
        assert_eq!(
            err,
            TableError::AlreadyClaimed {
                table: TableId(4),
                held_by: SaleId(1)
            }
        );

        let released = table
            .handle_action(TableAction::Release(SaleId(1)), &())
            .await
            .unwrap();
        assert!(!released.is_occupied);
        assert_eq!(released.pending_sale, None);
    }

    #[tokio::test]
    async fn test_release_by_other_sale_is_rejected() {
        let mut table = DiningTable::new(TableId(1), None);
        table
            .handle_action(TableAction::Claim(SaleId(5)), &())
            .await
            .unwrap();

        let result = table.handle_action(TableAction::Release(SaleId(6)), &()).await;
        assert!(matches!(result, Err(TableError::ValidationError(_))));
        assert!(table.is_occupied);
    }

    #[tokio::test]
    async fn test_occupied_table_cannot_be_deleted() {
        let mut table = DiningTable::new(TableId(2), Some("Patio".into()));
        assert!(table.on_delete(&()).await.is_ok());

        table
            .handle_action(TableAction::Claim(SaleId(3)), &())
            .await
            .unwrap();
        assert!(table.on_delete(&()).await.is_err());
    }
}
