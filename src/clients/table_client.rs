//! # Table Client
//!
//! High-level API for the `DiningTable` actor: creation, renaming, the claim
//! transitions used by the sale actor, and the floor overview.

use crate::framework::{ActorClient, FrameworkError, ResourceClient};
use crate::model::{DiningTable, FloorSummary, SaleId, TableCreate, TableId, TableUpdate};
use crate::table_actor::{TableAction, TableError};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the Table actor.
#[derive(Clone)]
pub struct TableClient {
    inner: ResourceClient<DiningTable>,
}

impl TableClient {
    pub fn new(inner: ResourceClient<DiningTable>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<DiningTable> for TableClient {
    type Error = TableError;

    fn inner(&self) -> &ResourceClient<DiningTable> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e {
            FrameworkError::NotFound(id) => TableError::NotFound(id),
            other => other
                .entity_error::<TableError>()
                .cloned()
                .unwrap_or_else(|| TableError::ActorCommunicationError(other.to_string())),
        }
    }
}

impl TableClient {
    #[instrument(skip(self))]
    pub async fn create_table(&self, params: TableCreate) -> Result<TableId, TableError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn rename_table(&self, id: TableId, name: String) -> Result<DiningTable, TableError> {
        debug!("Sending request");
        self.inner
            .update(id, TableUpdate { name: Some(name) })
            .await
            .map_err(Self::map_error)
    }

    /// Marks the table occupied by `sale`.
    ///
    /// Fails with [`TableError::AlreadyClaimed`] if another sale holds it. Claiming a
    /// table again for the sale that already holds it succeeds.
    #[instrument(skip(self))]
    pub async fn claim(&self, id: TableId, sale: SaleId) -> Result<DiningTable, TableError> {
        debug!("Sending request");
        self.inner
            .perform_action(id, TableAction::Claim(sale))
            .await
            .map_err(Self::map_error)
    }

    /// Frees the table held by `sale`.
    #[instrument(skip(self))]
    pub async fn release(&self, id: TableId, sale: SaleId) -> Result<DiningTable, TableError> {
        debug!("Sending request");
        self.inner
            .perform_action(id, TableAction::Release(sale))
            .await
            .map_err(Self::map_error)
    }

    /// All tables in id order, with their occupied/available counts.
    #[instrument(skip(self))]
    pub async fn floor(&self) -> Result<(Vec<DiningTable>, FloorSummary), TableError> {
        let tables = self.list_all().await?;
        let summary = FloorSummary::of(&tables);
        debug!(occupied = summary.occupied, available = summary.available, "Floor");
        Ok((tables, summary))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::{create_mock_client, expect_action, MockClient};

    #[tokio::test]
    async fn test_claim_sends_claim_action() {
        let (client, mut receiver) = create_mock_client::<DiningTable>(10);
        let tables = TableClient::new(client);

        let task = tokio::spawn(async move { tables.claim(TableId(2), SaleId(9)).await });

        let (id, action, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");
        assert_eq!(id, TableId(2));
        assert!(matches!(action, TableAction::Claim(SaleId(9))));

        let mut row = DiningTable::new(TableId(2), None);
        row.is_occupied = true;
        row.pending_sale = Some(SaleId(9));
        responder.send(Ok(row)).unwrap();

        let table = task.await.unwrap().unwrap();
        assert!(table.is_occupied);
    }

    #[tokio::test]
    async fn test_typed_error_survives_the_channel() {
        let mut mock = MockClient::<DiningTable>::new();
        let conflict = TableError::AlreadyClaimed {
            table: TableId(2),
            held_by: SaleId(1),
        };
        mock.expect_action(TableId(2))
            .return_err(FrameworkError::EntityError(Box::new(conflict.clone())));
        mock.expect_action(TableId(8))
            .return_err(FrameworkError::NotFound("table_8".into()));
        let tables = TableClient::new(mock.client());

        assert_eq!(tables.claim(TableId(2), SaleId(5)).await, Err(conflict));
        assert_eq!(
            tables.claim(TableId(8), SaleId(5)).await,
            Err(TableError::NotFound("table_8".into()))
        );
        mock.verify();
    }

    #[tokio::test]
    async fn test_floor_counts_occupied_tables() {
        let mut mock = MockClient::<DiningTable>::new();
        let mut busy = DiningTable::new(TableId(1), None);
        busy.is_occupied = true;
        mock.expect_list().return_ok(vec![
            busy,
            DiningTable::new(TableId(2), None),
            DiningTable::new(TableId(3), None),
        ]);
        let tables = TableClient::new(mock.client());

        let (rows, summary) = tables.floor().await.unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(summary, FloorSummary { occupied: 1, available: 2 });
        mock.verify();
    }
}
