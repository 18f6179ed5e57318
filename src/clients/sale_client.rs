//! # Sale Client
//!
//! Opens, re-totals, completes and queries sales.

use crate::framework::{ActorClient, Filter, FrameworkError, ResourceClient};
use crate::model::{Sale, SaleCompletion, SaleCreate, SaleId, SaleUpdate, TableId};
use crate::sale_actor::{SaleAction, SaleError};
use async_trait::async_trait;
use rust_decimal::Decimal;
use tracing::{debug, instrument};

/// Client for interacting with the Sale actor.
#[derive(Clone)]
pub struct SaleClient {
    inner: ResourceClient<Sale>,
}

impl SaleClient {
    pub fn new(inner: ResourceClient<Sale>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<Sale> for SaleClient {
    type Error = SaleError;

    fn inner(&self) -> &ResourceClient<Sale> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e {
            FrameworkError::NotFound(id) => SaleError::NotFound(id),
            other => other
                .entity_error::<SaleError>()
                .cloned()
                .unwrap_or_else(|| SaleError::ActorCommunicationError(other.to_string())),
        }
    }
}

impl SaleClient {
    /// Inserts a pending sale and claims its table. Returns the stored row.
    #[instrument(skip(self))]
    pub async fn open_sale(&self, params: SaleCreate) -> Result<Sale, SaleError> {
        debug!("Sending request");
        let id = self.inner.create(params).await.map_err(Self::map_error)?;
        self.get(id)
            .await?
            .ok_or_else(|| SaleError::NotFound(id.to_string()))
    }

    #[instrument(skip(self))]
    pub async fn update_total(&self, id: SaleId, total_amount: Decimal) -> Result<Sale, SaleError> {
        debug!("Sending request");
        self.inner
            .update(id, SaleUpdate { total_amount })
            .await
            .map_err(Self::map_error)
    }

    /// Finalizes a pending sale and frees its table.
    #[instrument(skip(self))]
    pub async fn complete(&self, id: SaleId, completion: SaleCompletion) -> Result<Sale, SaleError> {
        debug!("Sending request");
        self.inner
            .perform_action(id, SaleAction::Complete(completion))
            .await
            .map_err(Self::map_error)
    }

    /// The unfinished sale of a table, if any.
    #[instrument(skip(self))]
    pub async fn pending_for_table(&self, table_id: TableId) -> Result<Option<Sale>, SaleError> {
        self.inner
            .find(Filter::new(move |sale: &Sale| {
                sale.table_id == table_id && sale.is_pending()
            }))
            .await
            .map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn completed_sales(&self) -> Result<Vec<Sale>, SaleError> {
        self.inner
            .list(Filter::new(|sale: &Sale| !sale.is_pending()))
            .await
            .map_err(Self::map_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::{create_mock_client, expect_action, MockClient};
    use crate::model::{PaymentMethod, SaleStatus};
    use chrono::Utc;

    fn sale(id: u32, table: u32, status: SaleStatus) -> Sale {
        Sale {
            id: SaleId(id),
            table_id: TableId(table),
            status,
            total_amount: Decimal::new(2100, 0),
            payment_method: None,
            cashier: None,
            created_at: Utc::now(),
            completed_at: None,
        }
    }

    #[tokio::test]
    async fn test_pending_for_table_skips_completed_and_other_tables() {
        let mut mock = MockClient::<Sale>::new();
        mock.expect_list().return_ok(vec![
            sale(1, 3, SaleStatus::Completed),
            sale(2, 4, SaleStatus::Pending),
            sale(3, 3, SaleStatus::Pending),
        ]);
        mock.expect_list()
            .return_ok(vec![sale(1, 3, SaleStatus::Completed)]);
        let sales = SaleClient::new(mock.client());

        let found = sales.pending_for_table(TableId(3)).await.unwrap();
        assert_eq!(found.map(|s| s.id), Some(SaleId(3)));
        assert_eq!(sales.pending_for_table(TableId(3)).await.unwrap(), None);
        mock.verify();
    }

    #[tokio::test]
    async fn test_open_sale_reads_back_the_row() {
        let mut mock = MockClient::<Sale>::new();
        mock.expect_create().return_ok(SaleId(7));
        mock.expect_get(SaleId(7))
            .return_ok(Some(sale(7, 2, SaleStatus::Pending)));
        let sales = SaleClient::new(mock.client());

        let opened = sales
            .open_sale(SaleCreate {
                table_id: TableId(2),
                total_amount: Decimal::new(2100, 0),
                opened_at: Utc::now(),
            })
            .await
            .unwrap();
        assert_eq!(opened.id, SaleId(7));
        mock.verify();
    }

    #[tokio::test]
    async fn test_complete_sends_completion() {
        let (client, mut receiver) = create_mock_client::<Sale>(10);
        let sales = SaleClient::new(client);

        let task = tokio::spawn(async move {
            sales
                .complete(
                    SaleId(7),
                    SaleCompletion {
                        total_amount: Decimal::new(3150, 0),
                        payment_method: PaymentMethod::Cash,
                        cashier: None,
                        completed_at: Utc::now(),
                    },
                )
                .await
        });

        let (id, action, responder) = expect_action(&mut receiver).await.unwrap();
        assert_eq!(id, SaleId(7));
        let SaleAction::Complete(completion) = action;
        assert_eq!(completion.total_amount, Decimal::new(3150, 0));

        responder
            .send(Err(FrameworkError::EntityError(Box::new(SaleError::NotPending(
                SaleId(7),
            )))))
            .unwrap();
        assert_eq!(task.await.unwrap(), Err(SaleError::NotPending(SaleId(7))));
    }
}
