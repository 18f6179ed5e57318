//! # SaleItem Client

use crate::framework::{ActorClient, Filter, FrameworkError, ResourceClient};
use crate::model::{ProductId, SaleId, SaleItem, SaleItemCreate, SaleItemId, SaleItemUpdate};
use crate::sale_item_actor::SaleItemError;
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the SaleItem actor.
#[derive(Clone)]
pub struct SaleItemClient {
    inner: ResourceClient<SaleItem>,
}

impl SaleItemClient {
    pub fn new(inner: ResourceClient<SaleItem>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<SaleItem> for SaleItemClient {
    type Error = SaleItemError;

    fn inner(&self) -> &ResourceClient<SaleItem> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e {
            FrameworkError::NotFound(id) => SaleItemError::NotFound(id),
            other => other
                .entity_error::<SaleItemError>()
                .cloned()
                .unwrap_or_else(|| SaleItemError::ActorCommunicationError(other.to_string())),
        }
    }
}

impl SaleItemClient {
    /// Inserts a line and returns the stored row.
    #[instrument(skip(self))]
    pub async fn add_item(&self, params: SaleItemCreate) -> Result<SaleItem, SaleItemError> {
        debug!("Sending request");
        let id = self.inner.create(params).await.map_err(Self::map_error)?;
        self.get(id)
            .await?
            .ok_or_else(|| SaleItemError::NotFound(id.to_string()))
    }

    #[instrument(skip(self))]
    pub async fn set_quantity(
        &self,
        id: SaleItemId,
        quantity: u32,
    ) -> Result<SaleItem, SaleItemError> {
        debug!("Sending request");
        self.inner
            .update(id, SaleItemUpdate { quantity })
            .await
            .map_err(Self::map_error)
    }

    /// Lines of a sale in insertion order.
    #[instrument(skip(self))]
    pub async fn items_for_sale(&self, sale_id: SaleId) -> Result<Vec<SaleItem>, SaleItemError> {
        self.inner
            .list(Filter::new(move |item: &SaleItem| item.sale_id == sale_id))
            .await
            .map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn find_for_product(
        &self,
        sale_id: SaleId,
        product_id: ProductId,
    ) -> Result<Option<SaleItem>, SaleItemError> {
        self.inner
            .find(Filter::new(move |item: &SaleItem| {
                item.sale_id == sale_id && item.product_id == product_id
            }))
            .await
            .map_err(Self::map_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::MockClient;

    fn item(id: u32, sale: u32, product: u32) -> SaleItem {
        SaleItem {
            id: SaleItemId(id),
            sale_id: SaleId(sale),
            product_id: ProductId(product),
            quantity: 1,
        }
    }

    #[tokio::test]
    async fn test_lookups_are_scoped_to_the_sale() {
        let rows = vec![item(1, 7, 1), item(2, 8, 1), item(3, 7, 2)];
        let mut mock = MockClient::<SaleItem>::new();
        mock.expect_list().return_ok(rows.clone());
        mock.expect_list().return_ok(rows);
        let items = SaleItemClient::new(mock.client());

        let ids: Vec<_> = items
            .items_for_sale(SaleId(7))
            .await
            .unwrap()
            .into_iter()
            .map(|i| i.id)
            .collect();
        assert_eq!(ids, [SaleItemId(1), SaleItemId(3)]);

        let found = items
            .find_for_product(SaleId(8), ProductId(1))
            .await
            .unwrap();
        assert_eq!(found.map(|i| i.id), Some(SaleItemId(2)));
        mock.verify();
    }
}
