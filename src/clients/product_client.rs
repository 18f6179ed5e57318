//! # Product Client
//!
//! Provides a high-level API for interacting with the `Product` actor.
//! It wraps a `ResourceClient<Product>` and exposes domain-specific methods.

use crate::framework::{ActorClient, FrameworkError, ResourceClient};
use crate::model::{Product, ProductCreate, ProductId, ProductUpdate};
use crate::product_actor::ProductError;
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the Product actor.
#[derive(Clone)]
pub struct ProductClient {
    inner: ResourceClient<Product>,
}

impl ProductClient {
    pub fn new(inner: ResourceClient<Product>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<Product> for ProductClient {
    type Error = ProductError;

    fn inner(&self) -> &ResourceClient<Product> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e {
            FrameworkError::NotFound(id) => ProductError::NotFound(id),
            other => other
                .entity_error::<ProductError>()
                .cloned()
                .unwrap_or_else(|| ProductError::ActorCommunicationError(other.to_string())),
        }
    }
}

impl ProductClient {
    #[instrument(skip(self))]
    pub async fn create_product(&self, params: ProductCreate) -> Result<ProductId, ProductError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn update_product(
        &self,
        id: ProductId,
        update: ProductUpdate,
    ) -> Result<Product, ProductError> {
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(Self::map_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::{create_mock_client, expect_update};
    use rust_decimal::Decimal;

    #[tokio::test]
    async fn test_update_product_forwards_partial_update() {
        let (client, mut receiver) = create_mock_client::<Product>(10);
        let products = ProductClient::new(client);

        let task = tokio::spawn(async move {
            products
                .update_product(
                    ProductId(3),
                    ProductUpdate {
                        price: Some(Decimal::new(1200, 0)),
                        ..Default::default()
                    },
                )
                .await
        });

        let (id, update, responder) = expect_update(&mut receiver)
            .await
            .expect("Expected Update request");
        assert_eq!(id, ProductId(3));
        assert_eq!(update.price, Some(Decimal::new(1200, 0)));
        assert!(update.name.is_none());

        responder
            .send(Ok(Product::new(ProductId(3), "Shan noodles", Decimal::new(1200, 0))))
            .unwrap();
        let product = task.await.unwrap().unwrap();
        assert_eq!(product.price, Decimal::new(1200, 0));
    }

    #[tokio::test]
    async fn test_category_error_is_preserved() {
        let (client, mut receiver) = create_mock_client::<Product>(10);
        let products = ProductClient::new(client);

        let task = tokio::spawn(async move {
            products
                .update_product(ProductId(3), ProductUpdate::default())
                .await
        });

        let (_, _, responder) = expect_update(&mut receiver).await.unwrap();
        responder
            .send(Err(FrameworkError::EntityError(Box::new(
                ProductError::InvalidCategory("category_9".into()),
            ))))
            .unwrap();

        assert_eq!(
            task.await.unwrap(),
            Err(ProductError::InvalidCategory("category_9".into()))
        );
    }
}
