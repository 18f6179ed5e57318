//! ActorEntity implementation for [`Product`].
//!
//! Products depend on the category resource: a product may only point at a category
//! that exists, checked through the injected [`CategoryClient`] on create and update.

use super::error::ProductError;
use crate::clients::CategoryClient;
use crate::framework::{ActorClient, ActorEntity};
use crate::model::{CategoryId, Product, ProductCreate, ProductId, ProductUpdate};
use async_trait::async_trait;
use rust_decimal::Decimal;

/// Products have no custom actions.
#[derive(Debug, Clone)]
pub enum ProductAction {}

fn validate(name: &str, price: Decimal) -> Result<(), ProductError> {
    if name.trim().is_empty() {
        return Err(ProductError::ValidationError("name must not be blank".into()));
    }
    if price.is_sign_negative() && !price.is_zero() {
        return Err(ProductError::ValidationError(format!(
            "price must not be negative, got {price}"
        )));
    }
    Ok(())
}

async fn ensure_category(categories: &CategoryClient, id: CategoryId) -> Result<(), ProductError> {
    match categories.get(id).await {
        Ok(Some(_)) => Ok(()),
        Ok(None) => Err(ProductError::InvalidCategory(id.to_string())),
        Err(e) => Err(ProductError::ActorCommunicationError(e.to_string())),
    }
}

#[async_trait]
impl ActorEntity for Product {
    type Id = ProductId;
    type Create = ProductCreate;
    type Update = ProductUpdate;
    type Action = ProductAction;
    type ActionResult = ();
    type Context = CategoryClient;
    type Error = ProductError;

    fn from_create_params(id: ProductId, params: ProductCreate) -> Result<Self, Self::Error> {
        validate(&params.name, params.price)?;
        Ok(Product {
            id,
            name: params.name,
            price: params.price,
            image_url: params.image_url,
            category_id: params.category_id,
        })
    }

    async fn on_create(&mut self, categories: &CategoryClient) -> Result<(), Self::Error> {
        if let Some(category) = self.category_id {
            ensure_category(categories, category).await?;
        }
        Ok(())
    }

    async fn on_update(
        &mut self,
        update: ProductUpdate,
        categories: &CategoryClient,
    ) -> Result<(), Self::Error> {
        if let Some(category) = update.category_id {
            ensure_category(categories, category).await?;
            self.category_id = Some(category);
        }
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(price) = update.price {
            self.price = price;
        }
        if update.image_url.is_some() {
            self.image_url = update.image_url;
        }
        validate(&self.name, self.price)
    }

    async fn handle_action(
        &mut self,
        action: ProductAction,
        _ctx: &CategoryClient,
    ) -> Result<(), Self::Error> {
        match action {}
    }
}
