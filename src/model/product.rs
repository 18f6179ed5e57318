//! Catalog products.
//!
//! See [`impl ActorEntity for Product`](crate::product_actor::entity) for the validation
//! applied on create and update.

use crate::model::CategoryId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

resource_id!(Product, "product");

/// A sellable menu item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Non-negative unit price.
    pub price: Decimal,
    pub image_url: Option<String>,
    pub category_id: Option<CategoryId>,
}

impl Product {
    /// Creates a new Product instance.
    ///
    /// # Arguments
    /// * `id` - Unique identifier (typically set by the actor system)
    /// * `name` - Display name
    /// * `price` - Unit price
    pub fn new(id: ProductId, name: impl Into<String>, price: Decimal) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            image_url: None,
            category_id: None,
        }
    }
}

/// Payload for creating a product.
#[derive(Debug, Clone)]
pub struct ProductCreate {
    pub name: String,
    pub price: Decimal,
    pub image_url: Option<String>,
    pub category_id: Option<CategoryId>,
}

/// Partial update; `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub price: Option<Decimal>,
    pub image_url: Option<String>,
    pub category_id: Option<CategoryId>,
}
