//! # SaleItem Actor
//!
//! Persisted order lines. The actor runs with `(SaleClient, ProductClient)` as its
//! context so every row points at a live pending sale and an existing product.

pub mod entity;
pub mod error;

pub use entity::{SaleItemAction, SaleItemContext};
pub use error::*;

use crate::clients::SaleItemClient;
use crate::framework::ResourceActor;
use crate::model::SaleItem;

/// Creates a new SaleItem actor and its client.
///
/// Run it with `actor.run((sale_client, product_client))`.
pub fn new(buffer_size: usize) -> (ResourceActor<SaleItem>, SaleItemClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, SaleItemClient::new(generic_client))
}
