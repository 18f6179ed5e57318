//! # Product Actor
//!
//! Sellable menu items. The actor runs with a [`CategoryClient`] as its context so a
//! product can never reference a category that does not exist.

pub mod entity;
pub mod error;

pub use entity::ProductAction;
pub use error::*;

use crate::clients::{CategoryClient, ProductClient};
use crate::framework::ResourceActor;
use crate::model::Product;

/// Creates a new Product actor and its client.
///
/// Run it with `actor.run(category_client)`.
pub fn new(buffer_size: usize) -> (ResourceActor<Product>, ProductClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, ProductClient::new(generic_client))
}
