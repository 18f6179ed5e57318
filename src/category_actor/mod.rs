//! # Category Actor
//!
//! Menu categories. The simplest resource: no dependencies and no custom actions.

pub mod entity;
pub mod error;

pub use entity::CategoryAction;
pub use error::*;

use crate::clients::CategoryClient;
use crate::framework::ResourceActor;
use crate::model::Category;

/// Creates a new Category actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Category>, CategoryClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, CategoryClient::new(generic_client))
}
