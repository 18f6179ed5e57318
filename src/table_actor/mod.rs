//! # Table Actor
//!
//! Dining tables and their occupancy. A table is occupied exactly while a pending sale
//! holds its claim; see [`TableAction`].
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](crate::framework::ActorEntity) implementation for [`DiningTable`]
//! - [`actions`] - [`TableAction`] claim/release transitions
//! - [`error`] - [`TableError`]
//! - [`new()`] - factory returning the actor and its [`TableClient`]
//!
//! ## Usage
//!
//! ```rust
//! use table_pos::table_actor;
//! use table_pos::model::{SaleId, TableCreate};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (actor, client) = table_actor::new(8);
//!     tokio::spawn(actor.run(()));
//!
//!     let id = client.create_table(TableCreate::default()).await?;
//!     let table = client.claim(id, SaleId(1)).await?;
//!     assert!(table.is_occupied);
//!     Ok(())
//! }
//! ```

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::TableClient;
use crate::framework::ResourceActor;
use crate::model::DiningTable;

/// Creates a new Table actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<DiningTable>, TableClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, TableClient::new(generic_client))
}
