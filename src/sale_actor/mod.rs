//! # Sale Actor
//!
//! Sale rows and their pending → completed transition.
//!
//! The actor runs with a [`TableClient`] as its context. Opening a sale claims its table
//! and completing it releases the claim, which keeps `DiningTable::is_occupied` in step
//! with the sale status and limits every table to one pending sale.
//!
//! ```rust
//! use table_pos::{sale_actor, table_actor};
//! use table_pos::model::{SaleCreate, TableCreate};
//! use rust_decimal::Decimal;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (table_actor, tables) = table_actor::new(8);
//!     let (sale_actor, sales) = sale_actor::new(8);
//!     tokio::spawn(table_actor.run(()));
//!     tokio::spawn(sale_actor.run(tables.clone()));
//!
//!     let table_id = tables.create_table(TableCreate::default()).await?;
//!     let sale = sales
//!         .open_sale(SaleCreate {
//!             table_id,
//!             total_amount: Decimal::new(2100, 0),
//!             opened_at: chrono::Utc::now(),
//!         })
//!         .await?;
//!     assert!(sale.is_pending());
//!     Ok(())
//! }
//! ```

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::SaleClient;
use crate::framework::ResourceActor;
use crate::model::Sale;

/// Creates a new Sale actor and its client.
///
/// Run it with `actor.run(table_client)`.
pub fn new(buffer_size: usize) -> (ResourceActor<Sale>, SaleClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, SaleClient::new(generic_client))
}
