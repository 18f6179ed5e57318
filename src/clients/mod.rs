//! Type-safe wrappers around [`ResourceClient`](crate::framework::ResourceClient).
//!
//! One client per backend resource. Each exposes the domain operations of its resource
//! and recovers the typed resource error from [`FrameworkError`](crate::framework::FrameworkError)
//! through its `map_error`.

pub mod category_client;
pub mod product_client;
pub mod sale_client;
pub mod sale_item_client;
pub mod table_client;
pub mod user_client;

pub use category_client::*;
pub use product_client::*;
pub use sale_client::*;
pub use sale_item_client::*;
pub use table_client::*;
pub use user_client::*;
