//! Row types of the backend resources. The [`ActorEntity`](crate::framework::ActorEntity)
//! implementations live next to each resource's actor module.

/// Declares a `u32` newtype id, displayed as `<prefix>_<n>` in logs.
macro_rules! resource_id {
    ($name:ident, $prefix:literal) => {
        paste::paste! {
            #[doc = "Type-safe identifier for " $name " rows."]
            #[derive(
                Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash,
                serde::Serialize, serde::Deserialize,
            )]
            #[serde(transparent)]
            pub struct [<$name Id>](pub u32);

            impl From<u32> for [<$name Id>] {
                fn from(id: u32) -> Self {
                    Self(id)
                }
            }

            impl std::fmt::Display for [<$name Id>] {
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    write!(f, concat!($prefix, "_{}"), self.0)
                }
            }
        }
    };
}

pub mod category;
pub mod product;
pub mod sale;
pub mod sale_item;
pub mod table;
pub mod user;

pub use category::*;
pub use product::*;
pub use sale::*;
pub use sale_item::*;
pub use table::*;
pub use user::*;
