//! Generic resource framework: one actor per backend table.
//!
//! - [`ActorEntity`] - trait a row type implements to be managed by an actor
//! - [`ResourceActor`] - the actor owning the rows and processing requests sequentially
//! - [`ResourceClient`] - cloneable typed handle for sending requests
//! - [`ActorClient`] - shared read/delete surface for the resource-specific clients
//! - [`FrameworkError`] - errors of the framework itself
//!
//! See [`mock`] for testing clients without spawning actors.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;

pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{Filter, ResourceRequest, Response};
