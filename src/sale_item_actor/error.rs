//! Error types for the SaleItem actor.

use crate::model::{ProductId, SaleId};
use thiserror::Error;

/// Errors that can occur during sale item operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SaleItemError {
    /// The requested sale item was not found.
    #[error("Sale item not found: {0}")]
    NotFound(String),

    /// The referenced sale does not exist.
    #[error("Sale not found: {0}")]
    UnknownSale(SaleId),

    /// The referenced product does not exist.
    #[error("Product not found: {0}")]
    UnknownProduct(ProductId),

    /// Lines can only be added to a pending sale.
    #[error("{0} is not pending")]
    SaleNotPending(SaleId),

    /// The item data provided is invalid.
    #[error("Sale item validation error: {0}")]
    ValidationError(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for SaleItemError {
    fn from(msg: String) -> Self {
        SaleItemError::ActorCommunicationError(msg)
    }
}
