//! Error types for the Sale actor.

use crate::model::{SaleId, TableId};
use thiserror::Error;

/// Errors that can occur during sale operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SaleError {
    /// The requested sale was not found.
    #[error("Sale not found: {0}")]
    NotFound(String),

    /// The sale was already completed.
    #[error("{0} is not pending")]
    NotPending(SaleId),

    /// The sale references a table that does not exist.
    #[error("Table not found: {0}")]
    TableNotFound(TableId),

    /// The table already has a pending sale.
    #[error("{table_id} already has pending {existing}")]
    DuplicatePending { table_id: TableId, existing: SaleId },

    /// The sale data provided is invalid.
    #[error("Sale validation error: {0}")]
    ValidationError(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for SaleError {
    fn from(msg: String) -> Self {
        SaleError::ActorCommunicationError(msg)
    }
}
