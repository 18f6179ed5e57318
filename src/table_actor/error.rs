//! Error types for the Table actor.

use crate::model::{SaleId, TableId};
use thiserror::Error;

/// Errors that can occur during table operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TableError {
    /// The requested table was not found.
    #[error("Table not found: {0}")]
    NotFound(String),

    /// Another pending sale already holds the table.
    #[error("{table} is already held by {held_by}")]
    AlreadyClaimed { table: TableId, held_by: SaleId },

    /// The table data or transition is invalid.
    #[error("Table validation error: {0}")]
    ValidationError(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for TableError {
    fn from(msg: String) -> Self {
        TableError::ActorCommunicationError(msg)
    }
}
