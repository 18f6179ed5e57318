//! Dining tables and the floor overview.

use crate::model::SaleId;
use serde::{Deserialize, Serialize};

resource_id!(Table, "table");

/// A dining table on the floor.
///
/// `pending_sale` is the claim: the pending sale currently holding the table. A table
/// is occupied exactly while it is claimed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiningTable {
    pub id: TableId,
    pub name: String,
    pub is_occupied: bool,
    pub pending_sale: Option<SaleId>,
}

impl DiningTable {
    /// A free table. The name defaults to "Table <n>".
    pub fn new(id: TableId, name: Option<String>) -> Self {
        Self {
            id,
            name: name.unwrap_or_else(|| format!("Table {}", id.0)),
            is_occupied: false,
            pending_sale: None,
        }
    }
}

/// Payload for creating a new table.
#[derive(Debug, Clone, Default)]
pub struct TableCreate {
    pub name: Option<String>,
}

/// Payload for renaming a table. Occupancy only changes through claims.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableUpdate {
    pub name: Option<String>,
}

/// Occupied/available counts for the floor view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FloorSummary {
    pub occupied: usize,
    pub available: usize,
}

impl FloorSummary {
    pub fn of(tables: &[DiningTable]) -> Self {
        let occupied = tables.iter().filter(|t| t.is_occupied).count();
        Self {
            occupied,
            available: tables.len() - occupied,
        }
    }
}
