//! Custom actions for the Table actor.
//!
//! Occupancy never changes through `update`; it follows the claim held by a pending
//! sale. Both actions answer with the table as it is after the transition.

use crate::model::SaleId;

#[derive(Debug, Clone, PartialEq)]
pub enum TableAction {
    /// Mark the table occupied by this pending sale.
    ///
    /// Re-claiming by the same sale is a no-op; a claim by any other sale fails
    /// while the table is held.
    Claim(SaleId),
    /// Free the table held by this sale. Releasing a free table is a no-op.
    Release(SaleId),
}
