use crate::model::SaleCompletion;

/// Custom transitions of a sale.
#[derive(Debug, Clone)]
pub enum SaleAction {
    /// Finalize a pending sale and free its table.
    Complete(SaleCompletion),
}
