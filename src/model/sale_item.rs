use crate::model::{ProductId, SaleId};
use serde::{Deserialize, Serialize};

resource_id!(SaleItem, "sale_item");

/// A persisted line of a sale. Prices are resolved through the product at read time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleItem {
    pub id: SaleItemId,
    pub sale_id: SaleId,
    pub product_id: ProductId,
    pub quantity: u32,
}

#[derive(Debug, Clone)]
pub struct SaleItemCreate {
    pub sale_id: SaleId,
    pub product_id: ProductId,
    pub quantity: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleItemUpdate {
    pub quantity: u32,
}
