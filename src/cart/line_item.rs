use crate::gateway::PendingSaleItem;
use crate::model::{Product, ProductId, SaleItemId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One product-and-quantity entry of a cart.
///
/// Serialized with camelCase keys; this is the shape of a cached cart entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub product_id: ProductId,
    /// Set once the line exists as a persisted sale item.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sale_item_id: Option<SaleItemId>,
    pub name: String,
    pub unit_price: Decimal,
    pub quantity: u32,
}

impl LineItem {
    /// A fresh line for `product` with quantity 1.
    pub fn for_product(product: &Product) -> Self {
        Self {
            product_id: product.id,
            sale_item_id: None,
            name: product.name.clone(),
            unit_price: product.price,
            quantity: 1,
        }
    }

    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

impl From<&PendingSaleItem> for LineItem {
    /// A row whose product is gone hydrates as "Unknown" at price 0.
    fn from(row: &PendingSaleItem) -> Self {
        let (name, unit_price) = match &row.product {
            Some(p) => (p.name.clone(), p.price),
            None => ("Unknown".to_string(), Decimal::ZERO),
        };
        Self {
            product_id: row.product_id,
            sale_item_id: Some(row.id),
            name,
            unit_price,
            quantity: row.quantity.max(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::ProductSnapshot;

    #[test]
    fn test_cache_shape_uses_camel_case() {
        let line = LineItem {
            product_id: ProductId(1),
            sale_item_id: Some(SaleItemId(4)),
            name: "Tea leaf salad".into(),
            unit_price: Decimal::new(1000, 0),
            quantity: 2,
        };
        let json = serde_json::to_value(&line).unwrap();
        assert_eq!(json["productId"], 1);
        assert_eq!(json["saleItemId"], 4);
        assert_eq!(json["quantity"], 2);
        assert!(json.get("unitPrice").is_some());
    }

    #[test]
    fn test_unresolved_product_hydrates_as_unknown() {
        let row = PendingSaleItem {
            id: SaleItemId(3),
            product_id: ProductId(9),
            quantity: 2,
            product: None,
        };
        let line = LineItem::from(&row);
        assert_eq!(line.name, "Unknown");
        assert_eq!(line.unit_price, Decimal::ZERO);
        assert_eq!(line.sale_item_id, Some(SaleItemId(3)));

        let priced = PendingSaleItem {
            product: Some(ProductSnapshot {
                name: "Mohinga".into(),
                price: Decimal::new(1500, 0),
            }),
            ..row
        };
        assert_eq!(LineItem::from(&priced).line_total(), Decimal::new(3000, 0));
    }
}
