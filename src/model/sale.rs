//! Sales: one row per order, pending while the table is seated and completed at checkout.

use crate::model::{TableId, UserId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

resource_id!(Sale, "sale");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SaleStatus {
    Pending,
    Completed,
}

impl fmt::Display for SaleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaleStatus::Pending => f.write_str("pending"),
            SaleStatus::Completed => f.write_str("completed"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    #[default]
    Cash,
    Digital,
}

/// A persisted sale row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sale {
    pub id: SaleId,
    pub table_id: TableId,
    pub status: SaleStatus,
    pub total_amount: Decimal,
    pub payment_method: Option<PaymentMethod>,
    pub cashier: Option<UserId>,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl Sale {
    pub fn is_pending(&self) -> bool {
        self.status == SaleStatus::Pending
    }

    /// The instant a report files this sale under.
    pub fn booked_at(&self) -> DateTime<Utc> {
        self.completed_at.unwrap_or(self.created_at)
    }
}

/// Payload for opening a pending sale on a table.
#[derive(Debug, Clone)]
pub struct SaleCreate {
    pub table_id: TableId,
    pub total_amount: Decimal,
    pub opened_at: DateTime<Utc>,
}

/// Running-total update of a pending sale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleUpdate {
    pub total_amount: Decimal,
}

/// Everything fixed at checkout.
#[derive(Debug, Clone, PartialEq)]
pub struct SaleCompletion {
    pub total_amount: Decimal,
    pub payment_method: PaymentMethod,
    pub cashier: Option<UserId>,
    pub completed_at: DateTime<Utc>,
}
