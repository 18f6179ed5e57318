//! # Sales Reports
//!
//! Daily figures over completed sales. A sale is filed under the UTC date it was
//! completed on; pending sales are not revenue yet and are left out.

use crate::clients::SaleClient;
use crate::model::Sale;
use crate::sale_actor::SaleError;
use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use tracing::instrument;

/// Days covered by [`SalesReport::last_seven_days`].
pub const TREND_DAYS: u64 = 7;

/// Most recent sales listed in a report.
pub const RECENT_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DailySummary {
    pub total: Decimal,
    pub order_count: usize,
    /// Zero when there were no orders.
    pub average: Decimal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DailyPoint {
    pub date: NaiveDate,
    /// Short weekday name, e.g. "Mon".
    pub weekday: String,
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SalesReport {
    pub today: DailySummary,
    /// Oldest first, ending with `today`. Days without sales are zero.
    pub last_seven_days: Vec<DailyPoint>,
    /// Newest first.
    pub recent: Vec<Sale>,
}

impl SalesReport {
    pub fn build(sales: &[Sale], today: NaiveDate) -> Self {
        let mut completed: Vec<&Sale> = sales.iter().filter(|s| !s.is_pending()).collect();
        completed.sort_by_key(|s| std::cmp::Reverse(s.booked_at()));

        let mut by_day: BTreeMap<NaiveDate, (Decimal, usize)> = BTreeMap::new();
        for sale in &completed {
            let entry = by_day
                .entry(sale.booked_at().date_naive())
                .or_insert((Decimal::ZERO, 0));
            entry.0 += sale.total_amount;
            entry.1 += 1;
        }

        let (total, order_count) = by_day.get(&today).copied().unwrap_or((Decimal::ZERO, 0));
        let average = if order_count == 0 {
            Decimal::ZERO
        } else {
            (total / Decimal::from(order_count)).round_dp(2)
        };

        let last_seven_days = (0..TREND_DAYS)
            .rev()
            .filter_map(|back| today.checked_sub_days(Days::new(back)))
            .map(|date| DailyPoint {
                date,
                weekday: date.format("%a").to_string(),
                amount: by_day.get(&date).map(|d| d.0).unwrap_or(Decimal::ZERO),
            })
            .collect();

        Self {
            today: DailySummary {
                total,
                order_count,
                average,
            },
            last_seven_days,
            recent: completed.into_iter().take(RECENT_LIMIT).cloned().collect(),
        }
    }
}

/// Fetches completed sales and builds the report for `today`.
#[instrument(skip(sales))]
pub async fn sales_report(sales: &SaleClient, today: NaiveDate) -> Result<SalesReport, SaleError> {
    let completed = sales.completed_sales().await?;
    Ok(SalesReport::build(&completed, today))
}
