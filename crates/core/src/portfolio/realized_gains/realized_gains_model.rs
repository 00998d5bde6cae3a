//! Realized gain/loss domain models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Gain or loss locked in by one sale. Produced when the sale is recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RealizedGainLossRecord {
    pub id: String,
    pub portfolio_id: String,
    pub fund_id: String,
    pub transaction_id: String,
    pub transaction_date: NaiveDate,
    pub shares_sold: Decimal,
    pub cost_basis: Decimal,
    pub sale_proceeds: Decimal,
    pub realized_gain_loss: Decimal,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RealizedGainTotals {
    pub realized_gain: Decimal,
    pub sale_proceeds: Decimal,
    pub cost_basis: Decimal,
}
