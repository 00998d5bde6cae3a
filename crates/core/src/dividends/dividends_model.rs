//! Dividend domain models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Progress of turning a dividend's cash into new fund shares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReinvestmentStatus {
    #[default]
    Pending,
    Partial,
    Completed,
}

/// A declared dividend for one fund holding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dividend {
    pub id: String,
    pub fund_id: String,
    pub fund_holding_id: String,
    pub record_date: NaiveDate,
    pub ex_dividend_date: NaiveDate,
    /// Shares held at declaration time.
    pub shares_owned: Decimal,
    pub dividend_per_share: Decimal,
    pub total_amount: Decimal,
    #[serde(default)]
    pub reinvestment_status: ReinvestmentStatus,
    #[serde(default)]
    pub buy_order_date: Option<NaiveDate>,
    /// Transaction (of type DIVIDEND) that reinvested this dividend.
    #[serde(default)]
    pub reinvestment_transaction_id: Option<String>,
}
