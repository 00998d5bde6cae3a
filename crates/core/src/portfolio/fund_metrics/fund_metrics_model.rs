//! Fund metrics domain models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::prices::FundPricePoint;
use crate::transactions::Transaction;
use crate::utils::decimal_utils::round_money;

/// Which price a valuation uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PriceMode {
    /// Most recent price dated on or before the target date (forward fill).
    #[default]
    AsOfDate,
    /// Last price in the series regardless of its date. Used for "current" valuations.
    Latest,
}

/// Everything needed to value one fund holding on one date.
#[derive(Debug, Clone, Copy)]
pub struct FundMetricsInput<'a> {
    pub fund_holding_id: &'a str,
    pub fund_id: &'a str,
    pub target_date: NaiveDate,
    /// Ascending by date.
    pub transactions: &'a [Transaction],
    /// Shares acquired through dividend reinvestment as of `target_date`.
    pub reinvested_shares: Decimal,
    /// Ascending by date.
    pub prices: &'a [FundPricePoint],
    pub price_mode: PriceMode,
}

/// Metrics of one fund holding at a point in time. Values are unrounded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundMetrics {
    pub fund_holding_id: String,
    pub fund_id: String,
    pub date: NaiveDate,
    pub shares: Decimal,
    pub cost: Decimal,
    pub latest_price: Decimal,
    pub dividends: Decimal,
    pub value: Decimal,
    pub unrealized_gain: Decimal,
    pub fees: Decimal,
}

/// One day of a fund holding's history, as served to consumers and stored in
/// fund-holding snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundHistoryEntry {
    pub fund_holding_id: String,
    pub fund_id: String,
    pub date: NaiveDate,
    pub shares: Decimal,
    pub cost: Decimal,
    pub latest_price: Decimal,
    pub value: Decimal,
    pub unrealized_gain: Decimal,
    /// Value of reinvestment transactions booked so far.
    pub dividends: Decimal,
    /// Cash declared by dividends whose ex-dividend date has passed.
    pub dividend_income: Decimal,
    pub fees: Decimal,
}

impl FundMetrics {
    pub fn to_history_entry(&self, dividend_income: Decimal) -> FundHistoryEntry {
        FundHistoryEntry {
            fund_holding_id: self.fund_holding_id.clone(),
            fund_id: self.fund_id.clone(),
            date: self.date,
            shares: self.shares,
            cost: round_money(self.cost),
            latest_price: round_money(self.latest_price),
            value: round_money(self.value),
            unrealized_gain: round_money(self.unrealized_gain),
            dividends: round_money(self.dividends),
            dividend_income: round_money(dividend_income),
            fees: round_money(self.fees),
        }
    }
}
