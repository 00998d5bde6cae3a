//! Portfolio summary domain models and the in-memory data bundle the engine
//! computes over.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::dividends::Dividend;
use crate::portfolio::realized_gains::RealizedGainLossRecord;
use crate::portfolio::{FundHolding, Portfolio};
use crate::prices::FundPricePoint;
use crate::transactions::{earliest_transaction_date, Transaction};

/// Portfolio-level valuation on one date. Monetary fields are rounded to two
/// decimals, half away from zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    pub portfolio_id: String,
    pub date: NaiveDate,
    pub value: Decimal,
    pub cost: Decimal,
    /// Cash declared by dividends whose ex-dividend date has passed.
    pub dividends: Decimal,
    pub unrealized_gain: Decimal,
    pub realized_gain: Decimal,
    pub sale_proceeds: Decimal,
    pub original_cost_basis: Decimal,
    pub total_gain: Decimal,
    pub fees: Decimal,
    /// Value of reinvestment transactions booked across holdings.
    pub reinvested_dividends: Decimal,
    pub shares: Decimal,
}

/// Everything loaded for one portfolio, ready for replay.
///
/// Holding-keyed maps are ordered so that aggregation runs in a stable order;
/// the lists inside each entry must be sorted ascending by their date.
#[derive(Debug, Clone, PartialEq)]
pub struct PortfolioDataBundle {
    pub portfolio: Portfolio,
    /// fund holding id -> fund id
    pub holding_funds: BTreeMap<String, String>,
    /// fund holding id -> transactions, ascending by date
    pub transactions: BTreeMap<String, Vec<Transaction>>,
    /// fund holding id -> dividends, ascending by ex-dividend date
    pub dividends: BTreeMap<String, Vec<Dividend>>,
    /// fund id -> prices, ascending by date
    pub prices: BTreeMap<String, Vec<FundPricePoint>>,
    /// ascending by transaction date
    pub realized_gains: Vec<RealizedGainLossRecord>,
}

impl PortfolioDataBundle {
    pub fn new(portfolio: Portfolio) -> Self {
        Self {
            portfolio,
            holding_funds: BTreeMap::new(),
            transactions: BTreeMap::new(),
            dividends: BTreeMap::new(),
            prices: BTreeMap::new(),
            realized_gains: Vec::new(),
        }
    }

    pub fn portfolio_id(&self) -> &str {
        &self.portfolio.id
    }

    pub fn add_holding(&mut self, holding: &FundHolding) {
        self.holding_funds
            .insert(holding.id.clone(), holding.fund_id.clone());
    }

    pub fn add_transaction(&mut self, transaction: Transaction) {
        self.transactions
            .entry(transaction.fund_holding_id.clone())
            .or_default()
            .push(transaction);
    }

    pub fn add_dividend(&mut self, dividend: Dividend) {
        self.dividends
            .entry(dividend.fund_holding_id.clone())
            .or_default()
            .push(dividend);
    }

    pub fn add_price(&mut self, price: FundPricePoint) {
        self.prices
            .entry(price.fund_id.clone())
            .or_default()
            .push(price);
    }

    pub fn add_realized_gain(&mut self, record: RealizedGainLossRecord) {
        self.realized_gains.push(record);
    }

    /// Stable-sorts every list by its date key. Loaders call this once after
    /// filling the bundle; ties keep their load order.
    pub fn sort_collections(&mut self) {
        for list in self.transactions.values_mut() {
            list.sort_by_key(|tx| tx.date);
        }
        for list in self.dividends.values_mut() {
            list.sort_by_key(|d| d.ex_dividend_date);
        }
        for list in self.prices.values_mut() {
            list.sort_by_key(|p| p.date);
        }
        self.realized_gains.sort_by_key(|r| r.transaction_date);
    }

    /// Holdings known to the bundle: mapped holdings plus any holding that only
    /// appears in the transaction map.
    pub fn holding_ids(&self) -> BTreeSet<&str> {
        self.holding_funds
            .keys()
            .chain(self.transactions.keys())
            .map(String::as_str)
            .collect()
    }

    pub fn fund_id_for(&self, fund_holding_id: &str) -> &str {
        self.holding_funds
            .get(fund_holding_id)
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn transactions_for(&self, fund_holding_id: &str) -> &[Transaction] {
        self.transactions
            .get(fund_holding_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn dividends_for(&self, fund_holding_id: &str) -> &[Dividend] {
        self.dividends
            .get(fund_holding_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn prices_for_fund(&self, fund_id: &str) -> &[FundPricePoint] {
        self.prices
            .get(fund_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn transaction_count(&self) -> usize {
        self.transactions.values().map(Vec::len).sum()
    }

    pub fn earliest_transaction_date(&self) -> Option<NaiveDate> {
        earliest_transaction_date(self.transactions.values())
    }

    /// Whether the portfolio has any history on or before `date`.
    pub fn is_active_on(&self, date: NaiveDate) -> bool {
        match self.earliest_transaction_date() {
            Some(earliest) => earliest <= date,
            None => false,
        }
    }
}
