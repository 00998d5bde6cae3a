//! Builders and in-memory repositories shared by the portfolio unit tests.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use std::collections::HashMap;

use crate::dividends::{Dividend, DividendRepositoryTrait, ReinvestmentStatus};
use crate::errors::{DatabaseError, Error, Result};
use crate::portfolio::realized_gains::{RealizedGainLossRecord, RealizedGainRepositoryTrait};
use crate::portfolio::summary::PortfolioDataBundle;
use crate::portfolio::{FundHolding, Portfolio, PortfolioRepositoryTrait};
use crate::prices::{FundPricePoint, PriceRepositoryTrait};
use crate::transactions::{Transaction, TransactionRepositoryTrait};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn tx(
    id: &str,
    fund_holding_id: &str,
    on: NaiveDate,
    transaction_type: &str,
    shares: Decimal,
    cost_per_share: Decimal,
) -> Transaction {
    Transaction {
        id: id.to_string(),
        fund_holding_id: fund_holding_id.to_string(),
        date: on,
        transaction_type: transaction_type.to_string(),
        shares,
        cost_per_share,
        created_at: NaiveDateTime::default(),
    }
}

pub fn buy(id: &str, holding: &str, on: NaiveDate, shares: Decimal, cps: Decimal) -> Transaction {
    tx(id, holding, on, "BUY", shares, cps)
}

pub fn sell(id: &str, holding: &str, on: NaiveDate, shares: Decimal, cps: Decimal) -> Transaction {
    tx(id, holding, on, "SELL", shares, cps)
}

pub fn fee(id: &str, holding: &str, on: NaiveDate, amount: Decimal) -> Transaction {
    tx(id, holding, on, "FEE", Decimal::ZERO, amount)
}

pub fn reinvestment(
    id: &str,
    holding: &str,
    on: NaiveDate,
    shares: Decimal,
    cps: Decimal,
) -> Transaction {
    tx(id, holding, on, "DIVIDEND", shares, cps)
}

pub fn dividend(
    id: &str,
    holding: &str,
    fund_id: &str,
    ex_dividend_date: NaiveDate,
    total_amount: Decimal,
    reinvestment_transaction_id: Option<&str>,
) -> Dividend {
    Dividend {
        id: id.to_string(),
        fund_id: fund_id.to_string(),
        fund_holding_id: holding.to_string(),
        record_date: ex_dividend_date,
        ex_dividend_date,
        shares_owned: Decimal::ZERO,
        dividend_per_share: Decimal::ZERO,
        total_amount,
        reinvestment_status: if reinvestment_transaction_id.is_some() {
            ReinvestmentStatus::Completed
        } else {
            ReinvestmentStatus::Pending
        },
        buy_order_date: None,
        reinvestment_transaction_id: reinvestment_transaction_id.map(str::to_string),
    }
}

pub fn price(fund_id: &str, on: NaiveDate, value: Decimal) -> FundPricePoint {
    FundPricePoint {
        fund_id: fund_id.to_string(),
        date: on,
        price: value,
    }
}

pub fn realized(
    id: &str,
    portfolio_id: &str,
    on: NaiveDate,
    gain: Decimal,
    proceeds: Decimal,
    basis: Decimal,
) -> RealizedGainLossRecord {
    RealizedGainLossRecord {
        id: id.to_string(),
        portfolio_id: portfolio_id.to_string(),
        fund_id: "F1".to_string(),
        transaction_id: format!("tx-{}", id),
        transaction_date: on,
        shares_sold: Decimal::ZERO,
        cost_basis: basis,
        sale_proceeds: proceeds,
        realized_gain_loss: gain,
    }
}

pub fn portfolio(id: &str) -> Portfolio {
    Portfolio {
        id: id.to_string(),
        name: format!("Portfolio {}", id),
    }
}

pub fn holding(id: &str, portfolio_id: &str, fund_id: &str) -> FundHolding {
    FundHolding {
        id: id.to_string(),
        portfolio_id: portfolio_id.to_string(),
        fund_id: fund_id.to_string(),
    }
}

/// Bundle for portfolio `portfolio_id` with the given holdings mapped to funds.
pub fn bundle(portfolio_id: &str, holdings: &[(&str, &str)]) -> PortfolioDataBundle {
    let mut bundle = PortfolioDataBundle::new(portfolio(portfolio_id));
    for (holding_id, fund_id) in holdings {
        bundle.add_holding(&holding(holding_id, portfolio_id, fund_id));
    }
    bundle
}

/// Scenario A/B: buy 10 @ 100 on 2024-01-01, price 120 on 2024-01-10,
/// sell 4 @ 150 on 2024-02-01.
pub fn buy_and_sell_bundle() -> PortfolioDataBundle {
    let mut b = bundle("P1", &[("FH1", "F1")]);
    b.add_transaction(buy("t1", "FH1", date(2024, 1, 1), Decimal::from(10), Decimal::from(100)));
    b.add_transaction(sell("t2", "FH1", date(2024, 2, 1), Decimal::from(4), Decimal::from(150)));
    b.add_price(price("F1", date(2024, 1, 10), Decimal::from(120)));
    b.add_price(price("F1", date(2024, 2, 1), Decimal::from(150)));
    b.add_realized_gain(realized(
        "r1",
        "P1",
        date(2024, 2, 1),
        Decimal::from(200),
        Decimal::from(600),
        Decimal::from(400),
    ));
    b
}

/// In-memory implementation of every raw-record repository.
#[derive(Default)]
pub struct InMemoryStore {
    pub portfolios: Vec<Portfolio>,
    pub holdings: Vec<FundHolding>,
    pub transactions: Vec<Transaction>,
    pub dividends: Vec<Dividend>,
    pub prices: Vec<FundPricePoint>,
    pub realized_gains: Vec<RealizedGainLossRecord>,
    pub fail_transactions: bool,
}

impl InMemoryStore {
    /// Store holding the same records as `bundles`.
    pub fn from_bundles(bundles: &[PortfolioDataBundle]) -> Self {
        let mut store = InMemoryStore::default();
        for b in bundles {
            store.portfolios.push(b.portfolio.clone());
            for (holding_id, fund_id) in &b.holding_funds {
                store
                    .holdings
                    .push(holding(holding_id, b.portfolio_id(), fund_id));
            }
            store
                .transactions
                .extend(b.transactions.values().flatten().cloned());
            store
                .dividends
                .extend(b.dividends.values().flatten().cloned());
            store.prices.extend(b.prices.values().flatten().cloned());
            store.realized_gains.extend(b.realized_gains.iter().cloned());
        }
        store
    }
}

fn in_range(on: NaiveDate, start: Option<NaiveDate>, end: Option<NaiveDate>) -> bool {
    start.map_or(true, |s| on >= s) && end.map_or(true, |e| on <= e)
}

impl PortfolioRepositoryTrait for InMemoryStore {
    fn get_portfolio(&self, portfolio_id: &str) -> Result<Portfolio> {
        self.portfolios
            .iter()
            .find(|p| p.id == portfolio_id)
            .cloned()
            .ok_or_else(|| Error::Database(DatabaseError::NotFound(portfolio_id.to_string())))
    }

    fn list_fund_holdings(&self, portfolio_ids: &[String]) -> Result<Vec<FundHolding>> {
        Ok(self
            .holdings
            .iter()
            .filter(|h| portfolio_ids.contains(&h.portfolio_id))
            .cloned()
            .collect())
    }

    fn get_fund_holding(&self, fund_holding_id: &str) -> Result<FundHolding> {
        self.holdings
            .iter()
            .find(|h| h.id == fund_holding_id)
            .cloned()
            .ok_or_else(|| Error::Database(DatabaseError::NotFound(fund_holding_id.to_string())))
    }
}

impl TransactionRepositoryTrait for InMemoryStore {
    fn get_transactions_for_holdings(
        &self,
        fund_holding_ids: &[String],
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Vec<Transaction>> {
        if self.fail_transactions {
            return Err(Error::Database(DatabaseError::QueryFailed(
                "transactions table unavailable".to_string(),
            )));
        }
        let mut rows: Vec<Transaction> = self
            .transactions
            .iter()
            .filter(|t| fund_holding_ids.contains(&t.fund_holding_id))
            .filter(|t| in_range(t.date, start_date, end_date))
            .cloned()
            .collect();
        rows.sort_by_key(|t| t.date);
        Ok(rows)
    }
}

impl DividendRepositoryTrait for InMemoryStore {
    fn get_dividends_for_holdings(
        &self,
        fund_holding_ids: &[String],
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Vec<Dividend>> {
        let mut rows: Vec<Dividend> = self
            .dividends
            .iter()
            .filter(|d| fund_holding_ids.contains(&d.fund_holding_id))
            .filter(|d| in_range(d.ex_dividend_date, start_date, end_date))
            .cloned()
            .collect();
        rows.sort_by_key(|d| d.ex_dividend_date);
        Ok(rows)
    }
}

impl PriceRepositoryTrait for InMemoryStore {
    fn get_prices_for_funds(
        &self,
        fund_ids: &[String],
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Vec<FundPricePoint>> {
        let mut rows: Vec<FundPricePoint> = self
            .prices
            .iter()
            .filter(|p| fund_ids.contains(&p.fund_id))
            .filter(|p| in_range(p.date, start_date, end_date))
            .cloned()
            .collect();
        rows.sort_by_key(|p| p.date);
        Ok(rows)
    }
}

impl RealizedGainRepositoryTrait for InMemoryStore {
    fn get_realized_gains(
        &self,
        portfolio_ids: &[String],
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Vec<RealizedGainLossRecord>> {
        let mut rows: Vec<RealizedGainLossRecord> = self
            .realized_gains
            .iter()
            .filter(|r| portfolio_ids.contains(&r.portfolio_id))
            .filter(|r| in_range(r.transaction_date, start_date, end_date))
            .cloned()
            .collect();
        rows.sort_by_key(|r| r.transaction_date);
        Ok(rows)
    }
}

/// Lookup table helper for tests that compare series by date.
pub fn by_date<T, F>(items: &[T], key: F) -> HashMap<NaiveDate, &T>
where
    F: Fn(&T) -> NaiveDate,
{
    items.iter().map(|item| (key(item), item)).collect()
}
