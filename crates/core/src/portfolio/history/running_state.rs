//! Day-to-day running state for the incremental replay strategy.
//!
//! Cursors must be advanced with non-decreasing dates. Each advance consumes
//! the records dated on or before the new day, so a replay over N days touches
//! every record once, except when a holding's reinvested baseline changes: the
//! position is then rebuilt from its first transaction, because every earlier
//! sale scaled cost by a share count that included the old baseline.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::dividends::Dividend;
use crate::errors::Result;
use crate::portfolio::fund_metrics::{FundHistoryEntry, FundMetrics, FundPositionState};
use crate::portfolio::realized_gains::{RealizedGainLossRecord, RealizedGainTotals};
use crate::portfolio::reinvestment::reinvested_shares_for_dividend;
use crate::portfolio::summary::{summarize, PortfolioDataBundle, PortfolioSummary};
use crate::prices::FundPricePoint;
use crate::settings::ReinvestmentMode;
use crate::transactions::Transaction;

/// Declared dividend cash of one dividend list.
#[derive(Debug)]
struct DividendCashCursor<'a> {
    dividends: &'a [Dividend],
    next: usize,
    cash: Decimal,
}

impl<'a> DividendCashCursor<'a> {
    fn new(dividends: &'a [Dividend]) -> Self {
        Self {
            dividends,
            next: 0,
            cash: Decimal::ZERO,
        }
    }

    fn advance_to(&mut self, date: NaiveDate) {
        while let Some(dividend) = self.dividends.get(self.next) {
            if dividend.ex_dividend_date > date {
                break;
            }
            self.cash += dividend.total_amount;
            self.next += 1;
        }
    }
}

#[derive(Debug)]
pub(crate) struct HoldingCursor<'a> {
    fund_holding_id: &'a str,
    fund_id: &'a str,
    transactions: &'a [Transaction],
    dividends: &'a [Dividend],
    prices: &'a [FundPricePoint],
    next_transaction: usize,
    next_dividend: usize,
    next_price: usize,
    baseline: Decimal,
    dividend_cash: Decimal,
    price: Option<Decimal>,
    position: FundPositionState,
}

impl<'a> HoldingCursor<'a> {
    pub(crate) fn new(bundle: &'a PortfolioDataBundle, fund_holding_id: &'a str) -> Self {
        let fund_id = bundle.fund_id_for(fund_holding_id);
        Self {
            fund_holding_id,
            fund_id,
            transactions: bundle.transactions_for(fund_holding_id),
            dividends: bundle.dividends_for(fund_holding_id),
            prices: bundle.prices_for_fund(fund_id),
            next_transaction: 0,
            next_dividend: 0,
            next_price: 0,
            baseline: Decimal::ZERO,
            dividend_cash: Decimal::ZERO,
            price: None,
            position: FundPositionState::default(),
        }
    }

    /// Consumes dividends up to `date`. A changed baseline restarts the position.
    pub(crate) fn advance_dividends(
        &mut self,
        date: NaiveDate,
        mode: ReinvestmentMode,
    ) -> Result<()> {
        let mut baseline = self.baseline;
        while let Some(dividend) = self.dividends.get(self.next_dividend) {
            if dividend.ex_dividend_date > date {
                break;
            }
            baseline += reinvested_shares_for_dividend(dividend, self.transactions, mode)?;
            self.dividend_cash += dividend.total_amount;
            self.next_dividend += 1;
        }

        if baseline != self.baseline {
            self.baseline = baseline;
            self.position = FundPositionState::with_baseline(baseline);
            self.next_transaction = 0;
        }
        Ok(())
    }

    /// Applies transactions and picks up prices dated on or before `date`.
    pub(crate) fn advance_position(&mut self, date: NaiveDate) -> Result<()> {
        while let Some(transaction) = self.transactions.get(self.next_transaction) {
            if transaction.date > date {
                break;
            }
            self.position.apply(transaction)?;
            self.next_transaction += 1;
        }

        while let Some(point) = self.prices.get(self.next_price) {
            if point.date > date {
                break;
            }
            self.price = Some(point.price);
            self.next_price += 1;
        }
        Ok(())
    }

    pub(crate) fn advance_to(&mut self, date: NaiveDate, mode: ReinvestmentMode) -> Result<()> {
        self.advance_dividends(date, mode)?;
        self.advance_position(date)
    }

    pub(crate) fn metrics(&self, date: NaiveDate) -> FundMetrics {
        self.position
            .to_metrics(self.fund_holding_id, self.fund_id, date, self.price)
    }

    pub(crate) fn history_entry(&self, date: NaiveDate) -> FundHistoryEntry {
        self.metrics(date).to_history_entry(self.dividend_cash)
    }
}

/// Running state of a whole portfolio.
#[derive(Debug)]
pub(crate) struct PortfolioCursor<'a> {
    bundle: &'a PortfolioDataBundle,
    earliest: Option<NaiveDate>,
    holdings: Vec<HoldingCursor<'a>>,
    /// Dividend lists of holdings that have no position to value.
    unvalued_dividends: Vec<DividendCashCursor<'a>>,
    realized_gains: &'a [RealizedGainLossRecord],
    next_realized: usize,
    realized: RealizedGainTotals,
}

impl<'a> PortfolioCursor<'a> {
    pub(crate) fn new(bundle: &'a PortfolioDataBundle) -> Self {
        let holding_ids = bundle.holding_ids();
        let unvalued_dividends = bundle
            .dividends
            .iter()
            .filter(|(holding_id, _)| !holding_ids.contains(holding_id.as_str()))
            .map(|(_, dividends)| DividendCashCursor::new(dividends))
            .collect();
        let holdings = holding_ids
            .into_iter()
            .map(|holding_id| HoldingCursor::new(bundle, holding_id))
            .collect();

        Self {
            bundle,
            earliest: bundle.earliest_transaction_date(),
            holdings,
            unvalued_dividends,
            realized_gains: &bundle.realized_gains,
            next_realized: 0,
            realized: RealizedGainTotals::default(),
        }
    }

    /// Summary as of `date`, or `None` before the portfolio's first transaction.
    pub(crate) fn summary_on(
        &mut self,
        date: NaiveDate,
        mode: ReinvestmentMode,
    ) -> Result<Option<PortfolioSummary>> {
        match self.earliest {
            Some(earliest) if earliest <= date => {}
            _ => return Ok(None),
        }

        // Baselines for every holding resolve before any position moves.
        for holding in &mut self.holdings {
            holding.advance_dividends(date, mode)?;
        }
        for holding in &mut self.holdings {
            holding.advance_position(date)?;
        }
        for cursor in &mut self.unvalued_dividends {
            cursor.advance_to(date);
        }
        while let Some(record) = self.realized_gains.get(self.next_realized) {
            if record.transaction_date > date {
                break;
            }
            self.realized.add(record);
            self.next_realized += 1;
        }

        let metrics: Vec<FundMetrics> = self.holdings.iter().map(|h| h.metrics(date)).collect();
        let dividend_cash: Decimal = self
            .holdings
            .iter()
            .map(|h| h.dividend_cash)
            .chain(self.unvalued_dividends.iter().map(|c| c.cash))
            .sum();

        Ok(Some(summarize(
            self.bundle.portfolio_id(),
            date,
            &metrics,
            dividend_cash,
            self.realized,
        )))
    }
}
