use crate::errors::{CalculatorError, Result};
use crate::portfolio::fund_metrics::{FundMetrics, FundMetricsInput, PriceMode};
use crate::prices::{latest_price, price_as_of};
use crate::transactions::{Transaction, TransactionType};

use chrono::NaiveDate;
use log::debug;
use rust_decimal::Decimal;

/// Running share count and weighted-average cost of one fund holding.
///
/// Replaying a holding means starting from the reinvested-share baseline and
/// applying its transactions in date order. The history orchestrator keeps one
/// of these per holding and carries it from day to day.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FundPositionState {
    pub shares: Decimal,
    pub cost: Decimal,
    pub dividends: Decimal,
    pub fees: Decimal,
}

impl FundPositionState {
    pub fn with_baseline(reinvested_shares: Decimal) -> Self {
        Self {
            shares: reinvested_shares,
            ..Default::default()
        }
    }

    /// Applies one transaction. Unknown transaction types abort the replay.
    pub fn apply(&mut self, transaction: &Transaction) -> Result<()> {
        let kind = transaction.kind().map_err(|_| {
            CalculatorError::UnsupportedTransactionType {
                transaction_id: transaction.id.clone(),
                transaction_type: transaction.transaction_type.clone(),
            }
        })?;

        match kind {
            TransactionType::Buy => {
                self.shares += transaction.shares;
                self.cost += transaction.amount();
            }
            TransactionType::Sell => {
                self.shares -= transaction.shares;
                let shares_before = self.shares + transaction.shares;
                if self.shares > Decimal::ZERO && !shares_before.is_zero() {
                    self.cost *= self.shares / shares_before;
                } else {
                    self.cost = Decimal::ZERO;
                }
            }
            TransactionType::Dividend => {
                self.dividends += transaction.amount();
            }
            TransactionType::Fee => {
                self.cost += transaction.cost_per_share;
                self.fees += transaction.cost_per_share;
            }
        }
        Ok(())
    }

    /// Values the current state at `price`. A missing price values the holding at zero.
    pub fn to_metrics(
        &self,
        fund_holding_id: &str,
        fund_id: &str,
        date: NaiveDate,
        price: Option<Decimal>,
    ) -> FundMetrics {
        let price = price.unwrap_or(Decimal::ZERO);
        let value = self.shares * price;
        FundMetrics {
            fund_holding_id: fund_holding_id.to_string(),
            fund_id: fund_id.to_string(),
            date,
            shares: self.shares,
            cost: self.cost,
            latest_price: price,
            dividends: self.dividends,
            value,
            unrealized_gain: value - self.cost,
            fees: self.fees,
        }
    }
}

/// Calculates shares, cost basis, value, gain, dividends and fees of one fund
/// holding as of `input.target_date`.
///
/// Transactions and prices must be sorted ascending by date; both scans stop at
/// the first entry dated after the target. The function is pure.
pub fn calculate_fund_metrics(input: &FundMetricsInput<'_>) -> Result<FundMetrics> {
    let mut state = FundPositionState::with_baseline(input.reinvested_shares);

    for transaction in input.transactions {
        if transaction.date > input.target_date {
            break;
        }
        state.apply(transaction)?;
    }

    let price = resolve_price(input);
    if price.is_none() {
        debug!(
            "No price for fund {} on or before {}. Holding {} valued at ZERO.",
            input.fund_id, input.target_date, input.fund_holding_id
        );
    }

    Ok(state.to_metrics(
        input.fund_holding_id,
        input.fund_id,
        input.target_date,
        price,
    ))
}

fn resolve_price(input: &FundMetricsInput<'_>) -> Option<Decimal> {
    match input.price_mode {
        PriceMode::Latest => latest_price(input.prices),
        PriceMode::AsOfDate => price_as_of(input.prices, input.target_date),
    }
}
