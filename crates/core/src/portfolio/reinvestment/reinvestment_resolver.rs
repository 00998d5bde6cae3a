//! Dividend reinvestment attribution.
//!
//! A dividend that was reinvested points at a DIVIDEND transaction. Those
//! shares enter the holding as a baseline that every replay starts from, and
//! they are attributed by the dividend's ex-dividend date.

use chrono::NaiveDate;
use log::warn;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

use crate::dividends::Dividend;
use crate::errors::{CalculatorError, Result};
use crate::portfolio::summary::PortfolioDataBundle;
use crate::settings::ReinvestmentMode;
use crate::transactions::Transaction;

/// Shares contributed by one dividend's reinvestment link.
///
/// Returns zero when the dividend is not linked. A link to a transaction that
/// is not in `transactions` contributes zero in lenient mode and fails in
/// strict mode.
pub fn reinvested_shares_for_dividend(
    dividend: &Dividend,
    transactions: &[Transaction],
    mode: ReinvestmentMode,
) -> Result<Decimal> {
    let Some(transaction_id) = dividend.reinvestment_transaction_id.as_deref() else {
        return Ok(Decimal::ZERO);
    };

    match transactions.iter().find(|tx| tx.id == transaction_id) {
        Some(transaction) => Ok(transaction.shares),
        None => match mode {
            ReinvestmentMode::Lenient => {
                warn!(
                    "Dividend {} links reinvestment transaction {} which is missing for holding {}. Counting ZERO shares.",
                    dividend.id, transaction_id, dividend.fund_holding_id
                );
                Ok(Decimal::ZERO)
            }
            ReinvestmentMode::Strict => Err(CalculatorError::UnresolvedReinvestment {
                dividend_id: dividend.id.clone(),
                transaction_id: transaction_id.to_string(),
                fund_holding_id: dividend.fund_holding_id.clone(),
            }
            .into()),
        },
    }
}

/// Cumulative shares acquired via reinvestment as of `target_date`.
///
/// `dividends` must be ascending by ex-dividend date; the scan stops at the
/// first dividend whose ex-dividend date is after the target.
pub fn reinvested_shares_as_of(
    dividends: &[Dividend],
    transactions: &[Transaction],
    target_date: NaiveDate,
    mode: ReinvestmentMode,
) -> Result<Decimal> {
    let mut shares = Decimal::ZERO;
    for dividend in dividends {
        if dividend.ex_dividend_date > target_date {
            break;
        }
        shares += reinvested_shares_for_dividend(dividend, transactions, mode)?;
    }
    Ok(shares)
}

/// Cumulative declared dividend cash as of `target_date`. Empty input yields zero.
pub fn dividend_amount_as_of(dividends: &[Dividend], target_date: NaiveDate) -> Decimal {
    let mut amount = Decimal::ZERO;
    for dividend in dividends {
        if dividend.ex_dividend_date > target_date {
            break;
        }
        amount += dividend.total_amount;
    }
    amount
}

/// Reinvested-share baselines for every holding of a portfolio.
pub fn reinvested_shares_by_holding(
    bundle: &PortfolioDataBundle,
    target_date: NaiveDate,
    mode: ReinvestmentMode,
) -> Result<BTreeMap<String, Decimal>> {
    let mut baselines = BTreeMap::new();
    for holding_id in bundle.holding_ids() {
        let shares = reinvested_shares_as_of(
            bundle.dividends_for(holding_id),
            bundle.transactions_for(holding_id),
            target_date,
            mode,
        )?;
        baselines.insert(holding_id.to_string(), shares);
    }
    Ok(baselines)
}

/// Cumulative declared dividend cash across every holding of a portfolio.
pub fn portfolio_dividend_amount_as_of(
    bundle: &PortfolioDataBundle,
    target_date: NaiveDate,
) -> Decimal {
    bundle
        .dividends
        .values()
        .map(|dividends| dividend_amount_as_of(dividends, target_date))
        .sum()
}
