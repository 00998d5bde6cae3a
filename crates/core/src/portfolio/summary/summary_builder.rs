use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::errors::Result;
use crate::portfolio::fund_metrics::{calculate_fund_metrics, FundMetrics, FundMetricsInput, PriceMode};
use crate::portfolio::realized_gains::{aggregate_realized_gains, RealizedGainTotals};
use crate::portfolio::reinvestment::{portfolio_dividend_amount_as_of, reinvested_shares_by_holding};
use crate::settings::ReinvestmentMode;
use crate::utils::decimal_utils::{non_negative, round_money};

use super::{PortfolioDataBundle, PortfolioSummary};

/// Builds the summary of one portfolio as of `target_date`, valuing every
/// holding at its as-of-date price.
///
/// Returns `Ok(None)` when the portfolio has no transactions or its first
/// transaction is after `target_date`.
pub fn build_summary(
    bundle: &PortfolioDataBundle,
    target_date: NaiveDate,
    mode: ReinvestmentMode,
) -> Result<Option<PortfolioSummary>> {
    build_with_price_mode(bundle, target_date, mode, PriceMode::AsOfDate)
}

/// Same aggregation as [`build_summary`], valuing every holding at the last
/// known price of its fund. Used for the "today" figure.
pub fn build_current_summary(
    bundle: &PortfolioDataBundle,
    today: NaiveDate,
    mode: ReinvestmentMode,
) -> Result<Option<PortfolioSummary>> {
    build_with_price_mode(bundle, today, mode, PriceMode::Latest)
}

fn build_with_price_mode(
    bundle: &PortfolioDataBundle,
    target_date: NaiveDate,
    mode: ReinvestmentMode,
    price_mode: PriceMode,
) -> Result<Option<PortfolioSummary>> {
    if !bundle.is_active_on(target_date) {
        return Ok(None);
    }

    let metrics = holding_metrics(bundle, target_date, mode, price_mode)?;
    let dividend_amount = portfolio_dividend_amount_as_of(bundle, target_date);
    let realized = aggregate_realized_gains(&bundle.realized_gains, target_date);

    Ok(Some(summarize(
        bundle.portfolio_id(),
        target_date,
        &metrics,
        dividend_amount,
        realized,
    )))
}

/// Metrics of every holding in the bundle, in holding id order.
pub fn holding_metrics(
    bundle: &PortfolioDataBundle,
    target_date: NaiveDate,
    mode: ReinvestmentMode,
    price_mode: PriceMode,
) -> Result<Vec<FundMetrics>> {
    let baselines = reinvested_shares_by_holding(bundle, target_date, mode)?;

    bundle
        .holding_ids()
        .into_iter()
        .map(|holding_id| {
            let fund_id = bundle.fund_id_for(holding_id);
            calculate_fund_metrics(&FundMetricsInput {
                fund_holding_id: holding_id,
                fund_id,
                target_date,
                transactions: bundle.transactions_for(holding_id),
                reinvested_shares: baselines
                    .get(holding_id)
                    .copied()
                    .unwrap_or(Decimal::ZERO),
                prices: bundle.prices_for_fund(fund_id),
                price_mode,
            })
        })
        .collect()
}

/// Folds per-holding metrics, declared dividend cash and realized totals into a
/// portfolio summary.
///
/// Aggregates are clamped at zero after summing; individual holdings are not.
/// Money is rounded last so that gains are computed from unrounded totals.
pub fn summarize<'a, I>(
    portfolio_id: &str,
    date: NaiveDate,
    metrics: I,
    dividend_amount: Decimal,
    realized: RealizedGainTotals,
) -> PortfolioSummary
where
    I: IntoIterator<Item = &'a FundMetrics>,
{
    let mut shares = Decimal::ZERO;
    let mut cost = Decimal::ZERO;
    let mut value = Decimal::ZERO;
    let mut reinvested_dividends = Decimal::ZERO;
    let mut fees = Decimal::ZERO;

    for m in metrics {
        shares += m.shares;
        cost += m.cost;
        value += m.value;
        reinvested_dividends += m.dividends;
        fees += m.fees;
    }

    let shares = non_negative(shares);
    let cost = non_negative(cost);
    let value = non_negative(value);
    let reinvested_dividends = non_negative(reinvested_dividends);
    let fees = non_negative(fees);

    let unrealized_gain = value - cost;
    let total_gain = unrealized_gain + realized.realized_gain;

    PortfolioSummary {
        portfolio_id: portfolio_id.to_string(),
        date,
        value: round_money(value),
        cost: round_money(cost),
        dividends: round_money(dividend_amount),
        unrealized_gain: round_money(unrealized_gain),
        realized_gain: round_money(realized.realized_gain),
        sale_proceeds: round_money(realized.sale_proceeds),
        original_cost_basis: round_money(realized.cost_basis),
        total_gain: round_money(total_gain),
        fees: round_money(fees),
        reinvested_dividends: round_money(reinvested_dividends),
        shares,
    }
}
