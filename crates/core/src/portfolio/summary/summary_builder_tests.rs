use super::*;
use crate::errors::Error;
use crate::portfolio::fund_metrics::{FundMetrics, PriceMode};
use crate::portfolio::realized_gains::RealizedGainTotals;
use crate::portfolio::test_fixtures::{
    bundle, buy, buy_and_sell_bundle, date, dividend, fee, price, reinvestment, sell, tx,
};
use crate::settings::ReinvestmentMode;
use crate::utils::decimal_utils::round_money;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

const LENIENT: ReinvestmentMode = ReinvestmentMode::Lenient;

#[test]
fn test_no_transactions_skips_portfolio() {
    let b = bundle("P1", &[("FH1", "F1")]);
    assert_eq!(build_summary(&b, date(2024, 1, 1), LENIENT).unwrap(), None);
}

#[test]
fn test_target_before_first_transaction_skips_portfolio() {
    let b = buy_and_sell_bundle();
    assert_eq!(build_summary(&b, date(2023, 12, 31), LENIENT).unwrap(), None);
    assert!(build_summary(&b, date(2024, 1, 1), LENIENT).unwrap().is_some());
}

#[test]
fn test_summary_after_buy() {
    let b = buy_and_sell_bundle();
    let summary = build_summary(&b, date(2024, 1, 10), LENIENT).unwrap().unwrap();

    assert_eq!(summary.portfolio_id, "P1");
    assert_eq!(summary.date, date(2024, 1, 10));
    assert_eq!(summary.shares, dec!(10));
    assert_eq!(summary.cost, dec!(1000));
    assert_eq!(summary.value, dec!(1200));
    assert_eq!(summary.unrealized_gain, dec!(200));
    assert_eq!(summary.realized_gain, Decimal::ZERO);
    assert_eq!(summary.total_gain, dec!(200));
}

#[test]
fn test_summary_after_sell_includes_realized_gain() {
    let b = buy_and_sell_bundle();
    let summary = build_summary(&b, date(2024, 2, 1), LENIENT).unwrap().unwrap();

    assert_eq!(summary.shares, dec!(6));
    assert_eq!(summary.cost, dec!(600));
    assert_eq!(summary.value, dec!(900));
    assert_eq!(summary.unrealized_gain, dec!(300));
    assert_eq!(summary.realized_gain, dec!(200));
    assert_eq!(summary.sale_proceeds, dec!(600));
    assert_eq!(summary.original_cost_basis, dec!(400));
    assert_eq!(summary.total_gain, dec!(500));
}

#[test]
fn test_summary_equals_sum_of_holding_metrics() {
    let mut b = bundle("P1", &[("FH1", "F1"), ("FH2", "F2")]);
    b.add_transaction(buy("t1", "FH1", date(2024, 1, 1), dec!(10), dec!(100)));
    b.add_transaction(fee("t2", "FH1", date(2024, 1, 3), dec!(2.5)));
    b.add_transaction(buy("t3", "FH2", date(2024, 1, 2), dec!(4), dec!(25)));
    b.add_transaction(sell("t4", "FH2", date(2024, 1, 5), dec!(1), dec!(30)));
    b.add_price(price("F1", date(2024, 1, 1), dec!(101.25)));
    b.add_price(price("F2", date(2024, 1, 4), dec!(27)));

    let target = date(2024, 1, 6);
    let metrics = holding_metrics(&b, target, LENIENT, PriceMode::AsOfDate).unwrap();
    assert_eq!(metrics.len(), 2);

    let value: Decimal = metrics.iter().map(|m| m.value).sum();
    let cost: Decimal = metrics.iter().map(|m| m.cost).sum();
    let shares: Decimal = metrics.iter().map(|m| m.shares).sum();
    let fees: Decimal = metrics.iter().map(|m| m.fees).sum();

    let summary = build_summary(&b, target, LENIENT).unwrap().unwrap();
    assert_eq!(summary.value, round_money(value));
    assert_eq!(summary.cost, round_money(cost));
    assert_eq!(summary.shares, shares);
    assert_eq!(summary.fees, round_money(fees));
    assert_eq!(summary.unrealized_gain, round_money(value - cost));
}

#[test]
fn test_aggregates_are_clamped_at_zero() {
    let mut b = bundle("P1", &[("FH1", "F1")]);
    b.add_transaction(buy("t1", "FH1", date(2024, 1, 1), dec!(2), dec!(10)));
    b.add_transaction(sell("t2", "FH1", date(2024, 1, 2), dec!(5), dec!(10)));
    b.add_price(price("F1", date(2024, 1, 1), dec!(10)));

    let metrics = holding_metrics(&b, date(2024, 1, 2), LENIENT, PriceMode::AsOfDate).unwrap();
    assert_eq!(metrics[0].shares, dec!(-3));
    assert_eq!(metrics[0].value, dec!(-30));

    let summary = build_summary(&b, date(2024, 1, 2), LENIENT).unwrap().unwrap();
    assert_eq!(summary.shares, Decimal::ZERO);
    assert_eq!(summary.value, Decimal::ZERO);
    assert_eq!(summary.cost, Decimal::ZERO);
    assert_eq!(summary.unrealized_gain, Decimal::ZERO);
}

#[test]
fn test_money_rounded_half_away_from_zero() {
    let realized = RealizedGainTotals {
        realized_gain: dec!(-0.125),
        sale_proceeds: dec!(10.005),
        cost_basis: dec!(10.13),
    };
    let no_holdings: Vec<FundMetrics> = Vec::new();
    let summary = summarize("P1", date(2024, 1, 1), &no_holdings, dec!(2.345), realized);

    assert_eq!(summary.dividends, dec!(2.35));
    assert_eq!(summary.realized_gain, dec!(-0.13));
    assert_eq!(summary.sale_proceeds, dec!(10.01));
    assert_eq!(summary.original_cost_basis, dec!(10.13));
    assert_eq!(summary.total_gain, dec!(-0.13));
}

#[test]
fn test_dividend_cash_and_reinvested_shares() {
    let mut b = bundle("P1", &[("FH1", "F1")]);
    b.add_transaction(buy("t1", "FH1", date(2024, 1, 1), dec!(10), dec!(100)));
    b.add_transaction(reinvestment("t-r", "FH1", date(2024, 3, 5), dec!(1), dec!(50)));
    b.add_dividend(dividend("d1", "FH1", "F1", date(2024, 3, 1), dec!(50), Some("t-r")));
    b.add_price(price("F1", date(2024, 1, 1), dec!(100)));

    let on_ex_date = build_summary(&b, date(2024, 3, 1), LENIENT).unwrap().unwrap();
    assert_eq!(on_ex_date.dividends, dec!(50));
    assert_eq!(on_ex_date.shares, dec!(11));
    assert_eq!(on_ex_date.reinvested_dividends, Decimal::ZERO);

    let after_booking = build_summary(&b, date(2024, 3, 5), LENIENT).unwrap().unwrap();
    assert_eq!(after_booking.shares, dec!(11));
    assert_eq!(after_booking.reinvested_dividends, dec!(50));
    assert_eq!(after_booking.cost, dec!(1000));
    assert_eq!(after_booking.value, dec!(1100));
}

#[test]
fn test_current_summary_uses_latest_price() {
    let b = buy_and_sell_bundle();
    let as_of = build_summary(&b, date(2024, 1, 10), LENIENT).unwrap().unwrap();
    let current = build_current_summary(&b, date(2024, 1, 10), LENIENT)
        .unwrap()
        .unwrap();

    assert_eq!(as_of.value, dec!(1200));
    assert_eq!(current.value, dec!(1500));
    assert_eq!(current.cost, as_of.cost);
}

#[test]
fn test_unknown_transaction_type_fails_summary() {
    let mut b = bundle("P1", &[("FH1", "F1")]);
    b.add_transaction(buy("t1", "FH1", date(2024, 1, 1), dec!(1), dec!(1)));
    b.add_transaction(tx("t2", "FH1", date(2024, 1, 2), "TRANSFER", dec!(1), dec!(1)));

    let result = build_summary(&b, date(2024, 1, 2), LENIENT);
    assert!(matches!(result, Err(Error::Calculation(_))));
}
