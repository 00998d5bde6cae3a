//! Fund price domain models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A closing price of a fund on a date. Series are sparse; consumers forward-fill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundPricePoint {
    pub fund_id: String,
    pub date: NaiveDate,
    pub price: Decimal,
}

/// Most recent price at or before `target_date` in an ascending series.
///
/// Stops at the first point dated after the target. Returns `None` when the
/// series has no eligible point.
pub fn price_as_of(prices: &[FundPricePoint], target_date: NaiveDate) -> Option<Decimal> {
    let mut latest = None;
    for point in prices {
        if point.date > target_date {
            break;
        }
        latest = Some(point.price);
    }
    latest
}

/// Last price of an ascending series, regardless of its date.
pub fn latest_price(prices: &[FundPricePoint]) -> Option<Decimal> {
    prices.last().map(|point| point.price)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn point(d: u32, price: Decimal) -> FundPricePoint {
        FundPricePoint {
            fund_id: "F1".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 1, d).unwrap(),
            price,
        }
    }

    #[test]
    fn test_price_as_of_forward_fills() {
        let prices = vec![point(2, dec!(10)), point(5, dec!(11)), point(9, dec!(12))];
        let on = |d| NaiveDate::from_ymd_opt(2024, 1, d).unwrap();
        assert_eq!(price_as_of(&prices, on(1)), None);
        assert_eq!(price_as_of(&prices, on(2)), Some(dec!(10)));
        assert_eq!(price_as_of(&prices, on(7)), Some(dec!(11)));
        assert_eq!(price_as_of(&prices, on(31)), Some(dec!(12)));
    }

    #[test]
    fn test_latest_price_ignores_date() {
        let prices = vec![point(2, dec!(10)), point(9, dec!(12))];
        assert_eq!(latest_price(&prices), Some(dec!(12)));
        assert_eq!(latest_price(&[]), None);
    }
}
