//! Repository traits for fund prices.

use chrono::NaiveDate;

use super::FundPricePoint;
use crate::errors::Result;

/// Read access to historical fund prices.
pub trait PriceRepositoryTrait: Send + Sync {
    /// Prices of the given funds, ascending by date.
    fn get_prices_for_funds(
        &self,
        fund_ids: &[String],
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Vec<FundPricePoint>>;
}
