//! Repository traits for dividends.

use chrono::NaiveDate;

use super::Dividend;
use crate::errors::Result;

/// Read access to declared dividends.
pub trait DividendRepositoryTrait: Send + Sync {
    /// Dividends of the given fund holdings, ascending by ex-dividend date,
    /// including the reinvestment transaction reference when present.
    fn get_dividends_for_holdings(
        &self,
        fund_holding_ids: &[String],
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Vec<Dividend>>;
}
