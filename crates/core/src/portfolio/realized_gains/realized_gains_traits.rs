//! Repository traits for realized gain/loss records.

use chrono::NaiveDate;

use super::RealizedGainLossRecord;
use crate::errors::Result;

pub trait RealizedGainRepositoryTrait: Send + Sync {
    /// Records of the given portfolios, ascending by transaction date.
    fn get_realized_gains(
        &self,
        portfolio_ids: &[String],
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Vec<RealizedGainLossRecord>>;
}
