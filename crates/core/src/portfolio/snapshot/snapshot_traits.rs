//! Repository traits for materialized snapshots.

use chrono::NaiveDate;

use super::{FundHoldingSnapshot, PortfolioSnapshot};
use crate::errors::Result;

/// Read-only access to the snapshot store. Rows are refreshed elsewhere.
pub trait SnapshotRepositoryTrait: Send + Sync {
    /// Portfolio snapshots dated within `[start_date, end_date]`, ascending by
    /// date then portfolio id.
    fn get_portfolio_snapshots(
        &self,
        portfolio_ids: &[String],
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<PortfolioSnapshot>>;

    /// Snapshots of one fund holding dated within `[start_date, end_date]`,
    /// ascending by date.
    fn get_fund_holding_snapshots(
        &self,
        fund_holding_id: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<FundHoldingSnapshot>>;
}
