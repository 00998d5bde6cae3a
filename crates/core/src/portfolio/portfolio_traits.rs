//! Repository traits for portfolios and fund holdings.

use super::{FundHolding, Portfolio};
use crate::errors::Result;

pub trait PortfolioRepositoryTrait: Send + Sync {
    fn get_portfolio(&self, portfolio_id: &str) -> Result<Portfolio>;

    /// All fund holdings belonging to the given portfolios.
    fn list_fund_holdings(&self, portfolio_ids: &[String]) -> Result<Vec<FundHolding>>;

    fn get_fund_holding(&self, fund_holding_id: &str) -> Result<FundHolding>;
}
