//! Repository traits for transactions.

use chrono::NaiveDate;

use super::Transaction;
use crate::errors::Result;

/// Read access to transaction history.
pub trait TransactionRepositoryTrait: Send + Sync {
    /// Transactions of the given fund holdings, ascending by date.
    /// `None` bounds leave that side of the range open.
    fn get_transactions_for_holdings(
        &self,
        fund_holding_ids: &[String],
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Vec<Transaction>>;
}
