//! Transaction domain models.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::transactions_constants::*;

/// An immutable history entry of one fund holding.
///
/// `transaction_type` is kept as the raw stored label; the engine parses it into
/// [`TransactionType`] when replaying so that corrupt rows surface as errors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub fund_holding_id: String,
    pub date: NaiveDate,
    pub transaction_type: String,
    pub shares: Decimal,
    pub cost_per_share: Decimal,
    pub created_at: NaiveDateTime,
}

impl Transaction {
    pub fn kind(&self) -> std::result::Result<TransactionType, String> {
        TransactionType::from_str(&self.transaction_type)
    }

    /// Cash value of the transaction (`shares * cost_per_share`).
    pub fn amount(&self) -> Decimal {
        self.shares * self.cost_per_share
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    Buy,
    Sell,
    Dividend,
    Fee,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Buy => TRANSACTION_TYPE_BUY,
            TransactionType::Sell => TRANSACTION_TYPE_SELL,
            TransactionType::Dividend => TRANSACTION_TYPE_DIVIDEND,
            TransactionType::Fee => TRANSACTION_TYPE_FEE,
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            TRANSACTION_TYPE_BUY => Ok(TransactionType::Buy),
            TRANSACTION_TYPE_SELL => Ok(TransactionType::Sell),
            TRANSACTION_TYPE_DIVIDEND => Ok(TransactionType::Dividend),
            TRANSACTION_TYPE_FEE => Ok(TransactionType::Fee),
            _ => Err(format!("Unknown transaction type: {}", s)),
        }
    }
}

/// Earliest transaction date across a set of per-holding transaction lists.
pub fn earliest_transaction_date<'a, I>(lists: I) -> Option<NaiveDate>
where
    I: IntoIterator<Item = &'a Vec<Transaction>>,
{
    lists
        .into_iter()
        .flat_map(|list| list.iter().map(|tx| tx.date))
        .min()
}
