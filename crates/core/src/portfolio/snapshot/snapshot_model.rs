//! Materialized snapshot and history-with-fallback models.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::portfolio::fund_metrics::FundHistoryEntry;
use crate::portfolio::history::Dated;
use crate::portfolio::summary::PortfolioSummary;

/// A precomputed summary row, written by a background job and read here.
///
/// Freshness is judged only by the row date; `calculated_at` is informational.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterializedSnapshot<T> {
    /// Portfolio id or fund holding id.
    pub reference_id: String,
    #[serde(flatten)]
    pub summary: T,
    pub calculated_at: NaiveDateTime,
}

impl<T: Dated> MaterializedSnapshot<T> {
    pub fn date(&self) -> NaiveDate {
        self.summary.date()
    }
}

pub type PortfolioSnapshot = MaterializedSnapshot<PortfolioSummary>;
pub type FundHoldingSnapshot = MaterializedSnapshot<FundHistoryEntry>;

/// What a history request is about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "type", content = "id")]
pub enum HistorySelector {
    Portfolios(Vec<String>),
    FundHolding(String),
}

/// Where a history result came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HistorySource {
    Snapshot,
    Live,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind", content = "entries")]
pub enum HistoryPayload {
    Portfolio(Vec<PortfolioSummary>),
    FundHolding(Vec<FundHistoryEntry>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryResult {
    pub source: HistorySource,
    pub payload: HistoryPayload,
}

impl HistoryResult {
    pub fn len(&self) -> usize {
        match &self.payload {
            HistoryPayload::Portfolio(rows) => rows.len(),
            HistoryPayload::FundHolding(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn portfolio_summaries(&self) -> Option<&[PortfolioSummary]> {
        match &self.payload {
            HistoryPayload::Portfolio(rows) => Some(rows),
            HistoryPayload::FundHolding(_) => None,
        }
    }

    pub fn fund_entries(&self) -> Option<&[FundHistoryEntry]> {
        match &self.payload {
            HistoryPayload::FundHolding(rows) => Some(rows),
            HistoryPayload::Portfolio(_) => None,
        }
    }
}
