//! History replay request and response models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::constants::ISO_DATE_FORMAT;
use crate::errors::{Error, Result};
use crate::portfolio::fund_metrics::FundHistoryEntry;
use crate::portfolio::summary::PortfolioSummary;
use crate::utils::time_utils::get_days_between;

/// Requested display window, both ends inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryRequest {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl HistoryRequest {
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            start_date,
            end_date,
        }
    }
}

/// Records that belong to one calendar day of a history series.
pub trait Dated {
    fn date(&self) -> NaiveDate;
}

impl Dated for PortfolioSummary {
    fn date(&self) -> NaiveDate {
        self.date
    }
}

impl Dated for FundHistoryEntry {
    fn date(&self) -> NaiveDate {
        self.date
    }
}

/// History series keyed by ISO date (`YYYY-MM-DD`).
///
/// Every day of the requested range has a key; days without records map to an
/// empty list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEnvelope<T> {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub days: BTreeMap<String, Vec<T>>,
}

impl<T: Dated> HistoryEnvelope<T> {
    pub fn new(request: &HistoryRequest, records: Vec<T>) -> Self {
        let mut days: BTreeMap<String, Vec<T>> =
            get_days_between(request.start_date, request.end_date)
                .into_iter()
                .map(|day| (day.format(ISO_DATE_FORMAT).to_string(), Vec::new()))
                .collect();

        for record in records {
            let key = record.date().format(ISO_DATE_FORMAT).to_string();
            if let Some(bucket) = days.get_mut(&key) {
                bucket.push(record);
            }
        }

        Self {
            start_date: request.start_date,
            end_date: request.end_date,
            days,
        }
    }

    pub fn get(&self, date: NaiveDate) -> Option<&[T]> {
        self.days
            .get(&date.format(ISO_DATE_FORMAT).to_string())
            .map(Vec::as_slice)
    }

    /// Number of records across all days.
    pub fn record_count(&self) -> usize {
        self.days.values().map(Vec::len).sum()
    }
}

/// Shared stop signal checked once per replayed day.
#[derive(Debug, Clone, Default)]
pub struct CancellationFlag(Arc<AtomicBool>);

impl CancellationFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn reset(&self) {
        self.0.store(false, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    pub fn check(&self) -> Result<()> {
        if self.is_cancelled() {
            Err(Error::Cancelled)
        } else {
            Ok(())
        }
    }
}
