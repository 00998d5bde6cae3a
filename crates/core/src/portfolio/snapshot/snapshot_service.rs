use chrono::NaiveDate;
use log::{debug, warn};
use std::sync::Arc;
use std::time::Instant;

use super::{
    HistoryPayload, HistoryResult, HistorySelector, HistorySource, MaterializedSnapshot,
    SnapshotRepositoryTrait,
};
use crate::errors::Result;
use crate::portfolio::history::{Dated, HistoryRequest, HistoryServiceTrait};
use crate::portfolio::loader::PortfolioDataLoader;

pub trait HistoryWithFallbackServiceTrait: Send + Sync {
    /// History for the selector over `[start_date, end_date]`.
    ///
    /// Served from the snapshot store when its rows reach `end_date`, otherwise
    /// replayed from raw records. The caller only sees an error when the live
    /// replay fails.
    fn get_history_with_fallback(
        &self,
        selector: &HistorySelector,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<HistoryResult>;
}

#[derive(Clone)]
pub struct HistoryWithFallbackService {
    snapshot_repository: Arc<dyn SnapshotRepositoryTrait>,
    data_loader: PortfolioDataLoader,
    history_service: Arc<dyn HistoryServiceTrait>,
}

impl HistoryWithFallbackService {
    pub fn new(
        snapshot_repository: Arc<dyn SnapshotRepositoryTrait>,
        data_loader: PortfolioDataLoader,
        history_service: Arc<dyn HistoryServiceTrait>,
    ) -> Self {
        Self {
            snapshot_repository,
            data_loader,
            history_service,
        }
    }

    fn try_snapshots(
        &self,
        selector: &HistorySelector,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Option<HistoryPayload> {
        match selector {
            HistorySelector::Portfolios(portfolio_ids) => {
                let rows = self.snapshot_repository.get_portfolio_snapshots(
                    portfolio_ids,
                    start_date,
                    end_date,
                );
                covering_rows(selector, rows, end_date).map(HistoryPayload::Portfolio)
            }
            HistorySelector::FundHolding(fund_holding_id) => {
                let rows = self.snapshot_repository.get_fund_holding_snapshots(
                    fund_holding_id,
                    start_date,
                    end_date,
                );
                covering_rows(selector, rows, end_date).map(HistoryPayload::FundHolding)
            }
        }
    }

    fn replay_live(
        &self,
        selector: &HistorySelector,
        request: &HistoryRequest,
    ) -> Result<HistoryPayload> {
        match selector {
            HistorySelector::Portfolios(portfolio_ids) => {
                let bundles = self.data_loader.load_portfolio_bundles(portfolio_ids)?;
                let summaries = self
                    .history_service
                    .calculate_portfolio_history(&bundles, request)?;
                Ok(HistoryPayload::Portfolio(summaries))
            }
            HistorySelector::FundHolding(fund_holding_id) => {
                let bundle = self
                    .data_loader
                    .load_bundle_for_fund_holding(fund_holding_id)?;
                let entries = self.history_service.calculate_fund_history(
                    &bundle,
                    fund_holding_id,
                    request,
                )?;
                Ok(HistoryPayload::FundHolding(entries))
            }
        }
    }
}

/// Summaries of the snapshot rows when they are non-empty and the last row
/// reaches `end_date`. Anything else sends the request down the live path.
fn covering_rows<T: Dated>(
    selector: &HistorySelector,
    rows: Result<Vec<MaterializedSnapshot<T>>>,
    end_date: NaiveDate,
) -> Option<Vec<T>> {
    let rows = match rows {
        Ok(rows) => rows,
        Err(e) => {
            warn!(
                "Snapshot query for {:?} failed: {}. Falling back to live replay.",
                selector, e
            );
            return None;
        }
    };

    match rows.iter().map(|row| row.date()).max() {
        None => {
            debug!("No snapshots for {:?}; replaying live", selector);
            None
        }
        Some(last) if last < end_date => {
            warn!(
                "Snapshots for {:?} end at {}, before requested end {}. Falling back to live replay.",
                selector, last, end_date
            );
            None
        }
        Some(_) => Some(rows.into_iter().map(|row| row.summary).collect()),
    }
}

impl HistoryWithFallbackServiceTrait for HistoryWithFallbackService {
    fn get_history_with_fallback(
        &self,
        selector: &HistorySelector,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<HistoryResult> {
        let start_time = Instant::now();

        if let Some(payload) = self.try_snapshots(selector, start_date, end_date) {
            debug!(
                "Served history for {:?} from snapshots in {:?}",
                selector,
                start_time.elapsed()
            );
            return Ok(HistoryResult {
                source: HistorySource::Snapshot,
                payload,
            });
        }

        let request = HistoryRequest::new(start_date, end_date);
        let payload = self.replay_live(selector, &request)?;
        debug!(
            "Replayed history for {:?} live in {:?}",
            selector,
            start_time.elapsed()
        );
        Ok(HistoryResult {
            source: HistorySource::Live,
            payload,
        })
    }
}
