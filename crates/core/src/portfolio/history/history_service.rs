use chrono::NaiveDate;
use log::debug;
use rayon::prelude::*;
use std::sync::{Arc, RwLock};
use std::time::Instant;

use super::running_state::{HoldingCursor, PortfolioCursor};
use super::{CancellationFlag, HistoryEnvelope, HistoryRequest};
use crate::errors::{CalculatorError, Error, Result};
use crate::portfolio::fund_metrics::{
    calculate_fund_metrics, FundHistoryEntry, FundMetricsInput, PriceMode,
};
use crate::portfolio::reinvestment::{dividend_amount_as_of, reinvested_shares_as_of};
use crate::portfolio::summary::{
    build_current_summary, build_summary, PortfolioDataBundle, PortfolioSummary,
};
use crate::settings::{EngineSettings, ReinvestmentMode, ReplayStrategy};
use crate::transactions::earliest_transaction_date;
use crate::utils::time_utils::{clamp_window, get_days_between, Clock};

pub trait HistoryServiceTrait: Send + Sync {
    /// Replays every portfolio from its first transaction and returns one
    /// summary per portfolio per day of the display window.
    ///
    /// The display window is the requested range clamped to
    /// `[earliest transaction across all bundles, today]`. A window that
    /// collapses yields an empty series. Output is sorted by date, then
    /// portfolio id.
    fn calculate_portfolio_history(
        &self,
        bundles: &[PortfolioDataBundle],
        request: &HistoryRequest,
    ) -> Result<Vec<PortfolioSummary>>;

    /// Per-day history of one fund holding, under the same window rules using
    /// the holding's own first transaction.
    fn calculate_fund_history(
        &self,
        bundle: &PortfolioDataBundle,
        fund_holding_id: &str,
        request: &HistoryRequest,
    ) -> Result<Vec<FundHistoryEntry>>;

    /// Today's summary of every active portfolio, valued at the latest price
    /// of each fund.
    fn calculate_current_summaries(
        &self,
        bundles: &[PortfolioDataBundle],
    ) -> Result<Vec<PortfolioSummary>>;

    /// Portfolio history wrapped in a date-keyed envelope over the requested range.
    fn get_portfolio_history_envelope(
        &self,
        bundles: &[PortfolioDataBundle],
        request: &HistoryRequest,
    ) -> Result<HistoryEnvelope<PortfolioSummary>> {
        let summaries = self.calculate_portfolio_history(bundles, request)?;
        Ok(HistoryEnvelope::new(request, summaries))
    }
}

#[derive(Clone)]
pub struct HistoryService {
    settings: Arc<RwLock<EngineSettings>>,
    clock: Arc<dyn Clock>,
    cancellation: CancellationFlag,
}

impl HistoryService {
    pub fn new(settings: Arc<RwLock<EngineSettings>>, clock: Arc<dyn Clock>) -> Self {
        Self {
            settings,
            clock,
            cancellation: CancellationFlag::new(),
        }
    }

    pub fn with_cancellation(mut self, cancellation: CancellationFlag) -> Self {
        self.cancellation = cancellation;
        self
    }

    pub fn cancellation(&self) -> CancellationFlag {
        self.cancellation.clone()
    }

    fn current_settings(&self) -> Result<EngineSettings> {
        self.settings
            .read()
            .map(|guard| guard.clone())
            .map_err(|_| Error::Unexpected("engine settings lock poisoned".to_string()))
    }

    fn replay_portfolio(
        &self,
        bundle: &PortfolioDataBundle,
        window: (NaiveDate, NaiveDate),
        settings: &EngineSettings,
    ) -> Result<Vec<PortfolioSummary>> {
        let Some(first_day) = bundle.earliest_transaction_date() else {
            return Ok(Vec::new());
        };
        let (window_start, window_end) = window;
        let mode = settings.reinvestment_mode;
        let mut summaries = Vec::new();

        match settings.replay_strategy {
            ReplayStrategy::FullReplay => {
                for day in get_days_between(first_day, window_end) {
                    self.cancellation.check()?;
                    let summary = build_summary(bundle, day, mode)?;
                    if day >= window_start {
                        summaries.extend(summary);
                    }
                }
            }
            ReplayStrategy::Incremental => {
                let mut cursor = PortfolioCursor::new(bundle);
                for day in get_days_between(first_day, window_end) {
                    self.cancellation.check()?;
                    let summary = cursor.summary_on(day, mode)?;
                    if day >= window_start {
                        summaries.extend(summary);
                    }
                }
            }
        }

        Ok(summaries)
    }

    fn replay_fund_holding(
        &self,
        bundle: &PortfolioDataBundle,
        fund_holding_id: &str,
        first_day: NaiveDate,
        window: (NaiveDate, NaiveDate),
        settings: &EngineSettings,
    ) -> Result<Vec<FundHistoryEntry>> {
        let (window_start, window_end) = window;
        let mode = settings.reinvestment_mode;
        let mut entries = Vec::new();

        match settings.replay_strategy {
            ReplayStrategy::FullReplay => {
                for day in get_days_between(first_day, window_end) {
                    self.cancellation.check()?;
                    let entry = fund_entry_on(bundle, fund_holding_id, day, mode)?;
                    if day >= window_start {
                        entries.push(entry);
                    }
                }
            }
            ReplayStrategy::Incremental => {
                let mut cursor = HoldingCursor::new(bundle, fund_holding_id);
                for day in get_days_between(first_day, window_end) {
                    self.cancellation.check()?;
                    cursor.advance_to(day, mode)?;
                    if day >= window_start {
                        entries.push(cursor.history_entry(day));
                    }
                }
            }
        }

        Ok(entries)
    }
}

/// One day of a fund holding's history, replayed from its first transaction.
fn fund_entry_on(
    bundle: &PortfolioDataBundle,
    fund_holding_id: &str,
    day: NaiveDate,
    mode: ReinvestmentMode,
) -> Result<FundHistoryEntry> {
    let transactions = bundle.transactions_for(fund_holding_id);
    let dividends = bundle.dividends_for(fund_holding_id);
    let fund_id = bundle.fund_id_for(fund_holding_id);

    let metrics = calculate_fund_metrics(&FundMetricsInput {
        fund_holding_id,
        fund_id,
        target_date: day,
        transactions,
        reinvested_shares: reinvested_shares_as_of(dividends, transactions, day, mode)?,
        prices: bundle.prices_for_fund(fund_id),
        price_mode: PriceMode::AsOfDate,
    })?;

    Ok(metrics.to_history_entry(dividend_amount_as_of(dividends, day)))
}

impl HistoryServiceTrait for HistoryService {
    fn calculate_portfolio_history(
        &self,
        bundles: &[PortfolioDataBundle],
        request: &HistoryRequest,
    ) -> Result<Vec<PortfolioSummary>> {
        let start_time = Instant::now();
        let settings = self.current_settings()?;

        let all_transactions = bundles.iter().flat_map(|b| b.transactions.values());
        let Some(earliest) = earliest_transaction_date(all_transactions) else {
            debug!(
                "No transactions in {} portfolio(s); history is empty",
                bundles.len()
            );
            return Ok(Vec::new());
        };

        let today = self.clock.today();
        let Some(window) = clamp_window(request.start_date, request.end_date, earliest, today)
        else {
            debug!(
                "Display window {}..{} collapses against earliest {} and today {}; history is empty",
                request.start_date, request.end_date, earliest, today
            );
            return Ok(Vec::new());
        };

        debug!(
            "Replaying {} portfolio(s) from {} for window {}..{} ({:?})",
            bundles.len(),
            earliest,
            window.0,
            window.1,
            settings.replay_strategy
        );

        let per_portfolio: Vec<Vec<PortfolioSummary>> = if settings.parallel_portfolios {
            bundles
                .par_iter()
                .map(|bundle| self.replay_portfolio(bundle, window, &settings))
                .collect::<Result<_>>()?
        } else {
            bundles
                .iter()
                .map(|bundle| self.replay_portfolio(bundle, window, &settings))
                .collect::<Result<_>>()?
        };

        let mut summaries: Vec<PortfolioSummary> = per_portfolio.into_iter().flatten().collect();
        summaries.sort_by(|a, b| {
            a.date
                .cmp(&b.date)
                .then_with(|| a.portfolio_id.cmp(&b.portfolio_id))
        });

        debug!(
            "Portfolio history replay produced {} summaries in {:?}",
            summaries.len(),
            start_time.elapsed()
        );
        Ok(summaries)
    }

    fn calculate_fund_history(
        &self,
        bundle: &PortfolioDataBundle,
        fund_holding_id: &str,
        request: &HistoryRequest,
    ) -> Result<Vec<FundHistoryEntry>> {
        let start_time = Instant::now();
        if !bundle.holding_ids().contains(fund_holding_id) {
            return Err(CalculatorError::FundHoldingNotFound(fund_holding_id.to_string()).into());
        }
        let settings = self.current_settings()?;

        let Some(first_day) = bundle
            .transactions_for(fund_holding_id)
            .first()
            .map(|tx| tx.date)
        else {
            debug!(
                "Fund holding {} has no transactions; history is empty",
                fund_holding_id
            );
            return Ok(Vec::new());
        };

        let today = self.clock.today();
        let Some(window) = clamp_window(request.start_date, request.end_date, first_day, today)
        else {
            debug!(
                "Display window {}..{} collapses for fund holding {}; history is empty",
                request.start_date, request.end_date, fund_holding_id
            );
            return Ok(Vec::new());
        };

        let entries =
            self.replay_fund_holding(bundle, fund_holding_id, first_day, window, &settings)?;
        debug!(
            "Fund holding {} history replay produced {} entries in {:?}",
            fund_holding_id,
            entries.len(),
            start_time.elapsed()
        );
        Ok(entries)
    }

    fn calculate_current_summaries(
        &self,
        bundles: &[PortfolioDataBundle],
    ) -> Result<Vec<PortfolioSummary>> {
        let settings = self.current_settings()?;
        let today = self.clock.today();

        let mut summaries = Vec::with_capacity(bundles.len());
        for bundle in bundles {
            if let Some(summary) = build_current_summary(bundle, today, settings.reinvestment_mode)? {
                summaries.push(summary);
            }
        }
        summaries.sort_by(|a, b| a.portfolio_id.cmp(&b.portfolio_id));
        Ok(summaries)
    }
}
