//! Loads everything a replay needs into per-portfolio bundles, once, up front.

use log::debug;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;
use std::time::Instant;

use crate::dividends::DividendRepositoryTrait;
use crate::errors::{CalculatorError, Result};
use crate::portfolio::realized_gains::RealizedGainRepositoryTrait;
use crate::portfolio::summary::PortfolioDataBundle;
use crate::portfolio::{FundHolding, Portfolio, PortfolioRepositoryTrait};
use crate::prices::PriceRepositoryTrait;
use crate::transactions::TransactionRepositoryTrait;

/// Reads raw records through the repositories and groups them by portfolio.
///
/// History is always loaded without date bounds: holdings are path dependent
/// from their first transaction, and a dividend may link a reinvestment booked
/// after any display window.
#[derive(Clone)]
pub struct PortfolioDataLoader {
    portfolio_repository: Arc<dyn PortfolioRepositoryTrait>,
    transaction_repository: Arc<dyn TransactionRepositoryTrait>,
    dividend_repository: Arc<dyn DividendRepositoryTrait>,
    price_repository: Arc<dyn PriceRepositoryTrait>,
    realized_gain_repository: Arc<dyn RealizedGainRepositoryTrait>,
}

impl PortfolioDataLoader {
    pub fn new(
        portfolio_repository: Arc<dyn PortfolioRepositoryTrait>,
        transaction_repository: Arc<dyn TransactionRepositoryTrait>,
        dividend_repository: Arc<dyn DividendRepositoryTrait>,
        price_repository: Arc<dyn PriceRepositoryTrait>,
        realized_gain_repository: Arc<dyn RealizedGainRepositoryTrait>,
    ) -> Self {
        Self {
            portfolio_repository,
            transaction_repository,
            dividend_repository,
            price_repository,
            realized_gain_repository,
        }
    }

    /// One bundle per requested portfolio, in request order.
    pub fn load_portfolio_bundles(
        &self,
        portfolio_ids: &[String],
    ) -> Result<Vec<PortfolioDataBundle>> {
        let start_time = Instant::now();

        let portfolios = portfolio_ids
            .iter()
            .map(|id| self.portfolio_repository.get_portfolio(id))
            .collect::<Result<Vec<Portfolio>>>()?;
        let holdings = self.portfolio_repository.list_fund_holdings(portfolio_ids)?;

        let mut bundles = self.assemble(portfolios, &holdings, true)?;
        for bundle in &mut bundles {
            bundle.sort_collections();
        }

        debug!(
            "Loaded {} portfolio bundle(s) with {} holding(s) in {:?}",
            bundles.len(),
            holdings.len(),
            start_time.elapsed()
        );
        Ok(bundles)
    }

    /// Bundle holding a single fund holding of its portfolio. Realized gains
    /// are portfolio-level and are not loaded.
    pub fn load_bundle_for_fund_holding(
        &self,
        fund_holding_id: &str,
    ) -> Result<PortfolioDataBundle> {
        let holding = self.portfolio_repository.get_fund_holding(fund_holding_id)?;
        let portfolio = self
            .portfolio_repository
            .get_portfolio(&holding.portfolio_id)?;

        let mut bundle = self
            .assemble(vec![portfolio], std::slice::from_ref(&holding), false)?
            .pop()
            .ok_or_else(|| CalculatorError::FundHoldingNotFound(fund_holding_id.to_string()))?;
        bundle.sort_collections();
        Ok(bundle)
    }

    fn assemble(
        &self,
        portfolios: Vec<Portfolio>,
        holdings: &[FundHolding],
        with_realized_gains: bool,
    ) -> Result<Vec<PortfolioDataBundle>> {
        let mut bundles: Vec<PortfolioDataBundle> =
            portfolios.into_iter().map(PortfolioDataBundle::new).collect();
        let bundle_index: HashMap<String, usize> = bundles
            .iter()
            .enumerate()
            .map(|(index, bundle)| (bundle.portfolio_id().to_string(), index))
            .collect();

        // fund holding id -> bundle index
        let mut holding_owner: BTreeMap<&str, usize> = BTreeMap::new();
        for holding in holdings {
            if let Some(&index) = bundle_index.get(&holding.portfolio_id) {
                bundles[index].add_holding(holding);
                holding_owner.insert(holding.id.as_str(), index);
            }
        }

        let holding_ids: Vec<String> = holding_owner.keys().map(|id| id.to_string()).collect();
        let fund_ids: Vec<String> = holdings
            .iter()
            .map(|h| h.fund_id.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        for transaction in self
            .transaction_repository
            .get_transactions_for_holdings(&holding_ids, None, None)?
        {
            if let Some(&index) = holding_owner.get(transaction.fund_holding_id.as_str()) {
                bundles[index].add_transaction(transaction);
            }
        }

        for dividend in self
            .dividend_repository
            .get_dividends_for_holdings(&holding_ids, None, None)?
        {
            if let Some(&index) = holding_owner.get(dividend.fund_holding_id.as_str()) {
                bundles[index].add_dividend(dividend);
            }
        }

        let prices = self
            .price_repository
            .get_prices_for_funds(&fund_ids, None, None)?;
        for bundle in &mut bundles {
            let funds: BTreeSet<String> = bundle.holding_funds.values().cloned().collect();
            for point in prices.iter().filter(|p| funds.contains(&p.fund_id)) {
                bundle.add_price(point.clone());
            }
        }

        if with_realized_gains {
            let portfolio_ids: Vec<String> = bundles
                .iter()
                .map(|b| b.portfolio_id().to_string())
                .collect();
            for record in self
                .realized_gain_repository
                .get_realized_gains(&portfolio_ids, None, None)?
            {
                if let Some(&index) = bundle_index.get(&record.portfolio_id) {
                    bundles[index].add_realized_gain(record);
                }
            }
        }

        Ok(bundles)
    }
}
