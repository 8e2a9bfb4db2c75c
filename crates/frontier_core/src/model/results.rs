use serde::Serialize;

use crate::model::{Portfolio, PortfolioId};

/// Outcome of a frontier sampling run
///
/// Holds the candidate population in generation order, the clamped Sharpe
/// ratio of every candidate, and which candidate maximizes it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrontierResult {
    portfolios: Vec<Portfolio>,
    sharpe_ratios: Vec<f64>,
    optimal: PortfolioId,
    risk_free_rate: f64,
}

impl FrontierResult {
    pub(crate) fn new(
        portfolios: Vec<Portfolio>,
        sharpe_ratios: Vec<f64>,
        optimal: PortfolioId,
        risk_free_rate: f64,
    ) -> Self {
        debug_assert_eq!(portfolios.len(), sharpe_ratios.len());
        debug_assert!(optimal.index() < portfolios.len());
        Self {
            portfolios,
            sharpe_ratios,
            optimal,
            risk_free_rate,
        }
    }

    #[must_use]
    pub fn portfolios(&self) -> &[Portfolio] {
        &self.portfolios
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.portfolios.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.portfolios.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: PortfolioId) -> Option<&Portfolio> {
        self.portfolios.get(id.index())
    }

    #[must_use]
    pub fn optimal_id(&self) -> PortfolioId {
        self.optimal
    }

    /// The maximum-Sharpe (tangency) portfolio
    #[must_use]
    pub fn optimal(&self) -> &Portfolio {
        &self.portfolios[self.optimal.index()]
    }

    #[must_use]
    pub fn optimal_sharpe_ratio(&self) -> f64 {
        self.sharpe_ratios[self.optimal.index()]
    }

    #[must_use]
    pub fn sharpe_ratios(&self) -> &[f64] {
        &self.sharpe_ratios
    }

    #[must_use]
    pub fn sharpe_ratio(&self, id: PortfolioId) -> Option<f64> {
        self.sharpe_ratios.get(id.index()).copied()
    }

    #[must_use]
    pub fn risk_free_rate(&self) -> f64 {
        self.risk_free_rate
    }

    /// Portfolio ids ordered by descending Sharpe ratio.
    ///
    /// Equal ratios keep generation order, so the first entry is always the
    /// optimal portfolio.
    #[must_use]
    pub fn ranked_by_sharpe(&self) -> Vec<PortfolioId> {
        let mut ids: Vec<PortfolioId> = self.portfolios.iter().map(Portfolio::id).collect();
        ids.sort_by(|a, b| {
            let sa = self.sharpe_ratios[a.index()];
            let sb = self.sharpe_ratios[b.index()];
            sb.partial_cmp(&sa).unwrap_or(std::cmp::Ordering::Equal)
        });
        ids
    }
}
