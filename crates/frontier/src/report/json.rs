use std::path::Path;

use frontier_core::{AssetClass, Period, Portfolio, ReportTable, to_table};
use serde::Serialize;

use crate::app::Analysis;
use crate::util::io::atomic_write;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeightEntry {
    pub asset: String,
    /// Percent
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortfolioSummary {
    pub name: String,
    pub expected_return: f64,
    pub std_dev: f64,
    /// `None` stands for an unbounded ratio, JSON has no infinity
    pub sharpe_ratio: Option<f64>,
    pub composition: Vec<WeightEntry>,
}

impl PortfolioSummary {
    pub fn new(portfolio: &Portfolio, assets: &[AssetClass], risk_free_rate: f64) -> Self {
        let sharpe = portfolio.sharpe_ratio(risk_free_rate);
        Self {
            name: portfolio.name().to_string(),
            expected_return: portfolio.expected_return(),
            std_dev: portfolio.std_dev(),
            sharpe_ratio: sharpe.is_finite().then_some(sharpe),
            composition: portfolio
                .composition()
                .iter()
                .map(|h| WeightEntry {
                    asset: assets
                        .get(h.asset.index())
                        .map_or_else(|| format!("{:?}", h.asset), |a| a.name().to_string()),
                    weight: h.weight,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssetSummary {
    pub name: String,
    pub expected_return: f64,
    pub std_dev: f64,
}

/// Machine-readable report: parameters, asset statistics, the optimal and
/// user portfolios, and every sampled point
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JsonReport {
    pub title: String,
    pub period: Period,
    pub risk_free_rate: f64,
    pub borrowing_rate: Option<f64>,
    pub seed: u64,
    pub assets: Vec<AssetSummary>,
    /// Row-major, `null` where a pair has no defined correlation
    pub correlations: Vec<Vec<Option<f64>>>,
    pub optimal: PortfolioSummary,
    pub user_portfolios: Vec<PortfolioSummary>,
    pub population: ReportTable,
}

impl JsonReport {
    pub fn from_analysis(analysis: &Analysis) -> Self {
        let rf = analysis.risk_free_rate();
        Self {
            title: analysis.title(),
            period: analysis.params.period,
            risk_free_rate: rf,
            borrowing_rate: analysis.params.borrowing_rate,
            seed: analysis.seed,
            assets: analysis
                .assets
                .iter()
                .map(|a| AssetSummary {
                    name: a.name().to_string(),
                    expected_return: a.expected_return(),
                    std_dev: a.std_dev(),
                })
                .collect(),
            correlations: analysis.correlations.to_rows(),
            optimal: PortfolioSummary::new(analysis.result.optimal(), &analysis.assets, rf),
            user_portfolios: analysis
                .user_portfolios
                .iter()
                .map(|p| PortfolioSummary::new(p, &analysis.assets, rf))
                .collect(),
            population: to_table(analysis.result.portfolios()),
        }
    }
}

/// Serialize the report of `analysis` and write it atomically to `path`
pub fn write_json(path: &Path, analysis: &Analysis) -> color_eyre::Result<()> {
    let report = JsonReport::from_analysis(analysis);
    let json = serde_json::to_string_pretty(&report)?;
    atomic_write(path, &json)?;
    tracing::info!(path = %path.display(), "JSON report written");
    Ok(())
}
