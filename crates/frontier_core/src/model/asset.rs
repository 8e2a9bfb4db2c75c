use std::fmt;

use serde::Serialize;

use crate::error::StatisticsError;
use crate::model::{AssetId, Period};
use crate::statistics;

/// A risky asset class described by its annualized expected return and
/// standard deviation.
///
/// Statistics are derived once from the full history at construction and
/// cannot change afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssetClass {
    id: AssetId,
    name: String,
    period: Period,
    #[serde(skip)]
    historical_returns: Vec<Option<f64>>,
    expected_return: f64,
    std_dev: f64,
}

impl AssetClass {
    /// Derive an asset class from its periodic historical returns.
    pub fn from_history(
        id: AssetId,
        name: impl Into<String>,
        historical_returns: Vec<Option<f64>>,
        period: Period,
    ) -> Result<Self, StatisticsError> {
        let name = name.into();
        let summary = statistics::compute(&name, &historical_returns, period)?;
        Ok(Self {
            id,
            name,
            period,
            historical_returns,
            expected_return: summary.expected_return,
            std_dev: summary.std_dev,
        })
    }

    /// Build an asset class from already-annualized statistics.
    #[must_use]
    pub fn with_statistics(
        id: AssetId,
        name: impl Into<String>,
        period: Period,
        expected_return: f64,
        std_dev: f64,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            period,
            historical_returns: Vec::new(),
            expected_return,
            std_dev: std_dev.max(0.0),
        }
    }

    #[must_use]
    pub fn id(&self) -> AssetId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn period(&self) -> Period {
        self.period
    }

    #[must_use]
    pub fn historical_returns(&self) -> &[Option<f64>] {
        &self.historical_returns
    }

    /// Annualized expected return (decimal fraction)
    #[must_use]
    pub fn expected_return(&self) -> f64 {
        self.expected_return
    }

    /// Annualized standard deviation (decimal fraction)
    #[must_use]
    pub fn std_dev(&self) -> f64 {
        self.std_dev
    }
}

impl fmt::Display for AssetClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "AssetClass = [{}, E(r) = {:.2}%, sd = {:.2}%]",
            self.name,
            self.expected_return * 100.0,
            self.std_dev * 100.0
        )
    }
}
