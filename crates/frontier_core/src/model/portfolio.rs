use std::fmt;

use serde::{Deserialize, Serialize};

use crate::aggregate::{self, Aggregate};
use crate::correlation::CorrelationMatrix;
use crate::error::LookupError;
use crate::model::{AssetClass, AssetId, PortfolioId};

/// Weight of one asset class inside a portfolio, in percent (0-100)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    pub asset: AssetId,
    pub weight: f64,
}

/// A long-only mix of asset classes with its aggregated risk and return
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Portfolio {
    id: PortfolioId,
    name: String,
    composition: Vec<Holding>,
    expected_return: f64,
    std_dev: f64,
}

impl Portfolio {
    /// Aggregate a composition into a portfolio.
    ///
    /// `assets` is the universe of the run, indexed by [`AssetId`].
    pub fn new(
        id: PortfolioId,
        name: impl Into<String>,
        composition: Vec<Holding>,
        assets: &[AssetClass],
        correlations: &CorrelationMatrix,
    ) -> Result<Self, LookupError> {
        let Aggregate {
            expected_return,
            std_dev,
        } = aggregate::aggregate(&composition, assets, correlations)?;

        Ok(Self {
            id,
            name: name.into(),
            composition,
            expected_return,
            std_dev,
        })
    }

    #[must_use]
    pub fn id(&self) -> PortfolioId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn composition(&self) -> &[Holding] {
        &self.composition
    }

    /// Weight of an asset in percent, 0 when the asset is not held
    #[must_use]
    pub fn weight_of(&self, asset: AssetId) -> f64 {
        self.composition
            .iter()
            .filter(|h| h.asset == asset)
            .map(|h| h.weight)
            .sum()
    }

    #[must_use]
    pub fn total_weight(&self) -> f64 {
        self.composition.iter().map(|h| h.weight).sum()
    }

    #[must_use]
    pub fn expected_return(&self) -> f64 {
        self.expected_return
    }

    #[must_use]
    pub fn std_dev(&self) -> f64 {
        self.std_dev
    }

    /// Sharpe ratio against `risk_free_rate`, clamped at 0
    #[must_use]
    pub fn sharpe_ratio(&self, risk_free_rate: f64) -> f64 {
        aggregate::sharpe_ratio(self.expected_return, self.std_dev, risk_free_rate)
    }

    /// Human-readable rendering that resolves asset names against `assets`
    #[must_use]
    pub fn describe<'a>(&'a self, assets: &'a [AssetClass]) -> PortfolioDisplay<'a> {
        PortfolioDisplay {
            portfolio: self,
            assets,
        }
    }
}

/// Display adapter returned by [`Portfolio::describe`]
pub struct PortfolioDisplay<'a> {
    portfolio: &'a Portfolio,
    assets: &'a [AssetClass],
}

impl fmt::Display for PortfolioDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = self.portfolio;
        writeln!(f, "Portfolio = [{}, composition = {{", p.name)?;
        for holding in &p.composition {
            let name = self
                .assets
                .get(holding.asset.index())
                .map_or("<unknown>", AssetClass::name);
            writeln!(f, "    {:.2}% : {},", holding.weight, name)?;
        }
        writeln!(f, "}},")?;
        writeln!(f, "E(r) = {:.2}%", p.expected_return * 100.0)?;
        write!(f, "sd   = {:.2}%]", p.std_dev * 100.0)
    }
}
