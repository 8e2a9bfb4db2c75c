//! Run parameters read from a YAML file

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use frontier_core::{AssetClass, Holding, Period};
use serde::{Deserialize, Serialize};

use super::InputError;

/// Population size used when nothing else is configured
pub const DEFAULT_SAMPLE_SIZE: usize = 1000;

/// Tolerance for user weights that are meant to sum to 100
const WEIGHT_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Parameters {
    /// Decimal fraction, e.g. 0.02 for 2%
    pub risk_free_rate: f64,
    /// Available borrowing rate, reported alongside the results
    pub borrowing_rate: Option<f64>,
    /// Periodicity of the observations in the returns file
    pub period: Period,
    /// Compound dated observations into `period` buckets before analysis
    pub resample: bool,
    pub sample_size: usize,
    pub seed: Option<u64>,
    pub portfolios: Vec<UserPortfolio>,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            risk_free_rate: 0.0,
            borrowing_rate: None,
            period: Period::Month,
            resample: false,
            sample_size: DEFAULT_SAMPLE_SIZE,
            seed: None,
            portfolios: Vec::new(),
        }
    }
}

impl Parameters {
    /// Load from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self, InputError> {
        serde_saphyr::from_str(yaml)
            .map_err(|e| InputError::Yaml(format!("Failed to parse parameters: {e}")))
    }

    /// Save to YAML string
    pub fn to_yaml(&self) -> Result<String, InputError> {
        serde_saphyr::to_string(self)
            .map_err(|e| InputError::Yaml(format!("Failed to serialize parameters: {e}")))
    }

    /// Load a parameters file
    pub fn load(path: &Path) -> Result<Self, InputError> {
        let content = fs::read_to_string(path)
            .map_err(|e| InputError::Io(format!("Failed to read {}: {e}", path.display())))?;
        let params = Self::from_yaml(&content)?;
        tracing::info!(
            path = %path.display(),
            period = %params.period,
            portfolios = params.portfolios.len(),
            "Loaded parameters"
        );
        Ok(params)
    }
}

/// A portfolio defined by the analyst, evaluated next to the sampled population
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserPortfolio {
    pub name: String,
    /// Asset name to weight; weights are normalized to sum to 100
    pub weights: BTreeMap<String, f64>,
}

impl UserPortfolio {
    /// Resolve asset names against the run's universe.
    ///
    /// Holdings come back in asset order with weights rescaled to sum to
    /// 100. A rescale is logged as a warning.
    pub fn holdings(&self, assets: &[AssetClass]) -> Result<Vec<Holding>, InputError> {
        for (name, weight) in &self.weights {
            if !assets.iter().any(|a| a.name() == name) {
                return Err(InputError::Portfolio(format!(
                    "'{}' references unknown asset '{name}'",
                    self.name
                )));
            }
            if !weight.is_finite() || *weight < 0.0 {
                return Err(InputError::Portfolio(format!(
                    "'{}' has invalid weight {weight} for '{name}'",
                    self.name
                )));
            }
        }

        let total: f64 = self.weights.values().sum();
        if total <= 0.0 {
            return Err(InputError::Portfolio(format!(
                "'{}' has no positive weight",
                self.name
            )));
        }
        if (total - 100.0).abs() > WEIGHT_TOLERANCE {
            tracing::warn!(
                portfolio = %self.name,
                total,
                "User portfolio weights do not sum to 100, normalizing"
            );
        }

        Ok(assets
            .iter()
            .filter_map(|asset| {
                self.weights.get(asset.name()).map(|w| Holding {
                    asset: asset.id(),
                    weight: w / total * 100.0,
                })
            })
            .collect())
    }
}
