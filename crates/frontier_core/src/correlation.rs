//! Pairwise Pearson correlation between the asset columns of a returns table

use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::error::LookupError;
use crate::model::{AssetId, ReturnsTable};

/// Symmetric correlation lookup keyed by asset pairs.
///
/// Every stored coefficient lies in [-1, 1] and the diagonal is exactly 1.
/// Pairs without enough overlapping observations have no entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    names: Vec<String>,
    #[serde(skip)]
    cells: FxHashMap<(AssetId, AssetId), f64>,
}

impl CorrelationMatrix {
    /// Create a matrix over `names` holding only the diagonal.
    #[must_use]
    pub fn identity(names: Vec<String>) -> Self {
        let cells = (0..names.len())
            .map(|i| {
                let id = AssetId(i as u16);
                ((id, id), 1.0)
            })
            .collect();
        Self { names, cells }
    }

    /// Compute pairwise-complete Pearson correlations for every asset pair.
    ///
    /// An observation contributes to pair (i, j) only when both assets have a
    /// value for it. A pair where either side is constant over the shared
    /// observations gets 0.
    #[must_use]
    pub fn build(table: &ReturnsTable) -> Self {
        let mut matrix = Self::identity(table.names().to_vec());
        let columns = table.columns();

        for i in 0..columns.len() {
            for j in (i + 1)..columns.len() {
                if let Some(rho) = pairwise_pearson(&columns[i], &columns[j]) {
                    matrix.set(AssetId(i as u16), AssetId(j as u16), rho);
                }
            }
        }

        matrix
    }

    /// Store `rho` for both orders of the pair. Values are clamped to [-1, 1].
    pub fn set(&mut self, a: AssetId, b: AssetId, rho: f64) {
        if a == b {
            return;
        }
        let rho = rho.clamp(-1.0, 1.0);
        self.cells.insert((a, b), rho);
        self.cells.insert((b, a), rho);
    }

    /// Builder-style variant of [`CorrelationMatrix::set`]
    #[must_use]
    pub fn with(mut self, a: AssetId, b: AssetId, rho: f64) -> Self {
        self.set(a, b, rho);
        self
    }

    #[must_use]
    pub fn get(&self, a: AssetId, b: AssetId) -> Option<f64> {
        self.cells.get(&(a, b)).copied()
    }

    /// Look up a correlation by asset names
    #[must_use]
    pub fn get_by_name(&self, a: &str, b: &str) -> Option<f64> {
        let a = self.id_of(a)?;
        let b = self.id_of(b)?;
        self.get(a, b)
    }

    /// Like [`CorrelationMatrix::get`] but reports which pair is missing
    pub fn require(&self, a: AssetId, b: AssetId) -> Result<f64, LookupError> {
        self.get(a, b).ok_or_else(|| {
            LookupError::UnknownAssetPair(self.name_of(a).to_string(), self.name_of(b).to_string())
        })
    }

    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Dense row-major rendering, `None` where a pair is undefined
    #[must_use]
    pub fn to_rows(&self) -> Vec<Vec<Option<f64>>> {
        (0..self.names.len())
            .map(|i| {
                (0..self.names.len())
                    .map(|j| self.get(AssetId(i as u16), AssetId(j as u16)))
                    .collect()
            })
            .collect()
    }

    fn id_of(&self, name: &str) -> Option<AssetId> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|i| AssetId(i as u16))
    }

    fn name_of(&self, id: AssetId) -> &str {
        self.names.get(id.index()).map_or("<unknown>", String::as_str)
    }
}

/// Pearson correlation over the observations where both series are present
fn pairwise_pearson(x: &[Option<f64>], y: &[Option<f64>]) -> Option<f64> {
    let pairs: Vec<(f64, f64)> = x
        .iter()
        .zip(y)
        .filter_map(|(a, b)| match (a, b) {
            (Some(a), Some(b)) if a.is_finite() && b.is_finite() => Some((*a, *b)),
            _ => None,
        })
        .collect();

    if pairs.len() < 2 {
        return None;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|(a, _)| a).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|(_, b)| b).sum::<f64>() / n;

    let mut numerator = 0.0;
    let mut denom_x = 0.0;
    let mut denom_y = 0.0;
    for (a, b) in &pairs {
        let dx = a - mean_x;
        let dy = b - mean_y;
        numerator += dx * dy;
        denom_x += dx * dx;
        denom_y += dy * dy;
    }

    if denom_x == 0.0 || denom_y == 0.0 {
        return Some(0.0);
    }
    Some(numerator / (denom_x.sqrt() * denom_y.sqrt()))
}
