//! Random portfolio weight vectors
//!
//! Each vector draws one value per asset from the open interval (0, 1) and
//! rescales so the entries sum to 100. This does not sample uniformly over
//! the simplex: mixes near equal weighting are over-represented, while
//! corner portfolios dominated by a single asset are rare.

use rand::Rng;
use rand::distr::Open01;

use crate::error::SamplingError;

/// Total of every weight vector, weights are in percent
pub const TOTAL_WEIGHT: f64 = 100.0;

/// Draw one weight vector of `n` entries summing to [`TOTAL_WEIGHT`].
pub fn sample_weights<R: Rng + ?Sized>(rng: &mut R, n: usize) -> Result<Vec<f64>, SamplingError> {
    if n == 0 {
        return Err(SamplingError::InvalidAssetCount(n));
    }

    let mut weights: Vec<f64> = (0..n).map(|_| rng.sample(Open01)).collect();
    let scale = TOTAL_WEIGHT / weights.iter().sum::<f64>();
    for w in &mut weights {
        *w *= scale;
    }
    Ok(weights)
}

/// Lazy, endless stream of weight vectors for a fixed asset count.
///
/// `R` may be an owned generator or a `&mut` borrow of one.
#[derive(Debug)]
pub struct WeightSampler<R> {
    rng: R,
    assets: usize,
}

impl<R: Rng> WeightSampler<R> {
    pub fn new(rng: R, assets: usize) -> Result<Self, SamplingError> {
        if assets == 0 {
            return Err(SamplingError::InvalidAssetCount(assets));
        }
        Ok(Self { rng, assets })
    }

    #[must_use]
    pub fn assets(&self) -> usize {
        self.assets
    }

    /// Recover the generator, e.g. to continue a seeded stream elsewhere
    pub fn into_inner(self) -> R {
        self.rng
    }
}

impl<R: Rng> Iterator for WeightSampler<R> {
    type Item = Vec<f64>;

    fn next(&mut self) -> Option<Self::Item> {
        // Asset count is validated in `new`
        sample_weights(&mut self.rng, self.assets).ok()
    }
}
