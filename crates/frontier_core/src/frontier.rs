//! Monte-Carlo approximation of the efficient frontier
//!
//! A [`FrontierSampler`] draws a fixed population of random long-only
//! portfolios, scores each one by its Sharpe ratio and picks the best.
//! The run moves through `Idle -> Sampling -> Aggregating -> Ranked`.

use rand::Rng;

use crate::aggregate;
use crate::correlation::CorrelationMatrix;
use crate::error::FrontierError;
use crate::model::{AssetClass, FrontierResult, Holding, Portfolio, PortfolioId};
use crate::sampler::WeightSampler;

/// Portfolios drawn per batch by [`FrontierSampler::run_parallel`]
#[cfg(feature = "parallel")]
pub const BATCH_SIZE: usize = 100;

/// Lifecycle of a sampling run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SamplerPhase {
    #[default]
    Idle,
    /// Drawing weight vectors and aggregating them into portfolios
    Sampling,
    /// Scoring the population against the risk-free rate
    Aggregating,
    /// Optimal portfolio located, result handed out
    Ranked,
}

#[derive(Debug, Default)]
pub struct FrontierSampler {
    phase: SamplerPhase,
}

impl FrontierSampler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn phase(&self) -> SamplerPhase {
        self.phase
    }

    /// Draw `sample_size` portfolios from `rng` and locate the maximum-Sharpe one.
    ///
    /// Portfolios are named `Portfolio1..PortfolioN` in generation order.
    /// Any failure aborts the run and returns the sampler to `Idle`.
    pub fn run<R: Rng + ?Sized>(
        &mut self,
        assets: &[AssetClass],
        correlations: &CorrelationMatrix,
        sample_size: usize,
        risk_free_rate: f64,
        rng: &mut R,
    ) -> Result<FrontierResult, FrontierError> {
        validate(assets, sample_size)?;

        self.transition(SamplerPhase::Sampling);
        let portfolios = WeightSampler::new(rng, assets.len())?
            .take(sample_size)
            .enumerate()
            .map(|(index, weights)| build_portfolio(index, &weights, assets, correlations))
            .collect::<Result<Vec<_>, _>>();

        self.finish(portfolios, risk_free_rate)
    }

    /// Parallel variant of [`FrontierSampler::run`].
    ///
    /// The population is split into batches of [`BATCH_SIZE`]. Batch seeds
    /// are drawn up front from `seed`, so the result only depends on the
    /// seed and never on the thread count. Batches are reassembled in
    /// order, which keeps generation order and tie-breaking intact.
    #[cfg(feature = "parallel")]
    pub fn run_parallel(
        &mut self,
        assets: &[AssetClass],
        correlations: &CorrelationMatrix,
        sample_size: usize,
        risk_free_rate: f64,
        seed: u64,
    ) -> Result<FrontierResult, FrontierError> {
        use rand::rngs::{SmallRng, StdRng};
        use rand::{RngCore, SeedableRng};
        use rayon::prelude::*;

        validate(assets, sample_size)?;

        self.transition(SamplerPhase::Sampling);
        let num_batches = sample_size.div_ceil(BATCH_SIZE);
        let mut seeder = StdRng::seed_from_u64(seed);
        let batch_seeds: Vec<u64> = (0..num_batches).map(|_| seeder.next_u64()).collect();

        let batches = batch_seeds
            .into_par_iter()
            .enumerate()
            .map(|(batch, batch_seed)| -> Result<Vec<Portfolio>, FrontierError> {
                let start = batch * BATCH_SIZE;
                let end = (start + BATCH_SIZE).min(sample_size);
                let rng = SmallRng::seed_from_u64(batch_seed);
                let sampler = WeightSampler::new(rng, assets.len())?;

                (start..end)
                    .zip(sampler)
                    .map(|(index, weights)| build_portfolio(index, &weights, assets, correlations))
                    .collect()
            })
            .collect::<Result<Vec<Vec<Portfolio>>, FrontierError>>();

        let portfolios = batches.map(|b| b.into_iter().flatten().collect());
        self.finish(portfolios, risk_free_rate)
    }

    fn finish(
        &mut self,
        portfolios: Result<Vec<Portfolio>, FrontierError>,
        risk_free_rate: f64,
    ) -> Result<FrontierResult, FrontierError> {
        let portfolios = match portfolios {
            Ok(p) => p,
            Err(e) => {
                tracing::debug!(error = %e, "Frontier sampling failed");
                self.phase = SamplerPhase::Idle;
                return Err(e);
            }
        };

        self.transition(SamplerPhase::Aggregating);
        let sharpe_ratios: Vec<f64> = portfolios
            .iter()
            .map(|p| aggregate::sharpe_ratio(p.expected_return(), p.std_dev(), risk_free_rate))
            .collect();

        let optimal = PortfolioId(stable_argmax(&sharpe_ratios) as u32);
        self.transition(SamplerPhase::Ranked);
        tracing::debug!(
            portfolios = portfolios.len(),
            optimal = optimal.0 + 1,
            sharpe = sharpe_ratios[optimal.index()],
            "Frontier ranked"
        );

        Ok(FrontierResult::new(
            portfolios,
            sharpe_ratios,
            optimal,
            risk_free_rate,
        ))
    }

    fn transition(&mut self, next: SamplerPhase) {
        tracing::debug!(from = ?self.phase, to = ?next, "Frontier sampler phase");
        self.phase = next;
    }
}

fn validate(assets: &[AssetClass], sample_size: usize) -> Result<(), FrontierError> {
    if assets.is_empty() {
        return Err(FrontierError::EmptyAssetUniverse);
    }
    if sample_size == 0 || u32::try_from(sample_size).is_err() {
        return Err(FrontierError::InvalidSampleSize(sample_size));
    }
    Ok(())
}

fn build_portfolio(
    index: usize,
    weights: &[f64],
    assets: &[AssetClass],
    correlations: &CorrelationMatrix,
) -> Result<Portfolio, FrontierError> {
    let composition = assets
        .iter()
        .zip(weights)
        .map(|(asset, &weight)| Holding {
            asset: asset.id(),
            weight,
        })
        .collect();

    Portfolio::new(
        PortfolioId(index as u32),
        format!("Portfolio{}", index + 1),
        composition,
        assets,
        correlations,
    )
    .map_err(FrontierError::from)
}

/// Index of the first maximum; NaN never wins
fn stable_argmax(values: &[f64]) -> usize {
    let mut best = 0;
    for (i, v) in values.iter().enumerate().skip(1) {
        if *v > values[best] || values[best].is_nan() {
            best = i;
        }
    }
    best
}
