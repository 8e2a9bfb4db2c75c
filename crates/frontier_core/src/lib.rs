//! Efficient-frontier estimation library
//!
//! This crate turns tables of historical periodic returns into annualized
//! risk/return statistics and approximates the efficient frontier by
//! Monte-Carlo sampling of long-only portfolio weights.
//! It supports:
//! - Annualized expected return and standard deviation per asset class
//! - Pairwise-complete correlation between asset classes
//! - Calendar resampling of dated returns (daily, weekly, monthly, yearly)
//! - Random weight sampling, closed-form portfolio aggregation and Sharpe ranking
//! - Deterministic parallel sampling behind the `parallel` feature
//!
//! # Example
//!
//! ```ignore
//! use frontier_core::{CorrelationMatrix, FrontierSampler, Period, ReturnsTable};
//! use rand::SeedableRng;
//!
//! let table = ReturnsTable::new(names, Some(dates), columns)?.resample(Period::Month)?;
//! let assets = table.asset_classes(Period::Month)?;
//! let correlations = CorrelationMatrix::build(&table);
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(42);
//! let result = FrontierSampler::new().run(&assets, &correlations, 1000, 0.02, &mut rng)?;
//! println!("{}", result.optimal().describe(&assets));
//! ```

#![warn(clippy::all)]

// ============================================================================
// Core modules
// ============================================================================

pub mod aggregate;
pub mod correlation;
pub mod error;
pub mod frontier;
pub mod report;
pub mod sampler;
pub mod statistics;
pub mod timing;

// ============================================================================
// Type definition modules
// ============================================================================

pub mod model;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use correlation::CorrelationMatrix;
pub use error::{
    FrontierError, LookupError, SamplingError, StatisticsError, TableError, TimingError,
};
pub use frontier::{FrontierSampler, SamplerPhase};
pub use model::{
    AssetClass, AssetId, FrontierResult, Holding, Period, Portfolio, PortfolioId, ReturnsTable,
};
pub use report::{ReportRow, ReportTable, to_table};
pub use timing::{Stopwatch, TimingReport};
