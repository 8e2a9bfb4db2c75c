//! Efficient frontier explorer
//!
//! Reads historical asset returns, samples random long-only portfolios with
//! `frontier_core` and presents the result:
//! - Console summary of the maximum-Sharpe and user-defined portfolios
//! - JSON export of the full population
//! - Interactive terminal chart and a standalone plotly page

// ============================================================================
// Application
// ============================================================================

pub mod app;
pub mod logging;

// ============================================================================
// Input and output
// ============================================================================

pub mod chart;
pub mod input;
pub mod report;
pub mod util;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use app::{Analysis, App, RunOptions};
pub use logging::init_logging;
