//! Console and JSON reporting of an analysis

mod console;
mod json;

pub use console::{render_console, render_portfolio};
pub use json::{AssetSummary, JsonReport, PortfolioSummary, WeightEntry, write_json};
