//! Scenario tests for the frontier engine
//!
//! Tests are organized by topic:
//! - `sampling` - Population size, weight sums, optimal selection and determinism
//! - `aggregation` - Closed-form portfolio risk in limiting cases
//! - `pipeline` - Returns table through resampling, statistics and correlation to a ranked frontier

mod aggregation;
mod pipeline;
