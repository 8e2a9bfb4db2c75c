//! Tests for the full path from a returns table to a ranked frontier
//!
//! These tests verify:
//! - Daily returns resampled to months compound correctly
//! - Asset statistics and correlations feed a frontier run end to end
//! - Gaps in one asset's history do not disturb other assets

use jiff::ToSpan;
use jiff::civil::{Date, date};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::{Distribution, Normal};

use crate::correlation::CorrelationMatrix;
use crate::frontier::FrontierSampler;
use crate::model::{AssetId, Period, ReturnsTable};
use crate::report::to_table;

fn daily_dates(start: Date, days: usize) -> Vec<Date> {
    start.series(1.day()).take(days).collect()
}

/// Synthetic daily history: an equity-like and a bond-like series
fn synthetic_table(days: usize, seed: u64) -> ReturnsTable {
    let mut rng = StdRng::seed_from_u64(seed);
    let equity = Normal::new(0.0004, 0.01).unwrap();
    let bond = Normal::new(0.00015, 0.002).unwrap();

    let a: Vec<Option<f64>> = (0..days).map(|_| Some(equity.sample(&mut rng))).collect();
    let b: Vec<Option<f64>> = (0..days).map(|_| Some(bond.sample(&mut rng))).collect();

    ReturnsTable::new(
        vec!["Equity".into(), "Bonds".into()],
        Some(daily_dates(date(2023, 1, 1), days)),
        vec![a, b],
    )
    .unwrap()
}

#[test]
fn test_monthly_resampling_compounds_daily_returns() {
    let table = synthetic_table(730, 1);
    let monthly = table.resample(Period::Month).unwrap();
    assert_eq!(monthly.num_observations(), 24);

    // January 2023 is the first 31 rows
    let january: f64 = table.series("Equity").unwrap()[..31]
        .iter()
        .flatten()
        .fold(1.0, |acc, r| acc * (1.0 + r))
        - 1.0;
    let resampled = monthly.series("Equity").unwrap()[0].unwrap();
    assert!((resampled - january).abs() < 1e-12);
    assert_eq!(monthly.dates().unwrap()[0], date(2023, 1, 31));
}

#[test]
fn test_weekly_and_yearly_bucket_counts() {
    let table = synthetic_table(730, 2);
    assert_eq!(table.resample(Period::Year).unwrap().num_observations(), 2);
    // 2023-01-01 closes ISO week 2022-W52, 104 full weeks follow and
    // 2024-12-30 opens 2025-W01
    assert_eq!(table.resample(Period::Week).unwrap().num_observations(), 106);
    assert_eq!(table.resample(Period::Day).unwrap().num_observations(), 730);
}

#[test]
fn test_end_to_end_frontier() {
    let table = synthetic_table(730, 3).resample(Period::Month).unwrap();
    let assets = table.asset_classes(Period::Month).unwrap();
    let corr = CorrelationMatrix::build(&table);

    assert_eq!(assets.len(), 2);
    assert!(assets.iter().all(|a| a.std_dev() > 0.0));
    assert!(assets[0].std_dev() > assets[1].std_dev());

    let mut rng = StdRng::seed_from_u64(11);
    let result = FrontierSampler::new()
        .run(&assets, &corr, 1000, 0.0, &mut rng)
        .unwrap();
    let table = to_table(result.portfolios());

    assert_eq!(table.len(), 1000);
    let optimal_row = &table.rows[result.optimal_id().index()];
    assert_eq!(optimal_row.name, result.optimal().name());
}

#[test]
fn test_gaps_only_affect_their_asset() {
    let full = synthetic_table(60, 4);
    let mut columns = full.columns().to_vec();
    for row in (0..60).step_by(3) {
        columns[1][row] = None;
    }
    let gappy =
        ReturnsTable::new(full.names().to_vec(), full.dates().map(<[Date]>::to_vec), columns)
            .unwrap();

    let full_assets = full.asset_classes(Period::Day).unwrap();
    let gappy_assets = gappy.asset_classes(Period::Day).unwrap();
    assert_eq!(full_assets[0], gappy_assets[0]);
    assert_ne!(full_assets[1], gappy_assets[1]);

    let corr = CorrelationMatrix::build(&gappy);
    let rho = corr.get(AssetId(0), AssetId(1)).unwrap();
    assert!((-1.0..=1.0).contains(&rho));
}
