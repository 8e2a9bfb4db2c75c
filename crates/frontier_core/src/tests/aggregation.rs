//! Tests for portfolio aggregation in limiting cases
//!
//! These tests verify:
//! - A single asset held at 100% reproduces that asset's statistics
//! - Perfectly correlated assets with equal risk do not diversify
//! - Perfectly anti-correlated assets with equal risk cancel out
//! - Portfolios built by hand agree with the aggregator

use crate::correlation::CorrelationMatrix;
use crate::error::LookupError;
use crate::model::{AssetClass, AssetId, Holding, Period, Portfolio, PortfolioId};

fn two_assets(sd_a: f64, sd_b: f64, rho: f64) -> (Vec<AssetClass>, CorrelationMatrix) {
    let assets = vec![
        AssetClass::with_statistics(AssetId(0), "Stocks", Period::Year, 0.09, sd_a),
        AssetClass::with_statistics(AssetId(1), "Bonds", Period::Year, 0.03, sd_b),
    ];
    let corr = CorrelationMatrix::identity(vec!["Stocks".into(), "Bonds".into()]).with(
        AssetId(0),
        AssetId(1),
        rho,
    );
    (assets, corr)
}

fn mix(a: f64, b: f64) -> Vec<Holding> {
    vec![
        Holding {
            asset: AssetId(0),
            weight: a,
        },
        Holding {
            asset: AssetId(1),
            weight: b,
        },
    ]
}

#[test]
fn test_single_asset_portfolio_matches_asset() {
    let (assets, corr) = two_assets(0.18, 0.06, 0.3);

    let stocks = Portfolio::new(PortfolioId(0), "All stocks", mix(100.0, 0.0), &assets, &corr)
        .unwrap();
    assert!((stocks.expected_return() - 0.09).abs() < 1e-12);
    assert!((stocks.std_dev() - 0.18).abs() < 1e-12);

    let bonds = Portfolio::new(PortfolioId(1), "All bonds", mix(0.0, 100.0), &assets, &corr)
        .unwrap();
    assert!((bonds.expected_return() - 0.03).abs() < 1e-12);
    assert!((bonds.std_dev() - 0.06).abs() < 1e-12);
}

#[test]
fn test_perfect_correlation_equal_risk() {
    let (assets, corr) = two_assets(0.12, 0.12, 1.0);
    let p = Portfolio::new(PortfolioId(0), "50/50", mix(50.0, 50.0), &assets, &corr).unwrap();
    assert!((p.std_dev() - 0.12).abs() < 1e-12);
}

#[test]
fn test_perfect_anticorrelation_equal_risk() {
    let (assets, corr) = two_assets(0.12, 0.12, -1.0);
    let p = Portfolio::new(PortfolioId(0), "50/50", mix(50.0, 50.0), &assets, &corr).unwrap();
    assert!(p.std_dev().abs() < 1e-9);
    // Riskless and above the risk-free rate
    assert_eq!(p.sharpe_ratio(0.01), f64::INFINITY);
}

#[test]
fn test_diversification_lowers_risk() {
    let (assets, corr) = two_assets(0.18, 0.06, 0.0);
    let p = Portfolio::new(PortfolioId(0), "70/30", mix(70.0, 30.0), &assets, &corr).unwrap();
    let weighted_sd = 0.7 * 0.18 + 0.3 * 0.06;
    assert!(p.std_dev() < weighted_sd);
    assert!((p.weight_of(AssetId(0)) - 70.0).abs() < 1e-12);
    assert!((p.total_weight() - 100.0).abs() < 1e-12);
}

#[test]
fn test_missing_pair_is_reported_by_name() {
    let (assets, _) = two_assets(0.18, 0.06, 0.0);
    let bare = CorrelationMatrix::identity(vec!["Stocks".into(), "Bonds".into()]);
    let err = Portfolio::new(PortfolioId(0), "x", mix(50.0, 50.0), &assets, &bare).unwrap_err();
    assert_eq!(
        err,
        LookupError::UnknownAssetPair("Stocks".into(), "Bonds".into())
    );
}

#[test]
fn test_describe_lists_composition() {
    let (assets, corr) = two_assets(0.18, 0.06, 0.2);
    let p = Portfolio::new(PortfolioId(0), "Portfolio1", mix(62.5, 37.5), &assets, &corr).unwrap();
    let text = p.describe(&assets).to_string();

    assert!(text.starts_with("Portfolio = [Portfolio1, composition = {"));
    assert!(text.contains("    62.50% : Stocks,"));
    assert!(text.contains("    37.50% : Bonds,"));
    assert!(text.contains("E(r) = 6.75%"));
}
