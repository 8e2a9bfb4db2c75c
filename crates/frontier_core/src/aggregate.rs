//! Closed-form risk and return of a weighted mix of asset classes

use crate::correlation::CorrelationMatrix;
use crate::error::LookupError;
use crate::model::{AssetClass, Holding};

/// Expected return and standard deviation of a composition
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aggregate {
    pub expected_return: f64,
    pub std_dev: f64,
}

/// Aggregate `composition` (weights in percent) over the asset universe.
///
/// `Er = sum(w_i * Er_i)` and
/// `sd = sqrt(max(0, sum_i sum_j w_i * w_j * corr(i, j) * sd_i * sd_j))`
/// with weights taken as fractions.
pub fn aggregate(
    composition: &[Holding],
    assets: &[AssetClass],
    correlations: &CorrelationMatrix,
) -> Result<Aggregate, LookupError> {
    let resolved = composition
        .iter()
        .map(|h| {
            assets
                .get(h.asset.index())
                .filter(|a| a.id() == h.asset)
                .map(|a| (h, a))
                .ok_or(LookupError::UnknownAsset(h.asset))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let expected_return = resolved
        .iter()
        .map(|(h, a)| h.weight / 100.0 * a.expected_return())
        .sum();

    let mut variance = 0.0;
    for (hi, ai) in &resolved {
        let wi = hi.weight / 100.0;
        for (hj, aj) in &resolved {
            let wj = hj.weight / 100.0;
            let rho = correlations.require(hi.asset, hj.asset)?;
            variance += wi * wj * rho * ai.std_dev() * aj.std_dev();
        }
    }

    Ok(Aggregate {
        expected_return,
        std_dev: variance.max(0.0).sqrt(),
    })
}

/// Excess return per unit of risk, clamped at 0.
///
/// A riskless mix scores +infinity when it beats `risk_free_rate` and 0
/// otherwise.
#[must_use]
pub fn sharpe_ratio(expected_return: f64, std_dev: f64, risk_free_rate: f64) -> f64 {
    let excess = expected_return - risk_free_rate;
    if std_dev == 0.0 {
        return if excess > 0.0 { f64::INFINITY } else { 0.0 };
    }
    (excess / std_dev).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AssetId, Period};

    fn asset(id: u16, er: f64, sd: f64) -> AssetClass {
        AssetClass::with_statistics(AssetId(id), format!("A{id}"), Period::Year, er, sd)
    }

    fn pair(rho: f64) -> CorrelationMatrix {
        CorrelationMatrix::identity(vec!["A0".into(), "A1".into()]).with(
            AssetId(0),
            AssetId(1),
            rho,
        )
    }

    fn holdings(weights: &[f64]) -> Vec<Holding> {
        weights
            .iter()
            .enumerate()
            .map(|(i, w)| Holding {
                asset: AssetId(i as u16),
                weight: *w,
            })
            .collect()
    }

    #[test]
    fn test_single_asset_full_weight() {
        let assets = vec![asset(0, 0.08, 0.12)];
        let corr = CorrelationMatrix::identity(vec!["A0".into()]);
        let agg = aggregate(&holdings(&[100.0]), &assets, &corr).unwrap();
        assert!((agg.expected_return - 0.08).abs() < 1e-12);
        assert!((agg.std_dev - 0.12).abs() < 1e-12);
    }

    #[test]
    fn test_perfect_correlation_keeps_common_sd() {
        let assets = vec![asset(0, 0.10, 0.2), asset(1, 0.06, 0.2)];
        let agg = aggregate(&holdings(&[50.0, 50.0]), &assets, &pair(1.0)).unwrap();
        assert!((agg.std_dev - 0.2).abs() < 1e-12);
        assert!((agg.expected_return - 0.08).abs() < 1e-12);
    }

    #[test]
    fn test_perfect_hedge_removes_risk() {
        let assets = vec![asset(0, 0.10, 0.2), asset(1, 0.06, 0.2)];
        let agg = aggregate(&holdings(&[50.0, 50.0]), &assets, &pair(-1.0)).unwrap();
        assert!(agg.std_dev.abs() < 1e-9);
    }

    #[test]
    fn test_two_asset_formula() {
        let assets = vec![asset(0, 0.10, 0.15), asset(1, 0.04, 0.03)];
        let agg = aggregate(&holdings(&[30.0, 70.0]), &assets, &pair(0.2)).unwrap();

        let var = 0.3_f64.powi(2) * 0.15_f64.powi(2)
            + 0.7_f64.powi(2) * 0.03_f64.powi(2)
            + 2.0 * 0.3 * 0.7 * 0.2 * 0.15 * 0.03;
        assert!((agg.std_dev - var.sqrt()).abs() < 1e-12);
        assert!((agg.expected_return - (0.03 + 0.028)).abs() < 1e-12);
    }

    #[test]
    fn test_zero_weights() {
        let assets = vec![asset(0, 0.10, 0.15), asset(1, 0.04, 0.03)];
        let agg = aggregate(&holdings(&[0.0, 0.0]), &assets, &pair(0.5)).unwrap();
        assert_eq!(agg.std_dev, 0.0);
        assert_eq!(agg.expected_return, 0.0);
    }

    #[test]
    fn test_lookup_failures() {
        let assets = vec![asset(0, 0.10, 0.15), asset(1, 0.04, 0.03)];
        let no_pair = CorrelationMatrix::identity(vec!["A0".into(), "A1".into()]);
        assert_eq!(
            aggregate(&holdings(&[50.0, 50.0]), &assets, &no_pair).unwrap_err(),
            LookupError::UnknownAssetPair("A0".into(), "A1".into())
        );

        let stray = vec![Holding {
            asset: AssetId(7),
            weight: 100.0,
        }];
        assert_eq!(
            aggregate(&stray, &assets, &pair(0.0)).unwrap_err(),
            LookupError::UnknownAsset(AssetId(7))
        );
    }

    #[test]
    fn test_sharpe_ratio_clamping() {
        assert!((sharpe_ratio(0.10, 0.2, 0.02) - 0.4).abs() < 1e-12);
        assert_eq!(sharpe_ratio(0.01, 0.2, 0.02), 0.0);
        assert_eq!(sharpe_ratio(0.05, 0.0, 0.02), f64::INFINITY);
        assert_eq!(sharpe_ratio(0.02, 0.0, 0.02), 0.0);
    }
}
