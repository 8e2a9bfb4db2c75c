//! Annualized risk/return statistics of a single historical-returns series

use serde::Serialize;

use crate::error::StatisticsError;
use crate::model::Period;

/// Annualized expected return and standard deviation of one series
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesSummary {
    pub expected_return: f64,
    pub std_dev: f64,
    /// Non-missing observations the summary was computed from
    pub observations: usize,
}

/// Compute annualized statistics for the periodic `returns` of `name`.
///
/// Missing and non-finite values are skipped. The mean is annualized by
/// compounding, `(1 + mean)^m - 1`; the sample standard deviation by the
/// square-root-of-time rule, `sd * sqrt(m)`.
pub fn compute(
    name: &str,
    returns: &[Option<f64>],
    period: Period,
) -> Result<SeriesSummary, StatisticsError> {
    let values: Vec<f64> = present_values(returns).collect();
    let observations = values.len();

    let (Some(period_mean), Some(period_sd)) = (mean(&values), sample_std_dev(&values)) else {
        return Err(StatisticsError::InsufficientData {
            asset: name.to_string(),
            observations,
        });
    };

    let m = period.periods_per_year();
    Ok(SeriesSummary {
        expected_return: annualize_return(period_mean, m),
        std_dev: annualize_std_dev(period_sd, m),
        observations,
    })
}

/// Parse `period` and compute the statistics of `returns` in one step.
pub fn compute_with_label(
    name: &str,
    returns: &[Option<f64>],
    period: &str,
) -> Result<SeriesSummary, StatisticsError> {
    let period: Period = period.parse()?;
    compute(name, returns, period)
}

pub(crate) fn present_values(returns: &[Option<f64>]) -> impl Iterator<Item = f64> + '_ {
    returns.iter().flatten().copied().filter(|r| r.is_finite())
}

/// Arithmetic mean, `None` for an empty slice
#[must_use]
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation (n - 1 divisor), `None` below two values
///
/// Values are shifted by the first observation before squaring, so a
/// constant series yields exactly 0.
#[must_use]
pub fn sample_std_dev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let shift = values[0];
    let n = values.len() as f64;
    let shifted_mean = values.iter().map(|v| v - shift).sum::<f64>() / n;
    let sum_sq: f64 = values
        .iter()
        .map(|v| ((v - shift) - shifted_mean).powi(2))
        .sum();
    Some((sum_sq / (n - 1.0)).sqrt())
}

#[inline]
#[must_use]
pub fn annualize_return(period_mean: f64, periods_per_year: u32) -> f64 {
    (1.0 + period_mean).powi(periods_per_year as i32) - 1.0
}

#[inline]
#[must_use]
pub fn annualize_std_dev(period_sd: f64, periods_per_year: u32) -> f64 {
    period_sd * f64::from(periods_per_year).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(values: &[f64]) -> Vec<Option<f64>> {
        values.iter().copied().map(Some).collect()
    }

    #[test]
    fn test_yearly_is_plain_mean_and_sd() {
        let returns = series(&[0.10, -0.05, 0.20, 0.03]);
        let summary = compute("A", &returns, Period::Year).unwrap();

        assert!((summary.expected_return - 0.07).abs() < 1e-12);
        // deviations 0.03, -0.12, 0.13, -0.04 -> sum of squares 0.0338
        let expected_sd = (0.0338_f64 / 3.0).sqrt();
        assert!((summary.std_dev - expected_sd).abs() < 1e-12);
        assert_eq!(summary.observations, 4);
    }

    #[test]
    fn test_monthly_annualization() {
        let returns = series(&[0.01, 0.02, 0.00, 0.01]);
        let summary = compute("A", &returns, Period::Month).unwrap();

        let expected_er = 1.01_f64.powi(12) - 1.0;
        assert!((summary.expected_return - expected_er).abs() < 1e-12);

        let period_sd = sample_std_dev(&[0.01, 0.02, 0.00, 0.01]).unwrap();
        assert!((summary.std_dev - period_sd * 12.0_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_missing_values_are_excluded_not_zeroed() {
        let with_gaps = vec![Some(0.02), None, Some(0.04), Some(f64::NAN), None];
        let dense = series(&[0.02, 0.04]);

        let a = compute("A", &with_gaps, Period::Week).unwrap();
        let b = compute("A", &dense, Period::Week).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.observations, 2);
    }

    #[test]
    fn test_insufficient_data() {
        let err = compute("A", &[Some(0.1), None], Period::Year).unwrap_err();
        assert_eq!(
            err,
            StatisticsError::InsufficientData {
                asset: "A".into(),
                observations: 1
            }
        );
        assert!(compute("B", &[], Period::Day).is_err());
    }

    #[test]
    fn test_std_dev_zero_iff_constant() {
        let constant = series(&[0.01, 0.01, 0.01]);
        assert_eq!(compute("A", &constant, Period::Day).unwrap().std_dev, 0.0);

        let varying = series(&[0.01, 0.01, 0.0100001]);
        assert!(compute("A", &varying, Period::Day).unwrap().std_dev > 0.0);
    }

    #[test]
    fn test_daily_synonyms_agree() {
        let returns = series(&[0.001, -0.002, 0.0005, 0.003]);
        let reference = compute_with_label("A", &returns, "day").unwrap();
        for label in ["d", "daily", "DAILY"] {
            assert_eq!(compute_with_label("A", &returns, label).unwrap(), reference);
        }
        let expected = annualize_return(mean(&[0.001, -0.002, 0.0005, 0.003]).unwrap(), 365);
        assert!((reference.expected_return - expected).abs() < 1e-12);
    }

    #[test]
    fn test_invalid_label() {
        let returns = series(&[0.01, 0.02]);
        assert!(matches!(
            compute_with_label("A", &returns, "quarterly"),
            Err(StatisticsError::InvalidPeriod(_))
        ));
    }
}
