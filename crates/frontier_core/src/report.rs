//! Flat projection of a portfolio population for charting and export

use serde::Serialize;

use crate::model::{FrontierResult, Portfolio, PortfolioId};

/// One charted point of the population
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    pub name: String,
    /// Annualized expected return, decimal fraction
    pub expected_return: f64,
    /// Annualized standard deviation, decimal fraction
    pub std_dev: f64,
    /// Key of the source portfolio, see [`ReportRow::resolve`]
    pub portfolio: PortfolioId,
}

impl ReportRow {
    /// Look the source portfolio up in the population it was projected from
    #[must_use]
    pub fn resolve<'a>(&self, result: &'a FrontierResult) -> Option<&'a Portfolio> {
        result.get(self.portfolio)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReportTable {
    pub rows: Vec<ReportRow>,
}

impl ReportTable {
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ReportRow> {
        self.rows.iter()
    }

    /// Largest standard deviation in the table, 0 when empty
    #[must_use]
    pub fn max_std_dev(&self) -> f64 {
        self.rows.iter().map(|r| r.std_dev).fold(0.0, f64::max)
    }
}

/// Project `portfolios` into report rows, preserving order
#[must_use]
pub fn to_table(portfolios: &[Portfolio]) -> ReportTable {
    ReportTable {
        rows: portfolios
            .iter()
            .map(|p| ReportRow {
                name: p.name().to_string(),
                expected_return: p.expected_return(),
                std_dev: p.std_dev(),
                portfolio: p.id(),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::correlation::CorrelationMatrix;
    use crate::frontier::FrontierSampler;
    use crate::model::{AssetClass, AssetId, Period};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn sample_result() -> FrontierResult {
        let assets = vec![
            AssetClass::with_statistics(AssetId(0), "A", Period::Year, 0.08, 0.12),
            AssetClass::with_statistics(AssetId(1), "B", Period::Year, 0.03, 0.05),
        ];
        let corr = CorrelationMatrix::identity(vec!["A".into(), "B".into()]).with(
            AssetId(0),
            AssetId(1),
            -0.3,
        );
        let mut rng = StdRng::seed_from_u64(21);
        FrontierSampler::new()
            .run(&assets, &corr, 25, 0.01, &mut rng)
            .unwrap()
    }

    #[test]
    fn test_projection_preserves_order() {
        let result = sample_result();
        let table = to_table(result.portfolios());

        assert_eq!(table.len(), result.len());
        for (row, p) in table.iter().zip(result.portfolios()) {
            assert_eq!(row.name, p.name());
            assert_eq!(row.expected_return, p.expected_return());
            assert_eq!(row.std_dev, p.std_dev());
        }
    }

    #[test]
    fn test_rows_resolve_to_their_portfolio() {
        let result = sample_result();
        let table = to_table(result.portfolios());

        for row in table.iter() {
            let p = row.resolve(&result).unwrap();
            assert_eq!(p.name(), row.name);
        }
        assert!(table.max_std_dev() > 0.0);
    }

    #[test]
    fn test_empty_population() {
        let table = to_table(&[]);
        assert!(table.is_empty());
        assert_eq!(table.max_std_dev(), 0.0);
    }
}
