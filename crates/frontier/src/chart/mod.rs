//! Chart rendering of the sampled frontier.
//!
//! [`ChartData`] gathers everything both renderers draw: the population in
//! risk/return space, the optimal and risk-free points, the Capital
//! Allocation Line and the user portfolios.

mod html;
mod tui;

pub use html::{render_html, write_html};
pub use tui::ChartApp;

use frontier_core::{ReportTable, to_table};
use serde::Serialize;

use crate::app::Analysis;

/// Headroom added around the plotted points
const PADDING: f64 = 0.1;

/// A named point in (sd, Er) space
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub name: String,
    pub std_dev: f64,
    pub expected_return: f64,
}

impl ChartPoint {
    #[must_use]
    pub fn xy(&self) -> (f64, f64) {
        (self.std_dev, self.expected_return)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub title: String,
    pub population: ReportTable,
    pub optimal: ChartPoint,
    pub risk_free: ChartPoint,
    /// Segment from the risk-free point through the optimal portfolio
    pub cal: [(f64, f64); 2],
    pub user: Vec<ChartPoint>,
    pub x_bounds: [f64; 2],
    pub y_bounds: [f64; 2],
}

impl ChartData {
    pub fn from_analysis(analysis: &Analysis) -> Self {
        let rf = analysis.risk_free_rate();
        let population = to_table(analysis.result.portfolios());
        let optimal = analysis.result.optimal();

        let user: Vec<ChartPoint> = analysis
            .user_portfolios
            .iter()
            .map(|p| ChartPoint {
                name: p.name().to_string(),
                std_dev: p.std_dev(),
                expected_return: p.expected_return(),
            })
            .collect();

        let max_sd = user
            .iter()
            .map(|p| p.std_dev)
            .fold(population.max_std_dev(), f64::max);
        let x_max = if max_sd > 0.0 { max_sd * (1.0 + PADDING) } else { 1.0 };

        // The ranking clamps the Sharpe ratio at 0; the line itself must still
        // run through the optimal point when every return is below rf.
        let cal_end = if optimal.std_dev() > 0.0 {
            let slope = (optimal.expected_return() - rf) / optimal.std_dev();
            (x_max, rf + slope * x_max)
        } else {
            (optimal.std_dev(), optimal.expected_return())
        };

        let returns = population
            .iter()
            .map(|r| r.expected_return)
            .chain(user.iter().map(|p| p.expected_return))
            .chain([rf, cal_end.1]);
        let (y_min, y_max) = returns.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), y| {
            (lo.min(y), hi.max(y))
        });
        let y_pad = ((y_max - y_min) * PADDING).max(1e-4);

        Self {
            title: analysis.title(),
            population,
            optimal: ChartPoint {
                name: optimal.name().to_string(),
                std_dev: optimal.std_dev(),
                expected_return: optimal.expected_return(),
            },
            risk_free: ChartPoint {
                name: "Risk-free".to_string(),
                std_dev: 0.0,
                expected_return: rf,
            },
            cal: [(0.0, rf), cal_end],
            user,
            x_bounds: [0.0, x_max],
            y_bounds: [y_min - y_pad, y_max + y_pad],
        }
    }

    /// Population as (sd, Er) pairs, in generation order
    #[must_use]
    pub fn population_points(&self) -> Vec<(f64, f64)> {
        self.population
            .iter()
            .map(|r| (r.std_dev, r.expected_return))
            .collect()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::app::{App, RunOptions};
    use crate::input::{CsvOptions, Parameters, UserPortfolio};
    use frontier_core::ReturnsTable;
    use std::collections::BTreeMap;

    pub(crate) fn sample_analysis() -> Analysis {
        analysis_with_risk_free(0.01)
    }

    fn analysis_with_risk_free(risk_free_rate: f64) -> Analysis {
        let table = ReturnsTable::new(
            vec!["Stocks".into(), "Bonds".into(), "Gold".into()],
            None,
            vec![
                vec![Some(0.03), Some(-0.02), Some(0.04), Some(0.01), Some(-0.01), Some(0.02)],
                vec![Some(0.004), Some(0.006), Some(0.001), Some(0.003), Some(0.005), Some(0.002)],
                vec![Some(-0.01), Some(0.02), Some(0.00), Some(0.015), Some(0.01), Some(-0.005)],
            ],
        )
        .unwrap();
        let mut app = App::new(RunOptions {
            returns: "unused.csv".into(),
            csv: CsvOptions::default(),
            params: Parameters {
                risk_free_rate,
                sample_size: 300,
                seed: Some(9),
                portfolios: vec![UserPortfolio {
                    name: "All weather".into(),
                    weights: BTreeMap::from([
                        ("Stocks".into(), 30.0),
                        ("Bonds".into(), 55.0),
                        ("Gold".into(), 15.0),
                    ]),
                }],
                ..Parameters::default()
            },
        });
        app.analyze_table(table).unwrap()
    }

    #[test]
    fn test_chart_data_geometry() {
        let analysis = sample_analysis();
        let data = ChartData::from_analysis(&analysis);

        assert_eq!(data.population.len(), 300);
        assert_eq!(data.population_points().len(), 300);
        assert_eq!(data.risk_free.xy(), (0.0, 0.01));
        assert_eq!(data.cal[0], (0.0, 0.01));
        assert_eq!(data.user[0].name, "All weather");

        // Every point fits inside the bounds
        for (x, y) in data.population_points() {
            assert!(x >= data.x_bounds[0] && x <= data.x_bounds[1]);
            assert!(y >= data.y_bounds[0] && y <= data.y_bounds[1]);
        }
    }

    fn assert_cal_through_optimal(data: &ChartData) {
        let [(x0, y0), (x1, y1)] = data.cal;
        let (ox, oy) = data.optimal.xy();

        assert!(ox > 0.0);
        assert!(x1 > x0);
        let slope = (y1 - y0) / (x1 - x0);
        assert!(
            (y0 + slope * ox - oy).abs() < 1e-9,
            "CAL {:?} misses optimal point {:?}",
            data.cal,
            data.optimal.xy()
        );
    }

    #[test]
    fn test_cal_passes_through_optimal() {
        let data = ChartData::from_analysis(&sample_analysis());
        assert_cal_through_optimal(&data);
    }

    #[test]
    fn test_cal_with_risk_free_above_every_asset() {
        let analysis = analysis_with_risk_free(2.0);
        assert!(analysis.assets.iter().all(|a| a.expected_return() < 2.0));

        let data = ChartData::from_analysis(&analysis);
        assert_eq!(data.cal[0], (0.0, 2.0));
        assert!(data.cal[1].1 < 2.0);
        assert_cal_through_optimal(&data);

        // The line end stays inside the plotted range
        assert!(data.cal[1].1 >= data.y_bounds[0]);
    }
}
