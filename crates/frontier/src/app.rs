use std::path::PathBuf;

use color_eyre::eyre::WrapErr;
use frontier_core::{
    AssetClass, CorrelationMatrix, FrontierResult, FrontierSampler, Portfolio, PortfolioId,
    ReturnsTable, Stopwatch, TimingReport,
};

use crate::input::{self, CsvOptions, Parameters};

/// Names of the timed phases of a run
pub mod phase {
    pub const READ_RETURNS: &str = "read returns";
    pub const RESAMPLE: &str = "resample";
    pub const ASSET_STATISTICS: &str = "asset statistics";
    pub const CORRELATIONS: &str = "correlations";
    pub const SAMPLING: &str = "sampling";
    pub const USER_PORTFOLIOS: &str = "user portfolios";
}

/// Inputs of one analysis, after command-line overrides
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub returns: PathBuf,
    pub csv: CsvOptions,
    pub params: Parameters,
}

/// Everything an analysis produced, shared by the report, export and chart
#[derive(Debug, Clone)]
pub struct Analysis {
    pub table: ReturnsTable,
    pub assets: Vec<AssetClass>,
    pub correlations: CorrelationMatrix,
    pub result: FrontierResult,
    /// Portfolios from the parameters file, in file order
    pub user_portfolios: Vec<Portfolio>,
    pub params: Parameters,
    /// Seed the population was drawn with, so a run can be repeated
    pub seed: u64,
}

impl Analysis {
    #[must_use]
    pub fn risk_free_rate(&self) -> f64 {
        self.result.risk_free_rate()
    }

    /// Title shared by the console report and the charts
    #[must_use]
    pub fn title(&self) -> String {
        format!(
            "Efficient Frontier based on {} returns : {} portfolios",
            self.params.period.adjective(),
            self.result.len()
        )
    }
}

pub struct App {
    options: RunOptions,
    stopwatch: Stopwatch,
}

impl App {
    pub fn new(options: RunOptions) -> Self {
        Self {
            options,
            stopwatch: Stopwatch::new(),
        }
    }

    #[must_use]
    pub fn options(&self) -> &RunOptions {
        &self.options
    }

    /// Timing of every phase so far, including ones a failure interrupted
    #[must_use]
    pub fn timing_report(&self) -> TimingReport {
        self.stopwatch.report()
    }

    /// Read the returns file and run the full analysis
    pub fn analyze(&mut self) -> color_eyre::Result<Analysis> {
        self.stopwatch.start(phase::READ_RETURNS);
        let table = input::read_returns(&self.options.returns, &self.options.csv)
            .wrap_err_with(|| format!("Failed to load {}", self.options.returns.display()))?;
        self.stopwatch.stop(phase::READ_RETURNS)?;

        self.analyze_table(table)
    }

    /// Run the analysis on an already loaded table
    pub fn analyze_table(&mut self, table: ReturnsTable) -> color_eyre::Result<Analysis> {
        let params = self.options.params.clone();

        let table = if params.resample {
            self.stopwatch.start(phase::RESAMPLE);
            let resampled = table
                .resample(params.period)
                .wrap_err("Cannot resample returns without observation dates")?;
            self.stopwatch.stop(phase::RESAMPLE)?;
            tracing::info!(
                period = %params.period,
                observations = resampled.num_observations(),
                "Resampled returns"
            );
            resampled
        } else {
            table
        };

        self.stopwatch.start(phase::ASSET_STATISTICS);
        let assets = table
            .asset_classes(params.period)
            .wrap_err("Failed to compute asset statistics")?;
        self.stopwatch.stop(phase::ASSET_STATISTICS)?;
        for asset in &assets {
            tracing::debug!(%asset, "Asset statistics");
        }

        self.stopwatch.start(phase::CORRELATIONS);
        let correlations = CorrelationMatrix::build(&table);
        self.stopwatch.stop(phase::CORRELATIONS)?;

        let seed = params.seed.unwrap_or_else(rand::random);
        self.stopwatch.start(phase::SAMPLING);
        let result = sample(&assets, &correlations, &params, seed)
            .wrap_err("Frontier sampling failed")?;
        self.stopwatch.stop(phase::SAMPLING)?;
        tracing::info!(
            portfolios = result.len(),
            seed,
            optimal = result.optimal().name(),
            "Frontier sampled"
        );

        self.stopwatch.start(phase::USER_PORTFOLIOS);
        let user_portfolios = params
            .portfolios
            .iter()
            .enumerate()
            .map(|(i, user)| -> color_eyre::Result<Portfolio> {
                let holdings = user.holdings(&assets)?;
                Portfolio::new(
                    PortfolioId(i as u32),
                    user.name.clone(),
                    holdings,
                    &assets,
                    &correlations,
                )
                .wrap_err_with(|| format!("Cannot evaluate portfolio '{}'", user.name))
            })
            .collect::<color_eyre::Result<Vec<_>>>()?;
        self.stopwatch.stop(phase::USER_PORTFOLIOS)?;

        Ok(Analysis {
            table,
            assets,
            correlations,
            result,
            user_portfolios,
            params,
            seed,
        })
    }
}

#[cfg(feature = "parallel")]
fn sample(
    assets: &[AssetClass],
    correlations: &CorrelationMatrix,
    params: &Parameters,
    seed: u64,
) -> Result<FrontierResult, frontier_core::FrontierError> {
    FrontierSampler::new().run_parallel(
        assets,
        correlations,
        params.sample_size,
        params.risk_free_rate,
        seed,
    )
}

#[cfg(not(feature = "parallel"))]
fn sample(
    assets: &[AssetClass],
    correlations: &CorrelationMatrix,
    params: &Parameters,
    seed: u64,
) -> Result<FrontierResult, frontier_core::FrontierError> {
    use rand::SeedableRng;

    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    FrontierSampler::new().run(
        assets,
        correlations,
        params.sample_size,
        params.risk_free_rate,
        &mut rng,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::UserPortfolio;
    use std::collections::BTreeMap;
    use std::fs;
    use tempfile::TempDir;

    const RETURNS: &str = "\
Date;Stocks;Bonds
2024-01-02;0.010;0.001
2024-01-15;-0.004;0.002
2024-02-01;0.021;-0.001
2024-02-20;0.003;0.003
2024-03-04;-0.012;0.002
2024-03-28;0.015;0.000
2024-04-10;0.007;0.001
2024-04-25;-0.009;0.002
";

    fn options(dir: &TempDir, params: Parameters) -> RunOptions {
        let returns = dir.path().join("returns.csv");
        fs::write(&returns, RETURNS).unwrap();
        RunOptions {
            returns,
            csv: CsvOptions::default(),
            params,
        }
    }

    fn params() -> Parameters {
        Parameters {
            risk_free_rate: 0.01,
            sample_size: 200,
            seed: Some(42),
            ..Parameters::default()
        }
    }

    #[test]
    fn test_analyze_from_file() {
        let dir = TempDir::new().unwrap();
        let mut app = App::new(options(&dir, params()));
        let analysis = app.analyze().unwrap();

        assert_eq!(analysis.assets.len(), 2);
        assert_eq!(analysis.result.len(), 200);
        assert_eq!(analysis.seed, 42);
        assert_eq!(analysis.risk_free_rate(), 0.01);
        assert_eq!(
            analysis.title(),
            "Efficient Frontier based on monthly returns : 200 portfolios"
        );

        let report = app.timing_report();
        assert!(report.incomplete.is_empty());
        assert!(report.completed.iter().any(|p| p.name == phase::SAMPLING));
    }

    #[test]
    fn test_seeded_runs_repeat() {
        let dir = TempDir::new().unwrap();
        let a = App::new(options(&dir, params())).analyze().unwrap();
        let b = App::new(options(&dir, params())).analyze().unwrap();
        assert_eq!(a.result, b.result);
    }

    #[test]
    fn test_resample_to_months() {
        let dir = TempDir::new().unwrap();
        let mut app = App::new(options(
            &dir,
            Parameters {
                resample: true,
                ..params()
            },
        ));
        let analysis = app.analyze().unwrap();
        assert_eq!(analysis.table.num_observations(), 4);
        assert!(app.timing_report().completed.iter().any(|p| p.name == phase::RESAMPLE));
    }

    #[test]
    fn test_user_portfolios_are_evaluated() {
        let dir = TempDir::new().unwrap();
        let user = UserPortfolio {
            name: "Balanced".into(),
            weights: BTreeMap::from([("Stocks".into(), 1.0), ("Bonds".into(), 1.0)]),
        };
        let analysis = App::new(options(
            &dir,
            Parameters {
                portfolios: vec![user],
                ..params()
            },
        ))
        .analyze()
        .unwrap();

        let balanced = &analysis.user_portfolios[0];
        assert_eq!(balanced.name(), "Balanced");
        assert!((balanced.total_weight() - 100.0).abs() < 1e-9);
        let expected =
            (analysis.assets[0].expected_return() + analysis.assets[1].expected_return()) / 2.0;
        assert!((balanced.expected_return() - expected).abs() < 1e-12);
    }

    #[test]
    fn test_failure_leaves_phase_incomplete() {
        let dir = TempDir::new().unwrap();
        let mut app = App::new(RunOptions {
            returns: dir.path().join("missing.csv"),
            csv: CsvOptions::default(),
            params: params(),
        });

        assert!(app.analyze().is_err());
        assert_eq!(app.timing_report().incomplete, vec![phase::READ_RETURNS.to_string()]);
    }
}
