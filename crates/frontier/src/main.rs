use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{WrapErr, eyre};
use frontier::chart::{ChartApp, ChartData, write_html};
use frontier::input::{CsvOptions, Parameters};
use frontier::report::{render_console, write_json};
use frontier::{App, RunOptions, init_logging};
use frontier_core::Period;

#[derive(Parser, Debug)]
#[command(name = "frontier")]
#[command(about = "Sample the efficient frontier of a set of asset classes")]
struct Args {
    /// CSV file of periodic asset returns
    returns: PathBuf,

    /// YAML parameters file
    #[arg(short, long)]
    params: Option<PathBuf>,

    /// Periodicity of the returns (daily, weekly, monthly, yearly)
    #[arg(long)]
    period: Option<Period>,

    /// Risk-free rate as a decimal fraction, e.g. 0.02
    #[arg(short, long)]
    risk_free: Option<f64>,

    /// Number of portfolios to sample
    #[arg(short = 'n', long)]
    samples: Option<usize>,

    /// Seed for a reproducible population
    #[arg(long)]
    seed: Option<u64>,

    /// CSV field delimiter
    #[arg(long, default_value_t = ';')]
    delimiter: char,

    /// Rows are assets and columns are periods
    #[arg(long)]
    transposed: bool,

    /// Compound dated returns into `--period` buckets first
    #[arg(long)]
    resample: bool,

    /// Write a plotly chart to this file
    #[arg(long)]
    html: Option<PathBuf>,

    /// Write the JSON report to this file
    #[arg(long)]
    json: Option<PathBuf>,

    /// Skip the interactive chart
    #[arg(long)]
    no_chart: bool,

    /// Print phase timings
    #[arg(long)]
    time: bool,

    /// Path to the data directory (default: ~/.frontier/)
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// Log level (debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

impl Args {
    fn run_options(&self) -> color_eyre::Result<RunOptions> {
        let mut params = match &self.params {
            Some(path) => Parameters::load(path)?,
            None => Parameters::default(),
        };
        if let Some(period) = self.period {
            params.period = period;
        }
        if let Some(rate) = self.risk_free {
            params.risk_free_rate = rate;
        }
        if let Some(samples) = self.samples {
            params.sample_size = samples;
        }
        if self.seed.is_some() {
            params.seed = self.seed;
        }
        params.resample |= self.resample;

        let delimiter = u8::try_from(self.delimiter)
            .map_err(|_| eyre!("Delimiter must be a single-byte character"))?;

        Ok(RunOptions {
            returns: self.returns.clone(),
            csv: CsvOptions {
                delimiter,
                transposed: self.transposed,
            },
            params,
        })
    }
}

fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".frontier")
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    let data_dir = args.data_dir.clone().unwrap_or_else(default_data_dir);

    init_logging(&data_dir, &args.log_level)?;

    let mut app = App::new(args.run_options()?);
    let result = app.analyze();
    if args.time {
        print!("{}", app.timing_report());
    }
    let analysis = result?;

    print!("{}", render_console(&analysis));

    if let Some(path) = &args.json {
        write_json(path, &analysis).wrap_err("Failed to write JSON report")?;
    }
    if let Some(path) = &args.html {
        write_html(path, &ChartData::from_analysis(&analysis))
            .wrap_err("Failed to write HTML chart")?;
    }

    if !args.no_chart {
        let mut chart = ChartApp::new(&analysis);
        ratatui::run(|terminal| chart.run(terminal))?;

        if let Err(err) = ratatui::try_restore() {
            tracing::error!("Failed to restore terminal: {err}");
        }
    }

    tracing::info!("Application shutting down");
    Ok(())
}
