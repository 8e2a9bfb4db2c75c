//! Historical periodic returns aligned by observation across assets

use std::collections::HashSet;

use jiff::civil::Date;

use crate::error::TableError;
use crate::model::{AssetClass, AssetId, Period};

/// A table of periodic returns, one column per asset class.
///
/// Every column has one entry per observation; `None` marks a missing value.
/// Observation dates are optional and only needed for calendar resampling.
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnsTable {
    names: Vec<String>,
    dates: Option<Vec<Date>>,
    columns: Vec<Vec<Option<f64>>>,
}

impl ReturnsTable {
    /// Create a table, validating names and column shapes.
    pub fn new(
        names: Vec<String>,
        dates: Option<Vec<Date>>,
        columns: Vec<Vec<Option<f64>>>,
    ) -> Result<Self, TableError> {
        if names.is_empty() {
            return Err(TableError::NoAssets);
        }
        if names.len() > usize::from(u16::MAX) {
            return Err(TableError::TooManyAssets(names.len()));
        }

        let mut seen = HashSet::with_capacity(names.len());
        for (i, name) in names.iter().enumerate() {
            if name.trim().is_empty() {
                return Err(TableError::EmptyAssetName(i));
            }
            if !seen.insert(name.as_str()) {
                return Err(TableError::DuplicateAsset(name.clone()));
            }
        }

        if columns.len() != names.len() {
            return Err(TableError::RaggedColumn {
                asset: names[columns.len().min(names.len() - 1)].clone(),
                expected: names.len(),
                found: columns.len(),
            });
        }

        let observations = columns[0].len();
        for (name, column) in names.iter().zip(&columns) {
            if column.len() != observations {
                return Err(TableError::RaggedColumn {
                    asset: name.clone(),
                    expected: observations,
                    found: column.len(),
                });
            }
        }

        if let Some(dates) = &dates
            && dates.len() != observations
        {
            return Err(TableError::DateCountMismatch {
                expected: observations,
                found: dates.len(),
            });
        }

        Ok(Self {
            names,
            dates,
            columns,
        })
    }

    /// Number of asset columns
    #[must_use]
    pub fn num_assets(&self) -> usize {
        self.names.len()
    }

    /// Number of observation rows
    #[must_use]
    pub fn num_observations(&self) -> usize {
        self.columns.first().map_or(0, Vec::len)
    }

    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    #[must_use]
    pub fn dates(&self) -> Option<&[Date]> {
        self.dates.as_deref()
    }

    #[must_use]
    pub fn columns(&self) -> &[Vec<Option<f64>>] {
        &self.columns
    }

    #[must_use]
    pub fn column(&self, asset: AssetId) -> Option<&[Option<f64>]> {
        self.columns.get(asset.index()).map(Vec::as_slice)
    }

    /// Returns of the asset called `name`, if present
    #[must_use]
    pub fn series(&self, name: &str) -> Option<&[Option<f64>]> {
        self.asset_id(name).and_then(|id| self.column(id))
    }

    #[must_use]
    pub fn asset_id(&self, name: &str) -> Option<AssetId> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|i| AssetId(i as u16))
    }

    /// Compound dated observations into calendar buckets of `period`.
    ///
    /// Observations are expected in chronological order; only consecutive
    /// rows are merged.
    ///
    /// Within a bucket each asset's return is `prod(1 + r) - 1` over its
    /// present values. A bucket where an asset has no value stays missing
    /// for that asset. Buckets keep the date of their last observation.
    pub fn resample(&self, period: Period) -> Result<Self, TableError> {
        let dates = self.dates.as_ref().ok_or(TableError::MissingDates)?;

        // Row ranges of consecutive observations sharing a bucket
        let mut ranges: Vec<(usize, usize)> = Vec::new();
        let mut start = 0;
        for i in 1..=dates.len() {
            if i == dates.len() || period.bucket(dates[i]) != period.bucket(dates[start]) {
                ranges.push((start, i));
                start = i;
            }
        }

        let columns = self
            .columns
            .iter()
            .map(|column| {
                ranges
                    .iter()
                    .map(|&(from, to)| compound(&column[from..to]))
                    .collect()
            })
            .collect();
        let bucket_dates = ranges.iter().map(|&(_, to)| dates[to - 1]).collect();

        Self::new(self.names.clone(), Some(bucket_dates), columns)
    }

    /// Derive every asset class of the table, in column order.
    pub fn asset_classes(&self, period: Period) -> Result<Vec<AssetClass>, TableError> {
        self.names
            .iter()
            .zip(&self.columns)
            .enumerate()
            .map(|(i, (name, column))| {
                AssetClass::from_history(AssetId(i as u16), name.clone(), column.clone(), period)
                    .map_err(TableError::from)
            })
            .collect()
    }
}

fn compound(values: &[Option<f64>]) -> Option<f64> {
    let mut present = values.iter().flatten().filter(|r| r.is_finite()).peekable();
    present.peek()?;
    Some(present.fold(1.0, |acc, r| acc * (1.0 + r)) - 1.0)
}
