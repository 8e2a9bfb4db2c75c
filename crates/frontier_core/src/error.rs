use std::fmt;

use crate::model::AssetId;

/// Errors related to asset and correlation lookups
#[derive(Debug, Clone, PartialEq)]
pub enum LookupError {
    UnknownAsset(AssetId),
    UnknownAssetPair(String, String),
}

impl fmt::Display for LookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupError::UnknownAsset(id) => write!(f, "asset {id:?} is not in the universe"),
            LookupError::UnknownAssetPair(a, b) => {
                write!(f, "no correlation defined between '{a}' and '{b}'")
            }
        }
    }
}

impl std::error::Error for LookupError {}

/// Errors raised while deriving per-asset statistics
#[derive(Debug, Clone, PartialEq)]
pub enum StatisticsError {
    InvalidPeriod(String),
    InsufficientData { asset: String, observations: usize },
}

impl fmt::Display for StatisticsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatisticsError::InvalidPeriod(label) => write!(
                f,
                "invalid period '{label}': select from [daily, weekly, monthly, yearly]"
            ),
            StatisticsError::InsufficientData {
                asset,
                observations,
            } => write!(
                f,
                "asset '{asset}' has {observations} valid observation(s), at least 2 are required"
            ),
        }
    }
}

impl std::error::Error for StatisticsError {}

/// Errors raised by the weight sampler
#[derive(Debug, Clone, PartialEq)]
pub enum SamplingError {
    InvalidAssetCount(usize),
}

impl fmt::Display for SamplingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SamplingError::InvalidAssetCount(n) => {
                write!(f, "cannot sample weights for {n} assets")
            }
        }
    }
}

impl std::error::Error for SamplingError {}

/// Errors raised by a frontier sampling run
#[derive(Debug, Clone, PartialEq)]
pub enum FrontierError {
    EmptyAssetUniverse,
    InvalidSampleSize(usize),
    Sampling(SamplingError),
    Lookup(LookupError),
}

impl fmt::Display for FrontierError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrontierError::EmptyAssetUniverse => write!(f, "asset universe is empty"),
            FrontierError::InvalidSampleSize(n) => write!(f, "invalid sample size {n}"),
            FrontierError::Sampling(e) => write!(f, "{e}"),
            FrontierError::Lookup(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for FrontierError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FrontierError::Sampling(e) => Some(e),
            FrontierError::Lookup(e) => Some(e),
            _ => None,
        }
    }
}

impl From<SamplingError> for FrontierError {
    fn from(err: SamplingError) -> Self {
        FrontierError::Sampling(err)
    }
}

impl From<LookupError> for FrontierError {
    fn from(err: LookupError) -> Self {
        FrontierError::Lookup(err)
    }
}

/// Errors related to the shape of a historical-returns table
#[derive(Debug, Clone, PartialEq)]
pub enum TableError {
    NoAssets,
    TooManyAssets(usize),
    EmptyAssetName(usize),
    DuplicateAsset(String),
    RaggedColumn {
        asset: String,
        expected: usize,
        found: usize,
    },
    DateCountMismatch {
        expected: usize,
        found: usize,
    },
    /// Calendar resampling needs an observation date per row
    MissingDates,
    Statistics(StatisticsError),
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableError::NoAssets => write!(f, "returns table has no assets"),
            TableError::TooManyAssets(n) => write!(f, "returns table has {n} assets, too many"),
            TableError::EmptyAssetName(col) => write!(f, "asset in column {col} has no name"),
            TableError::DuplicateAsset(name) => write!(f, "asset '{name}' appears more than once"),
            TableError::RaggedColumn {
                asset,
                expected,
                found,
            } => write!(
                f,
                "asset '{asset}' has {found} observations, expected {expected}"
            ),
            TableError::DateCountMismatch { expected, found } => {
                write!(f, "table has {found} dates for {expected} observations")
            }
            TableError::MissingDates => {
                write!(f, "returns table has no observation dates to resample by")
            }
            TableError::Statistics(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for TableError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TableError::Statistics(e) => Some(e),
            _ => None,
        }
    }
}

impl From<StatisticsError> for TableError {
    fn from(err: StatisticsError) -> Self {
        TableError::Statistics(err)
    }
}

/// Errors related to stopwatch phases
#[derive(Debug, Clone, PartialEq)]
pub enum TimingError {
    UnknownPhase(String),
    IncompletePhase(String),
}

impl fmt::Display for TimingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimingError::UnknownPhase(name) => {
                write!(f, "phase '{name}' was never started")
            }
            TimingError::IncompletePhase(name) => {
                write!(f, "phase '{name}' has not finished yet")
            }
        }
    }
}

impl std::error::Error for TimingError {}
