//! Reading historical returns and run parameters from disk

pub mod csv;
pub mod params;

use frontier_core::TableError;

pub use self::csv::{CsvOptions, parse_returns, read_returns};
pub use params::{Parameters, UserPortfolio};

/// Error types for input loading
#[derive(Debug)]
pub enum InputError {
    Io(String),
    Csv(String),
    Parse(String),
    Yaml(String),
    /// A user-defined portfolio does not fit the asset universe
    Portfolio(String),
    Table(TableError),
}

impl std::fmt::Display for InputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputError::Io(msg) => write!(f, "IO error: {msg}"),
            InputError::Csv(msg) => write!(f, "CSV error: {msg}"),
            InputError::Parse(msg) => write!(f, "Parse error: {msg}"),
            InputError::Yaml(msg) => write!(f, "YAML error: {msg}"),
            InputError::Portfolio(msg) => write!(f, "Portfolio error: {msg}"),
            InputError::Table(e) => write!(f, "Returns table error: {e}"),
        }
    }
}

impl std::error::Error for InputError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InputError::Table(e) => Some(e),
            _ => None,
        }
    }
}

impl From<TableError> for InputError {
    fn from(err: TableError) -> Self {
        InputError::Table(err)
    }
}
