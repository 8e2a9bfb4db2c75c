//! Delimited historical-returns files
//!
//! Two layouts are accepted:
//! - periods by assets: a header of asset names, one row per observation,
//!   optionally led by a date column
//! - assets by periods: one row per asset, its name in the first column and
//!   the period labels in the header
//!
//! The layout is detected from the header and the first column unless
//! [`CsvOptions::transposed`] forces the second one.

use std::fs;
use std::path::Path;

use frontier_core::ReturnsTable;
use jiff::civil::Date;

use super::InputError;

/// Header labels that mark a leading date column
const DATE_LABELS: [&str; 4] = ["", "date", "period", "dates"];
/// Cell contents read as a missing observation
const MISSING_TOKENS: [&str; 6] = ["", "nan", "na", "n/a", "-", "null"];
/// Date layouts tried after ISO 8601
const DATE_FORMATS: [&str; 4] = ["%Y/%m/%d", "%d/%m/%Y", "%d.%m.%Y", "%Y%m%d"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CsvOptions {
    pub delimiter: u8,
    /// Read rows as assets and columns as periods
    pub transposed: bool,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            delimiter: b';',
            transposed: false,
        }
    }
}

/// Read a returns file from disk
pub fn read_returns(path: &Path, options: &CsvOptions) -> Result<ReturnsTable, InputError> {
    let content = fs::read_to_string(path)
        .map_err(|e| InputError::Io(format!("Failed to read {}: {e}", path.display())))?;
    let table = parse_returns(&content, options)?;
    tracing::info!(
        path = %path.display(),
        assets = table.num_assets(),
        observations = table.num_observations(),
        dated = table.dates().is_some(),
        "Loaded returns"
    );
    Ok(table)
}

/// Parse delimited returns text into a table
pub fn parse_returns(content: &str, options: &CsvOptions) -> Result<ReturnsTable, InputError> {
    let records = read_records(content, options.delimiter)?;
    let Some((header, rows)) = records.split_first() else {
        return Err(InputError::Parse("returns file is empty".into()));
    };
    let header = header.cells.as_slice();

    match detect_layout(header, rows, options) {
        Layout::PeriodsByAssets { dated } => periods_by_assets(header, rows, dated, options),
        Layout::AssetsByPeriods => assets_by_periods(header, rows, options),
    }
}

/// A non-blank record and the line it starts on
#[derive(Debug, Clone)]
struct Row {
    line: u64,
    cells: Vec<String>,
}

impl Row {
    fn cell(&self, index: usize) -> &str {
        self.cells.get(index).map_or("", String::as_str)
    }

    fn check_width(&self, header: &[String]) -> Result<(), InputError> {
        if self.cells.len() > header.len() {
            return Err(InputError::Parse(format!(
                "line {} has {} cells, the header has {}",
                self.line,
                self.cells.len(),
                header.len()
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Layout {
    /// `dated` is true when the first column holds observation labels
    PeriodsByAssets { dated: bool },
    AssetsByPeriods,
}

fn detect_layout(header: &[String], rows: &[Row], options: &CsvOptions) -> Layout {
    if options.transposed {
        return Layout::AssetsByPeriods;
    }

    let first_label = header.first().map(|s| s.to_lowercase()).unwrap_or_default();
    if DATE_LABELS.contains(&first_label.as_str()) {
        return Layout::PeriodsByAssets { dated: true };
    }

    let first_column = || rows.iter().map(|r| r.cell(0));
    if !rows.is_empty() && first_column().all(|cell| parse_date(cell).is_some()) {
        return Layout::PeriodsByAssets { dated: true };
    }
    if first_column().all(|cell| parse_value(cell, options.delimiter).is_ok()) {
        return Layout::PeriodsByAssets { dated: false };
    }
    Layout::AssetsByPeriods
}

fn read_records(content: &str, delimiter: u8) -> Result<Vec<Row>, InputError> {
    let mut reader = ::csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .trim(::csv::Trim::All)
        .from_reader(content.as_bytes());

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| InputError::Csv(e.to_string()))?;
        if record.iter().all(str::is_empty) {
            continue;
        }
        rows.push(Row {
            line: record.position().map_or(0, |p| p.line()),
            cells: record.iter().map(str::to_string).collect(),
        });
    }
    Ok(rows)
}

fn periods_by_assets(
    header: &[String],
    rows: &[Row],
    dated: bool,
    options: &CsvOptions,
) -> Result<ReturnsTable, InputError> {
    let skip = usize::from(dated);
    let names: Vec<String> = header[skip.min(header.len())..].to_vec();
    let mut columns: Vec<Vec<Option<f64>>> = vec![Vec::with_capacity(rows.len()); names.len()];

    for row in rows {
        row.check_width(header)?;
        for (c, column) in columns.iter_mut().enumerate() {
            let cell = row.cell(c + skip);
            column.push(parse_cell(cell, options.delimiter, row.line, &names[c])?);
        }
    }

    let dates = if dated {
        let labels: Vec<&str> = rows.iter().map(|r| r.cell(0)).collect();
        observation_dates(&labels, true)
    } else {
        None
    };
    Ok(ReturnsTable::new(names, dates, columns)?)
}

fn assets_by_periods(
    header: &[String],
    rows: &[Row],
    options: &CsvOptions,
) -> Result<ReturnsTable, InputError> {
    let periods = header.len().saturating_sub(1);
    let labels: Vec<&str> = header.iter().skip(1).map(String::as_str).collect();
    let dates = observation_dates(&labels, false);

    let mut names = Vec::with_capacity(rows.len());
    let mut columns = Vec::with_capacity(rows.len());
    for row in rows {
        row.check_width(header)?;
        let name = row.cell(0).to_string();
        let column = (1..=periods)
            .map(|c| parse_cell(row.cell(c), options.delimiter, row.line, &name))
            .collect::<Result<Vec<_>, _>>()?;
        names.push(name);
        columns.push(column);
    }

    Ok(ReturnsTable::new(names, dates, columns)?)
}

/// Dates for every observation label, or `None` when any label is unreadable.
///
/// A fallback to undated returns is logged when dates were expected or when
/// only some labels parsed.
fn observation_dates(labels: &[&str], expect_dates: bool) -> Option<Vec<Date>> {
    if labels.is_empty() {
        return None;
    }

    let mut dates = Vec::with_capacity(labels.len());
    let mut unreadable = None;
    for label in labels {
        match parse_date(label) {
            Some(date) => dates.push(date),
            None => {
                unreadable.get_or_insert(*label);
            }
        }
    }

    let Some(label) = unreadable else {
        return Some(dates);
    };
    if expect_dates || !dates.is_empty() {
        tracing::warn!(
            label = %label,
            parsed = dates.len(),
            labels = labels.len(),
            "Unreadable date label, returns are read without dates"
        );
    }
    None
}

fn parse_cell(
    cell: &str,
    delimiter: u8,
    line: u64,
    asset: &str,
) -> Result<Option<f64>, InputError> {
    parse_value(cell, delimiter).map_err(|()| {
        InputError::Parse(format!(
            "line {line}, asset '{asset}': cannot read '{cell}' as a return"
        ))
    })
}

/// Read one return cell.
///
/// Missing markers yield `None`. A trailing `%` divides by 100, and a
/// decimal comma is accepted unless `,` is the delimiter.
pub(crate) fn parse_value(cell: &str, delimiter: u8) -> Result<Option<f64>, ()> {
    let cell = cell.trim();
    if MISSING_TOKENS.contains(&cell.to_lowercase().as_str()) {
        return Ok(None);
    }

    let (number, divisor) = match cell.strip_suffix('%') {
        Some(n) => (n.trim_end(), 100.0),
        None => (cell, 1.0),
    };
    let number = if delimiter == b',' {
        number.to_string()
    } else {
        number.replace(',', ".")
    };

    let value: f64 = number.parse().map_err(|_| ())?;
    Ok(value.is_finite().then_some(value / divisor))
}

/// Read an observation label as a calendar date
pub(crate) fn parse_date(label: &str) -> Option<Date> {
    let label = label.trim();
    if let Ok(date) = label.parse::<Date>() {
        return Some(date);
    }
    // Timestamps such as "2024-01-31 00:00:00" keep their date part
    if let Some(head) = label.get(..10)
        && let Ok(date) = head.parse::<Date>()
    {
        return Some(date);
    }
    DATE_FORMATS
        .iter()
        .find_map(|format| Date::strptime(format, label).ok())
}
