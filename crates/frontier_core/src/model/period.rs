use std::fmt;
use std::str::FromStr;

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use crate::error::StatisticsError;

/// Sampling period of a historical-returns series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Period {
    Day,
    Week,
    Month,
    Year,
}

impl Period {
    /// Number of periods compounded into one year
    #[must_use]
    pub fn periods_per_year(self) -> u32 {
        match self {
            Period::Day => 365,
            Period::Week => 52,
            Period::Month => 12,
            Period::Year => 1,
        }
    }

    /// Calendar bucket a date falls into when resampling to this period.
    ///
    /// Weeks follow ISO-8601 numbering, so the first days of January can
    /// belong to the last week of the previous year.
    #[must_use]
    pub fn bucket(self, date: Date) -> (i16, i16) {
        match self {
            Period::Day => (date.year(), date.day_of_year()),
            Period::Week => {
                let iso = date.iso_week_date();
                (iso.year(), i16::from(iso.week()))
            }
            Period::Month => (date.year(), i16::from(date.month())),
            Period::Year => (date.year(), 0),
        }
    }

    /// Adjective used in reports ("monthly returns")
    #[must_use]
    pub fn adjective(self) -> &'static str {
        match self {
            Period::Day => "daily",
            Period::Week => "weekly",
            Period::Month => "monthly",
            Period::Year => "yearly",
        }
    }
}

impl FromStr for Period {
    type Err = StatisticsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "d" | "day" | "daily" => Ok(Period::Day),
            "w" | "week" | "weekly" => Ok(Period::Week),
            "m" | "month" | "monthly" => Ok(Period::Month),
            "y" | "year" | "yearly" | "annual" | "annually" => Ok(Period::Year),
            _ => Err(StatisticsError::InvalidPeriod(s.to_string())),
        }
    }
}

impl TryFrom<String> for Period {
    type Error = StatisticsError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Period> for String {
    fn from(period: Period) -> Self {
        period.adjective().to_string()
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.adjective())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synonyms_share_multiplier() {
        for label in ["d", "day", "daily", "DAILY", " Day "] {
            let period: Period = label.parse().unwrap();
            assert_eq!(period, Period::Day);
            assert_eq!(period.periods_per_year(), 365);
        }
        for label in ["w", "week", "Weekly"] {
            assert_eq!(label.parse::<Period>().unwrap().periods_per_year(), 52);
        }
        for label in ["m", "month", "MONTHLY"] {
            assert_eq!(label.parse::<Period>().unwrap().periods_per_year(), 12);
        }
        for label in ["y", "year", "yearly", "annual"] {
            assert_eq!(label.parse::<Period>().unwrap().periods_per_year(), 1);
        }
    }

    #[test]
    fn test_invalid_period() {
        let err = "fortnightly".parse::<Period>().unwrap_err();
        assert_eq!(err, StatisticsError::InvalidPeriod("fortnightly".into()));
        assert!("".parse::<Period>().is_err());
    }

    #[test]
    fn test_buckets() {
        let date = jiff::civil::date(2024, 3, 15);
        assert_eq!(Period::Year.bucket(date), (2024, 0));
        assert_eq!(Period::Month.bucket(date), (2024, 3));
        assert_eq!(Period::Day.bucket(date), (2024, 75));

        // 2021-01-01 is a Friday in ISO week 53 of 2020
        let new_year = jiff::civil::date(2021, 1, 1);
        assert_eq!(Period::Week.bucket(new_year), (2020, 53));
    }
}
