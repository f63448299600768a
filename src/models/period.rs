//! Ledger period representation
//!
//! A ledger covers one calendar month of one year.

use chrono::{Datelike, Month};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// A (year, month) pair identifying one month ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LedgerPeriod {
    year: i32,
    month: u32,
}

impl LedgerPeriod {
    /// Create a period, checking the month is 1..=12
    pub fn new(year: i32, month: u32) -> Result<Self, PeriodParseError> {
        if !(1..=12).contains(&month) {
            return Err(PeriodParseError::InvalidMonth(month.to_string()));
        }
        Ok(Self { year, month })
    }

    /// Get the current month's period
    pub fn current() -> Self {
        let today = chrono::Local::now().date_naive();
        Self {
            year: today.year(),
            month: today.month(),
        }
    }

    /// The twelve periods of a year in calendar order
    pub fn months_of(year: i32) -> impl Iterator<Item = LedgerPeriod> {
        (1..=12).map(move |month| LedgerPeriod { year, month })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Full English month name, e.g. "March"
    pub fn month_name(&self) -> &'static str {
        MONTH_NAMES[(self.month - 1) as usize]
    }

    /// Date label for a day row, e.g. "05/March/2024"
    pub fn date_label(&self, day: u32) -> String {
        format!("{:02}/{}/{}", day, self.month_name(), self.year)
    }

    /// Parse a day-row date label back into its day, checking it belongs to this period
    pub fn parse_date_label(&self, label: &str) -> Result<u32, PeriodParseError> {
        let parts: Vec<&str> = label.trim().split('/').collect();
        if parts.len() != 3 {
            return Err(PeriodParseError::InvalidFormat(label.to_string()));
        }

        let day: u32 = parts[0]
            .parse()
            .map_err(|_| PeriodParseError::InvalidFormat(label.to_string()))?;
        let month = parse_month(parts[1])?;
        let year: i32 = parts[2]
            .parse()
            .map_err(|_| PeriodParseError::InvalidFormat(label.to_string()))?;

        if year != self.year || month != self.month {
            return Err(PeriodParseError::WrongPeriod {
                label: label.to_string(),
                expected: *self,
            });
        }
        Ok(day)
    }

    /// Short form used for file names and the CLI, e.g. "2024-03"
    pub fn key(&self) -> String {
        format!("{}-{:02}", self.year, self.month)
    }

    /// Parse a period string
    ///
    /// Formats:
    /// - "2024-03" or "2024-3"
    /// - "March 2024" or "Mar 2024"
    pub fn parse(s: &str) -> Result<Self, PeriodParseError> {
        let s = s.trim();

        if let Some((year, month)) = s.split_once('-') {
            let year: i32 = year
                .parse()
                .map_err(|_| PeriodParseError::InvalidFormat(s.to_string()))?;
            let month: u32 = month
                .parse()
                .map_err(|_| PeriodParseError::InvalidFormat(s.to_string()))?;
            return Self::new(year, month);
        }

        if let Some((month, year)) = s.split_once(' ') {
            let month = parse_month(month)?;
            let year: i32 = year
                .trim()
                .parse()
                .map_err(|_| PeriodParseError::InvalidFormat(s.to_string()))?;
            return Self::new(year, month);
        }

        Err(PeriodParseError::InvalidFormat(s.to_string()))
    }
}

fn parse_month(s: &str) -> Result<u32, PeriodParseError> {
    s.trim()
        .parse::<Month>()
        .map(|m| m.number_from_month())
        .map_err(|_| PeriodParseError::InvalidMonth(s.to_string()))
}

impl fmt::Display for LedgerPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.month_name(), self.year)
    }
}

impl FromStr for LedgerPeriod {
    type Err = PeriodParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Error type for period parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeriodParseError {
    InvalidFormat(String),
    InvalidMonth(String),
    WrongPeriod {
        label: String,
        expected: LedgerPeriod,
    },
}

impl fmt::Display for PeriodParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeriodParseError::InvalidFormat(s) => write!(f, "Invalid period format: {}", s),
            PeriodParseError::InvalidMonth(s) => write!(f, "Invalid month: {}", s),
            PeriodParseError::WrongPeriod { label, expected } => {
                write!(f, "Date '{}' does not belong to {}", label, expected)
            }
        }
    }
}

impl std::error::Error for PeriodParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_bad_month() {
        assert!(LedgerPeriod::new(2024, 0).is_err());
        assert!(LedgerPeriod::new(2024, 13).is_err());
        assert!(LedgerPeriod::new(2024, 12).is_ok());
    }

    #[test]
    fn test_display_and_key() {
        let period = LedgerPeriod::new(2024, 3).unwrap();
        assert_eq!(period.to_string(), "March 2024");
        assert_eq!(period.key(), "2024-03");
    }

    #[test]
    fn test_parse() {
        let march = LedgerPeriod::new(2024, 3).unwrap();
        assert_eq!(LedgerPeriod::parse("2024-03").unwrap(), march);
        assert_eq!(LedgerPeriod::parse("2024-3").unwrap(), march);
        assert_eq!(LedgerPeriod::parse("March 2024").unwrap(), march);
        assert_eq!(LedgerPeriod::parse("mar 2024").unwrap(), march);
        assert!(LedgerPeriod::parse("2024").is_err());
        assert!(LedgerPeriod::parse("2024-13").is_err());
        assert!(LedgerPeriod::parse("Smarch 2024").is_err());
    }

    #[test]
    fn test_date_label() {
        let period = LedgerPeriod::new(2023, 11).unwrap();
        assert_eq!(period.date_label(5), "05/November/2023");
        assert_eq!(period.parse_date_label("05/November/2023"), Ok(5));
        assert!(matches!(
            period.parse_date_label("05/December/2023"),
            Err(PeriodParseError::WrongPeriod { .. })
        ));
        assert!(period.parse_date_label("2023-11-05").is_err());
    }

    #[test]
    fn test_months_of_is_calendar_order() {
        let months: Vec<u32> = LedgerPeriod::months_of(2025).map(|p| p.month()).collect();
        assert_eq!(months, (1..=12).collect::<Vec<_>>());
    }

    #[test]
    fn test_ordering() {
        let a = LedgerPeriod::new(2024, 12).unwrap();
        let b = LedgerPeriod::new(2025, 1).unwrap();
        assert!(a < b);
    }
}
