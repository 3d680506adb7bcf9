//! The twelve selectable months

use crate::error::CoreError;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Month selector value. Datasets are keyed by month name only (no year).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Month {
    January,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

const ALL: [Month; 12] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
    Month::July,
    Month::August,
    Month::September,
    Month::October,
    Month::November,
    Month::December,
];

impl Month {
    pub fn all() -> &'static [Month] {
        &ALL
    }

    /// Zero-based position (January = 0)
    pub fn index(self) -> usize {
        self as usize
    }

    /// Month containing `date`
    pub fn from_date(date: NaiveDate) -> Self {
        // month0() is always 0..=11
        ALL[date.month0() as usize]
    }

    pub fn name(self) -> &'static str {
        match self {
            Month::January => "January",
            Month::February => "February",
            Month::March => "March",
            Month::April => "April",
            Month::May => "May",
            Month::June => "June",
            Month::July => "July",
            Month::August => "August",
            Month::September => "September",
            Month::October => "October",
            Month::November => "November",
            Month::December => "December",
        }
    }

    /// Lowercase name, used as the dataset file stem
    pub fn file_stem(self) -> String {
        self.name().to_lowercase()
    }

    pub fn next(self) -> Self {
        ALL[(self.index() + 1) % ALL.len()]
    }

    pub fn prev(self) -> Self {
        ALL[(self.index() + ALL.len() - 1) % ALL.len()]
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Month {
    type Err = CoreError;

    /// Accepts full names and 3-letter abbreviations, case-insensitive
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        ALL.iter()
            .copied()
            .find(|m| {
                let name = m.name().to_lowercase();
                name == needle || (needle.len() == 3 && name.starts_with(&needle))
            })
            .ok_or_else(|| CoreError::InvalidMonth {
                input: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_date() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 17).unwrap();
        assert_eq!(Month::from_date(date), Month::May);

        let date = NaiveDate::from_ymd_opt(2023, 12, 31).unwrap();
        assert_eq!(Month::from_date(date), Month::December);
    }

    #[test]
    fn test_parse() {
        assert_eq!("June".parse::<Month>().unwrap(), Month::June);
        assert_eq!("june".parse::<Month>().unwrap(), Month::June);
        assert_eq!(" SEP ".parse::<Month>().unwrap(), Month::September);
        assert!("Juneteenth".parse::<Month>().is_err());
        assert!("ju".parse::<Month>().is_err());
    }

    #[test]
    fn test_wrapping_navigation() {
        assert_eq!(Month::December.next(), Month::January);
        assert_eq!(Month::January.prev(), Month::December);
        assert_eq!(Month::April.next(), Month::May);
    }

    #[test]
    fn test_serde_uses_month_name() {
        let json = serde_json::to_string(&Month::March).unwrap();
        assert_eq!(json, "\"March\"");
        let back: Month = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Month::March);
        assert_eq!(Month::March.file_stem(), "march");
    }
}
