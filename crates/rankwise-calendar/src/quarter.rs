//! Financial-report publication windows.
//!
//! Taiwan-listed companies publish quarterly statements on fixed deadlines,
//! so each fiscal quarter maps to the window of dates during which its
//! figures are the latest available:
//!
//! | Quarter | Window |
//! |---------|--------|
//! | Q1 of Y | Y-05-16 to Y-08-14 |
//! | Q2 of Y | Y-08-15 to Y-11-14 |
//! | Q3 of Y | Y-11-15 to (Y+1)-03-31 |
//! | Q4 of Y | (Y+1)-04-01 to (Y+1)-05-15 |
//!
//! The windows tile the calendar without gaps or overlaps.

use std::{fmt, str::FromStr};

use chrono::Datelike;
use rankwise_traits::{Date, RankwiseError, Result};
use serde::{Deserialize, Serialize};

/// A fiscal quarter identified by year and quarter number (1 to 4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ReportingQuarter {
    year: i32,
    quarter: u8,
}

impl ReportingQuarter {
    /// Creates a quarter.
    ///
    /// # Errors
    ///
    /// Returns [`RankwiseError::InvalidDate`] if `quarter` is not in `1..=4`.
    pub fn new(year: i32, quarter: u8) -> Result<Self> {
        if !(1..=4).contains(&quarter) {
            return Err(RankwiseError::InvalidDate(format!(
                "quarter must be between 1 and 4, got {quarter}"
            )));
        }
        Ok(Self { year, quarter })
    }

    /// Fiscal year.
    pub const fn year(&self) -> i32 {
        self.year
    }

    /// Quarter number, 1 to 4.
    pub const fn quarter(&self) -> u8 {
        self.quarter
    }

    /// First and last publication dates of this quarter's statements, inclusive.
    pub fn window(&self) -> (Date, Date) {
        let y = self.year;
        match self.quarter {
            1 => (ymd(y, 5, 16), ymd(y, 8, 14)),
            2 => (ymd(y, 8, 15), ymd(y, 11, 14)),
            3 => (ymd(y, 11, 15), ymd(y + 1, 3, 31)),
            _ => (ymd(y + 1, 4, 1), ymd(y + 1, 5, 15)),
        }
    }

    /// The quarter whose publication window contains `date`.
    pub fn containing(date: Date) -> Self {
        let (year, md) = (date.year(), (date.month(), date.day()));
        let (year, quarter) = if md < (4, 1) {
            (year - 1, 3)
        } else if md <= (5, 15) {
            (year - 1, 4)
        } else if md <= (8, 14) {
            (year, 1)
        } else if md <= (11, 14) {
            (year, 2)
        } else {
            (year, 3)
        };
        Self { year, quarter }
    }

    /// The following quarter.
    pub const fn next(&self) -> Self {
        if self.quarter == 4 {
            Self {
                year: self.year + 1,
                quarter: 1,
            }
        } else {
            Self {
                year: self.year,
                quarter: self.quarter + 1,
            }
        }
    }
}

fn ymd(year: i32, month: u32, day: u32) -> Date {
    // Fixed month/day pairs that exist in every year
    Date::from_ymd_opt(year, month, day).unwrap_or(Date::MIN)
}

impl fmt::Display for ReportingQuarter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-Q{}", self.year, self.quarter)
    }
}

impl FromStr for ReportingQuarter {
    type Err = RankwiseError;

    /// Parses `YYYY-QN`, e.g. `2013-Q1`. The `Q` is case-insensitive.
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || RankwiseError::InvalidDate(format!("'{s}' is not a YYYY-QN quarter"));

        let (year, quarter) = s.trim().split_once('-').ok_or_else(invalid)?;
        let quarter = quarter
            .strip_prefix('Q')
            .or_else(|| quarter.strip_prefix('q'))
            .ok_or_else(invalid)?;

        let year = year.parse::<i32>().map_err(|_| invalid())?;
        let quarter = quarter.parse::<u8>().map_err(|_| invalid())?;
        Self::new(year, quarter)
    }
}
