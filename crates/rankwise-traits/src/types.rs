//! Common types used throughout the rankwise workspace.
//!
//! Dates and asset identifiers, plus the [`TradingCalendar`] that defines the
//! frequency lower-frequency factor data gets expanded onto.

use crate::{RankwiseError, Result};

// Re-export date type from chrono
pub use chrono::NaiveDate as Date;

/// An asset identifier, typically a ticker such as "2330" or "AAPL".
pub type Asset = String;

/// Sentinel rank given to assets whose factor value is missing on a date.
///
/// Computed ranks are 1-based, so a rank of `0.0` always means "unranked"
/// and must never be read as a top position.
pub const UNRANKED: f64 = 0.0;

/// Date format used when parsing and printing dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a date string in `YYYY-MM-DD` format.
pub fn parse_date(date_str: &str) -> Result<Date> {
    Date::parse_from_str(date_str.trim(), DATE_FORMAT)
        .map_err(|e| RankwiseError::InvalidDate(format!("'{date_str}': {e}")))
}

/// An ordered sequence of distinct target dates.
///
/// The calendar is never empty and its dates are strictly increasing, so
/// [`first`](Self::first) and [`last`](Self::last) are always defined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TradingCalendar {
    dates: Vec<Date>,
}

impl TradingCalendar {
    /// Creates a calendar from dates that are already strictly increasing.
    ///
    /// # Errors
    ///
    /// Returns [`RankwiseError::InvalidData`] if `dates` is empty or not
    /// strictly increasing.
    pub fn new(dates: Vec<Date>) -> Result<Self> {
        if dates.is_empty() {
            return Err(RankwiseError::InvalidData(
                "trading calendar must contain at least one date".to_string(),
            ));
        }
        if let Some(pair) = dates.windows(2).find(|w| w[0] >= w[1]) {
            return Err(RankwiseError::InvalidData(format!(
                "trading calendar dates must be strictly increasing: {} is followed by {}",
                pair[0], pair[1]
            )));
        }
        Ok(Self { dates })
    }

    /// Creates a calendar from arbitrary dates, sorting and de-duplicating them.
    ///
    /// # Errors
    ///
    /// Returns [`RankwiseError::InvalidData`] if no dates are given.
    pub fn from_unsorted(dates: impl IntoIterator<Item = Date>) -> Result<Self> {
        let mut dates: Vec<Date> = dates.into_iter().collect();
        dates.sort_unstable();
        dates.dedup();
        Self::new(dates)
    }

    /// The calendar dates in ascending order.
    pub fn dates(&self) -> &[Date] {
        &self.dates
    }

    /// The earliest date.
    pub fn first(&self) -> Date {
        self.dates[0]
    }

    /// The latest date.
    pub fn last(&self) -> Date {
        self.dates[self.dates.len() - 1]
    }

    /// Number of dates in the calendar.
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Always false; kept for API symmetry with the table types.
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Whether `date` is one of the calendar dates.
    pub fn contains(&self, date: Date) -> bool {
        self.dates.binary_search(&date).is_ok()
    }

    /// Whether `date` lies within `[first, last]`.
    pub fn covers(&self, date: Date) -> bool {
        date >= self.first() && date <= self.last()
    }
}

impl AsRef<[Date]> for TradingCalendar {
    fn as_ref(&self) -> &[Date] {
        &self.dates
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_calendar_new() {
        let cal = TradingCalendar::new(vec![d(2021, 1, 4), d(2021, 1, 5)]).unwrap();
        assert_eq!(cal.len(), 2);
        assert_eq!(cal.first(), d(2021, 1, 4));
        assert_eq!(cal.last(), d(2021, 1, 5));
        assert!(cal.contains(d(2021, 1, 5)));
        assert!(!cal.contains(d(2021, 1, 6)));
    }

    #[test]
    fn test_calendar_rejects_empty() {
        assert!(TradingCalendar::new(vec![]).is_err());
    }

    #[test]
    fn test_calendar_rejects_unordered() {
        let result = TradingCalendar::new(vec![d(2021, 1, 5), d(2021, 1, 4)]);
        assert!(matches!(result, Err(RankwiseError::InvalidData(_))));

        let result = TradingCalendar::new(vec![d(2021, 1, 5), d(2021, 1, 5)]);
        assert!(result.is_err());
    }

    #[test]
    fn test_calendar_from_unsorted() {
        let cal =
            TradingCalendar::from_unsorted([d(2021, 1, 6), d(2021, 1, 4), d(2021, 1, 6)]).unwrap();
        assert_eq!(cal.dates(), &[d(2021, 1, 4), d(2021, 1, 6)]);
        assert!(cal.covers(d(2021, 1, 5)));
        assert!(!cal.covers(d(2021, 1, 7)));
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("2021-05-16").unwrap(), d(2021, 5, 16));
        assert!(matches!(
            parse_date("2021/05/16"),
            Err(RankwiseError::InvalidDate(_))
        ));
    }
}
