//! Quarter command implementation.

use anyhow::Result;
use rankwise::{calendar::ReportingQuarter, traits::parse_date};

/// Describe a reporting quarter given as `YYYY-QN` or the quarter containing
/// a `YYYY-MM-DD` date.
pub(crate) fn describe(input: &str) -> Result<String> {
    let quarter = if input.contains(['Q', 'q']) {
        input.parse::<ReportingQuarter>()?
    } else {
        ReportingQuarter::containing(parse_date(input)?)
    };
    let (start, end) = quarter.window();
    Ok(format!("{quarter}: {start} to {end}"))
}

/// Print the publication window of a quarter.
pub(crate) fn show_quarter(input: &str) -> Result<()> {
    println!("{}", describe(input)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_quarter() {
        assert_eq!(
            describe("2013-Q3").unwrap(),
            "2013-Q3: 2013-11-15 to 2014-03-31"
        );
    }

    #[test]
    fn test_describe_date() {
        assert_eq!(
            describe("2014-04-20").unwrap(),
            "2013-Q4: 2014-04-01 to 2014-05-15"
        );
    }

    #[test]
    fn test_describe_invalid() {
        assert!(describe("2013-Q9").is_err());
        assert!(describe("not-a-date").is_err());
    }
}
