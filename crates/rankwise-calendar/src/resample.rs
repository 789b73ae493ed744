//! Forward-fill resampling onto a trading calendar.

use rankwise_traits::{FactorTable, Result, TradingCalendar};
use tracing::debug;

/// Resamples `table` onto the dates of `calendar`.
///
/// Every calendar date carries, per asset, the most recent non-missing value
/// observed on or before that date. Observations falling between calendar
/// dates still feed later calendar dates. The output index is exactly the
/// calendar, so nothing outside `[calendar.first(), calendar.last()]` appears.
///
/// Calendar dates earlier than an asset's first observation stay missing.
/// This is not an error: the ranker later gives those cells the unranked
/// sentinel.
///
/// # Errors
///
/// Only propagates table construction errors, which cannot occur for a
/// well-formed input table.
pub fn resample(table: &FactorTable, calendar: &TradingCalendar) -> Result<FactorTable> {
    let source_dates = table.dates();
    let rows = table.rows();

    let mut last: Vec<Option<f64>> = vec![None; table.width()];
    let mut next = 0;
    let mut values = Vec::with_capacity(calendar.len());

    for &day in calendar.dates() {
        while next < source_dates.len() && source_dates[next] <= day {
            for (slot, value) in last.iter_mut().zip(&rows[next]) {
                if value.is_some() {
                    *slot = *value;
                }
            }
            next += 1;
        }
        values.push(last.clone());
    }

    debug!(
        factor = table.name().unwrap_or("<unnamed>"),
        from_rows = table.height(),
        to_rows = calendar.len(),
        assets = table.width(),
        "resampled factor table"
    );

    let mut resampled =
        FactorTable::new(calendar.dates().to_vec(), table.assets().to_vec(), values)?;
    if let Some(name) = table.name() {
        resampled = resampled.with_name(name);
    }
    Ok(resampled)
}

/// Resamples when a calendar is given, otherwise returns the table as is.
///
/// # Errors
///
/// See [`resample`].
pub fn resample_optional(
    table: &FactorTable,
    calendar: Option<&TradingCalendar>,
) -> Result<FactorTable> {
    calendar.map_or_else(|| Ok(table.clone()), |calendar| resample(table, calendar))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rankwise_traits::Date;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd_opt(y, m, day).unwrap()
    }

    fn assets(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_quarterly_value_fills_consecutive_days() {
        let quarterly =
            FactorTable::new(vec![d(2021, 1, 1)], assets(&["A"]), vec![vec![Some(10.0)]])
                .unwrap();
        let calendar =
            TradingCalendar::new(vec![d(2021, 1, 1), d(2021, 1, 2), d(2021, 1, 3)]).unwrap();

        let daily = resample(&quarterly, &calendar).unwrap();
        assert_eq!(daily.dates(), calendar.dates());
        assert_eq!(daily.column("A").unwrap(), vec![Some(10.0); 3]);
    }

    #[test]
    fn test_days_before_first_observation_are_missing() {
        let table = FactorTable::new(
            vec![d(2021, 1, 5)],
            assets(&["A", "B"]),
            vec![vec![Some(1.0), Some(2.0)]],
        )
        .unwrap();
        let calendar = TradingCalendar::new(vec![d(2021, 1, 4), d(2021, 1, 5)]).unwrap();

        let out = resample(&table, &calendar).unwrap();
        assert_eq!(out.value(d(2021, 1, 4), "A"), None);
        assert_eq!(out.value(d(2021, 1, 5), "B"), Some(2.0));
    }

    #[test]
    fn test_off_calendar_observation_carries_forward() {
        // Saturday report, Monday is the next trading day
        let table = FactorTable::new(
            vec![d(2021, 1, 1), d(2021, 1, 9)],
            assets(&["A"]),
            vec![vec![Some(1.0)], vec![Some(2.0)]],
        )
        .unwrap();
        let calendar =
            TradingCalendar::new(vec![d(2021, 1, 8), d(2021, 1, 11), d(2021, 1, 12)]).unwrap();

        let out = resample(&table, &calendar).unwrap();
        assert_eq!(
            out.column("A").unwrap(),
            vec![Some(1.0), Some(2.0), Some(2.0)]
        );
    }

    #[test]
    fn test_missing_cell_does_not_reset_fill() {
        let table = FactorTable::new(
            vec![d(2021, 1, 1), d(2021, 1, 2)],
            assets(&["A"]),
            vec![vec![Some(3.0)], vec![None]],
        )
        .unwrap();
        let calendar = TradingCalendar::new(vec![d(2021, 1, 2)]).unwrap();

        let out = resample(&table, &calendar).unwrap();
        assert_eq!(out.value(d(2021, 1, 2), "A"), Some(3.0));
    }

    #[test]
    fn test_output_is_clipped_to_calendar_range() {
        let table = FactorTable::new(
            vec![d(2020, 12, 1), d(2021, 1, 4), d(2021, 3, 1)],
            assets(&["A"]),
            vec![vec![Some(1.0)], vec![Some(2.0)], vec![Some(3.0)]],
        )
        .unwrap();
        let calendar = TradingCalendar::new(vec![d(2021, 1, 4), d(2021, 1, 5)]).unwrap();

        let out = resample(&table, &calendar).unwrap();
        assert!(out.dates().iter().all(|&date| calendar.covers(date)));
        assert_eq!(out.column("A").unwrap(), vec![Some(2.0), Some(2.0)]);
    }

    #[test]
    fn test_aligned_table_is_unchanged() {
        let dates = vec![d(2021, 1, 4), d(2021, 1, 5), d(2021, 1, 6)];
        let table = FactorTable::new(
            dates.clone(),
            assets(&["A", "B"]),
            vec![
                vec![Some(1.0), Some(4.0)],
                vec![Some(2.0), Some(5.0)],
                vec![Some(3.0), Some(6.0)],
            ],
        )
        .unwrap()
        .with_name("roe");
        let calendar = TradingCalendar::new(dates).unwrap();

        let once = resample(&table, &calendar).unwrap();
        assert_eq!(once, table);

        let twice = resample(&once, &calendar).unwrap();
        assert_eq!(twice, once);
    }

    #[test]
    fn test_no_calendar_skips_stage() {
        let table = FactorTable::new(vec![d(2021, 1, 1)], assets(&["A"]), vec![vec![None]])
            .unwrap();
        let out = resample_optional(&table, None).unwrap();
        assert_eq!(out, table);
    }
}
