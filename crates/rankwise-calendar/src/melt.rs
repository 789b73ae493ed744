//! Wide to long conversion.

use rankwise_traits::{FactorTable, LongFactorRecord, LongFactorTable, Result};

/// Melts a wide table into `(date, asset, value)` records sorted by date and
/// then asset name.
///
/// Missing cells are kept with `value = None`. Every record is tagged with the
/// table's factor name.
///
/// # Errors
///
/// Only propagates table construction errors, which cannot occur for a
/// well-formed input table.
pub fn melt(table: &FactorTable) -> Result<LongFactorTable> {
    let mut order: Vec<usize> = (0..table.width()).collect();
    order.sort_by(|&a, &b| table.assets()[a].cmp(&table.assets()[b]));

    let factor = table.name().map(str::to_string);
    let mut records = Vec::with_capacity(table.height() * table.width());
    for (date, row) in table.dates().iter().zip(table.rows()) {
        records.extend(order.iter().map(|&col| LongFactorRecord {
            date: *date,
            asset: table.assets()[col].clone(),
            factor: factor.clone(),
            value: row[col],
        }));
    }

    LongFactorTable::new(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rankwise_traits::Date;

    fn d(day: u32) -> Date {
        Date::from_ymd_opt(2021, 1, day).unwrap()
    }

    #[test]
    fn test_melt_sorts_by_date_then_asset() {
        let table = FactorTable::new(
            vec![d(4), d(5)],
            vec!["B".to_string(), "A".to_string()],
            vec![vec![Some(1.0), Some(2.0)], vec![None, Some(4.0)]],
        )
        .unwrap()
        .with_name("pb");

        let long = melt(&table).unwrap();
        let keys: Vec<(Date, &str)> = long
            .records()
            .iter()
            .map(|r| (r.date, r.asset.as_str()))
            .collect();
        assert_eq!(keys, vec![(d(4), "A"), (d(4), "B"), (d(5), "A"), (d(5), "B")]);

        assert_eq!(long.records()[0].value, Some(2.0));
        assert_eq!(long.records()[3].value, None);
        assert!(long.records().iter().all(|r| r.factor.as_deref() == Some("pb")));
    }

    #[test]
    fn test_melt_empty_table() {
        let table = FactorTable::new(vec![], vec!["A".to_string()], vec![]).unwrap();
        assert!(melt(&table).unwrap().is_empty());
    }
}
