//! Factor tables in wide and long form.
//!
//! A [`FactorTable`] is the wide shape vendors deliver: one row per date, one
//! column per asset. Ranking works on the long shape, one record per
//! `(date, asset)`. The only conversion between the two is the melt step in
//! `rankwise-calendar`.

use std::collections::HashSet;

use serde::Serialize;

use crate::{Asset, Date, RankwiseError, Result, UNRANKED};

/// Wide factor table: rows indexed by date, columns by asset.
///
/// Cells are `None` where the factor is missing. `NaN` inputs are stored as
/// `None`. Dates are strictly increasing and asset names are unique.
#[derive(Debug, Clone, PartialEq)]
pub struct FactorTable {
    name: Option<String>,
    dates: Vec<Date>,
    assets: Vec<Asset>,
    values: Vec<Vec<Option<f64>>>,
}

impl FactorTable {
    /// Creates a table from row-major values (`values[row][column]`).
    ///
    /// # Errors
    ///
    /// Returns [`RankwiseError::InvalidData`] if the dates are not strictly
    /// increasing, asset names repeat, or any row width differs from the
    /// number of assets.
    pub fn new(dates: Vec<Date>, assets: Vec<Asset>, values: Vec<Vec<Option<f64>>>) -> Result<Self> {
        if dates.len() != values.len() {
            return Err(RankwiseError::InvalidData(format!(
                "{} dates but {} rows of values",
                dates.len(),
                values.len()
            )));
        }
        if let Some(pair) = dates.windows(2).find(|w| w[0] >= w[1]) {
            return Err(RankwiseError::InvalidData(format!(
                "factor table dates must be strictly increasing: {} is followed by {}",
                pair[0], pair[1]
            )));
        }
        let mut seen = HashSet::with_capacity(assets.len());
        if let Some(dup) = assets.iter().find(|a| !seen.insert(a.as_str())) {
            return Err(RankwiseError::InvalidData(format!("duplicate asset column '{dup}'")));
        }
        if let Some((row, width)) = values
            .iter()
            .map(Vec::len)
            .enumerate()
            .find(|(_, w)| *w != assets.len())
        {
            return Err(RankwiseError::InvalidData(format!(
                "row {row} has {width} values, expected {}",
                assets.len()
            )));
        }

        let values = values
            .into_iter()
            .map(|row| row.into_iter().map(|v| v.filter(|x| !x.is_nan())).collect())
            .collect();

        Ok(Self {
            name: None,
            dates,
            assets,
            values,
        })
    }

    /// Attaches a factor name to the table.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// The factor name, if one was attached.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Row dates in ascending order.
    pub fn dates(&self) -> &[Date] {
        &self.dates
    }

    /// Asset column names, in column order.
    pub fn assets(&self) -> &[Asset] {
        &self.assets
    }

    /// Row-major cell values.
    pub fn rows(&self) -> &[Vec<Option<f64>>] {
        &self.values
    }

    /// Number of dates.
    pub fn height(&self) -> usize {
        self.dates.len()
    }

    /// Number of assets.
    pub fn width(&self) -> usize {
        self.assets.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Position of an asset column.
    pub fn asset_index(&self, asset: &str) -> Option<usize> {
        self.assets.iter().position(|a| a == asset)
    }

    /// The value of `asset` on `date`, if both exist and the cell is not missing.
    pub fn value(&self, date: Date, asset: &str) -> Option<f64> {
        let row = self.dates.binary_search(&date).ok()?;
        let col = self.asset_index(asset)?;
        self.values[row][col]
    }

    /// All values of one asset column, top to bottom.
    pub fn column(&self, asset: &str) -> Option<Vec<Option<f64>>> {
        let col = self.asset_index(asset)?;
        Some(self.values.iter().map(|row| row[col]).collect())
    }
}

/// One `(date, asset)` observation of a factor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LongFactorRecord {
    /// Observation date.
    pub date: Date,
    /// Asset identifier.
    pub asset: Asset,
    /// Factor name, when known.
    pub factor: Option<String>,
    /// Factor value; `None` when missing.
    pub value: Option<f64>,
}

/// Long factor table with unique `(date, asset)` keys.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LongFactorTable {
    records: Vec<LongFactorRecord>,
}

impl LongFactorTable {
    /// Creates a long table, checking that `(date, asset)` keys are unique.
    ///
    /// # Errors
    ///
    /// Returns [`RankwiseError::InvalidData`] on a duplicate key.
    pub fn new(records: Vec<LongFactorRecord>) -> Result<Self> {
        ensure_unique_keys(records.iter().map(|r| (r.date, r.asset.as_str())))?;
        Ok(Self { records })
    }

    /// The records in stored order.
    pub fn records(&self) -> &[LongFactorRecord] {
        &self.records
    }

    /// Consumes the table and returns its records.
    pub fn into_records(self) -> Vec<LongFactorRecord> {
        self.records
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct dates in ascending order.
    pub fn dates(&self) -> Vec<Date> {
        let mut dates: Vec<Date> = self.records.iter().map(|r| r.date).collect();
        dates.sort_unstable();
        dates.dedup();
        dates
    }
}

/// A long record plus its cross-sectional rank.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedRecord {
    /// Observation date.
    pub date: Date,
    /// Asset identifier.
    pub asset: Asset,
    /// Factor name, when known.
    pub factor: Option<String>,
    /// Factor value that was ranked; `None` when missing.
    pub value: Option<f64>,
    /// 1-based average rank within the date, or [`UNRANKED`] when `value` is missing.
    pub rank: f64,
}

impl RankedRecord {
    /// Whether the record received a real rank.
    pub fn is_ranked(&self) -> bool {
        self.rank != UNRANKED
    }
}

/// Output of the cross-sectional ranker.
///
/// Besides the records, the table remembers the column names it was produced
/// with so DataFrame output matches what the caller asked for.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedTable {
    value_column: String,
    rank_column: String,
    records: Vec<RankedRecord>,
}

impl RankedTable {
    /// Creates a ranked table, checking that `(date, asset)` keys are unique.
    ///
    /// # Errors
    ///
    /// Returns [`RankwiseError::InvalidData`] on a duplicate key.
    pub fn new(
        records: Vec<RankedRecord>,
        value_column: impl Into<String>,
        rank_column: impl Into<String>,
    ) -> Result<Self> {
        ensure_unique_keys(records.iter().map(|r| (r.date, r.asset.as_str())))?;
        Ok(Self {
            value_column: value_column.into(),
            rank_column: rank_column.into(),
            records,
        })
    }

    /// The records in stored order.
    pub fn records(&self) -> &[RankedRecord] {
        &self.records
    }

    /// Name of the ranked value column.
    pub fn value_column(&self) -> &str {
        &self.value_column
    }

    /// Name of the rank column.
    pub fn rank_column(&self) -> &str {
        &self.rank_column
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The rank of `asset` on `date`, including the [`UNRANKED`] sentinel.
    pub fn rank_of(&self, date: Date, asset: &str) -> Option<f64> {
        self.records
            .iter()
            .find(|r| r.date == date && r.asset == asset)
            .map(|r| r.rank)
    }
}

/// One row of the composite ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompositeRecord {
    /// Observation date.
    pub date: Date,
    /// Asset identifier.
    pub asset: Asset,
    /// Cross-sectional rank of the weighted rank sum.
    pub weighted_rank: f64,
}

/// Output of the weighted-rank aggregator, sorted by `(date, asset)`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CompositeTable {
    records: Vec<CompositeRecord>,
}

impl CompositeTable {
    /// Creates a composite table, checking that `(date, asset)` keys are unique.
    ///
    /// # Errors
    ///
    /// Returns [`RankwiseError::InvalidData`] on a duplicate key.
    pub fn new(records: Vec<CompositeRecord>) -> Result<Self> {
        ensure_unique_keys(records.iter().map(|r| (r.date, r.asset.as_str())))?;
        Ok(Self { records })
    }

    /// The records in stored order.
    pub fn records(&self) -> &[CompositeRecord] {
        &self.records
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The weighted rank of `asset` on `date`.
    pub fn get(&self, date: Date, asset: &str) -> Option<f64> {
        self.records
            .iter()
            .find(|r| r.date == date && r.asset == asset)
            .map(|r| r.weighted_rank)
    }
}

fn ensure_unique_keys<'a>(keys: impl Iterator<Item = (Date, &'a str)>) -> Result<()> {
    let mut seen = HashSet::new();
    for (date, asset) in keys {
        if !seen.insert((date, asset)) {
            return Err(RankwiseError::InvalidData(format!(
                "duplicate (date, asset) key ({date}, {asset})"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(day: u32) -> Date {
        Date::from_ymd_opt(2021, 1, day).unwrap()
    }

    fn assets(names: &[&str]) -> Vec<Asset> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_factor_table_new() {
        let table = FactorTable::new(
            vec![d(1), d(2)],
            assets(&["A", "B"]),
            vec![vec![Some(1.0), None], vec![Some(2.0), Some(f64::NAN)]],
        )
        .unwrap()
        .with_name("roe");

        assert_eq!(table.name(), Some("roe"));
        assert_eq!(table.height(), 2);
        assert_eq!(table.width(), 2);
        assert_eq!(table.value(d(2), "A"), Some(2.0));
        // NaN is normalised to missing
        assert_eq!(table.value(d(2), "B"), None);
        assert_eq!(table.column("A").unwrap(), vec![Some(1.0), Some(2.0)]);
    }

    #[test]
    fn test_factor_table_rejects_ragged_rows() {
        let result = FactorTable::new(
            vec![d(1)],
            assets(&["A", "B"]),
            vec![vec![Some(1.0)]],
        );
        assert!(matches!(result, Err(RankwiseError::InvalidData(_))));
    }

    #[test]
    fn test_factor_table_rejects_unordered_dates() {
        let result = FactorTable::new(
            vec![d(2), d(1)],
            assets(&["A"]),
            vec![vec![Some(1.0)], vec![Some(2.0)]],
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_factor_table_rejects_duplicate_assets() {
        let result = FactorTable::new(vec![d(1)], assets(&["A", "A"]), vec![vec![None, None]]);
        assert!(result.is_err());
    }

    #[test]
    fn test_long_table_rejects_duplicate_keys() {
        let record = LongFactorRecord {
            date: d(1),
            asset: "A".to_string(),
            factor: None,
            value: Some(1.0),
        };
        let result = LongFactorTable::new(vec![record.clone(), record]);
        assert!(matches!(result, Err(RankwiseError::InvalidData(_))));
    }

    #[test]
    fn test_long_table_dates() {
        let make = |day, asset: &str| LongFactorRecord {
            date: d(day),
            asset: asset.to_string(),
            factor: None,
            value: None,
        };
        let table = LongFactorTable::new(vec![make(2, "A"), make(1, "A"), make(2, "B")]).unwrap();
        assert_eq!(table.dates(), vec![d(1), d(2)]);
    }

    #[test]
    fn test_ranked_record_sentinel() {
        let record = RankedRecord {
            date: d(1),
            asset: "A".to_string(),
            factor: None,
            value: None,
            rank: UNRANKED,
        };
        assert!(!record.is_ranked());

        let table = RankedTable::new(vec![record], "value", "rank").unwrap();
        assert_eq!(table.rank_of(d(1), "A"), Some(0.0));
        assert_eq!(table.rank_of(d(1), "B"), None);
        assert_eq!(table.rank_column(), "rank");
    }
}
