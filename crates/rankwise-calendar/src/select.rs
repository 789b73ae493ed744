//! Restricting a factor table to an asset universe.

use std::collections::HashSet;

use rankwise_traits::{FactorTable, Result};
use tracing::warn;

/// How many missing asset names are listed in the warning.
const MAX_LISTED: usize = 20;

/// Reorders and restricts the columns of `table` to `assets`.
///
/// Names are compared after trimming whitespace, and repeated requests are
/// collapsed. Requested assets that the table does not have become
/// all-missing columns, and a warning lists them.
///
/// # Errors
///
/// Only propagates table construction errors, which cannot occur for a
/// well-formed input table.
pub fn select_assets<S: AsRef<str>>(table: &FactorTable, assets: &[S]) -> Result<FactorTable> {
    let mut seen = HashSet::with_capacity(assets.len());
    let wanted: Vec<String> = assets
        .iter()
        .map(|a| a.as_ref().trim().to_string())
        .filter(|a| seen.insert(a.clone()))
        .collect();

    let positions: Vec<Option<usize>> = wanted
        .iter()
        .map(|asset| table.assets().iter().position(|a| a.trim() == asset))
        .collect();

    let missing: Vec<&str> = wanted
        .iter()
        .zip(&positions)
        .filter(|(_, pos)| pos.is_none())
        .map(|(asset, _)| asset.as_str())
        .collect();
    if !missing.is_empty() {
        let mut listed = missing
            .iter()
            .take(MAX_LISTED)
            .copied()
            .collect::<Vec<_>>()
            .join(", ");
        if missing.len() > MAX_LISTED {
            listed.push_str(", ...");
        }
        warn!(
            factor = table.name().unwrap_or("<unnamed>"),
            count = missing.len(),
            "assets not found in factor table: {listed}"
        );
    }

    let values = table
        .rows()
        .iter()
        .map(|row| positions.iter().map(|pos| pos.and_then(|p| row[p])).collect())
        .collect();

    let mut selected = FactorTable::new(table.dates().to_vec(), wanted, values)?;
    if let Some(name) = table.name() {
        selected = selected.with_name(name);
    }
    Ok(selected)
}
