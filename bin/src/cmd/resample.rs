//! Resample command implementation.

use std::path::Path;

use anyhow::{Context, Result};
use rankwise::calendar::resample;
use tracing::info;

use crate::io;

/// Forward-fill a wide factor CSV onto a trading calendar.
pub(crate) fn resample_factor(factor: &Path, calendar: &Path, output: Option<&Path>) -> Result<()> {
    let table = io::read_factor_file(factor)
        .with_context(|| format!("loading factor {}", factor.display()))?;
    let calendar = io::read_calendar_file(calendar)
        .with_context(|| format!("loading calendar {}", calendar.display()))?;

    let resampled = resample(&table, &calendar)?;
    info!(
        from_rows = table.height(),
        to_rows = resampled.height(),
        assets = resampled.width(),
        "resampled factor"
    );

    io::write_factor_table(io::output(output)?, &resampled)?;
    Ok(())
}
