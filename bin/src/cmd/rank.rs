//! Rank command implementation.

use std::path::Path;

use anyhow::{Context, Result};
use rankwise::{
    calendar::{melt, resample_optional},
    combine::{CrossSectionalRanker, RankOptions},
};
use tracing::info;

use crate::io;

/// Rank a wide factor CSV within each date and write the long result.
pub(crate) fn rank_factor(
    factor: &Path,
    calendar: Option<&Path>,
    negative: bool,
    name: Option<&str>,
    output: Option<&Path>,
) -> Result<()> {
    let mut table = io::read_factor_file(factor)
        .with_context(|| format!("loading factor {}", factor.display()))?;
    if let Some(name) = name {
        table = table.with_name(name);
    }

    let calendar = calendar
        .map(|path| {
            io::read_calendar_file(path)
                .with_context(|| format!("loading calendar {}", path.display()))
        })
        .transpose()?;

    let table = resample_optional(&table, calendar.as_ref())?;
    let ranker = CrossSectionalRanker::new(RankOptions::with_direction(!negative));
    let ranked = ranker.rank(&melt(&table)?)?;

    info!(
        factor = table.name().unwrap_or("<unnamed>"),
        records = ranked.len(),
        ranked = ranked.records().iter().filter(|r| r.is_ranked()).count(),
        "ranked factor"
    );

    io::write_ranked(io::output(output)?, &ranked)?;
    Ok(())
}
