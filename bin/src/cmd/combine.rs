//! Combine command implementation.

use std::path::Path;

use anyhow::{Context, Result};
use rankwise::{FactorPipeline, PipelineConfig, TradingCalendar};

use crate::io::{self, CsvDirectorySource};

/// Load the pipeline config, factor directory, and optional calendar shared
/// by `combine` and `sweep`.
pub(crate) fn prepare(
    config: &Path,
    data_dir: Option<&Path>,
    calendar: Option<&Path>,
) -> Result<(FactorPipeline, CsvDirectorySource, Option<TradingCalendar>)> {
    let config = PipelineConfig::from_path(config)
        .with_context(|| format!("loading config {}", config.display()))?;
    let pipeline = FactorPipeline::new(config)?;

    let source = match data_dir {
        Some(dir) => CsvDirectorySource::new(dir),
        None => CsvDirectorySource::from_env()?,
    };

    let calendar = calendar
        .map(|path| {
            io::read_calendar_file(path)
                .with_context(|| format!("loading calendar {}", path.display()))
        })
        .transpose()?;

    Ok((pipeline, source, calendar))
}

/// Rank every configured factor and write the weighted composite.
pub(crate) fn combine_factors(
    config: &Path,
    data_dir: Option<&Path>,
    calendar: Option<&Path>,
    output: Option<&Path>,
) -> Result<()> {
    let (pipeline, source, calendar) = prepare(config, data_dir, calendar)?;
    let composite = pipeline.run(&source, calendar.as_ref())?;
    io::write_composite(io::output(output)?, &composite)?;
    Ok(())
}
