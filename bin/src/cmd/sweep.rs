//! Sweep command implementation.

use std::path::Path;

use anyhow::Result;

use crate::{cmd::combine::prepare, io};

/// Write an equal-weight composite for every `k`-factor subset.
pub(crate) fn sweep_factors(
    config: &Path,
    k: usize,
    data_dir: Option<&Path>,
    calendar: Option<&Path>,
    output: Option<&Path>,
) -> Result<()> {
    let (pipeline, source, calendar) = prepare(config, data_dir, calendar)?;
    let results = pipeline.sweep(&source, calendar.as_ref(), k)?;
    io::write_sweep(io::output(output)?, &results)?;
    Ok(())
}
