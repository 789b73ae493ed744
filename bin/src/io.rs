//! CSV input and output for the rankwise CLI.
//!
//! Wide factor files have a `date` first column followed by one column per
//! asset. Calendar files have a single `date` column. Empty cells and `NaN`
//! are read as missing.

use std::{
    env,
    fs::File,
    io::{self, Read, Write},
    path::{Path, PathBuf},
};

use rankwise::{
    CompositeTable, FactorSource, FactorTable, RankedTable, RankwiseError, Result,
    TradingCalendar,
    traits::{DATE_FORMAT, parse_date},
};
use serde::Serialize;
use tracing::debug;

/// Environment variable naming the default factor directory.
pub(crate) const DATA_DIR_ENV: &str = "RANKWISE_DATA_DIR";

fn csv_error(context: &str, e: csv::Error) -> RankwiseError {
    RankwiseError::InvalidData(format!("{context}: {e}"))
}

fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| RankwiseError::Other(format!("opening {}: {e}", path.display())))
}

fn parse_cell(cell: &str) -> std::result::Result<Option<f64>, std::num::ParseFloatError> {
    let cell = cell.trim();
    if cell.is_empty() || cell.eq_ignore_ascii_case("nan") {
        return Ok(None);
    }
    cell.parse().map(Some)
}

/// Reads a wide factor table.
pub(crate) fn read_factor_table<R: Read>(reader: R) -> Result<FactorTable> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| csv_error("reading header", e))?
        .clone();
    if headers.get(0) != Some("date") {
        return Err(RankwiseError::MissingColumn("date".to_string()));
    }
    let assets: Vec<String> = headers.iter().skip(1).map(str::to_string).collect();

    let mut dates = Vec::new();
    let mut values = Vec::new();
    for (idx, record) in reader.records().enumerate() {
        let line = idx + 2;
        let record = record.map_err(|e| csv_error(&format!("line {line}"), e))?;

        dates.push(parse_date(record.get(0).unwrap_or_default())?);
        let row = record
            .iter()
            .skip(1)
            .enumerate()
            .map(|(col, cell)| {
                parse_cell(cell).map_err(|e| {
                    RankwiseError::InvalidData(format!(
                        "line {line}, column '{}': {e}",
                        assets.get(col).map_or("?", String::as_str)
                    ))
                })
            })
            .collect::<Result<Vec<_>>>()?;
        values.push(row);
    }

    debug!(rows = dates.len(), assets = assets.len(), "read factor csv");
    FactorTable::new(dates, assets, values)
}

/// Reads a wide factor table from a file, naming it after the file stem.
pub(crate) fn read_factor_file(path: &Path) -> Result<FactorTable> {
    let mut table = read_factor_table(open(path)?)?;
    if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
        table = table.with_name(stem);
    }
    Ok(table)
}

/// Reads a trading calendar from the `date` column.
pub(crate) fn read_calendar<R: Read>(reader: R) -> Result<TradingCalendar> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| csv_error("reading header", e))?
        .clone();
    let col = headers
        .iter()
        .position(|h| h == "date")
        .ok_or_else(|| RankwiseError::MissingColumn("date".to_string()))?;

    let dates = reader
        .records()
        .map(|record| {
            let record = record.map_err(|e| csv_error("reading calendar", e))?;
            parse_date(record.get(col).unwrap_or_default())
        })
        .collect::<Result<Vec<_>>>()?;

    TradingCalendar::from_unsorted(dates)
}

/// Reads a trading calendar file.
pub(crate) fn read_calendar_file(path: &Path) -> Result<TradingCalendar> {
    read_calendar(open(path)?)
}

/// Writes a wide factor table.
pub(crate) fn write_factor_table<W: Write>(writer: W, table: &FactorTable) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(std::iter::once("date").chain(table.assets().iter().map(String::as_str)))
        .map_err(|e| csv_error("writing header", e))?;

    for (date, row) in table.dates().iter().zip(table.rows()) {
        let cells = std::iter::once(date.format(DATE_FORMAT).to_string()).chain(
            row.iter()
                .map(|v| v.map(|x| x.to_string()).unwrap_or_default()),
        );
        wtr.write_record(cells)
            .map_err(|e| csv_error("writing row", e))?;
    }
    wtr.flush()
        .map_err(|e| RankwiseError::Other(format!("flushing output: {e}")))
}

/// Writes ranked records as `date,asset,factor,value,rank`.
pub(crate) fn write_ranked<W: Write>(writer: W, table: &RankedTable) -> Result<()> {
    write_records(writer, table.records())
}

/// Writes composite records as `date,asset,weighted_rank`.
pub(crate) fn write_composite<W: Write>(writer: W, table: &CompositeTable) -> Result<()> {
    write_records(writer, table.records())
}

#[derive(Debug, Serialize)]
struct SweepRow<'a> {
    factors: String,
    date: String,
    asset: &'a str,
    weighted_rank: f64,
}

/// Writes every subset's composite with a leading `factors` column.
pub(crate) fn write_sweep<W: Write>(
    writer: W,
    results: &[(Vec<String>, CompositeTable)],
) -> Result<()> {
    let rows = results.iter().flat_map(|(subset, composite)| {
        let factors = subset.join("+");
        composite.records().iter().map(move |r| SweepRow {
            factors: factors.clone(),
            date: r.date.format(DATE_FORMAT).to_string(),
            asset: &r.asset,
            weighted_rank: r.weighted_rank,
        })
    });
    write_records(writer, rows)
}

fn write_records<W, T, I>(writer: W, records: I) -> Result<()>
where
    W: Write,
    T: Serialize,
    I: IntoIterator<Item = T>,
{
    let mut wtr = csv::Writer::from_writer(writer);
    for record in records {
        wtr.serialize(record)
            .map_err(|e| csv_error("writing record", e))?;
    }
    wtr.flush()
        .map_err(|e| RankwiseError::Other(format!("flushing output: {e}")))
}

/// Opens `path` for writing, or stdout when no path is given.
pub(crate) fn output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    match path {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                RankwiseError::Other(format!("creating {}: {e}", path.display()))
            })?;
            Ok(Box::new(io::BufWriter::new(file)))
        }
        None => Ok(Box::new(io::stdout().lock())),
    }
}

/// A [`FactorSource`] reading `<dir>/<factor>.csv`.
#[derive(Debug, Clone)]
pub(crate) struct CsvDirectorySource {
    dir: PathBuf,
}

impl CsvDirectorySource {
    pub(crate) fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Uses the directory from [`DATA_DIR_ENV`], loading `.env` first.
    pub(crate) fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv();

        let dir = env::var(DATA_DIR_ENV).map_err(|_| {
            RankwiseError::Configuration(format!(
                "no --data-dir given and {DATA_DIR_ENV} is not set"
            ))
        })?;
        Ok(Self::new(dir))
    }

    pub(crate) fn path_for(&self, factor: &str) -> PathBuf {
        self.dir.join(format!("{factor}.csv"))
    }
}

impl FactorSource for CsvDirectorySource {
    fn factor_table(&self, factor: &str) -> Result<FactorTable> {
        let path = self.path_for(factor);
        if !path.is_file() {
            return Err(RankwiseError::FactorNotFound(format!(
                "{factor} (expected {})",
                path.display()
            )));
        }
        Ok(read_factor_table(open(&path)?)?.with_name(factor))
    }
}
