use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use thiserror::Error;

use super::model::{Channel, Dataset, Record};

/// Header of the date column. Required.
pub const DATE_COLUMN: &str = "Date";

/// Format of the `Date` column: `DD/MM/YYYY`.
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// Raw value the source uses for "no reading available".
pub const MISSING_SENTINEL: f64 = -200.0;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("cannot open {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("header has no 'Date' column")]
    MissingDateColumn,
    #[error("line {line}: '{value}' is not a DD/MM/YYYY date")]
    InvalidDate { line: u64, value: String },
    #[error("line {line}, column {column}: '{value}' is not a number")]
    InvalidNumber {
        line: u64,
        column: Channel,
        value: String,
    },
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load and clean the air-quality file at `path`.
pub fn load_file(path: &Path) -> Result<Dataset, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let dataset = load_reader(file)?;

    match dataset.year_range() {
        Some((first, last)) => log::info!(
            "Loaded {} records from {} (years {first}–{last})",
            dataset.len(),
            path.display()
        ),
        None => log::warn!("{} contains no records", path.display()),
    }
    Ok(dataset)
}

/// Parse semicolon-delimited air-quality data from any reader.
///
/// Layout: a header row containing `Date` and any subset of the channel
/// columns; other columns (`Time`, trailing unnamed ones) are ignored.
/// * `-200` in a channel column becomes a missing reading
/// * empty channel cells are missing readings
/// * decimal commas are accepted (`2,6`)
/// * rows with every cell empty are skipped
///
/// The first malformed date or number aborts the whole load.
pub fn load_reader<R: Read>(reader: R) -> Result<Dataset, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b';')
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    let date_idx = headers
        .iter()
        .position(|h| h == DATE_COLUMN)
        .ok_or(LoadError::MissingDateColumn)?;

    let columns: Vec<(Channel, usize)> = Channel::ALL
        .into_iter()
        .filter_map(|ch| match headers.iter().position(|h| h == ch.column_name()) {
            Some(idx) => Some((ch, idx)),
            None => {
                log::warn!("column '{ch}' not found, its readings will all be missing");
                None
            }
        })
        .collect();

    let mut records = Vec::new();
    let mut padding_rows = 0usize;

    for result in reader.records() {
        let row = result?;
        let line = row.position().map_or(0, |p| p.line());

        if row.iter().all(str::is_empty) {
            padding_rows += 1;
            continue;
        }

        let raw_date = row.get(date_idx).unwrap_or("");
        let date = parse_date(raw_date).ok_or_else(|| LoadError::InvalidDate {
            line,
            value: raw_date.to_string(),
        })?;

        let mut values = [None; Channel::COUNT];
        for &(channel, idx) in &columns {
            let raw = row.get(idx).unwrap_or("");
            values[channel.index()] =
                parse_reading(raw).ok_or_else(|| LoadError::InvalidNumber {
                    line,
                    column: channel,
                    value: raw.to_string(),
                })?;
        }

        records.push(Record { date, values });
    }

    if padding_rows > 0 {
        log::debug!("skipped {padding_rows} empty rows");
    }

    Ok(Dataset::from_records(records))
}

// ---------------------------------------------------------------------------
// Cell parsing
// ---------------------------------------------------------------------------

fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, DATE_FORMAT).ok()
}

/// `None` for an unparseable cell, `Some(None)` for a missing reading.
fn parse_reading(s: &str) -> Option<Option<f64>> {
    if s.is_empty() {
        return Some(None);
    }
    let v = s.replace(',', ".").parse::<f64>().ok()?;
    if !v.is_finite() {
        return None;
    }
    if v == MISSING_SENTINEL {
        Some(None)
    } else {
        Some(Some(v))
    }
}
