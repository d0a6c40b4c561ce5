use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use tracing::{debug, info, warn};

use crate::error::{HostbookError, Result};
use crate::models::{Booking, RawTable};
use crate::schema::{Column, ALL_COLUMNS};
use crate::store::{Master, MasterStore};

// ---------------------------------------------------------------------------
// Reading
// ---------------------------------------------------------------------------

pub fn read_table(file_path: &Path) -> Result<RawTable> {
    let file = std::fs::File::open(file_path)?;
    read_table_from(std::io::BufReader::new(file))
}

pub fn read_table_from<R: Read>(reader: R) -> Result<RawTable> {
    let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers = decode_record(rdr.byte_headers()?);
    let mut rows = Vec::new();
    for (line, result) in rdr.byte_records().enumerate() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                warn!(line = line + 2, error = %e, "skipping unreadable row");
                continue;
            }
        };
        rows.push(decode_record(&record));
    }
    Ok(RawTable { headers, rows })
}

// Exports are not always UTF-8 (Latin-1 guest names). Invalid bytes become
// U+FFFD so the row survives and only the affected cell may fail to parse.
fn decode_record(record: &csv::ByteRecord) -> Vec<String> {
    record
        .iter()
        .map(|field| String::from_utf8_lossy(field).into_owned())
        .collect()
}

// ---------------------------------------------------------------------------
// Normalizer & validator
// ---------------------------------------------------------------------------

/// Rename the first header matching each column's aliases to its canonical
/// name. Headers that match nothing are left as they are.
pub fn normalize_columns(mut table: RawTable) -> RawTable {
    for column in ALL_COLUMNS {
        let target = column.aliases().iter().find_map(|alias| {
            let alias = alias.to_lowercase();
            table
                .headers
                .iter()
                .position(|h| h.trim().to_lowercase() == alias)
        });
        if let Some(idx) = target {
            if table.headers[idx] != column.canonical_name() {
                debug!(from = %table.headers[idx], to = column.canonical_name(), "renamed header");
            }
            table.headers[idx] = column.canonical_name().to_string();
        }
    }
    table
}

/// Canonical columns absent from a normalized table. Empty means valid.
pub fn missing_columns(table: &RawTable) -> Vec<Column> {
    ALL_COLUMNS
        .iter()
        .filter(|c| table.column_index(c.canonical_name()).is_none())
        .copied()
        .collect()
}

// ---------------------------------------------------------------------------
// Type coercer
// ---------------------------------------------------------------------------

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%b %d, %Y", "%B %d, %Y"];
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|f| NaiveDate::parse_from_str(raw, f).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|f| NaiveDateTime::parse_from_str(raw, f).ok())
                .map(|dt| dt.date())
        })
}

pub fn parse_amount(raw: &str) -> Option<f64> {
    let s: String = raw
        .chars()
        .filter(|c| !matches!(c, ',' | '"' | '$' | '€' | '£') && !c.is_whitespace())
        .collect();
    if s.is_empty() {
        return None;
    }
    let value = match s.strip_prefix('(').and_then(|v| v.strip_suffix(')')) {
        Some(inner) => -inner.parse::<f64>().ok()?,
        None => s.parse::<f64>().ok()?,
    };
    value.is_finite().then_some(value)
}

fn value<'a>(table: &'a RawTable, row: usize, column: Column) -> Option<&'a str> {
    let raw = table.cell(row, column.canonical_name())?.trim();
    (!raw.is_empty()).then_some(raw)
}

/// Type every row of a normalized table. Columns the table lacks, and values
/// that do not parse, become `None`. Running this over its own rendered output
/// yields the same bookings.
pub fn coerce(table: &RawTable) -> Vec<Booking> {
    let mut nulled = 0usize;
    let mut bookings = Vec::with_capacity(table.len());
    for row in 0..table.len() {
        let mut date = |column: Column| {
            let parsed = value(table, row, column).map(parse_date)?;
            if parsed.is_none() {
                nulled += 1;
            }
            parsed
        };
        let reservation_date = date(Column::ReservationDate);
        let arrival_date = date(Column::ArrivalDate);
        let departure_date = date(Column::DepartureDate);

        let gross_revenue = match value(table, row, Column::GrossRevenue).map(parse_amount) {
            Some(None) => {
                nulled += 1;
                None
            }
            parsed => parsed.flatten(),
        };
        let confirmation_code = value(table, row, Column::ConfirmationCode).map(str::to_string);

        bookings.push(Booking {
            reservation_date,
            arrival_date,
            departure_date,
            gross_revenue,
            confirmation_code,
        });
    }
    if nulled > 0 {
        warn!(values = nulled, "unparseable dates or amounts coerced to null");
    }
    bookings
}

// ---------------------------------------------------------------------------
// Deduplicator
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct Partition {
    /// Codes already in the master table.
    pub duplicates: Vec<Booking>,
    /// Later rows of a code that appears more than once in this batch.
    pub repeats: Vec<Booking>,
    pub unique: Vec<Booking>,
}

/// Split a batch into bookings already known (by confirmation code), repeats
/// of a code seen earlier in the same batch, and new ones. Rows without a
/// code never match and are always new.
pub fn partition(batch: Vec<Booking>, known: &HashSet<String>) -> Partition {
    let mut seen: HashSet<String> = HashSet::new();
    let mut out = Partition::default();
    for booking in batch {
        let (known_code, repeated) = match booking.code() {
            Some(code) if known.contains(code) => (true, false),
            Some(code) => (false, !seen.insert(code.to_string())),
            None => (false, false),
        };
        if known_code {
            out.duplicates.push(booking);
        } else if repeated {
            out.repeats.push(booking);
        } else {
            out.unique.push(booking);
        }
    }
    out
}

// ---------------------------------------------------------------------------
// ingest
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct ImportResult {
    pub duplicates: Vec<Booking>,
    pub repeats: Vec<Booking>,
    pub added: Vec<Booking>,
    pub persisted: bool,
}

/// Normalize, validate, type and deduplicate `table`, then append the new
/// bookings to the master table. A table missing any canonical column is
/// rejected before the master is touched.
pub fn ingest<S: MasterStore>(
    master: &mut Master<S>,
    table: RawTable,
    dry_run: bool,
) -> Result<ImportResult> {
    let table = normalize_columns(table);
    let missing = missing_columns(&table);
    if !missing.is_empty() {
        warn!(?missing, "upload rejected");
        return Err(HostbookError::MissingColumns(missing));
    }

    let batch = coerce(&table);
    let Partition {
        duplicates,
        repeats,
        unique,
    } = partition(batch, &master.codes());

    let persisted = !dry_run && !unique.is_empty();
    if persisted {
        master.append_and_persist(unique.clone())?;
    }
    info!(
        duplicates = duplicates.len(),
        repeats = repeats.len(),
        added = unique.len(),
        persisted,
        master = master.len(),
        "ingested batch"
    );

    Ok(ImportResult {
        duplicates,
        repeats,
        added: unique,
        persisted,
    })
}

pub fn import_file<S: MasterStore>(
    master: &mut Master<S>,
    file_path: &Path,
    dry_run: bool,
) -> Result<ImportResult> {
    let table = read_table(file_path)?;
    if table.is_empty() {
        warn!(file = %file_path.display(), "export has no booking rows");
    }
    info!(file = %file_path.display(), rows = table.len(), "read export");
    ingest(master, table, dry_run)
}
