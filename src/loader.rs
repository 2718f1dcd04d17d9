// 📂 Data Loader - CSV tables → in-memory relations
//
// Columns are located by header name, so column order is free and extra
// columns (county codes, plan ids, ...) are ignored. Every failure is fatal:
// the plan catalog is what the answer is computed from, so rows are never
// silently skipped.

use crate::error::{LoadError, Result};
use crate::model::{Plan, TargetSchema, TargetTable, TargetZip, ZipEntry};
use csv::{ReaderBuilder, StringRecord};
use rust_decimal::Decimal;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

// ============================================================================
// INPUT SET
// ============================================================================

/// Paths of the three input tables
#[derive(Debug, Clone)]
pub struct InputPaths {
    pub plans: PathBuf,
    pub zips: PathBuf,
    pub slcsp: PathBuf,
}

/// The three relations the pipeline runs on
#[derive(Debug, Clone, Default)]
pub struct Inputs {
    pub plans: Vec<Plan>,
    pub zips: Vec<ZipEntry>,
    pub targets: Vec<TargetZip>,
    pub target_schema: TargetSchema,
}

/// Load all three tables, failing on the first problem.
pub fn load_inputs(paths: &InputPaths) -> Result<Inputs> {
    let plans = load_plans(&paths.plans)?;
    let zips = load_zips(&paths.zips)?;
    let TargetTable {
        schema: target_schema,
        rows: targets,
    } = load_targets(&paths.slcsp)?;

    debug!(
        plans = plans.len(),
        zips = zips.len(),
        targets = targets.len(),
        "loaded input tables"
    );

    Ok(Inputs {
        plans,
        zips,
        targets,
        target_schema,
    })
}

// ============================================================================
// FILE ENTRY POINTS
// ============================================================================

pub fn load_plans(path: &Path) -> Result<Vec<Plan>> {
    plans_from_reader(open(path)?, &path.display().to_string())
}

pub fn load_zips(path: &Path) -> Result<Vec<ZipEntry>> {
    zips_from_reader(open(path)?, &path.display().to_string())
}

pub fn load_targets(path: &Path) -> Result<TargetTable> {
    targets_from_reader(open(path)?, &path.display().to_string())
}

fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|source| match source.kind() {
        std::io::ErrorKind::NotFound => LoadError::FileNotFound {
            path: path.to_path_buf(),
        },
        _ => LoadError::Unreadable {
            path: path.to_path_buf(),
            source,
        },
    })
}

// ============================================================================
// READER ENTRY POINTS
// ============================================================================

/// Parse a plan catalog: `state, rate_area, metal_level, rate` (plus anything else).
pub fn plans_from_reader<R: Read>(reader: R, source_name: &str) -> Result<Vec<Plan>> {
    let mut table = Table::new(reader, source_name)?;
    let state = table.column("state")?;
    let rate_area = table.column("rate_area")?;
    let metal_level = table.column("metal_level")?;
    let rate = table.column("rate")?;

    let mut plans = Vec::new();
    while let Some(row) = table.next_row()? {
        plans.push(Plan {
            state: table.text(&row, &state)?,
            rate_area: table.rate_area(&row, &rate_area)?,
            // Untrimmed: the Silver match is exact
            metal_level: table.untrimmed(&row, &metal_level).to_string(),
            rate: table.decimal(&row, &rate)?,
        });
    }

    Ok(plans)
}

/// Parse the ZIP mapping: `zipcode, state, rate_area` (plus anything else).
pub fn zips_from_reader<R: Read>(reader: R, source_name: &str) -> Result<Vec<ZipEntry>> {
    let mut table = Table::new(reader, source_name)?;
    let zipcode = table.column("zipcode")?;
    let state = table.column("state")?;
    let rate_area = table.column("rate_area")?;

    let mut zips = Vec::new();
    while let Some(row) = table.next_row()? {
        zips.push(ZipEntry {
            zipcode: table.text(&row, &zipcode)?,
            state: table.text(&row, &state)?,
            rate_area: table.rate_area(&row, &rate_area)?,
        });
    }

    Ok(zips)
}

/// Parse the target list. Only `zipcode` is required; an incoming `rate`
/// column is expected to be blank and its values are ignored. The header and
/// every row's fields are kept so output can reproduce the table.
pub fn targets_from_reader<R: Read>(reader: R, source_name: &str) -> Result<TargetTable> {
    let mut table = Table::new(reader, source_name)?;
    let zipcode = table.column("zipcode")?;
    let schema = TargetSchema {
        columns: table.headers.iter().map(str::to_string).collect(),
        zipcode_column: zipcode.index,
        rate_column: table.column("rate").ok().map(|c| c.index),
    };

    let mut rows = Vec::new();
    while let Some(row) = table.next_row()? {
        rows.push(TargetZip {
            zipcode: table.text(&row, &zipcode)?,
            rate: None,
            fields: row.iter().map(str::to_string).collect(),
        });
    }

    Ok(TargetTable { schema, rows })
}

// ============================================================================
// TABLE HELPER
// ============================================================================

/// Header-indexed CSV reader that turns field problems into `LoadError`s
struct Table<R: Read> {
    reader: csv::Reader<R>,
    headers: StringRecord,
    source_name: String,
    rows_read: u64,
}

impl<R: Read> Table<R> {
    fn new(reader: R, source_name: &str) -> Result<Self> {
        let mut reader = ReaderBuilder::new().has_headers(true).from_reader(reader);
        let headers = reader
            .headers()
            .map_err(|source| LoadError::Csv {
                source_name: source_name.to_string(),
                source,
            })?
            .clone();

        Ok(Table {
            reader,
            headers,
            source_name: source_name.to_string(),
            rows_read: 0,
        })
    }

    fn column(&self, name: &str) -> Result<Column> {
        self.headers
            .iter()
            .position(|h| h.trim() == name)
            .map(|index| Column { name: name.to_string(), index })
            .ok_or_else(|| LoadError::MissingColumn {
                source_name: self.source_name.clone(),
                column: name.to_string(),
            })
    }

    fn next_row(&mut self) -> Result<Option<StringRecord>> {
        let mut record = StringRecord::new();
        let more = self
            .reader
            .read_record(&mut record)
            .map_err(|source| LoadError::Csv {
                source_name: self.source_name.clone(),
                source,
            })?;
        if !more {
            return Ok(None);
        }
        self.rows_read += 1;
        Ok(Some(record))
    }

    /// 1-based file line of a record; header is line 1
    fn line(&self, row: &StringRecord) -> u64 {
        row.position()
            .map(|p| p.line())
            .unwrap_or(self.rows_read + 1)
    }

    fn untrimmed<'a>(&self, row: &'a StringRecord, column: &Column) -> &'a str {
        row.get(column.index).unwrap_or("")
    }

    fn raw<'a>(&self, row: &'a StringRecord, column: &Column) -> &'a str {
        self.untrimmed(row, column).trim()
    }

    fn malformed(&self, row: &StringRecord, column: &Column, reason: &str) -> LoadError {
        LoadError::MalformedField {
            source_name: self.source_name.clone(),
            line: self.line(row),
            column: column.name.clone(),
            value: self.raw(row, column).to_string(),
            reason: reason.to_string(),
        }
    }

    /// Non-empty text field
    fn text(&self, row: &StringRecord, column: &Column) -> Result<String> {
        let value = self.raw(row, column);
        if value.is_empty() {
            return Err(self.malformed(row, column, "empty value"));
        }
        Ok(value.to_string())
    }

    fn rate_area(&self, row: &StringRecord, column: &Column) -> Result<u32> {
        self.raw(row, column)
            .parse::<u32>()
            .map_err(|e| self.malformed(row, column, &e.to_string()))
    }

    fn decimal(&self, row: &StringRecord, column: &Column) -> Result<Decimal> {
        let value = self.raw(row, column);
        Decimal::from_str(value)
            .or_else(|_| Decimal::from_scientific(value))
            .map_err(|e| self.malformed(row, column, &e.to_string()))
    }
}

struct Column {
    name: String,
    index: usize,
}
