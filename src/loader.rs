//! Reads schedule files into ordered [`ScheduleRecord`]s.
//!
//! The first row is the header. Whitespace around every field is stripped.
//! `season`, `week` and `is_main_slate` are normalized to typed values here,
//! so both dataset backends start from the same rows; every other column is
//! kept as text.

use crate::error::{DatasetError, DatasetResult};
use crate::record::{
    AWAY_TEAM, HOME_TEAM, IS_MAIN_SLATE, REQUIRED_COLUMNS, SEASON, ScheduleRecord, WEEK,
};
use csv::{ReaderBuilder, StringRecord, Trim};
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use tracing::debug;

/// Rows of a schedule file together with its header, in file order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedTable {
    pub columns: Vec<String>,
    pub records: Vec<ScheduleRecord>,
}

impl LoadedTable {
    /// Header columns that are not one of the required five.
    pub fn extra_columns(&self) -> impl Iterator<Item = &str> {
        self.columns
            .iter()
            .map(String::as_str)
            .filter(|name| !REQUIRED_COLUMNS.contains(name))
    }
}

pub fn load<P: AsRef<Path>>(path: P) -> DatasetResult<Vec<ScheduleRecord>> {
    Ok(load_table(path)?.records)
}

pub fn load_table<P: AsRef<Path>>(path: P) -> DatasetResult<LoadedTable> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|err| match err.kind() {
        io::ErrorKind::NotFound => DatasetError::NotFound {
            path: path.to_path_buf(),
        },
        _ => DatasetError::Io(err),
    })?;
    let table = read_table(file)?;
    debug!(path = %path.display(), rows = table.records.len(), "read schedule file");
    Ok(table)
}

pub fn read_table<R: Read>(source: R) -> DatasetResult<LoadedTable> {
    let mut reader = ReaderBuilder::new().trim(Trim::All).from_reader(source);
    let columns: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    let layout = ColumnLayout::resolve(&columns)?;

    let mut records = Vec::new();
    for (idx, row) in reader.records().enumerate() {
        records.push(layout.record_from_row(&columns, &row?, idx + 1)?);
    }
    Ok(LoadedTable { columns, records })
}

struct ColumnLayout {
    season: usize,
    week: usize,
    home_team: usize,
    away_team: usize,
    is_main_slate: usize,
}

impl ColumnLayout {
    fn resolve(columns: &[String]) -> DatasetResult<Self> {
        let position = |name: &str| {
            columns
                .iter()
                .position(|column| column == name)
                .ok_or_else(|| DatasetError::MissingColumn(name.to_string()))
        };
        Ok(Self {
            season: position(SEASON)?,
            week: position(WEEK)?,
            home_team: position(HOME_TEAM)?,
            away_team: position(AWAY_TEAM)?,
            is_main_slate: position(IS_MAIN_SLATE)?,
        })
    }

    fn record_from_row(
        &self,
        columns: &[String],
        row: &StringRecord,
        row_number: usize,
    ) -> DatasetResult<ScheduleRecord> {
        let field = |idx: usize| row.get(idx).unwrap_or("");

        let mut record = ScheduleRecord::new(
            parse_i32(field(self.season), row_number, SEASON)?,
            parse_i32(field(self.week), row_number, WEEK)?,
            field(self.home_team),
            field(self.away_team),
            parse_bool(field(self.is_main_slate), row_number, IS_MAIN_SLATE)?,
        );
        for (idx, name) in columns.iter().enumerate() {
            if !REQUIRED_COLUMNS.contains(&name.as_str()) {
                record.set_extra(name.as_str(), field(idx));
            }
        }
        Ok(record)
    }
}

fn invalid(row: usize, column: &str, value: &str) -> DatasetError {
    DatasetError::InvalidValue {
        row,
        column: column.to_string(),
        value: value.to_string(),
    }
}

fn parse_i32(input: &str, row: usize, column: &str) -> DatasetResult<i32> {
    if let Ok(value) = input.parse::<i32>() {
        return Ok(value);
    }
    // Tabular exports sometimes write integer columns as floats ("2020.0").
    match input.parse::<f64>() {
        Ok(value) if value.fract() == 0.0 && value.abs() <= f64::from(i32::MAX) => {
            Ok(value as i32)
        }
        _ => Err(invalid(row, column, input)),
    }
}

fn parse_bool(input: &str, row: usize, column: &str) -> DatasetResult<bool> {
    match input.to_ascii_lowercase().as_str() {
        "true" | "t" | "yes" | "y" | "1" | "1.0" => Ok(true),
        "false" | "f" | "no" | "n" | "0" | "0.0" => Ok(false),
        _ => Err(invalid(row, column, input)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_bool_accepts_common_spellings() {
        for raw in ["True", "TRUE", "1", "yes", "t"] {
            assert!(parse_bool(raw, 1, IS_MAIN_SLATE).unwrap());
        }
        for raw in ["False", "false", "0", "no", "F"] {
            assert!(!parse_bool(raw, 1, IS_MAIN_SLATE).unwrap());
        }
        assert!(parse_bool("maybe", 1, IS_MAIN_SLATE).is_err());
    }

    #[test]
    fn parse_i32_accepts_integral_floats_only() {
        assert_eq!(parse_i32("2020", 1, SEASON).unwrap(), 2020);
        assert_eq!(parse_i32("2020.0", 1, SEASON).unwrap(), 2020);
        assert!(parse_i32("2020.5", 1, SEASON).is_err());
        assert!(parse_i32("", 1, SEASON).is_err());
    }
}
