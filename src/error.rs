use chrono::NaiveDate;
use polars::prelude::PolarsError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CalendarError {
    #[error("could not parse '{input}' as a date")]
    Parse { input: String },

    #[error("no season start recorded for season {0}")]
    UnknownSeason(i32),

    #[error("season {season} start {start} must fall after the previous season start {previous}")]
    NonMonotonicStart {
        season: i32,
        start: NaiveDate,
        previous: NaiveDate,
    },
}

pub type CalendarResult<T> = Result<T, CalendarError>;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("schedule file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("io error: {0}")]
    Io(#[from] io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("dataframe error: {0}")]
    DataFrame(#[from] PolarsError),

    #[error("schedule file is missing required column '{0}'")]
    MissingColumn(String),

    #[error("row {row}: invalid value '{value}' in column '{column}'")]
    InvalidValue {
        row: usize,
        column: String,
        value: String,
    },
}

pub type DatasetResult<T> = Result<T, DatasetError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),

    #[error("invalid config json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown dataset backend '{0}' (expected 'frame' or 'records')")]
    InvalidBackend(String),
}

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error(transparent)]
    Calendar(#[from] CalendarError),

    #[error(transparent)]
    Dataset(#[from] DatasetError),
}

pub type ScheduleResult<T> = Result<T, ScheduleError>;
