//! The loaded schedule table behind one interface, with two interchangeable
//! backends: a polars [`DataFrame`](polars::prelude::DataFrame) and a plain
//! list of records.

use crate::error::{ConfigError, DatasetResult};
use crate::loader::{self, LoadedTable};
use crate::query::ScheduleQuery;
use crate::record::ScheduleRecord;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;
use tracing::info;

pub mod frame;
pub mod records;

pub use frame::FrameDataset;
pub use records::RecordDataset;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Columnar table with expression-based filtering.
    #[default]
    Frame,
    /// Ordered record list filtered by plain iteration.
    Records,
}

impl Backend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Backend::Frame => "frame",
            Backend::Records => "records",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Backend {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "frame" | "dataframe" | "polars" => Ok(Backend::Frame),
            "records" | "record" | "list" => Ok(Backend::Records),
            other => Err(ConfigError::InvalidBackend(other.to_string())),
        }
    }
}

/// A read-only view over schedule rows in load order.
///
/// Filtering always returns a new view of the same backend; rows keep their
/// original relative order.
pub trait Dataset: Send + Sync + fmt::Debug {
    fn backend(&self) -> Backend;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn filter(&self, query: &ScheduleQuery) -> DatasetResult<Arc<dyn Dataset>>;

    fn records(&self) -> DatasetResult<Vec<ScheduleRecord>>;

    /// Every value of `name` rendered as text, in row order.
    fn column(&self, name: &str) -> DatasetResult<Vec<String>>;

    fn main_slate_count(&self) -> DatasetResult<usize> {
        Ok(self
            .records()?
            .iter()
            .filter(|record| record.is_main_slate)
            .count())
    }

    /// Home and away team of every main-slate game, home first.
    fn main_slate_teams(&self) -> DatasetResult<Vec<String>> {
        Ok(self
            .records()?
            .iter()
            .filter(|record| record.is_main_slate)
            .flat_map(|record| record.teams().map(str::to_string))
            .collect())
    }

    /// Distinct seasons in order of first appearance.
    fn seasons(&self) -> DatasetResult<Vec<i32>> {
        Ok(distinct(self.records()?.iter().map(|record| record.season)))
    }

    /// Distinct weeks in order of first appearance.
    fn weeks(&self) -> DatasetResult<Vec<i32>> {
        Ok(distinct(self.records()?.iter().map(|record| record.week)))
    }
}

fn distinct(values: impl Iterator<Item = i32>) -> Vec<i32> {
    let mut seen = Vec::new();
    for value in values {
        if !seen.contains(&value) {
            seen.push(value);
        }
    }
    seen
}

/// Wrap already loaded rows in the requested backend.
pub fn build(backend: Backend, table: LoadedTable) -> DatasetResult<Arc<dyn Dataset>> {
    let dataset: Arc<dyn Dataset> = match backend {
        Backend::Frame => Arc::new(FrameDataset::from_table(&table)?),
        Backend::Records => Arc::new(RecordDataset::from_table(table)),
    };
    Ok(dataset)
}

/// Load a schedule file into the requested backend.
pub fn open<P: AsRef<Path>>(path: P, backend: Backend) -> DatasetResult<Arc<dyn Dataset>> {
    let path = path.as_ref();
    let dataset = build(backend, loader::load_table(path)?)?;
    info!(
        path = %path.display(),
        backend = %backend,
        rows = dataset.len(),
        "loaded schedule dataset"
    );
    Ok(dataset)
}
