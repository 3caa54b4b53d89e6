use super::{Backend, Dataset};
use crate::error::{DatasetError, DatasetResult};
use crate::loader::LoadedTable;
use crate::query::ScheduleQuery;
use crate::record::{REQUIRED_COLUMNS, ScheduleRecord};
use std::sync::Arc;

/// Schedule rows kept as a plain list and filtered by iteration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordDataset {
    columns: Arc<[String]>,
    records: Vec<ScheduleRecord>,
}

impl RecordDataset {
    pub fn from_table(table: LoadedTable) -> Self {
        Self {
            columns: table.columns.into(),
            records: table.records,
        }
    }

    /// Build from records alone; the column list is the required five plus
    /// whatever extra columns the first record carries.
    pub fn from_records(records: Vec<ScheduleRecord>) -> Self {
        let mut columns: Vec<String> = REQUIRED_COLUMNS.iter().map(|c| c.to_string()).collect();
        if let Some(first) = records.first() {
            columns.extend(first.extra_columns().map(str::to_string));
        }
        Self {
            columns: columns.into(),
            records,
        }
    }

    pub fn as_slice(&self) -> &[ScheduleRecord] {
        &self.records
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }
}

impl Dataset for RecordDataset {
    fn backend(&self) -> Backend {
        Backend::Records
    }

    fn len(&self) -> usize {
        self.records.len()
    }

    fn filter(&self, query: &ScheduleQuery) -> DatasetResult<Arc<dyn Dataset>> {
        let records = self
            .records
            .iter()
            .filter(|record| query.matches(record))
            .cloned()
            .collect();
        Ok(Arc::new(Self {
            columns: Arc::clone(&self.columns),
            records,
        }))
    }

    fn records(&self) -> DatasetResult<Vec<ScheduleRecord>> {
        Ok(self.records.clone())
    }

    fn column(&self, name: &str) -> DatasetResult<Vec<String>> {
        if !self.columns.iter().any(|column| column == name) {
            return Err(DatasetError::MissingColumn(name.to_string()));
        }
        Ok(self
            .records
            .iter()
            .map(|record| record.get(name).unwrap_or_default())
            .collect())
    }

    fn main_slate_count(&self) -> DatasetResult<usize> {
        Ok(self.records.iter().filter(|r| r.is_main_slate).count())
    }
}
