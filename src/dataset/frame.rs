use super::{Backend, Dataset};
use crate::error::{DatasetError, DatasetResult};
use crate::loader::LoadedTable;
use crate::query::ScheduleQuery;
use crate::record::{
    AWAY_TEAM, HOME_TEAM, IS_MAIN_SLATE, REQUIRED_COLUMNS, SEASON, ScheduleRecord, WEEK,
};
use polars::prelude::*;
use std::sync::Arc;

/// Schedule rows held in a polars [`DataFrame`].
///
/// `season` and `week` are `Int32`, `is_main_slate` is `Boolean`, every other
/// column is `String`.
#[derive(Debug, Clone)]
pub struct FrameDataset {
    df: DataFrame,
}

impl FrameDataset {
    pub fn from_table(table: &LoadedTable) -> PolarsResult<Self> {
        let records = &table.records;
        let mut columns: Vec<Column> = Vec::with_capacity(table.columns.len());

        for name in &table.columns {
            let series = match name.as_str() {
                SEASON => Series::new(
                    PlSmallStr::from_static(SEASON),
                    records.iter().map(|r| r.season).collect::<Vec<i32>>(),
                ),
                WEEK => Series::new(
                    PlSmallStr::from_static(WEEK),
                    records.iter().map(|r| r.week).collect::<Vec<i32>>(),
                ),
                HOME_TEAM => Series::new(
                    PlSmallStr::from_static(HOME_TEAM),
                    records
                        .iter()
                        .map(|r| r.home_team.as_str())
                        .collect::<Vec<&str>>(),
                ),
                AWAY_TEAM => Series::new(
                    PlSmallStr::from_static(AWAY_TEAM),
                    records
                        .iter()
                        .map(|r| r.away_team.as_str())
                        .collect::<Vec<&str>>(),
                ),
                IS_MAIN_SLATE => Series::new(
                    PlSmallStr::from_static(IS_MAIN_SLATE),
                    records
                        .iter()
                        .map(|r| r.is_main_slate)
                        .collect::<Vec<bool>>(),
                ),
                other => Series::new(
                    other.into(),
                    records
                        .iter()
                        .map(|r| r.extra(other).unwrap_or(""))
                        .collect::<Vec<&str>>(),
                ),
            };
            columns.push(series.into_column());
        }

        Ok(Self {
            df: DataFrame::new(columns)?,
        })
    }

    /// Adopt an existing frame, coercing the required columns to their
    /// expected types.
    pub fn from_dataframe(df: DataFrame) -> DatasetResult<Self> {
        for name in REQUIRED_COLUMNS {
            if df.column(name).is_err() {
                return Err(DatasetError::MissingColumn(name.to_string()));
            }
        }
        let df = df
            .lazy()
            .with_columns([
                col(SEASON).cast(DataType::Int32),
                col(WEEK).cast(DataType::Int32),
                col(HOME_TEAM).cast(DataType::String),
                col(AWAY_TEAM).cast(DataType::String),
                col(IS_MAIN_SLATE).cast(DataType::Boolean),
            ])
            .collect()?;
        Ok(Self { df })
    }

    pub fn dataframe(&self) -> &DataFrame {
        &self.df
    }

    fn text_column(&self, name: &str) -> DatasetResult<Column> {
        let column = self
            .df
            .column(name)
            .map_err(|_| DatasetError::MissingColumn(name.to_string()))?;
        Ok(column.cast(&DataType::String)?)
    }
}

fn null_value(row: usize, column: &str) -> DatasetError {
    DatasetError::InvalidValue {
        row: row + 1,
        column: column.to_string(),
        value: "null".to_string(),
    }
}

impl Dataset for FrameDataset {
    fn backend(&self) -> Backend {
        Backend::Frame
    }

    fn len(&self) -> usize {
        self.df.height()
    }

    fn filter(&self, query: &ScheduleQuery) -> DatasetResult<Arc<dyn Dataset>> {
        let Some(predicate) = query.to_expr() else {
            return Ok(Arc::new(self.clone()));
        };
        let df = self.df.clone().lazy().filter(predicate).collect()?;
        Ok(Arc::new(Self { df }))
    }

    fn records(&self) -> DatasetResult<Vec<ScheduleRecord>> {
        let season = self.df.column(SEASON)?.i32()?;
        let week = self.df.column(WEEK)?.i32()?;
        let home = self.df.column(HOME_TEAM)?.str()?;
        let away = self.df.column(AWAY_TEAM)?.str()?;
        let main_slate = self.df.column(IS_MAIN_SLATE)?.bool()?;

        let extra_columns = self
            .df
            .get_columns()
            .iter()
            .filter(|column| !REQUIRED_COLUMNS.contains(&column.name().as_str()))
            .map(|column| column.cast(&DataType::String))
            .collect::<PolarsResult<Vec<Column>>>()?;
        let extras = extra_columns
            .iter()
            .map(|column| Ok((column.name().to_string(), column.str()?)))
            .collect::<PolarsResult<Vec<_>>>()?;

        let mut records = Vec::with_capacity(self.df.height());
        for idx in 0..self.df.height() {
            let mut record = ScheduleRecord::new(
                season.get(idx).ok_or_else(|| null_value(idx, SEASON))?,
                week.get(idx).ok_or_else(|| null_value(idx, WEEK))?,
                home.get(idx).ok_or_else(|| null_value(idx, HOME_TEAM))?,
                away.get(idx).ok_or_else(|| null_value(idx, AWAY_TEAM))?,
                main_slate
                    .get(idx)
                    .ok_or_else(|| null_value(idx, IS_MAIN_SLATE))?,
            );
            for (name, values) in &extras {
                record.set_extra(name.as_str(), values.get(idx).unwrap_or(""));
            }
            records.push(record);
        }
        Ok(records)
    }

    fn column(&self, name: &str) -> DatasetResult<Vec<String>> {
        let column = self.text_column(name)?;
        Ok(column
            .str()?
            .into_iter()
            .map(|value| value.unwrap_or("").to_string())
            .collect())
    }

    fn main_slate_count(&self) -> DatasetResult<usize> {
        Ok(self
            .df
            .column(IS_MAIN_SLATE)?
            .bool()?
            .into_iter()
            .filter(|flag| *flag == Some(true))
            .count())
    }

    fn main_slate_teams(&self) -> DatasetResult<Vec<String>> {
        let slate = self
            .df
            .clone()
            .lazy()
            .filter(col(IS_MAIN_SLATE))
            .collect()?;
        let home = slate.column(HOME_TEAM)?.str()?;
        let away = slate.column(AWAY_TEAM)?.str()?;

        let mut teams = Vec::with_capacity(slate.height() * 2);
        for (home_team, away_team) in home.into_iter().zip(away.into_iter()) {
            teams.extend(home_team.map(str::to_string));
            teams.extend(away_team.map(str::to_string));
        }
        Ok(teams)
    }

    fn seasons(&self) -> DatasetResult<Vec<i32>> {
        Ok(super::distinct(
            self.df.column(SEASON)?.i32()?.into_iter().flatten(),
        ))
    }

    fn weeks(&self) -> DatasetResult<Vec<i32>> {
        Ok(super::distinct(
            self.df.column(WEEK)?.i32()?.into_iter().flatten(),
        ))
    }
}
