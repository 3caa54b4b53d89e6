use crate::record::{SEASON, ScheduleRecord, WEEK};
use polars::prelude::{Expr, col, lit};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Equality predicates on `season` and `week`. An unset field matches
/// every row, so the default query selects the whole dataset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScheduleQuery {
    pub season: Option<i32>,
    pub week: Option<i32>,
}

impl ScheduleQuery {
    pub fn new(season: Option<i32>, week: Option<i32>) -> Self {
        Self { season, week }
    }

    pub fn all() -> Self {
        Self::default()
    }

    pub fn season(season: i32) -> Self {
        Self::new(Some(season), None)
    }

    pub fn week(week: i32) -> Self {
        Self::new(None, Some(week))
    }

    pub fn season_week(season: i32, week: i32) -> Self {
        Self::new(Some(season), Some(week))
    }

    pub fn is_unfiltered(&self) -> bool {
        self.season.is_none() && self.week.is_none()
    }

    pub fn matches(&self, record: &ScheduleRecord) -> bool {
        self.season.is_none_or(|season| record.season == season)
            && self.week.is_none_or(|week| record.week == week)
    }

    /// Combined predicate for lazy frames, `None` when nothing is filtered.
    pub fn to_expr(&self) -> Option<Expr> {
        let season = self.season.map(|season| col(SEASON).eq(lit(season)));
        let week = self.week.map(|week| col(WEEK).eq(lit(week)));
        match (season, week) {
            (Some(season), Some(week)) => Some(season.and(week)),
            (season, week) => season.or(week),
        }
    }
}

impl fmt::Display for ScheduleQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.season, self.week) {
            (Some(season), Some(week)) => write!(f, "season={season}, week={week}"),
            (Some(season), None) => write!(f, "season={season}"),
            (None, Some(week)) => write!(f, "week={week}"),
            (None, None) => write!(f, "all"),
        }
    }
}
