//! Process-wide schedule built from [`ScheduleConfig::from_env`], backing
//! the crate-level query functions.

use crate::config::ScheduleConfig;
use crate::dataset::Dataset;
use crate::error::{DatasetResult, ScheduleResult};
use crate::schedule::Schedule;
use once_cell::sync::Lazy;
use std::sync::Arc;
use tracing::warn;

static DEFAULT_SCHEDULE: Lazy<Schedule> = Lazy::new(|| {
    let config = ScheduleConfig::from_env().unwrap_or_else(|err| {
        warn!(error = %err, "ignoring schedule environment overrides");
        ScheduleConfig::default()
    });
    Schedule::new(config)
});

pub fn default_schedule() -> &'static Schedule {
    &DEFAULT_SCHEDULE
}

pub fn schedule(season: Option<i32>, week: Option<i32>) -> DatasetResult<Arc<dyn Dataset>> {
    DEFAULT_SCHEDULE.schedule(season, week)
}

pub fn current_season(out_of_season: bool) -> Option<i32> {
    DEFAULT_SCHEDULE.current_season(out_of_season)
}

pub fn current_week() -> Option<i32> {
    DEFAULT_SCHEDULE.current_week()
}

pub fn current_season_schedule(out_of_season: bool) -> ScheduleResult<Option<Arc<dyn Dataset>>> {
    DEFAULT_SCHEDULE.current_season_schedule(out_of_season)
}

pub fn current_week_schedule() -> ScheduleResult<Option<Arc<dyn Dataset>>> {
    DEFAULT_SCHEDULE.current_week_schedule()
}

pub fn main_slate_count(season: Option<i32>, week: Option<i32>) -> DatasetResult<usize> {
    DEFAULT_SCHEDULE.main_slate_count(season, week)
}

pub fn main_slate_teams(season: Option<i32>, week: Option<i32>) -> DatasetResult<Vec<String>> {
    DEFAULT_SCHEDULE.main_slate_teams(season, week)
}
