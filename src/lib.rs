pub mod calendar;
pub mod clock;
pub mod config;
pub mod dataset;
mod defaults;
pub mod error;
pub mod loader;
pub mod query;
pub mod record;
pub mod schedule;

pub use calendar::{
    DEFAULT_SUNDAY_FORMAT, IntoDay, MAX_WEEK, MIN_WEEK, SeasonCalendar, parse_day, season_start,
    season_sundays, season_sundays_formatted, weeks_in_season, which_season, which_week,
};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::ScheduleConfig;
pub use dataset::{Backend, Dataset, FrameDataset, RecordDataset};
pub use defaults::{
    current_season, current_season_schedule, current_week, current_week_schedule,
    default_schedule, main_slate_count, main_slate_teams, schedule,
};
pub use error::{
    CalendarError, CalendarResult, ConfigError, DatasetError, DatasetResult, ScheduleError,
    ScheduleResult,
};
pub use loader::{LoadedTable, load, load_table};
pub use query::ScheduleQuery;
pub use record::ScheduleRecord;
pub use schedule::Schedule;
