use crate::calendar::{IntoDay, MAX_WEEK, SeasonCalendar, season_of};
use crate::clock::{Clock, SystemClock};
use crate::config::ScheduleConfig;
use crate::dataset::{self, Dataset};
use crate::error::{CalendarResult, DatasetResult, ScheduleResult};
use crate::query::ScheduleQuery;
use chrono::NaiveDate;
use once_cell::sync::OnceCell;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Schedule queries over one lazily loaded dataset.
///
/// The dataset is read on first use; concurrent first calls share a single
/// load. Filtered views and main-slate team lists are memoized on their
/// resolved `(season, week)` arguments. Views that depend on today's date
/// resolve the date through the [`Clock`] first and only then consult the
/// memo, so a process running across a week boundary picks up the new week.
pub struct Schedule {
    config: ScheduleConfig,
    calendar: SeasonCalendar,
    clock: Arc<dyn Clock>,
    dataset: OnceCell<Arc<dyn Dataset>>,
    views: Mutex<HashMap<ScheduleQuery, Arc<dyn Dataset>>>,
    slates: Mutex<HashMap<ScheduleQuery, Arc<[String]>>>,
}

impl Default for Schedule {
    fn default() -> Self {
        Self::new(ScheduleConfig::default())
    }
}

impl Schedule {
    pub fn new(config: ScheduleConfig) -> Self {
        Self {
            config,
            calendar: SeasonCalendar::default(),
            clock: Arc::new(SystemClock),
            dataset: OnceCell::new(),
            views: Mutex::new(HashMap::new()),
            slates: Mutex::new(HashMap::new()),
        }
    }

    /// Serve queries from an already built dataset instead of a file.
    pub fn from_dataset(dataset: Arc<dyn Dataset>) -> Self {
        let config = ScheduleConfig::default().with_backend(dataset.backend());
        let schedule = Self::new(config);
        // A fresh cell cannot already hold a value.
        let _ = schedule.dataset.set(dataset);
        schedule
    }

    pub fn with_clock<C: Clock + 'static>(mut self, clock: C) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    pub fn with_calendar(mut self, calendar: SeasonCalendar) -> Self {
        self.calendar = calendar;
        self
    }

    pub fn config(&self) -> &ScheduleConfig {
        &self.config
    }

    pub fn calendar(&self) -> &SeasonCalendar {
        &self.calendar
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// The full dataset, loading it on first use. A failed load is not
    /// remembered; the next call tries again.
    pub fn dataset(&self) -> DatasetResult<Arc<dyn Dataset>> {
        self.dataset
            .get_or_try_init(|| dataset::open(self.config.data_path(), self.config.backend))
            .map(Arc::clone)
    }

    pub fn is_loaded(&self) -> bool {
        self.dataset.get().is_some()
    }

    pub fn schedule(
        &self,
        season: Option<i32>,
        week: Option<i32>,
    ) -> DatasetResult<Arc<dyn Dataset>> {
        self.query(ScheduleQuery::new(season, week))
    }

    pub fn query(&self, query: ScheduleQuery) -> DatasetResult<Arc<dyn Dataset>> {
        let dataset = self.dataset()?;
        if query.is_unfiltered() {
            return Ok(dataset);
        }

        let mut views = self.views.lock();
        if let Some(view) = views.get(&query) {
            debug!(%query, "schedule view cache hit");
            return Ok(Arc::clone(view));
        }
        let view = dataset.filter(&query)?;
        debug!(%query, rows = view.len(), "schedule view cached");
        views.insert(query, Arc::clone(&view));
        Ok(view)
    }

    pub fn which_week<D: IntoDay>(&self, day: D) -> CalendarResult<Option<i32>> {
        Ok(self.calendar.which_week(day.into_day()?))
    }

    pub fn season_sundays(&self, season: i32) -> CalendarResult<Vec<NaiveDate>> {
        self.calendar.season_sundays(season)
    }

    /// Schedule of the season `day` belongs to.
    pub fn season_schedule_at<D: IntoDay>(
        &self,
        day: D,
        out_of_season: bool,
    ) -> ScheduleResult<Option<Arc<dyn Dataset>>> {
        let Some(season) = season_of(day.into_day()?, out_of_season) else {
            return Ok(None);
        };
        Ok(Some(self.query(ScheduleQuery::season(season))?))
    }

    /// Games of the regular season week containing `day`. Days before the
    /// season's kickoff, kickoff day itself and days past the final week
    /// have no week schedule.
    pub fn week_schedule_at<D: IntoDay>(
        &self,
        day: D,
    ) -> ScheduleResult<Option<Arc<dyn Dataset>>> {
        let day = day.into_day()?;
        let Some(season) = season_of(day, false) else {
            return Ok(None);
        };
        if !self.calendar.has_kicked_off(season, day) {
            return Ok(None);
        }
        match self.calendar.which_week(day) {
            Some(week) if week <= MAX_WEEK => {
                Ok(Some(self.query(ScheduleQuery::season_week(season, week))?))
            }
            _ => Ok(None),
        }
    }

    pub fn current_season(&self, out_of_season: bool) -> Option<i32> {
        season_of(self.today(), out_of_season)
    }

    pub fn current_week(&self) -> Option<i32> {
        self.calendar.which_week(self.today())
    }

    pub fn current_season_schedule(
        &self,
        out_of_season: bool,
    ) -> ScheduleResult<Option<Arc<dyn Dataset>>> {
        self.season_schedule_at(self.today(), out_of_season)
    }

    pub fn current_week_schedule(&self) -> ScheduleResult<Option<Arc<dyn Dataset>>> {
        self.week_schedule_at(self.today())
    }

    pub fn main_slate_count(&self, season: Option<i32>, week: Option<i32>) -> DatasetResult<usize> {
        self.schedule(season, week)?.main_slate_count()
    }

    /// Home and away teams of the main-slate games, home first within each
    /// game. A missing season or week falls back to the current one.
    pub fn main_slate_teams(
        &self,
        season: Option<i32>,
        week: Option<i32>,
    ) -> DatasetResult<Vec<String>> {
        let query = ScheduleQuery::new(
            season.or_else(|| self.current_season(false)),
            week.or_else(|| self.current_week()),
        );
        if let Some(teams) = self.slates.lock().get(&query) {
            debug!(%query, "main slate cache hit");
            return Ok(teams.to_vec());
        }

        let teams: Arc<[String]> = self.query(query)?.main_slate_teams()?.into();
        self.slates.lock().insert(query, Arc::clone(&teams));
        Ok(teams.to_vec())
    }

    /// Number of memoized filtered views.
    pub fn cached_views(&self) -> usize {
        self.views.lock().len()
    }

    /// Drop memoized results; the loaded dataset is kept.
    pub fn clear_cache(&self) {
        self.views.lock().clear();
        self.slates.lock().clear();
    }

    /// Drop memoized results and the dataset so the next query reads the
    /// file again.
    pub fn reload(&mut self) {
        self.clear_cache();
        self.dataset = OnceCell::new();
    }
}
