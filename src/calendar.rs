use crate::error::{CalendarError, CalendarResult};
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use std::collections::BTreeMap;
use std::fmt::Write;
use tracing::warn;

pub const MIN_WEEK: i32 = 1;
pub const MAX_WEEK: i32 = 18;
pub const DEFAULT_SUNDAY_FORMAT: &str = "%m/%d/%Y";

/// First season played with an 18-week regular season.
const EIGHTEEN_WEEK_ERA: i32 = 2021;

/// Regular season kickoff dates as published by the league.
const SEASON_STARTS: [(i32, u32, u32); 27] = [
    (1999, 9, 12),
    (2000, 9, 3),
    (2001, 9, 9),
    (2002, 9, 5),
    (2003, 9, 4),
    (2004, 9, 9),
    (2005, 9, 8),
    (2006, 9, 7),
    (2007, 9, 6),
    (2008, 9, 4),
    (2009, 9, 10),
    (2010, 9, 9),
    (2011, 9, 8),
    (2012, 9, 5),
    (2013, 9, 5),
    (2014, 9, 4),
    (2015, 9, 10),
    (2016, 9, 8),
    (2017, 9, 7),
    (2018, 9, 6),
    (2019, 9, 5),
    (2020, 9, 10),
    (2021, 9, 9),
    (2022, 9, 8),
    (2023, 9, 7),
    (2024, 9, 5),
    (2025, 9, 4),
];

const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%m/%d/%Y", "%Y/%m/%d", "%Y%m%d"];
const DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M"];

static DEFAULT_CALENDAR: Lazy<SeasonCalendar> = Lazy::new(SeasonCalendar::default);

/// Anything that names a calendar day: dates, datetimes, or parseable strings.
pub trait IntoDay {
    fn into_day(self) -> CalendarResult<NaiveDate>;
}

impl IntoDay for NaiveDate {
    fn into_day(self) -> CalendarResult<NaiveDate> {
        Ok(self)
    }
}

impl IntoDay for &NaiveDate {
    fn into_day(self) -> CalendarResult<NaiveDate> {
        Ok(*self)
    }
}

impl IntoDay for NaiveDateTime {
    fn into_day(self) -> CalendarResult<NaiveDate> {
        Ok(self.date())
    }
}

impl IntoDay for &str {
    fn into_day(self) -> CalendarResult<NaiveDate> {
        parse_day(self)
    }
}

impl IntoDay for String {
    fn into_day(self) -> CalendarResult<NaiveDate> {
        parse_day(&self)
    }
}

impl IntoDay for &String {
    fn into_day(self) -> CalendarResult<NaiveDate> {
        parse_day(self)
    }
}

/// Parse a day from the common date and datetime spellings.
pub fn parse_day(input: &str) -> CalendarResult<NaiveDate> {
    let trimmed = input.trim();
    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, fmt) {
            return Ok(date);
        }
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Ok(datetime.date());
        }
    }
    if let Ok(datetime) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(datetime.date_naive());
    }
    Err(CalendarError::Parse {
        input: input.to_string(),
    })
}

/// Season a day belongs to. Sep-Dec is the season of that year, Jan-Feb
/// belongs to the previous year's season, and Mar-Aug is the off-season.
pub fn season_of(day: NaiveDate, out_of_season: bool) -> Option<i32> {
    match day.month() {
        9..=12 => Some(day.year()),
        1 | 2 => Some(day.year() - 1),
        _ if out_of_season => Some(day.year() - 1),
        _ => None,
    }
}

/// Number of regular season weeks (and Sundays) in a season.
pub fn weeks_in_season(season: i32) -> i32 {
    if season >= EIGHTEEN_WEEK_ERA { 18 } else { 17 }
}

pub fn which_season<D: IntoDay>(day: D, out_of_season: bool) -> CalendarResult<Option<i32>> {
    Ok(season_of(day.into_day()?, out_of_season))
}

pub fn which_week<D: IntoDay>(day: D) -> CalendarResult<Option<i32>> {
    Ok(DEFAULT_CALENDAR.which_week(day.into_day()?))
}

pub fn season_sundays(season: i32) -> CalendarResult<Vec<NaiveDate>> {
    DEFAULT_CALENDAR.season_sundays(season)
}

pub fn season_sundays_formatted(season: i32, fmt: &str) -> CalendarResult<Vec<String>> {
    DEFAULT_CALENDAR.season_sundays_formatted(season, fmt)
}

pub fn season_start(season: i32) -> Option<NaiveDate> {
    DEFAULT_CALENDAR.season_start(season)
}

/// Season kickoff table. Entries are strictly increasing with the season.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeasonCalendar {
    starts: BTreeMap<i32, NaiveDate>,
}

impl Default for SeasonCalendar {
    fn default() -> Self {
        let starts = SEASON_STARTS
            .iter()
            .filter_map(|&(season, month, day)| {
                NaiveDate::from_ymd_opt(season, month, day).map(|date| (season, date))
            })
            .collect();
        Self { starts }
    }
}

impl SeasonCalendar {
    pub fn empty() -> Self {
        Self {
            starts: BTreeMap::new(),
        }
    }

    /// Add or replace the kickoff date of a season, keeping the table ordered.
    pub fn with_season_start(mut self, season: i32, start: NaiveDate) -> CalendarResult<Self> {
        if let Some((_, &previous)) = self.starts.range(..season).next_back() {
            if start <= previous {
                return Err(CalendarError::NonMonotonicStart {
                    season,
                    start,
                    previous,
                });
            }
        }
        if let Some((&later_season, &later)) = self.starts.range(season + 1..).next() {
            if start >= later {
                return Err(CalendarError::NonMonotonicStart {
                    season: later_season,
                    start: later,
                    previous: start,
                });
            }
        }
        self.starts.insert(season, start);
        Ok(self)
    }

    pub fn season_start(&self, season: i32) -> Option<NaiveDate> {
        self.starts.get(&season).copied()
    }

    pub fn seasons(&self) -> impl Iterator<Item = i32> + '_ {
        self.starts.keys().copied()
    }

    pub fn first_season(&self) -> Option<i32> {
        self.starts.keys().next().copied()
    }

    pub fn last_season(&self) -> Option<i32> {
        self.starts.keys().next_back().copied()
    }

    /// Whether `day` is on or after the kickoff of the season it belongs to.
    pub fn has_kicked_off(&self, season: i32, day: NaiveDate) -> bool {
        self.season_start(season).is_some_and(|start| day >= start)
    }

    /// Week of the regular season containing `day`.
    ///
    /// Kickoff day itself yields `None`; the days after it count
    /// `floor(days_since_kickoff / 7) + 1`. Seasons missing from the table
    /// also yield `None`.
    pub fn which_week(&self, day: NaiveDate) -> Option<i32> {
        let season = season_of(day, false)?;
        let start = self.season_start(season)?;
        let delta = (day - start).num_days();
        if delta <= 0 {
            return None;
        }
        i32::try_from(delta / 7).ok().map(|weeks| weeks + 1)
    }

    /// Sundays of the regular season, starting three days after kickoff.
    pub fn season_sundays(&self, season: i32) -> CalendarResult<Vec<NaiveDate>> {
        let start = self
            .season_start(season)
            .ok_or(CalendarError::UnknownSeason(season))?;
        let first = start + Duration::days(3);
        Ok((0..weeks_in_season(season))
            .map(|week| first + Duration::weeks(i64::from(week)))
            .collect())
    }

    /// Same as [`season_sundays`](Self::season_sundays), rendered with `fmt`.
    /// An unusable format string falls back to [`DEFAULT_SUNDAY_FORMAT`].
    pub fn season_sundays_formatted(&self, season: i32, fmt: &str) -> CalendarResult<Vec<String>> {
        let sundays = self.season_sundays(season)?;
        if is_valid_format(fmt) {
            if let Some(rendered) = render_all(&sundays, fmt) {
                return Ok(rendered);
            }
        }
        warn!(format = fmt, "unusable date format, using {DEFAULT_SUNDAY_FORMAT}");
        Ok(sundays
            .iter()
            .map(|sunday| sunday.format(DEFAULT_SUNDAY_FORMAT).to_string())
            .collect())
    }
}

/// Render every date with `fmt`, or `None` if any of them cannot be
/// rendered (time or offset specifiers on a plain date).
fn render_all(days: &[NaiveDate], fmt: &str) -> Option<Vec<String>> {
    days.iter()
        .map(|day| {
            let mut rendered = String::new();
            write!(rendered, "{}", day.format(fmt)).ok()?;
            Some(rendered)
        })
        .collect()
}

fn is_valid_format(fmt: &str) -> bool {
    !StrftimeItems::new(fmt).any(|item| matches!(item, Item::Error))
}
