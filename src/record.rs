use serde::{Deserialize, Serialize};

pub const SEASON: &str = "season";
pub const WEEK: &str = "week";
pub const HOME_TEAM: &str = "home_team";
pub const AWAY_TEAM: &str = "away_team";
pub const IS_MAIN_SLATE: &str = "is_main_slate";

/// Columns every schedule file must carry.
pub const REQUIRED_COLUMNS: [&str; 5] = [SEASON, WEEK, HOME_TEAM, AWAY_TEAM, IS_MAIN_SLATE];

/// One game row. Columns beyond the required five are carried in `extra`
/// untouched, in header order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleRecord {
    pub season: i32,
    pub week: i32,
    pub home_team: String,
    pub away_team: String,
    pub is_main_slate: bool,
    #[serde(default)]
    pub extra: Vec<(String, String)>,
}

impl ScheduleRecord {
    pub fn new(
        season: i32,
        week: i32,
        home_team: impl Into<String>,
        away_team: impl Into<String>,
        is_main_slate: bool,
    ) -> Self {
        Self {
            season,
            week,
            home_team: home_team.into(),
            away_team: away_team.into(),
            is_main_slate,
            extra: Vec::new(),
        }
    }

    pub fn with_extra(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_extra(column, value);
        self
    }

    /// Set an extra column, keeping its position if already present.
    pub fn set_extra(&mut self, column: impl Into<String>, value: impl Into<String>) {
        let column = column.into();
        let value = value.into();
        match self.extra.iter_mut().find(|(name, _)| *name == column) {
            Some((_, existing)) => *existing = value,
            None => self.extra.push((column, value)),
        }
    }

    pub fn extra(&self, column: &str) -> Option<&str> {
        self.extra
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value.as_str())
    }

    pub fn extra_columns(&self) -> impl Iterator<Item = &str> {
        self.extra.iter().map(|(name, _)| name.as_str())
    }

    /// Value of any column rendered as text.
    pub fn get(&self, column: &str) -> Option<String> {
        match column {
            SEASON => Some(self.season.to_string()),
            WEEK => Some(self.week.to_string()),
            HOME_TEAM => Some(self.home_team.clone()),
            AWAY_TEAM => Some(self.away_team.clone()),
            IS_MAIN_SLATE => Some(self.is_main_slate.to_string()),
            other => self.extra(other).map(str::to_string),
        }
    }

    /// Home then away team code.
    pub fn teams(&self) -> [&str; 2] {
        [self.home_team.as_str(), self.away_team.as_str()]
    }
}
