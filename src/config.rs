use crate::dataset::Backend;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs::File;
use std::path::{Path, PathBuf};

pub const DATA_DIR_ENV: &str = "NFLSCHEDULE_DATA_DIR";
pub const FILE_ENV: &str = "NFLSCHEDULE_FILE";
pub const BACKEND_ENV: &str = "NFLSCHEDULE_BACKEND";

pub const DEFAULT_FILE_NAME: &str = "schedule.csv";

/// Directory holding the schedule file shipped with the crate.
pub fn packaged_data_dir() -> PathBuf {
    PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/data"))
}

/// Where the schedule table lives and which backend holds it in memory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    pub data_dir: PathBuf,
    pub file_name: String,
    pub backend: Backend,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            data_dir: packaged_data_dir(),
            file_name: DEFAULT_FILE_NAME.to_string(),
            backend: Backend::default(),
        }
    }
}

impl ScheduleConfig {
    /// Defaults overlaid with `NFLSCHEDULE_DATA_DIR`, `NFLSCHEDULE_FILE` and
    /// `NFLSCHEDULE_BACKEND` when set.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Ok(dir) = env::var(DATA_DIR_ENV) {
            config.data_dir = PathBuf::from(dir);
        }
        if let Ok(file_name) = env::var(FILE_ENV) {
            config.file_name = file_name;
        }
        if let Ok(backend) = env::var(BACKEND_ENV) {
            config.backend = backend.parse()?;
        }
        Ok(config)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let file = File::open(path)?;
        Ok(serde_json::from_reader(file)?)
    }

    /// Point at a specific schedule file.
    pub fn with_data_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        let path = path.as_ref();
        self.data_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        self.file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        self
    }

    pub fn with_backend(mut self, backend: Backend) -> Self {
        self.backend = backend;
        self
    }

    pub fn data_path(&self) -> PathBuf {
        self.data_dir.join(&self.file_name)
    }
}
