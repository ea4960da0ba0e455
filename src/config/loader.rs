//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading engine
//! settings and the seed holiday calendar from YAML files.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::HolidayCalendar;

use super::types::{EngineSettings, HolidayFile, ShiftConfig};

/// Loads and provides access to engine configuration.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── engine.yaml    # Standard shift length, server settings
/// └── holidays.yaml  # Optional seed holiday calendar
/// ```
///
/// # Example
///
/// ```no_run
/// use attendance_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// println!("Standard shift: {} hours", loader.shift_config().standard_hours());
/// println!("Holidays: {}", loader.holidays().len());
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    settings: EngineSettings,
    shift_config: ShiftConfig,
    holidays: HolidayCalendar,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if:
    /// - `engine.yaml` is missing or contains invalid YAML
    /// - `holidays.yaml` exists but contains invalid YAML or a malformed date
    /// - the configured standard shift length is not positive
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let settings = Self::load_yaml::<EngineSettings>(&path.join("engine.yaml"))?;
        let shift_config = ShiftConfig::new(settings.standard_hours)?;

        let holidays_path = path.join("holidays.yaml");
        let holiday_file = if holidays_path.exists() {
            Self::load_yaml::<HolidayFile>(&holidays_path)?
        } else {
            debug!(path = %holidays_path.display(), "No holiday file, starting with empty calendar");
            HolidayFile::default()
        };
        let holidays = HolidayCalendar::from_iso_strings(&holiday_file.holidays)?;

        Ok(Self {
            settings,
            shift_config,
            holidays,
        })
    }

    /// Builds a loader from in-memory values, bypassing the filesystem.
    pub fn from_parts(settings: EngineSettings, holidays: HolidayCalendar) -> EngineResult<Self> {
        let shift_config = ShiftConfig::new(settings.standard_hours)?;
        Ok(Self {
            settings,
            shift_config,
            holidays,
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the raw engine settings.
    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Returns the default shift configuration.
    pub fn shift_config(&self) -> ShiftConfig {
        self.shift_config
    }

    /// Returns the seed holiday calendar.
    pub fn holidays(&self) -> &HolidayCalendar {
        &self.holidays
    }

    /// Returns the configured bind address.
    pub fn bind_address(&self) -> &str {
        &self.settings.server.bind
    }
}
