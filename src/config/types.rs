//! Configuration types for attendance reconciliation.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files, plus the per-run
//! [`ShiftConfig`].

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::{EngineError, EngineResult};

/// Default standard shift length in hours.
pub const DEFAULT_STANDARD_HOURS: Decimal = Decimal::from_parts(9, 0, 0, false, 0);

/// Default address the HTTP API binds to.
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:3000";

/// The standard shift length used for one reconciliation run.
///
/// Hours up to this threshold are normal (or holiday-base) hours; hours
/// beyond it are overtime on weekdays and holidays.
///
/// # Example
///
/// ```
/// use attendance_engine::config::ShiftConfig;
/// use rust_decimal::Decimal;
///
/// let config: ShiftConfig = "7.5".parse().unwrap();
/// assert_eq!(config.standard_hours(), Decimal::new(75, 1));
///
/// assert!("seven".parse::<ShiftConfig>().is_err());
/// assert_eq!(ShiftConfig::default().standard_hours(), Decimal::from(9));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShiftConfig {
    standard_hours: Decimal,
}

impl ShiftConfig {
    /// Creates a shift configuration, rejecting non-positive lengths.
    pub fn new(standard_hours: Decimal) -> EngineResult<Self> {
        if standard_hours <= Decimal::ZERO {
            return Err(EngineError::InvalidShiftLength {
                value: standard_hours.to_string(),
                message: "standard shift length must be greater than zero".to_string(),
            });
        }
        Ok(Self { standard_hours })
    }

    /// Returns the standard shift length in hours.
    pub fn standard_hours(&self) -> Decimal {
        self.standard_hours
    }
}

impl Default for ShiftConfig {
    fn default() -> Self {
        Self {
            standard_hours: DEFAULT_STANDARD_HOURS,
        }
    }
}

impl FromStr for ShiftConfig {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let hours = Decimal::from_str(trimmed).map_err(|e| EngineError::InvalidShiftLength {
            value: trimmed.to_string(),
            message: e.to_string(),
        })?;
        Self::new(hours)
    }
}

/// Engine settings loaded from `engine.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineSettings {
    /// Standard shift length used when a request does not supply one.
    #[serde(default = "default_standard_hours")]
    pub standard_hours: Decimal,
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerSettings,
}

fn default_standard_hours() -> Decimal {
    DEFAULT_STANDARD_HOURS
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            standard_hours: DEFAULT_STANDARD_HOURS,
            server: ServerSettings::default(),
        }
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// Socket address to listen on.
    #[serde(default = "default_bind")]
    pub bind: String,
}

fn default_bind() -> String {
    DEFAULT_BIND_ADDRESS.to_string()
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

/// Holiday list file structure (`holidays.yaml`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HolidayFile {
    /// Holiday dates as ISO `YYYY-MM-DD` strings.
    #[serde(default)]
    pub holidays: Vec<String>,
}
