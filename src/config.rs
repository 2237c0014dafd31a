//! Scheduling configuration.
//!
//! Defaults reproduce the standard week: Monday..Sunday, three shifts,
//! at most 5 working days per employee and at least 2 employees per shift.
//! A TOML file can override any field; missing fields keep their defaults.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::schedule::types::{Day, Shift, DAYS_PER_WEEK, SHIFTS_PER_DAY};

/// Immutable settings handed to the assignment engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    /// Day labels, Monday first. Used as roster column names.
    pub days: Vec<String>,

    /// Shift labels in seating order. A preference cell matching one of
    /// these selects that shift; anything else means no preference.
    pub shifts: Vec<String>,

    /// Weekly cap on scheduled days per employee
    pub max_shifts_per_employee: usize,

    /// Staffing minimum for each (day, shift) cell
    pub min_employees_per_shift: usize,

    /// Preference-less employees appended to every roster before scheduling
    pub filler_employees: Vec<String>,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            days: Day::ALL.iter().map(|d| d.name().to_string()).collect(),
            shifts: Shift::ALL.iter().map(|s| s.name().to_string()).collect(),
            max_shifts_per_employee: 5,
            min_employees_per_shift: 2,
            filler_employees: ["Chris", "Liz", "Ash", "Luna", "Beth", "Jeff", "Dave", "Joe"]
                .iter()
                .map(|name| name.to_string())
                .collect(),
        }
    }
}

impl ScheduleConfig {
    /// Loads and validates a TOML configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: ScheduleConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        config.validate()?;
        tracing::debug!(path = %path.display(), "Loaded schedule config");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_labels("days", &self.days, DAYS_PER_WEEK)?;
        check_labels("shifts", &self.shifts, SHIFTS_PER_DAY)?;

        if !(1..=DAYS_PER_WEEK).contains(&self.max_shifts_per_employee) {
            return Err(ConfigError::ValidationError(format!(
                "max_shifts_per_employee must be between 1 and {}, got {}",
                DAYS_PER_WEEK, self.max_shifts_per_employee
            )));
        }
        if self.min_employees_per_shift == 0 {
            return Err(ConfigError::ValidationError(
                "min_employees_per_shift must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Configured label for `day`, or its English name if the list is too short
    pub fn day_label(&self, day: Day) -> &str {
        self.days.get(day.index()).map(String::as_str).unwrap_or(day.name())
    }

    /// Configured label for `shift`, or its English name if the list is too short
    pub fn shift_label(&self, shift: Shift) -> &str {
        self.shifts.get(shift.index()).map(String::as_str).unwrap_or(shift.name())
    }

    /// Maps a preference cell to a shift by exact label match; any other
    /// text, including padded or differently cased labels, is "no preference"
    pub fn parse_shift(&self, text: &str) -> Option<Shift> {
        Shift::ALL
            .iter()
            .copied()
            .find(|&shift| self.shift_label(shift) == text)
    }
}

fn check_labels(field: &str, labels: &[String], expected: usize) -> Result<(), ConfigError> {
    if labels.len() != expected {
        return Err(ConfigError::ValidationError(format!(
            "{} must list exactly {} labels, got {}",
            field,
            expected,
            labels.len()
        )));
    }
    let mut seen = HashSet::new();
    for label in labels {
        if label.trim().is_empty() {
            return Err(ConfigError::ValidationError(format!("{} contains an empty label", field)));
        }
        if !seen.insert(label.as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "{} contains duplicate label '{}'",
                field, label
            )));
        }
    }
    Ok(())
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}
