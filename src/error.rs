use crate::config::ConfigError;

/// Errors raised while reading or writing schedules.
///
/// Staffing shortfalls are not errors; they are reported through
/// [`crate::schedule::WeekSchedule::understaffed`].
#[derive(Debug, thiserror::Error)]
pub enum PlannerError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Roster is missing the '{0}' column")]
    MissingColumn(String),

    #[error("Malformed roster row at line {line}: {reason}")]
    MalformedRow { line: u64, reason: String },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to serialize schedule report: {0}")]
    Json(#[from] serde_json::Error),
}
