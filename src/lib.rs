//! Weekly shift planner.
//!
//! Seats employees on Morning, Afternoon and Evening shifts for each day of
//! a week: preferred shifts first, then a random fill of any shift still
//! below the staffing minimum, never exceeding an employee's weekly cap.
//!
//! - **`parser`**: roster CSV -> [`schedule::Employee`] records
//! - **`schedule`**: domain types and the [`schedule::ShiftAssigner`] engine
//! - **`validation`**: post-run audit of the schedule guarantees
//! - **`export`**: schedule CSV and JSON report writers
//! - **`display`**: console summary

pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod parser;
pub mod schedule;
pub mod validation;

pub use config::{ConfigError, ScheduleConfig};
pub use error::PlannerError;
