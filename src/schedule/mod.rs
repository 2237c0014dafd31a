pub mod types;
pub mod engine;

pub use types::{Day, DaySchedule, Employee, Shift, WeekSchedule};
pub use engine::ShiftAssigner;
