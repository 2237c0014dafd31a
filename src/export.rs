use csv::WriterBuilder;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

use crate::config::ScheduleConfig;
use crate::error::PlannerError;
use crate::schedule::types::{Day, Employee, Shift, WeekSchedule};

/// Header of the employee column in the schedule CSV
pub const EMPLOYEE_COLUMN: &str = "Employee";

/// Writes the final per-employee schedule to a CSV file
///
/// One row per employee with the assigned shift label for each day,
/// or an empty cell when the employee is off that day.
pub fn write_assignments<P: AsRef<Path>>(
    employees: &[Employee],
    config: &ScheduleConfig,
    csv_path: P,
) -> Result<(), PlannerError> {
    let path = csv_path.as_ref();
    let file = File::create(path)?;
    write_assignments_to(employees, config, file)?;
    info!(path = %path.display(), rows = employees.len(), "Wrote schedule");
    Ok(())
}

/// Writes the per-employee schedule CSV to any sink
pub fn write_assignments_to<W: Write>(
    employees: &[Employee],
    config: &ScheduleConfig,
    sink: W,
) -> Result<(), PlannerError> {
    let mut wtr = WriterBuilder::new().from_writer(sink);

    let mut header = vec![EMPLOYEE_COLUMN];
    header.extend(Day::ALL.iter().map(|&day| config.day_label(day)));
    wtr.write_record(&header)?;

    for employee in employees {
        let mut row = vec![employee.name.as_str()];
        row.extend(Day::ALL.iter().map(|&day| {
            employee
                .shift_on(day)
                .map(|shift| config.shift_label(shift))
                .unwrap_or("")
        }));
        wtr.write_record(&row)?;
    }

    wtr.flush()?;
    Ok(())
}

/// Staffing of one shift in the JSON report
#[derive(Debug, Serialize)]
pub struct ShiftReport {
    pub shift: String,
    pub employees: Vec<String>,
    pub understaffed: bool,
}

/// Staffing of one day in the JSON report
#[derive(Debug, Serialize)]
pub struct DayReport {
    pub day: String,
    pub shifts: Vec<ShiftReport>,
    pub idle: Vec<String>,
}

/// Assignment table with configured labels, as written by [`write_report`]
#[derive(Debug, Serialize)]
pub struct ScheduleReport {
    pub min_employees_per_shift: usize,
    pub max_shifts_per_employee: usize,
    pub fully_staffed: bool,
    pub days: Vec<DayReport>,
}

impl ScheduleReport {
    pub fn new(week: &WeekSchedule, config: &ScheduleConfig) -> Self {
        let days = week
            .days
            .iter()
            .map(|schedule| DayReport {
                day: config.day_label(schedule.day).to_string(),
                shifts: Shift::ALL
                    .iter()
                    .map(|&shift| ShiftReport {
                        shift: config.shift_label(shift).to_string(),
                        employees: schedule.seated_in(shift).to_vec(),
                        understaffed: schedule.headcount(shift) < week.min_per_shift,
                    })
                    .collect(),
                idle: schedule.idle.clone(),
            })
            .collect();

        Self {
            min_employees_per_shift: week.min_per_shift,
            max_shifts_per_employee: config.max_shifts_per_employee,
            fully_staffed: week.is_fully_staffed(),
            days,
        }
    }
}

/// Writes the assignment table as pretty-printed JSON
pub fn write_report<P: AsRef<Path>>(
    week: &WeekSchedule,
    config: &ScheduleConfig,
    json_path: P,
) -> Result<(), PlannerError> {
    let path = json_path.as_ref();
    let mut out = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut out, &ScheduleReport::new(week, config))?;
    out.flush()?;
    info!(path = %path.display(), "Wrote schedule report");
    Ok(())
}
