use csv::{ReaderBuilder, StringRecord};
use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::config::ScheduleConfig;
use crate::error::PlannerError;
use crate::schedule::types::{Employee, DAYS_PER_WEEK};

/// Header of the employee name column in the roster CSV
pub const NAME_COLUMN: &str = "Name";

/// Finds a column by its exact header label
fn find_column(headers: &StringRecord, label: &str) -> Result<usize, PlannerError> {
    headers
        .iter()
        .position(|h| h == label)
        .ok_or_else(|| PlannerError::MissingColumn(label.to_string()))
}

/// Loads the employee roster from a CSV file
///
/// The file needs a `Name` column and one column per configured day label.
/// Day cells that do not name a configured shift (e.g. "None") mean no preference.
pub fn load_roster<P: AsRef<Path>>(
    csv_path: P,
    config: &ScheduleConfig,
) -> Result<Vec<Employee>, PlannerError> {
    let path = csv_path.as_ref();
    let file = File::open(path)?;
    let employees = read_roster(file, config)?;
    info!(path = %path.display(), employees = employees.len(), "Loaded roster");
    Ok(employees)
}

/// Reads a roster from any CSV source
pub fn read_roster<R: Read>(
    source: R,
    config: &ScheduleConfig,
) -> Result<Vec<Employee>, PlannerError> {
    let mut reader = ReaderBuilder::new().flexible(true).from_reader(source);
    let headers = reader.headers()?.clone();

    let name_col = find_column(&headers, NAME_COLUMN)?;
    let day_cols = config
        .days
        .iter()
        .map(|label| find_column(&headers, label))
        .collect::<Result<Vec<usize>, _>>()?;

    let mut employees = Vec::new();
    let mut seen_names = HashSet::new();

    for result in reader.records() {
        let record = result?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        if record.len() != headers.len() {
            return Err(PlannerError::MalformedRow {
                line,
                reason: format!("expected {} fields, found {}", headers.len(), record.len()),
            });
        }

        let name = record.get(name_col).unwrap_or("");
        if name.is_empty() {
            debug!(line, "Skipping roster row without a name");
            continue;
        }

        let mut preferences = [None; DAYS_PER_WEEK];
        for (slot, &col) in preferences.iter_mut().zip(&day_cols) {
            *slot = config.parse_shift(record.get(col).unwrap_or(""));
        }

        if !seen_names.insert(name.to_string()) {
            warn!(name, line, "Duplicate employee name in roster");
        }
        employees.push(Employee::new(name, preferences));
    }

    Ok(employees)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::types::{Day, Shift};

    const HEADER: &str = "Name,Monday,Tuesday,Wednesday,Thursday,Friday,Saturday,Sunday\n";

    #[test]
    fn test_reads_preferences() {
        let csv = format!(
            "{}Ana,Morning,None,Evening,Afternoon,None,Morning,Nights\n",
            HEADER
        );
        let employees = read_roster(csv.as_bytes(), &ScheduleConfig::default()).unwrap();
        assert_eq!(employees.len(), 1);

        let ana = &employees[0];
        assert_eq!(ana.name, "Ana");
        assert_eq!(ana.preference(Day::Monday), Some(Shift::Morning));
        assert_eq!(ana.preference(Day::Tuesday), None);
        assert_eq!(ana.preference(Day::Wednesday), Some(Shift::Evening));
        assert_eq!(ana.preference(Day::Thursday), Some(Shift::Afternoon));
        assert_eq!(ana.preference(Day::Sunday), None);
        assert_eq!(ana.assigned_days(), 0);
    }

    #[test]
    fn test_columns_found_by_header_not_position() {
        let csv = "Sunday,Saturday,Friday,Thursday,Wednesday,Tuesday,Monday,Name\n\
                   Evening,None,None,None,None,None,Morning,Ben\n";
        let employees = read_roster(csv.as_bytes(), &ScheduleConfig::default()).unwrap();
        assert_eq!(employees[0].name, "Ben");
        assert_eq!(employees[0].preference(Day::Monday), Some(Shift::Morning));
        assert_eq!(employees[0].preference(Day::Sunday), Some(Shift::Evening));
    }

    #[test]
    fn test_skips_rows_without_name() {
        let csv = format!(
            "{}Ana,None,None,None,None,None,None,None\n,Morning,None,None,None,None,None,None\n",
            HEADER
        );
        let employees = read_roster(csv.as_bytes(), &ScheduleConfig::default()).unwrap();
        assert_eq!(employees.len(), 1);
    }

    #[test]
    fn test_padded_cells_and_headers_match_exactly() {
        let csv = format!("{}Ana, Morning,Evening ,None,None,None,None,None\n", HEADER);
        let employees = read_roster(csv.as_bytes(), &ScheduleConfig::default()).unwrap();
        assert_eq!(employees[0].preference(Day::Monday), None);
        assert_eq!(employees[0].preference(Day::Tuesday), None);

        let padded = "Name, Monday,Tuesday,Wednesday,Thursday,Friday,Saturday,Sunday\n";
        let err = read_roster(padded.as_bytes(), &ScheduleConfig::default()).unwrap_err();
        assert!(matches!(err, PlannerError::MissingColumn(ref col) if col == "Monday"));
    }

    #[test]
    fn test_keeps_duplicate_names() {
        let csv = format!(
            "{}Sam,None,None,None,None,None,None,None\nSam,Morning,None,None,None,None,None,None\n",
            HEADER
        );
        let employees = read_roster(csv.as_bytes(), &ScheduleConfig::default()).unwrap();
        assert_eq!(employees.len(), 2);
    }

    #[test]
    fn test_missing_day_column_is_an_error() {
        let csv = "Name,Monday,Tuesday,Wednesday,Thursday,Friday,Saturday\nAna,,,,,,\n";
        let err = read_roster(csv.as_bytes(), &ScheduleConfig::default()).unwrap_err();
        assert!(matches!(err, PlannerError::MissingColumn(ref col) if col == "Sunday"));
    }

    #[test]
    fn test_missing_name_column_is_an_error() {
        let csv = "Employee,Monday,Tuesday,Wednesday,Thursday,Friday,Saturday,Sunday\n";
        let err = read_roster(csv.as_bytes(), &ScheduleConfig::default()).unwrap_err();
        assert!(matches!(err, PlannerError::MissingColumn(ref col) if col == NAME_COLUMN));
    }

    #[test]
    fn test_short_row_is_malformed() {
        let csv = format!("{}Ana,Morning,None\n", HEADER);
        let err = read_roster(csv.as_bytes(), &ScheduleConfig::default()).unwrap_err();
        assert!(matches!(err, PlannerError::MalformedRow { line: 2, .. }));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_roster(dir.path().join("input.csv"), &ScheduleConfig::default()).unwrap_err();
        assert!(matches!(err, PlannerError::Io(_)));
    }
}
