//! Post-run audit of a weekly schedule.
//!
//! Re-checks the guarantees of the assignment engine against the final
//! employee state and assignment table:
//! - no employee exceeds the weekly cap
//! - nobody is seated in two shifts of the same day
//! - the table and the employees' own records agree
//! - a shift below the minimum had no eligible employee left to fill it
//!
//! A shortfall is only reported when it was avoidable; understaffing caused
//! by an exhausted pool is a normal outcome.

use std::collections::HashMap;

use crate::config::ScheduleConfig;
use crate::schedule::types::{Day, Employee, Shift, WeekSchedule};

/// Audit result.
pub type AuditResult = Result<(), Vec<AuditIssue>>;

/// A broken schedule guarantee.
#[derive(Debug, Clone, PartialEq)]
pub struct AuditIssue {
    /// Issue category.
    pub kind: AuditIssueKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of audit issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditIssueKind {
    /// An employee works more days than the weekly cap.
    CapExceeded,
    /// A name is seated more often on one day than there are employees with that name.
    DoubleBooked,
    /// The assignment table and the employee records disagree.
    CountMismatch,
    /// A shift is below the minimum although an eligible employee was idle.
    AvoidableShortfall,
}

impl AuditIssue {
    fn new(kind: AuditIssueKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Audits a finished week.
///
/// # Returns
/// `Ok(())` if every guarantee holds, `Err(issues)` with all detected issues.
pub fn audit(employees: &[Employee], week: &WeekSchedule, config: &ScheduleConfig) -> AuditResult {
    let mut issues = Vec::new();
    let cap = config.max_shifts_per_employee;

    for emp in employees {
        if emp.assigned_days() > cap {
            issues.push(AuditIssue::new(
                AuditIssueKind::CapExceeded,
                format!("{} works {} days, cap is {}", emp.name, emp.assigned_days(), cap),
            ));
        }
    }

    let mut namesakes: HashMap<&str, usize> = HashMap::new();
    for emp in employees {
        *namesakes.entry(emp.name.as_str()).or_insert(0) += 1;
    }

    for schedule in &week.days {
        let day = schedule.day;

        // Seats per name across the whole day
        let mut seats: HashMap<&str, usize> = HashMap::new();
        for name in schedule.seated.values().flatten() {
            *seats.entry(name.as_str()).or_insert(0) += 1;
        }
        for (name, count) in &seats {
            if *count > namesakes.get(name).copied().unwrap_or(0) {
                issues.push(AuditIssue::new(
                    AuditIssueKind::DoubleBooked,
                    format!("{} is seated {} times on {}", name, count, config.day_label(day)),
                ));
            }
        }

        for shift in Shift::ALL {
            check_shift_records(employees, week, day, shift, config, &mut issues);
        }
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(issues)
    }
}

fn check_shift_records(
    employees: &[Employee],
    week: &WeekSchedule,
    day: Day,
    shift: Shift,
    config: &ScheduleConfig,
    issues: &mut Vec<AuditIssue>,
) {
    let schedule = week.day(day);
    let seated = schedule.seated_in(shift);

    let mut table: HashMap<&str, usize> = HashMap::new();
    for name in seated {
        *table.entry(name.as_str()).or_insert(0) += 1;
    }
    let mut records: HashMap<&str, usize> = HashMap::new();
    for emp in employees.iter().filter(|e| e.shift_on(day) == Some(shift)) {
        *records.entry(emp.name.as_str()).or_insert(0) += 1;
    }
    if table != records {
        issues.push(AuditIssue::new(
            AuditIssueKind::CountMismatch,
            format!(
                "{} {}: table seats {} employees, employee records show {}",
                config.day_label(day),
                config.shift_label(shift),
                seated.len(),
                records.values().sum::<usize>()
            ),
        ));
    }

    if seated.len() < week.min_per_shift {
        // Eligible on `day` means idle that day with fewer than `cap` shifts before it,
        // and no namesake already seated in this shift.
        let eligible = employees.iter().find(|e| {
            !e.is_assigned_on(day)
                && e.assigned_shifts().range(..day).count() < config.max_shifts_per_employee
                && !seated.contains(&e.name)
        });
        if let Some(emp) = eligible {
            issues.push(AuditIssue::new(
                AuditIssueKind::AvoidableShortfall,
                format!(
                    "{} {} has {}/{} employees while {} was available",
                    config.day_label(day),
                    config.shift_label(shift),
                    seated.len(),
                    week.min_per_shift,
                    emp.name
                ),
            ));
        }
    }
}
