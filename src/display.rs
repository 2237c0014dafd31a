use crate::config::ScheduleConfig;
use crate::schedule::types::{DaySchedule, Shift, WeekSchedule};

/// Formats a list of names for the console, `-` when empty
pub fn format_names(names: &[String]) -> String {
    if names.is_empty() {
        "-".to_string()
    } else {
        names.join(", ")
    }
}

/// Renders one day's staffing in a readable format
pub fn render_day_schedule(schedule: &DaySchedule, min_per_shift: usize, config: &ScheduleConfig) -> String {
    let mut out = String::new();
    out.push_str(&format!("\n=== {} ===\n", config.day_label(schedule.day)));

    for shift in Shift::ALL {
        let names = schedule.seated_in(shift);
        out.push_str(&format!(
            "  {:<10} ({}/{}) -> {}",
            config.shift_label(shift),
            names.len(),
            min_per_shift,
            format_names(names)
        ));
        if names.len() < min_per_shift {
            out.push_str("  ⚠️  understaffed");
        }
        out.push('\n');
    }

    if !schedule.idle.is_empty() {
        out.push_str(&format!(
            "  Off ({}): {}\n",
            schedule.idle.len(),
            format_names(&schedule.idle)
        ));
    }
    out
}

/// Prints the whole week, followed by a list of understaffed shifts
pub fn print_week_schedule(week: &WeekSchedule, config: &ScheduleConfig) {
    for schedule in &week.days {
        print!("{}", render_day_schedule(schedule, week.min_per_shift, config));
    }

    let short: Vec<_> = week.understaffed().collect();
    if short.is_empty() {
        println!("\nAll shifts reached the minimum of {} employees.", week.min_per_shift);
    } else {
        println!("\n⚠️  Understaffed shifts ({}):", short.len());
        for (day, shift, count) in short {
            println!(
                "  - {} {} ({}/{})",
                config.day_label(day),
                config.shift_label(shift),
                count,
                week.min_per_shift
            );
        }
    }
}
