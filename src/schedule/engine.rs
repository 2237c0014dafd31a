use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, info, warn};

use crate::config::{ConfigError, ScheduleConfig};
use super::types::{Day, DaySchedule, Employee, Shift, WeekSchedule, SHIFTS_PER_DAY};

/// Weekly shift assignment: preference-first greedy seating followed by a
/// random fill of every shift still below the staffing minimum.
///
/// Processing is order-sensitive on purpose. The employee pool is shuffled
/// at the start of each day so nobody is systematically considered first,
/// which is why the random source is injected rather than owned.
#[derive(Debug, Clone)]
pub struct ShiftAssigner {
    config: ScheduleConfig,
}

impl ShiftAssigner {
    /// Creates an assigner, rejecting configurations that fail validation.
    pub fn new(config: ScheduleConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ScheduleConfig {
        &self.config
    }

    /// Schedules the whole week, mutating `employees` in place.
    ///
    /// Filler employees are appended once, then each day Monday..Sunday is
    /// processed in turn. On return the vector holds every employee (fillers
    /// included) in the order left by the last daily shuffle.
    pub fn assign<R: Rng + ?Sized>(&self, employees: &mut Vec<Employee>, rng: &mut R) -> WeekSchedule {
        self.append_fillers(employees);

        let mut week = WeekSchedule::new(self.config.min_employees_per_shift);
        for day in Day::ALL {
            employees.shuffle(rng);

            let schedule = week.day_mut(day);
            self.seat_preferred(day, employees, schedule);
            self.fill_shortfalls(day, employees, schedule, rng);

            schedule.idle = employees
                .iter()
                .filter(|e| !e.is_assigned_on(day))
                .map(|e| e.name.clone())
                .collect();

            debug!(
                day = %day,
                morning = schedule.headcount(Shift::Morning),
                afternoon = schedule.headcount(Shift::Afternoon),
                evening = schedule.headcount(Shift::Evening),
                idle = schedule.idle.len(),
                "Day scheduled"
            );
        }

        week
    }

    fn append_fillers(&self, employees: &mut Vec<Employee>) {
        for name in &self.config.filler_employees {
            if employees.iter().any(|e| &e.name == name) {
                warn!(name = %name, "Filler employee shares a name with another employee");
            }
            employees.push(Employee::without_preferences(name.clone()));
        }
    }

    /// Under the weekly cap and not yet working on `day`
    fn is_available(&self, employee: &Employee, day: Day) -> bool {
        employee.assigned_days() < self.config.max_shifts_per_employee && !employee.is_assigned_on(day)
    }

    /// Seats employees on the shift they asked for, up to the staffing minimum.
    fn seat_preferred(&self, day: Day, employees: &mut [Employee], schedule: &mut DaySchedule) {
        // Indices into `employees`, in the day's shuffled order
        let mut candidates: [Vec<usize>; SHIFTS_PER_DAY] = Default::default();
        for (idx, employee) in employees.iter().enumerate() {
            if !self.is_available(employee, day) {
                continue;
            }
            if let Some(shift) = employee.preference(day) {
                candidates[shift.index()].push(idx);
            }
        }

        for shift in Shift::ALL {
            for &idx in &candidates[shift.index()] {
                if schedule.headcount(shift) >= self.config.min_employees_per_shift {
                    break;
                }
                let employee = &mut employees[idx];
                if self.is_available(employee, day) {
                    seat(employee, day, shift, schedule);
                }
            }
        }
    }

    /// Tops up every shift below the minimum with randomly chosen employees.
    ///
    /// The eligible pool is rebuilt on every pass: each seating takes one
    /// employee out of it, so the loop ends after at most `employees.len()`
    /// iterations. An empty pool leaves the shift understaffed.
    fn fill_shortfalls<R: Rng + ?Sized>(
        &self,
        day: Day,
        employees: &mut [Employee],
        schedule: &mut DaySchedule,
        rng: &mut R,
    ) {
        for shift in Shift::ALL {
            while schedule.headcount(shift) < self.config.min_employees_per_shift {
                // A name appears at most once per shift, so namesakes end up on different shifts.
                let seated = schedule.seated_in(shift);
                let eligible: Vec<usize> = employees
                    .iter()
                    .enumerate()
                    .filter(|(_, e)| self.is_available(e, day) && !seated.contains(&e.name))
                    .map(|(idx, _)| idx)
                    .collect();

                let Some(&idx) = eligible.choose(rng) else {
                    info!(
                        day = %day,
                        shift = %shift,
                        seated = schedule.headcount(shift),
                        required = self.config.min_employees_per_shift,
                        "Shift left understaffed, no eligible employees remain"
                    );
                    break;
                };
                seat(&mut employees[idx], day, shift, schedule);
            }
        }
    }
}

fn seat(employee: &mut Employee, day: Day, shift: Shift, schedule: &mut DaySchedule) {
    if employee.record_shift(day, shift) {
        schedule.seat(shift, employee.name.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use crate::schedule::types::DAYS_PER_WEEK;

    fn no_fillers() -> ScheduleConfig {
        ScheduleConfig {
            filler_employees: Vec::new(),
            ..ScheduleConfig::default()
        }
    }

    fn every_day(shift: Option<Shift>) -> [Option<Shift>; DAYS_PER_WEEK] {
        [shift; DAYS_PER_WEEK]
    }

    fn random_roster(count: usize, rng: &mut StdRng) -> Vec<Employee> {
        let choices = [None, Some(Shift::Morning), Some(Shift::Afternoon), Some(Shift::Evening)];
        (0..count)
            .map(|i| {
                let mut prefs = [None; DAYS_PER_WEEK];
                for slot in prefs.iter_mut() {
                    *slot = *choices.choose(rng).unwrap();
                }
                Employee::new(format!("Employee {}", i + 1), prefs)
            })
            .collect()
    }

    fn assert_no_double_booking(week: &WeekSchedule) {
        for schedule in &week.days {
            let mut names: Vec<&String> = schedule.seated.values().flatten().collect();
            let total = names.len();
            names.sort();
            names.dedup();
            assert_eq!(names.len(), total, "double booking on {}", schedule.day);
        }
    }

    #[test]
    fn test_two_morning_employees_without_fillers() {
        let mut employees = vec![
            Employee::new("Ana", every_day(Some(Shift::Morning))),
            Employee::new("Ben", every_day(Some(Shift::Morning))),
        ];
        let assigner = ShiftAssigner::new(no_fillers()).unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        let week = assigner.assign(&mut employees, &mut rng);

        for day in &Day::ALL[..5] {
            let schedule = week.day(*day);
            assert_eq!(schedule.headcount(Shift::Morning), 2);
            assert_eq!(schedule.headcount(Shift::Afternoon), 0);
            assert_eq!(schedule.headcount(Shift::Evening), 0);
        }
        for day in [Day::Saturday, Day::Sunday] {
            let schedule = week.day(day);
            assert!(Shift::ALL.iter().all(|&s| schedule.headcount(s) == 0));
            assert_eq!(schedule.idle.len(), 2);
        }
        for emp in &employees {
            assert_eq!(emp.assigned_days(), 5);
            assert!(emp.assigned_shifts().values().all(|&s| s == Shift::Morning));
        }
        assert_eq!(week.understaffed().count(), 5 * 2 + 2 * 3);
    }

    #[test]
    fn test_twenty_random_employees_fill_every_shift() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut employees = random_roster(20, &mut rng);
        let assigner = ShiftAssigner::new(ScheduleConfig::default()).unwrap();
        let week = assigner.assign(&mut employees, &mut rng);

        assert_eq!(employees.len(), 28);
        assert!(week.is_fully_staffed());
        for schedule in &week.days {
            for shift in Shift::ALL {
                assert_eq!(schedule.headcount(shift), 2);
            }
        }
        assert!(employees.iter().all(|e| e.assigned_days() <= 5));
        assert_no_double_booking(&week);
    }

    #[test]
    fn test_same_seed_gives_same_schedule() {
        let mut seed_rng = StdRng::seed_from_u64(3);
        let roster = random_roster(12, &mut seed_rng);
        let assigner = ShiftAssigner::new(ScheduleConfig::default()).unwrap();

        let mut first = roster.clone();
        let week_a = assigner.assign(&mut first, &mut StdRng::seed_from_u64(99));
        let mut second = roster.clone();
        let week_b = assigner.assign(&mut second, &mut StdRng::seed_from_u64(99));

        assert_eq!(week_a, week_b);
        assert_eq!(first, second);
    }

    #[test]
    fn test_fillers_are_appended_once() {
        let mut employees = vec![Employee::without_preferences("Ana")];
        let assigner = ShiftAssigner::new(ScheduleConfig::default()).unwrap();
        assigner.assign(&mut employees, &mut StdRng::seed_from_u64(1));

        assert_eq!(employees.len(), 9);
        for filler in &assigner.config().filler_employees {
            assert_eq!(employees.iter().filter(|e| &e.name == filler).count(), 1);
        }
        let fillers: Vec<_> = employees.iter().filter(|e| e.name != "Ana").collect();
        assert!(fillers.iter().all(|e| e.preferences.iter().all(Option::is_none)));
    }

    #[test]
    fn test_small_pool_caps_out_and_leaves_shifts_short() {
        let mut employees = vec![
            Employee::without_preferences("Ana"),
            Employee::without_preferences("Ben"),
            Employee::without_preferences("Cid"),
        ];
        let assigner = ShiftAssigner::new(no_fillers()).unwrap();
        let week = assigner.assign(&mut employees, &mut StdRng::seed_from_u64(5));

        for day in &Day::ALL[..5] {
            let schedule = week.day(*day);
            assert_eq!(schedule.headcount(Shift::Morning), 2);
            assert_eq!(schedule.headcount(Shift::Afternoon), 1);
            assert_eq!(schedule.headcount(Shift::Evening), 0);
            assert!(schedule.idle.is_empty());
        }
        for day in [Day::Saturday, Day::Sunday] {
            assert_eq!(week.day(day).idle.len(), 3);
        }
        assert!(employees.iter().all(|e| e.assigned_days() == 5));
    }

    #[test]
    fn test_preferences_honoured_when_capacity_allows() {
        let mut employees = vec![
            Employee::new("M1", every_day(Some(Shift::Morning))),
            Employee::new("M2", every_day(Some(Shift::Morning))),
            Employee::new("A1", every_day(Some(Shift::Afternoon))),
            Employee::new("A2", every_day(Some(Shift::Afternoon))),
            Employee::new("E1", every_day(Some(Shift::Evening))),
            Employee::new("E2", every_day(Some(Shift::Evening))),
        ];
        let assigner = ShiftAssigner::new(no_fillers()).unwrap();
        assigner.assign(&mut employees, &mut StdRng::seed_from_u64(11));

        for emp in &employees {
            assert_eq!(emp.assigned_days(), 5);
            for (day, shift) in emp.assigned_shifts() {
                assert_eq!(Some(*shift), emp.preference(*day), "{} on {}", emp.name, day);
            }
        }
    }

    #[test]
    fn test_overflow_preference_moves_to_fill_pass() {
        let mut employees = vec![
            Employee::new("Ana", every_day(Some(Shift::Morning))),
            Employee::new("Ben", every_day(Some(Shift::Morning))),
            Employee::new("Cid", every_day(Some(Shift::Morning))),
        ];
        let assigner = ShiftAssigner::new(no_fillers()).unwrap();
        let week = assigner.assign(&mut employees, &mut StdRng::seed_from_u64(8));

        let monday = week.day(Day::Monday);
        assert_eq!(monday.headcount(Shift::Morning), 2);
        assert_eq!(monday.headcount(Shift::Afternoon), 1);
        assert_eq!(monday.headcount(Shift::Evening), 0);

        let moved = &monday.seated_in(Shift::Afternoon)[0];
        assert!(!monday.seated_in(Shift::Morning).contains(moved));
    }

    #[test]
    fn test_namesakes_land_in_different_shifts() {
        let mut employees = vec![
            Employee::without_preferences("Sam"),
            Employee::without_preferences("Sam"),
        ];
        let assigner = ShiftAssigner::new(no_fillers()).unwrap();
        let week = assigner.assign(&mut employees, &mut StdRng::seed_from_u64(2));

        for day in &Day::ALL[..5] {
            let schedule = week.day(*day);
            assert_eq!(schedule.seated_in(Shift::Morning), ["Sam"]);
            assert_eq!(schedule.seated_in(Shift::Afternoon), ["Sam"]);
            assert_eq!(schedule.headcount(Shift::Evening), 0);
        }
        assert!(employees.iter().all(|e| e.assigned_days() == 5));
    }

    #[test]
    fn test_filler_sharing_a_roster_name_is_not_seated_beside_it() {
        let config = ScheduleConfig {
            filler_employees: vec!["Chris".into()],
            ..ScheduleConfig::default()
        };
        let mut employees = vec![Employee::without_preferences("Chris")];
        let assigner = ShiftAssigner::new(config).unwrap();
        let week = assigner.assign(&mut employees, &mut StdRng::seed_from_u64(1));

        for schedule in &week.days {
            for shift in Shift::ALL {
                assert!(schedule.headcount(shift) <= 1, "{} {}", schedule.day, shift);
            }
        }
        assert_eq!(week.day(Day::Monday).seated_in(Shift::Morning), ["Chris"]);
        assert_eq!(week.day(Day::Monday).seated_in(Shift::Afternoon), ["Chris"]);
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = ScheduleConfig {
            days: vec!["Mon".into(); 6],
            ..ScheduleConfig::default()
        };
        assert!(matches!(ShiftAssigner::new(config), Err(ConfigError::ValidationError(_))));
    }
}
