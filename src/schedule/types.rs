use std::collections::BTreeMap;
use std::fmt;

pub const DAYS_PER_WEEK: usize = 7;
pub const SHIFTS_PER_DAY: usize = 3;

/// Day of the planning week, in scheduling order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Day {
    pub const ALL: [Day; DAYS_PER_WEEK] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
        Day::Saturday,
        Day::Sunday,
    ];

    /// Position of the day in the week (Monday = 0)
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Day::Monday => "Monday",
            Day::Tuesday => "Tuesday",
            Day::Wednesday => "Wednesday",
            Day::Thursday => "Thursday",
            Day::Friday => "Friday",
            Day::Saturday => "Saturday",
            Day::Sunday => "Sunday",
        }
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Daily work period, in seating order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Shift {
    Morning,
    Afternoon,
    Evening,
}

impl Shift {
    pub const ALL: [Shift; SHIFTS_PER_DAY] = [Shift::Morning, Shift::Afternoon, Shift::Evening];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Shift::Morning => "Morning",
            Shift::Afternoon => "Afternoon",
            Shift::Evening => "Evening",
        }
    }
}

impl fmt::Display for Shift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An employee on the weekly roster
///
/// The assigned-day count is derived from the day -> shift map, so an
/// employee can never hold two shifts on one day and the count always
/// matches the number of recorded shifts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Employee {
    pub name: String,
    pub preferences: [Option<Shift>; DAYS_PER_WEEK],
    assigned_shifts: BTreeMap<Day, Shift>,
}

impl Employee {
    pub fn new(name: impl Into<String>, preferences: [Option<Shift>; DAYS_PER_WEEK]) -> Self {
        Self {
            name: name.into(),
            preferences,
            assigned_shifts: BTreeMap::new(),
        }
    }

    /// Creates an employee with no preference on any day
    pub fn without_preferences(name: impl Into<String>) -> Self {
        Self::new(name, [None; DAYS_PER_WEEK])
    }

    pub fn preference(&self, day: Day) -> Option<Shift> {
        self.preferences[day.index()]
    }

    /// Number of days this employee is scheduled this week
    pub fn assigned_days(&self) -> usize {
        self.assigned_shifts.len()
    }

    pub fn assigned_shifts(&self) -> &BTreeMap<Day, Shift> {
        &self.assigned_shifts
    }

    pub fn shift_on(&self, day: Day) -> Option<Shift> {
        self.assigned_shifts.get(&day).copied()
    }

    pub fn is_assigned_on(&self, day: Day) -> bool {
        self.assigned_shifts.contains_key(&day)
    }

    /// Records a shift for the given day.
    /// Returns false and leaves the employee untouched if the day is already taken.
    pub fn record_shift(&mut self, day: Day, shift: Shift) -> bool {
        if self.is_assigned_on(day) {
            return false;
        }
        self.assigned_shifts.insert(day, shift);
        true
    }
}

/// Staffing of a single day
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaySchedule {
    pub day: Day,
    pub seated: BTreeMap<Shift, Vec<String>>, // shift -> employee names, in seating order
    pub idle: Vec<String>, // employees not working this day
}

impl DaySchedule {
    pub fn new(day: Day) -> Self {
        Self {
            day,
            seated: Shift::ALL.iter().map(|&shift| (shift, Vec::new())).collect(),
            idle: Vec::new(),
        }
    }

    pub fn seated_in(&self, shift: Shift) -> &[String] {
        self.seated.get(&shift).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn headcount(&self, shift: Shift) -> usize {
        self.seated_in(shift).len()
    }

    pub fn seat(&mut self, shift: Shift, name: String) {
        self.seated.entry(shift).or_default().push(name);
    }
}

/// Assignment table for the whole week
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekSchedule {
    pub min_per_shift: usize,
    pub days: Vec<DaySchedule>,
}

impl WeekSchedule {
    pub fn new(min_per_shift: usize) -> Self {
        Self {
            min_per_shift,
            days: Day::ALL.iter().map(|&day| DaySchedule::new(day)).collect(),
        }
    }

    pub fn day(&self, day: Day) -> &DaySchedule {
        &self.days[day.index()]
    }

    pub fn day_mut(&mut self, day: Day) -> &mut DaySchedule {
        &mut self.days[day.index()]
    }

    /// (day, shift, headcount) for every cell left below the staffing minimum
    pub fn understaffed(&self) -> impl Iterator<Item = (Day, Shift, usize)> + '_ {
        self.days.iter().flat_map(move |schedule| {
            Shift::ALL.into_iter().filter_map(move |shift| {
                let count = schedule.headcount(shift);
                (count < self.min_per_shift).then_some((schedule.day, shift, count))
            })
        })
    }

    pub fn is_fully_staffed(&self) -> bool {
        self.understaffed().next().is_none()
    }
}
