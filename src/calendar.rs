//! Month grids, as displayed by a calendar view

use std::fmt::{Display, Formatter};

use chrono::{Datelike, NaiveDate};

use crate::event::Event;

/// Column headers of a [`MonthGrid`], weeks start on Sunday
pub const WEEKDAY_HEADERS: [&str; 7] = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"];

/// A cell of the month grid
#[derive(Clone, Debug, PartialEq)]
pub enum DayCell {
    /// A placeholder for the days of the first week that belong to the previous month
    Empty,
    /// A day of the month
    Day {
        day: u32,
        /// Title of the first event of this day (in store order), if any
        event_title: Option<String>,
    },
}

impl DayCell {
    pub fn has_event(&self) -> bool {
        matches!(self, DayCell::Day{ event_title: Some(_), .. })
    }
}


/// Every cell needed to display a month
#[derive(Clone, Debug, PartialEq)]
pub struct MonthGrid {
    first_day: NaiveDate,
    cells: Vec<DayCell>,
}

impl MonthGrid {
    pub fn year(&self) -> i32         { self.first_day.year()  }
    pub fn month(&self) -> u32        { self.first_day.month() }
    pub fn cells(&self) -> &[DayCell] { &self.cells }

    /// The cell of a given day of the month
    pub fn day(&self, day: u32) -> Option<&DayCell> {
        self.cells.iter().find(|cell| matches!(cell, DayCell::Day{ day: d, .. } if *d == day))
    }

    /// Returns e.g. `"June 2024"`
    pub fn label(&self) -> String {
        month_label(self.first_day)
    }
}

impl Display for MonthGrid {
    /// Text rendering of the grid, one week per line. Days that have an event are starred
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{:^28}", self.label())?;
        writeln!(f, " {}", WEEKDAY_HEADERS.join("  "))?;
        for week in self.cells.chunks(7) {
            let line: Vec<String> = week.iter()
                .map(|cell| match cell {
                    DayCell::Empty => "    ".to_string(),
                    DayCell::Day{ day, event_title: None } => format!(" {:>2} ", day),
                    DayCell::Day{ day, event_title: Some(_) } => format!(" {:>2}*", day),
                })
                .collect();
            writeln!(f, "{}", line.concat().trim_end())?;
        }
        Ok(())
    }
}


/// Build the grid of the month that contains `reference`.
///
/// It starts with one [`DayCell::Empty`] per weekday before the 1st (Sunday being 0), followed by one [`DayCell::Day`] per day of the month.
pub fn render_month(reference: NaiveDate, events: &[Event]) -> MonthGrid {
    let first_day = month_start(reference);
    let n_empty = first_day.weekday().num_days_from_sunday();
    let days = days_of_month(first_day.year(), first_day.month());

    let mut cells = Vec::with_capacity(n_empty as usize + days.len());
    cells.extend((0..n_empty).map(|_| DayCell::Empty));

    for date in days {
        let event_title = events.iter()
            .find(|event| event.is_on(date))
            .map(|event| event.title().to_string());
        cells.push(DayCell::Day{ day: date.day(), event_title });
    }

    MonthGrid { first_day, cells }
}

/// The weekday of the first day of a month, from 0 (Sunday) to 6 (Saturday).
///
/// Returns `None` for a month that does not exist (e.g. month 13, or a year chrono cannot represent)
pub fn first_weekday(year: i32, month: u32) -> Option<u32> {
    first_of_month(year, month).map(|first| first.weekday().num_days_from_sunday())
}

/// The number of days of a month, or `None` for a month that does not exist
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    match days_of_month(year, month).len() {
        0 => None,
        n => Some(n as u32),
    }
}

/// Returns e.g. `"June 2024"`
pub fn month_label(date: NaiveDate) -> String {
    date.format("%B %Y").to_string()
}

/// The first day of the month that contains `date`
pub fn month_start(date: NaiveDate) -> NaiveDate {
    // Day 1 exists in the month of any valid date
    date.with_day(1).unwrap_or(date)
}

/// The first day of the month that is `delta` months away from the month of `date`.
///
/// Returns `None` when that month is out of the range chrono can represent
pub fn shift_month(date: NaiveDate, delta: i32) -> Option<NaiveDate> {
    let months = date.year()
        .checked_mul(12)?
        .checked_add(date.month0() as i32)?
        .checked_add(delta)?;
    first_of_month(months.div_euclid(12), months.rem_euclid(12) as u32 + 1)
}

fn first_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1)
}

/// Every day of a month, in order. Empty for a month that does not exist
fn days_of_month(year: i32, month: u32) -> Vec<NaiveDate> {
    (1..=31)
        .map_while(|day| NaiveDate::from_ymd_opt(year, month, day))
        .collect()
}
