//! # Calendar Grid
//!
//! Spreads a user's recorded days over a year laid out as months of
//! Monday-first weeks.

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::api::DayEntry;

pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// One calendar cell; `level` is `None` when nothing was recorded
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub level: Option<i32>,
    pub comment: Option<String>,
}

/// Seven slots, Monday first; slots outside the month are `None`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Week {
    pub days: [Option<CalendarDay>; 7],
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Month {
    pub name: &'static str,
    /// 1-based
    pub number: u32,
    pub weeks: Vec<Week>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearCalendar {
    pub year: i32,
    pub months: Vec<Month>,
}

impl YearCalendar {
    /// The cell for `date`, if it belongs to this year
    pub fn day(&self, date: NaiveDate) -> Option<&CalendarDay> {
        if date.year() != self.year {
            return None;
        }

        self.months
            .get(date.month0() as usize)?
            .weeks
            .iter()
            .flat_map(|week| week.days.iter().flatten())
            .find(|day| day.date == date)
    }

    /// Number of days carrying a level
    pub fn recorded_days(&self) -> usize {
        self.months
            .iter()
            .flat_map(|m| m.weeks.iter())
            .flat_map(|w| w.days.iter().flatten())
            .filter(|d| d.level.is_some())
            .count()
    }
}

/// Build the grid for `year`; entries of other years are ignored.
/// `None` when the year is outside chrono's supported range.
pub fn build_year(year: i32, entries: &[DayEntry]) -> Option<YearCalendar> {
    let by_date: HashMap<NaiveDate, &DayEntry> =
        entries.iter().map(|entry| (entry.date, entry)).collect();

    let mut months = Vec::with_capacity(12);

    for (index, name) in MONTH_NAMES.into_iter().enumerate() {
        let number = index as u32 + 1;
        let mut weeks = vec![Week::default()];
        let mut date = NaiveDate::from_ymd_opt(year, number, 1)?;

        while date.month() == number && date.year() == year {
            let weekday = date.weekday().num_days_from_monday() as usize;

            if date.day() != 1 && weekday == 0 {
                weeks.push(Week::default());
            }

            let entry = by_date.get(&date);
            if let Some(week) = weeks.last_mut() {
                week.days[weekday] = Some(CalendarDay {
                    date,
                    level: entry.map(|e| e.level),
                    comment: entry.and_then(|e| e.comment.clone()),
                });
            }

            date = match date.succ_opt() {
                Some(next) => next,
                None => break,
            };
        }

        months.push(Month {
            name,
            number,
            weeks,
        });
    }

    Some(YearCalendar { year, months })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn entry(date: NaiveDate, level: i32) -> DayEntry {
        DayEntry {
            date,
            level,
            comment: None,
        }
    }

    #[test]
    fn test_twelve_months_with_every_day() {
        let calendar = build_year(2024, &[]).unwrap();

        assert_eq!(calendar.months.len(), 12);
        assert_eq!(calendar.months[0].name, "January");
        assert_eq!(calendar.months[11].name, "December");

        let cells: usize = calendar
            .months
            .iter()
            .flat_map(|m| m.weeks.iter())
            .map(|w| w.days.iter().flatten().count())
            .sum();
        assert_eq!(cells, 366);
        assert_eq!(calendar.recorded_days(), 0);
    }

    #[test]
    fn test_weeks_start_on_monday() {
        let calendar = build_year(2024, &[]).unwrap();

        for month in &calendar.months {
            for (i, week) in month.weeks.iter().enumerate() {
                for (slot, day) in week.days.iter().enumerate() {
                    if let Some(day) = day {
                        assert_eq!(day.date.weekday().num_days_from_monday() as usize, slot);
                    }
                }
                // every week after the first opens on a Monday
                if i > 0 {
                    assert!(week.days[0].is_some());
                }
            }
        }
    }

    #[test]
    fn test_month_layout() {
        // 2024-01-01 is a Monday: 31 days over 5 weeks
        let calendar = build_year(2024, &[]).unwrap();
        let january = &calendar.months[0];
        assert_eq!(january.weeks.len(), 5);
        assert_eq!(january.weeks[0].days[0].as_ref().unwrap().date, date(2024, 1, 1));

        // 2024-09-01 is a Sunday: alone in the first week
        let september = &calendar.months[8];
        assert_eq!(september.weeks[0].days.iter().flatten().count(), 1);
        assert_eq!(september.weeks[0].days[6].as_ref().unwrap().date, date(2024, 9, 1));
        assert_eq!(september.weeks[1].days[0].as_ref().unwrap().date, date(2024, 9, 2));
        assert_eq!(september.weeks.len(), 6);
    }

    #[test]
    fn test_entries_land_on_their_cells() {
        let entries = vec![
            entry(date(2024, 2, 29), 3),
            entry(date(2024, 12, 31), 0),
            entry(date(2023, 12, 31), 5),
        ];
        let calendar = build_year(2024, &entries).unwrap();

        assert_eq!(calendar.day(date(2024, 2, 29)).unwrap().level, Some(3));
        assert_eq!(calendar.day(date(2024, 12, 31)).unwrap().level, Some(0));
        assert_eq!(calendar.day(date(2024, 3, 1)).unwrap().level, None);
        assert!(calendar.day(date(2023, 12, 31)).is_none());
        assert_eq!(calendar.recorded_days(), 2);
    }

    #[test]
    fn test_unsorted_entries() {
        let entries = vec![entry(date(2023, 6, 2), 1), entry(date(2023, 6, 1), 2)];
        let calendar = build_year(2023, &entries).unwrap();

        assert_eq!(calendar.day(date(2023, 6, 1)).unwrap().level, Some(2));
        assert_eq!(calendar.day(date(2023, 6, 2)).unwrap().level, Some(1));
    }
}
