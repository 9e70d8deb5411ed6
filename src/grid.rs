//! Layout of a month's days into a fixed grid of weeks.

use chrono::{Datelike, Month, NaiveDate, Weekday};
use std::fmt;

/// A single slot of a [`DayGrid`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Day(u8),
}

impl Cell {
    /// Width of a rendered cell; empty cells keep the same width so columns stay aligned.
    pub const WIDTH: usize = 2;

    pub fn day(&self) -> Option<u8> {
        match self {
            Cell::Day(day) => Some(*day),
            Cell::Empty => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }
}

impl Default for Cell {
    fn default() -> Self {
        Cell::Empty
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty => write!(f, "{:width$}", "", width = Cell::WIDTH),
            Cell::Day(day) => write!(f, "{:>width$}", day, width = Cell::WIDTH),
        }
    }
}

/// Six weeks of seven days, Monday first.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DayGrid {
    cells: [[Cell; DayGrid::COLUMNS]; DayGrid::ROWS],
}

impl DayGrid {
    pub const ROWS: usize = 6;
    pub const COLUMNS: usize = 7;

    pub fn cell(&self, row: usize, column: usize) -> Cell {
        self.cells[row][column]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell; DayGrid::COLUMNS]> {
        self.cells.iter()
    }

    /// All day numbers in row-major order.
    pub fn days(&self) -> impl Iterator<Item = u8> + '_ {
        self.cells.iter().flatten().filter_map(Cell::day)
    }

    /// `(row, column)` of the given day, if the month has it.
    pub fn position_of(&self, day: u8) -> Option<(usize, usize)> {
        self.cells.iter().enumerate().find_map(|(row, week)| {
            week.iter()
                .position(|cell| *cell == Cell::Day(day))
                .map(|column| (row, column))
        })
    }
}

/// Column of a weekday when weeks start on Monday.
pub fn monday_index(weekday: Weekday) -> usize {
    (weekday.num_days_from_sunday() as usize + 6) % 7
}

fn days_of(first: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    let month = first.month();
    first.iter_days().take_while(move |date| date.month() == month)
}

pub fn days_in_month(year: i32, month: Month) -> u32 {
    NaiveDate::from_ymd_opt(year, month.number_from_month(), 1)
        .map(|first| days_of(first).count() as u32)
        .unwrap_or(0)
}

/// Lays out all days of `month` in `year`.
///
/// Each day lands in the column of its weekday; the row advances after every
/// Sunday. Years the date library cannot represent yield an empty grid.
pub fn build(year: i32, month: Month) -> DayGrid {
    let mut grid = DayGrid::default();

    let first = match NaiveDate::from_ymd_opt(year, month.number_from_month(), 1) {
        Some(first) => first,
        None => {
            log::debug!("{:?} {} is out of the supported date range", month, year);
            return grid;
        }
    };

    let mut row = 0;
    for date in days_of(first) {
        let column = monday_index(date.weekday());
        grid.cells[row][column] = Cell::Day(date.day() as u8);

        if column == DayGrid::COLUMNS - 1 {
            row += 1;
        }
    }

    grid
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::FromPrimitive;

    fn months() -> impl Iterator<Item = Month> {
        (1..=12).filter_map(Month::from_u32)
    }

    #[test]
    fn monday_first_columns() {
        assert_eq!(monday_index(Weekday::Mon), 0);
        assert_eq!(monday_index(Weekday::Tue), 1);
        assert_eq!(monday_index(Weekday::Sat), 5);
        assert_eq!(monday_index(Weekday::Sun), 6);
    }

    #[test]
    fn february_leap_year() {
        let grid = build(2024, Month::February);

        assert_eq!(grid.position_of(1), Some((0, 3)));
        assert_eq!(grid.position_of(29), Some((4, 3)));
        assert_eq!(grid.position_of(30), None);
        assert!(grid.rows().nth(5).unwrap().iter().all(Cell::is_empty));
        assert_eq!(grid.cell(0, 0), Cell::Empty);
    }

    #[test]
    fn month_starting_on_sunday_uses_sixth_row() {
        // 2024-09-01 is a Sunday
        let grid = build(2024, Month::September);

        assert_eq!(grid.position_of(1), Some((0, 6)));
        assert_eq!(grid.position_of(2), Some((1, 0)));
        assert_eq!(grid.position_of(30), Some((5, 0)));
    }

    #[test]
    fn february_starting_on_monday_fills_four_rows() {
        // 2021-02-01 is a Monday, 28 days
        let grid = build(2021, Month::February);

        assert_eq!(grid.position_of(1), Some((0, 0)));
        assert_eq!(grid.position_of(28), Some((3, 6)));
        assert!(grid.rows().skip(4).flatten().all(Cell::is_empty));
    }

    #[test]
    fn days_in_month_respects_leap_years() {
        assert_eq!(days_in_month(2024, Month::February), 29);
        assert_eq!(days_in_month(2023, Month::February), 28);
        assert_eq!(days_in_month(1900, Month::February), 28);
        assert_eq!(days_in_month(2000, Month::February), 29);
        assert_eq!(days_in_month(2024, Month::April), 30);
        assert_eq!(days_in_month(2024, Month::December), 31);
    }

    #[test]
    fn every_day_appears_once_in_order() {
        for year in (1582..=2100).step_by(7) {
            for month in months() {
                let grid = build(year, month);
                let expected = (1..=days_in_month(year, month) as u8).collect::<Vec<_>>();

                assert_eq!(
                    grid.days().collect::<Vec<_>>(),
                    expected,
                    "{:?} {}",
                    month,
                    year
                );
            }
        }
    }

    #[test]
    fn first_day_in_its_weekday_column() {
        for year in [-44, 1, 1970, 2000, 2024, 9999] {
            for month in months() {
                let first = NaiveDate::from_ymd_opt(year, month.number_from_month(), 1).unwrap();
                let grid = build(year, month);

                assert_eq!(
                    grid.position_of(1),
                    Some((0, monday_index(first.weekday()))),
                    "{:?} {}",
                    month,
                    year
                );
            }
        }
    }

    #[test]
    fn unrepresentable_year_yields_empty_grid() {
        let grid = build(i32::MAX, Month::January);
        assert_eq!(grid, DayGrid::default());
        assert_eq!(days_in_month(i32::MAX, Month::January), 0);
    }

    #[test]
    fn cells_render_with_fixed_width() {
        assert_eq!(Cell::Empty.to_string(), "  ");
        assert_eq!(Cell::Day(7).to_string(), " 7");
        assert_eq!(Cell::Day(31).to_string(), "31");
    }
}
