//! Text layout of a month: title, bordered week table and key hints.
//!
//! Lines are split into segments tagged with a [`Role`], so the same layout can be
//! drawn with a [`super::Theme`] or printed as plain text.

use chrono::{Datelike, NaiveDate};
use itertools::Itertools;
use std::fmt;
use termion::event::Key;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::command::Command;
use crate::config::KeyMap;
use crate::grid::{Cell, DayGrid};
use crate::month::CalendarMonth;

pub const CELL_WIDTH: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Title,
    Border,
    Label,
    Day,
    Today,
    Hint,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Line {
    segments: Vec<(Role, String)>,
}

impl Line {
    pub fn new() -> Self {
        Line::default()
    }

    fn styled<S: Into<String>>(role: Role, text: S) -> Self {
        let mut line = Line::new();
        line.push(role, text);
        line
    }

    pub fn push<S: Into<String>>(&mut self, role: Role, text: S) {
        self.segments.push((role, text.into()));
    }

    pub fn segments(&self) -> &[(Role, String)] {
        &self.segments
    }

    /// Width in terminal columns.
    pub fn width(&self) -> usize {
        self.segments.iter().map(|(_, text)| text.width()).sum()
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (_, text) in &self.segments {
            f.write_str(text)?;
        }
        Ok(())
    }
}

fn rule(left: &str, middle: &str, right: &str) -> Line {
    let inner = std::iter::repeat("─".repeat(CELL_WIDTH))
        .take(DayGrid::COLUMNS)
        .join(middle);
    Line::styled(Role::Border, format!("{}{}{}", left, inner, right))
}

/// Centers `text` in `width` columns, cutting off what does not fit.
fn fit(text: &str, width: usize) -> String {
    let mut fitted = String::new();
    let mut used = 0;

    for c in text.chars() {
        let char_width = c.width().unwrap_or(0);
        if used + char_width > width {
            break;
        }
        fitted.push(c);
        used += char_width;
    }

    let padding = width - used;
    format!(
        "{}{}{}",
        " ".repeat(padding / 2),
        fitted,
        " ".repeat(padding - padding / 2)
    )
}

fn table_row<I>(cells: I) -> Line
where
    I: IntoIterator<Item = (Role, String)>,
{
    let mut line = Line::styled(Role::Border, "│");
    for (role, text) in cells {
        line.push(role, fit(&text, CELL_WIDTH));
        line.push(Role::Border, "│");
    }
    line
}

/// Title and week table of `month`. The day matching `today` is tagged [`Role::Today`].
pub fn month_lines(
    month: &CalendarMonth,
    weekdays: &[String; 7],
    today: &NaiveDate,
) -> Vec<Line> {
    let grid = month.grid();
    let today = if month.contains(today) {
        Some(today.day() as u8)
    } else {
        None
    };

    let mut lines = Vec::with_capacity(DayGrid::ROWS + 5);

    lines.push(Line::styled(Role::Title, format!(" {} ", month.title())));
    lines.push(rule("┌", "┬", "┐"));
    lines.push(table_row(
        weekdays.iter().map(|label| (Role::Label, label.clone())),
    ));
    lines.push(rule("├", "┼", "┤"));

    for week in grid.rows() {
        lines.push(table_row(week.iter().map(|cell| {
            let role = match cell {
                Cell::Day(day) if Some(*day) == today => Role::Today,
                _ => Role::Day,
            };
            (role, cell.to_string())
        })));
    }

    lines.push(rule("└", "┴", "┘"));

    lines
}

pub fn key_label(key: &Key) -> String {
    match key {
        Key::Left => "←".to_owned(),
        Key::Right => "→".to_owned(),
        Key::Up => "↑".to_owned(),
        Key::Down => "↓".to_owned(),
        Key::Home => "home".to_owned(),
        Key::End => "end".to_owned(),
        Key::PageUp => "pageup".to_owned(),
        Key::PageDown => "pagedown".to_owned(),
        Key::Esc => "esc".to_owned(),
        Key::Backspace => "backspace".to_owned(),
        Key::Delete => "delete".to_owned(),
        Key::Insert => "insert".to_owned(),
        Key::Char(' ') => "space".to_owned(),
        Key::Char('\n') => "enter".to_owned(),
        Key::Char('\t') => "tab".to_owned(),
        Key::Char(c) => c.to_string(),
        Key::Ctrl(c) => format!("ctrl-{}", c),
        Key::Alt(c) => format!("alt-{}", c),
        Key::F(n) => format!("f{}", n),
        other => format!("{:?}", other).to_lowercase(),
    }
}

/// One line listing the keys bound to each command, e.g. `h/←: previous month | ...`.
pub fn hint_line(key_map: &KeyMap) -> Line {
    const ORDER: [(Command, &str); 4] = [
        (Command::PreviousMonth, "previous month"),
        (Command::NextMonth, "next month"),
        (Command::Today, "today"),
        (Command::Quit, "quit"),
    ];

    let hint = ORDER
        .iter()
        .filter_map(|(command, description)| {
            let keys = key_map
                .iter()
                .filter(|(_, bound)| *bound == command)
                .map(|(key, _)| key_label(key))
                .sorted()
                .join("/");

            if keys.is_empty() {
                None
            } else {
                Some(format!("{}: {}", keys, description))
            }
        })
        .join(" | ");

    Line::styled(Role::Hint, hint)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use chrono::Month;

    fn weekdays() -> [String; 7] {
        Config::default().weekdays
    }

    #[test]
    fn february_2024_table() {
        let month = CalendarMonth::new(2024, Month::February);
        let today = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        let lines = month_lines(&month, &weekdays(), &today);

        assert_eq!(lines.len(), 1 + 3 + DayGrid::ROWS + 1);
        assert_eq!(lines[0].to_string(), " February 2024 ");
        assert_eq!(
            lines[1].to_string(),
            "┌────┬────┬────┬────┬────┬────┬────┐"
        );
        assert_eq!(
            lines[2].to_string(),
            "│Mon │Tue │Wed │Thu │Fri │Sat │Sun │"
        );
        assert_eq!(
            lines[4].to_string(),
            "│    │    │    │  1 │  2 │  3 │  4 │"
        );
        assert_eq!(
            lines[8].to_string(),
            "│ 26 │ 27 │ 28 │ 29 │    │    │    │"
        );
        assert_eq!(
            lines[9].to_string(),
            "│    │    │    │    │    │    │    │"
        );
        assert_eq!(
            lines[10].to_string(),
            "└────┴────┴────┴────┴────┴────┴────┘"
        );
    }

    #[test]
    fn table_lines_share_width() {
        let month = CalendarMonth::new(2024, Month::September);
        let today = NaiveDate::from_ymd_opt(2024, 9, 1).unwrap();
        let lines = month_lines(&month, &weekdays(), &today);

        let width = 1 + DayGrid::COLUMNS * (CELL_WIDTH + 1);
        assert!(lines[1..].iter().all(|line| line.width() == width));
    }

    #[test]
    fn long_labels_are_truncated() {
        let month = CalendarMonth::new(2024, Month::March);
        let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let mut labels = weekdays();
        labels[0] = "Monday".to_owned();
        labels[5] = "Sáb".to_owned();

        let lines = month_lines(&month, &labels, &today);
        assert!(lines[2].to_string().starts_with("│Mond│Tue │"));
        assert!(lines[2].to_string().contains("│Sáb │"));
    }

    #[test]
    fn wide_labels_keep_columns_aligned() {
        let month = CalendarMonth::new(2024, Month::March);
        let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let labels = ["月", "火", "水曜日", "木", "金", "a土土", "日"].map(str::to_owned);

        let lines = month_lines(&month, &labels, &today);
        assert_eq!(
            lines[2].to_string(),
            "│ 月 │ 火 │水曜│ 木 │ 金 │a土 │ 日 │"
        );

        let width = 1 + DayGrid::COLUMNS * (CELL_WIDTH + 1);
        assert!(lines[1..].iter().all(|line| line.width() == width));
    }

    #[test]
    fn marks_today_only_in_its_month() {
        let today = NaiveDate::from_ymd_opt(2024, 2, 14).unwrap();

        let february = CalendarMonth::new(2024, Month::February);
        let marked = month_lines(&february, &weekdays(), &today)
            .iter()
            .flat_map(|line| line.segments())
            .filter(|(role, _)| *role == Role::Today)
            .map(|(_, text)| text.trim().to_owned())
            .collect::<Vec<_>>();
        assert_eq!(marked, vec!["14".to_owned()]);

        let last_year = CalendarMonth::new(2023, Month::February);
        assert!(month_lines(&last_year, &weekdays(), &today)
            .iter()
            .flat_map(|line| line.segments())
            .all(|(role, _)| *role != Role::Today));
    }

    #[test]
    fn hint_lists_default_bindings() {
        let hint = hint_line(&Config::default().key_map).to_string();

        assert_eq!(
            hint,
            "h/←: previous month | l/→: next month | t: today | ctrl-c/q: quit"
        );
    }

    #[test]
    fn key_labels() {
        assert_eq!(key_label(&Key::Left), "←");
        assert_eq!(key_label(&Key::Char('x')), "x");
        assert_eq!(key_label(&Key::Char(' ')), "space");
        assert_eq!(key_label(&Key::Ctrl('n')), "ctrl-n");
        assert_eq!(key_label(&Key::F(3)), "f3");
    }
}
