use chrono::{Local, NaiveDate};
use termion::event::Key;
use unsegen::base::Terminal;
use unsegen::input::{Behavior, Event as InputEvent, Input};
use unsegen::widget::*;

use crate::command::Command;
use crate::config::Config;
use crate::events::{Dispatcher, Event};
use crate::month::CalendarMonth;
use crate::navigation::Navigator;

use super::layout::{self, Line};
use super::MonthPane;

pub struct App<'a> {
    config: &'a Config,
    navigator: Navigator,
    today: NaiveDate,
    running: bool,
}

impl<'a> App<'a> {
    pub fn new(config: &'a Config, start: CalendarMonth, today: NaiveDate) -> App<'a> {
        App {
            config,
            navigator: Navigator::new(start),
            today,
            running: true,
        }
    }

    pub fn current(&self) -> CalendarMonth {
        self.navigator.current()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn set_today(&mut self, today: NaiveDate) {
        self.today = today;
    }

    pub fn execute(&mut self, command: Command) {
        match command {
            Command::NextMonth => self.navigator.next(),
            Command::PreviousMonth => self.navigator.previous(),
            Command::Today => self.navigator.jump_to(CalendarMonth::of(&self.today)),
            Command::Quit => self.running = false,
        }
        log::trace!("{} -> {}", command, self.navigator.current());
    }

    /// Runs the command bound to `key`. Returns whether the key was bound.
    pub fn handle_key(&mut self, key: Key) -> bool {
        match self.config.command_for(&key) {
            Some(command) => {
                self.execute(command);
                true
            }
            None => false,
        }
    }

    pub fn lines(&self) -> Vec<Line> {
        let mut lines =
            layout::month_lines(&self.current(), &self.config.weekdays, &self.today);
        lines.push(Line::new());
        lines.push(layout::hint_line(&self.config.key_map));
        lines
    }

    fn as_widget(&self) -> MonthPane<'_> {
        MonthPane::new(self.lines(), &self.config.theme)
    }

    pub fn run(
        &mut self,
        dispatcher: Dispatcher,
        mut term: Terminal,
    ) -> Result<(), Box<dyn std::error::Error>> {
        while self.running {
            // Draw
            let root = term.create_root_window();
            self.as_widget().draw(root, RenderingHints::new());
            term.present();

            // Handle events
            match dispatcher.next()? {
                Event::Update => self.set_today(Local::now().date_naive()),
                Event::Resize => log::trace!("Terminal resized"),
                Event::Input(input) => {
                    let _leftover = input.chain(KeyBindings(self)).finish();
                }
            }
        }

        Ok(())
    }
}

struct KeyBindings<'a, 'c>(&'a mut App<'c>);

impl Behavior for KeyBindings<'_, '_> {
    fn input(self, input: Input) -> Option<Input> {
        if let InputEvent::Key(key) = input.event {
            if self.0.handle_key(key) {
                return None;
            }
            log::trace!("Unbound key {:?}", key);
        }
        Some(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::layout::Role;
    use chrono::Month;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 10, 17).unwrap()
    }

    #[test]
    fn default_keys_navigate() {
        let config = Config::default();
        let mut app = App::new(&config, CalendarMonth::new(2024, Month::January), today());

        assert!(app.handle_key(Key::Char('l')));
        assert!(app.handle_key(Key::Right));
        assert!(app.handle_key(Key::Char('l')));
        assert_eq!(app.current(), CalendarMonth::new(2024, Month::April));

        assert!(app.handle_key(Key::Left));
        assert_eq!(app.current(), CalendarMonth::new(2024, Month::March));

        assert!(app.handle_key(Key::Char('h')));
        assert_eq!(app.current(), CalendarMonth::new(2024, Month::February));
        assert!(app.is_running());
    }

    #[test]
    fn today_returns_to_current_month() {
        let config = Config::default();
        let mut app = App::new(&config, CalendarMonth::new(1999, Month::June), today());

        app.handle_key(Key::Char('t'));
        assert_eq!(app.current(), CalendarMonth::new(2024, Month::October));

        app.set_today(NaiveDate::from_ymd_opt(2024, 11, 1).unwrap());
        app.handle_key(Key::Char('t'));
        assert_eq!(app.current(), CalendarMonth::new(2024, Month::November));
    }

    #[test]
    fn quit_keys_stop_the_app() {
        let config = Config::default();

        for key in [Key::Char('q'), Key::Ctrl('c')] {
            let mut app = App::new(&config, CalendarMonth::of(&today()), today());
            assert!(app.handle_key(key));
            assert!(!app.is_running());
        }
    }

    #[test]
    fn unbound_keys_are_ignored() {
        let config = Config::default();
        let start = CalendarMonth::new(2024, Month::May);
        let mut app = App::new(&config, start, today());

        assert!(!app.handle_key(Key::Char('x')));
        assert!(!app.handle_key(Key::Up));
        assert_eq!(app.current(), start);
        assert!(app.is_running());
    }

    #[test]
    fn custom_bindings_apply() {
        let config = "[keys]\n\"ctrl-n\" = \"next-month\"\n\"ctrl-p\" = \"previous-month\""
            .parse::<Config>()
            .unwrap();
        let mut app = App::new(&config, CalendarMonth::new(2024, Month::December), today());

        app.handle_key(Key::Ctrl('n'));
        assert_eq!(app.current(), CalendarMonth::new(2025, Month::January));
        app.handle_key(Key::Ctrl('p'));
        app.handle_key(Key::Ctrl('p'));
        assert_eq!(app.current(), CalendarMonth::new(2024, Month::November));
    }

    #[test]
    fn lines_follow_navigation() {
        let config = Config::default();
        let mut app = App::new(&config, CalendarMonth::new(2024, Month::September), today());

        assert_eq!(app.lines()[0].to_string(), " September 2024 ");
        app.execute(Command::NextMonth);
        let lines = app.lines();
        assert_eq!(lines[0].to_string(), " October 2024 ");

        let hint = lines.last().unwrap();
        assert!(hint.segments().iter().all(|(role, _)| *role == Role::Hint));
        assert!(hint.to_string().contains("t: today"));
    }
}
