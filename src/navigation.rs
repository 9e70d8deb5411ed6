use crate::month::CalendarMonth;

/// Tracks the month currently on display.
#[derive(Debug, Clone)]
pub struct Navigator {
    current: CalendarMonth,
}

impl Navigator {
    pub fn new(start: CalendarMonth) -> Self {
        Navigator { current: start }
    }

    pub fn current(&self) -> CalendarMonth {
        self.current
    }

    pub fn next(&mut self) {
        match self.current.succ() {
            Some(month) => self.current = month,
            None => log::debug!("Already at the last supported month ({})", self.current),
        }
    }

    pub fn previous(&mut self) {
        match self.current.pred() {
            Some(month) => self.current = month,
            None => log::debug!("Already at the first supported month ({})", self.current),
        }
    }

    pub fn jump_to(&mut self, month: CalendarMonth) {
        self.current = month;
    }
}
