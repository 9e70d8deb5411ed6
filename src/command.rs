use serde::Deserialize;
use std::fmt;

/// Actions a key can be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Command {
    NextMonth,
    PreviousMonth,
    Today,
    Quit,
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Command::NextMonth => "next-month",
            Command::PreviousMonth => "previous-month",
            Command::Today => "today",
            Command::Quit => "quit",
        };
        f.write_str(name)
    }
}
