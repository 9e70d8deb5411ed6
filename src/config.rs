use phf::phf_map;
use serde::Deserialize;
use serde_with::DeserializeFromStr;
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use termion::event::Key;
use unsegen::base::Color;

use crate::command::Command;
use crate::error::{Error, ErrorKind, Result};
use crate::ui::Theme;

pub type KeyMap = HashMap<Key, Command>;

const CONFIG_PATH_ENV_VAR: &str = "ALMANAC_CONFIG_FILE";

static NAMED_KEYS: phf::Map<&'static str, Key> = phf_map! {
    "left" => Key::Left,
    "right" => Key::Right,
    "up" => Key::Up,
    "down" => Key::Down,
    "home" => Key::Home,
    "end" => Key::End,
    "pageup" => Key::PageUp,
    "pagedown" => Key::PageDown,
    "esc" => Key::Esc,
    "enter" => Key::Char('\n'),
    "space" => Key::Char(' '),
    "tab" => Key::Char('\t'),
    "backspace" => Key::Backspace,
    "delete" => Key::Delete,
    "insert" => Key::Insert,
};

static NAMED_COLORS: phf::Map<&'static str, Color> = phf_map! {
    "black" => Color::Black,
    "red" => Color::Red,
    "green" => Color::Green,
    "yellow" => Color::Yellow,
    "blue" => Color::Blue,
    "magenta" => Color::Magenta,
    "cyan" => Color::Cyan,
    "white" => Color::White,
    "light-black" => Color::LightBlack,
    "light-red" => Color::LightRed,
    "light-green" => Color::LightGreen,
    "light-yellow" => Color::LightYellow,
    "light-blue" => Color::LightBlue,
    "light-magenta" => Color::LightMagenta,
    "light-cyan" => Color::LightCyan,
    "light-white" => Color::LightWhite,
};

/// A key as written in the configuration file, e.g. `l`, `left`, `ctrl-c` or `f5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, DeserializeFromStr)]
pub struct KeySpec(pub Key);

fn single_char(s: &str) -> Option<char> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

impl FromStr for KeySpec {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if let Some(c) = single_char(s) {
            return Ok(KeySpec(Key::Char(c)));
        }

        let lowercase = s.to_lowercase();

        if let Some(key) = NAMED_KEYS.get(lowercase.as_str()) {
            return Ok(KeySpec(*key));
        }

        let key = if lowercase.starts_with("ctrl-") {
            single_char(&lowercase["ctrl-".len()..]).map(Key::Ctrl)
        } else if lowercase.starts_with("alt-") {
            single_char(&s["alt-".len()..]).map(Key::Alt)
        } else if let Some(num) = lowercase.strip_prefix('f') {
            num.parse::<u8>()
                .ok()
                .filter(|n| (1..=12).contains(n))
                .map(Key::F)
        } else {
            None
        };

        key.map(KeySpec).ok_or_else(|| {
            Error::new(
                ErrorKind::KeyBinding,
                &format!("Key '{}' not recognized", s),
            )
        })
    }
}

/// A color as written in the configuration file: a name, an ANSI index or `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, DeserializeFromStr)]
pub struct ColorSpec(pub Color);

impl FromStr for ColorSpec {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let lowercase = s.trim().to_lowercase();

        if let Some(color) = NAMED_COLORS.get(lowercase.as_str()) {
            return Ok(ColorSpec(*color));
        }

        if let Ok(index) = lowercase.parse::<u8>() {
            return Ok(ColorSpec(Color::Ansi(index)));
        }

        if let Some(hex) = lowercase.strip_prefix('#') {
            if hex.is_ascii() && hex.len() == 6 {
                let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
                if let (Some(r), Some(g), Some(b)) = (channel(0), channel(2), channel(4)) {
                    return Ok(ColorSpec(Color::Rgb { r, g, b }));
                }
            }
        }

        Err(Error::new(
            ErrorKind::Color,
            &format!("Color '{}' not recognized", s),
        ))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StyleSpec {
    pub fg: Option<ColorSpec>,
    pub bg: Option<ColorSpec>,
    pub bold: bool,
    pub invert: bool,
}

impl StyleSpec {
    fn fg(color: Color) -> Self {
        StyleSpec {
            fg: Some(ColorSpec(color)),
            ..StyleSpec::default()
        }
    }

    fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    fn invert(mut self) -> Self {
        self.invert = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThemeSpec {
    pub title: StyleSpec,
    pub border: StyleSpec,
    pub label: StyleSpec,
    pub day: StyleSpec,
    pub today: StyleSpec,
    pub hint: StyleSpec,
}

impl Default for ThemeSpec {
    fn default() -> Self {
        let accent = Color::Ansi(99);
        let muted = Color::Ansi(245);

        ThemeSpec {
            title: StyleSpec::fg(accent).bold(),
            border: StyleSpec::fg(accent),
            label: StyleSpec::fg(accent).bold(),
            day: StyleSpec::fg(muted),
            today: StyleSpec::fg(muted).invert(),
            hint: StyleSpec::default(),
        }
    }
}

/// On-disk representation of the configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    tick_rate_ms: u64,
    weekdays: [String; 7],
    keys: HashMap<KeySpec, Command>,
    theme: ThemeSpec,
}

impl Default for ConfigFile {
    fn default() -> Self {
        ConfigFile {
            tick_rate_ms: 1000,
            weekdays: ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"].map(str::to_owned),
            keys: HashMap::new(),
            theme: ThemeSpec::default(),
        }
    }
}

fn default_key_map() -> KeyMap {
    let mut key_map = HashMap::new();

    key_map.insert(Key::Left, Command::PreviousMonth);
    key_map.insert(Key::Char('h'), Command::PreviousMonth);
    key_map.insert(Key::Right, Command::NextMonth);
    key_map.insert(Key::Char('l'), Command::NextMonth);
    key_map.insert(Key::Char('t'), Command::Today);
    key_map.insert(Key::Char('q'), Command::Quit);
    key_map.insert(Key::Ctrl('c'), Command::Quit);

    key_map
}

#[derive(Debug, Clone)]
pub struct Config {
    pub key_map: KeyMap,
    pub tick_rate: Duration,
    pub theme: Theme,
    pub weekdays: [String; 7],
}

impl Default for Config {
    fn default() -> Config {
        let file = ConfigFile::default();

        Config {
            key_map: default_key_map(),
            tick_rate: Duration::from_millis(file.tick_rate_ms),
            theme: Theme::from(&file.theme),
            weekdays: file.weekdays,
        }
    }
}

impl ConfigFile {
    fn resolve(self) -> Result<Config> {
        if self.tick_rate_ms == 0 {
            return Err(Error::new(
                ErrorKind::Config,
                "tick_rate_ms must be greater than zero",
            ));
        }

        let mut key_map = default_key_map();
        key_map.extend(self.keys.into_iter().map(|(KeySpec(key), cmd)| (key, cmd)));

        Ok(Config {
            key_map,
            tick_rate: Duration::from_millis(self.tick_rate_ms),
            theme: Theme::from(&self.theme),
            weekdays: self.weekdays,
        })
    }
}

impl FromStr for Config {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        toml::from_str::<ConfigFile>(s)?.resolve()
    }
}

impl Config {
    pub fn command_for(&self, key: &Key) -> Option<Command> {
        self.key_map.get(key).copied()
    }
}

pub(crate) fn find_configfile_locations() -> Vec<PathBuf> {
    let mut locations = Vec::new();

    if let Ok(path) = env::var(CONFIG_PATH_ENV_VAR) {
        locations.push(PathBuf::from(path));
    }

    if let Some(dir) = dirs::config_dir() {
        locations.push(dir.join("almanac").join("config.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        locations.push(home.join(".almanac.toml"));
    }

    locations
}

fn first_existing<I: IntoIterator<Item = PathBuf>>(locations: I) -> Option<PathBuf> {
    locations.into_iter().find(|location| location.is_file())
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path).map_err(|err| {
        Error::new(
            ErrorKind::Config,
            &format!("Unable to read '{}': {}", path.display(), err),
        )
    })?;

    content.parse::<Config>().map_err(|err| Error {
        message: Some(format!(
            "{} (in '{}')",
            err.message.unwrap_or_default(),
            path.display()
        )),
        kind: err.kind,
    })
}

/// Loads the given file or, if none is given, the first configuration file found
/// in the usual locations. Falls back to defaults if there is none.
pub fn load_suitable_config(path: Option<&Path>) -> Result<Config> {
    if let Some(path) = path {
        log::info!("Loading configuration from '{}'", path.display());
        return load_config(path);
    }

    match first_existing(find_configfile_locations()) {
        Some(location) => {
            log::info!("Loading configuration from '{}'", location.display());
            load_config(&location)
        }
        None => {
            log::info!("No configuration file found, using defaults");
            Ok(Config::default())
        }
    }
}
