use unsegen::base::style::*;

use super::layout::Role;
use crate::config::{StyleSpec, ThemeSpec};

#[derive(Clone, Debug)]
pub struct Theme {
    pub title_style: StyleModifier,
    pub border_style: StyleModifier,
    pub label_style: StyleModifier,
    pub day_style: StyleModifier,
    pub today_style: StyleModifier,
    pub hint_style: StyleModifier,
}

impl Theme {
    pub fn style(&self, role: Role) -> StyleModifier {
        match role {
            Role::Title => self.title_style,
            Role::Border => self.border_style,
            Role::Label => self.label_style,
            Role::Day => self.day_style,
            Role::Today => self.today_style,
            Role::Hint => self.hint_style,
        }
    }
}

fn style_modifier(spec: &StyleSpec) -> StyleModifier {
    let mut style = StyleModifier::new();

    if let Some(fg) = spec.fg {
        style = style.fg_color(fg.0);
    }
    if let Some(bg) = spec.bg {
        style = style.bg_color(bg.0);
    }
    if spec.bold {
        style = style.bold(true);
    }
    if spec.invert {
        style = style.invert(true);
    }

    style
}

impl From<&ThemeSpec> for Theme {
    fn from(spec: &ThemeSpec) -> Self {
        Theme {
            title_style: style_modifier(&spec.title),
            border_style: style_modifier(&spec.border),
            label_style: style_modifier(&spec.label),
            day_style: style_modifier(&spec.day),
            today_style: style_modifier(&spec.today),
            hint_style: style_modifier(&spec.hint),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Theme::from(&ThemeSpec::default())
    }
}
