use std::fmt::Write;
use unsegen::base::*;
use unsegen::widget::*;

use super::layout::Line;
use super::Theme;

/// Draws pre-laid-out lines, styling each segment by its role.
pub struct MonthPane<'a> {
    lines: Vec<Line>,
    theme: &'a Theme,
}

impl<'a> MonthPane<'a> {
    pub fn new(lines: Vec<Line>, theme: &'a Theme) -> Self {
        MonthPane { lines, theme }
    }
}

impl Widget for MonthPane<'_> {
    fn space_demand(&self) -> Demand2D {
        let width = self.lines.iter().map(Line::width).max().unwrap_or(0);

        Demand2D {
            width: ColDemand::exact(width),
            height: RowDemand::exact(self.lines.len()),
        }
    }

    fn draw(&self, mut window: Window, _hints: RenderingHints) {
        let mut cursor = Cursor::new(&mut window);

        let mut write_lines = || -> std::fmt::Result {
            for line in &self.lines {
                for (role, text) in line.segments() {
                    cursor.set_style_modifier(self.theme.style(*role));
                    write!(cursor, "{}", text)?;
                }
                cursor.set_style_modifier(StyleModifier::new());
                writeln!(cursor)?;
            }
            Ok(())
        };

        if let Err(err) = write_lines() {
            log::warn!("Error while drawing month: {}", err);
        }
    }
}
