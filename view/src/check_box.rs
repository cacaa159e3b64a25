use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::Widget;

use crate::{put_str, truncate};

/// A boolean control rendered as `[x] label`.
pub struct CheckBox<'a> {
    label: &'a str,
    checked: bool,
    focused: bool,
}

impl<'a> CheckBox<'a> {
    pub fn new(label: &'a str, checked: bool) -> Self {
        Self {
            label,
            checked,
            focused: false,
        }
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }
}

impl Widget for CheckBox<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }
        let style = if self.focused {
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        let mark = if self.checked { "[x] " } else { "[ ] " };
        let x = put_str(buf, area.x, area.y, area.right(), mark, style);
        let room = area.right().saturating_sub(x) as usize;
        put_str(buf, x, area.y, area.right(), &truncate(self.label, room), style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::row_text;

    #[test]
    fn renders_checked_mark() {
        let area = Rect::new(0, 0, 12, 1);
        let mut buf = Buffer::empty(area);
        CheckBox::new("Bypass", true).render(area, &mut buf);
        assert_eq!(row_text(&buf, 0).trim_end(), "[x] Bypass");
    }

    #[test]
    fn renders_unchecked_mark() {
        let area = Rect::new(0, 0, 12, 1);
        let mut buf = Buffer::empty(area);
        CheckBox::new("Bypass", false).render(area, &mut buf);
        assert_eq!(row_text(&buf, 0).trim_end(), "[ ] Bypass");
    }
}
