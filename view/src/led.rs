use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::Widget;

use crate::put_str;

/// A check box drawn as an LED: green `●` when on, grey `○` when off.
pub struct LedCheckBox<'a> {
    label: &'a str,
    checked: bool,
    focused: bool,
}

impl<'a> LedCheckBox<'a> {
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

impl Widget for LedCheckBox<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }
        let (led, led_style) = if self.checked {
            ("● ", Style::default().fg(Color::Green))
        } else {
            ("○ ", Style::default().fg(Color::DarkGray))
        };
        let label_style = if self.focused {
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        let x = put_str(buf, area.x, area.y, area.right(), led, led_style);
        put_str(buf, x, area.y, area.right(), self.label, label_style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::row_text;

    #[test]
    fn led_reflects_state() {
        let area = Rect::new(0, 0, 16, 1);
        let mut buf = Buffer::empty(area);
        LedCheckBox::new("Link Channels", true).render(area, &mut buf);
        assert!(row_text(&buf, 0).starts_with("● Link Channels"));

        let mut buf = Buffer::empty(area);
        LedCheckBox::new("Link Channels", false).render(area, &mut buf);
        assert!(row_text(&buf, 0).starts_with("○ Link Channels"));
    }
}
