use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::Widget;

use crate::{put_str, truncate};

/// An integer display with a fixed number of digits.
///
/// Values that need more digits than configured are still shown in full;
/// the display grows instead of clipping.
pub struct Lcd<'a> {
    label: &'a str,
    value: i64,
    digits: u8,
    focused: bool,
    style: Style,
    digit_style: Style,
}

impl<'a> Lcd<'a> {
    pub fn new(label: &'a str, digits: u8, value: i64) -> Self {
        Self {
            label,
            value,
            digits,
            focused: false,
            style: Style::default().fg(Color::Gray),
            digit_style: Style::default().fg(Color::Green).bg(Color::Black),
        }
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Zero-padded digit string, at least `digits` wide.
    pub fn digit_text(value: i64, digits: u8) -> String {
        if value < 0 {
            format!("-{:0width$}", value.unsigned_abs(), width = digits as usize)
        } else {
            format!("{:0width$}", value, width = digits as usize)
        }
    }
}

impl Widget for Lcd<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }
        let style = if self.focused {
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else {
            self.style
        };

        put_str(
            buf,
            area.x,
            area.y,
            area.right(),
            &truncate(self.label, area.width as usize),
            style,
        );
        if area.height < 2 {
            return;
        }

        let y = area.y + 1;
        let x = put_str(buf, area.x, y, area.right(), "[", style);
        let x = put_str(
            buf,
            x,
            y,
            area.right(),
            &Self::digit_text(self.value, self.digits),
            self.digit_style,
        );
        put_str(buf, x, y, area.right(), "]", style);
    }
}
