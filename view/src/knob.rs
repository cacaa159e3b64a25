use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::Widget;

use crate::{put_str, truncate};

const DIAL: [char; 5] = ['○', '◔', '◑', '◕', '●'];

/// A continuous control rendered as a label row and a dial row.
///
/// The dial shows the value position within `[min, max]` as one of five
/// glyphs followed by a short fill bar and the numeric value.
pub struct Knob<'a> {
    label: &'a str,
    value: f32,
    min: f32,
    max: f32,
    focused: bool,
    style: Style,
    focused_style: Style,
}

impl<'a> Knob<'a> {
    pub fn new(label: &'a str, value: f32, min: f32, max: f32) -> Self {
        Self {
            label,
            value,
            min,
            max,
            focused: false,
            style: Style::default().fg(Color::Gray),
            focused_style: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        }
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Position of the value within the range, in `0.0..=1.0`.
    pub fn normalized(value: f32, min: f32, max: f32) -> f32 {
        if (max - min).abs() > f32::EPSILON {
            ((value - min) / (max - min)).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    pub fn dial_glyph(normalized: f32) -> char {
        let idx = (normalized.clamp(0.0, 1.0) * (DIAL.len() - 1) as f32).round() as usize;
        DIAL[idx]
    }
}

impl Widget for Knob<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }
        let style = if self.focused {
            self.focused_style
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
        let normalized = Self::normalized(self.value, self.min, self.max);
        let value = format!(" {:.2}", self.value);
        let bar_width = (area.width as usize).saturating_sub(2 + value.chars().count());
        let filled = (normalized * bar_width as f32).round() as usize;

        let mut x = put_str(
            buf,
            area.x,
            y,
            area.right(),
            &format!("{} ", Self::dial_glyph(normalized)),
            style,
        );
        x = put_str(buf, x, y, area.right(), &"▓".repeat(filled), style);
        x = put_str(
            buf,
            x,
            y,
            area.right(),
            &"░".repeat(bar_width - filled),
            Style::default().fg(Color::DarkGray),
        );
        put_str(buf, x, y, area.right(), &value, style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::row_text;

    #[test]
    fn dial_glyph_tracks_position() {
        assert_eq!(Knob::dial_glyph(0.0), '○');
        assert_eq!(Knob::dial_glyph(0.5), '◑');
        assert_eq!(Knob::dial_glyph(1.0), '●');
        assert_eq!(Knob::dial_glyph(7.0), '●');
    }

    #[test]
    fn normalized_handles_empty_range() {
        assert_eq!(Knob::normalized(3.0, 1.0, 1.0), 0.0);
        assert_eq!(Knob::normalized(15.0, 10.0, 20.0), 0.5);
    }

    #[test]
    fn renders_label_and_value() {
        let area = Rect::new(0, 0, 16, 2);
        let mut buf = Buffer::empty(area);
        Knob::new("Gain", 0.5, 0.0, 1.0).render(area, &mut buf);
        assert!(row_text(&buf, 0).starts_with("Gain"));
        let dial = row_text(&buf, 1);
        assert!(dial.starts_with('◑'));
        assert!(dial.ends_with("0.50"));
    }
}
