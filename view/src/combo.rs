use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::Widget;

use crate::{put_str, truncate};

/// A selector over a fixed list of options, shown as `◂ option ▸`.
pub struct Combo<'a> {
    label: &'a str,
    options: &'a [&'a str],
    selected: Option<usize>,
    focused: bool,
    style: Style,
}

impl<'a> Combo<'a> {
    pub fn new(label: &'a str, options: &'a [&'a str], selected: Option<usize>) -> Self {
        Self {
            label,
            options,
            selected,
            focused: false,
            style: Style::default().fg(Color::Gray),
        }
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }
}

impl Widget for Combo<'_> {
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

        let current = self
            .selected
            .and_then(|i| self.options.get(i))
            .copied()
            .unwrap_or("?");
        let inner = (area.width as usize).saturating_sub(4);
        let text = format!("◂ {} ▸", truncate(current, inner));
        put_str(buf, area.x, area.y + 1, area.right(), &text, style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::row_text;

    #[test]
    fn shows_selected_option() {
        let area = Rect::new(0, 0, 14, 2);
        let mut buf = Buffer::empty(area);
        let options = ["Lowpass", "Highpass"];
        Combo::new("Type", &options, Some(1)).render(area, &mut buf);
        assert!(row_text(&buf, 1).starts_with("◂ Highpass ▸"));
    }

    #[test]
    fn missing_selection_shows_placeholder() {
        let area = Rect::new(0, 0, 14, 2);
        let mut buf = Buffer::empty(area);
        Combo::new("Type", &[], None).render(area, &mut buf);
        assert!(row_text(&buf, 1).starts_with("◂ ? ▸"));
    }
}
