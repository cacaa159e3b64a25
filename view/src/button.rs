use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::Widget;

use crate::put_str;

/// A push or checkable button rendered as ` text `.
///
/// Checked buttons are drawn inverted so their toggle state is visible.
#[derive(Clone, Copy)]
pub struct Button<'a> {
    text: &'a str,
    checked: bool,
    focused: bool,
    style: Style,
    checked_style: Style,
}

impl<'a> Button<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            checked: false,
            focused: false,
            style: Style::default().fg(Color::Black).bg(Color::DarkGray),
            checked_style: Style::default()
                .fg(Color::Black)
                .bg(Color::White)
                .add_modifier(Modifier::BOLD),
        }
    }

    pub fn checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Rendered width in cells.
    pub fn width(&self) -> u16 {
        self.text.chars().count() as u16 + 2
    }
}

impl Widget for Button<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }
        let mut style = if self.checked {
            self.checked_style
        } else {
            self.style
        };
        if self.focused {
            style = style.add_modifier(Modifier::UNDERLINED);
        }
        put_str(
            buf,
            area.x,
            area.y,
            area.right(),
            &format!(" {} ", self.text),
            style,
        );
    }
}

/// A horizontal box of buttons, left aligned, with the remaining space
/// left empty as a stretch.
pub struct ButtonBox<'a> {
    buttons: &'a [Button<'a>],
    spacing: u16,
}

impl<'a> ButtonBox<'a> {
    pub fn new(buttons: &'a [Button<'a>]) -> Self {
        Self {
            buttons,
            spacing: 1,
        }
    }

    pub fn spacing(mut self, spacing: u16) -> Self {
        self.spacing = spacing;
        self
    }

    /// Hit-test: given a click at (x, y), return which button index was clicked.
    /// `area` is the Rect the box was rendered into; `widths` are the button
    /// widths in order and `spacing` the gap between them.
    pub fn button_at(x: u16, y: u16, area: Rect, widths: &[u16], spacing: u16) -> Option<usize> {
        if y != area.y || x < area.x || x >= area.right() {
            return None;
        }
        let rel_x = x - area.x;
        let mut pos = 0u16;
        for (i, &w) in widths.iter().enumerate() {
            if i > 0 {
                pos += spacing;
            }
            if rel_x >= pos && rel_x < pos + w {
                return Some(i);
            }
            pos += w;
        }
        None
    }
}

impl Widget for ButtonBox<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }
        let mut x = area.x;
        for (i, button) in self.buttons.iter().enumerate() {
            if i > 0 {
                x += self.spacing;
            }
            if x >= area.right() {
                break;
            }
            let w = button.width().min(area.right() - x);
            button.render(Rect::new(x, area.y, w, 1), buf);
            x += button.width();
        }
    }
}
