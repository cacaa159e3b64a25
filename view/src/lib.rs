pub mod button;
pub mod check_box;
pub mod combo;
pub mod knob;
pub mod lcd;
pub mod led;
pub mod scroll_view;

pub use button::{Button, ButtonBox};
pub use check_box::CheckBox;
pub use combo::Combo;
pub use knob::Knob;
pub use lcd::Lcd;
pub use led::LedCheckBox;
pub use scroll_view::ScrollView;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;

/// Compute a centered rectangle within `area`.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w)) / 2;
    let y = area.y + (area.height.saturating_sub(h)) / 2;
    Rect::new(x, y, w, h)
}

/// Write `text` starting at `(x, y)`, stopping before `right`.
/// Returns the x position after the last written cell.
pub(crate) fn put_str(buf: &mut Buffer, mut x: u16, y: u16, right: u16, text: &str, style: Style) -> u16 {
    for ch in text.chars() {
        if x >= right {
            break;
        }
        if let Some(cell) = buf.cell_mut((x, y)) {
            cell.set_char(ch);
            cell.set_style(style);
        }
        x += 1;
    }
    x
}

/// Shorten `text` to at most `max` characters, marking the cut with `…`.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut out: String = text.chars().take(max - 1).collect();
    out.push('…');
    out
}

#[cfg(test)]
pub(crate) fn row_text(buf: &Buffer, y: u16) -> String {
    let area = buf.area;
    (area.x..area.right())
        .map(|x| buf[(x, y)].symbol().to_string())
        .collect::<String>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_rect_fits_inside() {
        let r = centered_rect(10, 4, Rect::new(0, 0, 20, 10));
        assert_eq!(r, Rect::new(5, 3, 10, 4));
    }

    #[test]
    fn centered_rect_clamps_to_area() {
        let r = centered_rect(50, 50, Rect::new(2, 2, 20, 10));
        assert_eq!(r, Rect::new(2, 2, 20, 10));
    }

    #[test]
    fn truncate_marks_cut() {
        assert_eq!(truncate("Cutoff", 10), "Cutoff");
        assert_eq!(truncate("Resonance", 5), "Reso…");
        assert_eq!(truncate("abc", 0), "");
    }
}
