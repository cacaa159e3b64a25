use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::Widget;

use crate::put_str;

/// Scrollable, word-wrapped text area.
///
/// Used for the plugin description label. The scroll offset determines which
/// wrapped line appears at the top of the visible area.
pub struct ScrollView<'a> {
    lines: &'a [String],
    offset: usize,
    style: Style,
    /// Show a scrollbar on the right edge.
    scrollbar: bool,
    scrollbar_style: Style,
    scrollbar_track_style: Style,
}

impl<'a> ScrollView<'a> {
    pub fn new(lines: &'a [String], offset: usize) -> Self {
        Self {
            lines,
            offset,
            style: Style::default(),
            scrollbar: true,
            scrollbar_style: Style::default().fg(Color::White),
            scrollbar_track_style: Style::default().fg(Color::DarkGray),
        }
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn scrollbar(mut self, show: bool) -> Self {
        self.scrollbar = show;
        self
    }

    /// Clamp an offset so the view doesn't scroll past the last line.
    pub fn clamp_offset(offset: usize, line_count: usize, visible_height: usize) -> usize {
        if line_count <= visible_height {
            0
        } else {
            offset.min(line_count - visible_height)
        }
    }
}

/// Break `text` into lines of at most `width` characters.
///
/// Breaks happen at whitespace; a single word longer than `width` is split
/// hard. Existing newlines are kept and blank lines are preserved.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    for paragraph in text.lines() {
        let mut current = String::new();
        let mut current_len = 0usize;
        for word in paragraph.split_whitespace() {
            let mut word: Vec<char> = word.chars().collect();
            while word.len() > width {
                if current_len > 0 {
                    lines.push(std::mem::take(&mut current));
                    current_len = 0;
                }
                let rest = word.split_off(width);
                lines.push(word.into_iter().collect());
                word = rest;
            }
            if word.is_empty() {
                continue;
            }
            let needed = if current_len == 0 {
                word.len()
            } else {
                current_len + 1 + word.len()
            };
            if needed > width {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            if current_len > 0 {
                current.push(' ');
                current_len += 1;
            }
            current.extend(word.iter());
            current_len += word.len();
        }
        lines.push(current);
    }
    lines
}

impl Widget for ScrollView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        let visible = area.height as usize;
        let has_scrollbar = self.scrollbar && self.lines.len() > visible;
        let content_right = if has_scrollbar {
            area.right().saturating_sub(1)
        } else {
            area.right()
        };

        for row in 0..visible {
            let line_idx = self.offset + row;
            if line_idx >= self.lines.len() {
                break;
            }
            let y = area.y + row as u16;
            put_str(buf, area.x, y, content_right, &self.lines[line_idx], self.style);
        }

        // Scrollbar.
        if has_scrollbar {
            let sb_x = area.right() - 1;
            let total = self.lines.len();

            // Thumb position and size.
            let thumb_size = ((visible * visible) / total).max(1);
            let max_offset = total - visible;
            let thumb_start = if max_offset > 0 {
                (self.offset.min(max_offset) * (visible - thumb_size)) / max_offset
            } else {
                0
            };

            for row in 0..visible {
                let y = area.y + row as u16;
                let in_thumb = row >= thumb_start && row < thumb_start + thumb_size;
                let (ch, style) = if in_thumb {
                    ('┃', self.scrollbar_style)
                } else {
                    ('│', self.scrollbar_track_style)
                };
                if let Some(cell) = buf.cell_mut((sb_x, y)) {
                    cell.set_char(ch);
                    cell.set_style(style);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::row_text;

    #[test]
    fn wraps_at_word_boundaries() {
        let lines = wrap_text("a simple stereo delay line", 10);
        assert_eq!(lines, vec!["a simple", "stereo", "delay line"]);
    }

    #[test]
    fn splits_overlong_words() {
        let lines = wrap_text("abcdefghij", 4);
        assert_eq!(lines, vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn keeps_blank_lines() {
        let lines = wrap_text("first\n\nsecond", 20);
        assert_eq!(lines, vec!["first", "", "second"]);
    }

    #[test]
    fn clamp_offset_stops_at_last_page() {
        assert_eq!(ScrollView::clamp_offset(10, 12, 5), 7);
        assert_eq!(ScrollView::clamp_offset(3, 4, 5), 0);
    }

    #[test]
    fn renders_from_offset() {
        let lines: Vec<String> = vec!["one".into(), "two".into(), "three".into()];
        let area = Rect::new(0, 0, 8, 2);
        let mut buf = Buffer::empty(area);
        ScrollView::new(&lines, 1).render(area, &mut buf);
        assert!(row_text(&buf, 0).starts_with("two"));
        assert!(row_text(&buf, 1).starts_with("three"));
        // Scrollbar occupies the last column when content overflows.
        assert_eq!(buf[(7u16, 0u16)].symbol(), "│");
    }
}
