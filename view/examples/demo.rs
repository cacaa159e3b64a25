use std::io;
use std::time::Duration;

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseButton,
    MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use view::scroll_view::wrap_text;
use view::{Button, ButtonBox, CheckBox, Combo, Knob, Lcd, LedCheckBox, ScrollView, centered_rect};

const MODES: &[&str] = &["Lowpass", "Highpass", "Bandpass", "Notch"];
const HELP: &str = "Widget gallery. Tab moves the focus between controls, Left and Right \
change the focused value, Space toggles check boxes and the LED, h opens this text and q quits. \
Click the Help button to open it with the mouse.";

#[derive(Default)]
struct State {
    focus: usize,
    cutoff: f32,
    order: i64,
    mode: usize,
    bypass: bool,
    linked: bool,
    help: bool,
    help_offset: usize,
    buttons: Rect,
    quit: bool,
}

const FOCUSABLE: usize = 5;

impl State {
    fn change(&mut self, dir: i32) {
        match self.focus {
            0 => self.cutoff = (self.cutoff + dir as f32 * 0.05).clamp(0.0, 1.0),
            1 => self.order = (self.order + dir as i64).clamp(0, 99),
            2 => self.mode = (self.mode as i32 + dir).rem_euclid(MODES.len() as i32) as usize,
            3 => self.bypass = !self.bypass,
            _ => self.linked = !self.linked,
        }
    }
}

fn main() -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let mut s = State {
        cutoff: 0.5,
        order: 2,
        ..Default::default()
    };
    let result = run(&mut terminal, &mut s);

    execute!(terminal.backend_mut(), DisableMouseCapture, LeaveAlternateScreen)?;
    disable_raw_mode()?;
    result
}

fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, s: &mut State) -> io::Result<()> {
    while !s.quit {
        terminal.draw(|frame| {
            let area = frame.area();
            let [buttons, controls, led] = Layout::vertical([
                Constraint::Length(2),
                Constraint::Length(4),
                Constraint::Length(1),
            ])
            .areas(area);

            let bar = [Button::new("Reload Plugin"), Button::new("Help").checked(s.help)];
            frame.render_widget(ButtonBox::new(&bar), buttons);
            s.buttons = buttons;

            let block = Block::default().borders(Borders::ALL).title(" Controls ");
            let inner = block.inner(controls);
            frame.render_widget(block, controls);
            let cells: [Rect; 4] = Layout::horizontal([Constraint::Fill(1); 4]).areas(inner);
            frame.render_widget(Knob::new("Cutoff", s.cutoff, 0.0, 1.0).focused(s.focus == 0), cells[0]);
            frame.render_widget(Lcd::new("Order", 2, s.order).focused(s.focus == 1), cells[1]);
            frame.render_widget(Combo::new("Type", MODES, Some(s.mode)).focused(s.focus == 2), cells[2]);
            frame.render_widget(CheckBox::new("Bypass", s.bypass).focused(s.focus == 3), cells[3]);
            frame.render_widget(LedCheckBox::new("Link Channels", s.linked).focused(s.focus == 4), led);

            if s.help {
                let popup = centered_rect(50, 8, area);
                frame.render_widget(Clear, popup);
                let block = Block::default()
                    .borders(Borders::ALL)
                    .title(" Help ")
                    .border_style(Style::default().fg(Color::Yellow));
                let inner = block.inner(popup);
                frame.render_widget(block, popup);
                let lines = wrap_text(HELP, inner.width.saturating_sub(1) as usize);
                s.help_offset = ScrollView::clamp_offset(s.help_offset, lines.len(), inner.height as usize);
                frame.render_widget(ScrollView::new(&lines, s.help_offset), inner);
            } else {
                let hint = Paragraph::new("Tab focus  ←→ change  Space toggle  h help  q quit")
                    .style(Style::default().fg(Color::DarkGray));
                frame.render_widget(hint, Rect::new(area.x, area.bottom().saturating_sub(1), area.width, 1));
            }
        })?;

        if !event::poll(Duration::from_millis(250))? {
            continue;
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                KeyCode::Char('q') => s.quit = true,
                KeyCode::Esc if s.help => s.help = false,
                KeyCode::Esc => s.quit = true,
                KeyCode::Char('h') => s.help = !s.help,
                KeyCode::Up if s.help => s.help_offset = s.help_offset.saturating_sub(1),
                KeyCode::Down if s.help => s.help_offset += 1,
                KeyCode::Tab => s.focus = (s.focus + 1) % FOCUSABLE,
                KeyCode::BackTab => s.focus = (s.focus + FOCUSABLE - 1) % FOCUSABLE,
                KeyCode::Left => s.change(-1),
                KeyCode::Right => s.change(1),
                KeyCode::Char(' ') if s.focus >= 3 => s.change(1),
                _ => {}
            },
            Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                let widths = [Button::new("Reload Plugin").width(), Button::new("Help").width()];
                if ButtonBox::button_at(mouse.column, mouse.row, s.buttons, &widths, 1) == Some(1) {
                    s.help = !s.help;
                }
            }
            _ => {}
        }
    }
    Ok(())
}
