use std::io;
use std::time::Duration;

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers,
    MouseButton, MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::{Frame, Terminal};

use view::scroll_view::wrap_text;
use view::{Button, ButtonBox, CheckBox, Combo, Knob, Lcd, LedCheckBox, ScrollView, centered_rect};

use crate::editor::linked::{ControlEntry, LinkLed};
use crate::editor::proc_view::ProcView;
use crate::editor::widget::{Control, ControlKind};
use crate::editor::{ButtonKind, GridItem, HostHandle, LinkedModelGroupsView, Lv2View, MainWindow};
use crate::session::{Opened, Session};

/// Rows per control: label, value, gap.
const CONTROL_HEIGHT: u16 = 3;
const BUTTON_SPACING: u16 = 1;

const ACTIONS: &[(&str, &str)] = &[
    ("↑↓", "select"),
    ("←→", "adjust"),
    ("r", "reset"),
    ("h", "help"),
    ("l", "link"),
    ("q", "quit"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Button(usize),
    Control { proc: usize, index: usize },
    LinkLed,
}

#[derive(Default)]
struct Areas {
    buttons: Rect,
    button_widths: Vec<u16>,
    controls: Vec<(Focus, Rect)>,
    led: Rect,
    help: Rect,
    action_bar: Rect,
}

struct State {
    session: Session,
    host: HostHandle,
    opened: Opened,
    view: Lv2View,
    focus: Option<Focus>,
    areas: Areas,
    help_offset: usize,
    /// One-shot message shown in place of the tooltip.
    status: Option<String>,
    quit: bool,
}

impl State {
    fn new(session: Session, opened: Opened) -> Self {
        let host = MainWindow::handle();
        let view = crate::editor::view::build(
            host.clone(),
            &opened.base,
            &opened.plugin.metadata,
            &session.options,
        );
        let mut s = State {
            session,
            host,
            opened,
            view,
            focus: None,
            areas: Areas::default(),
            help_offset: 0,
            status: None,
            quit: false,
        };
        s.focus = s.initial_focus();
        s
    }

    /// Focusable items in navigation order.
    fn focus_order(&self) -> Vec<Focus> {
        let mut order: Vec<Focus> = (0..self.view.buttons().len()).map(Focus::Button).collect();
        for pv in self.view.proc_views() {
            let proc = pv.index();
            order.extend((0..pv.group().controls().len()).map(|index| Focus::Control { proc, index }));
        }
        if self.view.global_link_led().is_some() {
            order.push(Focus::LinkLed);
        }
        order
    }

    fn initial_focus(&self) -> Option<Focus> {
        let order = self.focus_order();
        order
            .iter()
            .copied()
            .find(|f| matches!(f, Focus::Control { .. }))
            .or_else(|| order.first().copied())
    }

    fn move_focus(&mut self, delta: isize) {
        let order = self.focus_order();
        if order.is_empty() {
            return;
        }
        let pos = self
            .focus
            .and_then(|f| order.iter().position(|&o| o == f))
            .map_or(0, |p| (p as isize + delta).rem_euclid(order.len() as isize) as usize);
        self.focus = Some(order[pos]);
    }

    fn entry(&self, proc: usize, index: usize) -> Option<&ControlEntry> {
        self.view.proc_views().get(proc)?.group().controls().get(index)
    }

    fn focused_entry(&self) -> Option<(usize, &ControlEntry)> {
        match self.focus? {
            Focus::Control { proc, index } => self.entry(proc, index).map(|e| (proc, e)),
            _ => None,
        }
    }

    /// Run `f` on the focused control's model and refresh the view if
    /// anything changed.
    fn edit_focused(&mut self, f: impl FnOnce(&mut crate::control::ControlBase, usize, &str, &Control) -> bool) {
        let Some((proc, entry)) = self.focused_entry() else {
            return;
        };
        let key = entry.key().to_string();
        let control = entry.control().clone();
        if f(&mut self.opened.base, proc, &key, &control) {
            self.view.model_changed(&self.opened.base);
        }
    }

    fn adjust(&mut self, direction: f32, modifiers: KeyModifiers) {
        self.edit_focused(|base, proc, key, control| {
            base.step_value(proc, key, direction * step_for(control, modifiers))
        });
    }

    fn reset(&mut self) {
        self.edit_focused(|base, proc, key, _| base.reset_value(proc, key));
    }

    /// Space/Enter: press buttons, flip check boxes, cycle combos.
    fn activate(&mut self) {
        match self.focus {
            Some(Focus::Button(i)) => self.press(i),
            Some(Focus::LinkLed) => self.toggle_link(),
            Some(Focus::Control { .. }) => self.edit_focused(|base, proc, key, control| match control.kind() {
                ControlKind::Check => {
                    base.step_value(proc, key, if control.is_checked() { -1.0 } else { 1.0 })
                }
                ControlKind::Combo => {
                    base.step_value(proc, key, 1.0) || base.set_value(proc, key, control.range().0)
                }
                ControlKind::Knob | ControlKind::Lcd { .. } => false,
            }),
            None => {}
        }
    }

    fn press(&mut self, index: usize) {
        match self.view.press_button(index) {
            Some(ButtonKind::Reload) => self.reload(),
            Some(ButtonKind::ShowGui) => {
                log::warn!(
                    "{}: native plugin UIs are not supported",
                    self.opened.plugin.descriptor.name
                );
                self.status = Some("Native plugin UIs are not supported".into());
                self.view.model_changed(&self.opened.base);
            }
            Some(ButtonKind::Help) => self.help_offset = 0,
            None => {}
        }
    }

    fn toggle_help(&mut self) {
        if self.view.help_window().is_none() {
            self.status = Some("This plugin has no description".into());
            return;
        }
        let visible = !self.view.help_visible();
        self.help_offset = 0;
        self.view.set_help_visible(visible);
    }

    fn toggle_link(&mut self) {
        if self.view.global_link_led().is_none() {
            self.status = Some("Only one processor, nothing to link".into());
            return;
        }
        let linked = !self.opened.base.link_channels();
        self.opened.base.set_link_channels(linked);
        self.view.model_changed(&self.opened.base);
        log::debug!("Link channels: {linked}");
    }

    fn reload(&mut self) {
        match self.session.open() {
            Ok(opened) => {
                let view = crate::editor::view::build(
                    self.host.clone(),
                    &opened.base,
                    &opened.plugin.metadata,
                    &self.session.options,
                );
                self.view = view;
                self.opened = opened;
                self.focus = self.initial_focus();
                self.help_offset = 0;
                self.status = Some(format!("Reloaded {}", self.opened.plugin.descriptor.name));
                log::info!("Reloaded {}", self.session.source);
            }
            Err(e) => {
                log::error!("Reload of {} failed: {e}", self.session.source);
                self.status = Some(format!("Reload failed: {e}"));
            }
        }
    }

    fn hit(&self, x: u16, y: u16) -> Option<Focus> {
        if self.areas.led.contains((x, y).into()) {
            return Some(Focus::LinkLed);
        }
        self.areas
            .controls
            .iter()
            .find(|(_, r)| r.contains((x, y).into()))
            .map(|(f, _)| *f)
    }
}

/// Step for one Left/Right press: a fraction of the range for knobs
/// (Shift = fine, Ctrl = coarse), one unit otherwise.
fn step_for(control: &Control, modifiers: KeyModifiers) -> f32 {
    if control.kind() != ControlKind::Knob {
        return 1.0;
    }
    let (min, max) = control.range();
    let range = max - min;
    if modifiers.contains(KeyModifiers::CONTROL) {
        range * 0.10
    } else if modifiers.contains(KeyModifiers::SHIFT) {
        range * 0.01
    } else {
        range * 0.05
    }
}

pub fn run(session: Session, opened: Opened) -> anyhow::Result<()> {
    let mut s = State::new(session, opened);

    // Set up terminal.
    crossterm::terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // When stderr is redirected (e.g. `lv2view edit ... 2> debug.log`), keep
    // logging enabled. When stderr is a terminal, suppress logging to avoid
    // corrupting the alternate screen.
    let prev_log_level = log::max_level();
    if std::io::IsTerminal::is_terminal(&std::io::stderr()) {
        log::set_max_level(log::LevelFilter::Off);
    }

    let result = event_loop(&mut terminal, &mut s);

    log::set_max_level(prev_log_level);

    execute!(
        terminal.backend_mut(),
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    crossterm::terminal::disable_raw_mode()?;

    result.map_err(Into::into)
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    s: &mut State,
) -> io::Result<()> {
    loop {
        terminal.draw(|frame| render(frame, s))?;
        if s.quit {
            break;
        }
        if !event::poll(Duration::from_millis(250))? {
            continue;
        }
        process_event(s, event::read()?);
        while event::poll(Duration::ZERO)? {
            process_event(s, event::read()?);
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Event processing
// ---------------------------------------------------------------------------

fn process_event(s: &mut State, ev: Event) {
    match ev {
        Event::Key(key) if key.kind == KeyEventKind::Press => handle_key(s, key.code, key.modifiers),
        Event::Mouse(mouse) => handle_mouse(s, mouse.kind, mouse.column, mouse.row),
        _ => {}
    }
}

fn handle_key(s: &mut State, code: KeyCode, modifiers: KeyModifiers) {
    s.status = None;
    if modifiers.contains(KeyModifiers::CONTROL) && code == KeyCode::Char('c') {
        s.quit = true;
        return;
    }
    let help = s.view.help_visible();
    match code {
        KeyCode::Char('q') => s.quit = true,
        KeyCode::Esc => {
            let active = s.host.borrow().active_sub_window().map(|w| w.id());
            match active {
                Some(id) if Some(id) == s.view.help_window() => s.view.set_help_visible(false),
                Some(id) => s.host.borrow_mut().close(id),
                None => s.quit = true,
            }
        }
        KeyCode::Char('h') | KeyCode::Char('?') => s.toggle_help(),
        KeyCode::Up if help => s.help_offset = s.help_offset.saturating_sub(1),
        KeyCode::Down if help => s.help_offset += 1,
        KeyCode::PageUp if help => s.help_offset = s.help_offset.saturating_sub(10),
        KeyCode::PageDown if help => s.help_offset += 10,
        KeyCode::Up | KeyCode::BackTab => s.move_focus(-1),
        KeyCode::Down | KeyCode::Tab => s.move_focus(1),
        KeyCode::Left | KeyCode::Right => {
            let direction = if code == KeyCode::Left { -1.0 } else { 1.0 };
            match s.focus {
                Some(Focus::Control { .. }) => s.adjust(direction, modifiers),
                _ => s.move_focus(direction as isize),
            }
        }
        KeyCode::Char(' ') | KeyCode::Enter => s.activate(),
        KeyCode::Char('r') => s.reset(),
        KeyCode::Char('l') => s.toggle_link(),
        _ => {}
    }
}

fn handle_mouse(s: &mut State, kind: MouseEventKind, x: u16, y: u16) {
    let over_help = s.view.help_visible() && s.areas.help.contains((x, y).into());
    match kind {
        MouseEventKind::Down(MouseButton::Left) => {
            s.status = None;
            if over_help {
                return;
            }
            if let Some(key) = action_bar_hit(x, y, s.areas.action_bar, ACTIONS) {
                handle_key(s, action_key(key), KeyModifiers::NONE);
                return;
            }
            if let Some(i) = ButtonBox::button_at(x, y, s.areas.buttons, &s.areas.button_widths, BUTTON_SPACING) {
                s.focus = Some(Focus::Button(i));
                s.press(i);
                return;
            }
            if let Some(focus) = s.hit(x, y) {
                let already = s.focus == Some(focus);
                s.focus = Some(focus);
                // A click on a focused toggle, combo or LED activates it.
                let toggles = matches!(
                    s.focused_entry().map(|(_, e)| e.control().kind()),
                    Some(ControlKind::Check | ControlKind::Combo)
                );
                if focus == Focus::LinkLed || (already && toggles) {
                    s.activate();
                }
            }
        }
        MouseEventKind::ScrollUp | MouseEventKind::ScrollDown => {
            let up = kind == MouseEventKind::ScrollUp;
            if over_help {
                s.help_offset = if up { s.help_offset.saturating_sub(1) } else { s.help_offset + 1 };
            } else if let Some(focus @ Focus::Control { .. }) = s.hit(x, y) {
                s.focus = Some(focus);
                s.adjust(if up { 1.0 } else { -1.0 }, KeyModifiers::NONE);
            }
        }
        _ => {}
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

fn proc_height(pv: &ProcView) -> u16 {
    // Borders plus at least one row for the "(no controls)" note.
    (pv.group().rows() as u16 * CONTROL_HEIGHT).max(1) + 2
}

fn render(frame: &mut Frame, s: &mut State) {
    let area = frame.area();
    let [title_area, content_area, status_area, action_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(area);

    let descriptor = &s.opened.plugin.descriptor;
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(
                format!(" {} ", descriptor.name),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            Span::styled(descriptor.uri.as_str(), Style::default().fg(Color::DarkGray)),
        ])),
        title_area,
    );

    s.areas.controls.clear();
    s.areas.buttons = Rect::default();
    s.areas.button_widths.clear();
    s.areas.led = Rect::default();
    s.areas.action_bar = action_area;

    let view = &s.view;
    let grid = view.grid();
    let rects = grid.layout(content_area, |cell| match cell.item {
        GridItem::Buttons => 2,
        GridItem::Proc(i) => view.proc_views().get(i).map_or(0, proc_height),
        GridItem::LinkLed => 1,
    });

    for (cell, rect) in grid.cells().iter().zip(rects) {
        match cell.item {
            GridItem::Buttons => {
                let buttons: Vec<Button> = view
                    .buttons()
                    .iter()
                    .enumerate()
                    .map(|(i, b)| {
                        Button::new(b.text())
                            .checked(b.is_checkable() && b.is_checked())
                            .focused(s.focus == Some(Focus::Button(i)))
                    })
                    .collect();
                s.areas.button_widths = buttons.iter().map(|b| b.width()).collect();
                s.areas.buttons = rect;
                frame.render_widget(ButtonBox::new(&buttons).spacing(BUTTON_SPACING), rect);
            }
            GridItem::Proc(i) => {
                if let Some(pv) = view.proc_views().get(i) {
                    render_proc(frame, rect, pv, s.focus, &mut s.areas.controls);
                }
            }
            GridItem::LinkLed => {
                let checked = view.global_link_led().is_some_and(LinkLed::is_checked);
                frame.render_widget(
                    LedCheckBox::new(LinkLed::LABEL, checked).focused(s.focus == Some(Focus::LinkLed)),
                    rect,
                );
                s.areas.led = rect;
            }
        }
    }

    let status = match &s.status {
        Some(msg) => Span::styled(format!(" {msg}"), Style::default().fg(Color::Yellow)),
        None => {
            let tip = s
                .focused_entry()
                .map(|(_, e)| e.control().top_widget().tool_tip())
                .unwrap_or("");
            Span::styled(format!(" {tip}"), Style::default().fg(Color::Gray))
        }
    };
    frame.render_widget(Paragraph::new(Line::from(status)), status_area);

    render_action_bar(frame, action_area);

    s.areas.help = Rect::default();
    let host = s.host.borrow();
    for window in host.visible_sub_windows() {
        let popup = centered_rect(
            (area.width * 3 / 5).max(30),
            (area.height / 2).max(8),
            area,
        );
        frame.render_widget(Clear, popup);
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", window.title()))
            .border_style(Style::default().fg(Color::Yellow));
        let inner = block.inner(popup);
        frame.render_widget(block, popup);

        let lines = wrap_text(window.label().text(), inner.width.saturating_sub(1) as usize);
        let offset = ScrollView::clamp_offset(s.help_offset, lines.len(), inner.height as usize);
        s.help_offset = offset;
        frame.render_widget(ScrollView::new(&lines, offset), inner);
        s.areas.help = popup;
    }
}

fn render_proc(frame: &mut Frame, area: Rect, pv: &ProcView, focus: Option<Focus>, hits: &mut Vec<(Focus, Rect)>) {
    let group = pv.group();
    let title = if group.has_peers() {
        format!(" Channel {} ", pv.index() + 1)
    } else {
        " Controls ".to_string()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if group.is_empty() {
        frame.render_widget(
            Paragraph::new("(no controls)").style(Style::default().fg(Color::DarkGray)),
            inner,
        );
        return;
    }

    let col_width = inner.width / group.columns().max(1) as u16;
    for (index, entry) in group.controls().iter().enumerate() {
        let (row, col) = group.position(index);
        let x = inner.x + col as u16 * col_width;
        let y = inner.y + row as u16 * CONTROL_HEIGHT;
        if y >= inner.bottom() {
            break;
        }
        let rect = Rect::new(x, y, col_width.saturating_sub(1), 2.min(inner.bottom() - y));
        let f = Focus::Control { proc: pv.index(), index };
        render_control(frame, rect, entry.control(), focus == Some(f));
        hits.push((f, rect));
    }
}

fn render_control(frame: &mut Frame, area: Rect, control: &Control, focused: bool) {
    let label = control.text();
    match control.kind() {
        ControlKind::Knob => {
            let (min, max) = control.range();
            frame.render_widget(Knob::new(label, control.value(), min, max).focused(focused), area);
        }
        ControlKind::Lcd { digits } => {
            let value = control.value().round() as i64;
            frame.render_widget(Lcd::new(label, digits, value).focused(focused), area);
        }
        ControlKind::Combo => {
            let options: Vec<&str> = control.options().iter().map(|o| o.label.as_str()).collect();
            frame.render_widget(
                Combo::new(label, &options, control.selected_option()).focused(focused),
                area,
            );
        }
        ControlKind::Check => {
            frame.render_widget(CheckBox::new(label, control.is_checked()).focused(focused), area);
        }
    }
}

fn render_action_bar(frame: &mut Frame, area: Rect) {
    if area.height == 0 || area.width == 0 {
        return;
    }
    let key_style = Style::default().fg(Color::Black).bg(Color::White).add_modifier(Modifier::BOLD);
    let label_style = Style::default().fg(Color::White);

    let y = area.y;
    let mut x = area.x;
    for &(key, desc) in ACTIONS {
        if x > area.x {
            x += 1;
        }
        for (text, style) in [(format!(" {key} "), key_style), (format!(" {desc}"), label_style)] {
            for ch in text.chars() {
                if x >= area.right() {
                    return;
                }
                if let Some(c) = frame.buffer_mut().cell_mut((x, y)) {
                    c.set_char(ch);
                    c.set_style(style);
                }
                x += 1;
            }
        }
    }
}

/// Key sent by a click on the action bar item labelled `key`.
fn action_key(key: char) -> KeyCode {
    match key {
        '↑' => KeyCode::Down,
        '←' => KeyCode::Right,
        c => KeyCode::Char(c),
    }
}

fn action_bar_hit(x: u16, y: u16, area: Rect, actions: &[(&str, &str)]) -> Option<char> {
    if y != area.y || x < area.x || x >= area.right() {
        return None;
    }
    let rel_x = (x - area.x) as usize;
    let mut pos = 0;
    for &(key, desc) in actions {
        if pos > 0 {
            pos += 1;
        }
        let total = key.chars().count() + 2 + desc.chars().count() + 1;
        if rel_x >= pos && rel_x < pos + total {
            return key.chars().next();
        }
        pos += total;
    }
    None
}

#[cfg(test)]
mod tests {
    use ratatui::backend::TestBackend;

    use super::*;
    use crate::editor::host::Label;
    use crate::plugin::Runtime;

    fn state(source: &str, channels: usize, reload: bool) -> State {
        let mut session = Session::new(source.into(), Some(6), Some(channels), Runtime::default());
        session.options.reload_button = reload;
        let opened = session.open().unwrap();
        State::new(session, opened)
    }

    fn draw(s: &mut State) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|frame| render(frame, s)).unwrap();
        let buf = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buf.area.height {
            for x in 0..buf.area.width {
                text.push_str(buf[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn focus_starts_on_first_control() {
        let s = state("builtin:amp", 2, false);
        assert_eq!(s.focus, Some(Focus::Control { proc: 0, index: 0 }));
        // Help button, 3 controls per channel, link LED.
        assert_eq!(s.focus_order().len(), 1 + 3 + 3 + 1);
    }

    #[test]
    fn arrows_adjust_the_focused_control() {
        let mut s = state("builtin:amp", 1, false);
        handle_key(&mut s, KeyCode::Right, KeyModifiers::NONE);
        let gain = s.opened.base.controls()[0].model("gain").unwrap().value();
        assert!((gain - 2.4).abs() < 1e-4);
        handle_key(&mut s, KeyCode::Char('r'), KeyModifiers::NONE);
        assert_eq!(s.opened.base.controls()[0].model("gain").unwrap().value(), 0.0);
    }

    #[test]
    fn space_cycles_combo_and_wraps() {
        let mut s = state("builtin:amp", 1, false);
        s.focus = Some(Focus::Control { proc: 0, index: 2 });
        for expected in [1.0, 2.0, 0.0] {
            handle_key(&mut s, KeyCode::Char(' '), KeyModifiers::NONE);
            assert_eq!(s.opened.base.controls()[0].model("mode").unwrap().value(), expected);
        }
    }

    #[test]
    fn link_key_links_channels() {
        let mut s = state("builtin:amp", 2, false);
        handle_key(&mut s, KeyCode::Char('l'), KeyModifiers::NONE);
        assert!(s.opened.base.link_channels());
        assert!(s.view.global_link_led().unwrap().is_checked());
    }

    #[test]
    fn help_key_shows_description_and_esc_hides_it() {
        let mut s = state("builtin:amp", 1, false);
        handle_key(&mut s, KeyCode::Char('h'), KeyModifiers::NONE);
        assert!(s.view.help_visible());
        assert!(draw(&mut s).contains("mono amplifier"));
        handle_key(&mut s, KeyCode::Esc, KeyModifiers::NONE);
        assert!(!s.view.help_visible());
        assert!(!s.quit);
        handle_key(&mut s, KeyCode::Esc, KeyModifiers::NONE);
        assert!(s.quit);
    }

    #[test]
    fn reload_rebuilds_the_view() {
        let mut s = state("builtin:amp", 1, true);
        s.opened.base.set_value(0, "gain", 6.0);
        s.press(0);
        assert_eq!(s.opened.base.controls()[0].model("gain").unwrap().value(), 0.0);
        assert_eq!(s.host.borrow().len(), 1);
    }

    #[test]
    fn render_shows_controls_and_tooltip() {
        let mut s = state("builtin:amp", 2, false);
        let text = draw(&mut s);
        assert!(text.contains("Simple Amp"));
        assert!(text.contains("Channel 2"));
        assert!(text.contains("Link Channels"));
        assert!(text.contains("Output gain in decibels"));
        assert_eq!(s.areas.controls.len(), 6);
    }

    #[test]
    fn action_bar_hit_counts_chars() {
        let area = Rect::new(0, 10, 80, 1);
        // " ↑↓ " + " select" = 11 cells.
        assert_eq!(action_bar_hit(0, 10, area, ACTIONS), Some('↑'));
        assert_eq!(action_bar_hit(12, 10, area, ACTIONS), Some('←'));
        assert_eq!(action_bar_hit(12, 11, area, ACTIONS), None);
    }

    #[test]
    fn clicking_arrow_actions_selects_and_adjusts() {
        let mut s = state("builtin:amp", 1, false);
        draw(&mut s);
        let bar = s.areas.action_bar;
        assert_eq!(s.focus, Some(Focus::Control { proc: 0, index: 0 }));

        handle_mouse(&mut s, MouseEventKind::Down(MouseButton::Left), bar.x, bar.y);
        assert_eq!(s.focus, Some(Focus::Control { proc: 0, index: 1 }));

        s.focus = Some(Focus::Control { proc: 0, index: 0 });
        handle_mouse(&mut s, MouseEventKind::Down(MouseButton::Left), bar.x + 12, bar.y);
        let gain = s.opened.base.controls()[0].model("gain").unwrap().value();
        assert!((gain - 2.4).abs() < 1e-4);
        assert_eq!(action_key('q'), KeyCode::Char('q'));
    }

    #[test]
    fn esc_closes_the_top_window_first() {
        let mut s = state("builtin:amp", 1, false);
        handle_key(&mut s, KeyCode::Char('h'), KeyModifiers::NONE);
        let extra = s.host.borrow_mut().add_windowed_widget("Notes", Label::new("notes"));
        s.host.borrow_mut().show(extra);

        handle_key(&mut s, KeyCode::Esc, KeyModifiers::NONE);
        assert!(s.host.borrow().sub_window(extra).is_none());
        assert!(s.view.help_visible());
        handle_key(&mut s, KeyCode::Esc, KeyModifiers::NONE);
        assert!(!s.view.help_visible());
        assert!(!s.quit);
    }
}
