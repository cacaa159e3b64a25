use crate::config::EditorConfig;
use crate::control::ControlBase;
use crate::plugin::{Metadata, RDFS_COMMENT, Rdf};

use super::grid::{Grid, Row};
use super::host::{HostHandle, Label, SubWindowId};
use super::linked::{LinkLed, LinkedModelGroupView, LinkedModelGroupsView, rebind_groups};
use super::proc_view::ProcView;

/// Construction switches for the editor view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewOptions {
    /// Grid column count; must be a multiple of the processor count.
    pub columns: usize,
    pub reload_button: bool,
    pub gui_button: bool,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            columns: 6,
            reload_button: false,
            gui_button: false,
        }
    }
}

impl From<&EditorConfig> for ViewOptions {
    fn from(config: &EditorConfig) -> Self {
        Self {
            columns: config.columns,
            reload_button: config.reload_button,
            gui_button: config.gui_button,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonKind {
    Reload,
    ShowGui,
    Help,
}

#[derive(Debug, Clone)]
pub struct ViewButton {
    kind: ButtonKind,
    checkable: bool,
    checked: bool,
}

impl ViewButton {
    fn new(kind: ButtonKind) -> Self {
        Self {
            kind,
            checkable: kind != ButtonKind::Reload,
            checked: false,
        }
    }

    #[allow(dead_code)]
    pub fn kind(&self) -> ButtonKind {
        self.kind
    }

    pub fn text(&self) -> &'static str {
        match self.kind {
            ButtonKind::Reload => "Reload Plugin",
            ButtonKind::ShowGui => "Show GUI",
            ButtonKind::Help => "Help",
        }
    }

    pub fn is_checkable(&self) -> bool {
        self.checkable
    }

    pub fn is_checked(&self) -> bool {
        self.checked
    }
}

/// What sits in a grid cell of the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridItem {
    Buttons,
    Proc(usize),
    LinkLed,
}

/// Editor view of a control base: action buttons, one group of controls per
/// processor, and the channel link indicator.
pub struct Lv2View {
    host: HostHandle,
    buttons: Vec<ViewButton>,
    help_text: Option<String>,
    help_window: Option<SubWindowId>,
    proc_views: Vec<ProcView>,
    link_led: Option<LinkLed>,
    grid: Grid<GridItem>,
}

/// String form of the first node, if any. The list is dropped on return.
fn first_string<R: Rdf + ?Sized>(rdf: &R, nodes: R::Nodes) -> Option<String> {
    nodes.into_iter().next().and_then(|node| rdf.node_as_string(&node))
}

impl Lv2View {
    pub fn new<R: Rdf + ?Sized>(host: HostHandle, base: &ControlBase, rdf: &R, options: &ViewOptions) -> Self {
        let columns = options.columns;
        let n = base.controls().len();
        assert!(n >= 1, "the editor needs at least one processor");
        assert!(columns > 0, "grid column count must be positive");
        assert!(
            columns % n == 0,
            "grid column count {columns} is not a multiple of the processor count {n}"
        );

        let mut buttons = Vec::new();
        if options.reload_button {
            buttons.push(ViewButton::new(ButtonKind::Reload));
        }
        if options.gui_button {
            buttons.push(ViewButton::new(ButtonKind::ShowGui));
        }

        let comment = rdf.uri(RDFS_COMMENT);
        let help_text = first_string(rdf, rdf.plugin_value(&comment));
        let help_window = help_text.as_ref().map(|text| {
            let mut main = host.borrow_mut();
            let id = main.add_windowed_widget(format!("{} - Help", base.plugin().name), Label::new(text.as_str()));
            main.set_delete_on_close(id, false);
            main.hide(id);
            buttons.push(ViewButton::new(ButtonKind::Help));
            id
        });
        if help_window.is_none() {
            log::debug!("{}: no plugin comment, help disabled", base.plugin().uri);
        }

        let mut grid = Grid::new(columns);
        if !buttons.is_empty() {
            grid.add(Row::Button, 0, columns, GridItem::Buttons);
        }

        let cols_each = columns / n;
        let proc_views: Vec<ProcView> = base
            .controls()
            .iter()
            .enumerate()
            .map(|(i, processor)| {
                grid.add(Row::Proc, i * cols_each, cols_each, GridItem::Proc(i));
                ProcView::new(i, processor, cols_each, n, rdf)
            })
            .collect();

        let link_led = (n > 1).then(|| LinkLed::new(base.link_channels()));
        if link_led.is_some() {
            grid.add(Row::LinkChannels, 0, columns, GridItem::LinkLed);
        }

        log::info!(
            "Editor for {}: {n} processor(s), {columns} column(s), {} button(s)",
            base.plugin().name,
            buttons.len()
        );

        let mut view = Self {
            host,
            buttons,
            help_text,
            help_window,
            proc_views,
            link_led,
            grid,
        };
        view.model_changed(base);
        view
    }

    pub fn proc_views(&self) -> &[ProcView] {
        &self.proc_views
    }

    pub fn buttons(&self) -> &[ViewButton] {
        &self.buttons
    }

    #[cfg(test)]
    pub fn button(&self, kind: ButtonKind) -> Option<&ViewButton> {
        self.buttons.iter().find(|b| b.kind == kind)
    }

    fn button_mut(&mut self, kind: ButtonKind) -> Option<&mut ViewButton> {
        self.buttons.iter_mut().find(|b| b.kind == kind)
    }

    pub fn grid(&self) -> &Grid<GridItem> {
        &self.grid
    }

    pub fn help_text(&self) -> Option<&str> {
        self.help_text.as_deref()
    }

    pub fn help_window(&self) -> Option<SubWindowId> {
        self.help_window
    }

    #[cfg(test)]
    pub fn host(&self) -> &HostHandle {
        &self.host
    }

    /// Show and raise the help window, or hide it. Without a help window
    /// this does nothing.
    pub fn toggle_help(&mut self, visible: bool) {
        let Some(id) = self.help_window else {
            return;
        };
        let mut main = self.host.borrow_mut();
        if visible {
            main.show(id);
            main.raise(id);
        } else {
            main.hide(id);
        }
    }

    /// Set the Help button's checked state and follow it with the window.
    pub fn set_help_visible(&mut self, visible: bool) {
        if let Some(b) = self.button_mut(ButtonKind::Help) {
            b.checked = visible;
        }
        self.toggle_help(visible);
    }

    pub fn help_visible(&self) -> bool {
        self.help_window
            .and_then(|id| self.host.borrow().sub_window(id).map(|w| w.is_visible()))
            .unwrap_or(false)
    }

    /// Click the `index`-th button of the button row. Checkable buttons
    /// flip their state; Help also shows or hides the help window.
    /// Returns the kind of the clicked button.
    pub fn press_button(&mut self, index: usize) -> Option<ButtonKind> {
        let button = self.buttons.get_mut(index)?;
        let kind = button.kind;
        if button.checkable {
            button.checked = !button.checked;
        }
        if kind == ButtonKind::Help {
            let visible = button.checked;
            self.toggle_help(visible);
        }
        Some(kind)
    }
}

impl LinkedModelGroupsView for Lv2View {
    fn group_count(&self) -> usize {
        self.proc_views.len()
    }

    fn group_view(&self, index: usize) -> Option<&LinkedModelGroupView> {
        self.proc_views.get(index).map(ProcView::group)
    }

    fn group_view_mut(&mut self, index: usize) -> Option<&mut LinkedModelGroupView> {
        self.proc_views.get_mut(index).map(ProcView::group_mut)
    }

    fn global_link_led(&self) -> Option<&LinkLed> {
        self.link_led.as_ref()
    }

    fn global_link_led_mut(&mut self) -> Option<&mut LinkLed> {
        self.link_led.as_mut()
    }

    fn model_changed(&mut self, base: &ControlBase) {
        if let Some(b) = self.button_mut(ButtonKind::ShowGui) {
            b.checked = base.has_gui();
        }
        rebind_groups(self, base);
    }
}

impl Drop for Lv2View {
    fn drop(&mut self) {
        let Some(id) = self.help_window else {
            return;
        };
        match self.host.try_borrow_mut() {
            Ok(mut main) => {
                main.close(id);
                main.remove_sub_window(id);
            }
            Err(_) => log::warn!("Main window busy, help window left behind"),
        }
    }
}

/// Build a view reading RDF metadata from whichever backend loaded the plugin.
pub fn build(host: HostHandle, base: &ControlBase, metadata: &Metadata, options: &ViewOptions) -> Lv2View {
    match metadata {
        Metadata::Memory(rdf) => Lv2View::new(host, base, rdf, options),
        #[cfg(feature = "lv2")]
        Metadata::Lv2(rdf) => Lv2View::new(host, base, rdf, options),
    }
}
