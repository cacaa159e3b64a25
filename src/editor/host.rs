use std::cell::RefCell;
use std::rc::Rc;

/// Read-only, word-wrapped text shown in a docked subwindow.
#[derive(Debug, Clone)]
pub struct Label {
    text: String,
}

impl Label {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubWindowId(usize);

#[derive(Debug)]
pub struct SubWindow {
    id: SubWindowId,
    title: String,
    label: Label,
    visible: bool,
    delete_on_close: bool,
    z: u64,
}

impl SubWindow {
    pub fn id(&self) -> SubWindowId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn label(&self) -> &Label {
        &self.label
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    #[cfg(test)]
    pub fn delete_on_close(&self) -> bool {
        self.delete_on_close
    }
}

/// The editor's main window: owns every docked subwindow.
///
/// New subwindows start hidden and are destroyed on close unless
/// `set_delete_on_close(id, false)` is called.
#[derive(Debug, Default)]
pub struct MainWindow {
    sub_windows: Vec<SubWindow>,
    next_id: usize,
    next_z: u64,
}

/// Shared handle to the main window. Views hold one but never own the window.
pub type HostHandle = Rc<RefCell<MainWindow>>;

impl MainWindow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle() -> HostHandle {
        Rc::new(RefCell::new(Self::new()))
    }

    pub fn add_windowed_widget(&mut self, title: impl Into<String>, label: Label) -> SubWindowId {
        let id = SubWindowId(self.next_id);
        self.next_id += 1;
        self.next_z += 1;
        self.sub_windows.push(SubWindow {
            id,
            title: title.into(),
            label,
            visible: false,
            delete_on_close: true,
            z: self.next_z,
        });
        id
    }

    pub fn sub_window(&self, id: SubWindowId) -> Option<&SubWindow> {
        self.sub_windows.iter().find(|w| w.id == id)
    }

    fn sub_window_mut(&mut self, id: SubWindowId) -> Option<&mut SubWindow> {
        self.sub_windows.iter_mut().find(|w| w.id == id)
    }

    pub fn set_delete_on_close(&mut self, id: SubWindowId, delete: bool) {
        if let Some(w) = self.sub_window_mut(id) {
            w.delete_on_close = delete;
        }
    }

    pub fn show(&mut self, id: SubWindowId) {
        if let Some(w) = self.sub_window_mut(id) {
            w.visible = true;
        }
    }

    pub fn hide(&mut self, id: SubWindowId) {
        if let Some(w) = self.sub_window_mut(id) {
            w.visible = false;
        }
    }

    /// Put the subwindow on top of all others.
    pub fn raise(&mut self, id: SubWindowId) {
        self.next_z += 1;
        let z = self.next_z;
        if let Some(w) = self.sub_window_mut(id) {
            w.z = z;
        }
    }

    /// Hide the subwindow, destroying it if it is marked delete-on-close.
    pub fn close(&mut self, id: SubWindowId) {
        let delete = match self.sub_window_mut(id) {
            Some(w) => {
                w.visible = false;
                w.delete_on_close
            }
            None => return,
        };
        if delete {
            self.remove_sub_window(id);
        }
    }

    pub fn remove_sub_window(&mut self, id: SubWindowId) {
        self.sub_windows.retain(|w| w.id != id);
    }

    /// Visible subwindows, bottom-most first.
    pub fn visible_sub_windows(&self) -> Vec<&SubWindow> {
        let mut visible: Vec<&SubWindow> = self.sub_windows.iter().filter(|w| w.visible).collect();
        visible.sort_by_key(|w| w.z);
        visible
    }

    /// The top-most visible subwindow, if any.
    pub fn active_sub_window(&self) -> Option<&SubWindow> {
        self.sub_windows.iter().filter(|w| w.visible).max_by_key(|w| w.z)
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.sub_windows.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.sub_windows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_windows_start_hidden() {
        let mut host = MainWindow::new();
        let id = host.add_windowed_widget("Help", Label::new("text"));
        let w = host.sub_window(id).unwrap();
        assert!(!w.is_visible());
        assert!(w.delete_on_close());
        assert_eq!(w.label().text(), "text");
        assert!(host.visible_sub_windows().is_empty());
    }

    #[test]
    fn raise_reorders_visible_windows() {
        let mut host = MainWindow::new();
        let a = host.add_windowed_widget("a", Label::new("a"));
        let b = host.add_windowed_widget("b", Label::new("b"));
        host.show(a);
        host.show(b);
        assert_eq!(host.active_sub_window().unwrap().id(), b);
        host.raise(a);
        let order: Vec<_> = host.visible_sub_windows().iter().map(|w| w.id()).collect();
        assert_eq!(order, vec![b, a]);
    }

    #[test]
    fn close_respects_delete_on_close() {
        let mut host = MainWindow::new();
        let kept = host.add_windowed_widget("kept", Label::new(""));
        let gone = host.add_windowed_widget("gone", Label::new(""));
        host.set_delete_on_close(kept, false);
        host.show(kept);
        host.show(gone);

        host.close(kept);
        host.close(gone);
        assert!(!host.sub_window(kept).unwrap().is_visible());
        assert!(host.sub_window(gone).is_none());
        assert_eq!(host.len(), 1);
    }

    #[test]
    fn unknown_ids_are_ignored() {
        let mut host = MainWindow::new();
        let id = host.add_windowed_widget("x", Label::new(""));
        host.remove_sub_window(id);
        host.show(id);
        host.close(id);
        assert!(host.is_empty());
    }
}
