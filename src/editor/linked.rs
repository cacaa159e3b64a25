use crate::control::{ControlBase, Processor};

use super::widget::Control;

/// A control registered in a group view.
#[derive(Debug, Clone)]
pub struct ControlEntry {
    key: String,
    name: String,
    control: Control,
    linked: bool,
}

impl ControlEntry {
    /// LV2 symbol of the port the control edits.
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn control(&self) -> &Control {
        &self.control
    }

    /// Whether edits to this control are linked to the other processors.
    pub fn linked(&self) -> bool {
        self.linked
    }
}

/// The controls of one processor, flowing through `cols` columns.
#[derive(Debug, Clone)]
pub struct LinkedModelGroupView {
    cols: usize,
    n_proc: usize,
    controls: Vec<ControlEntry>,
}

impl LinkedModelGroupView {
    pub fn new(cols: usize, n_proc: usize) -> Self {
        Self {
            cols,
            n_proc,
            controls: Vec::new(),
        }
    }

    pub fn add_control(&mut self, control: Control, key: &str, name: &str, link_initially: bool) {
        assert!(
            self.controls.iter().all(|c| c.key != key),
            "control '{key}' registered twice"
        );
        self.controls.push(ControlEntry {
            key: key.to_string(),
            name: name.to_string(),
            control,
            linked: link_initially,
        });
    }

    /// Registered controls in registration order.
    pub fn controls(&self) -> &[ControlEntry] {
        &self.controls
    }

    #[cfg(test)]
    pub fn control(&self, key: &str) -> Option<&ControlEntry> {
        self.controls.iter().find(|c| c.key == key)
    }

    pub fn columns(&self) -> usize {
        self.cols
    }

    /// Whether other processors run beside this one.
    pub fn has_peers(&self) -> bool {
        self.n_proc > 1
    }

    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }

    /// Grid position (row, column) of the `i`-th registered control.
    pub fn position(&self, i: usize) -> (usize, usize) {
        let cols = self.cols.max(1);
        (i / cols, i % cols)
    }

    pub fn rows(&self) -> usize {
        self.controls.len().div_ceil(self.cols.max(1))
    }

    /// Copy every control's value from the matching model of `processor`.
    pub fn rebind(&mut self, processor: &Processor) {
        for entry in &mut self.controls {
            match processor.model(&entry.key) {
                Some(model) => entry.control.bind(model),
                None => log::debug!("No model for control '{}'", entry.key),
            }
        }
    }
}

/// The "link channels" indicator shown below the processors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkLed {
    checked: bool,
}

impl LinkLed {
    pub const LABEL: &'static str = "Link Channels";

    pub fn new(checked: bool) -> Self {
        Self { checked }
    }

    pub fn is_checked(&self) -> bool {
        self.checked
    }

    pub fn set_checked(&mut self, checked: bool) {
        self.checked = checked;
    }
}

/// A view made of one group view per processor of a control base.
pub trait LinkedModelGroupsView {
    fn group_count(&self) -> usize;

    fn group_view(&self, index: usize) -> Option<&LinkedModelGroupView>;

    fn group_view_mut(&mut self, index: usize) -> Option<&mut LinkedModelGroupView>;

    fn global_link_led(&self) -> Option<&LinkLed>;

    fn global_link_led_mut(&mut self) -> Option<&mut LinkLed>;

    /// Called when the control base changed; rebinds every control.
    fn model_changed(&mut self, base: &ControlBase) {
        rebind_groups(self, base);
    }
}

/// Rebind group `i` to processor `i` and sync the link indicator.
pub fn rebind_groups<V: LinkedModelGroupsView + ?Sized>(view: &mut V, base: &ControlBase) {
    for (i, processor) in base.controls().iter().enumerate() {
        if let Some(group) = view.group_view_mut(i) {
            group.rebind(processor);
        }
    }
    if let Some(led) = view.global_link_led_mut() {
        led.set_checked(base.link_channels());
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::control::tests::control_port;
    use crate::plugin::{PluginDescriptor, Vis};

    fn base(n: usize) -> ControlBase {
        let plugin = PluginDescriptor {
            uri: "urn:test".into(),
            name: "Test".into(),
            ports: vec![control_port(0, "gain", Vis::None, 1.0)],
            has_gui: false,
        };
        ControlBase::new(Arc::new(plugin), n)
    }

    struct Groups {
        groups: Vec<LinkedModelGroupView>,
        led: Option<LinkLed>,
    }

    impl LinkedModelGroupsView for Groups {
        fn group_count(&self) -> usize {
            self.groups.len()
        }

        fn group_view(&self, index: usize) -> Option<&LinkedModelGroupView> {
            self.groups.get(index)
        }

        fn group_view_mut(&mut self, index: usize) -> Option<&mut LinkedModelGroupView> {
            self.groups.get_mut(index)
        }

        fn global_link_led(&self) -> Option<&LinkLed> {
            self.led.as_ref()
        }

        fn global_link_led_mut(&mut self) -> Option<&mut LinkLed> {
            self.led.as_mut()
        }
    }

    #[test]
    fn controls_flow_through_columns() {
        let mut group = LinkedModelGroupView::new(3, 1);
        for key in ["a", "b", "c", "d"] {
            group.add_control(Control::knob(), key, key, false);
        }
        assert_eq!(group.position(2), (0, 2));
        assert_eq!(group.position(3), (1, 0));
        assert_eq!(group.rows(), 2);
        assert!(!group.has_peers());
    }

    #[test]
    #[should_panic(expected = "registered twice")]
    fn duplicate_key_is_fatal() {
        let mut group = LinkedModelGroupView::new(1, 1);
        group.add_control(Control::knob(), "gain", "Gain", false);
        group.add_control(Control::check(), "gain", "Gain", false);
    }

    #[test]
    fn link_flag_is_kept_per_control() {
        let mut group = LinkedModelGroupView::new(2, 2);
        group.add_control(Control::knob(), "gain", "Gain", false);
        group.add_control(Control::check(), "mute", "Mute", true);
        assert!(!group.control("gain").unwrap().linked());
        assert!(group.control("mute").unwrap().linked());
        assert!(group.has_peers());
    }

    #[test]
    fn default_model_changed_rebinds_each_group() {
        let mut base = base(2);
        let mut view = Groups {
            groups: (0..2)
                .map(|_| {
                    let mut g = LinkedModelGroupView::new(3, 2);
                    g.add_control(Control::knob(), "gain", "Gain", false);
                    g
                })
                .collect(),
            led: Some(LinkLed::new(false)),
        };

        base.set_value(1, "gain", 0.5);
        base.set_link_channels(false);
        view.model_changed(&base);
        assert_eq!(view.group_view(0).unwrap().control("gain").unwrap().control().value(), 0.0);
        assert_eq!(view.group_view(1).unwrap().control("gain").unwrap().control().value(), 0.5);
        assert!(!view.global_link_led().unwrap().is_checked());

        base.set_link_channels(true);
        view.model_changed(&base);
        assert!(view.global_link_led().unwrap().is_checked());
        assert_eq!(view.group_count(), 2);
    }
}
