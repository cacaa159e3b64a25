use crate::control::Processor;
use crate::plugin::{Port, RDFS_COMMENT, Rdf};

use super::linked::LinkedModelGroupView;
use super::visitor::setup_widget;
use super::widget::ControlKind;

/// The controls of one processor.
#[derive(Debug, Clone)]
pub struct ProcView {
    index: usize,
    group: LinkedModelGroupView,
}

impl ProcView {
    /// Build one control per input control port of `processor`, in port
    /// declaration order, keyed by LV2 symbol.
    pub fn new<R: Rdf + ?Sized>(index: usize, processor: &Processor, cols: usize, n_proc: usize, rdf: &R) -> Self {
        let comment = rdf.uri(RDFS_COMMENT);
        let mut group = LinkedModelGroupView::new(cols, n_proc);

        for port in processor.ports() {
            let Some(mut control) = setup_widget(port, &comment, rdf) else {
                continue;
            };
            if let (ControlKind::Combo, Port::Control(c)) = (control.kind(), port) {
                if c.scale_points.is_empty() {
                    log::debug!("Enumeration port '{}' has no scale points", c.info.symbol);
                }
                control.set_options(c.scale_points.clone());
            }
            if let Some(model) = processor.model(port.symbol()) {
                control.bind(model);
            }
            group.add_control(control, port.symbol(), port.name(), false);
        }

        log::debug!("Processor {index}: {} control(s) in {cols} column(s)", group.controls().len());
        Self { index, group }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn group(&self) -> &LinkedModelGroupView {
        &self.group
    }

    pub fn group_mut(&mut self) -> &mut LinkedModelGroupView {
        &mut self.group
    }
}
