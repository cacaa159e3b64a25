use std::collections::HashMap;
use std::sync::Arc;

use crate::plugin::{ControlPort, PluginDescriptor, Port, Vis};

/// Value of one control input port, kept within the port's range.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlModel {
    value: f32,
    min: f32,
    max: f32,
    default: f32,
    vis: Vis,
    /// Allowed values for enumeration ports, ascending.
    steps: Vec<f32>,
}

impl ControlModel {
    pub fn for_port(port: &ControlPort) -> Self {
        let mut model = Self {
            value: port.default,
            min: port.min,
            max: port.max,
            default: port.default,
            vis: port.vis,
            steps: port.scale_points.iter().map(|sp| sp.value).collect(),
        };
        model.reset();
        model
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn min(&self) -> f32 {
        self.min
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    /// Set the value, snapping it to what the port can represent.
    /// Returns true if the value changed.
    pub fn set(&mut self, value: f32) -> bool {
        let mut v = value.clamp(self.min, self.max);
        match self.vis {
            Vis::Toggled => v = if v > self.min + (self.max - self.min) / 2.0 { self.max } else { self.min },
            Vis::Integer => v = v.round().clamp(self.min, self.max),
            Vis::Enumeration if !self.steps.is_empty() => {
                v = self
                    .steps
                    .iter()
                    .copied()
                    .min_by(|a, b| (a - v).abs().total_cmp(&(b - v).abs()))
                    .unwrap_or(v);
            }
            Vis::Enumeration | Vis::None => {}
        }
        let changed = v != self.value;
        self.value = v;
        changed
    }

    pub fn reset(&mut self) -> bool {
        self.set(self.default)
    }

    /// Move by `delta` for continuous ports; integer, toggle and enumeration
    /// ports move one step in the direction of `delta`.
    pub fn step(&mut self, delta: f32) -> bool {
        if delta == 0.0 {
            return false;
        }
        match self.vis {
            Vis::None => self.set(self.value + delta),
            Vis::Integer => self.set(self.value + delta.signum() * delta.abs().max(1.0).round()),
            Vis::Toggled => {
                if delta > 0.0 {
                    self.set(self.max)
                } else {
                    self.set(self.min)
                }
            }
            Vis::Enumeration => {
                let current = self.steps.iter().position(|&s| s == self.value);
                let next = match (current, delta > 0.0) {
                    (Some(i), true) => self.steps.get(i + 1),
                    (Some(i), false) => i.checked_sub(1).and_then(|i| self.steps.get(i)),
                    (None, _) => self.steps.first(),
                };
                match next.copied() {
                    Some(v) => self.set(v),
                    None => self.set(self.value + delta.signum()),
                }
            }
        }
    }

}

/// One instantiation of the plugin, e.g. the left or right channel.
pub struct Processor {
    plugin: Arc<PluginDescriptor>,
    models: HashMap<String, ControlModel>,
}

impl Processor {
    pub fn new(plugin: Arc<PluginDescriptor>) -> Self {
        let models = plugin
            .control_inputs()
            .map(|c| (c.info.symbol.clone(), ControlModel::for_port(c)))
            .collect();
        Self { plugin, models }
    }

    /// Ports in declaration order.
    pub fn ports(&self) -> &[Port] {
        &self.plugin.ports
    }

    pub fn model(&self, symbol: &str) -> Option<&ControlModel> {
        self.models.get(symbol)
    }

    pub fn model_mut(&mut self, symbol: &str) -> Option<&mut ControlModel> {
        self.models.get_mut(symbol)
    }
}

/// Host-side aggregate of all processors of one plugin plus shared state.
pub struct ControlBase {
    plugin: Arc<PluginDescriptor>,
    processors: Vec<Processor>,
    has_gui: bool,
    link_channels: bool,
}

impl ControlBase {
    pub fn new(plugin: Arc<PluginDescriptor>, processor_count: usize) -> Self {
        assert!(processor_count >= 1, "a control base needs at least one processor");
        let processors = (0..processor_count)
            .map(|_| Processor::new(plugin.clone()))
            .collect();
        log::debug!(
            "Control base for {}: {processor_count} processor(s)",
            plugin.name
        );
        Self {
            has_gui: plugin.has_gui,
            plugin,
            processors,
            link_channels: false,
        }
    }

    /// Processors needed to cover `host_channels`: a mono plugin runs once per
    /// channel, anything else runs once.
    pub fn processor_count_for(plugin: &PluginDescriptor, host_channels: usize) -> usize {
        if plugin.audio_inputs() <= 1 && plugin.audio_outputs() == 1 {
            host_channels.max(1)
        } else {
            1
        }
    }

    pub fn controls(&self) -> &[Processor] {
        &self.processors
    }

    pub fn plugin(&self) -> &PluginDescriptor {
        &self.plugin
    }

    pub fn has_gui(&self) -> bool {
        self.has_gui
    }

    #[cfg(test)]
    pub fn set_has_gui(&mut self, has_gui: bool) {
        self.has_gui = has_gui;
    }

    pub fn link_channels(&self) -> bool {
        self.link_channels
    }

    /// Turning the link on copies the first processor's values to the others.
    pub fn set_link_channels(&mut self, linked: bool) {
        self.link_channels = linked;
        if !linked {
            return;
        }
        let Some((first, rest)) = self.processors.split_first_mut() else {
            return;
        };
        for (symbol, model) in &first.models {
            for peer in rest.iter_mut() {
                if let Some(m) = peer.model_mut(symbol) {
                    m.set(model.value());
                }
            }
        }
    }

    /// Apply `f` to the model of `symbol` on processor `proc`, and to every
    /// peer processor when channels are linked. Returns true if any value changed.
    fn update(&mut self, proc: usize, symbol: &str, f: impl Fn(&mut ControlModel) -> bool) -> bool {
        let Some(model) = self.processors.get_mut(proc).and_then(|p| p.model_mut(symbol)) else {
            log::warn!("No control '{symbol}' on processor {proc}");
            return false;
        };
        let mut changed = f(model);
        if self.link_channels {
            let value = model.value();
            for (i, peer) in self.processors.iter_mut().enumerate() {
                if i == proc {
                    continue;
                }
                if let Some(m) = peer.model_mut(symbol) {
                    changed |= m.set(value);
                }
            }
        }
        changed
    }

    pub fn set_value(&mut self, proc: usize, symbol: &str, value: f32) -> bool {
        self.update(proc, symbol, |m| m.set(value))
    }

    pub fn step_value(&mut self, proc: usize, symbol: &str, delta: f32) -> bool {
        self.update(proc, symbol, |m| m.step(delta))
    }

    pub fn reset_value(&mut self, proc: usize, symbol: &str) -> bool {
        self.update(proc, symbol, ControlModel::reset)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::plugin::{Flow, PortIndex, PortInfo, ScalePoint};

    pub(crate) fn control_port(index: usize, symbol: &str, vis: Vis, max: f32) -> Port {
        Port::Control(ControlPort {
            info: PortInfo {
                index: PortIndex(index),
                symbol: symbol.into(),
                name: symbol.to_uppercase(),
                flow: Flow::Input,
            },
            min: 0.0,
            max,
            default: 0.0,
            vis,
            scale_points: Vec::new(),
        })
    }

    fn plugin(ports: Vec<Port>) -> Arc<PluginDescriptor> {
        Arc::new(PluginDescriptor {
            uri: "urn:test".into(),
            name: "Test".into(),
            ports,
            has_gui: false,
        })
    }

    fn model(vis: Vis, min: f32, max: f32, default: f32) -> ControlModel {
        let Port::Control(mut port) = control_port(0, "x", vis, max) else {
            unreachable!()
        };
        port.min = min;
        port.default = default;
        ControlModel::for_port(&port)
    }

    #[test]
    fn set_clamps_into_range() {
        let mut m = model(Vis::None, -1.0, 1.0, 0.0);
        assert!(m.set(5.0));
        assert_eq!(m.value(), 1.0);
        assert!(!m.set(3.0));
        m.set(-9.0);
        assert_eq!(m.value(), -1.0);
    }

    #[test]
    fn integer_rounds() {
        let mut m = model(Vis::Integer, 0.0, 7.0, 2.0);
        m.set(3.4);
        assert_eq!(m.value(), 3.0);
        m.step(0.1);
        assert_eq!(m.value(), 4.0);
        m.step(-0.1);
        assert_eq!(m.value(), 3.0);
    }

    #[test]
    fn toggle_snaps_to_ends() {
        let mut m = model(Vis::Toggled, 0.0, 1.0, 0.0);
        m.set(0.7);
        assert_eq!(m.value(), 1.0);
        m.step(-1.0);
        assert_eq!(m.value(), 0.0);
    }

    #[test]
    fn enumeration_walks_scale_points() {
        let Port::Control(mut port) = control_port(0, "type", Vis::Enumeration, 4.0) else {
            unreachable!()
        };
        port.scale_points = vec![
            ScalePoint { value: 0.0, label: "A".into() },
            ScalePoint { value: 2.0, label: "B".into() },
            ScalePoint { value: 4.0, label: "C".into() },
        ];
        let mut m = ControlModel::for_port(&port);
        m.step(1.0);
        assert_eq!(m.value(), 2.0);
        m.step(1.0);
        assert_eq!(m.value(), 4.0);
        assert!(!m.step(1.0));
        m.set(1.2);
        assert_eq!(m.value(), 2.0);
    }

    #[test]
    fn reset_restores_default() {
        let mut m = model(Vis::None, 0.0, 10.0, 4.0);
        m.set(9.0);
        assert!(m.reset());
        assert_eq!(m.value(), 4.0);
    }

    #[test]
    fn processor_has_models_for_control_inputs_only() {
        let mut out = control_port(1, "level", Vis::None, 1.0);
        if let Port::Control(c) = &mut out {
            c.info.flow = Flow::Output;
        }
        let p = Processor::new(plugin(vec![control_port(0, "gain", Vis::None, 1.0), out]));
        assert!(p.model("gain").is_some());
        assert!(p.model("level").is_none());
        assert_eq!(p.ports().len(), 2);
    }

    #[test]
    #[should_panic(expected = "at least one processor")]
    fn zero_processors_is_fatal() {
        ControlBase::new(plugin(Vec::new()), 0);
    }

    #[test]
    fn mono_plugin_gets_one_processor_per_channel() {
        let audio = |i: usize, flow| {
            Port::Audio(PortInfo {
                index: PortIndex(i),
                symbol: format!("a{i}"),
                name: format!("A{i}"),
                flow,
            })
        };
        let mono = plugin(vec![audio(0, Flow::Input), audio(1, Flow::Output)]);
        let stereo = plugin(vec![
            audio(0, Flow::Input),
            audio(1, Flow::Input),
            audio(2, Flow::Output),
            audio(3, Flow::Output),
        ]);
        assert_eq!(ControlBase::processor_count_for(&mono, 2), 2);
        assert_eq!(ControlBase::processor_count_for(&mono, 0), 1);
        assert_eq!(ControlBase::processor_count_for(&stereo, 2), 1);
    }

    #[test]
    fn linked_channels_propagate_edits() {
        let mut base = ControlBase::new(plugin(vec![control_port(0, "gain", Vis::None, 1.0)]), 2);
        assert!(base.set_value(0, "gain", 0.5));
        assert_eq!(base.controls()[1].model("gain").unwrap().value(), 0.0);

        base.set_link_channels(true);
        assert_eq!(base.controls()[1].model("gain").unwrap().value(), 0.5);

        base.step_value(1, "gain", 0.25);
        assert_eq!(base.controls()[0].model("gain").unwrap().value(), 0.75);
        assert_eq!(base.controls()[1].model("gain").unwrap().value(), 0.75);
    }

    #[test]
    fn unknown_symbol_is_ignored() {
        let mut base = ControlBase::new(plugin(Vec::new()), 1);
        assert!(!base.set_value(0, "missing", 1.0));
        assert!(!base.reset_value(3, "missing"));
    }
}
