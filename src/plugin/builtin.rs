use std::sync::Arc;

use super::memory::MemoryRdf;
use super::{
    ControlPort, Flow, LoadedPlugin, Metadata, PluginDescriptor, PluginInfo, Port, PortIndex,
    PortInfo, RDFS_COMMENT, ScalePoint, Vis,
};

const NAMES: &[&str] = &["amp", "filter", "eq"];

fn info(index: usize, symbol: &str, name: &str, flow: Flow) -> PortInfo {
    PortInfo {
        index: PortIndex(index),
        symbol: symbol.into(),
        name: name.into(),
        flow,
    }
}

fn control(index: usize, symbol: &str, name: &str, range: (f32, f32, f32), vis: Vis) -> Port {
    let (min, max, default) = range;
    Port::Control(ControlPort {
        info: info(index, symbol, name, Flow::Input),
        min,
        max,
        default,
        vis,
        scale_points: Vec::new(),
    })
}

fn scale(points: &[(f32, &str)]) -> Vec<ScalePoint> {
    points
        .iter()
        .map(|&(value, label)| ScalePoint {
            value,
            label: label.into(),
        })
        .collect()
}

/// Mono amplifier; a stereo host runs two of these side by side.
fn amp() -> (PluginDescriptor, MemoryRdf) {
    let mut mode = control(4, "mode", "Mode", (0.0, 2.0, 0.0), Vis::Enumeration);
    if let Port::Control(c) = &mut mode {
        c.scale_points = scale(&[(0.0, "Clean"), (1.0, "Warm"), (2.0, "Hot")]);
    }
    let plugin = PluginDescriptor {
        uri: "builtin:amp".into(),
        name: "Simple Amp".into(),
        ports: vec![
            Port::Audio(info(0, "in", "In", Flow::Input)),
            Port::Audio(info(1, "out", "Out", Flow::Output)),
            control(2, "gain", "Gain", (-24.0, 24.0, 0.0), Vis::None),
            control(3, "mute", "Mute", (0.0, 1.0, 0.0), Vis::Toggled),
            mode,
        ],
        has_gui: false,
    };
    let rdf = MemoryRdf::new()
        .with_plugin_value(RDFS_COMMENT, "A mono amplifier with a gain stage and three drive modes.")
        .with_port_value(2, RDFS_COMMENT, "Output gain in decibels")
        .with_port_value(4, RDFS_COMMENT, "Drive character");
    (plugin, rdf)
}

/// Stereo multimode filter.
fn filter() -> (PluginDescriptor, MemoryRdf) {
    let mut kind = control(5, "type", "Type", (0.0, 3.0, 0.0), Vis::Enumeration);
    if let Port::Control(c) = &mut kind {
        c.scale_points = scale(&[
            (0.0, "Lowpass"),
            (1.0, "Highpass"),
            (2.0, "Bandpass"),
            (3.0, "Notch"),
        ]);
    }
    let mut level = control(8, "level", "Level", (0.0, 1.0, 0.0), Vis::None);
    if let Port::Control(c) = &mut level {
        c.info.flow = Flow::Output;
    }
    let plugin = PluginDescriptor {
        uri: "builtin:filter".into(),
        name: "Multimode Filter".into(),
        ports: vec![
            Port::Audio(info(0, "in_l", "In L", Flow::Input)),
            Port::Audio(info(1, "in_r", "In R", Flow::Input)),
            control(2, "cutoff", "Cutoff", (20.0, 20000.0, 1000.0), Vis::None),
            control(3, "resonance", "Resonance", (0.0, 1.0, 0.2), Vis::None),
            control(4, "order", "Order", (1.0, 4.0, 2.0), Vis::Integer),
            kind,
            control(6, "bypass", "Bypass", (0.0, 1.0, 0.0), Vis::Toggled),
            Port::Cv(info(7, "cutoff_mod", "Cutoff Mod", Flow::Input)),
            level,
            Port::Audio(info(9, "out_l", "Out L", Flow::Output)),
            Port::Audio(info(10, "out_r", "Out R", Flow::Output)),
        ],
        has_gui: false,
    };
    let rdf = MemoryRdf::new()
        .with_plugin_value(
            RDFS_COMMENT,
            "A resonant multimode filter. Choose the response with Type; \
             Order sets the number of cascaded two-pole stages.",
        )
        .with_port_value(2, RDFS_COMMENT, "cutoff frequency")
        .with_port_value(3, RDFS_COMMENT, "Emphasis around the cutoff frequency")
        .with_port_value(4, RDFS_COMMENT, "Number of cascaded stages");
    (plugin, rdf)
}

/// Graphic equalizer without any RDF comments.
fn eq() -> (PluginDescriptor, MemoryRdf) {
    let plugin = PluginDescriptor {
        uri: "builtin:eq".into(),
        name: "Graphic EQ".into(),
        ports: vec![
            Port::Audio(info(0, "in_l", "In L", Flow::Input)),
            Port::Audio(info(1, "in_r", "In R", Flow::Input)),
            Port::Audio(info(2, "out_l", "Out L", Flow::Output)),
            Port::Audio(info(3, "out_r", "Out R", Flow::Output)),
            control(4, "low", "Low", (-12.0, 12.0, 0.0), Vis::None),
            control(5, "mid", "Mid", (-12.0, 12.0, 0.0), Vis::None),
            control(6, "high", "High", (-12.0, 12.0, 0.0), Vis::None),
            control(7, "bands", "Bands", (1.0, 31.0, 10.0), Vis::Integer),
        ],
        has_gui: false,
    };
    (plugin, MemoryRdf::new())
}

fn describe(name: &str) -> Option<(PluginDescriptor, MemoryRdf)> {
    match name {
        "amp" => Some(amp()),
        "filter" => Some(filter()),
        "eq" => Some(eq()),
        _ => None,
    }
}

/// Load a built-in plugin by source string (e.g. `"builtin:filter"`).
pub fn load(source: &str) -> anyhow::Result<LoadedPlugin> {
    let name = source.strip_prefix("builtin:").unwrap_or(source);
    let Some((descriptor, rdf)) = describe(name) else {
        anyhow::bail!(
            "Unknown built-in plugin: {name:?}\n\
             Available built-ins: {}\n\
             Usage: builtin:filter",
            NAMES.join(", ")
        );
    };
    log::info!("Loaded built-in plugin: {}", descriptor.name);
    Ok(LoadedPlugin {
        descriptor: Arc::new(descriptor),
        metadata: Metadata::Memory(rdf),
    })
}

/// Return enumeration info for all built-in plugins.
pub fn enumerate_plugins() -> Vec<PluginInfo> {
    NAMES
        .iter()
        .filter_map(|name| describe(name))
        .map(|(p, _)| PluginInfo {
            control_inputs: p.control_inputs().count(),
            name: p.name,
            id: p.uri,
            has_gui: p.has_gui,
            path: "(built-in)".into(),
        })
        .collect()
}
