use std::sync::Arc;

use lilv::node::Node;

use super::{
    ControlPort, Flow, LoadedPlugin, Metadata, PluginDescriptor, PluginInfo, Port, PortIndex,
    PortInfo, Rdf, ScalePoint, Vis,
};

const LV2_CORE: &str = "http://lv2plug.in/ns/lv2core#";
const LV2_ATOM_PORT: &str = "http://lv2plug.in/ns/ext/atom#AtomPort";
const LV2_EVENT_PORT: &str = "http://lv2plug.in/ns/ext/event#EventPort";

/// Native UI classes we recognise when deciding whether a plugin "has a GUI".
const UI_CLASSES: &[&str] = &[
    "http://lv2plug.in/ns/extensions/ui#Gtk3UI",
    "http://lv2plug.in/ns/extensions/ui#GtkUI",
    "http://lv2plug.in/ns/extensions/ui#X11UI",
    "http://lv2plug.in/ns/extensions/ui#Qt5UI",
];

/// Shared LV2 world, created once and reused for all URI-based loads.
/// Avoids re-scanning the entire LV2 plugin directory for each plugin.
pub struct Lv2Runtime {
    world: Arc<livi::World>,
}

impl Lv2Runtime {
    pub fn new() -> Self {
        Lv2Runtime {
            world: Arc::new(livi::World::new()),
        }
    }
}

/// RDF metadata of one LV2 plugin, read through lilv.
pub struct Lv2Rdf {
    world: Arc<livi::World>,
    plugin: livi::Plugin,
}

impl Rdf for Lv2Rdf {
    type Node = Node;
    // Only the first value is read. lilv hands it back as an owned node,
    // freed when it is dropped.
    type Nodes = Option<Node>;

    fn uri(&self, uri: &str) -> Node {
        self.world.raw().new_uri(uri)
    }

    fn plugin_value(&self, predicate: &Node) -> Option<Node> {
        let plugin = self.plugin.raw();
        // Plugin data is loaded lazily; verifying the plugin loads it.
        let _ = plugin.verify();
        self.world.raw().get(Some(&plugin.uri()), Some(predicate), None)
    }

    fn port_value(&self, port: PortIndex, predicate: &Node) -> Option<Node> {
        self.plugin.raw().port_by_index(port.0)?.get(predicate)
    }

    fn node_as_string(&self, node: &Node) -> Option<String> {
        node.as_str().map(String::from)
    }
}

/// Port symbol, or `port_<index>` when lilv has no usable one.
fn port_symbol(symbol: Option<&str>, index: usize) -> String {
    match symbol {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => format!("port_{index}"),
    }
}

/// Turn lilv's unspecified range value (NaN) into a fallback.
fn or_default(value: f32, fallback: f32) -> f32 {
    if value.is_nan() { fallback } else { value }
}

fn describe(world: &lilv::World, plugin: &lilv::plugin::Plugin, uri: &str, name: &str) -> PluginDescriptor {
    let lv2 = |term: &str| world.new_uri(&format!("{LV2_CORE}{term}"));
    let output_class = lv2("OutputPort");
    let audio_class = lv2("AudioPort");
    let control_class = lv2("ControlPort");
    let cv_class = lv2("CVPort");
    let atom_class = world.new_uri(LV2_ATOM_PORT);
    let event_class = world.new_uri(LV2_EVENT_PORT);
    let toggled = lv2("toggled");
    let enumeration = lv2("enumeration");
    let integer = lv2("integer");

    let mut ports = Vec::new();
    let port_ranges = plugin.port_ranges_float();

    for (i, port_range) in port_ranges.iter().enumerate() {
        let port = match plugin.port_by_index(i) {
            Some(p) => p,
            None => continue,
        };

        let symbol = port_symbol(port.symbol().as_ref().and_then(Node::as_str), i);
        let port_name = port
            .name()
            .and_then(|n| n.as_str().map(String::from))
            .unwrap_or_else(|| symbol.clone());
        let flow = if port.is_a(&output_class) {
            Flow::Output
        } else {
            Flow::Input
        };
        let info = PortInfo {
            index: PortIndex(i),
            symbol,
            name: port_name,
            flow,
        };

        let entry = if port.is_a(&control_class) {
            let vis = if port.has_property(&toggled) {
                Vis::Toggled
            } else if port.has_property(&enumeration) {
                Vis::Enumeration
            } else if port.has_property(&integer) {
                Vis::Integer
            } else {
                Vis::None
            };

            let min = or_default(port_range.min, 0.0);
            let max = or_default(port_range.max, 1.0);
            let (min, max) = if min <= max { (min, max) } else { (max, min) };
            let default = or_default(port_range.default, min).clamp(min, max);

            let mut scale_points: Vec<ScalePoint> = port
                .scale_points()
                .iter()
                .filter_map(|sp| {
                    Some(ScalePoint {
                        value: sp.value().as_float()?,
                        label: sp.label().as_str()?.to_string(),
                    })
                })
                .collect();
            scale_points.sort_by(|a, b| a.value.total_cmp(&b.value));
            if vis == Vis::Enumeration && scale_points.is_empty() {
                log::debug!("{uri}: enumeration port '{}' has no scale points", info.symbol);
            }

            Port::Control(ControlPort {
                info,
                min,
                max,
                default,
                vis,
                scale_points,
            })
        } else if port.is_a(&audio_class) {
            Port::Audio(info)
        } else if port.is_a(&cv_class) {
            Port::Cv(info)
        } else if port.is_a(&atom_class) || port.is_a(&event_class) {
            Port::Atom(info)
        } else {
            log::debug!("{uri}: skipping port {i} of unknown type");
            continue;
        };
        ports.push(entry);
    }

    let ui_classes: Vec<Node> = UI_CLASSES.iter().map(|c| world.new_uri(c)).collect();
    let has_gui = plugin
        .uis()
        .map(|uis| {
            uis.iter()
                .any(|ui| ui_classes.iter().any(|cls| ui.is_a(cls)))
        })
        .unwrap_or(false);

    PluginDescriptor {
        uri: uri.to_string(),
        name: name.to_string(),
        ports,
        has_gui,
    }
}

pub fn load(source: &str, runtime: Option<&Lv2Runtime>) -> anyhow::Result<LoadedPlugin> {
    let (world, plugin) = if let Some(uri) = source.strip_prefix("lv2:") {
        // Load by URI, reusing the shared runtime if available
        let world = match runtime {
            Some(rt) => rt.world.clone(),
            None => Arc::new(livi::World::new()),
        };
        let plugin = world
            .plugin_by_uri(uri)
            .ok_or_else(|| anyhow::anyhow!("LV2 plugin not found for URI: {uri}\nRun `lv2view enumerate plugins` to list available plugins."))?;
        (world, plugin)
    } else {
        // Load by bundle path; only scans one bundle
        let bundle_uri = if source.starts_with("file://") {
            source.to_string()
        } else {
            let abs = std::path::Path::new(source)
                .canonicalize()
                .map_err(|e| anyhow::anyhow!("Cannot resolve path {source}: {e}"))?;
            format!("file://{}/", abs.display())
        };
        let world = livi::World::with_load_bundle(&bundle_uri);
        let plugin = world
            .iter_plugins()
            .next()
            .ok_or_else(|| anyhow::anyhow!("No plugin found in bundle: {bundle_uri}"))?;
        (Arc::new(world), plugin)
    };

    let descriptor = describe(world.raw(), plugin.raw(), &plugin.uri(), &plugin.name());
    log::info!(
        "Loaded LV2 plugin: {} (audio_in={}, audio_out={}, control_in={}, gui={})",
        descriptor.name,
        descriptor.audio_inputs(),
        descriptor.audio_outputs(),
        descriptor.control_inputs().count(),
        descriptor.has_gui,
    );

    Ok(LoadedPlugin {
        descriptor: Arc::new(descriptor),
        metadata: Metadata::Lv2(Lv2Rdf { world, plugin }),
    })
}

/// Enumerate all LV2 plugins found on the system.
pub fn enumerate_plugins() -> Vec<PluginInfo> {
    let world = livi::World::new();

    world
        .iter_plugins()
        .map(|p| {
            let descriptor = describe(world.raw(), p.raw(), &p.uri(), &p.name());
            let path = p
                .raw()
                .bundle_uri()
                .as_uri()
                .unwrap_or("")
                .strip_prefix("file://")
                .unwrap_or("")
                .to_string();
            PluginInfo {
                control_inputs: descriptor.control_inputs().count(),
                name: descriptor.name,
                id: descriptor.uri,
                has_gui: descriptor.has_gui,
                path,
            }
        })
        .collect()
}
