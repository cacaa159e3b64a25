pub mod autodetect;
pub mod builtin;
#[cfg(feature = "lv2")]
pub mod lv2;
pub mod memory;

use std::sync::Arc;

pub const RDFS_COMMENT: &str = "http://www.w3.org/2000/01/rdf-schema#comment";

/// Position of a port in the plugin's declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PortIndex(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Input,
    Output,
}

/// How a control port asks to be displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vis {
    None,
    Integer,
    Enumeration,
    Toggled,
}

/// Fields shared by every port kind.
#[derive(Debug, Clone)]
pub struct PortInfo {
    pub index: PortIndex,
    /// LV2 symbol: stable machine identifier, unique within the plugin.
    pub symbol: String,
    pub name: String,
    pub flow: Flow,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScalePoint {
    pub value: f32,
    pub label: String,
}

#[derive(Debug, Clone)]
pub struct ControlPort {
    pub info: PortInfo,
    pub min: f32,
    pub max: f32,
    pub default: f32,
    pub vis: Vis,
    /// Sorted by value.
    pub scale_points: Vec<ScalePoint>,
}

#[derive(Debug, Clone)]
pub enum Port {
    Control(ControlPort),
    Audio(PortInfo),
    Cv(PortInfo),
    Atom(PortInfo),
}

impl Port {
    pub fn info(&self) -> &PortInfo {
        match self {
            Port::Control(c) => &c.info,
            Port::Audio(info) | Port::Cv(info) | Port::Atom(info) => info,
        }
    }

    pub fn symbol(&self) -> &str {
        &self.info().symbol
    }

    pub fn name(&self) -> &str {
        &self.info().name
    }

    #[allow(dead_code)]
    pub fn flow(&self) -> Flow {
        self.info().flow
    }

    pub fn as_control(&self) -> Option<&ControlPort> {
        match self {
            Port::Control(c) => Some(c),
            _ => None,
        }
    }
}

/// A plugin as seen by the editor: identity, ports in declaration order,
/// and whether it ships a native UI.
#[derive(Debug, Clone)]
pub struct PluginDescriptor {
    pub uri: String,
    pub name: String,
    pub ports: Vec<Port>,
    pub has_gui: bool,
}

impl PluginDescriptor {
    pub fn audio_inputs(&self) -> usize {
        self.ports
            .iter()
            .filter(|p| matches!(p, Port::Audio(i) if i.flow == Flow::Input))
            .count()
    }

    pub fn audio_outputs(&self) -> usize {
        self.ports
            .iter()
            .filter(|p| matches!(p, Port::Audio(i) if i.flow == Flow::Output))
            .count()
    }

    pub fn control_inputs(&self) -> impl Iterator<Item = &ControlPort> {
        self.ports
            .iter()
            .filter_map(Port::as_control)
            .filter(|c| c.info.flow == Flow::Input)
    }
}

/// Read access to a plugin's RDF metadata.
///
/// Lookup results are owned by the caller and released when dropped, so
/// every exit path frees them.
pub trait Rdf {
    type Node;
    type Nodes: IntoIterator<Item = Self::Node>;

    /// Intern a URI as a node usable as a predicate.
    fn uri(&self, uri: &str) -> Self::Node;
    fn plugin_value(&self, predicate: &Self::Node) -> Self::Nodes;
    fn port_value(&self, port: PortIndex, predicate: &Self::Node) -> Self::Nodes;
    fn node_as_string(&self, node: &Self::Node) -> Option<String>;
}

/// Metadata backend attached to a loaded plugin.
pub enum Metadata {
    Memory(memory::MemoryRdf),
    #[cfg(feature = "lv2")]
    Lv2(lv2::Lv2Rdf),
}

/// A plugin description together with the metadata it was read from.
pub struct LoadedPlugin {
    pub descriptor: Arc<PluginDescriptor>,
    pub metadata: Metadata,
}

/// Summary info returned by plugin enumeration.
pub struct PluginInfo {
    pub name: String,
    pub id: String,
    pub control_inputs: usize,
    pub has_gui: bool,
    pub path: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PluginType {
    #[cfg(feature = "lv2")]
    Lv2,
    Builtin,
}

#[derive(Default)]
pub struct Runtime {
    #[cfg(feature = "lv2")]
    pub lv2: Option<lv2::Lv2Runtime>,
}

impl Runtime {
    #[cfg(feature = "lv2")]
    pub fn with_lv2() -> Self {
        Self {
            lv2: Some(lv2::Lv2Runtime::new()),
        }
    }
}

/// Load a plugin description from the given source.
pub fn load(source: &str, _runtime: &Runtime) -> anyhow::Result<LoadedPlugin> {
    let (plugin_type, resolved) =
        autodetect::resolve(source, crate::config::extra_lv2_paths())?;
    match plugin_type {
        #[cfg(feature = "lv2")]
        PluginType::Lv2 => lv2::load(&resolved, _runtime.lv2.as_ref()),
        PluginType::Builtin => builtin::load(&resolved),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(index: usize, symbol: &str, flow: Flow) -> PortInfo {
        PortInfo {
            index: PortIndex(index),
            symbol: symbol.into(),
            name: symbol.to_uppercase(),
            flow,
        }
    }

    #[test]
    fn port_accessors_reach_shared_info() {
        let port = Port::Control(ControlPort {
            info: info(2, "gain", Flow::Input),
            min: 0.0,
            max: 1.0,
            default: 0.5,
            vis: Vis::None,
            scale_points: Vec::new(),
        });
        assert_eq!(port.symbol(), "gain");
        assert_eq!(port.name(), "GAIN");
        assert_eq!(port.flow(), Flow::Input);
        assert_eq!(port.info().index, PortIndex(2));
        assert!(port.as_control().is_some());
        assert!(Port::Cv(info(0, "mod", Flow::Input)).as_control().is_none());
    }

    #[test]
    fn descriptor_counts_audio_ports() {
        let plugin = PluginDescriptor {
            uri: "urn:test".into(),
            name: "Test".into(),
            ports: vec![
                Port::Audio(info(0, "in", Flow::Input)),
                Port::Audio(info(1, "out_l", Flow::Output)),
                Port::Audio(info(2, "out_r", Flow::Output)),
                Port::Atom(info(3, "events", Flow::Input)),
            ],
            has_gui: false,
        };
        assert_eq!(plugin.audio_inputs(), 1);
        assert_eq!(plugin.audio_outputs(), 2);
        assert_eq!(plugin.control_inputs().count(), 0);
    }
}
