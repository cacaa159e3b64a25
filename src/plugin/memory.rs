use std::collections::HashMap;

use super::{PortIndex, Rdf};

/// RDF metadata held in memory, keyed by subject and predicate URI.
///
/// Backs the built-in plugins and stands in for the LV2 world in tests.
/// Values keep their insertion order so "first node" is well defined.
#[derive(Default, Clone, Debug)]
pub struct MemoryRdf {
    plugin: HashMap<String, Vec<String>>,
    ports: HashMap<(PortIndex, String), Vec<String>>,
}

impl MemoryRdf {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_plugin_value(mut self, predicate: &str, value: &str) -> Self {
        self.plugin
            .entry(predicate.to_string())
            .or_default()
            .push(value.to_string());
        self
    }

    pub fn with_port_value(mut self, port: usize, predicate: &str, value: &str) -> Self {
        self.ports
            .entry((PortIndex(port), predicate.to_string()))
            .or_default()
            .push(value.to_string());
        self
    }
}

impl Rdf for MemoryRdf {
    type Node = String;
    type Nodes = Vec<String>;

    fn uri(&self, uri: &str) -> String {
        uri.to_string()
    }

    fn plugin_value(&self, predicate: &String) -> Vec<String> {
        self.plugin.get(predicate).cloned().unwrap_or_default()
    }

    fn port_value(&self, port: PortIndex, predicate: &String) -> Vec<String> {
        self.ports
            .get(&(port, predicate.clone()))
            .cloned()
            .unwrap_or_default()
    }

    fn node_as_string(&self, node: &String) -> Option<String> {
        Some(node.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugin::RDFS_COMMENT;

    #[test]
    fn values_keep_insertion_order() {
        let rdf = MemoryRdf::new()
            .with_plugin_value(RDFS_COMMENT, "A")
            .with_plugin_value(RDFS_COMMENT, "B");
        let pred = rdf.uri(RDFS_COMMENT);
        assert_eq!(rdf.plugin_value(&pred), vec!["A", "B"]);
    }

    #[test]
    fn port_values_are_per_port() {
        let rdf = MemoryRdf::new().with_port_value(1, RDFS_COMMENT, "cutoff frequency");
        let pred = rdf.uri(RDFS_COMMENT);
        assert_eq!(rdf.port_value(PortIndex(1), &pred), vec!["cutoff frequency"]);
        assert!(rdf.port_value(PortIndex(0), &pred).is_empty());
    }

    #[test]
    fn unknown_predicate_is_empty() {
        let rdf = MemoryRdf::new();
        let pred = rdf.uri("http://www.w3.org/2000/01/rdf-schema#label");
        assert!(rdf.plugin_value(&pred).is_empty());
    }
}
