//! In-memory node graph loaded from a YAML document.
//!
//! ```yaml
//! active: Ramp
//! nodes:
//!   - name: Noise
//!     location: [-200, 0]
//!     node: { kind: generic }
//!   - name: Ramp
//!     node:
//!       kind: color_ramp
//!       interpolation: LINEAR
//!       stops:
//!         - { position: 0.0, color: "#000000" }
//!         - { position: 1.0, color: [1, 1, 1, 1] }
//! links:
//!   - { from: "Noise:Fac", to: "Ramp:Fac" }
//! ```

use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{NodeHost, NodeKind};
use crate::error::{ConvertError, Result};
use crate::types::{RangeSpec, StopSet};

/// Parameters carried by a node, tagged by kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NodeData {
    ColorRamp(StopSet),
    MapRange(RangeSpec),
    Generic,
}

impl NodeData {
    pub fn kind(&self) -> NodeKind {
        match self {
            NodeData::ColorRamp(_) => NodeKind::ColorRamp,
            NodeData::MapRange(_) => NodeKind::MapRange,
            NodeData::Generic => NodeKind::Generic,
        }
    }

    /// Default parameters for a freshly created node.
    fn for_kind(kind: NodeKind) -> Self {
        match kind {
            NodeKind::ColorRamp => NodeData::ColorRamp(StopSet::default()),
            NodeKind::MapRange => NodeData::MapRange(RangeSpec::default()),
            NodeKind::Generic => NodeData::Generic,
        }
    }
}

/// A named node in the graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub name: String,
    #[serde(default)]
    pub location: [f32; 2],
    #[serde(default, skip_serializing_if = "is_false")]
    pub selected: bool,
    pub node: NodeData,
}

fn is_false(b: &bool) -> bool {
    !*b
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        self.node.kind()
    }
}

/// One end of a link, written `node:socket` in documents.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SocketRef {
    pub node: String,
    pub socket: String,
}

impl SocketRef {
    pub fn new(node: impl Into<String>, socket: impl Into<String>) -> Self {
        Self {
            node: node.into(),
            socket: socket.into(),
        }
    }

    fn is(&self, node: &str, socket: &str) -> bool {
        self.node == node && self.socket == socket
    }
}

impl TryFrom<String> for SocketRef {
    type Error = ConvertError;

    fn try_from(s: String) -> Result<Self> {
        match s.rsplit_once(':') {
            Some((node, socket)) if !node.is_empty() && !socket.is_empty() => {
                Ok(SocketRef::new(node, socket))
            }
            _ => Err(ConvertError::Parse {
                message: format!("Invalid socket reference: {}", s),
                help: Some("Write links as \"Node Name:Socket\"".to_string()),
            }),
        }
    }
}

impl From<SocketRef> for String {
    fn from(socket: SocketRef) -> Self {
        socket.to_string()
    }
}

impl fmt::Display for SocketRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.node, self.socket)
    }
}

/// A directed link from an output socket to an input socket.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Link {
    pub from: SocketRef,
    pub to: SocketRef,
}

/// A node graph document; the reference [`NodeHost`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeGraph {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    active: Option<String>,
    #[serde(default)]
    nodes: Vec<Node>,
    #[serde(default)]
    links: Vec<Link>,
}

impl NodeGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load and validate a graph document.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ConvertError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read graph: {}", e),
        })?;

        Self::parse(&content)
    }

    /// Parse and validate a graph document from YAML.
    pub fn parse(content: &str) -> Result<Self> {
        let graph: NodeGraph = serde_yaml::from_str(content).map_err(|e| ConvertError::Parse {
            message: format!("Invalid graph document: {}", e),
            help: Some("Check the document's YAML syntax".to_string()),
        })?;
        graph.validate()?;
        Ok(graph)
    }

    /// Write the document as YAML.
    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_yaml()?).map_err(|e| ConvertError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to write graph: {}", e),
        })
    }

    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| ConvertError::Parse {
            message: format!("Failed to serialize graph: {}", e),
            help: None,
        })
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| ConvertError::Parse {
            message: format!("Failed to serialize graph: {}", e),
            help: None,
        })
    }

    /// Add a node, returning an error if the name is taken.
    pub fn add_node(&mut self, name: impl Into<String>, data: NodeData) -> Result<&mut Node> {
        let name = name.into();
        if self.find(&name).is_some() {
            return Err(ConvertError::graph(format!("Duplicate node name: {}", name)));
        }
        self.nodes.push(Node {
            name,
            location: [0.0, 0.0],
            selected: false,
            node: data,
        });
        let idx = self.nodes.len() - 1;
        Ok(&mut self.nodes[idx])
    }

    /// Connect an output to an input, replacing any link into that input.
    pub fn connect(&mut self, from: SocketRef, to: SocketRef) -> Result<()> {
        self.check_output(&from)?;
        self.check_input(&to)?;
        self.links.retain(|l| l.to != to);
        self.links.push(Link { from, to });
        Ok(())
    }

    pub fn find(&self, name: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.name == name)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    pub fn links(&self) -> impl Iterator<Item = &Link> {
        self.links.iter()
    }

    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn set_active(&mut self, name: &str) -> Result<()> {
        self.node(name)?;
        self.active = Some(name.to_string());
        Ok(())
    }

    /// Check names, links and the active node for consistency.
    pub fn validate(&self) -> Result<()> {
        let mut names = HashSet::new();
        for node in &self.nodes {
            if !names.insert(node.name.as_str()) {
                return Err(invalid(format!("Duplicate node name: {}", node.name)));
            }
        }

        if let Some(active) = &self.active {
            if !names.contains(active.as_str()) {
                return Err(invalid(format!("Active node {} does not exist", active)));
            }
        }

        let mut inputs = HashSet::new();
        for link in &self.links {
            self.check_output(&link.from)
                .and_then(|_| self.check_input(&link.to))
                .map_err(|e| match e {
                    ConvertError::Graph { message, .. } => invalid(message),
                    other => other,
                })?;
            if !inputs.insert(&link.to) {
                return Err(invalid(format!("Input {} has more than one link", link.to)));
            }
        }

        Ok(())
    }

    fn node(&self, name: &str) -> Result<&Node> {
        self.find(name)
            .ok_or_else(|| ConvertError::graph(format!("No node named {}", name)))
    }

    fn node_mut(&mut self, name: &str) -> Result<&mut Node> {
        self.nodes
            .iter_mut()
            .find(|n| n.name == name)
            .ok_or_else(|| ConvertError::graph(format!("No node named {}", name)))
    }

    fn check_input(&self, socket: &SocketRef) -> Result<()> {
        let kind = self.node(&socket.node)?.kind();
        if kind.has_input(&socket.socket) {
            Ok(())
        } else {
            Err(ConvertError::graph(format!("{} node {} has no input {}", kind, socket.node, socket.socket)))
        }
    }

    fn check_output(&self, socket: &SocketRef) -> Result<()> {
        let kind = self.node(&socket.node)?.kind();
        if kind.has_output(&socket.socket) {
            Ok(())
        } else {
            Err(ConvertError::graph(format!("{} node {} has no output {}", kind, socket.node, socket.socket)))
        }
    }

    /// `base`, or `base.001`, `base.002`... when taken.
    fn unique_name(&self, base: &str) -> String {
        if self.find(base).is_none() {
            return base.to_string();
        }
        (1..)
            .map(|i| format!("{}.{:03}", base, i))
            .find(|name| self.find(name).is_none())
            .unwrap_or_else(|| base.to_string())
    }
}

fn invalid(message: String) -> ConvertError {
    ConvertError::Parse {
        message,
        help: Some("Links are written \"Node Name:Socket\" and must name existing nodes".to_string()),
    }
}

impl NodeHost for NodeGraph {
    type Handle = String;

    fn active_node(&self) -> Option<String> {
        self.active.clone()
    }

    fn node_kind(&self, node: &String) -> Result<NodeKind> {
        Ok(self.node(node)?.kind())
    }

    fn create_node(&mut self, kind: NodeKind) -> String {
        let name = self.unique_name(kind.label());
        self.nodes.push(Node {
            name: name.clone(),
            location: [0.0, 0.0],
            selected: false,
            node: NodeData::for_kind(kind),
        });
        name
    }

    fn delete_node(&mut self, node: &String) -> Result<()> {
        self.node(node)?;
        self.nodes.retain(|n| &n.name != node);
        self.links.retain(|l| &l.from.node != node && &l.to.node != node);
        if self.active.as_ref() == Some(node) {
            self.active = None;
        }
        Ok(())
    }

    fn location(&self, node: &String) -> Result<[f32; 2]> {
        Ok(self.node(node)?.location)
    }

    fn set_location(&mut self, node: &String, location: [f32; 2]) -> Result<()> {
        self.node_mut(node)?.location = location;
        Ok(())
    }

    fn read_stop_set(&self, node: &String) -> Result<StopSet> {
        match &self.node(node)?.node {
            NodeData::ColorRamp(stops) => Ok(stops.clone()),
            other => Err(wrong_kind(node, NodeKind::ColorRamp, other.kind())),
        }
    }

    fn write_stop_set(&mut self, node: &String, stops: StopSet) -> Result<()> {
        match &mut self.node_mut(node)?.node {
            NodeData::ColorRamp(existing) => {
                *existing = stops;
                Ok(())
            }
            other => Err(wrong_kind(node, NodeKind::ColorRamp, other.kind())),
        }
    }

    fn read_range_spec(&self, node: &String) -> Result<RangeSpec> {
        match &self.node(node)?.node {
            NodeData::MapRange(range) => Ok(range.clone()),
            other => Err(wrong_kind(node, NodeKind::MapRange, other.kind())),
        }
    }

    fn write_range_spec(&mut self, node: &String, range: RangeSpec) -> Result<()> {
        match &mut self.node_mut(node)?.node {
            NodeData::MapRange(existing) => {
                *existing = range;
                Ok(())
            }
            other => Err(wrong_kind(node, NodeKind::MapRange, other.kind())),
        }
    }

    fn relink_inputs(
        &mut self,
        src: &String,
        dst: &String,
        src_socket: &str,
        dst_socket: &str,
    ) -> Result<usize> {
        self.check_input(&SocketRef::new(src.as_str(), src_socket))?;
        let target = SocketRef::new(dst.as_str(), dst_socket);

        let sources: Vec<SocketRef> = self
            .links
            .iter()
            .filter(|l| l.to.is(src, src_socket))
            .map(|l| l.from.clone())
            .collect();

        for from in &sources {
            self.connect(from.clone(), target.clone())?;
        }
        Ok(sources.len())
    }

    fn relink_outputs(
        &mut self,
        src: &String,
        dst: &String,
        src_socket: &str,
        dst_socket: &str,
    ) -> Result<usize> {
        self.check_output(&SocketRef::new(src.as_str(), src_socket))?;
        let origin = SocketRef::new(dst.as_str(), dst_socket);

        let consumers: Vec<SocketRef> = self
            .links
            .iter()
            .filter(|l| l.from.is(src, src_socket))
            .map(|l| l.to.clone())
            .collect();

        for to in &consumers {
            self.connect(origin.clone(), to.clone())?;
        }
        Ok(consumers.len())
    }

    fn select_only(&mut self, node: &String) -> Result<()> {
        self.node(node)?;
        for n in &mut self.nodes {
            n.selected = &n.name == node;
        }
        self.active = Some(node.clone());
        Ok(())
    }
}

fn wrong_kind(name: &str, expected: NodeKind, actual: NodeKind) -> ConvertError {
    ConvertError::graph(format!("{} is a {} node, not a {} node", name, actual, expected))
}
