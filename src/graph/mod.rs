//! Host graph seam.
//!
//! The conversions in [`crate::convert`] never touch a graph. Everything
//! they need from the editor (creating and deleting nodes, reading and
//! writing node parameters, rewiring links) goes through [`NodeHost`].

mod document;
mod operator;

pub use document::{Link, Node, NodeData, NodeGraph, SocketRef};
pub use operator::Conversion;

use std::fmt;

use crate::error::Result;
use crate::types::{RangeSpec, StopSet};

/// The kinds of node the converter distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Stop-style node.
    ColorRamp,
    /// Range-style node.
    MapRange,
    /// Any other node; only relevant as a link endpoint.
    Generic,
}

impl NodeKind {
    /// Display label, also used as the base name of created nodes.
    pub fn label(&self) -> &'static str {
        match self {
            NodeKind::ColorRamp => "Color Ramp",
            NodeKind::MapRange => "Map Range",
            NodeKind::Generic => "Node",
        }
    }

    /// Input socket names, or `None` when any name is accepted.
    pub fn inputs(&self) -> Option<&'static [&'static str]> {
        match self {
            NodeKind::ColorRamp => Some(sockets::RAMP_INPUTS),
            NodeKind::MapRange => Some(sockets::RANGE_INPUTS),
            NodeKind::Generic => None,
        }
    }

    /// Output socket names, or `None` when any name is accepted.
    pub fn outputs(&self) -> Option<&'static [&'static str]> {
        match self {
            NodeKind::ColorRamp => Some(sockets::RAMP_OUTPUTS),
            NodeKind::MapRange => Some(sockets::RANGE_OUTPUTS),
            NodeKind::Generic => None,
        }
    }

    pub fn has_input(&self, name: &str) -> bool {
        self.inputs().map_or(true, |names| names.contains(&name))
    }

    pub fn has_output(&self, name: &str) -> bool {
        self.outputs().map_or(true, |names| names.contains(&name))
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Socket names of the two mapping nodes.
pub mod sockets {
    pub const FAC: &str = "Fac";
    pub const COLOR: &str = "Color";
    pub const ALPHA: &str = "Alpha";

    pub const VALUE: &str = "Value";
    pub const FROM_MIN: &str = "From Min";
    pub const FROM_MAX: &str = "From Max";
    pub const TO_MIN: &str = "To Min";
    pub const TO_MAX: &str = "To Max";
    pub const STEPS: &str = "Steps";
    pub const RESULT: &str = "Result";

    pub(super) const RAMP_INPUTS: &[&str] = &[FAC];
    pub(super) const RAMP_OUTPUTS: &[&str] = &[COLOR, ALPHA];
    pub(super) const RANGE_INPUTS: &[&str] = &[VALUE, FROM_MIN, FROM_MAX, TO_MIN, TO_MAX, STEPS];
    pub(super) const RANGE_OUTPUTS: &[&str] = &[RESULT];
}

/// Operations a node editor must expose to run a conversion.
pub trait NodeHost {
    /// Handle identifying a node in the host graph.
    type Handle: Clone + fmt::Debug;

    /// The node the user has selected/focused.
    fn active_node(&self) -> Option<Self::Handle>;

    fn node_kind(&self, node: &Self::Handle) -> Result<NodeKind>;

    /// Instantiate a node of the given kind with default parameters.
    fn create_node(&mut self, kind: NodeKind) -> Self::Handle;

    /// Remove a node together with all links touching it.
    fn delete_node(&mut self, node: &Self::Handle) -> Result<()>;

    fn location(&self, node: &Self::Handle) -> Result<[f32; 2]>;

    fn set_location(&mut self, node: &Self::Handle, location: [f32; 2]) -> Result<()>;

    fn read_stop_set(&self, node: &Self::Handle) -> Result<StopSet>;

    fn write_stop_set(&mut self, node: &Self::Handle, stops: StopSet) -> Result<()>;

    fn read_range_spec(&self, node: &Self::Handle) -> Result<RangeSpec>;

    fn write_range_spec(&mut self, node: &Self::Handle, range: RangeSpec) -> Result<()>;

    /// Connect every source feeding `src.src_socket` to `dst.dst_socket`.
    ///
    /// Returns the number of links created.
    fn relink_inputs(
        &mut self,
        src: &Self::Handle,
        dst: &Self::Handle,
        src_socket: &str,
        dst_socket: &str,
    ) -> Result<usize>;

    /// Connect `dst.dst_socket` to every consumer of `src.src_socket`.
    ///
    /// Returns the number of links created.
    fn relink_outputs(
        &mut self,
        src: &Self::Handle,
        dst: &Self::Handle,
        src_socket: &str,
        dst_socket: &str,
    ) -> Result<usize>;

    /// Deselect everything, then select `node` and make it active.
    fn select_only(&mut self, node: &Self::Handle) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_sockets() {
        assert!(NodeKind::ColorRamp.has_input("Fac"));
        assert!(!NodeKind::ColorRamp.has_input("Value"));
        assert!(NodeKind::ColorRamp.has_output("Alpha"));
        assert!(NodeKind::MapRange.has_input("Steps"));
        assert!(!NodeKind::MapRange.has_output("Color"));
    }

    #[test]
    fn test_generic_accepts_anything() {
        assert!(NodeKind::Generic.has_input("Whatever"));
        assert!(NodeKind::Generic.has_output("BSDF"));
    }
}
