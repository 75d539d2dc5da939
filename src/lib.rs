//! mapconv - Color Ramp / Map Range node conversion
//!
//! Converts between the two numeric-mapping node types of a node editor,
//! keeping their behaviour as close as each representation allows. The
//! conversions themselves are pure functions in [`convert`]; the editor is
//! reached through the [`graph::NodeHost`] trait.

pub mod cli;
pub mod convert;
pub mod error;
pub mod graph;
pub mod output;
pub mod types;

pub use convert::{range_to_stops, stops_to_range, Reporter, Warning, WarningCode, WarningLog};
pub use error::{ConvertError, Result};
pub use graph::{Conversion, Link, Node, NodeData, NodeGraph, NodeHost, NodeKind, SocketRef};
pub use types::{ColorStop, Colour, RampInterpolation, RangeInterpolation, RangeSpec, StopSet};
