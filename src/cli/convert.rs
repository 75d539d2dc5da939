//! Convert command implementation.
//!
//! Loads a graph document, runs one convert operator on a node and writes
//! the document back.

use std::path::PathBuf;

use clap::{Args, ValueEnum};

use crate::convert::WarningLog;
use crate::error::{ConvertError, Result};
use crate::graph::{Conversion, NodeGraph, NodeHost};
use crate::output::{display_path, plural, Printer};

/// Node type to convert to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Target {
    MapRange,
    ColorRamp,
}

impl From<Target> for Conversion {
    fn from(target: Target) -> Self {
        match target {
            Target::MapRange => Conversion::ToMapRange,
            Target::ColorRamp => Conversion::ToColorRamp,
        }
    }
}

/// Convert a node in a graph document to its counterpart type
#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Graph document (YAML)
    #[arg(required = true)]
    pub file: PathBuf,

    /// Node to convert (default: the document's active node)
    #[arg(long)]
    pub node: Option<String>,

    /// Node type to convert to (default: the counterpart of the node's type)
    #[arg(long, value_enum)]
    pub to: Option<Target>,

    /// Write the converted document here instead of in place
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Fail without writing if the conversion raises any warning
    #[arg(long)]
    pub deny_warnings: bool,
}

pub fn run(args: ConvertArgs, printer: &Printer) -> Result<()> {
    let mut graph = NodeGraph::load(&args.file)?;

    if let Some(name) = &args.node {
        graph.set_active(name)?;
    }

    let source = graph.active_node().ok_or_else(|| ConvertError::Graph {
        message: "The document has no active node".to_string(),
        help: Some("Pass --node NAME".to_string()),
    })?;
    let conversion = resolve_conversion(&graph, &source, args.to)?;

    printer.status(
        "Converting",
        &format!(
            "{} ({} {} {})",
            source,
            conversion.source_kind(),
            printer.dim("->"),
            conversion.target_kind()
        ),
    );

    let mut warnings = WarningLog::new();
    let target = conversion.execute(&mut graph, &mut warnings)?;

    for warning in warnings.iter() {
        printer.warning("Warning", &warning.message);
    }

    if args.deny_warnings && !warnings.is_empty() {
        printer.error("Refusing", "to write a lossy conversion");
        return Err(ConvertError::Conversion {
            message: format!(
                "Conversion of {} raised {}",
                source,
                plural(warnings.len(), "warning", "warnings")
            ),
            help: Some("Drop --deny-warnings to accept the conversion".to_string()),
        });
    }

    let output = args.output.as_ref().unwrap_or(&args.file);
    graph.save(output)?;

    printer.status(
        "Finished",
        &format!("{} {} {} in {}", source, printer.dim("->"), target, display_path(output)),
    );

    Ok(())
}

/// Pick the conversion for `node`: the requested one, or the counterpart
/// of the node's own type.
fn resolve_conversion(graph: &NodeGraph, node: &String, to: Option<Target>) -> Result<Conversion> {
    if let Some(target) = to {
        return Ok(target.into());
    }

    let kind = graph.node_kind(node)?;
    Conversion::for_kind(kind).ok_or_else(|| ConvertError::Graph {
        message: format!("{} is a {} node and cannot be converted", node, kind),
        help: Some("Only Color Ramp and Map Range nodes can be converted".to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::NodeData;

    fn graph_with(data: NodeData) -> NodeGraph {
        let mut graph = NodeGraph::new();
        graph.add_node("N", data).unwrap();
        graph
    }

    #[test]
    fn test_resolve_from_kind() {
        let name = "N".to_string();
        let graph = graph_with(NodeData::ColorRamp(Default::default()));
        assert_eq!(resolve_conversion(&graph, &name, None).unwrap(), Conversion::ToMapRange);

        let graph = graph_with(NodeData::MapRange(Default::default()));
        assert_eq!(resolve_conversion(&graph, &name, None).unwrap(), Conversion::ToColorRamp);
    }

    #[test]
    fn test_resolve_explicit_target() {
        let graph = graph_with(NodeData::Generic);
        let conversion = resolve_conversion(&graph, &"N".to_string(), Some(Target::ColorRamp));
        assert_eq!(conversion.unwrap(), Conversion::ToColorRamp);
    }

    #[test]
    fn test_resolve_generic_fails() {
        let graph = graph_with(NodeData::Generic);
        assert!(resolve_conversion(&graph, &"N".to_string(), None).is_err());
    }
}
