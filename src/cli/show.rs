//! Show command implementation.
//!
//! Prints the nodes and links of a graph document.

use std::path::PathBuf;

use clap::Args;

use crate::error::Result;
use crate::graph::{Node, NodeData, NodeGraph};
use crate::output::{plural, Printer};

/// List the nodes and links of a graph document
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Graph document (YAML)
    #[arg(required = true)]
    pub file: PathBuf,

    /// Print the document as JSON on stdout
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: ShowArgs, printer: &Printer) -> Result<()> {
    let graph = NodeGraph::load(&args.file)?;

    if args.json {
        println!("{}", graph.to_json()?);
        return Ok(());
    }

    for node in graph.nodes() {
        let marker = if graph.active() == Some(node.name.as_str()) {
            " (active)"
        } else {
            ""
        };
        printer.info(node.kind().label(), &format!("{}{}", describe_node(node), marker));
    }

    for link in graph.links() {
        printer.info("Link", &format!("{} {} {}", link.from, printer.dim("->"), link.to));
    }

    Ok(())
}

/// One-line summary of a node's parameters.
pub fn describe_node(node: &Node) -> String {
    match &node.node {
        NodeData::ColorRamp(stops) => {
            let points: Vec<String> = stops
                .stops()
                .iter()
                .map(|s| format!("{:.3} {}", s.position, s.colour))
                .collect();
            format!(
                "{}: {}, {} [{}]",
                node.name,
                stops.interpolation,
                plural(stops.len(), "stop", "stops"),
                points.join(", ")
            )
        }
        NodeData::MapRange(range) => {
            let mut line = format!(
                "{}: {}, [{:.3}, {:.3}] -> [{:.3}, {:.3}]",
                node.name,
                range.interpolation,
                range.from_min,
                range.from_max,
                range.to_min,
                range.to_max
            );
            if range.interpolation == crate::types::RangeInterpolation::Stepped {
                line.push_str(&format!(", {} steps", range.steps));
            }
            if range.clamp {
                line.push_str(", clamped");
            }
            line
        }
        NodeData::Generic => node.name.clone(),
    }
}
