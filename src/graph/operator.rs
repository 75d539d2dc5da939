//! The two convert operators: swap the active mapping node for its
//! counterpart, keeping location and links.

use super::{sockets, NodeData, NodeHost, NodeKind};
use crate::convert::{range_to_stops, stops_to_range, Reporter};
use crate::error::{ConvertError, Result};

/// A node conversion the user can run on the active node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Conversion {
    /// Color Ramp -> Map Range.
    ToMapRange,
    /// Map Range -> Color Ramp.
    ToColorRamp,
}

impl Conversion {
    pub const ALL: [Conversion; 2] = [Conversion::ToMapRange, Conversion::ToColorRamp];

    /// Menu label.
    pub fn label(&self) -> &'static str {
        match self {
            Conversion::ToMapRange => "Convert to Map Range Node",
            Conversion::ToColorRamp => "Convert to Color Ramp Node",
        }
    }

    pub fn source_kind(&self) -> NodeKind {
        match self {
            Conversion::ToMapRange => NodeKind::ColorRamp,
            Conversion::ToColorRamp => NodeKind::MapRange,
        }
    }

    pub fn target_kind(&self) -> NodeKind {
        match self {
            Conversion::ToMapRange => NodeKind::MapRange,
            Conversion::ToColorRamp => NodeKind::ColorRamp,
        }
    }

    /// The conversion that applies to a node of `kind`, if any.
    pub fn for_kind(kind: NodeKind) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.source_kind() == kind)
    }

    /// (source input, target input) pairs whose links are carried over.
    fn input_pairs(&self) -> &'static [(&'static str, &'static str)] {
        const TO_RANGE: &[(&str, &str)] = &[(sockets::FAC, sockets::VALUE)];
        const TO_RAMP: &[(&str, &str)] = &[(sockets::VALUE, sockets::FAC)];
        match self {
            Conversion::ToMapRange => TO_RANGE,
            Conversion::ToColorRamp => TO_RAMP,
        }
    }

    /// (source output, target output) pairs. Colour and alpha consumers
    /// both read the single range result.
    fn output_pairs(&self) -> &'static [(&'static str, &'static str)] {
        const TO_RANGE: &[(&str, &str)] = &[
            (sockets::COLOR, sockets::RESULT),
            (sockets::ALPHA, sockets::RESULT),
        ];
        const TO_RAMP: &[(&str, &str)] = &[(sockets::RESULT, sockets::COLOR)];
        match self {
            Conversion::ToMapRange => TO_RANGE,
            Conversion::ToColorRamp => TO_RAMP,
        }
    }

    /// Whether the operator can run on the host's active node.
    pub fn poll<H: NodeHost>(&self, host: &H) -> bool {
        host.active_node()
            .and_then(|node| host.node_kind(&node).ok())
            .is_some_and(|kind| kind == self.source_kind())
    }

    /// Replace the active node with a converted counterpart.
    ///
    /// The conversion runs before the graph is touched, so a conversion
    /// error leaves the host unchanged. If a host step fails after the new
    /// node exists, that node is deleted again; links the host had already
    /// moved onto it are not restored. Returns the handle of the new node.
    pub fn execute<H, R>(&self, host: &mut H, reporter: &mut R) -> Result<H::Handle>
    where
        H: NodeHost,
        R: Reporter + ?Sized,
    {
        let source = host.active_node().ok_or_else(|| ConvertError::Graph {
            message: "No active node".to_string(),
            help: Some(format!("Select a {} node first", self.source_kind())),
        })?;

        let kind = host.node_kind(&source)?;
        if kind != self.source_kind() {
            return Err(ConvertError::Graph {
                message: format!("{:?} is a {} node", source, kind),
                help: Some(format!("{} needs a {} node", self.label(), self.source_kind())),
            });
        }

        let data = match self {
            Conversion::ToMapRange => {
                NodeData::MapRange(stops_to_range(&host.read_stop_set(&source)?, reporter))
            }
            Conversion::ToColorRamp => {
                NodeData::ColorRamp(range_to_stops(&host.read_range_spec(&source)?, reporter)?)
            }
        };

        let target = host.create_node(self.target_kind());
        if let Err(err) = self.replace(host, &source, &target, data) {
            // The replace error is the one worth reporting.
            let _ = host.delete_node(&target);
            return Err(err);
        }

        host.delete_node(&source)?;
        host.select_only(&target)?;

        Ok(target)
    }

    /// Fill `target` with `data` and move `source`'s place and links onto it.
    fn replace<H: NodeHost>(
        &self,
        host: &mut H,
        source: &H::Handle,
        target: &H::Handle,
        data: NodeData,
    ) -> Result<()> {
        match data {
            NodeData::ColorRamp(stops) => host.write_stop_set(target, stops)?,
            NodeData::MapRange(range) => host.write_range_spec(target, range)?,
            NodeData::Generic => {}
        }

        let location = host.location(source)?;
        host.set_location(target, location)?;

        for (from, to) in self.input_pairs() {
            host.relink_inputs(source, target, from, to)?;
        }
        for (from, to) in self.output_pairs() {
            host.relink_outputs(source, target, from, to)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::{WarningCode, WarningLog};
    use crate::graph::NodeGraph;
    use crate::types::{RampInterpolation, RangeInterpolation, RangeSpec, StopSet};
    use pretty_assertions::assert_eq;

    const RAMP_GRAPH: &str = r##"
active: Ramp
nodes:
  - { name: Noise, node: { kind: generic } }
  - name: Ramp
    location: [120, -40]
    selected: true
    node:
      kind: color_ramp
      interpolation: B_SPLINE
      stops:
        - { position: 0.2, color: [0, 0, 0] }
        - { position: 0.8, color: [1, 1, 1] }
  - { name: Shader, node: { kind: generic }, selected: true }
  - { name: Mix, node: { kind: generic } }
links:
  - { from: "Noise:Fac", to: "Ramp:Fac" }
  - { from: "Ramp:Color", to: "Shader:Base Color" }
  - { from: "Ramp:Alpha", to: "Mix:Factor" }
"##;

    const RANGE_GRAPH: &str = r##"
active: Range
nodes:
  - { name: Noise, node: { kind: generic } }
  - name: Range
    location: [10, 10]
    node: { kind: map_range, interpolation: STEPPED, steps: 0 }
  - { name: Shader, node: { kind: generic } }
links:
  - { from: "Noise:Fac", to: "Range:Value" }
  - { from: "Range:Result", to: "Shader:Roughness" }
"##;

    fn link_strings(graph: &NodeGraph) -> Vec<String> {
        graph
            .links()
            .map(|l| format!("{} -> {}", l.from, l.to))
            .collect()
    }

    #[test]
    fn test_poll() {
        let graph = NodeGraph::parse(RAMP_GRAPH).unwrap();
        assert!(Conversion::ToMapRange.poll(&graph));
        assert!(!Conversion::ToColorRamp.poll(&graph));
        assert!(!Conversion::ToMapRange.poll(&NodeGraph::new()));
    }

    #[test]
    fn test_for_kind() {
        assert_eq!(Conversion::for_kind(NodeKind::ColorRamp), Some(Conversion::ToMapRange));
        assert_eq!(Conversion::for_kind(NodeKind::MapRange), Some(Conversion::ToColorRamp));
        assert_eq!(Conversion::for_kind(NodeKind::Generic), None);
    }

    #[test]
    fn test_ramp_to_range_rewires_graph() {
        let mut graph = NodeGraph::parse(RAMP_GRAPH).unwrap();
        let mut log = WarningLog::new();

        let target = Conversion::ToMapRange.execute(&mut graph, &mut log).unwrap();

        assert_eq!(target, "Map Range");
        assert!(graph.find("Ramp").is_none());
        assert_eq!(graph.location(&target).unwrap(), [120.0, -40.0]);
        assert_eq!(
            link_strings(&graph),
            vec![
                "Noise:Fac -> Map Range:Value",
                "Map Range:Result -> Shader:Base Color",
                "Map Range:Result -> Mix:Factor",
            ]
        );

        let range = graph.read_range_spec(&target).unwrap();
        assert_eq!(range.interpolation, RangeInterpolation::Smoothstep);
        assert_eq!((range.from_min, range.from_max), (0.2, 0.8));
        assert!(range.clamp);

        assert_eq!(log.len(), 1);
        assert!(log.contains(WarningCode::UnsupportedInterpolation));

        let selected: Vec<&str> = graph
            .nodes()
            .filter(|n| n.selected)
            .map(|n| n.name.as_str())
            .collect();
        assert_eq!(selected, vec!["Map Range"]);
        assert_eq!(graph.active(), Some("Map Range"));
        graph.validate().unwrap();
    }

    #[test]
    fn test_range_to_ramp_rewires_graph() {
        let doc = RANGE_GRAPH.replace("steps: 0", "steps: 3");
        let mut graph = NodeGraph::parse(&doc).unwrap();
        let mut log = WarningLog::new();

        let target = Conversion::ToColorRamp.execute(&mut graph, &mut log).unwrap();

        assert_eq!(target, "Color Ramp");
        assert!(log.is_empty());
        assert_eq!(
            link_strings(&graph),
            vec![
                "Noise:Fac -> Color Ramp:Fac",
                "Color Ramp:Color -> Shader:Roughness",
            ]
        );

        let stops = graph.read_stop_set(&target).unwrap();
        assert_eq!(stops.interpolation, RampInterpolation::Constant);
        assert_eq!(stops.len(), 4);
        assert_eq!(graph.location(&target).unwrap(), [10.0, 10.0]);
    }

    #[test]
    fn test_failed_conversion_leaves_graph_untouched() {
        let mut graph = NodeGraph::parse(RANGE_GRAPH).unwrap();
        let before = graph.clone();

        let err = Conversion::ToColorRamp
            .execute(&mut graph, &mut WarningLog::new())
            .unwrap_err();

        assert!(matches!(err, ConvertError::Conversion { .. }));
        assert_eq!(graph, before);
    }

    #[test]
    fn test_wrong_active_kind() {
        let mut graph = NodeGraph::parse(RAMP_GRAPH).unwrap();
        let err = Conversion::ToColorRamp
            .execute(&mut graph, &mut WarningLog::new())
            .unwrap_err();
        assert!(matches!(err, ConvertError::Graph { .. }));
        assert!(graph.find("Ramp").is_some());
    }

    #[test]
    fn test_no_active_node() {
        let mut graph = NodeGraph::new();
        assert!(Conversion::ToMapRange
            .execute(&mut graph, &mut WarningLog::new())
            .is_err());
    }

    #[test]
    fn test_closure_reporter_sees_warnings() {
        let mut graph = NodeGraph::parse(RAMP_GRAPH).unwrap();
        let mut messages = Vec::new();
        Conversion::ToMapRange
            .execute(&mut graph, &mut |w: crate::convert::Warning| messages.push(w.message))
            .unwrap();
        assert_eq!(
            messages,
            vec!["There is no equivalent Map Range interpolation mode for B_SPLINE. Using SMOOTHSTEP."]
        );
    }

    /// A graph whose `set_location` always fails.
    struct PinnedGraph(NodeGraph);

    impl NodeHost for PinnedGraph {
        type Handle = String;

        fn active_node(&self) -> Option<String> {
            self.0.active_node()
        }
        fn node_kind(&self, node: &String) -> Result<NodeKind> {
            self.0.node_kind(node)
        }
        fn create_node(&mut self, kind: NodeKind) -> String {
            self.0.create_node(kind)
        }
        fn delete_node(&mut self, node: &String) -> Result<()> {
            self.0.delete_node(node)
        }
        fn location(&self, node: &String) -> Result<[f32; 2]> {
            self.0.location(node)
        }
        fn set_location(&mut self, node: &String, _location: [f32; 2]) -> Result<()> {
            Err(ConvertError::graph(format!("{:?} is pinned", node)))
        }
        fn read_stop_set(&self, node: &String) -> Result<StopSet> {
            self.0.read_stop_set(node)
        }
        fn write_stop_set(&mut self, node: &String, stops: StopSet) -> Result<()> {
            self.0.write_stop_set(node, stops)
        }
        fn read_range_spec(&self, node: &String) -> Result<RangeSpec> {
            self.0.read_range_spec(node)
        }
        fn write_range_spec(&mut self, node: &String, range: RangeSpec) -> Result<()> {
            self.0.write_range_spec(node, range)
        }
        fn relink_inputs(&mut self, src: &String, dst: &String, from: &str, to: &str) -> Result<usize> {
            self.0.relink_inputs(src, dst, from, to)
        }
        fn relink_outputs(&mut self, src: &String, dst: &String, from: &str, to: &str) -> Result<usize> {
            self.0.relink_outputs(src, dst, from, to)
        }
        fn select_only(&mut self, node: &String) -> Result<()> {
            self.0.select_only(node)
        }
    }

    #[test]
    fn test_host_failure_removes_new_node() {
        let graph = NodeGraph::parse(RAMP_GRAPH).unwrap();
        let mut host = PinnedGraph(graph.clone());

        let err = Conversion::ToMapRange
            .execute(&mut host, &mut WarningLog::new())
            .unwrap_err();

        assert!(matches!(err, ConvertError::Graph { .. }));
        assert!(host.0.find("Map Range").is_none());
        assert_eq!(host.0, graph);
    }

    #[test]
    fn test_huge_step_count_leaves_graph_untouched() {
        let doc = RANGE_GRAPH.replace("steps: 0", "steps: 3.0e38");
        let mut graph = NodeGraph::parse(&doc).unwrap();
        let before = graph.clone();

        let err = Conversion::ToColorRamp
            .execute(&mut graph, &mut WarningLog::new())
            .unwrap_err();

        assert!(matches!(err, ConvertError::Conversion { .. }));
        assert_eq!(graph, before);
    }
}
