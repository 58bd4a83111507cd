//! Graph view of a diagram.
//!
//! Wraps a validated [`Diagram`] in a `petgraph` directed graph so layout
//! engines can walk predecessors and successors. Node indices follow the
//! diagram's insertion order.

use indexmap::IndexMap;
use log::trace;
use petgraph::{
    Direction,
    graph::{DiGraph, NodeIndex},
};

use tessera_core::semantic::{Diagram, DiagramEdge, DiagramNode, NodeId};

/// Directed graph of the nodes and edges of one diagram.
#[derive(Debug)]
pub struct DiagramGraph<'a> {
    graph: DiGraph<&'a DiagramNode, &'a DiagramEdge>,
    node_ids: IndexMap<&'a NodeId, NodeIndex>,
    diagram: &'a Diagram,
}

impl<'a> DiagramGraph<'a> {
    /// Builds the graph of `diagram`.
    ///
    /// Edge endpoints are resolved by id; a built [`Diagram`] guarantees
    /// every endpoint exists.
    pub fn from_diagram(diagram: &'a Diagram) -> Self {
        let mut graph = DiGraph::with_capacity(diagram.nodes().len(), diagram.edges().len());
        let mut node_ids = IndexMap::with_capacity(diagram.nodes().len());

        for node in diagram.nodes() {
            let idx = graph.add_node(node);
            node_ids.insert(node.id(), idx);
        }

        for edge in diagram.edges() {
            if let (Some(&source), Some(&target)) =
                (node_ids.get(edge.from()), node_ids.get(edge.to()))
            {
                graph.add_edge(source, target, edge);
            }
        }

        trace!(
            nodes = graph.node_count(),
            edges = graph.edge_count();
            "Diagram graph built"
        );

        Self {
            graph,
            node_ids,
            diagram,
        }
    }

    pub fn diagram(&self) -> &'a Diagram {
        self.diagram
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Node indices in insertion order.
    pub fn node_indices(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.node_ids.values().copied()
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &'a DiagramNode> + '_ {
        self.node_indices().map(|idx| self.graph[idx])
    }

    pub fn node(&self, idx: NodeIndex) -> &'a DiagramNode {
        self.graph[idx]
    }

    pub fn index_of(&self, id: &NodeId) -> Option<NodeIndex> {
        self.node_ids.get(id).copied()
    }

    /// Nodes with an edge into `idx`.
    pub fn predecessors(&self, idx: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.neighbors_directed(idx, Direction::Incoming)
    }

    /// Edges in declaration order with their endpoint indices.
    pub fn edges(&self) -> impl Iterator<Item = (NodeIndex, NodeIndex, &'a DiagramEdge)> + '_ {
        self.graph
            .edge_indices()
            .filter_map(|idx| {
                let (source, target) = self.graph.edge_endpoints(idx)?;
                Some((source, target, self.graph[idx]))
            })
    }
}

#[cfg(test)]
mod tests {
    use tessera_core::semantic::DiagramBuilder;

    use super::*;

    #[test]
    fn test_graph_from_diagram() {
        let diagram = DiagramBuilder::default()
            .node("a", "A")
            .node("b", "B")
            .node("c", "C")
            .edge("a", "c", None)
            .edge("b", "c", Some("feeds"))
            .build()
            .unwrap();
        let graph = DiagramGraph::from_diagram(&diagram);

        assert_eq!(graph.node_count(), 3);
        let ids: Vec<_> = graph.nodes().map(|n| n.id().as_str()).collect();
        assert_eq!(ids, ["a", "b", "c"]);

        let c = graph.index_of(&NodeId::from("c")).unwrap();
        let mut preds: Vec<_> = graph
            .predecessors(c)
            .map(|idx| graph.node(idx).id().as_str())
            .collect();
        preds.sort_unstable();
        assert_eq!(preds, ["a", "b"]);

        let edges: Vec<_> = graph.edges().collect();
        assert_eq!(edges.len(), 2);
        assert_eq!(edges[1].2.label(), Some("feeds"));
    }

    #[test]
    fn test_empty_graph() {
        let diagram = DiagramBuilder::default().build().unwrap();
        let graph = DiagramGraph::from_diagram(&diagram);
        assert!(graph.is_empty());
        assert_eq!(graph.edges().count(), 0);
    }
}
