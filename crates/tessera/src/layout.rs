//! Diagram layout.
//!
//! A layout assigns every node a center point and a box size, and records
//! how edges between them should be routed. Positions come from one of the
//! engines in [`engines`], selected per diagram through [`EngineBuilder`].

pub mod engines;

pub use engines::{Engine, EngineBuilder};

use thiserror::Error;

use tessera_core::{
    draw::estimate_text_width,
    geometry::{Bounds, Point, Size},
    semantic::{DiagramEdge, DiagramNode, NodeId},
};

/// Font size of node labels.
pub const NODE_FONT_SIZE: f64 = 14.0;

const NODE_MIN_WIDTH: f64 = 80.0;
const NODE_HEIGHT: f64 = 40.0;
const NODE_TEXT_PADDING: f64 = 16.0;

/// Errors raised while positioning diagram nodes.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    #[error("cycle detected through node `{node}`; hierarchical layout needs an acyclic graph")]
    Cycle { node: NodeId },
}

/// Box size of a node with `label`.
///
/// ```
/// # use tessera::layout::node_size;
/// assert_eq!(node_size("A").width(), 80.0);
/// assert_eq!(node_size("A").height(), 40.0);
/// assert!(node_size("A very long node label").width() > 80.0);
/// ```
pub fn node_size(label: &str) -> Size {
    let text_width = estimate_text_width(label, NODE_FONT_SIZE);
    Size::new(
        NODE_MIN_WIDTH.max(text_width + 2.0 * NODE_TEXT_PADDING),
        NODE_HEIGHT,
    )
}

/// How edge paths are drawn between node boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeRouting {
    /// A single straight segment
    Straight,
    /// Horizontal and vertical segments only
    Orthogonal,
}

/// A node with its computed position.
#[derive(Debug, Clone)]
pub struct PositionedNode<'a> {
    node: &'a DiagramNode,
    center: Point,
    size: Size,
}

impl<'a> PositionedNode<'a> {
    pub fn new(node: &'a DiagramNode, center: Point, size: Size) -> Self {
        Self { node, center, size }
    }

    pub fn node(&self) -> &'a DiagramNode {
        self.node
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn bounds(&self) -> Bounds {
        self.center.to_bounds(self.size)
    }
}

/// An edge between two positioned nodes, referenced by index.
#[derive(Debug, Clone)]
pub struct PositionedEdge<'a> {
    edge: &'a DiagramEdge,
    source: usize,
    target: usize,
}

impl<'a> PositionedEdge<'a> {
    pub fn new(edge: &'a DiagramEdge, source: usize, target: usize) -> Self {
        Self {
            edge,
            source,
            target,
        }
    }

    pub fn edge(&self) -> &'a DiagramEdge {
        self.edge
    }

    pub fn source(&self) -> usize {
        self.source
    }

    pub fn target(&self) -> usize {
        self.target
    }
}

/// A fully positioned diagram.
#[derive(Debug, Clone)]
pub struct Layout<'a> {
    nodes: Vec<PositionedNode<'a>>,
    edges: Vec<PositionedEdge<'a>>,
    routing: EdgeRouting,
    canvas: Size,
}

impl<'a> Layout<'a> {
    /// Assembles a layout whose canvas covers `min_canvas` and all node
    /// bounds plus `padding`.
    pub fn new(
        nodes: Vec<PositionedNode<'a>>,
        edges: Vec<PositionedEdge<'a>>,
        routing: EdgeRouting,
        min_canvas: Size,
        padding: f64,
    ) -> Self {
        let content = nodes
            .iter()
            .map(PositionedNode::bounds)
            .reduce(|acc, bounds| acc.merge(&bounds));
        let canvas = content.map_or(min_canvas, |bounds| {
            min_canvas.max(Size::new(bounds.max_x() + padding, bounds.max_y() + padding))
        });

        Self {
            nodes,
            edges,
            routing,
            canvas,
        }
    }

    /// Nodes in diagram insertion order.
    pub fn nodes(&self) -> &[PositionedNode<'a>] {
        &self.nodes
    }

    pub fn edges(&self) -> &[PositionedEdge<'a>] {
        &self.edges
    }

    pub fn source(&self, edge: &PositionedEdge<'_>) -> &PositionedNode<'a> {
        &self.nodes[edge.source()]
    }

    pub fn target(&self, edge: &PositionedEdge<'_>) -> &PositionedNode<'a> {
        &self.nodes[edge.target()]
    }

    pub fn routing(&self) -> EdgeRouting {
        self.routing
    }

    /// Size of the SVG canvas.
    pub fn canvas(&self) -> Size {
        self.canvas
    }

    /// Finds a positioned node by id.
    pub fn node(&self, id: &NodeId) -> Option<&PositionedNode<'a>> {
        self.nodes.iter().find(|n| n.node().id() == id)
    }
}
