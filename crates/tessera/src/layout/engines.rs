//! Layout engine factory module
//!
//! This module provides the engines that position diagram nodes and the
//! builder that selects and configures one per diagram, based on the
//! diagram's own [`LayoutEngine`] or the configured default.

pub mod circular;
pub mod grid;
pub mod hierarchical;

use log::{debug, info};

use tessera_core::{
    geometry::{Point, Size},
    semantic::{DiagramConfig, LayoutDirection, LayoutEngine},
};

use crate::{
    graph::DiagramGraph,
    layout::{EdgeRouting, Layout, LayoutError, PositionedEdge, PositionedNode, node_size},
};

/// Positions the nodes of a diagram graph.
pub trait Engine {
    /// Returns the center of every node, indexed like `graph.node_indices()`.
    ///
    /// - `sizes`: box size of every node, in the same order
    /// - `canvas`: the configured canvas size
    fn calculate(
        &self,
        graph: &DiagramGraph<'_>,
        sizes: &[Size],
        canvas: Size,
    ) -> Result<Vec<Point>, LayoutError>;

    /// How edges are routed for layouts produced by this engine.
    fn routing(&self) -> EdgeRouting {
        EdgeRouting::Straight
    }
}

/// Builder for creating and configuring layout engines.
#[derive(Debug, Clone)]
pub struct EngineBuilder {
    padding: f64,
    rank_spacing: f64,
    sibling_spacing: f64,
    direction: LayoutDirection,
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl EngineBuilder {
    /// Create a new engine builder with default spacing
    pub fn new() -> Self {
        Self {
            padding: 40.0,
            rank_spacing: 160.0,
            sibling_spacing: 80.0,
            direction: LayoutDirection::default(),
        }
    }

    /// Set the space kept free around the nodes
    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding = padding;
        self
    }

    /// Set the distance between hierarchical ranks
    pub fn with_rank_spacing(mut self, spacing: f64) -> Self {
        self.rank_spacing = spacing;
        self
    }

    /// Set the spacing between nodes sharing a rank or grid row
    pub fn with_sibling_spacing(mut self, spacing: f64) -> Self {
        self.sibling_spacing = spacing;
        self
    }

    /// Set the default direction of hierarchical layouts
    pub fn with_direction(mut self, direction: LayoutDirection) -> Self {
        self.direction = direction;
        self
    }

    /// Create an engine of the specified type with the configured options
    pub fn engine(&self, engine_type: LayoutEngine, direction: LayoutDirection) -> Box<dyn Engine> {
        match engine_type {
            LayoutEngine::Hierarchical => {
                let mut e = hierarchical::Engine::new();
                e.set_direction(direction)
                    .set_rank_spacing(self.rank_spacing)
                    .set_sibling_spacing(self.sibling_spacing)
                    .set_padding(self.padding);
                Box::new(e)
            }
            LayoutEngine::Circular => {
                let mut e = circular::Engine::new();
                e.set_margin(circular::DEFAULT_MARGIN);
                Box::new(e)
            }
            LayoutEngine::Manual => {
                let mut e = grid::Engine::new();
                e.set_spacing(self.sibling_spacing).set_padding(self.padding);
                Box::new(e)
            }
        }
    }

    /// Lays out `graph`.
    ///
    /// The diagram's own engine and direction win over the builder defaults.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::Cycle`] when a hierarchical layout meets a cycle.
    pub fn calculate<'a>(
        &self,
        graph: &DiagramGraph<'a>,
        default_engine: LayoutEngine,
    ) -> Result<Layout<'a>, LayoutError> {
        let diagram = graph.diagram();
        let engine_type = diagram.layout().unwrap_or(default_engine);
        let direction = diagram.direction().unwrap_or(self.direction);
        info!(engine:% = engine_type, direction:?; "Laying out diagram");

        let canvas = canvas_size(diagram.config());
        let sizes: Vec<Size> = graph.nodes().map(|node| node_size(node.label())).collect();

        let engine = self.engine(engine_type, direction);
        let centers = engine.calculate(graph, &sizes, canvas)?;
        debug!(nodes = centers.len(); "Node positions calculated");

        let nodes = graph
            .nodes()
            .zip(centers)
            .zip(sizes)
            .map(|((node, center), size)| PositionedNode::new(node, center, size))
            .collect();

        let edges = graph
            .edges()
            .map(|(source, target, edge)| {
                PositionedEdge::new(edge, source.index(), target.index())
            })
            .collect();

        Ok(Layout::new(
            nodes,
            edges,
            engine.routing(),
            canvas,
            self.padding,
        ))
    }
}

fn canvas_size(config: &DiagramConfig) -> Size {
    Size::new(f64::from(config.width()), f64::from(config.height()))
}
