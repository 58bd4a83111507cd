//! Node-link diagram model.
//!
//! A [`Diagram`] can only be obtained from [`DiagramBuilder::build`], which
//! guarantees that node ids are unique and that every edge endpoint
//! resolves to a node. Layout and rendering can rely on both.

use std::{collections::HashSet, fmt, str::FromStr};

use log::{debug, trace};
use serde::Deserialize;

use super::BuildError;
use crate::geometry::Point;

/// Unique key of a diagram node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(String);

impl NodeId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Strategy used to position diagram nodes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutEngine {
    /// Ranks by depth from the roots, spread along the cross axis
    #[default]
    Hierarchical,
    /// Evenly spaced on a circle, in insertion order
    Circular,
    /// User-supplied positions, grid fallback for the rest
    Manual,
}

impl FromStr for LayoutEngine {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hierarchical" => Ok(Self::Hierarchical),
            "circular" => Ok(Self::Circular),
            "manual" => Ok(Self::Manual),
            _ => Err(format!(
                "invalid layout `{s}`, valid values: hierarchical, circular, manual"
            )),
        }
    }
}

impl fmt::Display for LayoutEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hierarchical => write!(f, "hierarchical"),
            Self::Circular => write!(f, "circular"),
            Self::Manual => write!(f, "manual"),
        }
    }
}

/// Which axis carries the ranks of a hierarchical layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutDirection {
    #[default]
    LeftToRight,
    TopToBottom,
}

impl FromStr for LayoutDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left-to-right" | "lr" => Ok(Self::LeftToRight),
            "top-to-bottom" | "tb" => Ok(Self::TopToBottom),
            _ => Err(format!(
                "invalid direction `{s}`, valid values: left-to-right, top-to-bottom"
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DiagramNode {
    id: NodeId,
    label: String,
    position: Option<Point>,
}

impl DiagramNode {
    pub fn id(&self) -> &NodeId {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Center position requested by the user; only the manual layout honors it.
    pub fn position(&self) -> Option<Point> {
        self.position
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DiagramEdge {
    from: NodeId,
    to: NodeId,
    label: Option<String>,
}

impl DiagramEdge {
    pub fn from(&self) -> &NodeId {
        &self.from
    }

    pub fn to(&self) -> &NodeId {
        &self.to
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}

/// Canvas settings of a diagram.
#[derive(Debug, Clone, PartialEq)]
pub struct DiagramConfig {
    width: u32,
    height: u32,
    title: Option<String>,
}

impl Default for DiagramConfig {
    fn default() -> Self {
        Self {
            width: 600,
            height: 400,
            title: None,
        }
    }
}

impl DiagramConfig {
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }
}

/// A validated diagram.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagram {
    config: DiagramConfig,
    nodes: Vec<DiagramNode>,
    edges: Vec<DiagramEdge>,
    layout: Option<LayoutEngine>,
    direction: Option<LayoutDirection>,
}

impl Diagram {
    pub fn config(&self) -> &DiagramConfig {
        &self.config
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> &[DiagramNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[DiagramEdge] {
        &self.edges
    }

    /// Layout requested for this diagram; `None` defers to configuration.
    pub fn layout(&self) -> Option<LayoutEngine> {
        self.layout
    }

    /// Direction requested for this diagram; `None` defers to configuration.
    pub fn direction(&self) -> Option<LayoutDirection> {
        self.direction
    }
}

/// Accumulates nodes and edges, then validates them in [`build`](Self::build).
///
/// # Examples
///
/// ```
/// use tessera_core::semantic::{BuildError, DiagramBuilder, LayoutEngine, NodeId};
///
/// let diagram = DiagramBuilder::default()
///     .node("input", "Input")
///     .node("output", "Output")
///     .edge("input", "output", Some("data"))
///     .layout(LayoutEngine::Circular)
///     .build()
///     .unwrap();
/// assert_eq!(diagram.nodes().len(), 2);
///
/// let err = DiagramBuilder::default()
///     .node("input", "Input")
///     .edge("input", "missing", None)
///     .build()
///     .unwrap_err();
/// assert_eq!(
///     err,
///     BuildError::UnknownNode {
///         from: NodeId::from("input"),
///         to: NodeId::from("missing"),
///         missing: NodeId::from("missing"),
///     }
/// );
/// ```
#[derive(Debug, Default)]
pub struct DiagramBuilder {
    config: DiagramConfig,
    nodes: Vec<DiagramNode>,
    edges: Vec<DiagramEdge>,
    layout: Option<LayoutEngine>,
    direction: Option<LayoutDirection>,
}

impl DiagramBuilder {
    pub fn new(config: DiagramConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Adds a node whose position is computed by the layout.
    pub fn node(mut self, id: impl Into<NodeId>, label: impl Into<String>) -> Self {
        self.nodes.push(DiagramNode {
            id: id.into(),
            label: label.into(),
            position: None,
        });
        self
    }

    /// Adds a node centered at `position` (manual layout only).
    pub fn node_at(
        mut self,
        id: impl Into<NodeId>,
        label: impl Into<String>,
        position: Point,
    ) -> Self {
        self.nodes.push(DiagramNode {
            id: id.into(),
            label: label.into(),
            position: Some(position),
        });
        self
    }

    /// Adds a directed edge. Endpoints are checked in [`build`](Self::build),
    /// so edges may be declared before their nodes.
    pub fn edge(
        mut self,
        from: impl Into<NodeId>,
        to: impl Into<NodeId>,
        label: Option<&str>,
    ) -> Self {
        self.edges.push(DiagramEdge {
            from: from.into(),
            to: to.into(),
            label: label.map(str::to_string),
        });
        self
    }

    pub fn layout(mut self, layout: LayoutEngine) -> Self {
        self.layout = Some(layout);
        self
    }

    pub fn direction(mut self, direction: LayoutDirection) -> Self {
        self.direction = Some(direction);
        self
    }

    /// Validates and returns the diagram.
    ///
    /// # Errors
    ///
    /// - [`BuildError::DuplicateNode`] if two nodes share an id.
    /// - [`BuildError::UnknownNode`] if an edge endpoint is not a node id.
    /// - [`BuildError::NonFinitePosition`] if a manual position is NaN or
    ///   infinite.
    pub fn build(self) -> Result<Diagram, BuildError> {
        let mut ids = HashSet::with_capacity(self.nodes.len());
        for node in &self.nodes {
            if !ids.insert(&node.id) {
                debug!(node:% = node.id; "Duplicate node id");
                return Err(BuildError::DuplicateNode(node.id.clone()));
            }
            if node
                .position
                .is_some_and(|p| !p.x().is_finite() || !p.y().is_finite())
            {
                debug!(node:% = node.id; "Non-finite node position");
                return Err(BuildError::NonFinitePosition(node.id.clone()));
            }
        }

        for edge in &self.edges {
            let missing = [&edge.from, &edge.to]
                .into_iter()
                .find(|id| !ids.contains(id));
            if let Some(missing) = missing {
                debug!(from:% = edge.from, to:% = edge.to, missing:%; "Edge endpoint not found");
                return Err(BuildError::UnknownNode {
                    from: edge.from.clone(),
                    to: edge.to.clone(),
                    missing: missing.clone(),
                });
            }
        }

        trace!(nodes = self.nodes.len(), edges = self.edges.len(); "Diagram validated");
        Ok(Diagram {
            config: self.config,
            nodes: self.nodes,
            edges: self.edges,
            layout: self.layout,
            direction: self.direction,
        })
    }
}
