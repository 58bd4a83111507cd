//! Layer-based rendering for SVG output.
//!
//! Drawables push their SVG nodes into a [`LayeredOutput`] tagged with a
//! [`RenderLayer`]. When rendered, nodes are grouped into one
//! `<g data-layer="...">` element per non-empty layer, bottom to top.
//!
//! # Example
//!
//! ```
//! # use tessera_core::draw::{RenderLayer, LayeredOutput};
//! # use svg::node::element::{Line, Text};
//!
//! let mut output = LayeredOutput::new();
//! output.add_to_layer(RenderLayer::Grid, Box::new(Line::new()));
//! output.add_to_layer(RenderLayer::Text, Box::new(Text::new("42.0")));
//!
//! let svg_nodes = output.render();
//! assert_eq!(svg_nodes.len(), 2);
//! ```

use svg::node::element as svg_element;

/// Type alias for boxed SVG nodes.
pub type SvgNode = Box<dyn svg::Node>;

/// Rendering layers, bottom to top in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RenderLayer {
    /// Frame border and background fills
    Background,
    /// Gridlines behind the data
    Grid,
    /// Axis lines and tick marks
    Axis,
    /// Data primitives: line paths, bars, pie sectors, diagram nodes
    Data,
    /// Diagram edges and their arrowheads
    Edge,
    /// Point markers and donut cutouts drawn over the data
    Marker,
    /// Tick labels, value labels, percentages and node labels
    Text,
    /// Legend swatches and names
    Legend,
}

impl RenderLayer {
    /// Returns the name used in the `data-layer` attribute.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Background => "background",
            Self::Grid => "grid",
            Self::Axis => "axis",
            Self::Data => "data",
            Self::Edge => "edge",
            Self::Marker => "marker",
            Self::Text => "text",
            Self::Legend => "legend",
        }
    }
}

/// SVG nodes grouped by rendering layer.
#[derive(Debug, Default)]
pub struct LayeredOutput {
    items: Vec<(RenderLayer, SvgNode)>,
}

impl LayeredOutput {
    /// Creates a new empty `LayeredOutput`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a single node to the specified layer.
    ///
    /// Nodes keep their insertion order within a layer.
    pub fn add_to_layer(&mut self, layer: RenderLayer, node: SvgNode) {
        self.items.push((layer, node));
    }

    /// Appends all nodes of `other`.
    pub fn merge(&mut self, other: LayeredOutput) {
        self.items.extend(other.items);
    }

    /// Returns `true` if there are no nodes in any layer.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of nodes in `layer`.
    pub fn layer_len(&self, layer: RenderLayer) -> usize {
        self.items.iter().filter(|(l, _)| *l == layer).count()
    }

    /// Renders all layers to SVG groups, consuming the output.
    ///
    /// Each non-empty layer becomes a `<g data-layer="...">` element.
    /// Sorting is stable, so nodes keep their insertion order within a layer.
    pub fn render(mut self) -> Vec<SvgNode> {
        if self.is_empty() {
            return Vec::new();
        }

        self.items.sort_by_key(|(layer, _)| *layer);

        let mut result = Vec::new();
        let mut current_layer = self.items[0].0;
        let mut current_group = svg_element::Group::new().set("data-layer", current_layer.name());

        for (layer, node) in self.items {
            if layer != current_layer {
                result.push(Box::new(current_group) as SvgNode);

                current_layer = layer;
                current_group = svg_element::Group::new().set("data-layer", layer.name());
            }

            current_group = current_group.add(node);
        }

        result.push(Box::new(current_group) as SvgNode);

        result
    }
}
