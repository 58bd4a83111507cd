//! SVG document assembly.
//!
//! Charts arrive as a [`ChartScene`] whose primitives are already sorted
//! into layers; diagrams arrive as a positioned [`Layout`] and are drawn
//! here. Both end up as a single `<svg class="ts-chart">` document.

pub mod arrows;

use log::debug;
use svg::{Document, node::element as svg_element};

use tessera_core::{
    apply_stroke,
    color::theme,
    draw::{
        FontWeight, LayeredOutput, RenderLayer, StrokeDefinition, TextAnchor, estimate_text_width,
    },
    geometry::{Point, find_rectangle_intersection},
};

use crate::{
    chart::{ChartScene, ChartStyle, LegendEntry},
    layout::{EdgeRouting, Layout, NODE_FONT_SIZE, PositionedEdge, PositionedNode},
};

const LEGEND_TOP: f64 = 20.0;
const LEGEND_LEFT: f64 = 60.0;
const LEGEND_SWATCH: f64 = 12.0;
const LEGEND_FONT_SIZE: f64 = 12.0;
const LEGEND_GAP: f64 = 16.0;

const NODE_RADIUS: f64 = 6.0;
const EDGE_WIDTH: f64 = 1.5;
const EDGE_LABEL_FONT_SIZE: f64 = 12.0;
const EDGE_LABEL_PADDING: f64 = 5.0;
const EDGE_LABEL_OFFSET_Y: f64 = -10.0;
const SELF_LOOP_HEIGHT: f64 = 40.0;

/// Empty `<svg>` root of `width` x `height`.
fn document(width: f64, height: f64) -> Document {
    Document::new()
        .set("width", width)
        .set("height", height)
        .set("viewBox", (0.0, 0.0, width, height))
        .set("class", "ts-chart")
}

/// Wraps a chart scene into a standalone document.
///
/// With `embed_legend` the legend entries are drawn as a row of swatches
/// across the top margin; otherwise they are left to the HTML wrapper.
pub fn chart_document(
    scene: ChartScene,
    title: Option<&str>,
    style: &ChartStyle,
    embed_legend: bool,
) -> Document {
    let mut doc = document(scene.width(), scene.height());
    if let Some(title) = title {
        doc = doc.add(svg_element::Title::new(title));
    }

    let (mut layers, legend) = scene.into_parts();
    if embed_legend && !legend.is_empty() {
        layers.merge(render_legend(&legend, style));
    }

    for node in layers.render() {
        doc = doc.add(node);
    }

    debug!(embed_legend; "Chart document assembled");
    doc
}

/// Legend row drawn inside the SVG.
fn render_legend(entries: &[LegendEntry], style: &ChartStyle) -> LayeredOutput {
    let mut output = LayeredOutput::new();
    let text = style
        .text(LEGEND_FONT_SIZE)
        .with_anchor(TextAnchor::Start)
        .centered_vertically();

    let mut x = LEGEND_LEFT;
    for entry in entries {
        let swatch = svg_element::Rectangle::new()
            .set("x", x)
            .set("y", LEGEND_TOP - LEGEND_SWATCH / 2.0)
            .set("width", LEGEND_SWATCH)
            .set("height", LEGEND_SWATCH)
            .set("rx", 2)
            .set("fill", entry.paint());
        output.add_to_layer(RenderLayer::Legend, Box::new(swatch));

        let label_x = x + LEGEND_SWATCH + 4.0;
        output.add_to_layer(
            RenderLayer::Legend,
            Box::new(text.render(Point::new(label_x, LEGEND_TOP), entry.label())),
        );

        x = label_x + estimate_text_width(entry.label(), LEGEND_FONT_SIZE) + LEGEND_GAP;
    }

    output
}

/// Draws a positioned diagram into a standalone document.
pub fn diagram_document(layout: &Layout<'_>, title: Option<&str>, style: &ChartStyle) -> Document {
    let canvas = layout.canvas();
    let mut doc = document(canvas.width(), canvas.height());
    if let Some(title) = title {
        doc = doc.add(svg_element::Title::new(title));
    }
    doc = doc.add(arrows::create_marker_definitions(&theme::text_muted()));

    let mut output = LayeredOutput::new();
    if let Some(background) = style.background() {
        let rect = svg_element::Rectangle::new()
            .set("width", "100%")
            .set("height", "100%")
            .set("fill", background);
        output.add_to_layer(RenderLayer::Background, Box::new(rect));
    }

    for node in layout.nodes() {
        render_node(node, style, &mut output);
    }
    for edge in layout.edges() {
        render_edge(layout, edge, style, &mut output);
    }

    for node in output.render() {
        doc = doc.add(node);
    }

    debug!(nodes = layout.nodes().len(), edges = layout.edges().len(); "Diagram document assembled");
    doc
}

fn render_node(node: &PositionedNode<'_>, style: &ChartStyle, output: &mut LayeredOutput) {
    let bounds = node.bounds();
    let rect = svg_element::Rectangle::new()
        .set("x", bounds.min_x())
        .set("y", bounds.min_y())
        .set("width", bounds.width())
        .set("height", bounds.height())
        .set("rx", NODE_RADIUS)
        .set("fill", &theme::background())
        .set("data-node", node.node().id().as_str());
    let rect = apply_stroke!(rect, &StrokeDefinition::new(theme::border(), 1.0));
    output.add_to_layer(RenderLayer::Data, Box::new(rect));

    let label = style
        .text(NODE_FONT_SIZE)
        .with_weight(FontWeight::Bold)
        .centered_vertically();
    output.add_to_layer(
        RenderLayer::Text,
        Box::new(label.render(node.center(), node.node().label())),
    );
}

/// Picks where an orthogonal edge leaves `from` towards `to`: the middle
/// of the side facing the other node along the dominant axis.
fn side_anchor(from: &PositionedNode<'_>, to: &PositionedNode<'_>) -> Point {
    let center = from.center();
    let delta = to.center().sub_point(center);
    let half = from.size();

    if delta.x().abs() > delta.y().abs() {
        Point::new(
            center.x() + delta.x().signum() * half.width() / 2.0,
            center.y(),
        )
    } else {
        Point::new(
            center.x(),
            center.y() + delta.y().signum() * half.height() / 2.0,
        )
    }
}

fn render_edge(
    layout: &Layout<'_>,
    edge: &PositionedEdge<'_>,
    style: &ChartStyle,
    output: &mut LayeredOutput,
) {
    let source = layout.source(edge);
    let target = layout.target(edge);

    let (path_data, label_anchor) = if edge.source() == edge.target() {
        self_loop(source)
    } else {
        let (start, end) = match layout.routing() {
            EdgeRouting::Straight => (
                find_rectangle_intersection(source.center(), target.center(), source.size()),
                find_rectangle_intersection(target.center(), source.center(), target.size()),
            ),
            EdgeRouting::Orthogonal => (side_anchor(source, target), side_anchor(target, source)),
        };
        let data = match layout.routing() {
            EdgeRouting::Straight => arrows::create_path_data_from_points(start, end),
            EdgeRouting::Orthogonal => arrows::create_orthogonal_path_data_from_points(start, end),
        };
        (data, start.midpoint(end))
    };

    let path = svg_element::Path::new()
        .set("d", path_data)
        .set("fill", "none")
        .set("marker-end", arrows::marker_end());
    let path = apply_stroke!(path, &StrokeDefinition::new(theme::text_muted(), EDGE_WIDTH));
    output.add_to_layer(RenderLayer::Edge, Box::new(path));

    if let Some(label) = edge.edge().label() {
        render_edge_label(label, label_anchor, style, output);
    }
}

/// Loop above the node's top edge, for edges from a node to itself.
fn self_loop(node: &PositionedNode<'_>) -> (String, Point) {
    let bounds = node.bounds();
    let quarter = bounds.width() / 4.0;
    let start = Point::new(node.center().x() - quarter, bounds.min_y());
    let end = Point::new(node.center().x() + quarter, bounds.min_y());
    let peak = bounds.min_y() - SELF_LOOP_HEIGHT;

    let data = format!(
        "M {} {} C {} {}, {} {}, {} {}",
        start.x(),
        start.y(),
        start.x(),
        peak,
        end.x(),
        peak,
        end.x(),
        end.y()
    );
    (data, Point::new(node.center().x(), peak))
}

fn render_edge_label(label: &str, anchor: Point, style: &ChartStyle, output: &mut LayeredOutput) {
    let position = Point::new(anchor.x(), anchor.y() + EDGE_LABEL_OFFSET_Y);
    let width = estimate_text_width(label, EDGE_LABEL_FONT_SIZE) + 2.0 * EDGE_LABEL_PADDING;
    let height = EDGE_LABEL_FONT_SIZE + 2.0 * EDGE_LABEL_PADDING;

    let bg = svg_element::Rectangle::new()
        .set("x", position.x() - width / 2.0)
        .set("y", position.y() - height / 2.0)
        .set("width", width)
        .set("height", height)
        .set("fill", &theme::background())
        .set("fill-opacity", 0.8)
        .set("rx", 3);
    output.add_to_layer(RenderLayer::Text, Box::new(bg));

    let text = style
        .text(EDGE_LABEL_FONT_SIZE)
        .with_fill(theme::text_muted())
        .centered_vertically();
    output.add_to_layer(RenderLayer::Text, Box::new(text.render(position, label)));
}
