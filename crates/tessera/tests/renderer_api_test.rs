//! Integration tests for the Renderer API
//!
//! These tests drive figures through the public API and check the
//! geometry and markup that come out.

use float_cmp::approx_eq;

use tessera::{
    Renderer, TesseraError,
    chart::{Palette, RenderError, bar, pie},
    config::{AppConfig, LayoutConfig, StyleConfig},
    export::{Exporter, FileExporter, Format},
    geometry::Point,
    graph::DiagramGraph,
    layout::{EngineBuilder, LayoutError, engines::hierarchical::compute_ranks},
    scale::{DataExtent, PlotArea},
    semantic::{
        BarChart, BuildError, ChartConfig, DataPoint, DiagramBuilder, Figure, LayoutEngine,
        LineChart, NodeId, PieChart, PieSlice, Series,
    },
};

fn revenue_series() -> Series {
    Series::new("2024").with_points([
        DataPoint::new(0.0, 125.0),
        DataPoint::new(1.0, 89.0),
        DataPoint::new(2.0, 156.0),
        DataPoint::new(3.0, 78.0),
        DataPoint::new(4.0, 134.0),
    ])
}

fn pipeline() -> DiagramBuilder {
    DiagramBuilder::default()
        .node("input", "Input")
        .node("process", "Process")
        .node("validate", "Validate")
        .node("output", "Output")
        .edge("input", "process", Some("raw"))
        .edge("process", "validate", None)
        .edge("validate", "output", None)
}

/// Path data attributes of every `<path>` in `markup`.
fn path_data(markup: &str) -> Vec<&str> {
    markup
        .split("<path")
        .skip(1)
        .filter_map(|element| {
            let start = element.find(" d=\"")? + 4;
            let end = element[start..].find('"')? + start;
            Some(&element[start..end])
        })
        .collect()
}

#[test]
fn test_line_path_has_one_segment_per_gap() {
    let chart = LineChart::new(ChartConfig::default()).add_series(revenue_series());
    let svg = Renderer::default()
        .render_svg(&Figure::from(chart))
        .expect("Failed to render");

    let paths = path_data(&svg);
    assert_eq!(paths.len(), 1);
    assert!(paths[0].starts_with("M "));
    assert_eq!(paths[0].matches(" L ").count(), 4);
}

#[test]
fn test_empty_chart_has_no_data_layer() {
    let chart = LineChart::new(ChartConfig::default());
    let svg = Renderer::default()
        .render_svg(&Figure::from(chart))
        .expect("Failed to render");

    assert!(svg.contains("data-layer=\"background\""));
    assert!(svg.contains("data-layer=\"axis\""));
    assert!(!svg.contains("data-layer=\"data\""));
    assert!(!svg.contains("data-layer=\"legend\""));
}

#[test]
fn test_pie_sweeps() {
    let chart = [40.0, 25.0, 15.0, 12.0, 8.0]
        .iter()
        .enumerate()
        .fold(PieChart::new(ChartConfig::default()), |chart, (i, &v)| {
            chart.add_slice(PieSlice::new(format!("Slice {i}"), v))
        });
    let slices = pie::layout_slices(&chart, &Palette::default()).expect("valid slices");

    let expected = [144.0, 90.0, 54.0, 43.2, 28.8];
    for (slice, degrees) in slices.iter().zip(expected) {
        assert!(approx_eq!(f64, slice.sweep_degrees(), degrees, epsilon = 1e-9));
    }
    let total: f64 = slices.iter().map(|s| s.sweep_degrees()).sum();
    assert!(approx_eq!(f64, total, 360.0, epsilon = 1e-9));
}

#[test]
fn test_bar_heights_follow_values() {
    let chart = BarChart::new(ChartConfig::default()).add_series(revenue_series());
    let config = chart.config();
    let area = PlotArea::new(f64::from(config.width()), f64::from(config.height()));
    let extent = DataExtent::from_series(chart.series());
    let bars = bar::layout_bars(&chart, &area, &extent);

    assert_eq!(bars.len(), 5);
    let tallest = bars
        .iter()
        .max_by(|a, b| a.height().total_cmp(&b.height()))
        .expect("bars");
    assert_eq!(tallest.category(), 2);

    let mut by_value: Vec<_> = bars.iter().collect();
    by_value.sort_by(|a, b| a.value().total_cmp(&b.value()));
    assert!(by_value.windows(2).all(|w| w[0].height() < w[1].height()));
}

#[test]
fn test_rendering_is_idempotent() {
    let renderer = Renderer::default();
    let figures = [
        Figure::from(LineChart::new(ChartConfig::default()).add_series(revenue_series())),
        Figure::from(BarChart::new(ChartConfig::default()).add_series(revenue_series())),
        Figure::from(pipeline().build().expect("valid diagram")),
    ];

    for figure in &figures {
        for format in [Format::Svg, Format::Html, Format::Page] {
            let first = renderer.render(figure, format).expect("Failed to render");
            let second = renderer.render(figure, format).expect("Failed to render");
            assert_eq!(first, second);
        }
    }
}

#[test]
fn test_hierarchical_chain() {
    let diagram = pipeline().build().expect("valid diagram");
    let graph = DiagramGraph::from_diagram(&diagram);
    assert_eq!(compute_ranks(&graph), Ok(vec![0, 1, 2, 3]));

    let layout = EngineBuilder::new()
        .calculate(&graph, LayoutEngine::Hierarchical)
        .expect("acyclic");
    let xs: Vec<f64> = layout.nodes().iter().map(|n| n.center().x()).collect();
    assert!(xs.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_circular_layout_angles() {
    let diagram = ["a", "b", "c", "d", "e"]
        .into_iter()
        .fold(DiagramBuilder::default(), |builder, id| builder.node(id, id))
        .layout(LayoutEngine::Circular)
        .build()
        .expect("valid diagram");
    let graph = DiagramGraph::from_diagram(&diagram);
    let layout = EngineBuilder::new()
        .calculate(&graph, LayoutEngine::Hierarchical)
        .expect("circular layout");

    let center = Point::new(300.0, 200.0);
    let radius = layout.nodes()[0].center().distance(center);
    for (i, node) in layout.nodes().iter().enumerate() {
        let offset = node.center().sub_point(center);
        assert!(approx_eq!(f64, offset.hypot(), radius, epsilon = 1e-9));

        let angle = offset.y().atan2(offset.x()).to_degrees().rem_euclid(360.0);
        let expected = 72.0 * i as f64;
        assert!(approx_eq!(f64, angle, expected, epsilon = 1e-6) || (i == 0 && angle > 359.999));
    }
}

#[test]
fn test_unknown_edge_endpoint() {
    let result = DiagramBuilder::default()
        .node("a", "A")
        .edge("a", "ghost", None)
        .build();

    assert_eq!(
        result.err(),
        Some(BuildError::UnknownNode {
            from: NodeId::from("a"),
            to: NodeId::from("ghost"),
            missing: NodeId::from("ghost"),
        })
    );
}

#[test]
fn test_cycle_is_reported() {
    let diagram = pipeline()
        .edge("output", "input", None)
        .build()
        .expect("valid diagram");
    let err = Renderer::default()
        .render_svg(&Figure::from(diagram))
        .expect_err("cycle");

    assert!(matches!(err, TesseraError::Layout(LayoutError::Cycle { .. })));
}

#[test]
fn test_zero_total_pie() {
    let chart = PieChart::new(ChartConfig::default())
        .add_slice(PieSlice::new("a", 0.0))
        .add_slice(PieSlice::new("b", 0.0));
    let err = Renderer::default()
        .render_svg(&Figure::from(chart))
        .expect_err("empty total");

    assert!(matches!(err, TesseraError::Render(RenderError::EmptyTotal)));
}

#[test]
fn test_invalid_palette_is_config_error() {
    let style = StyleConfig::default().with_palette(["not a color"]);
    let renderer = Renderer::new(AppConfig::new(LayoutConfig::default(), style));
    let chart = LineChart::new(ChartConfig::default()).add_series(revenue_series());

    let err = renderer
        .render_svg(&Figure::from(chart))
        .expect_err("invalid palette");
    assert!(matches!(err, TesseraError::Config(_)));
}

#[test]
fn test_html_fragment_and_page() {
    let chart = LineChart::new(
        ChartConfig::default()
            .with_title("Revenue")
            .with_id("revenue")
            .with_classes("wide"),
    )
    .add_series(revenue_series());
    let figure = Figure::from(chart);
    let renderer = Renderer::default();

    let html = renderer.render_html(&figure).expect("Failed to render");
    assert!(html.starts_with("<div class=\"ts-chart-container ts-chart-line wide\" id=\"revenue\">"));
    assert!(html.contains("<div class=\"ts-chart-title\">Revenue</div>"));
    assert!(html.contains("<svg"));
    assert!(html.contains("<span>2024</span>"));
    assert!(!html.contains("data-layer=\"legend\""));

    let page = renderer.render_page(&figure).expect("Failed to render");
    assert!(page.starts_with("<!DOCTYPE html>"));
    assert!(page.contains("--ts-bg-card"));
    assert!(page.contains(&html));
}

#[test]
fn test_export_to_file() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("revenue.svg");
    let chart = BarChart::new(ChartConfig::default()).add_series(revenue_series());

    Renderer::default()
        .export(&Figure::from(chart), Format::Svg, &FileExporter::new(&path))
        .expect("Failed to export");

    let written = std::fs::read_to_string(&path).expect("output file");
    assert!(written.contains("</svg>"));
}

#[test]
fn test_failed_render_writes_nothing() {
    struct Panicking;
    impl Exporter for Panicking {
        fn export(&self, _markup: &str) -> Result<(), tessera::export::Error> {
            panic!("exporter must not be reached");
        }
    }

    let chart = PieChart::new(ChartConfig::default()).add_slice(PieSlice::new("a", -1.0));
    let err = Renderer::default()
        .export(&Figure::from(chart), Format::Svg, &Panicking)
        .expect_err("negative slice");
    assert!(matches!(
        err,
        TesseraError::Render(RenderError::NegativeSlice { index: 0, .. })
    ));
}

#[test]
fn test_overflowing_range_is_rejected() {
    let extreme = || Series::from_values("extreme", &[-1e308, 1e308]);
    let figures = [
        Figure::from(LineChart::new(ChartConfig::default()).add_series(extreme())),
        Figure::from(BarChart::new(ChartConfig::default()).add_series(extreme())),
    ];

    for figure in &figures {
        let err = Renderer::default().render_svg(figure).unwrap_err();
        assert!(matches!(
            err,
            TesseraError::Render(RenderError::NonFiniteDomain { axis: "y" })
        ));
    }
}

#[test]
fn test_wide_range_renders_finite_markup() {
    let wide = || Series::from_values("wide", &[-1e300, 1e300]);
    let figures = [
        Figure::from(LineChart::new(ChartConfig::default()).add_series(wide())),
        Figure::from(BarChart::new(ChartConfig::default()).add_series(wide())),
    ];

    for figure in &figures {
        let svg = Renderer::default().render_svg(figure).unwrap();
        assert!(!svg.contains("NaN"), "{}", figure.kind_name());
        assert!(!svg.contains("inf"), "{}", figure.kind_name());
    }
}

#[test]
fn test_non_finite_manual_position() {
    let err = DiagramBuilder::default()
        .node_at("a", "A", Point::new(f64::NAN, 10.0))
        .layout(LayoutEngine::Manual)
        .build()
        .unwrap_err();
    assert_eq!(err, BuildError::NonFinitePosition(NodeId::from("a")));
}

#[test]
fn test_invalid_chart_options() {
    let line = LineChart::new(ChartConfig::default())
        .add_series(revenue_series())
        .with_point_radius(f64::NAN);
    let bar = BarChart::new(ChartConfig::default())
        .add_series(revenue_series())
        .with_bar_spacing(-10.0);

    let cases = [
        (Figure::from(line), "point_radius"),
        (Figure::from(bar), "bar_spacing"),
    ];
    for (figure, option) in cases {
        let err = Renderer::default().render_svg(&figure).unwrap_err();
        assert!(matches!(
            err,
            TesseraError::Render(RenderError::InvalidOption { name, .. }) if name == option
        ));
    }
}

#[test]
fn test_invalid_layout_spacing_is_config_error() {
    let layout = LayoutConfig::default().with_padding(f64::INFINITY);
    let renderer = Renderer::new(AppConfig::new(layout, StyleConfig::default()));
    let diagram = pipeline().build().unwrap();

    let err = renderer.render_svg(&diagram.into()).unwrap_err();
    assert!(matches!(err, TesseraError::Config(msg) if msg.contains("padding")));
}
