//! Line charts: one polyline (or Catmull-Rom curve) per series.

use std::fmt::Write as _;

use svg::node::element as svg_element;

use tessera_core::{
    apply_stroke,
    draw::{RenderLayer, StrokeDefinition},
    geometry::Point,
    semantic::{LineChart, Series},
};

use super::{
    ChartScene, ChartStyle, GridLines, RenderError, check_extent, check_finite, check_option,
    render_axes, render_grid, render_x_ticks, series_legend,
};
use crate::scale::{DataExtent, PlotArea};

const LINE_WIDTH: f64 = 2.0;

/// Scales every point of `series` into pixel space, in series order.
pub fn scaled_points(series: &Series, area: &PlotArea, extent: &DataExtent) -> Vec<Point> {
    series
        .points()
        .iter()
        .map(|p| area.scale(extent, p.x(), p.y()))
        .collect()
}

/// Builds the `d` attribute of a series path.
///
/// Straight paths are `M x0 y0 L x1 y1 ...`; smooth paths replace each `L`
/// with a cubic `C` segment through the same points. Either way there is
/// one segment command per pair of consecutive points. Returns `None` for
/// fewer than two points.
///
/// ```
/// # use tessera::chart::line::path_data;
/// # use tessera_core::geometry::Point;
/// let points = [Point::new(0.0, 10.0), Point::new(5.0, 0.0), Point::new(10.0, 10.0)];
/// assert_eq!(path_data(&points, false).unwrap(), "M 0 10 L 5 0 L 10 10");
/// assert!(path_data(&points[..1], false).is_none());
/// ```
pub fn path_data(points: &[Point], smooth: bool) -> Option<String> {
    let (first, rest) = points.split_first()?;
    if rest.is_empty() {
        return None;
    }

    let mut d = format!("M {} {}", first.x(), first.y());
    for (i, point) in rest.iter().enumerate() {
        if smooth {
            let (c1, c2) = catmull_rom_controls(points, i);
            // Writing to a String cannot fail.
            let _ = write!(
                d,
                " C {} {}, {} {}, {} {}",
                c1.x(),
                c1.y(),
                c2.x(),
                c2.y(),
                point.x(),
                point.y()
            );
        } else {
            let _ = write!(d, " L {} {}", point.x(), point.y());
        }
    }
    Some(d)
}

/// Bezier control points of the segment from `points[i]` to `points[i + 1]`.
///
/// End segments reuse the endpoint as the missing neighbor.
fn catmull_rom_controls(points: &[Point], i: usize) -> (Point, Point) {
    let p1 = points[i];
    let p2 = points[i + 1];
    let p0 = if i == 0 { p1 } else { points[i - 1] };
    let p3 = points.get(i + 2).copied().unwrap_or(p2);

    let c1 = Point::new(
        p1.x() + (p2.x() - p0.x()) / 6.0,
        p1.y() + (p2.y() - p0.y()) / 6.0,
    );
    let c2 = Point::new(
        p2.x() - (p3.x() - p1.x()) / 6.0,
        p2.y() - (p3.y() - p1.y()) / 6.0,
    );
    (c1, c2)
}

/// Renders a line chart.
///
/// # Errors
///
/// - [`RenderError::NonFiniteValue`] if any coordinate is NaN or infinite.
/// - [`RenderError::NonFiniteDomain`] if the data range overflows.
/// - [`RenderError::InvalidOption`] for a negative or non-finite point radius.
pub fn render(chart: &LineChart, style: &ChartStyle) -> Result<ChartScene, RenderError> {
    check_finite(chart.series())?;
    check_option("point_radius", chart.point_radius())?;
    let extent = DataExtent::from_series(chart.series());
    check_extent(&extent)?;

    let config = chart.config();
    let mut scene = ChartScene::new(config, style);
    let area = PlotArea::new(scene.width(), scene.height());

    if config.show_grid() {
        render_grid(&area, GridLines::Both, &mut scene.layers);
    }
    render_axes(&area, &extent, style, &mut scene.layers);
    render_x_ticks(&area, &extent, style, &mut scene.layers);

    for series in chart.series() {
        let paint = style.series_paint(series);
        let points = scaled_points(series, &area, &extent);

        if let Some(d) = path_data(&points, chart.smooth()) {
            let path = svg_element::Path::new().set("d", d).set("fill", "none");
            let path = apply_stroke!(path, &StrokeDefinition::new(paint.clone(), LINE_WIDTH));
            scene.layers.add_to_layer(RenderLayer::Data, Box::new(path));
        }

        if chart.show_points() {
            for point in &points {
                let marker = svg_element::Circle::new()
                    .set("cx", point.x())
                    .set("cy", point.y())
                    .set("r", chart.point_radius())
                    .set("fill", paint);
                scene.layers.add_to_layer(RenderLayer::Marker, Box::new(marker));
            }
        }
    }

    scene.legend = series_legend(config, chart.series(), style);
    Ok(scene)
}

#[cfg(test)]
mod tests {
    use tessera_core::{
        color::Paint,
        semantic::{ChartConfig, DataPoint},
    };

    use super::*;

    fn sample_chart() -> LineChart {
        LineChart::new(ChartConfig::default()).add_series(
            Series::new("Sales")
                .with_points([
                    DataPoint::new(0.0, 10.0),
                    DataPoint::new(1.0, 30.0),
                    DataPoint::new(2.0, 20.0),
                    DataPoint::new(3.0, 40.0),
                ])
                .with_color(Paint::new("#40a9ff").unwrap()),
        )
    }

    #[test]
    fn test_path_segment_count() {
        let points: Vec<Point> = (0..5).map(|i| Point::new(f64::from(i), 0.0)).collect();

        let straight = path_data(&points, false).unwrap();
        assert_eq!(straight.matches(" L ").count(), 4);
        assert!(straight.starts_with("M 0 0"));

        let smooth = path_data(&points, true).unwrap();
        assert_eq!(smooth.matches(" C ").count(), 4);
        assert!(!smooth.contains(" L "));
        assert!(smooth.ends_with("4 0"));
    }

    #[test]
    fn test_catmull_rom_collinear_points_stay_on_line() {
        let points = [Point::new(0.0, 0.0), Point::new(6.0, 6.0), Point::new(12.0, 12.0)];
        let (c1, c2) = catmull_rom_controls(&points, 0);
        assert_eq!(c1, Point::new(1.0, 1.0));
        assert_eq!(c2, Point::new(4.0, 4.0));
    }

    #[test]
    fn test_render_layers() {
        let scene = render(&sample_chart(), &ChartStyle::default()).unwrap();
        let layers = scene.layers();

        assert_eq!(layers.layer_len(RenderLayer::Data), 1);
        assert_eq!(layers.layer_len(RenderLayer::Marker), 4);
        assert_eq!(layers.layer_len(RenderLayer::Grid), 12);
        // 2 axis lines + 6 Y tick marks + 6 X tick marks
        assert_eq!(layers.layer_len(RenderLayer::Axis), 14);
        assert_eq!(layers.layer_len(RenderLayer::Text), 12);
        assert_eq!(scene.legend().len(), 1);
        assert_eq!(scene.legend()[0].paint().as_str(), "#40a9ff");
    }

    #[test]
    fn test_render_single_point_has_marker_only() {
        let chart = LineChart::new(ChartConfig::default().with_grid(false))
            .add_series(Series::from_values("one", &[5.0]));
        let scene = render(&chart, &ChartStyle::default()).unwrap();

        assert_eq!(scene.layers().layer_len(RenderLayer::Data), 0);
        assert_eq!(scene.layers().layer_len(RenderLayer::Marker), 1);
        assert_eq!(scene.layers().layer_len(RenderLayer::Grid), 0);
    }

    #[test]
    fn test_render_hidden_points() {
        let chart = sample_chart().with_points_shown(false);
        let scene = render(&chart, &ChartStyle::default()).unwrap();
        assert_eq!(scene.layers().layer_len(RenderLayer::Marker), 0);
    }

    #[test]
    fn test_scaled_points_span_plot_area() {
        let chart = sample_chart();
        let area = PlotArea::new(400.0, 300.0);
        let extent = DataExtent::from_series(chart.series());
        let points = scaled_points(&chart.series()[0], &area, &extent);

        assert_eq!(points.len(), 4);
        assert!(points.windows(2).all(|w| w[0].x() < w[1].x()));
        // Highest value is drawn closest to the top
        let top = points
            .iter()
            .min_by(|a, b| a.y().total_cmp(&b.y()))
            .unwrap();
        assert_eq!(*top, points[3]);
    }
}
