//! Bar charts with multiple series grouped side by side.
//!
//! For `n` categories and `k` series, each category gets a group of `k`
//! bars of `bar_width`, groups are `bar_spacing` apart, and the whole block
//! is centered horizontally in the plot area:
//!
//! ```text
//!   group = k * w
//!   total = n * (group + s) - s
//!   start = left + (plot_width - total) / 2
//!   x(i, j) = start + i * (group + s) + j * w
//! ```

use svg::node::element as svg_element;

use tessera_core::{
    draw::{FontWeight, RenderLayer, format_value},
    geometry::Point,
    semantic::BarChart,
};

use super::{
    ChartScene, ChartStyle, GridLines, RenderError, check_extent, check_finite, check_option,
    render_axes, render_grid, series_legend,
};
use crate::scale::{DataExtent, PlotArea};

const VALUE_LABEL_GAP: f64 = 5.0;
const CATEGORY_LABEL_OFFSET: f64 = 20.0;
const LABEL_FONT_SIZE: f64 = 11.0;
const CORNER_RADIUS: f64 = 2.0;

/// Pixel rectangle of one bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarGeometry {
    series: usize,
    category: usize,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    value: f64,
}

impl BarGeometry {
    /// Index of the series this bar belongs to.
    pub fn series(&self) -> usize {
        self.series
    }

    /// Index of the point within its series.
    pub fn category(&self) -> usize {
        self.category
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    /// Top edge of the bar.
    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// The data value the bar represents.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Horizontal center of the bar.
    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }
}

/// Left edge of every category group.
fn group_origins(chart: &BarChart, area: &PlotArea) -> Vec<f64> {
    let categories = chart.series().iter().map(|s| s.len()).max().unwrap_or(0);
    let group_width = chart.bar_width() * chart.series().len() as f64;
    let stride = group_width + chart.bar_spacing();
    let total = (categories as f64).mul_add(stride, -chart.bar_spacing());
    let start = area.left() + (area.plot_width() - total) / 2.0;

    (0..categories)
        .map(|i| (i as f64).mul_add(stride, start))
        .collect()
}

/// Computes every bar rectangle, series-major.
///
/// Heights are measured from the bottom of the plot area, which
/// corresponds to the minimum of the padded Y domain, and never go negative.
pub fn layout_bars(chart: &BarChart, area: &PlotArea, extent: &DataExtent) -> Vec<BarGeometry> {
    let origins = &group_origins(chart, area);
    let domain = extent.y();

    chart
        .series()
        .iter()
        .enumerate()
        .flat_map(|(j, series)| {
            series.points().iter().enumerate().map(move |(i, point)| {
                let height = (domain.normalize(point.y()) * area.plot_height()).max(0.0);
                BarGeometry {
                    series: j,
                    category: i,
                    x: (j as f64).mul_add(chart.bar_width(), origins[i]),
                    y: area.bottom() - height,
                    width: chart.bar_width(),
                    height,
                    value: point.y(),
                }
            })
        })
        .collect()
}

/// Renders a bar chart.
///
/// # Errors
///
/// - [`RenderError::NonFiniteValue`] if any coordinate is NaN or infinite.
/// - [`RenderError::NonFiniteDomain`] if the data range overflows.
/// - [`RenderError::InvalidOption`] for a negative or non-finite bar width
///   or spacing.
pub fn render(chart: &BarChart, style: &ChartStyle) -> Result<ChartScene, RenderError> {
    check_finite(chart.series())?;
    check_option("bar_width", chart.bar_width())?;
    check_option("bar_spacing", chart.bar_spacing())?;
    let extent = DataExtent::from_series(chart.series());
    check_extent(&extent)?;

    let config = chart.config();
    let mut scene = ChartScene::new(config, style);
    let area = PlotArea::new(scene.width(), scene.height());

    if config.show_grid() {
        render_grid(&area, GridLines::HorizontalOnly, &mut scene.layers);
    }
    render_axes(&area, &extent, style, &mut scene.layers);

    let value_label = style.text(LABEL_FONT_SIZE).with_weight(FontWeight::Bold);
    for bar in layout_bars(chart, &area, &extent) {
        let series = &chart.series()[bar.series()];
        let point = &series.points()[bar.category()];
        let fill = point.color().unwrap_or_else(|| style.series_paint(series));

        let rect = svg_element::Rectangle::new()
            .set("x", bar.x())
            .set("y", bar.y())
            .set("width", bar.width())
            .set("height", bar.height())
            .set("fill", fill)
            .set("rx", CORNER_RADIUS);
        scene.layers.add_to_layer(RenderLayer::Data, Box::new(rect));

        scene.layers.add_to_layer(
            RenderLayer::Text,
            Box::new(value_label.render(
                Point::new(bar.center_x(), bar.y() - VALUE_LABEL_GAP),
                &format_value(bar.value()),
            )),
        );
    }

    // Category names come from the first series' point labels.
    if let Some(first) = chart.series().first() {
        let group_width = chart.bar_width() * chart.series().len() as f64;
        let category_label = style.text(LABEL_FONT_SIZE);
        for (origin, point) in group_origins(chart, &area).into_iter().zip(first.points()) {
            if let Some(label) = point.label() {
                scene.layers.add_to_layer(
                    RenderLayer::Text,
                    Box::new(category_label.render(
                        Point::new(origin + group_width / 2.0, area.bottom() + CATEGORY_LABEL_OFFSET),
                        label,
                    )),
                );
            }
        }
    }

    scene.legend = series_legend(config, chart.series(), style);
    Ok(scene)
}
