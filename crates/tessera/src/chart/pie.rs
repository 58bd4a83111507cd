//! Pie and donut charts.
//!
//! Slices start at 12 o'clock and run clockwise in slice order, each
//! sweeping `value / total` of the full circle.

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use svg::node::element as svg_element;

use tessera_core::{
    apply_stroke,
    color::{Paint, theme},
    draw::{FontWeight, RenderLayer, StrokeDefinition, format_value},
    geometry::Point,
    semantic::PieChart,
};

use super::{ChartScene, ChartStyle, LegendEntry, Palette, RenderError, check_option};

const RADIUS_MARGIN: f64 = 40.0;
const LABEL_RADIUS_RATIO: f64 = 0.7;
const LABEL_MIN_SHARE: f64 = 0.05;
const LABEL_FONT_SIZE: f64 = 12.0;
/// Sweeps this close to a full turn are drawn as a circle.
const FULL_TURN_TOLERANCE: f64 = 1e-9;

/// Angular extent and paint of one slice.
#[derive(Debug, Clone, PartialEq)]
pub struct SliceGeometry {
    label: String,
    paint: Paint,
    start_angle: f64,
    sweep: f64,
    share: f64,
}

impl SliceGeometry {
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Explicit slice color, or the palette entry for the slice index.
    pub fn paint(&self) -> &Paint {
        &self.paint
    }

    /// Start angle in radians, clockwise from 3 o'clock.
    pub fn start_angle(&self) -> f64 {
        self.start_angle
    }

    pub fn end_angle(&self) -> f64 {
        self.start_angle + self.sweep
    }

    /// Sweep in radians.
    pub fn sweep(&self) -> f64 {
        self.sweep
    }

    pub fn sweep_degrees(&self) -> f64 {
        self.sweep.to_degrees()
    }

    /// Fraction of the total, in `[0, 1]`.
    pub fn share(&self) -> f64 {
        self.share
    }

    /// Whether the arc must be flagged as the large one (`sweep > 180°`).
    pub fn is_large_arc(&self) -> bool {
        self.sweep > PI
    }

    fn is_full_turn(&self) -> bool {
        self.sweep >= TAU - FULL_TURN_TOLERANCE
    }
}

/// Computes the angular layout of every slice.
///
/// # Errors
///
/// - [`RenderError::NonFiniteValue`] for a NaN or infinite value.
/// - [`RenderError::NegativeSlice`] for a negative value.
/// - [`RenderError::EmptyTotal`] when slices exist but sum to zero.
/// - [`RenderError::NonFiniteTotal`] when the sum overflows.
pub fn layout_slices(chart: &PieChart, palette: &Palette) -> Result<Vec<SliceGeometry>, RenderError> {
    let slices = chart.slices();
    for (index, slice) in slices.iter().enumerate() {
        let value = slice.value();
        if !value.is_finite() {
            return Err(RenderError::NonFiniteValue {
                series: slice.label().to_string(),
                index,
            });
        }
        if value < 0.0 {
            return Err(RenderError::NegativeSlice { index, value });
        }
    }

    if slices.is_empty() {
        return Ok(Vec::new());
    }

    let total: f64 = slices.iter().map(|s| s.value()).sum();
    if total == 0.0 {
        return Err(RenderError::EmptyTotal);
    }
    if !total.is_finite() {
        return Err(RenderError::NonFiniteTotal);
    }

    let mut angle = -FRAC_PI_2;
    Ok(slices
        .iter()
        .enumerate()
        .map(|(i, slice)| {
            let share = slice.value() / total;
            let geometry = SliceGeometry {
                label: slice.label().to_string(),
                paint: slice.color().unwrap_or_else(|| palette.get(i)).clone(),
                start_angle: angle,
                sweep: share * TAU,
                share,
            };
            angle = geometry.end_angle();
            geometry
        })
        .collect())
}

/// Path data of a sector: center, line to the arc start, arc, close.
fn sector_path(center: Point, radius: f64, slice: &SliceGeometry) -> String {
    let start = Point::on_circle(center, radius, slice.start_angle());
    let end = Point::on_circle(center, radius, slice.end_angle());
    format!(
        "M {},{} L {},{} A {},{} 0 {},1 {},{} Z",
        center.x(),
        center.y(),
        start.x(),
        start.y(),
        radius,
        radius,
        u8::from(slice.is_large_arc()),
        end.x(),
        end.y()
    )
}

/// Renders a pie chart. An empty chart renders the frame only.
///
/// # Errors
///
/// See [`layout_slices`]. Also returns [`RenderError::InvalidOption`] for a
/// negative or non-finite inner radius.
pub fn render(chart: &PieChart, style: &ChartStyle) -> Result<ChartScene, RenderError> {
    check_option("inner_radius", chart.inner_radius())?;
    let slices = layout_slices(chart, style.palette())?;

    let config = chart.config();
    let mut scene = ChartScene::new(config, style);
    if slices.is_empty() {
        return Ok(scene);
    }

    let center = Point::new(scene.width() / 2.0, scene.height() / 2.0);
    let radius = (scene.width().min(scene.height()) / 2.0 - RADIUS_MARGIN).max(0.0);
    let separator = StrokeDefinition::new(theme::background(), 1.0);
    let label = style
        .text(LABEL_FONT_SIZE)
        .with_weight(FontWeight::Bold)
        .centered_vertically();

    for slice in &slices {
        if slice.sweep() == 0.0 {
            continue;
        }

        if slice.is_full_turn() {
            let circle = svg_element::Circle::new()
                .set("cx", center.x())
                .set("cy", center.y())
                .set("r", radius)
                .set("fill", slice.paint());
            let circle = apply_stroke!(circle, &separator);
            scene.layers.add_to_layer(RenderLayer::Data, Box::new(circle));
        } else {
            let path = svg_element::Path::new()
                .set("d", sector_path(center, radius, slice))
                .set("fill", slice.paint());
            let path = apply_stroke!(path, &separator);
            scene.layers.add_to_layer(RenderLayer::Data, Box::new(path));
        }

        if chart.show_labels() && slice.share() > LABEL_MIN_SHARE {
            let bisector = slice.start_angle() + slice.sweep() / 2.0;
            let position = Point::on_circle(center, radius * LABEL_RADIUS_RATIO, bisector);
            let text = format!("{}%", format_value(slice.share() * 100.0));
            scene
                .layers
                .add_to_layer(RenderLayer::Text, Box::new(label.render(position, &text)));
        }
    }

    if chart.inner_radius() > 0.0 {
        let hole = svg_element::Circle::new()
            .set("cx", center.x())
            .set("cy", center.y())
            .set("r", chart.inner_radius())
            .set("fill", &theme::background());
        scene.layers.add_to_layer(RenderLayer::Marker, Box::new(hole));
    }

    if config.show_legend() {
        scene.legend = slices
            .into_iter()
            .map(|slice| LegendEntry::new(slice.label, slice.paint))
            .collect();
    }

    Ok(scene)
}
