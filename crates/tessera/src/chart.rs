//! Chart renderers.
//!
//! Each chart kind turns its semantic model into a [`ChartScene`]: the
//! canvas size, the SVG primitives sorted into render layers, and the
//! legend entries derived from the same paint resolution. The export
//! layer wraps a scene into a standalone SVG document or an HTML fragment.
//!
//! The frame shared by every chart (border, gridlines, axes with ticks)
//! lives here; the data primitives live in [`line`], [`bar`] and [`pie`].

pub mod bar;
pub mod line;
pub mod pie;

use svg::node::element as svg_element;
use thiserror::Error;

use tessera_core::{
    apply_stroke,
    color::{Paint, theme},
    draw::{LayeredOutput, RenderLayer, StrokeDefinition, TextAnchor, TextDefinition, format_value},
    geometry::Point,
    semantic::{ChartConfig, Series},
};

use crate::scale::{DataExtent, PlotArea, TICK_DIVISIONS};

/// Colors assigned to series and slices without an explicit color.
pub const DEFAULT_PALETTE: [&str; 7] = [
    "var(--ts-primary)",
    "var(--ts-secondary)",
    "#f85149",
    "#f0b400",
    "#40a9ff",
    "#a855f7",
    "#4ec968",
];

const TICK_LENGTH: f64 = 5.0;
const TICK_FONT_SIZE: f64 = 11.0;
const Y_LABEL_OFFSET: f64 = 10.0;
const X_LABEL_OFFSET: f64 = 20.0;
/// Nudges Y tick labels down onto their tick line.
const Y_LABEL_BASELINE: f64 = 4.0;

/// Errors raised while turning chart data into geometry.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RenderError {
    #[error("pie chart values sum to zero")]
    EmptyTotal,

    #[error("pie slice {index} has negative value {value}")]
    NegativeSlice { index: usize, value: f64 },

    #[error("series `{series}` has a non-finite value at point {index}")]
    NonFiniteValue { series: String, index: usize },

    #[error("{axis} axis range of the data is too wide to scale")]
    NonFiniteDomain { axis: &'static str },

    #[error("pie chart values overflow when summed")]
    NonFiniteTotal,

    #[error("`{name}` must be a finite, non-negative number, got {value}")]
    InvalidOption { name: &'static str, value: f64 },
}

/// Ordered list of default paints, indexed cyclically.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    paints: Vec<Paint>,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            paints: DEFAULT_PALETTE
                .iter()
                .filter_map(|raw| Paint::new(raw).ok())
                .collect(),
        }
    }
}

impl Palette {
    /// Parses a palette from paint strings.
    ///
    /// An empty list yields the default palette.
    ///
    /// # Errors
    ///
    /// Returns the message of the first entry that is not a valid paint.
    pub fn parse<S: AsRef<str>>(entries: &[S]) -> Result<Self, String> {
        if entries.is_empty() {
            return Ok(Self::default());
        }

        let paints = entries
            .iter()
            .map(|raw| Paint::new(raw.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { paints })
    }

    /// Paint for `index`, wrapping around the palette.
    pub fn get(&self, index: usize) -> &Paint {
        &self.paints[index % self.paints.len()]
    }

    /// The first palette entry, used for series without a color.
    pub fn primary(&self) -> &Paint {
        self.get(0)
    }

    pub fn len(&self) -> usize {
        self.paints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paints.is_empty()
    }
}

/// Style settings shared by all chart renderers.
#[derive(Debug, Clone, Default)]
pub struct ChartStyle {
    palette: Palette,
    background: Option<Paint>,
    font_family: Option<String>,
}

impl ChartStyle {
    pub fn new(palette: Palette) -> Self {
        Self {
            palette,
            ..Self::default()
        }
    }

    /// Fill of the frame rectangle; transparent when unset.
    pub fn with_background(mut self, background: Option<Paint>) -> Self {
        self.background = background;
        self
    }

    pub fn with_font_family(mut self, font_family: Option<String>) -> Self {
        self.font_family = font_family;
        self
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn background(&self) -> Option<&Paint> {
        self.background.as_ref()
    }

    pub fn font_family(&self) -> Option<&str> {
        self.font_family.as_deref()
    }

    /// Text definition at `font_size` carrying the configured font family.
    pub fn text(&self, font_size: f64) -> TextDefinition {
        TextDefinition::new(font_size).with_font_family(self.font_family.clone())
    }

    /// Paint of a series: its own color or the primary palette entry.
    pub fn series_paint<'a>(&'a self, series: &'a Series) -> &'a Paint {
        series.color().unwrap_or_else(|| self.palette.primary())
    }
}

/// One row of a chart legend.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    label: String,
    paint: Paint,
}

impl LegendEntry {
    pub fn new(label: impl Into<String>, paint: Paint) -> Self {
        Self {
            label: label.into(),
            paint,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn paint(&self) -> &Paint {
        &self.paint
    }
}

/// Rendered chart content, ready to be wrapped into a document.
#[derive(Debug)]
pub struct ChartScene {
    width: f64,
    height: f64,
    layers: LayeredOutput,
    legend: Vec<LegendEntry>,
}

impl ChartScene {
    /// Starts a scene of the chart's size holding only the frame.
    fn new(config: &ChartConfig, style: &ChartStyle) -> Self {
        let width = f64::from(config.width());
        let height = f64::from(config.height());

        let mut layers = LayeredOutput::new();
        let fill = style
            .background()
            .map_or("transparent", |paint| paint.as_str());
        let frame = svg_element::Rectangle::new()
            .set("width", "100%")
            .set("height", "100%")
            .set("fill", fill)
            .set("rx", 4);
        let frame = apply_stroke!(frame, &StrokeDefinition::new(theme::border(), 1.0));
        layers.add_to_layer(RenderLayer::Background, Box::new(frame));

        Self {
            width,
            height,
            layers,
            legend: Vec::new(),
        }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn layers(&self) -> &LayeredOutput {
        &self.layers
    }

    /// Legend entries; empty when the legend is disabled.
    pub fn legend(&self) -> &[LegendEntry] {
        &self.legend
    }

    /// Splits the scene into its layered primitives and legend entries.
    pub fn into_parts(self) -> (LayeredOutput, Vec<LegendEntry>) {
        (self.layers, self.legend)
    }
}

/// Rejects NaN and infinite coordinates before any geometry is built.
fn check_finite(series: &[Series]) -> Result<(), RenderError> {
    for s in series {
        if let Some(index) = s
            .points()
            .iter()
            .position(|p| !p.x().is_finite() || !p.y().is_finite())
        {
            return Err(RenderError::NonFiniteValue {
                series: s.name().to_string(),
                index,
            });
        }
    }
    Ok(())
}

/// Rejects data whose padded range overflowed to infinity.
fn check_extent(extent: &DataExtent) -> Result<(), RenderError> {
    match extent.non_finite_axis() {
        Some(axis) => Err(RenderError::NonFiniteDomain { axis }),
        None => Ok(()),
    }
}

/// Sizes and radii must be finite and non-negative.
fn check_option(name: &'static str, value: f64) -> Result<(), RenderError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(RenderError::InvalidOption { name, value })
    }
}

/// Legend entries of a line or bar chart: named series only.
fn series_legend(config: &ChartConfig, series: &[Series], style: &ChartStyle) -> Vec<LegendEntry> {
    if !config.show_legend() {
        return Vec::new();
    }

    series
        .iter()
        .filter(|s| !s.name().is_empty())
        .map(|s| LegendEntry::new(s.name(), style.series_paint(s).clone()))
        .collect()
}

/// Which gridlines a chart draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GridLines {
    Both,
    HorizontalOnly,
}

fn render_grid(area: &PlotArea, lines: GridLines, output: &mut LayeredOutput) {
    let stroke = StrokeDefinition::grid();

    for i in 0..=TICK_DIVISIONS {
        if lines == GridLines::Both {
            let x = area.tick_x(i, TICK_DIVISIONS);
            let line = svg_element::Line::new()
                .set("x1", x)
                .set("y1", area.top())
                .set("x2", x)
                .set("y2", area.bottom());
            output.add_to_layer(RenderLayer::Grid, Box::new(apply_stroke!(line, &stroke)));
        }

        let y = area.tick_y(i, TICK_DIVISIONS);
        let line = svg_element::Line::new()
            .set("x1", area.left())
            .set("y1", y)
            .set("x2", area.right())
            .set("y2", y);
        output.add_to_layer(RenderLayer::Grid, Box::new(apply_stroke!(line, &stroke)));
    }
}

fn axis_line(from: Point, to: Point, stroke: &StrokeDefinition) -> svg_element::Line {
    let line = svg_element::Line::new()
        .set("x1", from.x())
        .set("y1", from.y())
        .set("x2", to.x())
        .set("y2", to.y());
    apply_stroke!(line, stroke)
}

/// Draws both axis lines and the Y ticks with their value labels.
fn render_axes(
    area: &PlotArea,
    extent: &DataExtent,
    style: &ChartStyle,
    output: &mut LayeredOutput,
) {
    let stroke = StrokeDefinition::axis();
    let origin = Point::new(area.left(), area.bottom());

    output.add_to_layer(
        RenderLayer::Axis,
        Box::new(axis_line(origin, Point::new(area.right(), area.bottom()), &stroke)),
    );
    output.add_to_layer(
        RenderLayer::Axis,
        Box::new(axis_line(Point::new(area.left(), area.top()), origin, &stroke)),
    );

    let label = style.text(TICK_FONT_SIZE).with_anchor(TextAnchor::End);
    for (i, value) in extent.y().ticks(TICK_DIVISIONS).into_iter().enumerate() {
        let y = area.tick_y(i, TICK_DIVISIONS);
        output.add_to_layer(
            RenderLayer::Axis,
            Box::new(axis_line(
                Point::new(area.left() - TICK_LENGTH, y),
                Point::new(area.left(), y),
                &stroke,
            )),
        );
        output.add_to_layer(
            RenderLayer::Text,
            Box::new(label.render(
                Point::new(area.left() - Y_LABEL_OFFSET, y + Y_LABEL_BASELINE),
                &format_value(value),
            )),
        );
    }
}

/// Draws the X ticks with their value labels.
fn render_x_ticks(
    area: &PlotArea,
    extent: &DataExtent,
    style: &ChartStyle,
    output: &mut LayeredOutput,
) {
    let stroke = StrokeDefinition::axis();
    let label = style.text(TICK_FONT_SIZE);

    for (i, value) in extent.x().ticks(TICK_DIVISIONS).into_iter().enumerate() {
        let x = area.tick_x(i, TICK_DIVISIONS);
        output.add_to_layer(
            RenderLayer::Axis,
            Box::new(axis_line(
                Point::new(x, area.bottom()),
                Point::new(x, area.bottom() + TICK_LENGTH),
                &stroke,
            )),
        );
        output.add_to_layer(
            RenderLayer::Text,
            Box::new(label.render(
                Point::new(x, area.bottom() + X_LABEL_OFFSET),
                &format_value(value),
            )),
        );
    }
}
