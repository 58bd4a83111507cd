//! Chart data model: points, series and the three chart kinds.
//!
//! Charts are plain values assembled with `new` plus `with_*`/`add_*`
//! methods. Nothing here validates numeric data; non-finite values and
//! degenerate pie totals are reported by the renderer.

use crate::color::Paint;

/// A single data point.
///
/// For pie charts only `y` is used, as the slice value.
#[derive(Debug, Clone, PartialEq)]
pub struct DataPoint {
    x: f64,
    y: f64,
    label: Option<String>,
    color: Option<Paint>,
}

impl DataPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            label: None,
            color: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_color(mut self, color: Paint) -> Self {
        self.color = Some(color);
        self
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn color(&self) -> Option<&Paint> {
        self.color.as_ref()
    }
}

/// A named, ordered collection of points sharing a visual style.
///
/// # Examples
///
/// ```
/// use tessera_core::semantic::Series;
///
/// let series = Series::from_values("visits", &[125.0, 89.0, 156.0]);
/// assert_eq!(series.len(), 3);
/// assert_eq!(series.points()[2].x(), 2.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Series {
    name: String,
    points: Vec<DataPoint>,
    color: Option<Paint>,
}

impl Series {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Series whose points have `x = index` and `y = value`.
    pub fn from_values(name: impl Into<String>, values: &[f64]) -> Self {
        Self::new(name).with_points(
            values
                .iter()
                .enumerate()
                .map(|(i, &y)| DataPoint::new(i as f64, y)),
        )
    }

    pub fn with_points(mut self, points: impl IntoIterator<Item = DataPoint>) -> Self {
        self.points.extend(points);
        self
    }

    pub fn with_point(mut self, point: DataPoint) -> Self {
        self.points.push(point);
        self
    }

    pub fn with_color(mut self, color: Paint) -> Self {
        self.color = Some(color);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn points(&self) -> &[DataPoint] {
        &self.points
    }

    pub fn color(&self) -> Option<&Paint> {
        self.color.as_ref()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Settings shared by all series of a chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartConfig {
    width: u32,
    height: u32,
    title: Option<String>,
    show_grid: bool,
    show_legend: bool,
    id: Option<String>,
    classes: Option<String>,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 400,
            height: 300,
            title: None,
            show_grid: true,
            show_legend: true,
            id: None,
            classes: None,
        }
    }
}

impl ChartConfig {
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_grid(mut self, show: bool) -> Self {
        self.show_grid = show;
        self
    }

    pub fn with_legend(mut self, show: bool) -> Self {
        self.show_legend = show;
        self
    }

    /// Sets the `id` attribute of the HTML container.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Extra CSS classes for the HTML container.
    pub fn with_classes(mut self, classes: impl Into<String>) -> Self {
        self.classes = Some(classes.into());
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

    pub fn show_grid(&self) -> bool {
        self.show_grid
    }

    pub fn show_legend(&self) -> bool {
        self.show_legend
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn classes(&self) -> Option<&str> {
        self.classes.as_deref()
    }
}

/// Polyline chart with optional point markers.
#[derive(Debug, Clone, PartialEq)]
pub struct LineChart {
    config: ChartConfig,
    series: Vec<Series>,
    show_points: bool,
    point_radius: f64,
    smooth: bool,
}

impl LineChart {
    pub fn new(config: ChartConfig) -> Self {
        Self {
            config,
            series: Vec::new(),
            show_points: true,
            point_radius: 3.0,
            smooth: false,
        }
    }

    pub fn add_series(mut self, series: Series) -> Self {
        self.series.push(series);
        self
    }

    pub fn with_points_shown(mut self, show: bool) -> Self {
        self.show_points = show;
        self
    }

    pub fn with_point_radius(mut self, radius: f64) -> Self {
        self.point_radius = radius;
        self
    }

    /// Draws cubic segments through the points instead of straight lines.
    pub fn with_smoothing(mut self, smooth: bool) -> Self {
        self.smooth = smooth;
        self
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    pub fn series(&self) -> &[Series] {
        &self.series
    }

    pub fn show_points(&self) -> bool {
        self.show_points
    }

    pub fn point_radius(&self) -> f64 {
        self.point_radius
    }

    pub fn smooth(&self) -> bool {
        self.smooth
    }
}

/// Vertical bar chart. Multiple series are drawn as side-by-side groups.
#[derive(Debug, Clone, PartialEq)]
pub struct BarChart {
    config: ChartConfig,
    series: Vec<Series>,
    bar_width: f64,
    bar_spacing: f64,
}

impl BarChart {
    pub fn new(config: ChartConfig) -> Self {
        Self {
            config,
            series: Vec::new(),
            bar_width: 30.0,
            bar_spacing: 10.0,
        }
    }

    pub fn add_series(mut self, series: Series) -> Self {
        self.series.push(series);
        self
    }

    pub fn with_bar_width(mut self, width: f64) -> Self {
        self.bar_width = width;
        self
    }

    /// Gap between neighbouring bar groups.
    pub fn with_bar_spacing(mut self, spacing: f64) -> Self {
        self.bar_spacing = spacing;
        self
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    pub fn series(&self) -> &[Series] {
        &self.series
    }

    pub fn bar_width(&self) -> f64 {
        self.bar_width
    }

    pub fn bar_spacing(&self) -> f64 {
        self.bar_spacing
    }
}

/// One labeled value of a pie chart.
#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    label: String,
    value: f64,
    color: Option<Paint>,
}

impl PieSlice {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
            color: None,
        }
    }

    pub fn with_color(mut self, color: Paint) -> Self {
        self.color = Some(color);
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn color(&self) -> Option<&Paint> {
        self.color.as_ref()
    }
}

/// Pie or donut chart over a flat list of slices.
///
/// # Examples
///
/// ```
/// use tessera_core::semantic::{ChartConfig, DataPoint, PieChart, Series};
///
/// let browsers = Series::new("share")
///     .with_point(DataPoint::new(0.0, 60.0).with_label("Chrome"))
///     .with_point(DataPoint::new(1.0, 40.0));
///
/// let pie = PieChart::new(ChartConfig::default()).add_series(browsers);
/// assert_eq!(pie.slices().len(), 2);
/// assert_eq!(pie.slices()[0].label(), "Chrome");
/// assert_eq!(pie.slices()[1].label(), "Slice 2");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PieChart {
    config: ChartConfig,
    slices: Vec<PieSlice>,
    show_labels: bool,
    inner_radius: f64,
}

impl PieChart {
    pub fn new(config: ChartConfig) -> Self {
        Self {
            config,
            slices: Vec::new(),
            show_labels: true,
            inner_radius: 0.0,
        }
    }

    pub fn add_slice(mut self, slice: PieSlice) -> Self {
        self.slices.push(slice);
        self
    }

    /// Adds one slice per point of `series`, using `y` as the value.
    ///
    /// Unlabeled points are named `Slice {n}` after their position in the
    /// series. Point colors carry over; uncolored slices get a palette
    /// color at render time.
    pub fn add_series(mut self, series: Series) -> Self {
        let slices = series.points().iter().enumerate().map(|(i, point)| {
            let label = point
                .label()
                .map_or_else(|| format!("Slice {}", i + 1), str::to_string);
            PieSlice {
                label,
                value: point.y(),
                color: point.color().cloned(),
            }
        });
        self.slices.extend(slices);
        self
    }

    pub fn with_labels(mut self, show: bool) -> Self {
        self.show_labels = show;
        self
    }

    /// Radius of the donut hole; 0 draws a full pie.
    pub fn with_inner_radius(mut self, radius: f64) -> Self {
        self.inner_radius = radius;
        self
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    pub fn slices(&self) -> &[PieSlice] {
        &self.slices
    }

    pub fn show_labels(&self) -> bool {
        self.show_labels
    }

    pub fn inner_radius(&self) -> f64 {
        self.inner_radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chart_config_defaults() {
        let config = ChartConfig::default();
        assert_eq!(config.width(), 400);
        assert_eq!(config.height(), 300);
        assert!(config.show_grid());
        assert!(config.show_legend());
        assert_eq!(config.title(), None);
    }

    #[test]
    fn test_line_chart_defaults() {
        let chart = LineChart::new(ChartConfig::default());
        assert!(chart.show_points());
        assert_eq!(chart.point_radius(), 3.0);
        assert!(!chart.smooth());
        assert!(chart.series().is_empty());
    }

    #[test]
    fn test_bar_chart_defaults() {
        let chart = BarChart::new(ChartConfig::default());
        assert_eq!(chart.bar_width(), 30.0);
        assert_eq!(chart.bar_spacing(), 10.0);
    }

    #[test]
    fn test_series_keeps_point_order() {
        let series = Series::new("s")
            .with_point(DataPoint::new(3.0, 1.0))
            .with_point(DataPoint::new(1.0, 2.0));
        let xs: Vec<f64> = series.points().iter().map(DataPoint::x).collect();
        assert_eq!(xs, vec![3.0, 1.0]);
    }

    #[test]
    fn test_pie_add_series_carries_colors() {
        let red = Paint::new("#f85149").unwrap();
        let series = Series::new("s")
            .with_point(DataPoint::new(0.0, 1.0).with_color(red.clone()))
            .with_point(DataPoint::new(1.0, 2.0));

        let pie = PieChart::new(ChartConfig::default()).add_series(series);
        assert_eq!(pie.slices()[0].color(), Some(&red));
        assert_eq!(pie.slices()[1].color(), None);
        assert_eq!(pie.slices()[1].value(), 2.0);
    }

    #[test]
    fn test_pie_add_series_names_restart_per_series() {
        let pie = PieChart::new(ChartConfig::default())
            .add_series(Series::from_values("a", &[1.0]))
            .add_series(Series::from_values("b", &[2.0]));
        let labels: Vec<&str> = pie.slices().iter().map(PieSlice::label).collect();
        assert_eq!(labels, vec!["Slice 1", "Slice 1"]);
    }
}
