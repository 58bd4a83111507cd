//! Figure file loading.
//!
//! A figure file is a TOML document whose `kind` key selects a line, bar
//! or pie chart, or a diagram. Chart keys (`title`, `width`, `series`, ...)
//! and diagram keys (`layout`, `nodes`, `edges`, ...) share one flat table;
//! keys that do not apply to the selected kind are ignored.

use std::{fs, path::Path};

use log::{debug, info};
use serde::Deserialize;

use tessera::{
    color::Paint,
    geometry::Point,
    semantic::{
        BarChart, BuildError, ChartConfig, DataPoint, DiagramBuilder, DiagramConfig, Figure,
        LayoutDirection, LayoutEngine, LineChart, PieChart, PieSlice, Series,
    },
};

use crate::error::{CliError, FigureError, TomlError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
enum FigureKind {
    Line,
    Bar,
    Pie,
    Diagram,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FigureFile {
    kind: FigureKind,
    title: Option<String>,
    width: Option<u32>,
    height: Option<u32>,
    show_grid: Option<bool>,
    show_legend: Option<bool>,
    id: Option<String>,
    classes: Option<String>,

    #[serde(default)]
    series: Vec<SeriesEntry>,

    // line
    show_points: Option<bool>,
    point_radius: Option<f64>,
    smooth: Option<bool>,

    // bar
    bar_width: Option<f64>,
    bar_spacing: Option<f64>,

    // pie
    #[serde(default)]
    slices: Vec<SliceEntry>,
    show_labels: Option<bool>,
    inner_radius: Option<f64>,

    // diagram
    layout: Option<LayoutEngine>,
    direction: Option<LayoutDirection>,
    #[serde(default)]
    nodes: Vec<NodeEntry>,
    #[serde(default)]
    edges: Vec<EdgeEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SeriesEntry {
    #[serde(default)]
    name: String,
    color: Option<String>,
    #[serde(default)]
    points: Vec<PointEntry>,
    /// Shorthand for points at x = 0, 1, 2, ...
    #[serde(default)]
    values: Vec<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PointEntry {
    x: f64,
    y: f64,
    label: Option<String>,
    color: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SliceEntry {
    label: String,
    value: f64,
    color: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct NodeEntry {
    id: String,
    label: Option<String>,
    x: Option<f64>,
    y: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct EdgeEntry {
    from: String,
    to: String,
    label: Option<String>,
}

/// Reads and converts the figure file at `path`.
///
/// # Errors
///
/// Returns [`CliError::Io`] if the file cannot be read, and
/// [`CliError::Figure`] if it is not a valid figure.
pub fn load_figure(path: impl AsRef<Path>) -> Result<Figure, CliError> {
    let path = path.as_ref();
    info!(path = path.display().to_string(); "Loading figure file");

    let src = fs::read_to_string(path)?;
    let figure = parse_figure(&path.display().to_string(), &src)?;
    debug!(kind = figure.kind_name(); "Figure loaded");

    Ok(figure)
}

/// Parses figure TOML; `name` labels error snippets.
///
/// # Errors
///
/// Returns [`FigureError::Parse`] for malformed TOML or unknown keys,
/// [`FigureError::Build`] for values the figure model rejects, and
/// [`FigureError::PartialPosition`] for a node with only one coordinate.
pub fn parse_figure(name: &str, src: &str) -> Result<Figure, FigureError> {
    let file: FigureFile =
        toml::from_str(src).map_err(|err| FigureError::Parse(TomlError::new(name, src, &err)))?;
    file.into_figure()
}

fn paint(raw: Option<&str>) -> Result<Option<Paint>, FigureError> {
    raw.map(Paint::new)
        .transpose()
        .map_err(|err| BuildError::InvalidPaint(err).into())
}

impl SeriesEntry {
    fn into_series(self) -> Result<Series, FigureError> {
        let mut series = Series::new(self.name);
        if let Some(color) = paint(self.color.as_deref())? {
            series = series.with_color(color);
        }

        let shorthand = self
            .values
            .iter()
            .enumerate()
            .map(|(i, &y)| DataPoint::new(i as f64, y));
        series = series.with_points(shorthand);

        for entry in self.points {
            let mut point = DataPoint::new(entry.x, entry.y);
            if let Some(label) = entry.label {
                point = point.with_label(label);
            }
            if let Some(color) = paint(entry.color.as_deref())? {
                point = point.with_color(color);
            }
            series = series.with_point(point);
        }

        Ok(series)
    }
}

impl FigureFile {
    fn chart_config(&self) -> ChartConfig {
        let defaults = ChartConfig::default();
        let mut config = defaults
            .clone()
            .with_size(
                self.width.unwrap_or(defaults.width()),
                self.height.unwrap_or(defaults.height()),
            )
            .with_grid(self.show_grid.unwrap_or(defaults.show_grid()))
            .with_legend(self.show_legend.unwrap_or(defaults.show_legend()));

        if let Some(title) = &self.title {
            config = config.with_title(title);
        }
        if let Some(id) = &self.id {
            config = config.with_id(id);
        }
        if let Some(classes) = &self.classes {
            config = config.with_classes(classes);
        }
        config
    }

    fn series(self) -> Result<Vec<Series>, FigureError> {
        self.series.into_iter().map(SeriesEntry::into_series).collect()
    }

    fn into_figure(self) -> Result<Figure, FigureError> {
        let kind = self.kind;
        match kind {
            FigureKind::Line => {
                let mut chart = LineChart::new(self.chart_config());
                if let Some(show) = self.show_points {
                    chart = chart.with_points_shown(show);
                }
                if let Some(radius) = self.point_radius {
                    chart = chart.with_point_radius(radius);
                }
                if let Some(smooth) = self.smooth {
                    chart = chart.with_smoothing(smooth);
                }
                let chart = self.series()?.into_iter().fold(chart, LineChart::add_series);
                Ok(chart.into())
            }
            FigureKind::Bar => {
                let mut chart = BarChart::new(self.chart_config());
                if let Some(width) = self.bar_width {
                    chart = chart.with_bar_width(width);
                }
                if let Some(spacing) = self.bar_spacing {
                    chart = chart.with_bar_spacing(spacing);
                }
                let chart = self.series()?.into_iter().fold(chart, BarChart::add_series);
                Ok(chart.into())
            }
            FigureKind::Pie => {
                let mut chart = PieChart::new(self.chart_config());
                if let Some(show) = self.show_labels {
                    chart = chart.with_labels(show);
                }
                if let Some(radius) = self.inner_radius {
                    chart = chart.with_inner_radius(radius);
                }
                for entry in &self.slices {
                    let mut slice = PieSlice::new(&entry.label, entry.value);
                    if let Some(color) = paint(entry.color.as_deref())? {
                        slice = slice.with_color(color);
                    }
                    chart = chart.add_slice(slice);
                }
                let chart = self.series()?.into_iter().fold(chart, PieChart::add_series);
                Ok(chart.into())
            }
            FigureKind::Diagram => self.into_diagram(),
        }
    }

    fn into_diagram(self) -> Result<Figure, FigureError> {
        let mut config = DiagramConfig::default();
        if self.width.is_some() || self.height.is_some() {
            let width = self.width.unwrap_or(config.width());
            let height = self.height.unwrap_or(config.height());
            config = config.with_size(width, height);
        }
        if let Some(title) = &self.title {
            config = config.with_title(title);
        }

        let mut builder = DiagramBuilder::new(config);
        for node in self.nodes {
            let label = node.label.unwrap_or_else(|| node.id.clone());
            builder = match (node.x, node.y) {
                (Some(x), Some(y)) => builder.node_at(node.id, label, Point::new(x, y)),
                (None, None) => builder.node(node.id, label),
                _ => return Err(FigureError::PartialPosition { node: node.id }),
            };
        }
        for edge in &self.edges {
            builder = builder.edge(edge.from.as_str(), edge.to.as_str(), edge.label.as_deref());
        }
        if let Some(layout) = self.layout {
            builder = builder.layout(layout);
        }
        if let Some(direction) = self.direction {
            builder = builder.direction(direction);
        }

        Ok(builder.build()?.into())
    }
}
