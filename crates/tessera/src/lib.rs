//! Tessera - Chart and diagram geometry rendered to static SVG and HTML.
//!
//! Line, bar and pie charts are scaled into a fixed plot area; node-link
//! diagrams are laid out by a hierarchical, circular or manual engine.
//! Everything is rendered in memory to an SVG document, an embeddable HTML
//! fragment or a standalone HTML page.

pub mod chart;
pub mod config;
pub mod export;
pub mod graph;
pub mod layout;
pub mod scale;

mod error;

pub use tessera_core::{color, draw, geometry, semantic};

pub use error::TesseraError;

use log::{debug, info, trace};
use svg::Document;

use config::AppConfig;
use export::{Exporter, Format, html};
use semantic::{ChartConfig, Figure};

/// Renders figures to markup.
///
/// # Examples
///
/// ```
/// use tessera::{
///     Renderer,
///     semantic::{ChartConfig, Figure, LineChart, Series},
/// };
///
/// let chart = LineChart::new(ChartConfig::default().with_title("Revenue"))
///     .add_series(Series::from_values("2024", &[125.0, 89.0, 156.0]));
///
/// let svg = Renderer::default()
///     .render_svg(&Figure::from(chart))
///     .expect("Failed to render");
/// assert!(svg.contains("class=\"ts-chart\""));
/// ```
#[derive(Debug, Default)]
pub struct Renderer {
    config: AppConfig,
}

impl Renderer {
    /// Create a new renderer with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Application configuration including layout and style settings
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Render a figure to a standalone SVG document.
    ///
    /// The document carries a `<title>` when the figure has one, and the
    /// legend is drawn inside the SVG.
    ///
    /// # Errors
    ///
    /// Returns `TesseraError` for invalid style configuration, chart data
    /// that cannot be drawn, or diagrams the layout cannot order.
    pub fn render_svg(&self, figure: &Figure) -> Result<String, TesseraError> {
        info!(kind = figure.kind_name(); "Rendering SVG document");
        let (doc, _) = self.draw(figure, true)?;

        let markup = doc.to_string();
        debug!(bytes = markup.len(); "SVG rendered");
        Ok(markup)
    }

    /// Render a figure to an embeddable HTML fragment.
    ///
    /// The title and legend are plain HTML around the inline SVG.
    ///
    /// # Errors
    ///
    /// Same as [`Renderer::render_svg`].
    pub fn render_html(&self, figure: &Figure) -> Result<String, TesseraError> {
        info!(kind = figure.kind_name(); "Rendering HTML fragment");
        let (doc, legend) = self.draw(figure, false)?;

        let config = chart_config(figure);
        let container = html::Container::new(figure.kind_name())
            .with_title(figure.title())
            .with_id(config.and_then(ChartConfig::id))
            .with_classes(config.and_then(ChartConfig::classes));

        let markup = html::fragment(&container, &doc.to_string(), &legend);
        debug!(bytes = markup.len(); "HTML fragment rendered");
        Ok(markup)
    }

    /// Render a figure to a standalone HTML page.
    ///
    /// The page defines default values for the `--ts-*` theme variables.
    ///
    /// # Errors
    ///
    /// Same as [`Renderer::render_svg`].
    pub fn render_page(&self, figure: &Figure) -> Result<String, TesseraError> {
        let body = self.render_html(figure)?;
        Ok(html::page(figure.title(), &body))
    }

    /// Render a figure in `format`.
    ///
    /// # Errors
    ///
    /// Same as [`Renderer::render_svg`].
    pub fn render(&self, figure: &Figure, format: Format) -> Result<String, TesseraError> {
        match format {
            Format::Svg => self.render_svg(figure),
            Format::Html => self.render_html(figure),
            Format::Page => self.render_page(figure),
        }
    }

    /// Render a figure and hand the markup to `exporter`.
    ///
    /// Nothing reaches the exporter when rendering fails.
    ///
    /// # Errors
    ///
    /// Rendering errors as for [`Renderer::render_svg`], plus the
    /// exporter's own failures.
    pub fn export(
        &self,
        figure: &Figure,
        format: Format,
        exporter: &dyn Exporter,
    ) -> Result<(), TesseraError> {
        let markup = self.render(figure, format)?;
        exporter.export(&markup)?;
        info!(format:%; "Figure exported");
        Ok(())
    }

    /// Builds the SVG document and the legend entries of a figure.
    fn draw(
        &self,
        figure: &Figure,
        embed_legend: bool,
    ) -> Result<(Document, Vec<chart::LegendEntry>), TesseraError> {
        let style = self
            .config
            .style()
            .chart_style()
            .map_err(TesseraError::Config)?;
        let svg_title = if embed_legend { figure.title() } else { None };

        let scene = match figure {
            Figure::Line(c) => chart::line::render(c, &style)?,
            Figure::Bar(c) => chart::bar::render(c, &style)?,
            Figure::Pie(c) => chart::pie::render(c, &style)?,
            Figure::Diagram(diagram) => {
                let graph = graph::DiagramGraph::from_diagram(diagram);
                let layout_config = self.config.layout();
                layout_config.validate().map_err(TesseraError::Config)?;
                let engine_builder = layout::EngineBuilder::new()
                    .with_padding(layout_config.padding())
                    .with_rank_spacing(layout_config.rank_spacing())
                    .with_sibling_spacing(layout_config.sibling_spacing())
                    .with_direction(layout_config.direction());

                let layout = engine_builder.calculate(&graph, layout_config.engine())?;
                info!(nodes = layout.nodes().len(); "Layout calculated");

                let doc = export::svg::diagram_document(&layout, svg_title, &style);
                return Ok((doc, Vec::new()));
            }
        };

        trace!(width = scene.width(), height = scene.height(); "Chart scene built");
        let legend = scene.legend().to_vec();
        let doc = export::svg::chart_document(scene, svg_title, &style, embed_legend);
        Ok((doc, legend))
    }
}

fn chart_config(figure: &Figure) -> Option<&ChartConfig> {
    match figure {
        Figure::Line(c) => Some(c.config()),
        Figure::Bar(c) => Some(c.config()),
        Figure::Pie(c) => Some(c.config()),
        Figure::Diagram(_) => None,
    }
}
