//! Configuration types for Tessera rendering.
//!
//! This module provides configuration structures that control how figures
//! are laid out and styled. All types implement [`serde::Deserialize`] for
//! loading from external sources such as TOML files.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level application configuration combining layout and style settings.
//! - [`LayoutConfig`] - Default [`LayoutEngine`], direction and spacing for diagrams.
//! - [`StyleConfig`] - Palette, background color and font family.
//!
//! # Example
//!
//! ```
//! # use tessera::config::AppConfig;
//! let config = AppConfig::default();
//! assert!(config.style().background_color().is_ok());
//! assert_eq!(config.layout().rank_spacing(), 160.0);
//! ```

use serde::Deserialize;

use tessera_core::{
    color::Paint,
    semantic::{LayoutDirection, LayoutEngine},
};

use crate::chart::{ChartStyle, Palette};

/// Top-level application configuration combining layout and style settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified layout and style configurations.
    pub fn new(layout: LayoutConfig, style: StyleConfig) -> Self {
        Self { layout, style }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }
}

/// Diagram layout defaults.
///
/// The engine and direction apply to diagrams that do not choose their own.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    engine: LayoutEngine,
    direction: LayoutDirection,
    /// Distance between consecutive ranks of a hierarchical layout.
    rank_spacing: f64,
    /// Minimum distance between nodes sharing a rank.
    sibling_spacing: f64,
    /// Space kept free around the laid out nodes.
    padding: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            engine: LayoutEngine::default(),
            direction: LayoutDirection::default(),
            rank_spacing: 160.0,
            sibling_spacing: 80.0,
            padding: 40.0,
        }
    }
}

impl LayoutConfig {
    pub fn with_engine(mut self, engine: LayoutEngine) -> Self {
        self.engine = engine;
        self
    }

    pub fn with_direction(mut self, direction: LayoutDirection) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_rank_spacing(mut self, spacing: f64) -> Self {
        self.rank_spacing = spacing;
        self
    }

    pub fn with_sibling_spacing(mut self, spacing: f64) -> Self {
        self.sibling_spacing = spacing;
        self
    }

    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding = padding;
        self
    }

    /// Returns the default [`LayoutEngine`].
    pub fn engine(&self) -> LayoutEngine {
        self.engine
    }

    /// Returns the default [`LayoutDirection`].
    pub fn direction(&self) -> LayoutDirection {
        self.direction
    }

    pub fn rank_spacing(&self) -> f64 {
        self.rank_spacing
    }

    pub fn sibling_spacing(&self) -> f64 {
        self.sibling_spacing
    }

    pub fn padding(&self) -> f64 {
        self.padding
    }

    /// Checks that every spacing is a finite, non-negative number.
    ///
    /// # Errors
    ///
    /// Returns a message naming the first offending setting.
    pub fn validate(&self) -> Result<(), String> {
        let settings = [
            ("rank_spacing", self.rank_spacing),
            ("sibling_spacing", self.sibling_spacing),
            ("padding", self.padding),
        ];
        match settings
            .into_iter()
            .find(|(_, value)| !value.is_finite() || *value < 0.0)
        {
            Some((name, value)) => Err(format!(
                "Invalid layout {name} in config: expected a finite, non-negative number, got {value}"
            )),
            None => Ok(()),
        }
    }
}

/// Visual styling configuration.
///
/// Values are kept as written and validated when rendering starts, so a
/// bad color is reported together with the rest of the render errors.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct StyleConfig {
    /// Default series and slice colors; empty means the built-in palette.
    #[serde(default)]
    palette: Vec<String>,

    /// Fill of the chart frame, as a paint string.
    #[serde(default)]
    background_color: Option<String>,

    /// `font-family` applied to all text.
    #[serde(default)]
    font_family: Option<String>,
}

impl StyleConfig {
    pub fn with_palette<S: Into<String>>(mut self, palette: impl IntoIterator<Item = S>) -> Self {
        self.palette = palette.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_background_color(mut self, color: impl Into<String>) -> Self {
        self.background_color = Some(color.into());
        self
    }

    pub fn with_font_family(mut self, family: impl Into<String>) -> Self {
        self.font_family = Some(family.into());
        self
    }

    /// Returns the parsed palette.
    ///
    /// # Errors
    ///
    /// Returns an error if a palette entry is not a valid paint.
    pub fn palette(&self) -> Result<Palette, String> {
        Palette::parse(self.palette.as_slice())
            .map_err(|err| format!("Invalid palette in config: {err}"))
    }

    /// Returns the parsed background [`Paint`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn background_color(&self) -> Result<Option<Paint>, String> {
        self.background_color
            .as_deref()
            .map(Paint::new)
            .transpose()
            .map_err(|err| format!("Invalid background color in config: {err}"))
    }

    pub fn font_family(&self) -> Option<&str> {
        self.font_family.as_deref()
    }

    /// Resolves everything chart renderers need.
    ///
    /// # Errors
    ///
    /// Returns an error if the palette or background color is invalid.
    pub fn chart_style(&self) -> Result<ChartStyle, String> {
        Ok(ChartStyle::new(self.palette()?)
            .with_background(self.background_color()?)
            .with_font_family(self.font_family.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_defaults() {
        let layout = LayoutConfig::default();
        assert_eq!(layout.engine(), LayoutEngine::Hierarchical);
        assert_eq!(layout.direction(), LayoutDirection::LeftToRight);
        assert_eq!(layout.sibling_spacing(), 80.0);
        assert_eq!(layout.padding(), 40.0);

        let layout = layout
            .with_engine(LayoutEngine::Circular)
            .with_direction(LayoutDirection::TopToBottom);
        assert_eq!(layout.engine(), LayoutEngine::Circular);
        assert_eq!(layout.direction(), LayoutDirection::TopToBottom);
        assert_eq!(layout.validate(), Ok(()));
    }

    #[test]
    fn test_layout_invalid_spacing() {
        let err = LayoutConfig::default()
            .with_rank_spacing(f64::NAN)
            .validate()
            .unwrap_err();
        assert!(err.starts_with("Invalid layout rank_spacing in config"));

        let layout = LayoutConfig::default().with_padding(-5.0);
        assert!(layout.validate().unwrap_err().contains("padding"));
    }

    #[test]
    fn test_style_invalid_values() {
        let style = StyleConfig::default().with_background_color("nope");
        let err = style.background_color().unwrap_err();
        assert!(err.starts_with("Invalid background color in config"));
        assert!(style.chart_style().is_err());

        let style = StyleConfig::default().with_palette(["#fff", "bogus"]);
        assert!(style.palette().unwrap_err().contains("Invalid palette"));
    }

    #[test]
    fn test_chart_style_from_config() {
        let style = StyleConfig::default()
            .with_palette(["#111111", "#222222"])
            .with_background_color("var(--ts-bg-card)")
            .with_font_family("Inter");
        let chart_style = style.chart_style().unwrap();

        assert_eq!(chart_style.palette().len(), 2);
        assert_eq!(chart_style.palette().primary().as_str(), "#111111");
        assert_eq!(
            chart_style.background().map(Paint::as_str),
            Some("var(--ts-bg-card)")
        );
        assert_eq!(chart_style.font_family(), Some("Inter"));
    }
}
