//! Stroke and line-style definitions.
//!
//! Every line Tessera draws (axes, gridlines, series paths, edges) is
//! described by a [`StrokeDefinition`] and applied to an SVG element with
//! the [`apply_stroke!`](crate::apply_stroke!) macro.
//!
//! | Rust Property | SVG Attribute |
//! |--------------|---------------|
//! | `paint` | `stroke` |
//! | `width` | `stroke-width` |
//! | `opacity` | `stroke-opacity` (omitted when 1) |
//! | `style` | `stroke-dasharray` (omitted when solid) |

use std::str::FromStr;

use crate::color::{Paint, theme};

/// Line pattern of a stroke.
#[derive(Debug, Default, Clone, PartialEq)]
pub enum StrokeStyle {
    /// Solid continuous line (default)
    #[default]
    Solid,
    /// 5px dash, 5px gap
    Dashed,
    /// 2px dot, 3px gap
    Dotted,
    /// Custom SVG dasharray pattern, e.g. "10,5,2,3"
    Custom(String),
}

impl FromStr for StrokeStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "solid" => Ok(Self::Solid),
            "dashed" => Ok(Self::Dashed),
            "dotted" => Ok(Self::Dotted),
            _ => Ok(Self::Custom(s.to_string())),
        }
    }
}

impl StrokeStyle {
    /// Returns the SVG dasharray value for this style, or None for solid lines
    pub fn to_svg_value(&self) -> Option<String> {
        match self {
            Self::Solid => None,
            Self::Dashed => Some("5,5".to_string()),
            Self::Dotted => Some("2,3".to_string()),
            Self::Custom(pattern) => Some(pattern.clone()),
        }
    }
}

/// A stroke definition for rendering lines and borders.
///
/// # Examples
///
/// ```
/// use tessera_core::color::Paint;
/// use tessera_core::draw::{StrokeDefinition, StrokeStyle};
///
/// let stroke = StrokeDefinition::new(Paint::new("var(--ts-primary)").unwrap(), 2.0);
/// assert_eq!(stroke.width(), 2.0);
///
/// let grid = StrokeDefinition::new(Paint::theme("ts-border"), 0.5).with_opacity(0.3);
/// assert_eq!(grid.opacity(), 0.3);
/// assert_eq!(*grid.style(), StrokeStyle::Solid);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeDefinition {
    paint: Paint,
    width: f64,
    opacity: f64,
    style: StrokeStyle,
}

impl StrokeDefinition {
    /// Creates a solid, fully opaque stroke.
    pub fn new(paint: Paint, width: f64) -> Self {
        Self {
            paint,
            width,
            opacity: 1.0,
            style: StrokeStyle::Solid,
        }
    }

    /// Thin translucent stroke used for gridlines.
    pub fn grid() -> Self {
        Self::new(theme::border(), 0.5).with_opacity(0.3)
    }

    /// One pixel stroke in the text color used for axes and tick marks.
    pub fn axis() -> Self {
        Self::new(theme::text(), 1.0)
    }

    /// Returns a copy with the given opacity.
    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    /// Returns a copy with the given line pattern.
    pub fn with_style(mut self, style: StrokeStyle) -> Self {
        self.style = style;
        self
    }

    pub fn paint(&self) -> &Paint {
        &self.paint
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn opacity(&self) -> f64 {
        self.opacity
    }

    pub fn style(&self) -> &StrokeStyle {
        &self.style
    }
}

impl Default for StrokeDefinition {
    fn default() -> Self {
        Self::axis()
    }
}

/// Apply all stroke attributes to an SVG element.
///
/// # Examples
///
/// ```
/// use tessera_core::draw::StrokeDefinition;
/// use svg::node::element as svg_element;
///
/// let stroke = StrokeDefinition::grid();
/// let line = svg_element::Line::new()
///     .set("x1", 0)
///     .set("x2", 100);
///
/// let line = tessera_core::apply_stroke!(line, &stroke);
/// assert!(line.to_string().contains("stroke-opacity=\"0.3\""));
/// ```
#[macro_export]
macro_rules! apply_stroke {
    ($element:expr, $stroke:expr) => {{
        let mut elem = $element
            .set("stroke", $stroke.paint().as_str())
            .set("stroke-width", $stroke.width());

        if $stroke.opacity() < 1.0 {
            elem = elem.set("stroke-opacity", $stroke.opacity());
        }

        if let Some(dasharray) = $stroke.style().to_svg_value() {
            elem = elem.set("stroke-dasharray", dasharray);
        }

        elem
    }};
}
