//! Text styling for tick labels, value labels and node labels.

use svg::node::element as svg_element;

use crate::{
    color::{Paint, theme},
    geometry::Point,
};

/// Average glyph advance relative to the font size for sans-serif text.
const AVERAGE_GLYPH_WIDTH: f64 = 0.6;

/// Horizontal alignment relative to the anchor point (`text-anchor`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    #[default]
    Middle,
    End,
}

impl TextAnchor {
    pub fn to_svg_value(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Middle => "middle",
            Self::End => "end",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

/// Visual properties of a text element.
///
/// # Examples
///
/// ```
/// use tessera_core::draw::{TextAnchor, TextDefinition};
/// use tessera_core::geometry::Point;
///
/// let def = TextDefinition::new(11.0).with_anchor(TextAnchor::End);
/// let text = def.render(Point::new(50.0, 20.0), "12.5");
/// let markup = text.to_string();
/// assert!(markup.contains("text-anchor=\"end\""));
/// assert!(markup.contains("12.5"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TextDefinition {
    font_size: f64,
    anchor: TextAnchor,
    weight: FontWeight,
    fill: Paint,
    font_family: Option<String>,
    centered_vertically: bool,
}

impl TextDefinition {
    /// Normal weight, middle-anchored text in the theme text color.
    pub fn new(font_size: f64) -> Self {
        Self {
            font_size,
            anchor: TextAnchor::Middle,
            weight: FontWeight::Normal,
            fill: theme::text(),
            font_family: None,
            centered_vertically: false,
        }
    }

    pub fn with_anchor(mut self, anchor: TextAnchor) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn with_weight(mut self, weight: FontWeight) -> Self {
        self.weight = weight;
        self
    }

    pub fn with_fill(mut self, fill: Paint) -> Self {
        self.fill = fill;
        self
    }

    pub fn with_font_family(mut self, family: Option<String>) -> Self {
        self.font_family = family;
        self
    }

    /// Centers the glyphs on the anchor point vertically (`dominant-baseline="middle"`).
    pub fn centered_vertically(mut self) -> Self {
        self.centered_vertically = true;
        self
    }

    pub fn font_size(&self) -> f64 {
        self.font_size
    }

    pub fn anchor(&self) -> TextAnchor {
        self.anchor
    }

    /// Renders `content` at `position`.
    pub fn render(&self, position: Point, content: &str) -> svg_element::Text {
        let mut text = svg_element::Text::new(content)
            .set("x", position.x())
            .set("y", position.y())
            .set("text-anchor", self.anchor.to_svg_value())
            .set("fill", &self.fill)
            .set("font-size", self.font_size);

        if self.centered_vertically {
            text = text.set("dominant-baseline", "middle");
        }
        if self.weight == FontWeight::Bold {
            text = text.set("font-weight", "bold");
        }
        if let Some(family) = &self.font_family {
            text = text.set("font-family", family.as_str());
        }

        text
    }
}

/// Formats a numeric label with one decimal place.
///
/// Negative zero is printed as `0.0`.
///
/// ```
/// # use tessera_core::draw::format_value;
/// assert_eq!(format_value(156.0), "156.0");
/// assert_eq!(format_value(43.25), "43.2");
/// assert_eq!(format_value(-0.04), "0.0");
/// ```
pub fn format_value(value: f64) -> String {
    let formatted = format!("{value:.1}");
    if formatted == "-0.0" {
        "0.0".to_string()
    } else {
        formatted
    }
}

/// Rough width in pixels of `text` rendered at `font_size`.
///
/// There is no font shaping here; the estimate assumes an average glyph
/// advance, which is enough to size diagram node boxes.
pub fn estimate_text_width(text: &str, font_size: f64) -> f64 {
    text.chars().count() as f64 * font_size * AVERAGE_GLYPH_WIDTH
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_render_attributes() {
        let def = TextDefinition::new(12.0)
            .with_weight(FontWeight::Bold)
            .centered_vertically();
        let markup = def.render(Point::new(10.0, 20.0), "40.0%").to_string();

        assert!(markup.contains("x=\"10\""));
        assert!(markup.contains("y=\"20\""));
        assert!(markup.contains("font-weight=\"bold\""));
        assert!(markup.contains("dominant-baseline=\"middle\""));
        assert!(markup.contains("fill=\"var(--ts-text)\""));
        assert!(markup.contains("40.0%"));
    }

    #[test]
    fn test_text_font_family_optional() {
        let plain = TextDefinition::new(11.0).render(Point::default(), "a").to_string();
        assert!(!plain.contains("font-family"));

        let styled = TextDefinition::new(11.0)
            .with_font_family(Some("Inter".to_string()))
            .render(Point::default(), "a")
            .to_string();
        assert!(styled.contains("font-family=\"Inter\""));
    }

    #[test]
    fn test_format_value_rounding() {
        assert_eq!(format_value(0.0), "0.0");
        assert_eq!(format_value(99.96), "100.0");
        assert_eq!(format_value(-12.34), "-12.3");
    }

    #[test]
    fn test_estimate_text_width_scales_with_length() {
        let short = estimate_text_width("ab", 14.0);
        let long = estimate_text_width("abcd", 14.0);
        assert_eq!(long, short * 2.0);
        assert_eq!(estimate_text_width("", 14.0), 0.0);
    }
}
