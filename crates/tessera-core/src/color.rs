//! Color handling for Tessera charts
//!
//! This module provides two types:
//!
//! - [`Color`] wraps the `DynamicColor` type from the color crate and is used
//!   to validate CSS color strings.
//! - [`Paint`] is what drawables carry: either a validated CSS color or an
//!   unresolved theme-variable reference such as `var(--ts-primary)`. Both
//!   are emitted verbatim into SVG attributes, so charts follow the colors
//!   of the page they are embedded in.

use std::{
    fmt,
    hash::{Hash, Hasher},
    str::FromStr,
};

use color::DynamicColor;

/// Wrapper around the `DynamicColor` type from the color crate
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Color {
    color: DynamicColor,
}

impl Eq for Color {}

impl Hash for Color {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_string().hash(state);
    }
}

impl Color {
    /// Create a new `Color` from a string
    /// This will parse CSS color strings such as "#ff0000", "rgb(255, 0, 0)", "red", etc.
    ///
    /// # Examples
    ///
    /// ```
    /// use tessera_core::color::Color;
    ///
    /// let red = Color::new("#ff0000").unwrap();
    /// let blue = Color::new("blue").unwrap();
    /// ```
    pub fn new(color_str: &str) -> Result<Self, String> {
        match DynamicColor::from_str(color_str) {
            Ok(color) => Ok(Self { color }),
            Err(err) => Err(format!("invalid color `{color_str}`: {err}")),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.color)
    }
}

/// A fill or stroke value as written by the user.
///
/// # Examples
///
/// ```
/// use tessera_core::color::Paint;
///
/// let literal = Paint::new("#40a9ff").unwrap();
/// assert_eq!(literal.to_string(), "#40a9ff");
/// assert!(!literal.is_theme_var());
///
/// let themed = Paint::new("var(--ts-primary)").unwrap();
/// assert_eq!(themed.to_string(), "var(--ts-primary)");
/// assert!(themed.is_theme_var());
///
/// assert!(Paint::new("var(primary)").is_err());
/// assert!(Paint::new("not-a-color").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Paint {
    /// A CSS color. `raw` is the text as written and is what gets emitted.
    Literal { raw: String, color: Color },
    /// A `var(--name)` reference, optionally with a fallback, left unresolved.
    ThemeVar(String),
}

impl Paint {
    /// Parses a paint string.
    ///
    /// # Errors
    ///
    /// Returns an error message when the string is neither a valid CSS color
    /// nor a well-formed `var(--name)` reference.
    pub fn new(raw: &str) -> Result<Self, String> {
        let raw = raw.trim();

        if let Some(inner) = raw
            .strip_prefix("var(")
            .and_then(|rest| rest.strip_suffix(')'))
        {
            let name = inner.split(',').next().unwrap_or_default().trim();
            if name.len() > 2 && name.starts_with("--") {
                return Ok(Self::ThemeVar(raw.to_string()));
            }
            return Err(format!(
                "invalid theme variable `{raw}`: expected `var(--name)`"
            ));
        }

        let color = Color::new(raw)?;
        Ok(Self::Literal {
            raw: raw.to_string(),
            color,
        })
    }

    /// Builds a theme-variable paint from a custom property name, e.g.
    /// `Paint::theme("--ts-text")`.
    ///
    /// Names without the leading `--` get it prepended.
    pub fn theme(name: &str) -> Self {
        let name = name.trim_start_matches('-');
        Self::ThemeVar(format!("var(--{name})"))
    }

    /// Returns `true` for `var(...)` references.
    pub fn is_theme_var(&self) -> bool {
        matches!(self, Self::ThemeVar(_))
    }

    /// The string emitted into markup.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Literal { raw, .. } => raw,
            Self::ThemeVar(raw) => raw,
        }
    }
}

impl FromStr for Paint {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for Paint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&Paint> for svg::node::Value {
    fn from(paint: &Paint) -> Self {
        Self::from(paint.as_str())
    }
}

/// Colors shared by every chart frame, all theme references.
pub mod theme {
    use super::Paint;

    /// Border and grid lines.
    pub fn border() -> Paint {
        Paint::theme("ts-border")
    }

    /// Axis lines and labels.
    pub fn text() -> Paint {
        Paint::theme("ts-text")
    }

    /// Placeholder text.
    pub fn text_muted() -> Paint {
        Paint::theme("ts-text-muted")
    }

    /// Card background, used for slice separators and donut holes.
    pub fn background() -> Paint {
        Paint::theme("ts-bg-card")
    }
}
