//! SVG drawing helpers shared by the chart and diagram renderers.
//!
//! - [`layer`]: z-ordered grouping of SVG nodes ([`LayeredOutput`])
//! - [`stroke`]: stroke definitions and the [`apply_stroke!`](crate::apply_stroke!) macro
//! - [`text`]: text styling and rendering ([`TextDefinition`])

mod layer;
mod stroke;
mod text;

pub use layer::{LayeredOutput, RenderLayer, SvgNode};
pub use stroke::{StrokeDefinition, StrokeStyle};
pub use text::{FontWeight, TextAnchor, TextDefinition, format_value, estimate_text_width};
