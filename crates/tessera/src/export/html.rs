//! HTML wrappers around rendered SVG.
//!
//! A fragment is the embeddable unit: a `ts-chart-container` div holding
//! the optional title, the inline SVG and the legend. A page wraps one
//! fragment into a complete document that defines the `--ts-*` theme
//! variables the markup refers to.

use std::fmt::Write;

use crate::chart::LegendEntry;

/// Default values of the theme variables used by the rendered markup.
const THEME_DEFAULTS: &[(&str, &str)] = &[
    ("--ts-primary", "#2f81f7"),
    ("--ts-secondary", "#3fb950"),
    ("--ts-border", "#d0d7de"),
    ("--ts-text", "#1f2328"),
    ("--ts-text-muted", "#656d76"),
    ("--ts-bg-card", "#ffffff"),
];

const CONTAINER_CSS: &str = "\
.ts-chart-container {
  display: flex;
  flex-direction: column;
  gap: 0.5rem;
  padding: 1rem;
  background: var(--ts-bg-card);
  border: 1px solid var(--ts-border);
  border-radius: 6px;
  color: var(--ts-text);
}
.ts-chart-title {
  font-weight: 600;
  text-align: center;
}
.ts-chart-legend {
  display: flex;
  flex-wrap: wrap;
  justify-content: center;
  gap: 1rem;
  font-size: 0.875rem;
}
.ts-chart-legend-item {
  display: flex;
  align-items: center;
  gap: 0.375rem;
}
.ts-chart-legend-color {
  width: 12px;
  height: 12px;
  border-radius: 2px;
}
";

/// Escapes text for use in HTML content and double-quoted attributes.
///
/// ```
/// # use tessera::export::html::escape;
/// assert_eq!(escape("a < b & \"c\""), "a &lt; b &amp; &quot;c&quot;");
/// ```
pub fn escape(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Attributes of the container div.
#[derive(Debug, Clone, Copy, Default)]
pub struct Container<'a> {
    kind: &'a str,
    title: Option<&'a str>,
    id: Option<&'a str>,
    classes: Option<&'a str>,
}

impl<'a> Container<'a> {
    /// Container for a figure of `kind` (`line`, `bar`, `pie`, `diagram`).
    pub fn new(kind: &'a str) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    pub fn with_title(mut self, title: Option<&'a str>) -> Self {
        self.title = title;
        self
    }

    pub fn with_id(mut self, id: Option<&'a str>) -> Self {
        self.id = id;
        self
    }

    /// Extra CSS classes appended after the built-in ones.
    pub fn with_classes(mut self, classes: Option<&'a str>) -> Self {
        self.classes = classes;
        self
    }
}

/// Builds an HTML fragment around the `svg` markup.
///
/// The legend div is omitted when `legend` is empty.
pub fn fragment(container: &Container<'_>, svg: &str, legend: &[LegendEntry]) -> String {
    let mut html = String::new();

    let _ = write!(
        html,
        "<div class=\"ts-chart-container ts-chart-{}",
        escape(container.kind)
    );
    if let Some(classes) = container.classes.filter(|c| !c.trim().is_empty()) {
        let _ = write!(html, " {}", escape(classes.trim()));
    }
    html.push('"');
    if let Some(id) = container.id {
        let _ = write!(html, " id=\"{}\"", escape(id));
    }
    html.push_str(">\n");

    if let Some(title) = container.title {
        let _ = writeln!(html, "<div class=\"ts-chart-title\">{}</div>", escape(title));
    }

    html.push_str(svg);
    html.push('\n');

    if !legend.is_empty() {
        html.push_str("<div class=\"ts-chart-legend\">");
        for entry in legend {
            let _ = write!(
                html,
                "<div class=\"ts-chart-legend-item\">\
                 <div class=\"ts-chart-legend-color\" style=\"background-color: {}\"></div>\
                 <span>{}</span></div>",
                escape(entry.paint().as_str()),
                escape(entry.label())
            );
        }
        html.push_str("</div>\n");
    }

    html.push_str("</div>\n");
    html
}

/// Stylesheet for fragments: theme defaults plus container rules.
pub fn stylesheet() -> String {
    let mut css = String::from(":root {\n");
    for (name, value) in THEME_DEFAULTS {
        let _ = writeln!(css, "  {name}: {value};");
    }
    css.push_str("}\n");
    css.push_str(CONTAINER_CSS);
    css
}

/// Wraps a fragment into a complete HTML document.
pub fn page(title: Option<&str>, body: &str) -> String {
    let title = escape(title.unwrap_or("Tessera"));
    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <title>{title}</title>\n\
         <style>\n{css}</style>\n\
         </head>\n\
         <body>\n{body}</body>\n\
         </html>\n",
        css = stylesheet(),
    )
}
