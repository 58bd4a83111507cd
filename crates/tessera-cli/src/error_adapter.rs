//! Error adapter for converting [`CliError`] to miette diagnostics.
//!
//! This module provides the bridge between the CLI's error types and
//! miette's rich diagnostic formatting. TOML errors with a known location
//! are rendered with a labeled snippet of the offending file; everything
//! else is rendered as a plain report with an error code.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, NamedSource, SourceSpan};

use tessera::TesseraError;

use crate::error::{CliError, ConfigError, FigureError, TomlError};

/// Adapter for a TOML error with its source document.
pub struct DiagnosticAdapter<'a> {
    err: &'a TomlError,
    code: &'static str,
    source: NamedSource<String>,
}

impl<'a> DiagnosticAdapter<'a> {
    /// Create a new diagnostic adapter.
    pub fn new(err: &'a TomlError, code: &'static str) -> Self {
        Self {
            err,
            code,
            source: NamedSource::new(err.path(), err.src().to_string()),
        }
    }
}

impl fmt::Debug for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiagnosticAdapter")
            .field("err", &self.err)
            .field("code", &self.code)
            .finish()
    }
}

impl fmt::Display for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.err.message())
    }
}

impl std::error::Error for DiagnosticAdapter<'_> {}

impl MietteDiagnostic for DiagnosticAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(self.code))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.source as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let span = self.err.span()?;
        let label =
            LabeledSpan::new_primary_with_span(Some("here".to_string()), SourceSpan::from(span));
        Some(Box::new(std::iter::once(label)))
    }
}

/// Adapter for errors without source location.
pub struct ErrorAdapter<'a>(pub &'a CliError);

impl ErrorAdapter<'_> {
    fn code_str(&self) -> &'static str {
        match self.0 {
            CliError::Io(_) => "tessera::io",
            CliError::Config(_) => "tessera::config",
            CliError::Figure(_) => "tessera::figure",
            CliError::Tessera(err) => match err {
                TesseraError::Io(_) => "tessera::io",
                TesseraError::Build(_) => "tessera::figure",
                TesseraError::Render(_) => "tessera::render",
                TesseraError::Layout(_) => "tessera::layout",
                TesseraError::Config(_) => "tessera::config",
                TesseraError::Export(_) => "tessera::export",
            },
        }
    }
}

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(self.0)
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(self.code_str()))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match self.0 {
            CliError::Tessera(TesseraError::Layout(_)) => {
                "use `layout = \"circular\"` or `layout = \"manual\"` for graphs with cycles"
            }
            CliError::Config(ConfigError::MissingFile(_)) => "check the `--config` path",
            _ => return None,
        };
        Some(Box::new(help))
    }
}

/// A reportable error that can be rendered by miette.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// A TOML error with source location information.
    Diagnostic(DiagnosticAdapter<'a>),
    /// A simple error without source location.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Diagnostic(d) => fmt::Display::fmt(d, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Diagnostic(_) => None,
            Reportable::Error(e) => std::error::Error::source(e),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Diagnostic(d) => d.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Diagnostic(d) => d.help(),
            Reportable::Error(e) => e.help(),
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Reportable::Diagnostic(d) => d.source_code(),
            Reportable::Error(e) => e.source_code(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Diagnostic(d) => d.labels(),
            Reportable::Error(e) => e.labels(),
        }
    }
}

/// Convert a [`CliError`] into a list of reportable errors.
///
/// TOML errors become a [`Reportable::Diagnostic`] with a snippet; every
/// other error becomes a single [`Reportable::Error`].
pub fn to_reportables(err: &CliError) -> Vec<Reportable<'_>> {
    let reportable = match err {
        CliError::Config(ConfigError::Parse(toml_err)) => {
            Reportable::Diagnostic(DiagnosticAdapter::new(toml_err, "tessera::config"))
        }
        CliError::Figure(FigureError::Parse(toml_err)) => {
            Reportable::Diagnostic(DiagnosticAdapter::new(toml_err, "tessera::figure"))
        }
        _ => Reportable::Error(ErrorAdapter(err)),
    };
    vec![reportable]
}

#[cfg(test)]
mod tests {
    use tessera::{layout::LayoutError, semantic::NodeId};

    use super::*;
    use crate::input::parse_figure;

    #[test]
    fn test_figure_parse_error_is_diagnostic() {
        let err = CliError::from(parse_figure("bad.toml", "kind = \"radar\"\n").unwrap_err());

        let reportables = to_reportables(&err);
        assert_eq!(reportables.len(), 1);
        match &reportables[0] {
            Reportable::Diagnostic(d) => {
                assert_eq!(d.code().unwrap().to_string(), "tessera::figure");
                let labels: Vec<_> = d.labels().unwrap().collect();
                assert_eq!(labels.len(), 1);
                assert!(labels[0].primary());
            }
            Reportable::Error(_) => panic!("Expected Diagnostic"),
        }
    }

    #[test]
    fn test_layout_error_has_code_and_help() {
        let err = CliError::from(TesseraError::from(LayoutError::Cycle {
            node: NodeId::from("a"),
        }));

        let reportables = to_reportables(&err);
        match &reportables[0] {
            Reportable::Error(e) => {
                assert_eq!(e.code().unwrap().to_string(), "tessera::layout");
                assert!(e.help().is_some());
                assert!(e.to_string().starts_with("Layout error"));
            }
            Reportable::Diagnostic(_) => panic!("Expected Error"),
        }
    }

    #[test]
    fn test_report_renders_snippet() {
        let src = "kind = \"line\"\nwidth = \"wide\"\n";
        let err = CliError::from(parse_figure("chart.toml", src).unwrap_err());

        let mut out = String::new();
        let handler =
            miette::GraphicalReportHandler::new_themed(miette::GraphicalTheme::unicode_nocolor());
        for reportable in to_reportables(&err) {
            handler.render_report(&mut out, &reportable).unwrap();
        }
        assert!(out.contains("chart.toml"));
        assert!(out.contains("wide"));
    }
}
