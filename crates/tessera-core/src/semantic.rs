//! Semantic model for Tessera figures.
//!
//! A [`Figure`] is the closed set of things Tessera can render: line, bar
//! and pie charts, and node-link diagrams. Figures are assembled in memory,
//! rendered, and discarded; rendering never mutates them.
//!
//! - [`chart`]: data points, series, chart configuration and chart kinds
//! - [`diagram`]: nodes, edges, layout selection and the validating [`DiagramBuilder`]

pub mod chart;
pub mod diagram;

use thiserror::Error;

pub use chart::{BarChart, ChartConfig, DataPoint, LineChart, PieChart, PieSlice, Series};
pub use diagram::{
    Diagram, DiagramBuilder, DiagramConfig, DiagramEdge, DiagramNode, LayoutDirection,
    LayoutEngine, NodeId,
};

/// Errors raised while assembling a figure.
///
/// These indicate a mistake by the caller building the figure, not a
/// runtime condition, so they are reported instead of being skipped.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BuildError {
    #[error("duplicate node id `{0}`")]
    DuplicateNode(NodeId),

    #[error("edge `{from}` -> `{to}` references unknown node `{missing}`")]
    UnknownNode {
        from: NodeId,
        to: NodeId,
        missing: NodeId,
    },

    #[error("invalid paint: {0}")]
    InvalidPaint(String),

    #[error("node `{0}` has a non-finite position")]
    NonFinitePosition(NodeId),
}

/// Everything Tessera can render.
#[derive(Debug, Clone)]
pub enum Figure {
    Line(LineChart),
    Bar(BarChart),
    Pie(PieChart),
    Diagram(Diagram),
}

impl Figure {
    /// Short lowercase name of the figure kind, used in logs and CSS classes.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Line(_) => "line",
            Self::Bar(_) => "bar",
            Self::Pie(_) => "pie",
            Self::Diagram(_) => "diagram",
        }
    }

    /// Title shown above the figure, if any.
    pub fn title(&self) -> Option<&str> {
        match self {
            Self::Line(chart) => chart.config().title(),
            Self::Bar(chart) => chart.config().title(),
            Self::Pie(chart) => chart.config().title(),
            Self::Diagram(diagram) => diagram.config().title(),
        }
    }
}

impl From<LineChart> for Figure {
    fn from(chart: LineChart) -> Self {
        Self::Line(chart)
    }
}

impl From<BarChart> for Figure {
    fn from(chart: BarChart) -> Self {
        Self::Bar(chart)
    }
}

impl From<PieChart> for Figure {
    fn from(chart: PieChart) -> Self {
        Self::Pie(chart)
    }
}

impl From<Diagram> for Figure {
    fn from(diagram: Diagram) -> Self {
        Self::Diagram(diagram)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_figure_kind_and_title() {
        let line: Figure = LineChart::new(ChartConfig::default().with_title("Sales")).into();
        assert_eq!(line.kind_name(), "line");
        assert_eq!(line.title(), Some("Sales"));

        let diagram: Figure = DiagramBuilder::default().build().unwrap().into();
        assert_eq!(diagram.kind_name(), "diagram");
        assert_eq!(diagram.title(), None);
    }

    #[test]
    fn test_build_error_messages() {
        let err = BuildError::UnknownNode {
            from: NodeId::from("a"),
            to: NodeId::from("b"),
            missing: NodeId::from("b"),
        };
        assert_eq!(
            err.to_string(),
            "edge `a` -> `b` references unknown node `b`"
        );
        assert_eq!(
            BuildError::DuplicateNode(NodeId::from("a")).to_string(),
            "duplicate node id `a`"
        );
    }
}
