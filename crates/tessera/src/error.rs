//! Error types for Tessera operations.
//!
//! [`TesseraError`] wraps every failure of the render pipeline: invalid
//! figures, data the chart geometry cannot represent, graphs the layout
//! cannot order, bad style configuration, and output failures.

use std::io;

use thiserror::Error;

use tessera_core::semantic::BuildError;

use crate::{chart::RenderError, export, layout::LayoutError};

/// The main error type for Tessera operations.
#[derive(Debug, Error)]
pub enum TesseraError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid figure: {0}")]
    Build(#[from] BuildError),

    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Export error: {0}")]
    Export(#[from] export::Error),
}

#[cfg(test)]
mod tests {
    use tessera_core::semantic::NodeId;

    use super::*;

    #[test]
    fn test_error_messages() {
        let err = TesseraError::from(RenderError::EmptyTotal);
        assert_eq!(err.to_string(), "Render error: pie chart values sum to zero");

        let err = TesseraError::from(LayoutError::Cycle {
            node: NodeId::from("a"),
        });
        assert!(err.to_string().starts_with("Layout error: cycle detected"));

        let err = TesseraError::from(export::Error::Io {
            path: "out.svg".into(),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        });
        assert_eq!(err.to_string(), "Export error: I/O error writing \"out.svg\": denied");
    }
}
