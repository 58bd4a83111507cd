//! Error types for the Tessera CLI.
//!
//! [`CliError`] covers everything the binary can fail on: the library's
//! [`TesseraError`], unreadable files, and configuration or figure files
//! that do not describe a valid configuration or figure. TOML syntax and
//! schema errors keep the offending source and span so they can be shown
//! with a snippet.

use std::{io, ops::Range, path::PathBuf};

use thiserror::Error;

use tessera::{TesseraError, semantic::BuildError};

/// A TOML document that failed to deserialize.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct TomlError {
    path: String,
    src: String,
    message: String,
    span: Option<Range<usize>>,
}

impl TomlError {
    /// Captures a `toml` error together with the document it came from.
    pub fn new(path: impl Into<String>, src: impl Into<String>, err: &toml::de::Error) -> Self {
        Self {
            path: path.into(),
            src: src.into(),
            message: err.message().trim().to_string(),
            span: err.span(),
        }
    }

    /// Name of the file shown above the snippet.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn src(&self) -> &str {
        &self.src
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Byte range of the offending TOML, when `toml` reported one.
    pub fn span(&self) -> Option<Range<usize>> {
        self.span.clone()
    }
}

/// Configuration-related errors for CLI
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML configuration: {0}")]
    Parse(TomlError),

    #[error("Missing configuration file: {0}")]
    MissingFile(PathBuf),
}

/// Figure file errors
#[derive(Debug, Error)]
pub enum FigureError {
    #[error("Failed to parse figure file: {0}")]
    Parse(TomlError),

    #[error("Invalid figure: {0}")]
    Build(#[from] BuildError),

    #[error("Invalid figure: node `{node}` needs both `x` and `y` for a manual position")]
    PartialPosition { node: String },
}

/// The main error type of the CLI.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Figure(#[from] FigureError),

    #[error(transparent)]
    Tessera(#[from] TesseraError),
}

impl CliError {
    /// The TOML error with source information, if this error carries one.
    pub fn toml_error(&self) -> Option<&TomlError> {
        match self {
            Self::Config(ConfigError::Parse(err)) | Self::Figure(FigureError::Parse(err)) => {
                Some(err)
            }
            _ => None,
        }
    }
}
