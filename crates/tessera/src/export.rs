//! Output formats and sinks.
//!
//! Markup is always built in memory first: [`svg`] assembles standalone
//! SVG documents and [`html`] wraps them into fragments and pages. An
//! [`Exporter`] then hands the finished markup to its destination.

pub mod html;
pub mod svg;

use std::{fmt, fs, io, path::PathBuf, str::FromStr};

use log::{error, info};
use thiserror::Error;

/// Markup flavor produced by the renderer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Format {
    /// Standalone SVG document with an embedded legend
    #[default]
    Svg,
    /// HTML fragment: container div, title, inline SVG and legend div
    Html,
    /// Complete HTML page around the fragment, with theme defaults
    Page,
}

impl Format {
    /// Conventional file extension for this format.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Html | Self::Page => "html",
        }
    }
}

impl FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "svg" => Ok(Self::Svg),
            "html" => Ok(Self::Html),
            "page" => Ok(Self::Page),
            _ => Err(format!("invalid format `{s}`, valid values: svg, html, page")),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Svg => write!(f, "svg"),
            Self::Html => write!(f, "html"),
            Self::Page => write!(f, "page"),
        }
    }
}

/// Destination of rendered markup.
pub trait Exporter {
    fn export(&self, markup: &str) -> Result<(), Error>;
}

/// Writes markup to a file, replacing any previous content.
#[derive(Debug, Clone)]
pub struct FileExporter {
    path: PathBuf,
}

impl FileExporter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Exporter for FileExporter {
    fn export(&self, markup: &str) -> Result<(), Error> {
        let file_name = self.path.display().to_string();
        info!(file_name, bytes = markup.len(); "Writing output file");

        fs::write(&self.path, markup).map_err(|source| {
            error!(file_name, err:err = source; "Failed to write output file");
            Error::Io {
                path: self.path.clone(),
                source,
            }
        })
    }
}

/// Failure to hand markup to its destination.
#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error writing {path:?}: {source}")]
    Io { path: PathBuf, source: io::Error },
}
